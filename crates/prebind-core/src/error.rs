//! 仪表创建链路的稳定错误域。
//!
//! # 设计背景（Why）
//! - 绑定装饰层自身不引入新的失败模式，唯一会出错的环节是底层工厂的
//!   仪表创建；该错误需要携带稳定错误码，便于日志与告警做自动归类。
//! - 错误码采用 `<域>.<语义>` 约定并集中在 [`codes`] 声明，避免散落
//!   各处导致命名漂移。
//!
//! # 使用契约（What）
//! - 实现方构造错误时应优先选用 [`codes`] 中的常量；自定义码值需遵循
//!   同一命名约定并保证稳定。
//! - 装饰层对该错误只做原样传播，不包装、不重试、不吞并。

use alloc::borrow::Cow;

/// 仪表工厂创建失败时返回的错误。
///
/// # 契约说明（What）
/// - `code`：稳定的 `&'static str` 错误码，承载机读语义。
/// - `message`：面向排障人员的描述，不应包含敏感信息。
/// - 实现 `Clone + PartialEq`，便于测试桩按值断言传播行为。
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct MeterError {
    code: &'static str,
    message: Cow<'static, str>,
}

impl MeterError {
    /// 构造仪表创建错误。
    ///
    /// # 契约说明
    /// - `code` 建议取自 [`codes`]；`message` 支持静态或运行期字符串。
    pub fn new(code: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// 稳定错误码。
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// 人类可读的错误描述。
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// 仪表创建链路的稳定错误码清单。
pub mod codes {
    /// 后端拒绝创建仪表（配额、重名策略等）。
    pub const INSTRUMENT_CREATION: &str = "meter.instrument_creation";
    /// 后端尚未就绪或已关闭。
    pub const BACKEND_UNAVAILABLE: &str = "meter.backend_unavailable";
    /// 描述符不满足后端的命名或单位约束。
    pub const INVALID_DESCRIPTOR: &str = "meter.invalid_descriptor";
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_carries_code_and_message() {
        let err = MeterError::new(codes::INVALID_DESCRIPTOR, "name must not be empty");
        assert_eq!(
            err.to_string(),
            "meter.invalid_descriptor: name must not be empty"
        );
        assert_eq!(err.code(), codes::INVALID_DESCRIPTOR);
    }
}
