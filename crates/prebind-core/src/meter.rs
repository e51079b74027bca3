//! 仪表工厂（Meter）契约与仪表元数据描述。
//!
//! # 设计背景（Why）
//! - 统一各类后端（OTLP、Prometheus、测试桩）的仪表创建入口：按元数据
//!   描述符创建八种同步仪表之一，失败时返回稳定错误。
//! - 工厂同样具备绑定自述钩子，使“绑定工厂”与“绑定仪表”共享一套
//!   解包契约。
//!
//! # 使用契约（What）
//! - 创建方法返回 `Arc<dyn …>` 句柄，实现可缓存同名仪表避免重复构建。
//! - 创建失败必须以 [`MeterError`](crate::error::MeterError) 表达，调用
//!   方（含绑定装饰层）原样向上传播，不得掩盖或重试。

use alloc::sync::Arc;

use crate::error::MeterError;
use crate::instrument::{Binding, Counter, Gauge, Histogram, UpDownCounter};

/// 仪表元数据描述。
///
/// # 设计背景（Why）
/// - 对齐 OpenTelemetry Instrument Descriptor：集中声明名称、说明与
///   单位，创建路径整体透传，避免热路径重复分配字符串。
///
/// # 契约说明（What）
/// - `name` 建议遵循 `namespace.metric_name` 蛇形命名并保持全局唯一。
/// - `unit` 遵循 UCUM 或惯用单位（如 `ms`、`bytes`）。
/// - 元数据仅在创建调用期间有效；实现如需持久化应自行克隆。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstrumentDescriptor<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub unit: Option<&'a str>,
}

impl<'a> InstrumentDescriptor<'a> {
    /// 以名称构造描述符。
    pub const fn new(name: &'a str) -> Self {
        Self {
            name,
            description: None,
            unit: None,
        }
    }

    /// 附加说明文本。
    pub const fn with_description(mut self, description: &'a str) -> Self {
        self.description = Some(description);
        self
    }

    /// 附加单位信息。
    pub const fn with_unit(mut self, unit: &'a str) -> Self {
        self.unit = Some(unit);
        self
    }
}

/// 同步仪表工厂契约。
///
/// # 契约说明（What）
/// - 八个创建方法一一对应 `{i64, f64} × {Counter, UpDownCounter,
///   Histogram, Gauge}`；描述符按引用透传，不做改写。
/// - **后置条件**：成功时返回可长期持有的仪表句柄；失败时返回
///   [`MeterError`]，并且不产生任何半构造的仪表。
///
/// # 风险提示（Trade-offs）
/// - 后端初始化失败时，建议实现返回降级仪表（空操作）而非 panic；
///   本契约不强制该策略。
pub trait Meter: Send + Sync {
    /// 创建整数计数器。
    fn i64_counter(
        &self,
        descriptor: &InstrumentDescriptor<'_>,
    ) -> Result<Arc<dyn Counter<i64>>, MeterError>;

    /// 创建整数上下计数器。
    fn i64_up_down_counter(
        &self,
        descriptor: &InstrumentDescriptor<'_>,
    ) -> Result<Arc<dyn UpDownCounter<i64>>, MeterError>;

    /// 创建整数直方图。
    fn i64_histogram(
        &self,
        descriptor: &InstrumentDescriptor<'_>,
    ) -> Result<Arc<dyn Histogram<i64>>, MeterError>;

    /// 创建整数瞬时值仪表。
    fn i64_gauge(
        &self,
        descriptor: &InstrumentDescriptor<'_>,
    ) -> Result<Arc<dyn Gauge<i64>>, MeterError>;

    /// 创建浮点计数器。
    fn f64_counter(
        &self,
        descriptor: &InstrumentDescriptor<'_>,
    ) -> Result<Arc<dyn Counter<f64>>, MeterError>;

    /// 创建浮点上下计数器。
    fn f64_up_down_counter(
        &self,
        descriptor: &InstrumentDescriptor<'_>,
    ) -> Result<Arc<dyn UpDownCounter<f64>>, MeterError>;

    /// 创建浮点直方图。
    fn f64_histogram(
        &self,
        descriptor: &InstrumentDescriptor<'_>,
    ) -> Result<Arc<dyn Histogram<f64>>, MeterError>;

    /// 创建浮点瞬时值仪表。
    fn f64_gauge(
        &self,
        descriptor: &InstrumentDescriptor<'_>,
    ) -> Result<Arc<dyn Gauge<f64>>, MeterError>;

    /// 绑定包装器的自述钩子；从未被包装的工厂保持默认 `None`。
    fn unwrap_binding(&self) -> Option<Binding<dyn Meter>> {
        None
    }
}
