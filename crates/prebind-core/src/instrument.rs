//! 同步指标仪表契约与测量期选项模型。
//!
//! # 设计背景（Why）
//! - 吸收 OpenTelemetry 同步仪表（Counter / UpDownCounter / Histogram /
//!   Gauge）的分类方式，以对象安全 Trait 表达“测量汇”能力，便于以
//!   `Arc<dyn …>` 句柄注入与装饰。
//! - 整数与浮点两套仪表在行为上只差测量值类型，因此以密封的
//!   [`MeasurementValue`] 做类型参数，一份契约覆盖八种仪表组合。
//!
//! # 模块概览（How）
//! - [`Counter`] / [`UpDownCounter`]：累加型仪表，经 [`AddOption`] 附带
//!   测量期属性。
//! - [`Histogram`] / [`Gauge`]：记录型仪表，经 [`RecordOption`] 附带
//!   测量期属性。
//! - [`AddConfig`] / [`RecordConfig`]：供实现方把选项序列折算为最终
//!   属性集合；同键以“靠后的选项胜出”。
//! - [`Binding`]：绑定包装器的自述能力载体；所有契约 Trait 都带有默认
//!   返回 `None` 的 [`Counter::unwrap_binding`] 钩子，从未被包装的实现
//!   无需关心它。
//!
//! # 使用契约（What）
//! - 记录方法为纯同步调用，不阻塞、不做 I/O；实现方自行保证线程安全。
//! - 本层不校验测量值语义（如计数器增量非负），该约束由调用方维护。

use alloc::{sync::Arc, vec::Vec};

use crate::attributes::{AttributeSet, KeyValue};
use crate::sealed::Sealed;

/// 同步仪表允许的测量值类型。
///
/// # 契约说明（What）
/// - 值域封闭为 `i64` 与 `f64`，对应 OTel 的 Int64/Float64 仪表族；
///   外部无法扩展实现（见 `sealed` 模块）。
/// - `Copy + Send + Sync + 'static` 保证测量值可以按值穿越任意线程边界。
pub trait MeasurementValue: Sealed + Copy + Send + Sync + 'static {}

impl MeasurementValue for i64 {}
impl MeasurementValue for f64 {}

/// 测量期属性的两种携带形态。
///
/// 绑定装饰层预先把规范化集合装入 `Set` 变体，测量现场的临时标签则以
/// `List` 变体传入；折算时二者都按出现顺序展开。
#[derive(Clone, Debug, PartialEq)]
enum MeasureAttrs {
    List(Vec<KeyValue>),
    Set(AttributeSet),
}

impl MeasureAttrs {
    fn append_to(&self, merged: &mut Vec<KeyValue>) {
        match self {
            Self::List(list) => merged.extend_from_slice(list),
            Self::Set(set) => merged.extend_from_slice(set.as_slice()),
        }
    }

    fn as_set(&self) -> Option<&AttributeSet> {
        match self {
            Self::Set(set) => Some(set),
            Self::List(_) => None,
        }
    }
}

macro_rules! measure_option {
    ($(#[$doc:meta])* $option:ident, $(#[$cfg_doc:meta])* $config:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $option(MeasureAttrs);

        impl $option {
            /// 携带一组测量期临时属性。
            ///
            /// # 契约说明
            /// - 条目按书写顺序参与折算，晚于先前选项出现的同键条目胜出。
            pub fn with_attributes(attributes: impl IntoIterator<Item = KeyValue>) -> Self {
                Self(MeasureAttrs::List(attributes.into_iter().collect()))
            }

            /// 携带一个已规范化的属性集合。
            ///
            /// # 契约说明
            /// - 集合整体视作一段有序条目参与折算；绑定装饰层以该构造
            ///   预计算“绑定选项”，测量热路径直接复用。
            pub fn with_attribute_set(set: AttributeSet) -> Self {
                Self(MeasureAttrs::Set(set))
            }
        }

        $(#[$cfg_doc])*
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $config {
            attributes: AttributeSet,
        }

        impl $config {
            /// 将选项序列折算为最终属性集合。
            ///
            /// # 逻辑解析（How）
            /// - 单个集合选项是绑定装饰的快路径形态，直接复用现成集合，
            ///   避免重复规范化。
            /// - 其余情形按选项出现顺序串接条目后整体规范化一次，同键
            ///   由靠后的条目胜出。
            pub fn new(options: &[$option]) -> Self {
                if let [only] = options {
                    if let Some(set) = only.0.as_set() {
                        return Self {
                            attributes: set.clone(),
                        };
                    }
                }

                let mut merged: Vec<KeyValue> = Vec::new();
                for option in options {
                    option.0.append_to(&mut merged);
                }
                Self {
                    attributes: AttributeSet::new(&merged),
                }
            }

            /// 折算后的属性集合。
            pub fn attributes(&self) -> &AttributeSet {
                &self.attributes
            }
        }
    };
}

measure_option!(
    /// 累加型仪表（Counter / UpDownCounter）的测量期选项。
    ///
    /// # 设计背景（Why）
    /// - 与记录型选项分离，使 `add` 与 `record` 两条热路径可以各自维护
    ///   缓冲池，互不串扰。
    AddOption,
    /// 累加型选项序列的折算结果，供测量汇实现与测试桩消费。
    AddConfig
);

measure_option!(
    /// 记录型仪表（Histogram / Gauge）的测量期选项。
    RecordOption,
    /// 记录型选项序列的折算结果。
    RecordConfig
);

/// 绑定包装器的自述信息：原始目标、绑定属性列表与规范化集合。
///
/// # 设计背景（Why）
/// - 识别“已绑定”形态需要一种能力探测手段，而 `dyn Trait` 不支持向
///   下转型到未知的包装器类型；因此契约 Trait 统一提供默认返回
///   `None` 的钩子，包装器覆写后返回本结构。
///
/// # 契约说明（What）
/// - `target`：未被包装的原始仪表或工厂句柄。
/// - `attributes`：按绑定先后串接的键值列表，保留书写顺序以便审阅。
/// - `set`：与 `attributes` 对应的规范化集合。
pub struct Binding<T: ?Sized> {
    pub target: Arc<T>,
    pub attributes: Vec<KeyValue>,
    pub set: AttributeSet,
}

impl<T: ?Sized> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            attributes: self.attributes.clone(),
            set: self.set.clone(),
        }
    }
}

/// 单调累加计数器。
///
/// # 契约说明（What）
/// - **前置条件**：调用方保证 `value` 符合单调语义（通常非负）。
/// - **后置条件**：实现必须线程安全；后端暂不可用时应丢弃或缓存数据，
///   不得阻塞热路径。
pub trait Counter<N: MeasurementValue>: Send + Sync {
    /// 累加指标值，`options` 可附带测量期属性。
    fn add(&self, value: N, options: &[AddOption]);

    /// 绑定包装器的自述钩子；从未被包装的实现保持默认 `None`。
    fn unwrap_binding(&self) -> Option<Binding<dyn Counter<N>>> {
        None
    }
}

/// 可上下波动的计数器，适用于连接数、队列长度等瞬时量。
///
/// # 契约说明（What）
/// - `value` 可正可负；最终值的业务边界由调用方保证。
pub trait UpDownCounter<N: MeasurementValue>: Send + Sync {
    /// 按增量调整指标值。
    fn add(&self, value: N, options: &[AddOption]);

    /// 绑定包装器的自述钩子；从未被包装的实现保持默认 `None`。
    fn unwrap_binding(&self) -> Option<Binding<dyn UpDownCounter<N>>> {
        None
    }
}

/// 直方图仪表，记录延迟、尺寸等分布样本。
pub trait Histogram<N: MeasurementValue>: Send + Sync {
    /// 记录一个样本值。
    fn record(&self, value: N, options: &[RecordOption]);

    /// 绑定包装器的自述钩子；从未被包装的实现保持默认 `None`。
    fn unwrap_binding(&self) -> Option<Binding<dyn Histogram<N>>> {
        None
    }
}

/// 瞬时值仪表，记录最近一次观测值。
pub trait Gauge<N: MeasurementValue>: Send + Sync {
    /// 记录当前观测值。
    fn record(&self, value: N, options: &[RecordOption]);

    /// 绑定包装器的自述钩子；从未被包装的实现保持默认 `None`。
    fn unwrap_binding(&self) -> Option<Binding<dyn Gauge<N>>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeValue;

    #[test]
    fn later_options_win_on_duplicate_keys() {
        let bound = AddOption::with_attribute_set(AttributeSet::new(&[
            KeyValue::new("user", "alice"),
            KeyValue::new("id", 1i64),
        ]));
        let call_time = AddOption::with_attributes([KeyValue::new("user", "bob")]);

        let config = AddConfig::new(&[bound, call_time]);
        assert_eq!(
            config.attributes().get("user"),
            Some(&AttributeValue::from("bob")),
            "测量期属性应覆盖绑定属性"
        );
        assert_eq!(config.attributes().get("id"), Some(&AttributeValue::I64(1)));
    }

    #[test]
    fn single_set_option_reuses_canonical_set() {
        let set = AttributeSet::new(&[KeyValue::new("zone", "cn-north")]);
        let config = RecordConfig::new(&[RecordOption::with_attribute_set(set.clone())]);
        assert_eq!(config.attributes(), &set);
    }

    #[test]
    fn empty_options_resolve_to_empty_set() {
        let config = AddConfig::new(&[]);
        assert!(config.attributes().is_empty());
    }
}
