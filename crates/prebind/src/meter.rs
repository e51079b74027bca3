//! 工厂绑定：让同一工厂创建的所有仪表自动携带既定属性。
//!
//! # 设计背景（Why）
//! - 当一组仪表共享相同的静态属性（服务名、可用区等）时，逐个绑定既
//!   繁琐又容易遗漏；在工厂层面绑定一次，之后创建的每个仪表天然处于
//!   绑定形态。
//! - 工厂在绑定时就完成属性列表复制、集合规范化与两种测量选项的预计
//!   算；其创建的全部仪表直接共享这些值，创建路径不做任何重复推导。
//!
//! # 契约说明（What）
//! - [`meter`] 遵循与仪表绑定完全一致的恒等、扁平化与复制规则。
//! - 八个创建方法把描述符原样委托给底层工厂：失败时经 `?` 原样传播，
//!   绝不包装失败结果；成功时以工厂的冻结状态包装新仪表。

use alloc::{sync::Arc, vec::Vec};

use prebind_core::{
    AddOption, AttributeSet, Binding, Counter, Gauge, Histogram, InstrumentDescriptor, KeyValue,
    Meter, MeterError, RecordOption, UpDownCounter,
};

use crate::instrument::{Bound, flatten};

/// 为仪表工厂预绑定属性。
///
/// # 契约说明（What）
/// - `attributes` 为空时原样返回 `meter`（同一 `Arc`，不分配）。
/// - `meter` 已是绑定形态时扁平化到最初的原始工厂，属性列表为
///   “既有列表 ++ `attributes` 副本”。
/// - 返回工厂创建的每个同步仪表都自动绑定同一组属性，调用方无须再
///   逐仪表绑定。
pub fn meter(meter: Arc<dyn Meter>, attributes: &[KeyValue]) -> Arc<dyn Meter> {
    if attributes.is_empty() {
        return meter;
    }

    let binding = meter.unwrap_binding();
    let (inner, list) = flatten(meter, binding, attributes);
    let set = AttributeSet::new(&list);
    Arc::new(BoundMeter {
        inner,
        attributes: list,
        add_option: AddOption::with_attribute_set(set.clone()),
        record_option: RecordOption::with_attribute_set(set.clone()),
        set,
    })
}

/// 绑定形态的工厂：冻结的属性状态加两种预计算选项。
struct BoundMeter {
    inner: Arc<dyn Meter>,
    attributes: Vec<KeyValue>,
    set: AttributeSet,
    add_option: AddOption,
    record_option: RecordOption,
}

/// 生成一个“委托创建并包装”的工厂方法：描述符原样透传，错误经 `?`
/// 原样传播，成功结果复用工厂的冻结属性状态。
macro_rules! create_bound_instrument {
    ($method:ident, $contract:ident<$value:ty>, $option_field:ident) => {
        fn $method(
            &self,
            descriptor: &InstrumentDescriptor<'_>,
        ) -> Result<Arc<dyn $contract<$value>>, MeterError> {
            let inner = self.inner.$method(descriptor)?;
            Ok(Arc::new(Bound {
                inner,
                attributes: self.attributes.clone(),
                set: self.set.clone(),
                option: self.$option_field.clone(),
            }))
        }
    };
}

impl Meter for BoundMeter {
    create_bound_instrument!(i64_counter, Counter<i64>, add_option);
    create_bound_instrument!(i64_up_down_counter, UpDownCounter<i64>, add_option);
    create_bound_instrument!(i64_histogram, Histogram<i64>, record_option);
    create_bound_instrument!(i64_gauge, Gauge<i64>, record_option);
    create_bound_instrument!(f64_counter, Counter<f64>, add_option);
    create_bound_instrument!(f64_up_down_counter, UpDownCounter<f64>, add_option);
    create_bound_instrument!(f64_histogram, Histogram<f64>, record_option);
    create_bound_instrument!(f64_gauge, Gauge<f64>, record_option);

    fn unwrap_binding(&self) -> Option<Binding<dyn Meter>> {
        Some(Binding {
            target: self.inner.clone(),
            attributes: self.attributes.clone(),
            set: self.set.clone(),
        })
    }
}
