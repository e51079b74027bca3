//! 通用解包：从任意绑定句柄取回原始目标与累计属性集合。
//!
//! # 设计背景（Why）
//! - 八种仪表与工厂共九类句柄都可能处于绑定形态；解包必须是一个统一
//!   的泛型入口，而不是九个让调用方挑选的函数。
//! - `dyn Trait` 没有结构化类型断言，识别逻辑落在契约 Trait 的
//!   `unwrap_binding` 默认钩子上：包装器覆写返回自述信息，其余实现
//!   保持 `None`，解包据此回退到“恒等 + 空集合”。
//!
//! # 契约说明（What）
//! - 对绑定句柄：返回最初的原始目标与累计绑定的规范化集合。
//! - 对从未绑定的句柄：返回自身克隆与 [`AttributeSet::empty`]——显式
//!   空集合，而非缺省值的缺失。

use alloc::sync::Arc;

use prebind_core::{
    AttributeSet, Counter, Gauge, Histogram, MeasurementValue, Meter, UpDownCounter,
};

/// 可解包句柄的统一契约。
///
/// 由本模块为全部九类 `Arc<dyn …>` 句柄实现；调用方一般经
/// [`unwrap`] 使用，无须直接依赖本 Trait。
pub trait Unwrap: Sized {
    /// 返回原始目标与累计绑定的属性集合。
    fn unwrap_bound(&self) -> (Self, AttributeSet);
}

macro_rules! unwrap_for_instrument {
    ($contract:ident) => {
        impl<N: MeasurementValue> Unwrap for Arc<dyn $contract<N>> {
            fn unwrap_bound(&self) -> (Self, AttributeSet) {
                match self.as_ref().unwrap_binding() {
                    Some(binding) => (binding.target, binding.set),
                    None => (self.clone(), AttributeSet::empty()),
                }
            }
        }
    };
}

unwrap_for_instrument!(Counter);
unwrap_for_instrument!(UpDownCounter);
unwrap_for_instrument!(Histogram);
unwrap_for_instrument!(Gauge);

impl Unwrap for Arc<dyn Meter> {
    fn unwrap_bound(&self) -> (Self, AttributeSet) {
        match self.as_ref().unwrap_binding() {
            Some(binding) => (binding.target, binding.set),
            None => (self.clone(), AttributeSet::empty()),
        }
    }
}

/// 解包任意仪表或工厂句柄。
///
/// # 契约说明（What）
/// - 多次绑定的句柄经扁平化只有一层包装，单次解包即可取回最初目标。
/// - 从未绑定的句柄得到 `(自身克隆, 空集合)`；该操作对任何输入都不
///   失败、不分配新包装。
pub fn unwrap<T: Unwrap>(handle: &T) -> (T, AttributeSet) {
    handle.unwrap_bound()
}
