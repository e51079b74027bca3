//! 仪表绑定：为同步仪表句柄预绑定属性的包装器与绑定操作。
//!
//! # 设计背景（Why）
//! - 当某仪表的大部分测量都携带同一组静态属性时，把属性在绑定时规范化
//!   一次、测量时直接复用，比每次测量重复传递并规范化要廉价得多。
//! - 四种仪表契约的绑定逻辑完全同构，仅在 Trait 名、记录方法与选项
//!   类型上有别；统一的 [`Bound`] 值对象承载全部状态，每种契约只需
//!   一份薄实现。
//!
//! # 逻辑解析（How）
//! - 绑定操作（[`counter`] / [`up_down_counter`] / [`histogram`] /
//!   [`gauge`]）遵循同一套规则：
//!   1. 空属性直接返回原句柄（恒等，不分配）；
//!   2. 经 `unwrap_binding` 钩子识别“已绑定”形态并扁平化——新包装器
//!      直接指向最初的原始仪表，属性列表为“旧列表 ++ 新属性副本”，
//!      不叠加委托层级；
//!   3. 调用方切片总是被复制，绑定后改写原缓冲不影响包装器；
//!   4. 规范化集合与携带它的测量选项在绑定时各计算一次并冻结。
//! - 记录路径分两档：无测量期选项时原样转发预计算选项（零额外分配）；
//!   有测量期选项时从对应池租借缓冲，按“绑定选项在前、测量期选项在
//!   后”的次序拼接——折算时同键由靠后者胜出，测量现场得以覆盖绑定值。
//!
//! # 契约说明（What）
//! - 包装器构造后不可变，可跨线程只读共享；重复绑定只会替换为新包装
//!   器，绝不修改旧实例。
//! - 本层不引入新的失败模式；底层仪表的 panic 原样向外传播，池缓冲经
//!   守卫在展开路径上照常归还。

use alloc::{sync::Arc, vec::Vec};
use core::slice;

use prebind_core::{
    AddOption, AttributeSet, Binding, Counter, Gauge, Histogram, KeyValue, MeasurementValue,
    RecordOption, UpDownCounter,
};

use crate::pool::{ADD_OPTIONS, RECORD_OPTIONS};

/// 绑定包装器：原始目标、冻结的属性列表、规范化集合与预计算选项。
///
/// 同一结构同时服务四种仪表契约与两种选项类型；字段在构造后不再变化。
pub(crate) struct Bound<I: ?Sized, O> {
    pub(crate) inner: Arc<I>,
    pub(crate) attributes: Vec<KeyValue>,
    pub(crate) set: AttributeSet,
    pub(crate) option: O,
}

/// 扁平化：若句柄已是绑定形态，取回最初目标并串接属性；否则复制新属性。
///
/// # 契约说明
/// - `binding` 必须来自 `handle` 自身的 `unwrap_binding` 钩子。
/// - 返回的列表始终是新分配的拥有所有权副本，不与任何调用方缓冲共享。
pub(crate) fn flatten<I: ?Sized>(
    handle: Arc<I>,
    binding: Option<Binding<I>>,
    attributes: &[KeyValue],
) -> (Arc<I>, Vec<KeyValue>) {
    match binding {
        Some(previous) => {
            let mut list = previous.attributes;
            list.extend_from_slice(attributes);
            (previous.target, list)
        }
        None => (handle, attributes.to_vec()),
    }
}

/// 为计数器预绑定属性。
///
/// # 契约说明（What）
/// - `attributes` 为空时原样返回 `instrument`（同一 `Arc`，不分配）。
/// - `instrument` 已是绑定形态时执行扁平化：返回的包装器直接指向最初
///   的原始计数器，属性为“既有列表 ++ `attributes` 副本”。
/// - 此后经该句柄的每次 [`Counter::add`] 都自动携带绑定属性；测量期
///   追加的同键属性按“后写者胜”覆盖绑定值。
pub fn counter<N: MeasurementValue>(
    instrument: Arc<dyn Counter<N>>,
    attributes: &[KeyValue],
) -> Arc<dyn Counter<N>> {
    if attributes.is_empty() {
        return instrument;
    }

    let binding = instrument.unwrap_binding();
    let (inner, list) = flatten(instrument, binding, attributes);
    let set = AttributeSet::new(&list);
    Arc::new(Bound {
        inner,
        attributes: list,
        option: AddOption::with_attribute_set(set.clone()),
        set,
    })
}

impl<N: MeasurementValue> Counter<N> for Bound<dyn Counter<N>, AddOption> {
    fn add(&self, value: N, options: &[AddOption]) {
        if options.is_empty() {
            self.inner.add(value, slice::from_ref(&self.option));
            return;
        }

        let mut merged = ADD_OPTIONS.acquire();
        merged.push(self.option.clone());
        merged.extend_from_slice(options);
        self.inner.add(value, &merged);
    }

    fn unwrap_binding(&self) -> Option<Binding<dyn Counter<N>>> {
        Some(Binding {
            target: self.inner.clone(),
            attributes: self.attributes.clone(),
            set: self.set.clone(),
        })
    }
}

/// 为上下计数器预绑定属性；规则与 [`counter`] 一致。
pub fn up_down_counter<N: MeasurementValue>(
    instrument: Arc<dyn UpDownCounter<N>>,
    attributes: &[KeyValue],
) -> Arc<dyn UpDownCounter<N>> {
    if attributes.is_empty() {
        return instrument;
    }

    let binding = instrument.unwrap_binding();
    let (inner, list) = flatten(instrument, binding, attributes);
    let set = AttributeSet::new(&list);
    Arc::new(Bound {
        inner,
        attributes: list,
        option: AddOption::with_attribute_set(set.clone()),
        set,
    })
}

impl<N: MeasurementValue> UpDownCounter<N> for Bound<dyn UpDownCounter<N>, AddOption> {
    fn add(&self, value: N, options: &[AddOption]) {
        if options.is_empty() {
            self.inner.add(value, slice::from_ref(&self.option));
            return;
        }

        let mut merged = ADD_OPTIONS.acquire();
        merged.push(self.option.clone());
        merged.extend_from_slice(options);
        self.inner.add(value, &merged);
    }

    fn unwrap_binding(&self) -> Option<Binding<dyn UpDownCounter<N>>> {
        Some(Binding {
            target: self.inner.clone(),
            attributes: self.attributes.clone(),
            set: self.set.clone(),
        })
    }
}

/// 为直方图预绑定属性；规则与 [`counter`] 一致，记录路径使用记录型池。
pub fn histogram<N: MeasurementValue>(
    instrument: Arc<dyn Histogram<N>>,
    attributes: &[KeyValue],
) -> Arc<dyn Histogram<N>> {
    if attributes.is_empty() {
        return instrument;
    }

    let binding = instrument.unwrap_binding();
    let (inner, list) = flatten(instrument, binding, attributes);
    let set = AttributeSet::new(&list);
    Arc::new(Bound {
        inner,
        attributes: list,
        option: RecordOption::with_attribute_set(set.clone()),
        set,
    })
}

impl<N: MeasurementValue> Histogram<N> for Bound<dyn Histogram<N>, RecordOption> {
    fn record(&self, value: N, options: &[RecordOption]) {
        if options.is_empty() {
            self.inner.record(value, slice::from_ref(&self.option));
            return;
        }

        let mut merged = RECORD_OPTIONS.acquire();
        merged.push(self.option.clone());
        merged.extend_from_slice(options);
        self.inner.record(value, &merged);
    }

    fn unwrap_binding(&self) -> Option<Binding<dyn Histogram<N>>> {
        Some(Binding {
            target: self.inner.clone(),
            attributes: self.attributes.clone(),
            set: self.set.clone(),
        })
    }
}

/// 为瞬时值仪表预绑定属性；规则与 [`histogram`] 一致。
pub fn gauge<N: MeasurementValue>(
    instrument: Arc<dyn Gauge<N>>,
    attributes: &[KeyValue],
) -> Arc<dyn Gauge<N>> {
    if attributes.is_empty() {
        return instrument;
    }

    let binding = instrument.unwrap_binding();
    let (inner, list) = flatten(instrument, binding, attributes);
    let set = AttributeSet::new(&list);
    Arc::new(Bound {
        inner,
        attributes: list,
        option: RecordOption::with_attribute_set(set.clone()),
        set,
    })
}

impl<N: MeasurementValue> Gauge<N> for Bound<dyn Gauge<N>, RecordOption> {
    fn record(&self, value: N, options: &[RecordOption]) {
        if options.is_empty() {
            self.inner.record(value, slice::from_ref(&self.option));
            return;
        }

        let mut merged = RECORD_OPTIONS.acquire();
        merged.push(self.option.clone());
        merged.extend_from_slice(options);
        self.inner.record(value, &merged);
    }

    fn unwrap_binding(&self) -> Option<Binding<dyn Gauge<N>>> {
        Some(Binding {
            target: self.inner.clone(),
            attributes: self.attributes.clone(),
            set: self.set.clone(),
        })
    }
}
