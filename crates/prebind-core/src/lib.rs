#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![doc = "prebind-core: 同步指标仪表、属性模型与工厂契约。"]
#![doc = ""]
#![doc = "本 crate 只声明契约，不含任何后端实现："]
#![doc = "- [`attributes`]：属性键值建模与规范化集合（去重、排序、后写者胜）。"]
#![doc = "- [`instrument`]：八种同步仪表折叠为四个泛型 Trait，外加测量期选项与折算逻辑。"]
#![doc = "- [`meter`]：按描述符创建仪表的工厂契约。"]
#![doc = "- [`error`]：创建链路的稳定错误域。"]
#![doc = ""]
#![doc = "绑定装饰能力（预绑定属性、扁平化、解包）由 `prebind` crate 在这些契约之上提供。"]

extern crate alloc;

mod sealed;

pub mod attributes;
pub mod error;
pub mod instrument;
pub mod meter;

pub use attributes::{AttributeKey, AttributeSet, AttributeValue, KeyValue};
pub use error::MeterError;
pub use instrument::{
    AddConfig, AddOption, Binding, Counter, Gauge, Histogram, MeasurementValue, RecordConfig,
    RecordOption, UpDownCounter,
};
pub use meter::{InstrumentDescriptor, Meter};
