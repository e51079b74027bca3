//! 内部 sealed 模块，用于封闭测量值类型的实现集合。
//!
//! # 设计背景（Why）
//! - 同步仪表契约只对 `i64` 与 `f64` 两种测量值定义语义，开放实现会让
//!   下游后端面对无法聚合的值域。
//! - 通过私有模块内的标记 Trait，将值域封闭在本 crate 内，同时保留未来
//!   在 MINOR 版本中扩展新值类型的空间。
//!
//! # 契约说明（What）
//! - 仅 `i64` 与 `f64` 实现 `Sealed`；调用方无法为自定义类型补充实现。
//! - 扩展值域时需同步更新 [`crate::instrument::MeasurementValue`] 的文档
//!   与所有泛型仪表契约的聚合语义说明。
pub trait Sealed {}

impl Sealed for i64 {}
impl Sealed for f64 {}
