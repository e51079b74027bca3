//! 指标属性的键值建模与规范化集合。
//!
//! # 设计背景（Why）
//! - 参考 OpenTelemetry `attribute` 包与 Datadog 结构化标签的通用做法，
//!   将“属性”拆分为两层：保留书写顺序的键值列表，以及去重、排序后的
//!   规范化集合 [`AttributeSet`]。
//! - 绑定装饰层依赖“集合只在绑定时规范化一次”的约定来摊薄热路径成本，
//!   因此规范化逻辑集中在此处，其余模块一律消费现成的集合值。
//!
//! # 模块概览（How）
//! - [`KeyValue`]：单条属性，键为 `Cow<'static, str>`，值为 [`AttributeValue`]。
//! - [`AttributeValue`]：文本、布尔、整数、浮点四类标量的统一枚举。
//! - [`AttributeSet`]：按键排序、同键后写者胜的不可变集合，内部以
//!   `Arc<[KeyValue]>` 存储，克隆近似零成本；空集合为 `const` 单例。
//!
//! # 使用契约（What）
//! - 调用方需自行控制键的基数与命名规范（建议蛇形、低基数）；本模块
//!   不做键名校验。
//! - [`AttributeSet::new`] 的输入切片只被读取，绝不被修改或长期持有。

use alloc::{borrow::Cow, string::String, sync::Arc, vec::Vec};

/// 属性键的统一别名。
///
/// # 契约说明（What）
/// - 采用 `Cow<'static, str>`，静态常量键零拷贝，运行期拼接的键按需持有。
/// - 键名在导出链路中按原样传递，调用方需保证其为可打印 ASCII。
pub type AttributeKey = Cow<'static, str>;

/// 单条属性键值对。
///
/// # 设计背景（Why）
/// - 与指标仪表契约共享同一建模，确保绑定层、后端与测试桩对“属性”的
///   理解一致。
/// - 值侧通过 [`AttributeValue`] 的 `From` 阶梯自动适配常用原始类型，
///   避免调用方手写枚举变体。
///
/// # 契约说明（What）
/// - **前置条件**：同一观测点内键不应与框架保留键冲突；重复键交由
///   [`AttributeSet`] 以“后写者胜”语义化解。
/// - **后置条件**：`KeyValue` 可跨线程克隆与传递（`Clone + Send + Sync`），
///   自身不含同步原语。
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyValue {
    pub key: AttributeKey,
    pub value: AttributeValue,
}

impl KeyValue {
    /// 构建新的属性键值对。
    ///
    /// # 契约说明
    /// - `key` 支持静态字符串或运行期 `String`；`value` 经
    ///   [`AttributeValue::from`] 自动适配。
    /// - 返回值拥有全部数据所有权，适合存入长生命周期的绑定列表。
    pub fn new(key: impl Into<AttributeKey>, value: impl Into<AttributeValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// 属性值的统一枚举。
///
/// # 设计背景（Why）
/// - 对齐 OpenTelemetry 与 Prometheus 数据模型中最常用的四类标量，
///   避免将数值强行转为字符串导致聚合信息损失。
///
/// # 契约说明（What）
/// - 有符号与无符号整型统一折叠为 `I64`；超出范围的 `u64` 饱和截断。
/// - 枚举实现 `PartialEq` 供集合等价比较；`F64` 按位面值比较，`NaN`
///   彼此不相等，调用方不应将 `NaN` 用作标签值。
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum AttributeValue {
    Text(Cow<'static, str>),
    Bool(bool),
    I64(i64),
    F64(f64),
}

impl From<&'static str> for AttributeValue {
    fn from(value: &'static str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(Cow::Owned(value))
    }
}

impl From<Cow<'static, str>> for AttributeValue {
    fn from(value: Cow<'static, str>) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::I64(value.into())
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        Self::I64(value.into())
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        if value > i64::MAX as u64 {
            Self::I64(i64::MAX)
        } else {
            Self::I64(value as i64)
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<f32> for AttributeValue {
    fn from(value: f32) -> Self {
        Self::F64(value.into())
    }
}

/// 规范化后的不可变属性集合。
///
/// # 设计背景（Why）
/// - 绑定装饰层在绑定时规范化一次、测量时反复引用，因此集合必须是
///   克隆廉价的不可变值对象；内部采用 `Arc<[KeyValue]>` 共享存储。
/// - 空集合在“解包从未绑定的对象”场景中高频出现，使用 `Option` 编码
///   使 [`AttributeSet::empty`] 成为零分配的 `const` 构造。
///
/// # 逻辑解析（How）
/// - [`AttributeSet::new`] 按输入顺序去重（同键后写者胜），再按键排序；
///   排序保证等价比较与书写顺序无关。
/// - 输入切片仅被读取与克隆，既不修改也不持有其引用。
///
/// # 契约说明（What）
/// - **后置条件**：`as_slice` 暴露的序列按键升序且键唯一；集合构造后
///   不可变，可在任意线程间共享。
/// - 两个集合相等当且仅当规范化序列逐条相等，与构造时的输入顺序无关。
#[derive(Clone, Debug, Default)]
pub struct AttributeSet {
    entries: Option<Arc<[KeyValue]>>,
}

impl AttributeSet {
    /// 返回空集合单例。
    ///
    /// # 契约说明
    /// - `const` 构造，不触发堆分配；用于表达“从未绑定任何属性”。
    pub const fn empty() -> Self {
        Self { entries: None }
    }

    /// 从有序键值序列构建规范化集合。
    ///
    /// # 契约说明（What）
    /// - **输入参数**：`attributes` 为按书写顺序排列的键值切片，允许
    ///   重复键；重复时序列中靠后的条目胜出。
    /// - **前置条件**：无；空切片直接退化为 [`AttributeSet::empty`]。
    /// - **后置条件**：输入切片保持原样；返回集合按键排序且键唯一。
    ///
    /// # 风险提示（Trade-offs）
    /// - 去重采用线性查找，复杂度 O(n²)；属性列表在指标场景中通常只有
    ///   个位数条目，换取零额外依赖与稳定的“后写者胜”语义。
    pub fn new(attributes: &[KeyValue]) -> Self {
        if attributes.is_empty() {
            return Self::empty();
        }

        let mut entries: Vec<KeyValue> = Vec::with_capacity(attributes.len());
        for kv in attributes {
            match entries.iter_mut().find(|existing| existing.key == kv.key) {
                Some(slot) => *slot = kv.clone(),
                None => entries.push(kv.clone()),
            }
        }
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        Self {
            entries: Some(entries.into()),
        }
    }

    /// 以切片形式访问规范化序列。
    pub fn as_slice(&self) -> &[KeyValue] {
        self.entries.as_deref().unwrap_or(&[])
    }

    /// 将集合投影为拥有所有权的键值列表。
    pub fn to_vec(&self) -> Vec<KeyValue> {
        self.as_slice().to_vec()
    }

    /// 遍历规范化序列。
    pub fn iter(&self) -> core::slice::Iter<'_, KeyValue> {
        self.as_slice().iter()
    }

    /// 按键查找属性值。
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.as_slice()
            .binary_search_by(|kv| kv.key.as_ref().cmp(key))
            .ok()
            .map(|index| &self.as_slice()[index].value)
    }

    /// 集合中的条目数量。
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// 集合是否为空。
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl PartialEq for AttributeSet {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a KeyValue;
    type IntoIter = core::slice::Iter<'a, KeyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
