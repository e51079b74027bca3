#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![doc = "prebind: 为同步指标仪表与工厂预绑定属性的装饰层。"]
#![doc = ""]
#![doc = "当测量总是携带同一组静态属性时，先把属性绑定到仪表上，之后的每次"]
#![doc = "测量都自动携带这组属性，无须在调用点重复书写；属性集合只在绑定时"]
#![doc = "规范化一次，测量热路径零额外分配。"]
#![doc = ""]
#![doc = "```"]
#![doc = "use std::sync::Arc;"]
#![doc = ""]
#![doc = "use prebind_core::{AddConfig, AddOption, Counter, KeyValue};"]
#![doc = ""]
#![doc = "struct NullCounter;"]
#![doc = ""]
#![doc = "impl Counter<f64> for NullCounter {"]
#![doc = "    fn add(&self, value: f64, options: &[AddOption]) {"]
#![doc = "        let config = AddConfig::new(options);"]
#![doc = "        let _ = (value, config.attributes().len());"]
#![doc = "    }"]
#![doc = "}"]
#![doc = ""]
#![doc = "let raw: Arc<dyn Counter<f64>> = Arc::new(NullCounter);"]
#![doc = ""]
#![doc = "// 绑定 user 标签，此后每次测量都自动携带 {user: alice}。"]
#![doc = "let counter = prebind::counter(raw, &[KeyValue::new(\"user\", \"alice\")]);"]
#![doc = "counter.add(1.0, &[]);"]
#![doc = ""]
#![doc = "// 测量期仍可追加临时属性，遇同键以测量期值覆盖绑定值。"]
#![doc = "counter.add(2.0, &[AddOption::with_attributes([KeyValue::new(\"id\", 1i64)])]);"]
#![doc = ""]
#![doc = "// 再次绑定会扁平化而非叠加包装层；解包可取回原始仪表与累计属性。"]
#![doc = "let counter = prebind::counter(counter, &[KeyValue::new(\"id\", 12345i64)]);"]
#![doc = "let (_original, bound) = prebind::unwrap(&counter);"]
#![doc = "assert_eq!(bound.len(), 2);"]
#![doc = "```"]
#![doc = ""]
#![doc = "支持 `prebind-core` 声明的全部八种同步仪表（`{i64, f64} ×"]
#![doc = "{Counter, UpDownCounter, Histogram, Gauge}`）以及仪表工厂："]
#![doc = "经 [`meter`] 绑定的工厂创建的每个仪表自动处于绑定形态。"]

extern crate alloc;

mod instrument;
mod meter;
mod pool;
mod unwrap;

pub use instrument::{counter, gauge, histogram, up_down_counter};
pub use meter::meter;
pub use unwrap::{Unwrap, unwrap};
