//! 集成测试共享的测量汇与工厂桩。
//!
//! # 设计说明
//! - 每个仪表桩记录最近一次测量值与收到的选项序列；断言时经
//!   `AddConfig` / `RecordConfig` 折算为最终属性列表，与真实后端的
//!   消费方式一致。
//! - 工厂桩可配置为恒定失败，用于验证创建错误的原样传播。

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use prebind_core::{
    AddConfig, AddOption, Counter, Gauge, Histogram, InstrumentDescriptor, KeyValue,
    MeasurementValue, Meter, MeterError, RecordConfig, RecordOption, UpDownCounter,
};

pub fn user_alice() -> KeyValue {
    KeyValue::new("user", "alice")
}

pub fn user_id() -> KeyValue {
    KeyValue::new("id", 12345i64)
}

pub fn admin_true() -> KeyValue {
    KeyValue::new("admin", true)
}

macro_rules! mock_instrument {
    ($name:ident, $contract:ident, $method:ident, $option:ty, $config:ty) => {
        pub struct $name<N: MeasurementValue> {
            state: Mutex<(Option<N>, Vec<$option>)>,
        }

        impl<N: MeasurementValue> $name<N> {
            pub fn new() -> Arc<Self> {
                Arc::new(Self {
                    state: Mutex::new((None, Vec::new())),
                })
            }

            /// 最近一次测量值与折算后的属性列表。
            pub fn recorded(&self) -> (Option<N>, Vec<KeyValue>) {
                let state = self.state.lock().expect("测量桩状态锁中毒");
                (state.0, <$config>::new(&state.1).attributes().to_vec())
            }
        }

        impl<N: MeasurementValue> $contract<N> for $name<N> {
            fn $method(&self, value: N, options: &[$option]) {
                let mut state = self.state.lock().expect("测量桩状态锁中毒");
                state.0 = Some(value);
                state.1 = options.to_vec();
            }
        }
    };
}

mock_instrument!(MockCounter, Counter, add, AddOption, AddConfig);
mock_instrument!(MockUpDownCounter, UpDownCounter, add, AddOption, AddConfig);
mock_instrument!(MockHistogram, Histogram, record, RecordOption, RecordConfig);
mock_instrument!(MockGauge, Gauge, record, RecordOption, RecordConfig);

/// 工厂桩：默认创建全新的测量桩，可配置为恒定失败。
pub struct MockMeter {
    fail_with: Option<MeterError>,
}

impl MockMeter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { fail_with: None })
    }

    pub fn failing(error: MeterError) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(error),
        })
    }
}

macro_rules! mock_create {
    ($method:ident, $contract:ident<$value:ty>, $mock:ident) => {
        fn $method(
            &self,
            _descriptor: &InstrumentDescriptor<'_>,
        ) -> Result<Arc<dyn $contract<$value>>, MeterError> {
            if let Some(error) = &self.fail_with {
                return Err(error.clone());
            }
            let instrument: Arc<dyn $contract<$value>> = $mock::new();
            Ok(instrument)
        }
    };
}

impl Meter for MockMeter {
    mock_create!(i64_counter, Counter<i64>, MockCounter);
    mock_create!(i64_up_down_counter, UpDownCounter<i64>, MockUpDownCounter);
    mock_create!(i64_histogram, Histogram<i64>, MockHistogram);
    mock_create!(i64_gauge, Gauge<i64>, MockGauge);
    mock_create!(f64_counter, Counter<f64>, MockCounter);
    mock_create!(f64_up_down_counter, UpDownCounter<f64>, MockUpDownCounter);
    mock_create!(f64_histogram, Histogram<f64>, MockHistogram);
    mock_create!(f64_gauge, Gauge<f64>, MockGauge);
}
