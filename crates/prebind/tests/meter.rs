//! 工厂绑定的行为验证：恒等、扁平化、复制、预绑定创建与错误透传。

mod support;

use std::sync::Arc;

use prebind_core::error::codes;
use prebind_core::{AttributeSet, InstrumentDescriptor, KeyValue, Meter, MeterError};
use support::{MockMeter, user_alice, user_id};

#[test]
fn empty_bind_returns_the_same_meter() {
    let mock = MockMeter::new();
    let meter: Arc<dyn Meter> = mock.clone();
    let bound = prebind::meter(meter.clone(), &[]);
    assert!(Arc::ptr_eq(&meter, &bound), "空绑定必须恒等返回原工厂");
}

#[test]
fn rebinding_flattens_onto_the_original_meter() {
    let mock = MockMeter::new();
    let meter: Arc<dyn Meter> = mock.clone();
    let bound = prebind::meter(prebind::meter(meter.clone(), &[user_alice()]), &[user_id()]);

    let (original, set) = prebind::unwrap(&bound);
    assert!(Arc::ptr_eq(&meter, &original), "两层绑定应折叠为一层");
    assert_eq!(set, AttributeSet::new(&[user_alice(), user_id()]));
}

#[test]
fn binding_copies_the_caller_slice() {
    let mock = MockMeter::new();
    let meter: Arc<dyn Meter> = mock.clone();
    let mut caller_buffer = vec![user_alice()];
    let bound = prebind::meter(meter, &caller_buffer);

    caller_buffer[0] = KeyValue::new("user", "mallory");

    let (_, set) = prebind::unwrap(&bound);
    assert_eq!(set, AttributeSet::new(&[user_alice()]), "绑定必须持有属性副本");
}

/// 每个创建方法返回的仪表都应预先绑定工厂的属性集。
macro_rules! assert_prebound {
    ($bound:expr, $expected:expr, $($method:ident),+ $(,)?) => {{
        let descriptor = InstrumentDescriptor::new("request.count");
        $(
            let instrument = $bound
                .$method(&descriptor)
                .unwrap_or_else(|err| panic!("创建 {} 不应失败：{err}", stringify!($method)));
            let (_, set) = prebind::unwrap(&instrument);
            assert_eq!(set, $expected, "{} 创建的仪表应继承工厂属性", stringify!($method));
        )+
    }};
}

#[test]
fn created_instruments_inherit_the_bound_attributes() {
    let mock = MockMeter::new();
    let meter: Arc<dyn Meter> = mock.clone();
    let bound = prebind::meter(meter, &[user_alice(), user_id()]);
    let expected = AttributeSet::new(&[user_alice(), user_id()]);

    assert_prebound!(
        bound,
        expected,
        i64_counter,
        i64_up_down_counter,
        i64_histogram,
        i64_gauge,
        f64_counter,
        f64_up_down_counter,
        f64_histogram,
        f64_gauge,
    );
}

#[test]
fn creation_errors_pass_through_unchanged() {
    let failure = MeterError::new(codes::BACKEND_UNAVAILABLE, "exporter not started");
    let mock = MockMeter::failing(failure.clone());
    let meter: Arc<dyn Meter> = mock;
    let bound = prebind::meter(meter, &[user_alice()]);

    let descriptor = InstrumentDescriptor::new("request.count");
    let err = bound
        .f64_counter(&descriptor)
        .err()
        .unwrap_or_else(|| panic!("失败工厂必须返回错误"));
    assert_eq!(err, failure, "绑定层不得包装或改写创建错误");
}
