use proptest::prelude::*;
use crate::RollRequest;


pub(crate) fn critical_strategy() -> impl Strategy<Value = u8> {
    prop_oneof![
        4 => Just(10u8),
        6 => 2..=10u8,
    ]
}

pub(crate) fn request_strategy() -> impl Strategy<Value = RollRequest> {
    (1..=30u32, critical_strategy(), -100..=100i32)
        .prop_map(|(pool, critical, modifier)| {
            RollRequest::builder(pool)
                .critical(critical)
                .modifier(modifier)
                .build()
                .unwrap()
        })
}
