use chrono::NaiveDate;
use jsonseed_template::SeededEntropy;
use jsonseed_types::{Clock, Object, SeedValue, Timestamp};

pub fn local_ts() -> Timestamp {
    let instant = NaiveDate::from_ymd_opt(2024, 5, 17)
        .unwrap()
        .and_hms_micro_opt(9, 15, 30, 250_000)
        .unwrap();
    Timestamp::at(instant, Clock::Local)
}

pub fn utc_ts() -> Timestamp {
    let instant = NaiveDate::from_ymd_opt(2024, 5, 17)
        .unwrap()
        .and_hms_micro_opt(7, 15, 30, 250_000)
        .unwrap();
    Timestamp::at(instant, Clock::Utc)
}

pub fn fixed_entropy() -> SeededEntropy {
    SeededEntropy::with_fixed_clocks(7, local_ts(), utc_ts())
}

pub fn seed(json: serde_json::Value) -> SeedValue {
    SeedValue::from(json)
}

pub fn object(json: serde_json::Value) -> Object {
    match SeedValue::from(json) {
        SeedValue::Object(map) => map,
        other => panic!("expected object, got {}", other.kind()),
    }
}
