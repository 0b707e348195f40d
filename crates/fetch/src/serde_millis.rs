//! `#[serde(with = "crate::serde_millis")]` for `Duration` fields written as
//! integer milliseconds in config files. Sub-millisecond precision is dropped
//! and durations past `u64::MAX` ms saturate.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(value: &Duration, out: S) -> Result<S::Ok, S::Error> {
    let ms = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
    out.serialize_u64(ms)
}

pub fn deserialize<'de, D: Deserializer<'de>>(input: D) -> Result<Duration, D::Error> {
    u64::deserialize(input).map(Duration::from_millis)
}
