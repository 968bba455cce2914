// One accepted temperature/humidity sample, immutable once created.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Monotonic milliseconds since process start.
    #[serde(rename = "timestamp")]
    pub timestamp_ms: u64,
    #[serde(rename = "temperature")]
    pub temperature_c: f32,
    #[serde(rename = "humidity")]
    pub humidity_pct: f32,
}
