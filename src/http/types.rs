// HTTP response payload types.

use serde::Serialize;

use crate::model::Reading;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub timestamp_ms: u64,
    pub uptime_ms: u64,
    pub samples_accepted: u64,
    pub samples_rejected: u64,
    pub history_len: usize,
    pub history_capacity: usize,
    pub last_sample_ms: Option<u64>,
    pub last_reject_ms: Option<u64>,
    pub latest: Option<Reading>,
    pub subscribers: usize,
}
