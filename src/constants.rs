// Shared constants for sampling cadence, history sizing, and serving.

pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 30_000;
pub const DEFAULT_HISTORY_CAPACITY: usize = 2_880;
pub const SENSOR_READ_TIMEOUT_MS: u64 = 2_000;
pub const LIVE_QUEUE_DEPTH: usize = 16;
pub const DEFAULT_HTTP_PORT: u16 = 8080;
