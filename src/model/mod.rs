// Core data model for timestamped sensor readings.

mod reading;

pub use reading::Reading;
