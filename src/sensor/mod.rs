// Sensor access layer: one blocking hardware exchange per read.
// A NaN value is rejected here so the rest of the pipeline only ever sees
// valid measurements.

use std::sync::{Arc, Mutex};

use thiserror::Error;

mod synthetic;
pub use synthetic::SyntheticSensor;

#[cfg(feature = "sensor-sht31")]
mod sht31;
#[cfg(feature = "sensor-sht31")]
pub use sht31::Sht31;

/// Raw measurement from one sensor exchange, already validated as numeric.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

impl Measurement {
    pub fn validated(temperature_c: f32, humidity_pct: f32) -> Result<Self, SensorError> {
        if temperature_c.is_nan() || humidity_pct.is_nan() {
            return Err(SensorError::NotANumber {
                temperature_c,
                humidity_pct,
            });
        }
        Ok(Self {
            temperature_c,
            humidity_pct,
        })
    }
}

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("sensor returned non-numeric values (t={temperature_c}, h={humidity_pct})")]
    NotANumber {
        temperature_c: f32,
        humidity_pct: f32,
    },
    #[error("sensor read timed out after {0} ms")]
    Timeout(u64),
    #[error("sensor bus error: {0}")]
    Bus(String),
    #[error("sensor data failed crc check")]
    Crc,
    #[error("sensor read task failed: {0}")]
    Task(String),
}

pub trait SensorReader {
    /// Perform one blocking hardware read. No retries here: the periodic
    /// sampling loop is the retry mechanism.
    fn read(&mut self) -> Result<Measurement, SensorError>;
}

/// Shared handle so the blocking pool can own the read while the sampling
/// task enforces a timeout around it.
pub type SharedSensor = Arc<Mutex<Box<dyn SensorReader + Send>>>;

pub fn shared(sensor: Box<dyn SensorReader + Send>) -> SharedSensor {
    Arc::new(Mutex::new(sensor))
}

#[cfg(feature = "sensor-sht31")]
pub fn from_env() -> Result<Box<dyn SensorReader + Send>, SensorError> {
    let bus = std::env::var("SHT31_I2C_BUS")
        .ok()
        .and_then(|value| value.parse::<u8>().ok())
        .unwrap_or(1);
    let addr = std::env::var("SHT31_I2C_ADDR")
        .ok()
        .and_then(|value| u16::from_str_radix(value.trim_start_matches("0x"), 16).ok())
        .unwrap_or(0x44);
    Ok(Box::new(Sht31::open(bus, addr)?))
}

#[cfg(not(feature = "sensor-sht31"))]
pub fn from_env() -> Result<Box<dyn SensorReader + Send>, SensorError> {
    Ok(Box::new(SyntheticSensor::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_temperature_is_rejected() {
        let err = Measurement::validated(f32::NAN, 40.0).unwrap_err();
        assert!(matches!(err, SensorError::NotANumber { .. }));
    }

    #[test]
    fn nan_humidity_is_rejected() {
        assert!(Measurement::validated(21.0, f32::NAN).is_err());
    }

    #[test]
    fn finite_values_pass_validation() {
        let m = Measurement::validated(21.5, 43.0).unwrap();
        assert_eq!(m.temperature_c, 21.5);
        assert_eq!(m.humidity_pct, 43.0);
    }
}
