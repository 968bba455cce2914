// Deterministic stand-in sensor for development and tests.

use std::f32::consts::TAU;
use std::time::Instant;

use super::{Measurement, SensorError, SensorReader};

pub struct SyntheticSensor {
    started: Instant,
}

impl SyntheticSensor {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SyntheticSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorReader for SyntheticSensor {
    fn read(&mut self) -> Result<Measurement, SensorError> {
        let elapsed_s = self.started.elapsed().as_secs_f32();
        // Slow sinusoidal drift around office-like conditions.
        let temperature_c = 21.5 + 2.5 * (elapsed_s / 5_400.0 * TAU).sin();
        let humidity_pct = 45.0 + 8.0 * (elapsed_s / 7_200.0 * TAU + 1.0).sin();
        Measurement::validated(temperature_c, humidity_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_readings_are_always_valid() {
        let mut sensor = SyntheticSensor::new();
        for _ in 0..10 {
            let m = sensor.read().expect("synthetic read failed");
            assert!(m.temperature_c.is_finite());
            assert!(m.humidity_pct.is_finite());
            assert!((0.0..=100.0).contains(&m.humidity_pct));
        }
    }
}
