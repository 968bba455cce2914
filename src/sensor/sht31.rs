// SHT31 temperature/humidity sensor over Raspberry Pi I2C.
// Single-shot high-repeatability measurement, CRC-8 checked per datasheet.

use std::thread;
use std::time::Duration;

use rppal::i2c::I2c;

use super::{Measurement, SensorError, SensorReader};

const CMD_SINGLE_SHOT_HIGH: [u8; 2] = [0x2C, 0x06];
const MEASUREMENT_DELAY_MS: u64 = 20;

pub struct Sht31 {
    i2c: I2c,
}

impl Sht31 {
    pub fn open(bus: u8, addr: u16) -> Result<Self, SensorError> {
        let mut i2c = I2c::with_bus(bus).map_err(|err| SensorError::Bus(err.to_string()))?;
        i2c.set_slave_address(addr)
            .map_err(|err| SensorError::Bus(err.to_string()))?;
        Ok(Self { i2c })
    }
}

impl SensorReader for Sht31 {
    fn read(&mut self) -> Result<Measurement, SensorError> {
        self.i2c
            .write(&CMD_SINGLE_SHOT_HIGH)
            .map_err(|err| SensorError::Bus(err.to_string()))?;
        thread::sleep(Duration::from_millis(MEASUREMENT_DELAY_MS));

        let mut buf = [0u8; 6];
        self.i2c
            .read(&mut buf)
            .map_err(|err| SensorError::Bus(err.to_string()))?;

        if crc8(&buf[0..2]) != buf[2] || crc8(&buf[3..5]) != buf[5] {
            return Err(SensorError::Crc);
        }

        let raw_t = u16::from_be_bytes([buf[0], buf[1]]) as f32;
        let raw_h = u16::from_be_bytes([buf[3], buf[4]]) as f32;
        Measurement::validated(
            -45.0 + 175.0 * raw_t / 65_535.0,
            100.0 * raw_h / 65_535.0,
        )
    }
}

// CRC-8, polynomial 0x31, init 0xFF (SHT3x datasheet).
fn crc8(data: &[u8]) -> u8 {
    let mut crc: u8 = 0xFF;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ 0x31
            } else {
                crc << 1
            };
        }
    }
    crc
}
