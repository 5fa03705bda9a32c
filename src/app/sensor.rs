//! Measurement sources for the periodic uplink.

use rand::Rng;

/// Something that produces one numeric sample per uplink.
pub trait Sensor {
    /// Takes a measurement.
    fn measure(&mut self) -> f32;
}

impl<F: FnMut() -> f32> Sensor for F {
    fn measure(&mut self) -> f32 {
        self()
    }
}

/// Simulated temperature sensor reporting 17.0 to 24.0 °C in 0.1 steps.
#[derive(Debug, Default)]
pub struct SimulatedTemperature;

impl Sensor for SimulatedTemperature {
    fn measure(&mut self) -> f32 {
        let raw: f32 = rand::thread_rng().gen_range(17.0..=24.0);
        (raw * 10.0).round() / 10.0
    }
}

/// Encodes a sample as 4 little-endian IEEE-754 bytes.
#[must_use]
pub fn encode_sample(value: f32) -> [u8; 4] {
    value.to_le_bytes()
}
