/// Hardware access: the sensor and relay primitives the controller drives
pub mod sysfs;

#[cfg(test)]
pub mod mock;

pub use sysfs::{IioAdc, IioDht, SysfsRelay};

use crate::error::HardwareError;

/// One single-shot reading of the temperature/humidity sensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateMeasurement {
    pub temperature: f32,
    pub humidity: f32,
}

/// Temperature and relative humidity sensor (DHT11 class)
pub trait ClimateSensor {
    fn measure(&mut self) -> Result<ClimateMeasurement, HardwareError>;
}

/// Analog soil-moisture probe behind an ADC channel
pub trait SoilProbe {
    /// Raw unsigned ADC sample, nominally 0-65535
    fn read_raw(&mut self) -> Result<u16, HardwareError>;
}

/// Binary output driving the pump relay
pub trait RelayPin {
    fn set(&mut self, on: bool) -> Result<(), HardwareError>;
    fn is_on(&self) -> bool;
}
