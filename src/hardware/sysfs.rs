/// Linux sysfs/IIO backends for the sensor and relay traits
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::HardwareError;
use crate::hardware::{ClimateMeasurement, ClimateSensor, RelayPin, SoilProbe};

// IIO attribute names exposed by the kernel dht11 driver (milli-units)
const DHT_TEMP_ATTR: &str = "in_temp_input";
const DHT_HUMIDITY_ATTR: &str = "in_humidityrelative_input";

fn read_attr(path: &Path) -> Result<String, HardwareError> {
    fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| HardwareError::io(path, e))
}

fn write_attr(path: &Path, value: &str) -> Result<(), HardwareError> {
    fs::write(path, value).map_err(|e| HardwareError::io(path, e))
}

fn parse_attr<T: std::str::FromStr>(path: &Path) -> Result<T, HardwareError> {
    let value = read_attr(path)?;
    value.parse::<T>().map_err(|_| HardwareError::Parse {
        path: path.to_path_buf(),
        value,
    })
}

/// DHT11/DHT22 bound to the kernel `dht11` IIO driver
///
/// The driver performs the single-wire transfer on every attribute read and
/// reports a failed transfer as EIO/ETIMEDOUT, which surfaces here as
/// `HardwareError::Io`.
pub struct IioDht {
    device: PathBuf,
}

impl IioDht {
    pub fn new(device: impl Into<PathBuf>) -> Self {
        IioDht {
            device: device.into(),
        }
    }
}

impl ClimateSensor for IioDht {
    fn measure(&mut self) -> Result<ClimateMeasurement, HardwareError> {
        let milli_c: i32 = parse_attr(&self.device.join(DHT_TEMP_ATTR))?;
        let milli_rh: i32 = parse_attr(&self.device.join(DHT_HUMIDITY_ATTR))?;

        if !(0..=100_000).contains(&milli_rh) {
            return Err(HardwareError::Measurement(format!(
                "humidity {} m%RH out of range",
                milli_rh
            )));
        }

        Ok(ClimateMeasurement {
            temperature: milli_c as f32 / 1000.0,
            humidity: milli_rh as f32 / 1000.0,
        })
    }
}

/// One channel of an IIO ADC (`in_voltage<N>_raw`)
pub struct IioAdc {
    path: PathBuf,
}

impl IioAdc {
    pub fn new(device: impl AsRef<Path>, channel: u8) -> Self {
        IioAdc {
            path: device
                .as_ref()
                .join(format!("in_voltage{}_raw", channel)),
        }
    }
}

impl SoilProbe for IioAdc {
    fn read_raw(&mut self) -> Result<u16, HardwareError> {
        let raw: u32 = parse_attr(&self.path)?;
        Ok(raw.min(u16::MAX as u32) as u16)
    }
}

/// Relay on a sysfs GPIO line
pub struct SysfsRelay {
    value_path: PathBuf,
    active_low: bool,
    on: bool,
}

impl SysfsRelay {
    /// Export the line if needed, configure it as output and drive it OFF
    pub fn open(gpio_root: impl AsRef<Path>, line: u32, active_low: bool) -> Result<Self, HardwareError> {
        let gpio_root = gpio_root.as_ref();
        let line_dir = gpio_root.join(format!("gpio{}", line));

        if !line_dir.exists() {
            info!("Exporting GPIO line {}", line);
            write_attr(&gpio_root.join("export"), &line.to_string())?;
        }
        write_attr(&line_dir.join("direction"), "out")?;

        let mut relay = SysfsRelay {
            value_path: line_dir.join("value"),
            active_low,
            on: true,
        };
        relay.set(false)?;
        Ok(relay)
    }
}

impl RelayPin for SysfsRelay {
    fn set(&mut self, on: bool) -> Result<(), HardwareError> {
        let level = on != self.active_low;
        write_attr(&self.value_path, if level { "1" } else { "0" })?;
        debug!("Relay {} (level {})", if on { "ON" } else { "OFF" }, level as u8);
        self.on = on;
        Ok(())
    }

    fn is_on(&self) -> bool {
        self.on
    }
}
