use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::str::FromStr;
use tokio::time::Duration;

use crate::models::CalibrationRange;

/// Which loop the process runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Web-connected controller answering status/control requests
    Server,
    /// Offline slow-poll loop, no network surface
    Standalone,
}

impl Mode {
    fn default_pulse_secs(self) -> u64 {
        match self {
            Mode::Server => 2,
            Mode::Standalone => 5,
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(Mode::Server),
            "standalone" => Ok(Mode::Standalone),
            other => Err(format!("unknown WATERER_MODE '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: Mode,
    pub bind_addr: IpAddr,
    pub port: u16,
    pub dht_device: PathBuf,
    pub adc_device: PathBuf,
    pub adc_channel: u8,
    pub gpio_root: PathBuf,
    pub relay_gpio: u32,
    pub relay_active_low: bool,
    pub calibration: CalibrationRange,
    pub pulse: Duration,
    pub auto_watering: bool,
    pub poll_interval: Duration,
}

impl AppConfig {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        // Load environment variables
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup; unset keys use defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mode = match get("WATERER_MODE") {
            Some(v) => v.parse::<Mode>()?,
            None => Mode::Server,
        };

        // No address from the network join falls back to the 0.0.0.0 sentinel
        let bind_addr = match get("BIND_ADDR") {
            Some(v) => v
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| format!("BIND_ADDR '{}' is not an IP address", v))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let calibration = CalibrationRange {
            dry_raw: parse_or(&get, "SOIL_DRY_RAW", 60000)?,
            wet_raw: parse_or(&get, "SOIL_WET_RAW", 10000)?,
        };
        if calibration.dry_raw <= calibration.wet_raw {
            return Err(format!(
                "SOIL_DRY_RAW ({}) must be greater than SOIL_WET_RAW ({})",
                calibration.dry_raw, calibration.wet_raw
            )
            .into());
        }

        Ok(AppConfig {
            mode,
            bind_addr,
            port: parse_or(&get, "PORT", 8080)?,
            dht_device: path_or(&get, "DHT_DEVICE", "/sys/bus/iio/devices/iio:device0"),
            adc_device: path_or(&get, "ADC_DEVICE", "/sys/bus/iio/devices/iio:device1"),
            adc_channel: parse_or(&get, "ADC_CHANNEL", 0)?,
            gpio_root: path_or(&get, "GPIO_ROOT", "/sys/class/gpio"),
            relay_gpio: parse_or(&get, "RELAY_GPIO", 16)?,
            relay_active_low: parse_or(&get, "RELAY_ACTIVE_LOW", false)?,
            calibration,
            pulse: Duration::from_secs(parse_or(&get, "PULSE_SECS", mode.default_pulse_secs())?),
            auto_watering: parse_or(&get, "AUTO_WATERING", true)?,
            poll_interval: Duration::from_secs(parse_or(&get, "POLL_INTERVAL_SECS", 60)?),
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(v) => v
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} has an invalid value '{}'", key, v)),
        None => Ok(default),
    }
}

fn path_or<G>(get: &G, key: &str, default: &str) -> PathBuf
where
    G: Fn(&str) -> Option<String>,
{
    PathBuf::from(get(key).unwrap_or_else(|| default.to_string()))
}
