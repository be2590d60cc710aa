/// Sensor sampling and soil-moisture calibration
use log::{debug, warn};

use crate::hardware::{ClimateMeasurement, ClimateSensor, SoilProbe};
use crate::models::{CalibrationRange, SensorSample};

/// Map a raw ADC sample onto 0-100 % moisture
///
/// The sample is clamped into `[wet_raw, dry_raw]` first, so readings outside
/// the calibrated range saturate instead of extrapolating. `dry_raw` maps to
/// 0 % and `wet_raw` to 100 %, rounded to the nearest integer.
pub fn convert_to_percent(raw: u16, calibration: &CalibrationRange) -> u8 {
    let clamped = raw.clamp(calibration.wet_raw, calibration.dry_raw);
    let span = (calibration.dry_raw - calibration.wet_raw) as f64;
    let percent = (calibration.dry_raw - clamped) as f64 * 100.0 / span;
    percent.round() as u8
}

/// Reads the climate sensor and the soil probe, hiding driver failures
/// behind `None` so one bad sensor never fails a whole request.
pub struct SensorReader<C, S> {
    climate: C,
    soil: S,
    calibration: CalibrationRange,
}

impl<C: ClimateSensor, S: SoilProbe> SensorReader<C, S> {
    pub fn new(climate: C, soil: S, calibration: CalibrationRange) -> Self {
        SensorReader {
            climate,
            soil,
            calibration,
        }
    }

    pub fn read_climate(&mut self) -> Option<ClimateMeasurement> {
        match self.climate.measure() {
            Ok(m) => Some(m),
            Err(e) => {
                warn!("Climate sensor read failed: {}", e);
                None
            }
        }
    }

    pub fn read_soil_percent(&mut self) -> Option<u8> {
        match self.soil.read_raw() {
            Ok(raw) => {
                let percent = convert_to_percent(raw, &self.calibration);
                debug!("Soil raw={} -> {}%", raw, percent);
                Some(percent)
            }
            Err(e) => {
                warn!("Soil moisture read failed: {}", e);
                None
            }
        }
    }

    /// Take a fresh reading of every sensor
    pub fn sample(&mut self) -> SensorSample {
        let climate = self.read_climate();
        SensorSample {
            temperature: climate.map(|c| c.temperature),
            humidity: climate.map(|c| c.humidity),
            soil_percent: self.read_soil_percent(),
        }
    }
}
