use time::OffsetDateTime;

/// Raw ADC readings observed at 0% (dry) and 100% (wet) soil moisture.
/// Higher raw value means drier soil, so `dry_raw > wet_raw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationRange {
    pub dry_raw: u16,
    pub wet_raw: u16,
}

/// One fresh set of readings; `None` marks an unavailable value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorSample {
    pub temperature: Option<f32>,
    pub humidity: Option<f32>,
    pub soil_percent: Option<u8>,
}

/// State that survives between requests for the lifetime of the process
#[derive(Debug, Clone)]
pub struct SystemState {
    pub auto_watering: bool,
    pub last_watered: Option<OffsetDateTime>,
    pub pulses: u32,
}

impl SystemState {
    pub fn new(auto_watering: bool) -> Self {
        SystemState {
            auto_watering,
            last_watered: None,
            pulses: 0,
        }
    }

    pub fn toggle_auto(&mut self) -> bool {
        self.auto_watering = !self.auto_watering;
        self.auto_watering
    }

    pub fn record_pulse(&mut self, at: OffsetDateTime) {
        self.last_watered = Some(at);
        self.pulses = self.pulses.wrapping_add(1);
    }
}
