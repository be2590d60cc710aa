/// In-memory doubles for tests
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::HardwareError;
use crate::hardware::{ClimateMeasurement, ClimateSensor, RelayPin, SoilProbe};

/// Climate sensor returning a fixed reading, or failing when `None`
pub struct FakeClimate(pub Option<ClimateMeasurement>);

impl FakeClimate {
    pub fn reading(temperature: f32, humidity: f32) -> Self {
        FakeClimate(Some(ClimateMeasurement {
            temperature,
            humidity,
        }))
    }

    pub fn failing() -> Self {
        FakeClimate(None)
    }
}

impl ClimateSensor for FakeClimate {
    fn measure(&mut self) -> Result<ClimateMeasurement, HardwareError> {
        self.0
            .ok_or_else(|| HardwareError::Measurement("checksum mismatch".into()))
    }
}

/// Soil probe replaying queued samples; repeats the last one when drained
pub struct FakeSoil {
    samples: VecDeque<Option<u16>>,
    last: Option<u16>,
}

impl FakeSoil {
    pub fn constant(raw: u16) -> Self {
        FakeSoil {
            samples: VecDeque::new(),
            last: Some(raw),
        }
    }

    pub fn failing() -> Self {
        FakeSoil {
            samples: VecDeque::new(),
            last: None,
        }
    }

    pub fn sequence(samples: &[Option<u16>]) -> Self {
        FakeSoil {
            samples: samples.iter().copied().collect(),
            last: None,
        }
    }
}

impl SoilProbe for FakeSoil {
    fn read_raw(&mut self) -> Result<u16, HardwareError> {
        if let Some(next) = self.samples.pop_front() {
            self.last = next;
        }
        self.last
            .ok_or_else(|| HardwareError::Measurement("ADC not responding".into()))
    }
}

/// Relay that records every transition in a shared log
#[derive(Clone, Default)]
pub struct RecordingRelay {
    pub log: Arc<Mutex<Vec<bool>>>,
}

impl RecordingRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed ON -> OFF cycles
    pub fn cycles(&self) -> usize {
        self.log
            .lock()
            .unwrap()
            .windows(2)
            .filter(|w| w[0] && !w[1])
            .count()
    }
}

impl RelayPin for RecordingRelay {
    fn set(&mut self, on: bool) -> Result<(), HardwareError> {
        self.log.lock().unwrap().push(on);
        Ok(())
    }

    fn is_on(&self) -> bool {
        self.log.lock().unwrap().last() == Some(&true)
    }
}
