/// Application state and the per-request watering cycle
use log::{info, warn};
use time::OffsetDateTime;

use crate::error::HardwareError;
use crate::hardware::{ClimateSensor, RelayPin, SoilProbe};
use crate::models::SystemState;
use crate::sensor::SensorReader;
use crate::server::page::render_page;
use crate::watering::{should_auto_water, WateringController};

/// What a request asks the controller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Status,
    Water,
    ToggleAuto,
}

impl Command {
    /// Classify a raw HTTP request by its request line
    pub fn classify(request: &str) -> Command {
        let request_line = request.lines().next().unwrap_or("");
        if request_line.contains("GET /water") {
            Command::Water
        } else if request_line.contains("GET /toggle_auto") {
            Command::ToggleAuto
        } else {
            Command::Status
        }
    }
}

pub struct App<C, S, R> {
    pub sensors: SensorReader<C, S>,
    pub watering: WateringController<R>,
    pub state: SystemState,
}

impl<C, S, R> App<C, S, R>
where
    C: ClimateSensor,
    S: SoilProbe,
    R: RelayPin,
{
    pub fn new(sensors: SensorReader<C, S>, watering: WateringController<R>, state: SystemState) -> Self {
        App {
            sensors,
            watering,
            state,
        }
    }

    /// Apply the command, re-sample the sensors, run the automatic check and
    /// render the status page.
    pub async fn process(&mut self, command: Command) -> Result<String, HardwareError> {
        match command {
            Command::Water => {
                info!("Manual watering requested");
                self.water().await?;
            }
            Command::ToggleAuto => {
                let enabled = self.state.toggle_auto();
                info!("Automatic watering {}", if enabled { "enabled" } else { "disabled" });
            }
            Command::Status => {}
        }

        let sample = self.sensors.sample();
        match sample.soil_percent {
            Some(p) => info!("Soil moisture: {}%", p),
            None => info!("Soil moisture: N/A"),
        }

        if should_auto_water(sample.soil_percent, self.state.auto_watering) {
            warn!("Soil is dry, watering automatically");
            self.water().await?;
        }

        Ok(render_page(&sample, &self.state))
    }

    async fn water(&mut self) -> Result<(), HardwareError> {
        self.watering.water_now().await?;
        self.state.record_pulse(OffsetDateTime::now_utc());
        Ok(())
    }
}
