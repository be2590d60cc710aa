/// Standalone slow-poll loop with no web surface
use log::{info, warn};
use time::OffsetDateTime;
use tokio::time::{sleep, Duration};

use crate::error::HardwareError;
use crate::hardware::{ClimateSensor, RelayPin, SoilProbe};
use crate::models::SystemState;
use crate::sensor::SensorReader;
use crate::watering::WateringController;

/// Air humidity (%) below which the standalone loop waters
pub const STANDALONE_HUMIDITY_THRESHOLD: f32 = 40.0;

/// One poll: read the air humidity and water once if it is too low.
/// Returns whether a pulse ran.
pub async fn poll_once<C, S, R>(
    sensors: &mut SensorReader<C, S>,
    watering: &mut WateringController<R>,
    state: &mut SystemState,
) -> Result<bool, HardwareError>
where
    C: ClimateSensor,
    S: SoilProbe,
    R: RelayPin,
{
    let humidity = match sensors.read_climate() {
        Some(climate) => climate.humidity,
        None => {
            warn!("No humidity reading, skipping this poll");
            return Ok(false);
        }
    };

    info!("Current humidity: {:.1}%", humidity);
    if humidity >= STANDALONE_HUMIDITY_THRESHOLD {
        return Ok(false);
    }

    info!("Humidity below {}%, watering", STANDALONE_HUMIDITY_THRESHOLD);
    watering.water_now().await?;
    state.record_pulse(OffsetDateTime::now_utc());
    Ok(true)
}

/// Poll forever, once per `interval`
pub async fn run_standalone<C, S, R>(
    sensors: &mut SensorReader<C, S>,
    watering: &mut WateringController<R>,
    state: &mut SystemState,
    interval: Duration,
) where
    C: ClimateSensor,
    S: SoilProbe,
    R: RelayPin,
{
    info!(
        "Standalone watering loop started, polling every {} s",
        interval.as_secs()
    );

    loop {
        if let Err(e) = poll_once(sensors, watering, state).await {
            warn!("Watering failed: {}", e);
        }
        sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::mock::{FakeClimate, FakeSoil, RecordingRelay};
    use crate::models::CalibrationRange;
    use tokio::time::timeout;

    const CAL: CalibrationRange = CalibrationRange {
        dry_raw: 60000,
        wet_raw: 10000,
    };

    fn setup(
        climate: FakeClimate,
    ) -> (
        SensorReader<FakeClimate, FakeSoil>,
        WateringController<RecordingRelay>,
        RecordingRelay,
    ) {
        let relay = RecordingRelay::new();
        (
            SensorReader::new(climate, FakeSoil::constant(35000), CAL),
            WateringController::new(relay.clone(), Duration::from_secs(5)),
            relay,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn dry_air_triggers_pulse() {
        let (mut sensors, mut watering, relay) = setup(FakeClimate::reading(20.0, 35.0));
        let mut state = SystemState::new(true);

        let watered = poll_once(&mut sensors, &mut watering, &mut state).await.unwrap();

        assert!(watered);
        assert_eq!(relay.cycles(), 1);
        assert_eq!(state.pulses, 1);
        assert!(state.last_watered.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn humid_air_and_failed_reads_do_nothing() {
        let (mut sensors, mut watering, relay) = setup(FakeClimate::reading(20.0, 40.0));
        let mut state = SystemState::new(true);
        assert!(!poll_once(&mut sensors, &mut watering, &mut state).await.unwrap());

        let (mut sensors, mut watering, _) = setup(FakeClimate::failing());
        assert!(!poll_once(&mut sensors, &mut watering, &mut state).await.unwrap());

        assert_eq!(relay.cycles(), 0);
        assert_eq!(state.pulses, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn loop_polls_on_interval() {
        let (mut sensors, mut watering, relay) = setup(FakeClimate::reading(20.0, 10.0));
        let mut state = SystemState::new(true);

        // pulses at t=0 and t=65 (5 s pulse + 60 s wait); cut off at t=100
        let _ = timeout(
            Duration::from_secs(100),
            run_standalone(&mut sensors, &mut watering, &mut state, Duration::from_secs(60)),
        )
        .await;

        assert_eq!(relay.cycles(), 2);
        assert!(!relay.is_on());
    }
}
