/// Relay control and the automatic watering decision
use log::{error, info};
use tokio::time::{sleep, Duration};

use crate::error::HardwareError;
use crate::hardware::RelayPin;

/// Soil moisture (%) below which automatic watering fires
pub const AUTO_WATER_THRESHOLD: u8 = 30;

/// True iff automation is on and the soil reading is available and strictly
/// below the threshold. No hysteresis or cooldown.
pub fn should_auto_water(soil_percent: Option<u8>, auto_enabled: bool) -> bool {
    auto_enabled && matches!(soil_percent, Some(p) if p < AUTO_WATER_THRESHOLD)
}

/// Holds a relay ON for as long as it lives.
///
/// Dropping the guard switches the relay OFF, so an early return, a panic or
/// a cancelled future all leave the pump stopped.
pub struct RelayGuard<'a, R: RelayPin> {
    relay: &'a mut R,
    released: bool,
}

impl<'a, R: RelayPin> RelayGuard<'a, R> {
    pub fn engage(relay: &'a mut R) -> Result<Self, HardwareError> {
        if let Err(e) = relay.set(true) {
            // leave the line low on a failed switch-on
            let _ = relay.set(false);
            return Err(e);
        }
        Ok(RelayGuard {
            relay,
            released: false,
        })
    }

    /// Switch OFF now and report a failed write to the caller
    pub fn release(mut self) -> Result<(), HardwareError> {
        self.released = true;
        self.relay.set(false)
    }
}

impl<R: RelayPin> Drop for RelayGuard<'_, R> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.relay.set(false) {
            error!("Failed to switch relay OFF: {}", e);
        }
    }
}

/// Owns the pump relay and runs fixed-length watering pulses
pub struct WateringController<R> {
    relay: R,
    pulse: Duration,
}

impl<R: RelayPin> WateringController<R> {
    pub fn new(relay: R, pulse: Duration) -> Self {
        WateringController { relay, pulse }
    }

    /// Energize the relay for one pulse, then de-energize it
    pub async fn water_now(&mut self) -> Result<(), HardwareError> {
        info!("Watering for {} s", self.pulse.as_secs_f32());
        let guard = RelayGuard::engage(&mut self.relay)?;
        sleep(self.pulse).await;
        guard.release()?;
        info!("Watering finished");
        Ok(())
    }

    /// Force the relay OFF (process shutdown)
    pub fn shutdown(&mut self) {
        if let Err(e) = self.relay.set(false) {
            error!("Failed to switch relay OFF on shutdown: {}", e);
        }
    }
}
