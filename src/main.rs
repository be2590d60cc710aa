mod app;
mod config;
mod error;
mod hardware;
mod models;
mod sensor;
mod server;
mod utils;
mod watering;

use log::{error, info, warn};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use app::App;
use config::{AppConfig, Mode};
use hardware::{IioAdc, IioDht, SysfsRelay};
use models::SystemState;
use sensor::SensorReader;
use watering::{run_standalone, WateringController};

type PlantApp = App<IioDht, IioAdc, SysfsRelay>;

fn build_app(config: &AppConfig) -> Result<PlantApp, Box<dyn std::error::Error>> {
    let sensors = SensorReader::new(
        IioDht::new(&config.dht_device),
        IioAdc::new(&config.adc_device, config.adc_channel),
        config.calibration,
    );

    let relay = SysfsRelay::open(&config.gpio_root, config.relay_gpio, config.relay_active_low)?;
    let watering = WateringController::new(relay, config.pulse);

    Ok(App::new(sensors, watering, SystemState::new(config.auto_watering)))
}

async fn main_loop(config: &AppConfig, app: &mut PlantApp) -> Result<(), Box<dyn std::error::Error>> {
    match config.mode {
        Mode::Server => {
            if config.bind_addr.is_unspecified() {
                warn!("No local address configured, listening on all interfaces");
            }
            let listener = TcpListener::bind(SocketAddr::new(config.bind_addr, config.port)).await?;
            server::serve(listener, app).await;
        }
        Mode::Standalone => {
            run_standalone(
                &mut app.sensors,
                &mut app.watering,
                &mut app.state,
                config.poll_interval,
            )
            .await;
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    // Load configuration
    let config = match AppConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };
    info!(
        "Starting plant waterer in {:?} mode (pulse {} s, automatic watering {})",
        config.mode,
        config.pulse.as_secs(),
        if config.auto_watering { "on" } else { "off" }
    );

    let mut app = match build_app(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialise hardware: {}", e);
            return Err(e);
        }
    };

    // Handle Ctrl+C gracefully
    let (tx, mut rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(());
        }
    });

    // Run main loop or wait for shutdown signal
    tokio::select! {
        result = main_loop(&config, &mut app) => {
            if let Err(e) = result {
                error!("Fatal error: {}", e);
            }
        }
        _ = &mut rx => {
            info!("Program terminated by user. Exiting gracefully.");
        }
    }

    app.watering.shutdown();
    info!(
        "Relay released after {} watering pulses this run",
        app.state.pulses
    );
    Ok(())
}
