/// One request/response cycle on an accepted connection
use log::debug;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::app::{App, Command};
use crate::hardware::{ClimateSensor, RelayPin, SoilProbe};

/// Only the first read of this many bytes is looked at
pub const REQUEST_BUFFER_SIZE: usize = 1024;

/// Every response gets the same head; there is no non-200 path
pub const RESPONSE_HEAD: &str = "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n";

pub async fn handle_connection<T, C, S, R>(
    mut stream: T,
    app: &mut App<C, S, R>,
) -> Result<(), Box<dyn std::error::Error>>
where
    T: AsyncRead + AsyncWrite + Unpin,
    C: ClimateSensor,
    S: SoilProbe,
    R: RelayPin,
{
    let mut buf = [0u8; REQUEST_BUFFER_SIZE];
    let n = stream.read(&mut buf).await?;
    let request = String::from_utf8_lossy(&buf[..n]);
    debug!("Request: {}", request.lines().next().unwrap_or(""));

    let command = Command::classify(&request);
    debug!("Handling {:?}", command);

    let body = app.process(command).await?;

    stream.write_all(RESPONSE_HEAD.as_bytes()).await?;
    stream.write_all(body.as_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::mock::{FakeClimate, FakeSoil, RecordingRelay};
    use crate::models::{CalibrationRange, SystemState};
    use crate::sensor::SensorReader;
    use crate::watering::WateringController;
    use tokio::io::duplex;
    use tokio::time::Duration;

    const CAL: CalibrationRange = CalibrationRange {
        dry_raw: 60000,
        wet_raw: 10000,
    };

    fn app(raw: u16, auto: bool) -> (App<FakeClimate, FakeSoil, RecordingRelay>, RecordingRelay) {
        let relay = RecordingRelay::new();
        let app = App::new(
            SensorReader::new(FakeClimate::reading(24.0, 38.0), FakeSoil::constant(raw), CAL),
            WateringController::new(relay.clone(), Duration::from_secs(2)),
            SystemState::new(auto),
        );
        (app, relay)
    }

    async fn roundtrip(
        request: &str,
        app: &mut App<FakeClimate, FakeSoil, RecordingRelay>,
    ) -> String {
        let (mut client, server) = duplex(64 * 1024);
        client.write_all(request.as_bytes()).await.unwrap();

        handle_connection(server, app).await.unwrap();

        let mut response = String::new();
        client.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test(start_paused = true)]
    async fn dry_soil_end_to_end() {
        // 62000 clamps to the dry end of the range
        let (mut app, relay) = app(62000, true);

        let response = roundtrip("GET / HTTP/1.1\r\nHost: plant\r\n\r\n", &mut app).await;

        assert!(response.starts_with(RESPONSE_HEAD));
        assert!(response.contains("0%"));
        assert!(response.contains("<span>0%</span>"));
        assert_eq!(relay.cycles(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn water_request_pulses_and_responds() {
        let (mut app, relay) = app(10000, false);

        let response = roundtrip("GET /water HTTP/1.1\r\n\r\n", &mut app).await;

        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("<span>100%</span>"));
        assert_eq!(relay.cycles(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_request_reports_new_state() {
        let (mut app, relay) = app(35000, true);

        let response = roundtrip("GET /toggle_auto HTTP/1.1\r\n\r\n", &mut app).await;

        assert!(response.contains("Automatic watering:</strong> OFF"));
        assert!(response.contains("Enable automation"));
        assert_eq!(relay.cycles(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn garbage_request_is_a_status_fetch() {
        let (mut app, relay) = app(35000, true);

        let response = roundtrip("\u{fffd}\u{0}not http at all", &mut app).await;

        assert!(response.starts_with(RESPONSE_HEAD));
        assert!(response.contains("<span>50%</span>"));
        assert_eq!(relay.cycles(), 0);
        assert!(app.state.auto_watering);
    }
}
