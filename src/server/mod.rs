pub mod handler;
pub mod page;

use log::{error, info};
use tokio::net::TcpListener;

use crate::app::App;
use crate::hardware::{ClimateSensor, RelayPin, SoilProbe};
use handler::handle_connection;

/// Blocking accept loop: each connection is handled to completion before the
/// next `accept()`. A failing connection is logged and never stops the loop.
pub async fn serve<C, S, R>(listener: TcpListener, app: &mut App<C, S, R>)
where
    C: ClimateSensor,
    S: SoilProbe,
    R: RelayPin,
{
    if let Ok(addr) = listener.local_addr() {
        info!("Server running on http://{}", addr);
    }

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                error!("Accept failed: {}", e);
                continue;
            }
        };
        info!("Connection from {}", peer);

        if let Err(e) = handle_connection(stream, app).await {
            error!("Request from {} failed: {}", peer, e);
        }
    }
}
