// Server loop module
// Accepts connections forever and hands them to the connection layer

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::Config;
use crate::logger;

/// Server accept loop.
///
/// Runs until the process is killed; accept errors are logged and the loop
/// keeps going, so a single bad handshake cannot take the server down.
pub async fn start_server_loop(
    listener: TcpListener,
    config: Arc<Config>,
    active_connections: Arc<AtomicUsize>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                accept_connection(stream, peer_addr, &config, &active_connections);
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
