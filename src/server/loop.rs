// Server loop module
// Accepts connections until shutdown is requested

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::spawn_connection;
use super::signal::Shutdown;
use crate::config::AppState;
use crate::logger;

/// Accept connections until `shutdown` fires, then close the listener.
///
/// Accept errors (e.g. out of file descriptors) are logged and the loop
/// keeps going; only shutdown ends it.
pub async fn start_server_loop(listener: TcpListener, state: Arc<AppState>, shutdown: Shutdown) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        spawn_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => break,
        }
    }

    drop(listener);
}
