// Server module entry point
// Binds the listener, runs the accept loop and handles Ctrl+C

pub mod connection;
pub mod listener;
pub mod signal;

// Rust 不允许 loop 作为模块名（关键字），改用 server_loop
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_listener;
pub use server_loop::start_server_loop;
pub use signal::{start_signal_handler, Shutdown};

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::{AppState, Config};
use crate::error::ServeError;
use crate::logger;

/// A bound, not yet running server
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl Server {
    /// Bind `addr`; must be called from within a Tokio runtime
    pub fn bind(addr: SocketAddr, state: Arc<AppState>) -> Result<Self, ServeError> {
        let listener = create_listener(addr).map_err(|source| ServeError::Bind { addr, source })?;
        Ok(Self { listener, state })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServeError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` fires; the listening socket is closed on return
    pub async fn serve(self, shutdown: Shutdown) {
        start_server_loop(self.listener, self.state, shutdown).await;
    }
}

/// Serve `root` with `config` until Ctrl+C
///
/// Prints the serving lines once bound and the stopped line after the
/// listener is closed.
pub async fn run(config: Config, root: PathBuf) -> Result<(), ServeError> {
    let addr = config.get_socket_addr()?;
    let state = Arc::new(AppState::new(&config, root));
    let server = Server::bind(addr, state)?;

    let shutdown = Shutdown::new();
    start_signal_handler(shutdown.clone())?;

    logger::log_server_start(&server.local_addr()?);
    server.serve(shutdown).await;

    logger::log_server_stopped();
    Ok(())
}
