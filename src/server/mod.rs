//! TCP Server for sqlcalc
//!
//! This module implements the connection acceptor: it binds the listening
//! socket and runs accepted connections through the session handler,
//! strictly one at a time.

pub mod session;

use std::net::{TcpListener, TcpStream};

use tracing::{error, info, warn};

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::executor::QueryExecutor;
use session::Session;

/// Default server port
pub const DEFAULT_PORT: u16 = 25000;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Whether engine error text is reflected to clients
    ///
    /// On is the wargame deployment; off substitutes a generic message
    /// and closes the error-based injection channel.
    pub reflect_backend_errors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            reflect_backend_errors: true,
        }
    }
}

impl ServerConfig {
    /// Create a new server config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host address
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set whether engine error text is reflected to clients
    pub fn reflect_backend_errors(mut self, reflect: bool) -> Self {
        self.reflect_backend_errors = reflect;
        self
    }

    /// Get the bind address as a string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// sqlcalc TCP Server
pub struct Server<B: Backend> {
    config: ServerConfig,
    executor: QueryExecutor<B>,
}

impl<B: Backend> Server<B> {
    /// Create a new server around a backing-engine handle
    pub fn new(config: ServerConfig, backend: B) -> Self {
        Self {
            config,
            executor: QueryExecutor::new(backend),
        }
    }

    /// Bind the configured address and serve forever
    ///
    /// Bind failure is fatal and propagated to the caller.
    pub fn start(&mut self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_address())?;
        info!("Server listening on {}", self.config.bind_address());
        self.serve(listener)
    }

    /// Accept connections on `listener` and serve them one at a time
    ///
    /// Each connection runs to completion before the next is accepted.
    /// The backing-engine handle is shared and unguarded, so sessions
    /// must never overlap; concurrent handling would need a lock around
    /// the executor or a handle per connection.
    pub fn serve(&mut self, listener: TcpListener) -> Result<()> {
        loop {
            let (stream, peer) = match listener.accept() {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                    continue;
                }
            };

            info!("Client connected: {}", peer);

            let reflect = self.config.reflect_backend_errors;
            let outcome = Session::new(stream, peer.to_string(), &mut self.executor, reflect)
                .and_then(Session::run);

            if let Err(e) = outcome {
                warn!("Session error from {}: {}", peer, e);
            }

            info!("Client disconnected: {}", peer);
        }
    }
}

/// Simple client for testing
pub fn connect(host: &str, port: u16) -> Result<TcpStream> {
    let addr = format!("{}:{}", host, port);
    TcpStream::connect(&addr).map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config() {
        let config = ServerConfig::new()
            .host("127.0.0.1")
            .port(25001)
            .reflect_backend_errors(false);

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 25001);
        assert!(!config.reflect_backend_errors);
        assert_eq!(config.bind_address(), "127.0.0.1:25001");
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::new();

        assert_eq!(config.bind_address(), "0.0.0.0:25000");
        assert!(config.reflect_backend_errors);
    }
}
