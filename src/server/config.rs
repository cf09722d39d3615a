//! Server configuration.

use std::net::SocketAddr;
use std::time::Duration;

/// HTTP server configuration.
///
/// ```
/// use maya::server::ServerConfig;
///
/// let config = ServerConfig {
///     addr: "127.0.0.1:3000".parse().unwrap(),
///     ..ServerConfig::default()
/// };
/// assert_eq!(config.max_connections, 1024);
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The maximum number of concurrent connections.
    pub max_connections: usize,
    /// The read buffer size.
    pub read_buffer_size: usize,
    /// How long a graceful shutdown waits for in-flight connections.
    pub shutdown_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".parse().expect("default addr is valid"),
            max_connections: 1024,
            read_buffer_size: 8192,
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}
