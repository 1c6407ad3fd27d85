// Configuration types module
// Everything deserializes from defaults plus environment variables; the
// structs are read through a shared Arc and never mutated after startup.

use serde::Deserialize;

/// Top-level configuration
#[derive(Debug, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Listener and runtime settings
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads; `None` leaves the runtime at its default
    /// (one per CPU core)
    pub workers: Option<usize>,
}

/// Logging settings
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Per-request access logging on/off
    pub access_log: bool,
    /// Log the header count of every request
    pub show_headers: bool,
    /// Access log layout name (combined, common or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance settings
#[derive(Debug, Deserialize)]
pub struct PerformanceConfig {
    /// HTTP/1.1 keep-alive is enabled while this is non-zero
    pub keep_alive_timeout: u64,
    /// Cap on concurrent connections; `None` means unlimited
    pub max_connections: Option<u64>,
}
