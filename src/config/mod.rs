// Configuration module entry point
// Settings come from built-in defaults plus the process environment; there
// is no configuration file.

mod types;

use std::net::SocketAddr;

// The section structs stay internal; everything reaches them through
// `Config` fields
pub use types::Config;

impl Config {
    /// Load configuration from defaults and the process environment
    ///
    /// The listening port honors the conventional bare `PORT` variable
    /// (empty values count as unset, so the default of 8080 applies).
    /// Everything else can be tuned through `ECHO_`-prefixed variables,
    /// e.g. `ECHO_LOGGING__ACCESS_LOG=false`.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with_port(std::env::var("PORT").ok())
    }

    /// Load configuration with an explicit port override
    ///
    /// Split out of `load()` so the override path stays testable without
    /// touching the process environment.
    pub fn load_with_port(port_override: Option<String>) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("ECHO").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_override_option(
                "server.port",
                port_override.filter(|port| !port.is_empty()),
            )?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
