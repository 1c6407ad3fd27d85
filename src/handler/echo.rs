//! Echo handlers
//!
//! The handlers behind the registered routes. Each one produces a fixed
//! plain-text body, optionally substituting an environment-variable value
//! read at request time.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::http;

/// Fixed greeting served on `/` and `/hello`
pub const WELCOME_MESSAGE: &str = "Hello! Welcome to the Go HTTP server.";

/// Substituted when an environment variable is unset or empty
pub const UNKNOWN_VALUE: &str = "Unknown";

/// Environment variable echoed by `/env-echo`
const USER_VAR: &str = "USER";

/// Environment variable echoed by `/secret-echo`. The value is labelled a
/// "secret" in the body while the variable is plainly named URL; both the
/// name and the label are kept as-is.
const SECRET_VAR: &str = "URL";

/// Handle `/` and `/hello`
pub fn welcome(is_head: bool) -> Response<Full<Bytes>> {
    http::build_text_response(WELCOME_MESSAGE.to_string(), is_head)
}

/// Handle `/env-echo`
pub fn env_echo(is_head: bool) -> Response<Full<Bytes>> {
    let user = env_or_unknown(USER_VAR);
    http::build_text_response(format_env_echo(&user), is_head)
}

/// Handle `/secret-echo`
pub fn secret_echo(is_head: bool) -> Response<Full<Bytes>> {
    let secret = env_or_unknown(SECRET_VAR);
    http::build_text_response(format_secret_echo(&secret), is_head)
}

/// Read an environment variable, substituting the fallback literal when it
/// is unset or empty
pub fn env_or_unknown(name: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| UNKNOWN_VALUE.to_string())
}

/// Body for `/env-echo`; the same substituted value appears in both
/// positions
pub fn format_env_echo(user: &str) -> String {
    format!("Hello {user}! This message contains an environment variable: USER={user}")
}

/// Body for `/secret-echo`
pub fn format_secret_echo(secret: &str) -> String {
    format!("Hello {secret}! This message contains a secret: URL={secret}")
}
