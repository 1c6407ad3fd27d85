//! Access log format module
//!
//! Supports the log layouts selectable via `logging.access_log_format`:
//! - `combined` (Apache/Nginx combined format)
//! - `common` (Common Log Format - CLF)
//! - `json` (one JSON object per line)

use chrono::Local;

/// Selectable access log layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Apache/Nginx combined format
    Combined,
    /// Common Log Format (CLF)
    Common,
    /// JSON structured logging
    Json,
}

impl LogFormat {
    /// Parse a configured format name; unrecognized names fall back to
    /// `Combined`
    pub fn from_name(name: &str) -> Self {
        match name {
            "common" => Self::Common,
            "json" => Self::Json,
            _ => Self::Combined,
        }
    }
}

/// One access log line in the making; the dispatcher fills in the fields
/// it knows once the response exists
#[derive(Debug)]
pub struct AccessLogEntry {
    /// Peer IP without the port
    pub remote_addr: String,
    /// Arrival timestamp
    pub time: chrono::DateTime<Local>,
    /// Request method
    pub method: String,
    /// Request path as matched against the routes
    pub path: String,
    /// Query string without the leading ?
    pub query: Option<String>,
    /// Protocol version as logged (1.0, 1.1, 2)
    pub http_version: String,
    /// Status code sent
    pub status: u16,
    /// Bytes in the response body
    pub body_bytes: usize,
    /// Referer header, when the client sent one
    pub referer: Option<String>,
    /// User-Agent header, when the client sent one
    pub user_agent: Option<String>,
    /// Handling time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Start an entry for a request that just arrived; the timestamp is
    /// taken here
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            referer: None,
            user_agent: None,
            request_time_us: 0,
        }
    }

    /// Render the entry in the given layout
    pub fn format(&self, format: LogFormat) -> String {
        match format {
            LogFormat::Combined => self.format_combined(),
            LogFormat::Common => self.format_common(),
            LogFormat::Json => self.format_json(),
        }
    }

    /// Full request line: `METHOD /path?query HTTP/version`
    fn request_line(&self) -> String {
        let request_uri = match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        };
        format!("{} {} HTTP/{}", self.method, request_uri, self.http_version)
    }

    /// Apache/Nginx combined layout:
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent "$http_referer" "$http_user_agent"`
    fn format_combined(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {} \"{}\" \"{}\"",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.request_line(),
            self.status,
            self.body_bytes,
            self.referer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    /// Common Log Format (CLF):
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    /// JSON structured log format, absent headers serialize as null
    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "query": self.query,
            "http_version": self.http_version,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "referer": self.referer,
            "user_agent": self.user_agent,
            "request_time_us": self.request_time_us,
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "203.0.113.9".to_string(),
            "GET".to_string(),
            "/hello".to_string(),
        );
        entry.query = Some("lang=en".to_string());
        entry.status = 200;
        entry.body_bytes = 37;
        entry.referer = Some("http://localhost:8080/".to_string());
        entry.user_agent = Some("curl/8.5.0".to_string());
        entry.request_time_us = 420;
        entry
    }

    #[test]
    fn test_from_name() {
        assert_eq!(LogFormat::from_name("combined"), LogFormat::Combined);
        assert_eq!(LogFormat::from_name("common"), LogFormat::Common);
        assert_eq!(LogFormat::from_name("json"), LogFormat::Json);
    }

    #[test]
    fn test_from_name_falls_back_to_combined() {
        assert_eq!(LogFormat::from_name("nonsense"), LogFormat::Combined);
        assert_eq!(LogFormat::from_name(""), LogFormat::Combined);
    }

    #[test]
    fn test_format_combined() {
        let entry = create_test_entry();
        let log = entry.format(LogFormat::Combined);
        assert!(log.starts_with("203.0.113.9 - - ["));
        assert!(log.contains("\"GET /hello?lang=en HTTP/1.1\" 200 37"));
        assert!(log.ends_with("\"http://localhost:8080/\" \"curl/8.5.0\""));
    }

    #[test]
    fn test_format_common() {
        let entry = create_test_entry();
        let log = entry.format(LogFormat::Common);
        assert!(log.starts_with("203.0.113.9 - - ["));
        assert!(log.ends_with("\"GET /hello?lang=en HTTP/1.1\" 200 37"));
        // Common layout carries no referer or user-agent
        assert!(!log.contains("curl"));
    }

    #[test]
    fn test_format_json() {
        let entry = create_test_entry();
        let log = entry.format(LogFormat::Json);
        assert!(log.contains(r#""remote_addr":"203.0.113.9""#));
        assert!(log.contains(r#""path":"/hello""#));
        assert!(log.contains(r#""status":200"#));
        assert!(log.contains(r#""body_bytes":37"#));
        assert!(log.contains(r#""request_time_us":420"#));
    }

    #[test]
    fn test_format_json_missing_headers_are_null() {
        let mut entry = create_test_entry();
        entry.referer = None;
        entry.user_agent = None;
        let log = entry.format(LogFormat::Json);
        assert!(log.contains(r#""referer":null"#));
        assert!(log.contains(r#""user_agent":null"#));
    }
}
