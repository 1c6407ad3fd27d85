//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for route matching,
//! handler dispatch and access logging.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes, Incoming};
use hyper::{Method, Request, Response, Version};

use crate::config::Config;
use crate::handler::echo;
use crate::http;
use crate::logger;

/// Main entry point for HTTP request handling
///
/// Handlers never fail; anything that can go wrong on a connection is dealt
/// with by the transport layer, hence the `Infallible` error type.
pub fn handle_request(
    req: Request<Incoming>,
    config: &Arc<Config>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let path = req.uri().path();
    let is_head = req.method() == Method::HEAD;

    if config.logging.show_headers {
        logger::log_headers(req.headers().len());
    }

    let response = dispatch(path, is_head);

    if config.logging.access_log {
        let mut entry = logger::AccessLogEntry::new(
            peer_addr.ip().to_string(),
            req.method().to_string(),
            path.to_string(),
        );
        entry.query = req.uri().query().map(ToString::to_string);
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = body_bytes(&response);
        entry.referer = header_value(&req, "referer");
        entry.user_agent = header_value(&req, "user-agent");
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        let format = logger::LogFormat::from_name(&config.logging.access_log_format);
        logger::log_access(&entry, format);
    }

    Ok(response)
}

/// Match a request path against the registered routes
///
/// Routes are fixed at compile time; paths must match exactly, anything
/// else falls back to 404.
fn dispatch(path: &str, is_head: bool) -> Response<Full<Bytes>> {
    match path {
        "/" | "/hello" => echo::welcome(is_head),
        "/env-echo" => echo::env_echo(is_head),
        "/secret-echo" => echo::secret_echo(is_head),
        _ => http::build_404_response(),
    }
}

/// Extract a header as an owned string, skipping non-UTF-8 values
fn header_value(req: &Request<Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}

/// Exact size of the response body, for the access log
fn body_bytes(response: &Response<Full<Bytes>>) -> usize {
    response
        .body()
        .size_hint()
        .exact()
        .and_then(|size| usize::try_from(size).ok())
        .unwrap_or(0)
}

/// Version string as it appears in the access log request line
fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::echo::{env_or_unknown, format_env_echo, format_secret_echo};
    use http_body_util::BodyExt;

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let collected = response.into_body().collect().await.expect("body");
        String::from_utf8(collected.to_bytes().to_vec()).expect("utf-8 body")
    }

    #[tokio::test]
    async fn test_dispatch_welcome_routes() {
        for path in ["/", "/hello"] {
            let response = dispatch(path, false);
            assert_eq!(response.status(), 200, "status for {path}");
            assert_eq!(
                body_string(response).await,
                "Hello! Welcome to the Go HTTP server.",
                "body for {path}"
            );
        }
    }

    #[tokio::test]
    async fn test_dispatch_env_echo() {
        // Whatever USER currently holds, body and substitution must agree
        let expected = format_env_echo(&env_or_unknown("USER"));
        let response = dispatch("/env-echo", false);
        assert_eq!(response.status(), 200);
        assert_eq!(body_string(response).await, expected);
    }

    #[tokio::test]
    async fn test_dispatch_secret_echo() {
        let expected = format_secret_echo(&env_or_unknown("URL"));
        let response = dispatch("/secret-echo", false);
        assert_eq!(response.status(), 200);
        assert_eq!(body_string(response).await, expected);
    }

    #[test]
    fn test_dispatch_unknown_paths() {
        for path in [
            "/unknown",
            "/hello/",
            "/Hello",
            "/env-echo/extra",
            "/api",
            "/favicon.ico",
        ] {
            assert_eq!(dispatch(path, false).status(), 404, "status for {path}");
        }
    }

    #[tokio::test]
    async fn test_dispatch_head_suppresses_body() {
        let response = dispatch("/hello", true);
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Length").unwrap(),
            &"Hello! Welcome to the Go HTTP server.".len().to_string()
        );
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_dispatch_is_idempotent() {
        for path in ["/", "/hello", "/env-echo", "/secret-echo"] {
            let first = dispatch(path, false);
            let second = dispatch(path, false);
            assert_eq!(first.status(), second.status());
            assert_eq!(body_string(first).await, body_string(second).await);
        }
    }

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(Version::HTTP_10), "1.0");
        assert_eq!(version_label(Version::HTTP_11), "1.1");
        assert_eq!(version_label(Version::HTTP_2), "2");
    }
}
