//! HTTP response building module
//!
//! Provides builders for the plain-text responses served by the echo
//! handlers, decoupled from the dispatch logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build 200 OK plain-text response
///
/// `Content-Type` is set to `text/plain; charset=utf-8` explicitly since
/// hyper performs no body sniffing. For HEAD requests the body is dropped
/// while `Content-Length` keeps the length a GET would have returned.
pub fn build_text_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let collected = response.into_body().collect().await.expect("body");
        String::from_utf8(collected.to_bytes().to_vec()).expect("utf-8 body")
    }

    #[tokio::test]
    async fn test_text_response() {
        let response = build_text_response("hello there".to_string(), false);
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(response.headers().get("Content-Length").unwrap(), "11");
        assert_eq!(body_string(response).await, "hello there");
    }

    #[tokio::test]
    async fn test_text_response_head() {
        let response = build_text_response("hello there".to_string(), true);
        assert_eq!(response.status(), 200);
        // HEAD keeps the GET Content-Length but sends no body
        assert_eq!(response.headers().get("Content-Length").unwrap(), "11");
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_404_response() {
        let response = build_404_response();
        assert_eq!(response.status(), 404);
        assert_eq!(response.headers().get("Content-Type").unwrap(), "text/plain");
        assert_eq!(body_string(response).await, "404 Not Found");
    }
}
