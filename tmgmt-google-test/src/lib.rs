//! In-process double of the Google Translate v2 endpoint
//!
//! Serves the same URL layout and payload shapes as the live service, with
//! deterministic behavior tests can steer:
//!
//! - requests must carry `key=correct key`; any other key is answered with
//!   HTTP 200 and a Google-shaped error payload (the service-error path)
//! - `GET /` translates each repeated `q` value to `{target}_{text}`,
//!   preserving order
//! - submitting the text `trigger-http-error` makes the translate endpoint
//!   answer HTTP 400 (the transport-error path)
//! - `GET /languages` reports a fixed language list
//! - `GET /detect` reports `en` for every input
//!
//! # Example
//!
//! ```ignore
//! let server = tmgmt_google_test::spawn().await;
//! let config = GoogleConfig::new(tmgmt_google_test::VALID_KEY)
//!     .with_base_url(server.base_url());
//! ```

use axum::{Json, Router, extract::Query, http::StatusCode, routing::get};
use serde_json::{Value, json};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// The only API key the double accepts
pub const VALID_KEY: &str = "correct key";

/// Sending this text as a `q` value makes the translate endpoint answer
/// with an HTTP error status
pub const TRIGGER_HTTP_ERROR: &str = "trigger-http-error";

/// Languages the double reports as supported
const LANGUAGES: &[&str] = &["en", "de", "fr", "es", "it", "zh-CHS", "zh-CHT"];

type ApiResponse = (StatusCode, Json<Value>);

/// Handle to a running double; the server task is aborted on drop
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Endpoint URL to set as the translator's base URL override
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start the double on an ephemeral local port
pub async fn spawn() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    let handle = tokio::spawn(async move {
        axum::serve(listener, router()).await.expect("serve test double");
    });
    TestServer { addr, handle }
}

/// The double's routes, usable with any listener
pub fn router() -> Router {
    Router::new()
        .route("/", get(translate))
        .route("/languages", get(languages))
        .route("/detect", get(detect))
}

async fn translate(Query(params): Query<Vec<(String, String)>>) -> ApiResponse {
    if let Some(response) = reject_bad_key(&params) {
        return response;
    }

    let target = param(&params, "target").unwrap_or("und").to_string();
    let q = q_values(&params);
    if q.iter().any(|text| *text == TRIGGER_HTTP_ERROR) {
        return (
            StatusCode::BAD_REQUEST,
            Json(error_body("Bad Request", "invalid")),
        );
    }

    let translations: Vec<Value> = q
        .iter()
        .map(|text| json!({ "translatedText": format!("{}_{}", target, text) }))
        .collect();
    (
        StatusCode::OK,
        Json(json!({ "data": { "translations": translations } })),
    )
}

async fn languages(Query(params): Query<Vec<(String, String)>>) -> ApiResponse {
    if let Some(response) = reject_bad_key(&params) {
        return response;
    }

    let languages: Vec<Value> = LANGUAGES
        .iter()
        .map(|language| json!({ "language": language }))
        .collect();
    (
        StatusCode::OK,
        Json(json!({ "data": { "languages": languages } })),
    )
}

async fn detect(Query(params): Query<Vec<(String, String)>>) -> ApiResponse {
    if let Some(response) = reject_bad_key(&params) {
        return response;
    }

    let detections: Vec<Value> = q_values(&params)
        .iter()
        .map(|_| json!([{ "language": "en", "confidence": 1.0, "isReliable": false }]))
        .collect();
    (
        StatusCode::OK,
        Json(json!({ "data": { "detections": detections } })),
    )
}

/// A bad key is answered with a success status and an error payload;
/// HTTP-level failures are triggered separately via [`TRIGGER_HTTP_ERROR`]
fn reject_bad_key(params: &[(String, String)]) -> Option<ApiResponse> {
    match param(params, "key") {
        Some(key) if key == VALID_KEY => None,
        _ => Some((
            StatusCode::OK,
            Json(error_body("Bad Request", "keyInvalid")),
        )),
    }
}

fn error_body(message: &str, reason: &str) -> Value {
    json!({
        "error": {
            "errors": [{
                "domain": "usageLimits",
                "reason": reason,
                "message": message,
            }],
            "code": 400,
            "message": message,
        }
    })
}

fn param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn q_values(params: &[(String, String)]) -> Vec<&str> {
    params
        .iter()
        .filter(|(key, _)| key == "q")
        .map(|(_, value)| value.as_str())
        .collect()
}
