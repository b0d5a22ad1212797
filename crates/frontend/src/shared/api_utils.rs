//! API utilities for calls made from the form page
//!
//! [`enhanced_fetch`] is the single network helper shared with the rest of
//! the page: it normalizes HTTP and application failures into [`ApiError`],
//! shows exactly one error notification per failed call and hands the error
//! back to the caller.

use async_trait::async_trait;
use contracts::shared::api_envelope::failure_message;
use contracts::shared::notification::Notification;
use gloo_net::http::{Method, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use super::notification::{DomNotifier, Notify};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, bad URL)
    #[error("Network request failed: {0}")]
    Transport(String),

    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    #[error("Invalid JSON response: {0}")]
    Decode(String),

    /// The payload came back with a falsy `success` flag
    #[error("{0}")]
    Application(String),
}

/// Options accepted by [`enhanced_fetch`]; mirrors the subset of `fetch`
/// init the page scripts use
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    pub method: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

/// Methods `fetch` upper-cases; any other verb is sent exactly as written
const NORMALIZED_METHODS: [&str; 6] = ["DELETE", "GET", "HEAD", "OPTIONS", "POST", "PUT"];

impl RequestOptions {
    /// Request method as `fetch` would send it
    pub fn method(&self) -> String {
        let raw = self.method.as_deref().unwrap_or("GET");
        let upper = raw.to_ascii_uppercase();
        if NORMALIZED_METHODS.contains(&upper.as_str()) {
            upper
        } else {
            raw.to_string()
        }
    }
}

/// Parse the method of `options`; an invalid token is a transport error
pub fn parse_method(options: &RequestOptions) -> Result<Method, ApiError> {
    let method = options.method();
    Method::from_bytes(method.as_bytes())
        .map_err(|_| ApiError::Transport(format!("Invalid request method: {:?}", method)))
}

/// What came back over the wire, before any interpretation
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub ok: bool,
    pub body: String,
}

#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, url: &str, options: &RequestOptions) -> Result<RawResponse, ApiError>;
}

/// `fetch` via gloo-net
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, url: &str, options: &RequestOptions) -> Result<RawResponse, ApiError> {
        let mut builder = RequestBuilder::new(url).method(parse_method(options)?);
        for (name, value) in &options.headers {
            builder = builder.header(name, value);
        }

        let request = match &options.body {
            Some(body) => builder.body(body.as_str()),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Transport(format!("Failed to build request: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let ok = response.ok();
        // Тело нужно только при успешном статусе
        let body = if ok {
            response
                .text()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))?
        } else {
            String::new()
        };

        Ok(RawResponse { status, ok, body })
    }
}

/// Classify a raw response: HTTP status first, then JSON, then `success`
pub fn interpret_response(raw: RawResponse) -> Result<Value, ApiError> {
    if !raw.ok {
        return Err(ApiError::Http { status: raw.status });
    }

    let payload: Value =
        serde_json::from_str(&raw.body).map_err(|e| ApiError::Decode(e.to_string()))?;

    match failure_message(&payload) {
        Some(message) => Err(ApiError::Application(message)),
        None => Ok(payload),
    }
}

/// [`enhanced_fetch`] with explicit transport and notifier
pub async fn enhanced_fetch_with<T, N>(
    transport: &T,
    notifier: &N,
    url: &str,
    options: &RequestOptions,
) -> Result<Value, ApiError>
where
    T: HttpTransport + ?Sized,
    N: Notify + ?Sized,
{
    let result = match transport.send(url, options).await {
        Ok(raw) => interpret_response(raw),
        Err(e) => Err(e),
    };

    if let Err(e) = &result {
        log::error!("API Error: {} ({} {})", e, options.method(), url);
        notifier.notify(Notification::error(e.to_string()));
    }

    result
}

/// Fetch `url` and return the parsed payload.
///
/// Fails on a non-2xx status, an unparsable body or a payload whose
/// `success` flag is falsy. Every failure is shown to the user once as an
/// error notification before it is returned.
///
/// # Example
/// ```rust,ignore
/// let payload = enhanced_fetch("/api/states", &RequestOptions::default()).await?;
/// ```
pub async fn enhanced_fetch(url: &str, options: &RequestOptions) -> Result<Value, ApiError> {
    match DomNotifier::current() {
        Some(notifier) => enhanced_fetch_with(&GlooTransport, &notifier, url, options).await,
        None => enhanced_fetch_with(&GlooTransport, &LogOnlyNotifier, url, options).await,
    }
}

/// Fallback when there is no document to render into
struct LogOnlyNotifier;

impl Notify for LogOnlyNotifier {
    fn notify(&self, notification: Notification) {
        log::warn!("Notification without document: {}", notification.message);
    }
}
