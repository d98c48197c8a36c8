//! JSON requests against the application's REST endpoints.

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// HTTP verbs used by the controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Put,
    Patch,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

/// Sends a JSON body and returns the decoded JSON response. Non-2xx
/// responses become [`Error::Http`] carrying the raw body.
#[allow(async_fn_in_trait)]
pub trait JsonApi {
    async fn send_json(
        &self,
        method: Method,
        path: &str,
        body: &Value,
        csrf_token: Option<&str>,
    ) -> Result<Value>;
}

/// [`JsonApi`] over `reqwest`, which uses `fetch` on wasm32.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    origin: String,
    csrf_header: String,
}

impl HttpClient {
    /// `origin` is prepended to relative paths, e.g. `https://example.com`.
    pub fn new(origin: &str, csrf_header: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            origin: origin.trim_end_matches('/').to_string(),
            csrf_header: csrf_header.to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.origin, path.trim_start_matches('/'))
        }
    }
}

impl JsonApi for HttpClient {
    async fn send_json(
        &self,
        method: Method,
        path: &str,
        body: &Value,
        csrf_token: Option<&str>,
    ) -> Result<Value> {
        let url = self.url(path);
        debug!(url = %url, method = ?method, "Sending JSON request");

        let mut request = self
            .client
            .request(method.as_reqwest(), &url)
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        if let Some(token) = csrf_token {
            request = request.header(self.csrf_header.as_str(), token);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// The `error` message of a JSON response body, if any
pub fn error_message(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::String(message) => Some(message.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
