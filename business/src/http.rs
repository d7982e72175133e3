//! Platform-abstracted HTTP transport with Send-safe futures.
//!
//! On wasm32 `reqwest::Response` holds JS values and is not `Send`. The
//! request is therefore executed on the JS thread with
//! `wasm_bindgen_futures::spawn_local` and the plain-data result travels back
//! through a `flume` channel. Native builds call reqwest directly.
//!
//! Either way, callers get a `Send` future, which is what
//! [`Command`](console_states::Command) futures require.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Response with every JS-backed value already drained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    /// Lowercased header names.
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Canonical reason phrase for the status, e.g. `Unauthorized` for 401.
    pub fn status_text(&self) -> &'static str {
        reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("Unknown Status")
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// The request never produced a response (DNS, refused connection, CORS, ...).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: BTreeMap<String, String>,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("authorization", format!("Bearer {token}"))
    }

    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Serialize `value` as the request body and set the JSON content type.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(value)?);
        Ok(self.header("content-type", "application/json"))
    }

    /// Full URL including the form-encoded query string. A URL reqwest
    /// cannot parse is returned as given.
    pub fn url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        reqwest::Url::parse_with_params(&self.url, &self.query)
            .map(String::from)
            .unwrap_or_else(|_| self.url.clone())
    }

    pub async fn send(self) -> TransportResult<Response> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            execute(self).await
        }

        #[cfg(target_arch = "wasm32")]
        {
            let (tx, rx) = flume::bounded::<TransportResult<Response>>(1);

            wasm_bindgen_futures::spawn_local(async move {
                let result = execute(self).await;
                if tx.send_async(result).await.is_err() {
                    log::debug!("HTTP response dropped, receiver is gone");
                }
            });

            rx.recv_async()
                .await
                .map_err(|_disconnected| TransportError::new("Request cancelled"))?
        }
    }
}

async fn execute(request: RequestBuilder) -> TransportResult<Response> {
    let client = reqwest::Client::new();
    let mut builder = match request.method {
        Method::Get => client.get(&request.url),
        Method::Post => client.post(&request.url),
    };
    if !request.query.is_empty() {
        builder = builder.query(&request.query);
    }

    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    if let Some(body) = request.body {
        builder = builder.body(body);
    }

    let response = builder
        .send()
        .await
        .map_err(|e| TransportError::new(e.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_ascii_lowercase(), v.to_owned()))
        })
        .collect();
    let body = response
        .bytes()
        .await
        .map_err(|e| TransportError::new(e.to_string()))?
        .to_vec();

    Ok(Response {
        status,
        headers,
        body,
    })
}

/// Entry point for building requests.
pub struct Client;

impl Client {
    pub fn get(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Post, url)
    }
}
