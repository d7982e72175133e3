use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::Response;
use crate::record::EntityRecord;
use crate::{ApiError, ApiResult};

/// `{status, message, data}` wrapper around every backend response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl Envelope {
    pub fn is_error(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|status| status.eq_ignore_ascii_case("error"))
    }

    /// `data` decoded into one of its known shapes.
    pub fn data_shape(&self) -> Option<EnvelopeData> {
        let data = self.data.clone()?;
        serde_json::from_value(data).ok()
    }

    /// Best human-readable reason carried by the envelope. Error details
    /// win over the top-level message.
    pub fn reason(&self) -> Option<String> {
        let from_details = match self.data_shape() {
            Some(EnvelopeData::ErrorDetails(details)) => Some(details.error_message),
            _ => None,
        };
        from_details
            .or_else(|| self.message.clone())
            .filter(|reason| !reason.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    pub page_number: u32,
    pub page_size: u32,
    #[serde(default)]
    pub offset: u64,
}

/// Spring-style page of entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub content: Vec<EntityRecord>,
    pub pageable: Pageable,
    pub total_elements: u64,
    pub total_pages: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub number_of_elements: u32,
    #[serde(default)]
    pub empty: bool,
}

/// Outcome of a bulk mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSummary {
    pub total_requested: u64,
    #[serde(default)]
    pub success_count: u64,
    #[serde(default)]
    pub error_count: u64,
    /// Entity id to failure reason. `-1` marks a full failure, `-2` a
    /// mutation that succeeded but whose table refresh failed.
    #[serde(default)]
    pub operation_details: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    #[serde(default)]
    pub error_code: Option<String>,
    pub error_message: String,
}

/// The shapes `data` takes across the backend's endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvelopeData {
    Page(PageData),
    Summary(OperationSummary),
    ErrorDetails(ErrorDetails),
    Other(Value),
}

/// Issued by the authenticate endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Normalize a raw response into the envelope's `data` value.
pub fn decode_data(response: &Response) -> ApiResult<Value> {
    let envelope = response.json::<Envelope>();

    if !response.is_success() {
        return Err(ApiError::Http {
            status: response.status,
            status_text: response.status_text().to_owned(),
            message: envelope.ok().and_then(|e| e.reason()),
        });
    }

    let envelope =
        envelope.map_err(|e| ApiError::MalformedResponse(format!("body is not an envelope: {e}")))?;

    if envelope.is_error() {
        return Err(ApiError::Rejected(
            envelope
                .reason()
                .unwrap_or_else(|| "the server reported an error".to_owned()),
        ));
    }

    match envelope.data {
        Some(Value::Null) | None => Err(ApiError::MalformedResponse(
            "response has no `data` field".to_owned(),
        )),
        Some(data) => Ok(data),
    }
}

pub fn decode_as<T: serde::de::DeserializeOwned>(data: Value) -> ApiResult<T> {
    serde_json::from_value(data).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}
