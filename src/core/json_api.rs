use crate::domain::model::{ErrorDocument, ErrorObject, JSON_API_CONTENT_TYPE};
use crate::utils::error::{MuError, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::{Map, Value};
use std::fmt;

/// A JSON:API error response, independent of any web framework.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub status: StatusCode,
    pub document: ErrorDocument,
}

impl ErrorResponse {
    pub fn content_type(&self) -> &'static str {
        JSON_API_CONTENT_TYPE
    }

    pub fn body(&self) -> Result<Value> {
        Ok(serde_json::to_value(&self.document)?)
    }

    /// Status, headers and serialized body, ready to hand to an HTTP server.
    pub fn into_parts(self) -> Result<(StatusCode, HeaderMap, Vec<u8>)> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(JSON_API_CONTENT_TYPE),
        );
        let body = serde_json::to_vec(&self.document)?;
        Ok((self.status, headers, body))
    }

    pub fn detail(&self) -> Option<&str> {
        self.document.errors.first().map(|e| e.detail.as_str())
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.detail().unwrap_or_default())
    }
}

impl std::error::Error for ErrorResponse {}

fn response(status: StatusCode, msg: &str, mut extra: Map<String, Value>) -> ErrorResponse {
    extra.remove("detail");
    extra.remove("status");

    ErrorResponse {
        status,
        document: ErrorDocument {
            errors: vec![ErrorObject {
                detail: msg.to_string(),
                status: status.as_u16(),
                extra,
            }],
        },
    }
}

/// Error response with the given status; additional members of the error
/// object go in `extra` (`detail` and `status` there are ignored).
pub fn error_with(msg: &str, status: u16, extra: Map<String, Value>) -> Result<ErrorResponse> {
    let status = StatusCode::from_u16(status).map_err(|_| MuError::InvalidStatus(status))?;
    Ok(response(status, msg, extra))
}

pub fn error(msg: &str, status: u16) -> Result<ErrorResponse> {
    error_with(msg, status, Map::new())
}

pub fn bad_request(msg: &str) -> ErrorResponse {
    response(StatusCode::BAD_REQUEST, msg, Map::new())
}

pub fn conflict(msg: &str) -> ErrorResponse {
    response(StatusCode::CONFLICT, msg, Map::new())
}

/// Passes when `Content-Type` is `application/vnd.api+json`, with or
/// without media type parameters.
pub fn validate_json_api_content_type(
    headers: &HeaderMap,
) -> std::result::Result<(), ErrorResponse> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    let media_type = content_type.split(';').next().unwrap_or("").trim();
    if media_type.eq_ignore_ascii_case(JSON_API_CONTENT_TYPE) {
        return Ok(());
    }

    tracing::debug!("Rejected request with Content-Type {:?}", content_type);
    Err(bad_request(&format!(
        "Content-Type must be {} instead of {}",
        JSON_API_CONTENT_TYPE, content_type
    )))
}

/// Checks the `type` member of a JSON:API resource object; 409 on mismatch.
pub fn validate_resource_type(
    expected_type: &str,
    data: &Value,
) -> std::result::Result<(), ErrorResponse> {
    let actual = match data.get("type") {
        Some(Value::String(s)) if s == expected_type => return Ok(()),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    };

    Err(conflict(&format!(
        "Incorrect type. Type must be {}, instead of {}.",
        expected_type, actual
    )))
}
