//! Reference data payloads and HTTP response classification
//!
//! Every outcome of a lookup, good or bad, becomes an [`ApiResponse`]. The
//! classification rules are:
//!
//! | HTTP result                         | status                | success |
//! |-------------------------------------|-----------------------|---------|
//! | 2xx, zero-length body               | 204 No Content        | no      |
//! | 2xx, body fails to deserialize      | 500, `deserializing`  | no      |
//! | 2xx, empty list                     | 404 Not Found         | no      |
//! | 2xx, non-empty list                 | 200 OK                | yes     |
//! | 404                                 | 404 Not Found         | no      |
//! | 400                                 | 400 Bad Request       | no      |
//! | anything else                       | 500                   | no      |

use axum::http::StatusCode;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::client::RawResponse;
use super::query::DataShape;

/// A `{code, description}` entry from a simple lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceCode {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl ReferenceCode {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

/// A valid (account, delivery body, scheme code) triple for a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteCombination {
    pub account_code: String,
    pub delivery_body_code: String,
    pub scheme_code: String,
}

impl RouteCombination {
    pub fn new(
        account_code: impl Into<String>,
        delivery_body_code: impl Into<String>,
        scheme_code: impl Into<String>,
    ) -> Self {
        Self {
            account_code: account_code.into(),
            delivery_body_code: delivery_body_code.into(),
            scheme_code: scheme_code.into(),
        }
    }
}

/// A deserialized reference list of either shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceData {
    Codes(Vec<ReferenceCode>),
    Combinations(Vec<RouteCombination>),
}

impl ReferenceData {
    pub fn empty(shape: DataShape) -> Self {
        match shape {
            DataShape::Codes => ReferenceData::Codes(Vec::new()),
            DataShape::Combinations => ReferenceData::Combinations(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ReferenceData::Codes(codes) => codes.len(),
            ReferenceData::Combinations(combinations) => combinations.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Case-insensitive membership of a code; always false for combination lists
    pub fn contains_code(&self, code: &str) -> bool {
        let code = code.trim();
        match self {
            ReferenceData::Codes(codes) => codes.iter().any(|c| c.code.eq_ignore_ascii_case(code)),
            ReferenceData::Combinations(_) => false,
        }
    }

    /// Case-insensitive membership of a triple; always false for code lists
    pub fn contains_combination(
        &self,
        account_code: &str,
        delivery_body_code: &str,
        scheme_code: &str,
    ) -> bool {
        match self {
            ReferenceData::Combinations(combinations) => combinations.iter().any(|c| {
                c.account_code.eq_ignore_ascii_case(account_code.trim())
                    && c.delivery_body_code
                        .eq_ignore_ascii_case(delivery_body_code.trim())
                    && c.scheme_code.eq_ignore_ascii_case(scheme_code.trim())
            }),
            ReferenceData::Codes(_) => false,
        }
    }
}

/// Outcome of a reference data call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub is_success: bool,
    pub status: StatusCode,
    pub data: T,
    /// Error key to messages, in the order they were recorded
    pub errors: IndexMap<String, Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(status: StatusCode, data: T) -> Self {
        Self {
            is_success: true,
            status,
            data,
            errors: IndexMap::new(),
        }
    }

    pub fn failure(status: StatusCode, data: T) -> Self {
        Self {
            is_success: false,
            status,
            data,
            errors: IndexMap::new(),
        }
    }

    pub fn with_error(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.entry(key.into()).or_default().push(message.into());
        self
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            is_success: self.is_success,
            status: self.status,
            data: f(self.data),
            errors: self.errors,
        }
    }
}

/// Deserialize a JSON array body into a typed list
pub fn deserialize_list<E: DeserializeOwned>(body: &str) -> Result<Vec<E>, serde_json::Error> {
    serde_json::from_str(body)
}

/// Classify a raw HTTP response into a typed list result
pub fn classify<E: DeserializeOwned>(raw: &RawResponse) -> ApiResponse<Vec<E>> {
    if raw.status.is_success() {
        if raw.content_length == Some(0) || raw.body.is_empty() {
            return ApiResponse::failure(StatusCode::NO_CONTENT, Vec::new());
        }

        return match deserialize_list::<E>(&raw.body) {
            Ok(list) if list.is_empty() => ApiResponse::failure(StatusCode::NOT_FOUND, list),
            Ok(list) => ApiResponse::success(StatusCode::OK, list),
            Err(err) => ApiResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, Vec::new())
                .with_error("deserializing", err.to_string()),
        };
    }

    match raw.status {
        StatusCode::NOT_FOUND => ApiResponse::failure(StatusCode::NOT_FOUND, Vec::new())
            .with_error(StatusCode::NOT_FOUND.as_u16().to_string(), raw.body.clone()),
        StatusCode::BAD_REQUEST => ApiResponse::failure(StatusCode::BAD_REQUEST, Vec::new())
            .with_error(StatusCode::BAD_REQUEST.as_u16().to_string(), raw.body.clone()),
        _ => ApiResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, Vec::new())
            .with_error("InternalServerError", raw.body.clone()),
    }
}

/// Classify a raw response according to the shape its lookup returns
pub fn classify_reference(shape: DataShape, raw: &RawResponse) -> ApiResponse<ReferenceData> {
    match shape {
        DataShape::Codes => classify::<ReferenceCode>(raw).map(ReferenceData::Codes),
        DataShape::Combinations => {
            classify::<RouteCombination>(raw).map(ReferenceData::Combinations)
        }
    }
}
