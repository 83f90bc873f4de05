use http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

use crate::model::PatchError;

/// Failure answered by the mock backend.
///
/// The display text is the `error` field of the response body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Server error")]
    ServerError,

    #[error("{resource} not found")]
    NotFound { resource: &'static str, id: String },

    #[error("Not found")]
    RouteNotFound { path: String },

    #[error("Method {method} not allowed")]
    MethodNotAllowed { method: String, path: String },

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn not_found(resource: &'static str, id: &str) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound { .. } | Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// `{"error": message}`.
    pub fn body(&self) -> Value {
        json!({ "error": self.to_string() })
    }

    /// Rebuilds an error from a non-success response.
    pub fn from_response(status: StatusCode, body: Option<&Value>) -> Self {
        let message = body
            .and_then(|b| b.get("error"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        match status {
            StatusCode::NOT_FOUND => match message.strip_suffix(" not found") {
                Some("Job") => Self::NotFound {
                    resource: "Job",
                    id: String::new(),
                },
                Some("Candidate") => Self::NotFound {
                    resource: "Candidate",
                    id: String::new(),
                },
                Some("Assessment") => Self::NotFound {
                    resource: "Assessment",
                    id: String::new(),
                },
                _ => Self::RouteNotFound {
                    path: String::new(),
                },
            },
            StatusCode::METHOD_NOT_ALLOWED => Self::MethodNotAllowed {
                method: String::new(),
                path: String::new(),
            },
            StatusCode::BAD_REQUEST => Self::BadRequest(message),
            _ => Self::ServerError,
        }
    }
}

impl From<PatchError> for ApiError {
    fn from(e: PatchError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_bodies() {
        assert_eq!(
            ApiError::not_found("Job", "9").body(),
            json!({"error": "Job not found"})
        );
        assert_eq!(ApiError::ServerError.body(), json!({"error": "Server error"}));
        assert_eq!(
            ApiError::RouteNotFound {
                path: "/api/nope".to_string()
            }
            .body(),
            json!({"error": "Not found"})
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::ServerError.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::not_found("Candidate", "1").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::BadRequest("bad".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_from_response_keeps_resource() {
        let err = ApiError::from_response(
            StatusCode::NOT_FOUND,
            Some(&json!({"error": "Job not found"})),
        );
        assert!(matches!(err, ApiError::NotFound { resource: "Job", .. }));

        let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, None);
        assert_eq!(err, ApiError::ServerError);
    }

    #[test]
    fn test_patch_errors_become_bad_requests() {
        let err: ApiError = PatchError::NotAnObject.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Patch body must be a JSON object");
    }
}
