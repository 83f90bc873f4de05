//! HTTP-shaped requests and their routing onto [`MockBackend`] endpoints.

use http::{Method, StatusCode, Uri};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{ApiError, MockBackend};
use crate::model::{Assessment, Candidate, Job};
use crate::query::CandidateListParams;

#[derive(Debug, Clone)]
pub struct MockRequest {
    pub method: Method,
    /// Path plus optional query string, e.g. `/api/candidates?page=2`.
    ///
    /// Raw spaces are accepted and read as `%20`; any other character a URI
    /// cannot carry must already be percent-encoded.
    pub uri: String,
    pub body: Option<Value>,
}

impl MockRequest {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            body: None,
        }
    }

    pub fn get(uri: impl Into<String>) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, uri).with_body(body)
    }

    pub fn patch(uri: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PATCH, uri).with_body(body)
    }

    pub fn delete(uri: impl Into<String>) -> Self {
        Self::new(Method::DELETE, uri)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockResponse {
    pub status: StatusCode,
    /// `None` for 204.
    pub body: Option<Value>,
}

impl MockResponse {
    fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: Some(body),
        }
    }

    fn created(body: Value) -> Self {
        Self {
            status: StatusCode::CREATED,
            body: Some(body),
        }
    }

    fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: None,
        }
    }

    fn error(err: &ApiError) -> Self {
        Self {
            status: err.status(),
            body: Some(err.body()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The `error` field of a failure body.
    pub fn error_message(&self) -> Option<&str> {
        self.body.as_ref()?.get("error")?.as_str()
    }

    /// Fails with the carried [`ApiError`] unless the status is 2xx.
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::from_response(self.status, self.body.as_ref()))
        }
    }

    /// Decodes a successful body.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let response = self.error_for_status()?;
        let body = response.body.unwrap_or(Value::Null);
        serde_json::from_value(body)
            .map_err(|e| ApiError::BadRequest(format!("Malformed response body: {}", e)))
    }
}

// ─── Envelopes ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsEnvelope {
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobEnvelope {
    pub job: Job,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateEnvelope {
    pub candidate: Candidate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentsEnvelope {
    pub assessments: Vec<Assessment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentEnvelope {
    pub assessment: Assessment,
}

// ─── Routing ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route<'a> {
    Jobs,
    Job(&'a str),
    Candidates,
    Candidate(&'a str),
    Assessments,
    Assessment(&'a str),
    AssessmentResponses(&'a str),
    StatsOverview,
}

impl<'a> Route<'a> {
    fn parse(segments: &[&'a str]) -> Option<Self> {
        let route = match *segments {
            ["jobs"] => Route::Jobs,
            ["jobs", id] => Route::Job(id),
            ["candidates"] => Route::Candidates,
            ["candidates", id] => Route::Candidate(id),
            ["assessments"] => Route::Assessments,
            ["assessments", id] => Route::Assessment(id),
            ["assessments", id, "responses"] => Route::AssessmentResponses(id),
            ["stats", "overview"] => Route::StatsOverview,
            _ => return None,
        };
        Some(route)
    }
}

/// Splits `path` and strips the namespace segments.
fn route_segments<'a>(namespace: &str, path: &'a str) -> Option<Vec<&'a str>> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    for expected in namespace.split('/').filter(|s| !s.is_empty()) {
        if segments.next()? != expected {
            return None;
        }
    }
    Some(segments.collect())
}

impl MockBackend {
    /// Answers an HTTP-shaped request.
    ///
    /// Never fails: every error becomes a status code and an
    /// `{"error": message}` body.
    pub async fn fetch(&self, request: MockRequest) -> MockResponse {
        log::debug!("{} {}", request.method, request.uri);

        let response = match self.dispatch(&request).await {
            Ok(response) => response,
            Err(err) => MockResponse::error(&err),
        };

        if !response.is_success() {
            log::debug!(
                "{} {} -> {}",
                request.method,
                request.uri,
                response.status.as_u16()
            );
        }
        response
    }

    async fn dispatch(&self, request: &MockRequest) -> Result<MockResponse, ApiError> {
        let uri: Uri = request
            .uri
            .replace(' ', "%20")
            .parse()
            .map_err(|e| ApiError::BadRequest(format!("Invalid request URI: {}", e)))?;
        let path = uri.path();

        let route = route_segments(&self.config().namespace, path)
            .and_then(|segments| Route::parse(&segments))
            .ok_or_else(|| ApiError::RouteNotFound {
                path: path.to_string(),
            })?;

        let empty = json!({});
        let body = request.body.as_ref().unwrap_or(&empty);
        let method = &request.method;

        match route {
            Route::Jobs if method == Method::GET => {
                let jobs = self.list_jobs().await?;
                Ok(MockResponse::ok(json!({ "jobs": jobs })))
            }
            Route::Jobs if method == Method::POST => {
                let job = self.create_job(body).await?;
                Ok(MockResponse::created(json!({ "job": job })))
            }
            Route::Job(id) if method == Method::GET => {
                let detail = self.get_job(id).await?;
                Ok(MockResponse::ok(json!(detail)))
            }
            Route::Job(id) if method == Method::PATCH => {
                let job = self.update_job(id, body).await?;
                Ok(MockResponse::ok(json!({ "job": job })))
            }
            Route::Job(id) if method == Method::DELETE => {
                self.delete_job(id).await?;
                Ok(MockResponse::no_content())
            }
            Route::Candidates if method == Method::GET => {
                let params: CandidateListParams =
                    serde_urlencoded::from_str(uri.query().unwrap_or_default())
                        .map_err(|e| ApiError::BadRequest(format!("Invalid query: {}", e)))?;
                let page = self.list_candidates(&params).await?;
                Ok(MockResponse::ok(json!(page)))
            }
            Route::Candidate(id) if method == Method::GET => {
                let candidate = self.get_candidate(id).await?;
                Ok(MockResponse::ok(json!({ "candidate": candidate })))
            }
            Route::Candidate(id) if method == Method::PATCH => {
                let candidate = self.update_candidate(id, body).await?;
                Ok(MockResponse::ok(json!({ "candidate": candidate })))
            }
            Route::Assessments if method == Method::GET => {
                let assessments = self.list_assessments().await?;
                Ok(MockResponse::ok(json!({ "assessments": assessments })))
            }
            Route::Assessments if method == Method::POST => {
                let assessment = self.create_assessment(body).await?;
                Ok(MockResponse::created(json!({ "assessment": assessment })))
            }
            Route::Assessment(id) if method == Method::GET => {
                let assessment = self.get_assessment(id).await?;
                Ok(MockResponse::ok(json!({ "assessment": assessment })))
            }
            Route::Assessment(id) if method == Method::PATCH => {
                let assessment = self.update_assessment(id, body).await?;
                Ok(MockResponse::ok(json!({ "assessment": assessment })))
            }
            Route::Assessment(id) if method == Method::DELETE => {
                self.delete_assessment(id).await?;
                Ok(MockResponse::no_content())
            }
            Route::AssessmentResponses(id) if method == Method::POST => {
                let ack = self.submit_assessment_response(id, body).await?;
                Ok(MockResponse::created(json!(ack)))
            }
            Route::StatsOverview if method == Method::GET => {
                let stats = self.stats_overview().await?;
                Ok(MockResponse::ok(json!(stats)))
            }
            _ => Err(ApiError::MethodNotAllowed {
                method: method.to_string(),
                path: path.to_string(),
            }),
        }
    }
}
