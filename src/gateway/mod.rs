pub mod dto;

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{AppError, GatewayError};
use crate::models::{
    Assignment, LoginRequest, NewAssignmentRequest, NewCourseRequest, NewQuizRequest, Quiz,
    RegisterRequest, Role,
};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn new_from_env() -> Result<Self, AppError> {
        let base_url = env::var("EDUSTREAM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let mut config = Self::new(base_url);

        if let Ok(raw) = env::var("EDUSTREAM_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    AppError::Config(format!("EDUSTREAM_TIMEOUT_SECS must be a positive integer, got {:?}", raw))
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

/// Request/response exchanges with the record-keeping service.
///
/// Every method fails with a classified [`GatewayError`] when the exchange is not successful.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<dto::AuthResponse, GatewayError>;
    async fn register(&self, request: &RegisterRequest) -> Result<dto::AuthResponse, GatewayError>;
    async fn fetch_courses(&self) -> Result<Vec<dto::RemoteCourse>, GatewayError>;
    async fn create_course(&self, course: &NewCourseRequest) -> Result<dto::RemoteCourse, GatewayError>;
    async fn enroll(&self, course_id: &str) -> Result<dto::EnrollResponse, GatewayError>;
    async fn fetch_quizzes(&self, course_id: &str) -> Result<Vec<Quiz>, GatewayError>;
    async fn create_quiz(&self, quiz: &NewQuizRequest) -> Result<Quiz, GatewayError>;
    async fn fetch_assignments(&self, course_id: &str) -> Result<Vec<Assignment>, GatewayError>;
    async fn create_assignment(&self, assignment: &NewAssignmentRequest) -> Result<Assignment, GatewayError>;
}

pub struct HttpGateway {
    client: Client,
    base: Url,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, AppError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| AppError::Config(format!("Invalid API url {}: {}", config.base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(AppError::Config(format!("API url cannot carry paths: {}", config.base_url)));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::Unreachable(format!("Invalid API url {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn exchange<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Unreachable(format!("{}: {}", what, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Unreachable(format!("{}: {}", what, e)))?;
        debug!("{} -> {}", what, status);

        if !status.is_success() {
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message: rejection_message(&body),
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| GatewayError::Malformed(format!("{}: {}", what, e)))
    }
}

/// Picks the displayable message out of an error body.
fn rejection_message(body: &str) -> String {
    let parsed = serde_json::from_str::<dto::ErrorBody>(body).unwrap_or_default();
    parsed
        .error
        .or(parsed.message)
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn login(&self, request: &LoginRequest) -> Result<dto::AuthResponse, GatewayError> {
        let url = self.endpoint(&["auth", "login"])?;
        let body = dto::LoginBody {
            email: &request.email,
            password: &request.password,
        };
        self.exchange(self.client.post(url).json(&body), "login").await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<dto::AuthResponse, GatewayError> {
        let url = self.endpoint(&["auth", "register"])?;
        let body = dto::RegisterBody {
            name: &request.name,
            email: &request.email,
            password: &request.password,
            role: Role::Learner.as_str(),
        };
        self.exchange(self.client.post(url).json(&body), "register").await
    }

    async fn fetch_courses(&self) -> Result<Vec<dto::RemoteCourse>, GatewayError> {
        let url = self.endpoint(&["courses"])?;
        self.exchange(self.client.get(url), "fetch courses").await
    }

    async fn create_course(&self, course: &NewCourseRequest) -> Result<dto::RemoteCourse, GatewayError> {
        let url = self.endpoint(&["courses"])?;
        self.exchange(self.client.post(url).json(course), "create course").await
    }

    async fn enroll(&self, course_id: &str) -> Result<dto::EnrollResponse, GatewayError> {
        let url = self.endpoint(&["courses", course_id, "enroll"])?;
        self.exchange(self.client.post(url), "enroll").await
    }

    async fn fetch_quizzes(&self, course_id: &str) -> Result<Vec<Quiz>, GatewayError> {
        let url = self.endpoint(&["quizzes", course_id])?;
        self.exchange(self.client.get(url), "fetch quizzes").await
    }

    async fn create_quiz(&self, quiz: &NewQuizRequest) -> Result<Quiz, GatewayError> {
        let url = self.endpoint(&["quizzes"])?;
        self.exchange(self.client.post(url).json(quiz), "create quiz").await
    }

    async fn fetch_assignments(&self, course_id: &str) -> Result<Vec<Assignment>, GatewayError> {
        let url = self.endpoint(&["homework", course_id])?;
        self.exchange(self.client.get(url), "fetch homework").await
    }

    async fn create_assignment(&self, assignment: &NewAssignmentRequest) -> Result<Assignment, GatewayError> {
        let url = self.endpoint(&["homework"])?;
        self.exchange(self.client.post(url).json(assignment), "create homework").await
    }
}

/// Gateway for running without a record-keeping service; every call is unreachable.
pub struct OfflineGateway;

impl OfflineGateway {
    fn offline<T>() -> Result<T, GatewayError> {
        Err(GatewayError::Unreachable("offline mode".to_string()))
    }
}

#[async_trait]
impl RemoteGateway for OfflineGateway {
    async fn login(&self, _request: &LoginRequest) -> Result<dto::AuthResponse, GatewayError> {
        Self::offline()
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<dto::AuthResponse, GatewayError> {
        Self::offline()
    }

    async fn fetch_courses(&self) -> Result<Vec<dto::RemoteCourse>, GatewayError> {
        Self::offline()
    }

    async fn create_course(&self, _course: &NewCourseRequest) -> Result<dto::RemoteCourse, GatewayError> {
        Self::offline()
    }

    async fn enroll(&self, _course_id: &str) -> Result<dto::EnrollResponse, GatewayError> {
        Self::offline()
    }

    async fn fetch_quizzes(&self, _course_id: &str) -> Result<Vec<Quiz>, GatewayError> {
        Self::offline()
    }

    async fn create_quiz(&self, _quiz: &NewQuizRequest) -> Result<Quiz, GatewayError> {
        Self::offline()
    }

    async fn fetch_assignments(&self, _course_id: &str) -> Result<Vec<Assignment>, GatewayError> {
        Self::offline()
    }

    async fn create_assignment(&self, _assignment: &NewAssignmentRequest) -> Result<Assignment, GatewayError> {
        Self::offline()
    }
}
