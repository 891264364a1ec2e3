use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::db::TokenStore;
use crate::error::AppError;
use crate::gateway::RemoteGateway;
use crate::models::{Assignment, Course, LoginRequest, NewCourseRequest, Quiz, RegisterRequest, User};
use crate::services::{
    CatalogLoader, CourseworkService, EnrollOutcome, EnrollmentReconciler, IdentityService, bundled_courses,
};
use crate::state::AppState;

/// Coordinating context that owns the application state.
///
/// Components compute new snapshots; only the session installs them. The lock is never
/// held across a remote call, so confirmations for different courses overlap freely.
pub struct Session {
    catalog: CatalogLoader,
    identity: IdentityService,
    enrollment: EnrollmentReconciler,
    coursework: CourseworkService,
    state: RwLock<AppState>,
}

impl Session {
    pub fn new(gateway: Arc<dyn RemoteGateway>, tokens: Arc<dyn TokenStore>) -> Self {
        Self::with_fallback(gateway, tokens, bundled_courses())
    }

    pub fn with_fallback(gateway: Arc<dyn RemoteGateway>, tokens: Arc<dyn TokenStore>, fallback: Vec<Course>) -> Self {
        let state = AppState::with_catalog(fallback.clone());
        Self {
            catalog: CatalogLoader::new(gateway.clone(), fallback),
            identity: IdentityService::new(gateway.clone(), tokens),
            enrollment: EnrollmentReconciler::new(gateway.clone()),
            coursework: CourseworkService::new(gateway),
            state: RwLock::new(state),
        }
    }

    /// Builds a session and performs the startup catalog load.
    pub async fn start(gateway: Arc<dyn RemoteGateway>, tokens: Arc<dyn TokenStore>) -> Self {
        let session = Self::new(gateway, tokens);
        session.load_catalog().await;
        session
    }

    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    /// Replaces the working catalog and reports whether the service answered.
    pub async fn load_catalog(&self) -> bool {
        let load = self.catalog.load_catalog().await;
        let mut state = self.state.write().await;
        state.catalog = load.courses;
        state.remote_reachable = Some(load.remote_reachable);
        load.remote_reachable
    }

    pub async fn login(&self, request: &LoginRequest) -> User {
        let user = self.identity.login(request).await;
        self.sign_in(user.clone()).await;
        user
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User, AppError> {
        let user = self.identity.register(request).await?;
        self.sign_in(user.clone()).await;
        Ok(user)
    }

    pub async fn logout(&self) {
        {
            let mut state = self.state.write().await;
            state.identity = None;
            state.enrolled.clear();
            state.confirming.clear();
        }
        self.identity.logout().await;
        info!("Signed out");
    }

    /// Enrolls the current identity in `course_id`.
    ///
    /// Fails only with [`AppError::AuthRequired`] when nobody is signed in.
    pub async fn enroll(&self, course_id: &str) -> Result<EnrollOutcome, AppError> {
        {
            let mut state = self.state.write().await;
            match EnrollmentReconciler::begin(&state, course_id)? {
                Some(next) => *state = next,
                None => return Ok(EnrollOutcome::AlreadyEnrolled),
            }
        }

        let confirmation = self.enrollment.confirm(course_id).await;

        let mut state = self.state.write().await;
        let (next, outcome) = EnrollmentReconciler::apply(&state, &confirmation);
        *state = next;
        Ok(outcome)
    }

    /// Publishes a course and puts it at the front of the working catalog.
    pub async fn publish_course(&self, request: NewCourseRequest) -> Course {
        let course = self.catalog.publish_course(request).await;
        let mut state = self.state.write().await;
        state.catalog.retain(|c| c.id != course.id);
        state.catalog.insert(0, course.clone());
        course
    }

    pub async fn course_quizzes(&self, course_id: &str) -> Vec<Quiz> {
        self.coursework.quizzes(course_id).await
    }

    pub async fn course_assignments(&self, course_id: &str) -> Vec<Assignment> {
        self.coursework.assignments(course_id).await
    }

    async fn sign_in(&self, user: User) {
        let mut state = self.state.write().await;
        state.identity = Some(user);
        state.enrolled.clear();
        state.confirming.clear();
    }
}
