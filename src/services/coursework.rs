use std::sync::Arc;

use tracing::warn;

use crate::gateway::RemoteGateway;
use crate::models::{Assignment, Quiz};

/// Read access to the quizzes and homework attached to a course.
pub struct CourseworkService {
    gateway: Arc<dyn RemoteGateway>,
}

impl CourseworkService {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        Self { gateway }
    }

    pub async fn quizzes(&self, course_id: &str) -> Vec<Quiz> {
        self.gateway.fetch_quizzes(course_id).await.unwrap_or_else(|e| {
            warn!("Quizzes for course {} unavailable: {}", course_id, e);
            Vec::new()
        })
    }

    pub async fn assignments(&self, course_id: &str) -> Vec<Assignment> {
        self.gateway.fetch_assignments(course_id).await.unwrap_or_else(|e| {
            warn!("Homework for course {} unavailable: {}", course_id, e);
            Vec::new()
        })
    }
}
