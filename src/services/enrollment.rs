use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{AppError, GatewayError};
use crate::gateway::RemoteGateway;
use crate::state::AppState;

/// What a single enroll call ended up doing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EnrollOutcome {
    /// Already a member, or a confirmation for the course is still in flight.
    AlreadyEnrolled,
    /// The service confirmed and its count replaced the local one.
    Confirmed { course_id: String, enrolled_count: u32 },
    /// The service did not confirm; the local count was bumped by one.
    Estimated { course_id: String, enrolled_count: u32 },
    /// The course left the working catalog before the confirmation resolved.
    Detached { course_id: String },
}

/// Result of the remote confirmation step, applied later to whatever state is current.
#[derive(Debug, Clone)]
pub enum Confirmation {
    Authoritative {
        course_id: String,
        matched_ids: Vec<String>,
        enrolled_count: u32,
    },
    Unconfirmed {
        course_id: String,
        reason: GatewayError,
    },
}

impl Confirmation {
    pub fn course_id(&self) -> &str {
        match self {
            Confirmation::Authoritative { course_id, .. } | Confirmation::Unconfirmed { course_id, .. } => course_id,
        }
    }
}

pub struct EnrollmentReconciler {
    gateway: Arc<dyn RemoteGateway>,
}

impl EnrollmentReconciler {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        Self { gateway }
    }

    /// Optimistic step: grants membership and marks the confirmation in flight.
    ///
    /// Returns `Ok(None)` when there is nothing to do for this course.
    pub fn begin(state: &AppState, course_id: &str) -> Result<Option<AppState>, AppError> {
        if state.identity.is_none() {
            return Err(AppError::AuthRequired);
        }
        if state.is_enrolled(course_id) || state.confirming.contains(course_id) {
            debug!("Course {} already enrolled, skipping", course_id);
            return Ok(None);
        }

        let mut next = state.clone();
        next.enrolled.insert(course_id.to_string());
        next.confirming.insert(course_id.to_string());
        Ok(Some(next))
    }

    /// Asks the service to record the enrollment. Never fails; failures become `Unconfirmed`.
    pub async fn confirm(&self, course_id: &str) -> Confirmation {
        match self.gateway.enroll(course_id).await {
            Ok(response) => {
                let mut matched_ids: Vec<String> = response.identifiers().into_iter().map(str::to_string).collect();
                if matched_ids.is_empty() {
                    matched_ids.push(course_id.to_string());
                }
                Confirmation::Authoritative {
                    course_id: course_id.to_string(),
                    matched_ids,
                    enrolled_count: response.enrolled_count,
                }
            }
            Err(reason) => Confirmation::Unconfirmed {
                course_id: course_id.to_string(),
                reason,
            },
        }
    }

    /// Folds a confirmation into the current state. Only enrolled counts change; membership is kept.
    pub fn apply(state: &AppState, confirmation: &Confirmation) -> (AppState, EnrollOutcome) {
        let mut next = state.clone();
        let course_id = confirmation.course_id().to_string();
        next.confirming.remove(&course_id);

        let outcome = match confirmation {
            Confirmation::Authoritative {
                matched_ids,
                enrolled_count,
                ..
            } => {
                let position = next
                    .catalog
                    .iter()
                    .position(|c| c.id == course_id)
                    .or_else(|| next.catalog.iter().position(|c| matched_ids.contains(&c.id)));

                match position.and_then(|i| next.catalog.get_mut(i)) {
                    Some(course) => {
                        course.enrolled_count = *enrolled_count;
                        info!("Enrollment in {} confirmed, {} enrolled", course.id, enrolled_count);
                        EnrollOutcome::Confirmed {
                            course_id: course.id.clone(),
                            enrolled_count: *enrolled_count,
                        }
                    }
                    None => detached(course_id),
                }
            }
            Confirmation::Unconfirmed { reason, .. } => {
                match next.catalog.iter_mut().find(|c| c.id == course_id) {
                    Some(course) => {
                        course.enrolled_count = course.enrolled_count.saturating_add(1);
                        warn!(
                            "Enrollment in {} not confirmed, estimating {} enrolled: {}",
                            course_id, course.enrolled_count, reason
                        );
                        EnrollOutcome::Estimated {
                            enrolled_count: course.enrolled_count,
                            course_id,
                        }
                    }
                    None => detached(course_id),
                }
            }
        };

        (next, outcome)
    }
}

fn detached(course_id: String) -> EnrollOutcome {
    warn!("Course {} is no longer in the catalog, confirmation dropped", course_id);
    EnrollOutcome::Detached { course_id }
}
