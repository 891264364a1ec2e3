use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::gateway::RemoteGateway;
use crate::gateway::dto::RemoteCourse;
use crate::models::{Course, NewCourseRequest};

/// Result of one catalog load.
#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub courses: Vec<Course>,
    pub remote_reachable: bool,
}

pub struct CatalogLoader {
    gateway: Arc<dyn RemoteGateway>,
    fallback: Vec<Course>,
}

impl CatalogLoader {
    pub fn new(gateway: Arc<dyn RemoteGateway>, fallback: Vec<Course>) -> Self {
        Self { gateway, fallback }
    }

    pub fn fallback(&self) -> &[Course] {
        &self.fallback
    }

    /// Fetches the remote catalog, degrading to the bundled one on any failure or empty result.
    ///
    /// Never fails; the caller decides whether to install the returned courses.
    pub async fn load_catalog(&self) -> CatalogLoad {
        match self.gateway.fetch_courses().await {
            Ok(remote) if !remote.is_empty() => {
                let courses = normalize_courses(remote);
                info!("Loaded {} courses from remote catalog", courses.len());
                CatalogLoad {
                    courses,
                    remote_reachable: true,
                }
            }
            Ok(_) => {
                warn!("Remote catalog is empty, using bundled catalog");
                self.degraded()
            }
            Err(e) => {
                warn!("Remote catalog unavailable, using bundled catalog: {}", e);
                self.degraded()
            }
        }
    }

    /// Publishes a new course, keeping it locally under a generated id when the service is unavailable.
    pub async fn publish_course(&self, request: NewCourseRequest) -> Course {
        match self.gateway.create_course(&request).await {
            Ok(saved) => {
                let id = resolve_identifier(&saved)
                    .map(str::to_string)
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                info!("Published course {} ({})", saved.title, id);
                saved.into_course(id)
            }
            Err(e) => {
                let id = Uuid::new_v4().to_string();
                warn!("Failed to publish course {}, keeping it locally as {}: {}", request.title, id, e);
                request.into_course(id)
            }
        }
    }

    fn degraded(&self) -> CatalogLoad {
        CatalogLoad {
            courses: self.fallback.clone(),
            remote_reachable: false,
        }
    }
}

/// Identifier fallback chain: canonical id, then legacy id, then the title.
pub fn resolve_identifier(course: &RemoteCourse) -> Option<&str> {
    course
        .canonical_id()
        .or_else(|| course.legacy_id())
        .or_else(|| Some(course.title.trim()).filter(|t| !t.is_empty()))
}

/// Assigns every remote entry an identifier that is non-empty and unique within the batch.
///
/// Canonical and legacy ids are reserved first; only title-derived or positional ids get suffixed.
pub fn normalize_courses(remote: Vec<RemoteCourse>) -> Vec<Course> {
    let mut taken: HashSet<String> = remote
        .iter()
        .filter_map(|c| c.canonical_id().or_else(|| c.legacy_id()))
        .map(str::to_string)
        .collect();
    let mut claimed: HashSet<String> = HashSet::with_capacity(remote.len());
    let mut courses = Vec::with_capacity(remote.len());

    for (position, entry) in remote.into_iter().enumerate() {
        if let Some(real) = entry.canonical_id().or_else(|| entry.legacy_id()) {
            if claimed.insert(real.to_string()) {
                let id = real.to_string();
                courses.push(entry.into_course(id));
                continue;
            }
        }

        let base = resolve_identifier(&entry)
            .map(str::to_string)
            .unwrap_or_else(|| format!("course-{}", position + 1));

        let mut id = base.clone();
        let mut suffix = 2;
        while taken.contains(&id) {
            id = format!("{}-{}", base, suffix);
            suffix += 1;
        }
        if id != base {
            warn!("Duplicate course identifier {:?}, renamed to {:?}", base, id);
        }

        taken.insert(id.clone());
        courses.push(entry.into_course(id));
    }

    courses
}
