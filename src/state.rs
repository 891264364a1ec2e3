use std::collections::BTreeSet;

use crate::models::{Course, User};

/// Everything the UI reads: the working catalog, the current identity and its enrolled set.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub catalog: Vec<Course>,
    /// `None` until the first catalog load finishes.
    pub remote_reachable: Option<bool>,
    pub identity: Option<User>,
    pub enrolled: BTreeSet<String>,
    /// Courses whose remote confirmation has not resolved yet.
    pub confirming: BTreeSet<String>,
}

impl AppState {
    pub fn with_catalog(catalog: Vec<Course>) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.catalog.iter().find(|c| c.id == id)
    }

    pub fn is_enrolled(&self, course_id: &str) -> bool {
        self.enrolled.contains(course_id)
    }

    /// Courses of the catalog the current identity has joined, in catalog order.
    pub fn enrolled_courses(&self) -> impl Iterator<Item = &Course> {
        self.catalog.iter().filter(|c| self.enrolled.contains(&c.id))
    }
}
