pub mod bundled;
pub mod catalog;
pub mod coursework;
pub mod enrollment;
pub mod identity;

pub use bundled::bundled_courses;
pub use catalog::{CatalogLoad, CatalogLoader};
pub use coursework::CourseworkService;
pub use enrollment::{Confirmation, EnrollOutcome, EnrollmentReconciler};
pub use identity::IdentityService;
