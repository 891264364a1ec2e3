pub mod course;
pub mod coursework;
pub mod user;

pub use course::{Course, NewCourseRequest};
pub use coursework::{Assignment, NewAssignmentRequest, NewQuizRequest, QuestionKind, Quiz, QuizQuestion, SubmissionKind};
pub use user::{LoginRequest, RegisterRequest, Role, SubscriptionPlan, User};
