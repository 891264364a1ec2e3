#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use edustream_sync::GatewayError;
use edustream_sync::gateway::RemoteGateway;
use edustream_sync::gateway::dto::{AuthResponse, EnrollResponse, RemoteCourse};
use edustream_sync::models::{
    Assignment, LoginRequest, NewAssignmentRequest, NewCourseRequest, NewQuizRequest, Quiz, RegisterRequest, Role, User,
};

/// In-process gateway double with a scripted reply per operation.
pub struct ScriptedGateway {
    pub courses: Mutex<Result<Vec<RemoteCourse>, GatewayError>>,
    pub created: Mutex<Result<RemoteCourse, GatewayError>>,
    pub login: Mutex<Result<AuthResponse, GatewayError>>,
    pub register: Mutex<Result<AuthResponse, GatewayError>>,
    pub enroll: Mutex<Result<EnrollResponse, GatewayError>>,
    pub enroll_delay: Mutex<Option<Duration>>,
    pub calls: Mutex<Vec<String>>,
}

pub fn unreachable() -> GatewayError {
    GatewayError::Unreachable("connection refused".to_string())
}

impl ScriptedGateway {
    /// Every operation fails as if the service were down.
    pub fn down() -> Self {
        Self {
            courses: Mutex::new(Err(unreachable())),
            created: Mutex::new(Err(unreachable())),
            login: Mutex::new(Err(unreachable())),
            register: Mutex::new(Err(unreachable())),
            enroll: Mutex::new(Err(unreachable())),
            enroll_delay: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_courses(self, courses: Vec<RemoteCourse>) -> Self {
        *self.courses.lock().unwrap() = Ok(courses);
        self
    }

    pub fn with_login(self, reply: Result<AuthResponse, GatewayError>) -> Self {
        *self.login.lock().unwrap() = reply;
        self
    }

    pub fn with_register(self, reply: Result<AuthResponse, GatewayError>) -> Self {
        *self.register.lock().unwrap() = reply;
        self
    }

    pub fn with_enroll(self, reply: Result<EnrollResponse, GatewayError>) -> Self {
        *self.enroll.lock().unwrap() = reply;
        self
    }

    pub fn with_created(self, reply: Result<RemoteCourse, GatewayError>) -> Self {
        *self.created.lock().unwrap() = reply;
        self
    }

    pub fn with_enroll_delay(self, delay: Duration) -> Self {
        *self.enroll_delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn calls_to(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split(':').next() == Some(operation))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RemoteGateway for ScriptedGateway {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, GatewayError> {
        self.record(format!("login:{}", request.email));
        self.login.lock().unwrap().clone()
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, GatewayError> {
        self.record(format!("register:{}", request.email));
        self.register.lock().unwrap().clone()
    }

    async fn fetch_courses(&self) -> Result<Vec<RemoteCourse>, GatewayError> {
        self.record("fetch_courses".to_string());
        self.courses.lock().unwrap().clone()
    }

    async fn create_course(&self, course: &NewCourseRequest) -> Result<RemoteCourse, GatewayError> {
        self.record(format!("create_course:{}", course.title));
        self.created.lock().unwrap().clone()
    }

    async fn enroll(&self, course_id: &str) -> Result<EnrollResponse, GatewayError> {
        self.record(format!("enroll:{}", course_id));
        let delay = *self.enroll_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.enroll.lock().unwrap().clone()
    }

    async fn fetch_quizzes(&self, course_id: &str) -> Result<Vec<Quiz>, GatewayError> {
        self.record(format!("fetch_quizzes:{}", course_id));
        Err(unreachable())
    }

    async fn create_quiz(&self, quiz: &NewQuizRequest) -> Result<Quiz, GatewayError> {
        self.record(format!("create_quiz:{}", quiz.title));
        Err(unreachable())
    }

    async fn fetch_assignments(&self, course_id: &str) -> Result<Vec<Assignment>, GatewayError> {
        self.record(format!("fetch_assignments:{}", course_id));
        Err(unreachable())
    }

    async fn create_assignment(&self, assignment: &NewAssignmentRequest) -> Result<Assignment, GatewayError> {
        self.record(format!("create_assignment:{}", assignment.title));
        Err(unreachable())
    }
}

pub fn remote_course(id: Option<&str>, legacy_id: Option<&str>, title: &str, enrolled_count: u32) -> RemoteCourse {
    RemoteCourse {
        id: id.map(str::to_string),
        legacy_id: legacy_id.map(str::to_string),
        title: title.to_string(),
        language: "en".to_string(),
        is_group: true,
        enrolled_count,
        ..RemoteCourse::default()
    }
}

pub fn auth(token: &str, role: Role) -> AuthResponse {
    AuthResponse {
        token: token.to_string(),
        user: User {
            id: "65a1f0c2e4b0a1b2c3d4e5f6".to_string(),
            name: "Dana Remote".to_string(),
            email: "dana@example.com".to_string(),
            role,
            avatar: "https://i.pravatar.cc/150".to_string(),
            subscription: None,
        },
    }
}

pub fn login_request(email: &str, password: &str, role: Role) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
        role,
    }
}
