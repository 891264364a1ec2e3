use std::sync::Arc;

use tracing::{info, warn};

use crate::db::TokenStore;
use crate::error::{AppError, GatewayError};
use crate::gateway::RemoteGateway;
use crate::gateway::dto::AuthResponse;
use crate::models::{LoginRequest, RegisterRequest, Role, SubscriptionPlan, User};

const AVATAR_BASE: &str = "https://i.pravatar.cc/150";

/// Login and registration that always leave the caller with a usable identity.
pub struct IdentityService {
    gateway: Arc<dyn RemoteGateway>,
    tokens: Arc<dyn TokenStore>,
}

impl IdentityService {
    pub fn new(gateway: Arc<dyn RemoteGateway>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { gateway, tokens }
    }

    /// Authenticates against the service, or synthesizes a placeholder for the chosen role.
    ///
    /// A credential rejection degrades the same way as an unreachable service.
    pub async fn login(&self, request: &LoginRequest) -> User {
        if request.email.trim().is_empty() || request.password.is_empty() {
            warn!("Login without email or password, using placeholder {} identity", request.role);
            return placeholder_for_login(request);
        }

        match self.gateway.login(request).await {
            Ok(auth) => self.accept(auth).await,
            Err(e) => {
                warn!("Login failed, using placeholder {} identity: {}", request.role, e);
                placeholder_for_login(request)
            }
        }
    }

    /// Creates an account, surfacing validation or duplicate-account rejections.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, AppError> {
        match self.gateway.register(request).await {
            Ok(auth) => Ok(self.accept(auth).await),
            Err(GatewayError::Rejected { status: status @ (400 | 409), message }) => {
                warn!("Registration rejected for {} ({}): {}", request.email, status, message);
                Err(AppError::Conflict(message))
            }
            Err(e) => {
                warn!("Registration failed, using placeholder identity: {}", e);
                Ok(placeholder_for_registration(request))
            }
        }
    }

    pub async fn logout(&self) {
        if let Err(e) = self.tokens.clear().await {
            warn!("Failed to clear session token: {}", e);
        }
    }

    async fn accept(&self, auth: AuthResponse) -> User {
        if let Err(e) = self.tokens.set(&auth.token).await {
            warn!("Failed to persist session token: {}", e);
        }
        info!("Signed in as {} ({})", auth.user.email, auth.user.role);
        auth.user
    }
}

pub fn placeholder_for_login(request: &LoginRequest) -> User {
    let (id, name, default_email, avatar_key, subscription) = match request.role {
        Role::Administrator => ("a1", "Admin User", "admin@edustream.com", "admin", None),
        Role::Instructor => ("t1", "Sarah Jenkins", "sarah@edustream.com", "teacher", None),
        Role::Learner => (
            "s1",
            "Alex Student",
            "student@edustream.com",
            "student",
            Some(SubscriptionPlan::Pro),
        ),
    };

    User {
        id: id.to_string(),
        name: name.to_string(),
        email: or_default(&request.email, default_email),
        role: request.role,
        avatar: format!("{}?u={}", AVATAR_BASE, avatar_key),
        subscription,
    }
}

pub fn placeholder_for_registration(request: &RegisterRequest) -> User {
    let avatar_key = or_default(&request.email, "student");
    User {
        id: "s1".to_string(),
        name: or_default(&request.name, "Alex Student"),
        email: or_default(&request.email, "student@edustream.com"),
        role: Role::Learner,
        avatar: format!("{}?u={}", AVATAR_BASE, avatar_key),
        subscription: Some(SubscriptionPlan::Free),
    }
}

fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
