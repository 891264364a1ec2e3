use thiserror::Error;

/// Failure classification produced at the gateway boundary.
///
/// Callers pick a fallback per variant instead of treating every failure alike.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Service unreachable: {0}")]
    Unreachable(String),

    #[error("Service rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication required")]
    AuthRequired,

    #[error("Conflict: {0}")]
    Conflict(String),
}
