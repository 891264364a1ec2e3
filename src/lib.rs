pub mod db;
pub mod error;
pub mod gateway;
pub mod models;
pub mod services;
pub mod session;
pub mod state;

pub use error::{AppError, GatewayError};
pub use session::Session;
pub use state::AppState;
