use std::sync::Arc;

use edustream_sync::db::SqliteTokenStore;
use edustream_sync::gateway::{GatewayConfig, HttpGateway};
use edustream_sync::models::{LoginRequest, Role};
use edustream_sync::Session;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "edustream_sync=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let session_db_url = std::env::var("SESSION_DB_URL")
        .unwrap_or_else(|_| "sqlite://edustream-session.db".to_string());

    let gateway = Arc::new(HttpGateway::new(GatewayConfig::new_from_env()?)?);
    let tokens = Arc::new(SqliteTokenStore::connect(&session_db_url).await?);

    let session = Session::start(gateway, tokens).await;
    let snapshot = session.snapshot().await;
    info!(
        "Catalog ready: {} courses (remote reachable: {:?})",
        snapshot.catalog.len(),
        snapshot.remote_reachable
    );

    let role = std::env::var("EDUSTREAM_ROLE")
        .ok()
        .map(|raw| raw.parse::<Role>())
        .transpose()?
        .unwrap_or(Role::Learner);
    let user = session
        .login(&LoginRequest {
            email: std::env::var("EDUSTREAM_EMAIL").unwrap_or_default(),
            password: std::env::var("EDUSTREAM_PASSWORD").unwrap_or_default(),
            role,
        })
        .await;
    info!("Signed in as {} <{}> ({})", user.name, user.email, user.role);

    for course_id in std::env::args().skip(1) {
        match session.enroll(&course_id).await {
            Ok(outcome) => info!("enroll {}: {}", course_id, serde_json::to_string(&outcome)?),
            Err(e) => warn!("enroll {} refused: {}", course_id, e),
        }
    }

    let snapshot = session.snapshot().await;
    for course in snapshot.enrolled_courses() {
        info!("{} [{}] - {} enrolled", course.title, course.id, course.enrolled_count);
    }

    Ok(())
}
