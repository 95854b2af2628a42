mod config;
mod domain;
mod infrastructure;
mod presentation;
mod usecase;

use axum::Router;
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    config::AppConfig,
    infrastructure::{
        schema, sqlite_content_repository::SqliteContentRepository,
        sqlite_user_repository::SqliteUserRepository, whatsapp_gateway::HttpWhatsAppGateway,
    },
    presentation::handlers::{
        content_handler::{ContentState, create_main_router, create_schedule_router},
        user_handler::create_user_router,
    },
    usecase::{
        content_usecase::ContentUsecase, profile_usecase::ProfileUsecase,
        register_user_usecase::RegisterUserUsecase,
    },
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(10)
        .min_connections(1)
        .sqlx_logging(true);
    let db = Database::connect(opt).await?;
    schema::init_schema(&db).await?;

    // The gateway handshake must complete before any traffic is accepted.
    let gateway = HttpWhatsAppGateway::connect(config.whatsapp.clone()).await?;

    let user_repository = SqliteUserRepository::new(db.clone());
    let content_repository = SqliteContentRepository::new(db.clone());

    let register_usecase = RegisterUserUsecase::new(user_repository.clone(), gateway.clone());
    let profile_usecase = ProfileUsecase::new(user_repository.clone());
    let content_state = ContentState::new(ContentUsecase::new(content_repository));

    let app = Router::new()
        .nest(
            "/api/v1/user",
            create_user_router(register_usecase, profile_usecase),
        )
        .nest("/api/v1/main", create_main_router(content_state.clone()))
        .nest("/api/v1/schedule", create_schedule_router(content_state));

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down gracefully...");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
