mod model;
mod server;

use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, error::AppError, scheduler::deadlines, service::token::TokenService, startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;

    // Seed the default role accounts on first boot
    startup::seed_default_users(&db).await?;

    // Deadline housekeeping runs in its own task: it closes expired grant
    // calls and flags overdue project milestones
    let scheduler_db = db.clone();
    tokio::spawn(async move {
        if let Err(e) = deadlines::start_scheduler(scheduler_db).await {
            tracing::error!("Deadline scheduler error: {}", e);
        }
    });

    let state = AppState::new(db, TokenService::from_config(&config));

    let app = server::router::router()
        .with_state(state)
        .layer(startup::cors_layer(&config)?);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
