use axum::http::{HeaderValue, Method};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::AppError,
    model::user::{CreateUserParams, Role},
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Seeds one account per role on an empty user table so a fresh deployment
/// can be logged into. Does nothing once any user exists.
pub async fn seed_default_users(db: &DatabaseConnection) -> Result<(), AppError> {
    let user_repo = UserRepository::new(db);

    if user_repo.count().await? > 0 {
        return Ok(());
    }

    let defaults = [
        ("Researcher", "researcher@grants.edu", Role::Researcher),
        ("Grants Manager", "manager@grants.edu", Role::GrantsManager),
        ("Administrator", "admin@grants.edu", Role::Admin),
    ];

    for (name, email, role) in defaults {
        let password_hash = bcrypt::hash("password123", bcrypt::DEFAULT_COST)?;
        user_repo
            .create(CreateUserParams {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                role,
            })
            .await?;
        tracing::info!("Seeded default {} account {}", role.as_str(), email);
    }

    Ok(())
}

/// Builds the CORS layer from the configured allowed origins. `*` allows
/// any origin; otherwise a comma-separated origin list is parsed.
pub fn cors_layer(config: &Config) -> Result<CorsLayer, AppError> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if config.allowed_origins.trim() == "*" {
        return Ok(layer.allow_origin(Any));
    }

    let mut origins = Vec::new();
    for origin in config.allowed_origins.split(',') {
        let origin = origin.trim();
        if origin.is_empty() {
            continue;
        }
        origins.push(origin.parse::<HeaderValue>().map_err(|_| {
            AppError::InternalError(format!("Invalid allowed origin: {}", origin))
        })?);
    }

    Ok(layer.allow_origin(origins))
}
