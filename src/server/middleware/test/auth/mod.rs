use axum::http::{header, HeaderMap};
use chrono::Duration;
use sea_orm::{DatabaseConnection, DbErr};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, Permission},
    service::token::TokenService,
    state::AppState,
};

mod require;

fn test_state(db: &DatabaseConnection) -> AppState {
    AppState::new(
        db.clone(),
        TokenService::new("test-secret", Duration::minutes(30), Duration::days(7)),
    )
}

fn bearer_headers(state: &AppState, email: &str) -> HeaderMap {
    let token = state.tokens.issue_access_token(email).unwrap();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        format!("Bearer {}", token).parse().unwrap(),
    );
    headers
}
