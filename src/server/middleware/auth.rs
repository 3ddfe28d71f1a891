use axum::http::{header, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{parse_role, Role, STATUS_ACTIVE},
    service::token::{TokenService, TOKEN_TYPE_ACCESS},
    state::AppState,
};

/// Role requirement for an endpoint. A requirement is satisfied by the named
/// role or by `Admin`.
pub enum Permission {
    GrantsManager,
    Admin,
}

/// Resolves the bearer token in the request headers to a user and enforces
/// role requirements.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(state: &'a AppState, headers: &'a HeaderMap) -> Self {
        Self {
            db: &state.db,
            tokens: &state.tokens,
            headers,
        }
    }

    /// Validates the bearer token, loads the user, and checks the required
    /// permissions. Inactive accounts are refused regardless of role.
    pub async fn require(
        &self,
        permissions: &[Permission],
    ) -> Result<entity::user::Model, AppError> {
        let token = bearer_token(self.headers).ok_or(AuthError::MissingToken)?;
        let claims = self.tokens.validate(token, TOKEN_TYPE_ACCESS)?;

        let user_repo = UserRepository::new(self.db);
        let Some(user) = user_repo.find_by_email(&claims.sub).await? else {
            return Err(AuthError::UserNotInDatabase(claims.sub).into());
        };

        if user.status != STATUS_ACTIVE {
            return Err(AuthError::AccountInactive.into());
        }

        let role = parse_role(&user)?;

        for permission in permissions {
            let required = match permission {
                Permission::GrantsManager => Role::GrantsManager,
                Permission::Admin => Role::Admin,
            };

            if !role.satisfies(required) {
                return Err(AuthError::AccessDenied(
                    user.id,
                    format!("endpoint requires the {} role", required.as_str()),
                )
                .into());
            }
        }

        Ok(user)
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
