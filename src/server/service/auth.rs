//! Login, token refresh, and password verification.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::STATUS_ACTIVE,
    service::token::{TokenService, TOKEN_TYPE_REFRESH},
};

pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService) -> Self {
        Self { db, tokens }
    }

    /// Verifies credentials and issues a token pair.
    ///
    /// Unknown emails and wrong passwords both map to `InvalidCredentials`;
    /// disabled accounts are refused after the password check so the error
    /// does not reveal whether the password was right.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(entity::user::Model, TokenPair), AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.find_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !bcrypt::verify(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        if user.status != STATUS_ACTIVE {
            return Err(AuthError::AccountInactive.into());
        }

        let pair = self.issue_pair(&user.email)?;
        Ok((user, pair))
    }

    /// Exchanges a valid refresh token for a fresh token pair.
    pub async fn refresh(
        &self,
        refresh_token: &str,
    ) -> Result<(entity::user::Model, TokenPair), AppError> {
        let claims = self.tokens.validate(refresh_token, TOKEN_TYPE_REFRESH)?;

        let user_repo = UserRepository::new(self.db);
        let Some(user) = user_repo.find_by_email(&claims.sub).await? else {
            return Err(AuthError::UserNotInDatabase(claims.sub).into());
        };

        if user.status != STATUS_ACTIVE {
            return Err(AuthError::AccountInactive.into());
        }

        let pair = self.issue_pair(&user.email)?;
        Ok((user, pair))
    }

    fn issue_pair(&self, email: &str) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.tokens.issue_access_token(email)?,
            refresh_token: self.tokens.issue_refresh_token(email)?,
        })
    }
}
