//! User administration and profile management.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::user::{CreateUserParams, Role, UpdateUserParams},
    util::random,
};

const TEMP_PASSWORD_LENGTH: usize = 12;
const BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a user with a bcrypt-hashed password. Duplicate emails are a
    /// 400.
    pub async fn create(
        &self,
        name: String,
        email: String,
        password: &str,
        role: Role,
    ) -> Result<entity::user::Model, AppError> {
        let user_repo = UserRepository::new(self.db);

        if user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::BadRequest(format!(
                "A user with email {} already exists",
                email
            )));
        }

        let password_hash = bcrypt::hash(password, BCRYPT_COST)?;

        Ok(user_repo
            .create(CreateUserParams {
                name,
                email,
                password_hash,
                role,
            })
            .await?)
    }

    pub async fn get_all(&self) -> Result<Vec<entity::user::Model>, AppError> {
        Ok(UserRepository::new(self.db).get_all().await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<entity::user::Model, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateUserParams,
    ) -> Result<entity::user::Model, AppError> {
        UserRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !UserRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }

    /// Resets a user's password to a generated temporary value and returns
    /// the plaintext once.
    pub async fn reset_password(&self, id: i32) -> Result<String, AppError> {
        let temporary = random::alphanumeric_token(TEMP_PASSWORD_LENGTH);
        let password_hash = bcrypt::hash(&temporary, BCRYPT_COST)?;

        UserRepository::new(self.db)
            .update_password(id, password_hash)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        Ok(temporary)
    }

    /// Replaces the caller's own biodata profile.
    pub async fn update_biodata(
        &self,
        id: i32,
        biodata: entity::user::Biodata,
    ) -> Result<entity::user::Model, AppError> {
        UserRepository::new(self.db)
            .update_biodata(id, biodata)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }
}
