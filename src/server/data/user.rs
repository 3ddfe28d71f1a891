use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::user::{CreateUserParams, UpdateUserParams};

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new user account.
    pub async fn create(&self, params: CreateUserParams) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            email: ActiveValue::Set(params.email),
            name: ActiveValue::Set(params.name),
            role: ActiveValue::Set(params.role.as_str().to_string()),
            status: ActiveValue::Set("active".to_string()),
            password_hash: ActiveValue::Set(params.password_hash),
            biodata: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id).one(self.db).await
    }

    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// Gets all users ordered by creation time.
    pub async fn get_all(&self) -> Result<Vec<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .order_by_asc(entity::user::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find().count(self.db).await
    }

    /// Updates name, role, and/or status. Returns None when the user does
    /// not exist.
    pub async fn update(
        &self,
        id: i32,
        params: UpdateUserParams,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = user.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(role) = params.role {
            active.role = ActiveValue::Set(role.as_str().to_string());
        }
        if let Some(status) = params.status {
            active.status = ActiveValue::Set(status);
        }

        Ok(Some(active.update(self.db).await?))
    }

    /// Replaces the stored password hash.
    pub async fn update_password(
        &self,
        id: i32,
        password_hash: String,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = user.into();
        active.password_hash = ActiveValue::Set(password_hash);

        Ok(Some(active.update(self.db).await?))
    }

    /// Replaces the user's biodata profile.
    pub async fn update_biodata(
        &self,
        id: i32,
        biodata: entity::user::Biodata,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = user.into();
        active.biodata = ActiveValue::Set(Some(biodata));

        Ok(Some(active.update(self.db).await?))
    }

    /// Deletes a user; returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::User::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
