//! Grant call management.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::grant_call::GrantCallRepository,
    error::AppError,
    model::grant_call::{
        CreateGrantCallParams, GrantCallFilter, GrantCallStatus, UpdateGrantCallParams,
    },
};

pub struct GrantCallService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GrantCallService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: CreateGrantCallParams,
    ) -> Result<entity::grant_call::Model, AppError> {
        Ok(GrantCallRepository::new(self.db).create(params).await?)
    }

    pub async fn get_all(
        &self,
        filter: GrantCallFilter,
    ) -> Result<Vec<entity::grant_call::Model>, AppError> {
        Ok(GrantCallRepository::new(self.db).get_all(filter).await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<entity::grant_call::Model, AppError> {
        GrantCallRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Grant call {} not found", id)))
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateGrantCallParams,
    ) -> Result<entity::grant_call::Model, AppError> {
        if let Some(status) = &params.status {
            if GrantCallStatus::parse(status).is_none() {
                return Err(AppError::BadRequest(format!(
                    "Invalid grant call status: {}",
                    status
                )));
            }
        }

        GrantCallRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Grant call {} not found", id)))
    }

    /// Flips the call between `Open` and `Closed`.
    pub async fn toggle_status(&self, id: i32) -> Result<entity::grant_call::Model, AppError> {
        let repo = GrantCallRepository::new(self.db);

        let call = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Grant call {} not found", id)))?;

        let status = GrantCallStatus::parse(&call.status).ok_or_else(|| {
            AppError::InternalError(format!(
                "Grant call {} has unknown status {}",
                call.id, call.status
            ))
        })?;

        repo.set_status(id, status.toggled())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Grant call {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !GrantCallRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound(format!("Grant call {} not found", id)));
        }
        Ok(())
    }
}
