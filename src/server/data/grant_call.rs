use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::grant_call::{
    CreateGrantCallParams, GrantCallFilter, GrantCallStatus, UpdateGrantCallParams,
};

pub struct GrantCallRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GrantCallRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: CreateGrantCallParams,
    ) -> Result<entity::grant_call::Model, DbErr> {
        let now = Utc::now();
        entity::grant_call::ActiveModel {
            title: ActiveValue::Set(params.title),
            grant_type: ActiveValue::Set(params.grant_type),
            sponsor: ActiveValue::Set(params.sponsor),
            scope: ActiveValue::Set(params.scope),
            status: ActiveValue::Set(params.status.as_str().to_string()),
            deadline: ActiveValue::Set(params.deadline),
            eligibility: ActiveValue::Set(params.eligibility),
            requirements: ActiveValue::Set(params.requirements),
            visibility: ActiveValue::Set(params.visibility),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::grant_call::Model>, DbErr> {
        entity::prelude::GrantCall::find_by_id(id).one(self.db).await
    }

    /// Gets grant calls, newest deadline first, with optional type and
    /// open-only filters.
    pub async fn get_all(
        &self,
        filter: GrantCallFilter,
    ) -> Result<Vec<entity::grant_call::Model>, DbErr> {
        let mut query = entity::prelude::GrantCall::find()
            .order_by_desc(entity::grant_call::Column::Deadline);

        if let Some(grant_type) = filter.grant_type {
            query = query.filter(entity::grant_call::Column::GrantType.eq(grant_type));
        }
        if filter.open_only {
            query = query.filter(
                entity::grant_call::Column::Status.eq(GrantCallStatus::Open.as_str()),
            );
        }

        query.all(self.db).await
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateGrantCallParams,
    ) -> Result<Option<entity::grant_call::Model>, DbErr> {
        let Some(call) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::grant_call::ActiveModel = call.into();
        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(grant_type) = params.grant_type {
            active.grant_type = ActiveValue::Set(grant_type);
        }
        if let Some(sponsor) = params.sponsor {
            active.sponsor = ActiveValue::Set(sponsor);
        }
        if let Some(scope) = params.scope {
            active.scope = ActiveValue::Set(scope);
        }
        if let Some(status) = params.status {
            active.status = ActiveValue::Set(status);
        }
        if let Some(deadline) = params.deadline {
            active.deadline = ActiveValue::Set(deadline);
        }
        if let Some(eligibility) = params.eligibility {
            active.eligibility = ActiveValue::Set(eligibility);
        }
        if let Some(requirements) = params.requirements {
            active.requirements = ActiveValue::Set(requirements);
        }
        if let Some(visibility) = params.visibility {
            active.visibility = ActiveValue::Set(visibility);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active.update(self.db).await?))
    }

    pub async fn set_status(
        &self,
        id: i32,
        status: GrantCallStatus,
    ) -> Result<Option<entity::grant_call::Model>, DbErr> {
        let Some(call) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::grant_call::ActiveModel = call.into();
        active.status = ActiveValue::Set(status.as_str().to_string());
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active.update(self.db).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::GrantCall::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Closes every open call whose deadline has passed. Returns the number
    /// of calls closed.
    pub async fn close_expired(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let expired = entity::prelude::GrantCall::find()
            .filter(entity::grant_call::Column::Status.eq(GrantCallStatus::Open.as_str()))
            .filter(entity::grant_call::Column::Deadline.lt(now))
            .all(self.db)
            .await?;

        let count = expired.len() as u64;
        for call in expired {
            let mut active: entity::grant_call::ActiveModel = call.into();
            active.status = ActiveValue::Set(GrantCallStatus::Closed.as_str().to_string());
            active.updated_at = ActiveValue::Set(now);
            active.update(self.db).await?;
        }

        Ok(count)
    }
}
