use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::project::{CreateProjectParams, ProjectStatus, MILESTONE_COMPLETED};

pub struct ProjectRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProjectRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: CreateProjectParams,
    ) -> Result<entity::project::Model, DbErr> {
        let now = Utc::now();
        entity::project::ActiveModel {
            application_id: ActiveValue::Set(params.application_id),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            status: ActiveValue::Set(ProjectStatus::Active.as_str().to_string()),
            start_date: ActiveValue::Set(params.start_date),
            end_date: ActiveValue::Set(params.end_date),
            budget: ActiveValue::Set(params.budget),
            principal_investigator: ActiveValue::Set(params.principal_investigator),
            team_members: ActiveValue::Set(params.team_members.map(entity::project::TeamMembers)),
            milestones: ActiveValue::Set(entity::project::Milestones::default()),
            requisitions: ActiveValue::Set(entity::project::Requisitions::default()),
            partners: ActiveValue::Set(entity::project::Partners::default()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::project::Model>, DbErr> {
        entity::prelude::Project::find_by_id(id).one(self.db).await
    }

    pub async fn get_all(&self) -> Result<Vec<entity::project::Model>, DbErr> {
        entity::prelude::Project::find()
            .order_by_desc(entity::project::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Gets projects created from any of the given applications.
    pub async fn get_for_applications(
        &self,
        application_ids: Vec<i32>,
    ) -> Result<Vec<entity::project::Model>, DbErr> {
        if application_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Project::find()
            .filter(entity::project::Column::ApplicationId.is_in(application_ids))
            .order_by_desc(entity::project::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn set_status(
        &self,
        id: i32,
        status: ProjectStatus,
    ) -> Result<Option<entity::project::Model>, DbErr> {
        let Some(project) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::project::ActiveModel = project.into();
        active.status = ActiveValue::Set(status.as_str().to_string());
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active.update(self.db).await?))
    }

    /// Replaces the milestone list.
    pub async fn update_milestones(
        &self,
        id: i32,
        milestones: entity::project::Milestones,
    ) -> Result<Option<entity::project::Model>, DbErr> {
        let Some(project) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::project::ActiveModel = project.into();
        active.milestones = ActiveValue::Set(milestones);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active.update(self.db).await?))
    }

    /// Replaces the requisition list.
    pub async fn update_requisitions(
        &self,
        id: i32,
        requisitions: entity::project::Requisitions,
    ) -> Result<Option<entity::project::Model>, DbErr> {
        let Some(project) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::project::ActiveModel = project.into();
        active.requisitions = ActiveValue::Set(requisitions);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active.update(self.db).await?))
    }

    /// Replaces the partner list.
    pub async fn update_partners(
        &self,
        id: i32,
        partners: entity::project::Partners,
    ) -> Result<Option<entity::project::Model>, DbErr> {
        let Some(project) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::project::ActiveModel = project.into();
        active.partners = ActiveValue::Set(partners);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active.update(self.db).await?))
    }

    pub async fn set_final_report(
        &self,
        id: i32,
        report: entity::project::FinalReport,
    ) -> Result<Option<entity::project::Model>, DbErr> {
        let Some(project) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::project::ActiveModel = project.into();
        active.final_report = ActiveValue::Set(Some(report));
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active.update(self.db).await?))
    }

    /// Replaces the closure workflow, optionally moving the project status
    /// in the same update.
    pub async fn set_closure_workflow(
        &self,
        id: i32,
        workflow: entity::project::ClosureWorkflow,
        status: Option<ProjectStatus>,
    ) -> Result<Option<entity::project::Model>, DbErr> {
        let Some(project) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::project::ActiveModel = project.into();
        active.closure_workflow = ActiveValue::Set(Some(workflow));
        if let Some(status) = status {
            active.status = ActiveValue::Set(status.as_str().to_string());
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active.update(self.db).await?))
    }

    /// Finds the project whose closure workflow carries the given VC
    /// sign-off token.
    pub async fn find_by_closure_token(
        &self,
        token: &str,
    ) -> Result<Option<entity::project::Model>, DbErr> {
        let candidates = entity::prelude::Project::find()
            .filter(entity::project::Column::ClosureWorkflow.is_not_null())
            .all(self.db)
            .await?;

        Ok(candidates.into_iter().find(|project| {
            project
                .closure_workflow
                .as_ref()
                .is_some_and(|wf| wf.vc_sign_off_token == token)
        }))
    }

    /// Flags overdue milestones on active projects. A milestone is overdue
    /// when its due date has passed, it is not completed, and no progress
    /// report was uploaded. Returns the number of newly flagged milestones.
    pub async fn flag_overdue_milestones(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let projects = entity::prelude::Project::find()
            .filter(entity::project::Column::Status.eq(ProjectStatus::Active.as_str()))
            .all(self.db)
            .await?;

        let mut flagged = 0;
        for project in projects {
            let mut milestones = project.milestones.clone();
            let mut changed = false;

            for milestone in &mut milestones.0 {
                if !milestone.is_overdue
                    && milestone.status != MILESTONE_COMPLETED
                    && !milestone.progress_report_uploaded
                    && milestone.due_date < now
                {
                    milestone.is_overdue = true;
                    changed = true;
                    flagged += 1;
                }
            }

            if changed {
                let mut active: entity::project::ActiveModel = project.into();
                active.milestones = ActiveValue::Set(milestones);
                active.updated_at = ActiveValue::Set(now);
                active.update(self.db).await?;
            }
        }

        Ok(flagged)
    }
}
