use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::{
    application::{ApplicationFilter, CreateApplicationParams, UpdateApplicationParams},
    status::ApplicationStatus,
};

pub struct ApplicationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApplicationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new submitted application. `deadline` is a snapshot of the
    /// grant call deadline used to gate withdrawal.
    pub async fn create(
        &self,
        params: CreateApplicationParams,
        deadline: Option<DateTime<Utc>>,
    ) -> Result<entity::application::Model, DbErr> {
        let now = Utc::now();
        entity::application::ActiveModel {
            grant_call_id: ActiveValue::Set(params.grant_call_id),
            applicant_name: ActiveValue::Set(params.applicant_name),
            email: ActiveValue::Set(params.email),
            proposal_title: ActiveValue::Set(params.proposal_title),
            institution: ActiveValue::Set(params.institution),
            department: ActiveValue::Set(params.department),
            project_summary: ActiveValue::Set(params.project_summary),
            objectives: ActiveValue::Set(params.objectives),
            methodology: ActiveValue::Set(params.methodology),
            expected_outcomes: ActiveValue::Set(params.expected_outcomes),
            budget_amount: ActiveValue::Set(params.budget_amount),
            budget_justification: ActiveValue::Set(params.budget_justification),
            timeline: ActiveValue::Set(params.timeline),
            status: ActiveValue::Set(ApplicationStatus::Submitted.as_str().to_string()),
            submission_date: ActiveValue::Set(now),
            deadline: ActiveValue::Set(deadline),
            revision_count: ActiveValue::Set(0),
            original_submission_date: ActiveValue::Set(Some(now)),
            is_editable: ActiveValue::Set(false),
            proposal_file_name: ActiveValue::Set(params.proposal_file_name),
            proposal_file_size: ActiveValue::Set(params.proposal_file_size),
            proposal_file_type: ActiveValue::Set(params.proposal_file_type),
            proposal_file_data: ActiveValue::Set(params.proposal_file_data),
            biodata: ActiveValue::Set(params.biodata),
            review_history: ActiveValue::Set(entity::application::ReviewHistory::default()),
            award_letter_generated: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::application::Model>, DbErr> {
        entity::prelude::Application::find_by_id(id).one(self.db).await
    }

    /// Gets applications, newest submission first, with optional status,
    /// grant call, and applicant email filters.
    pub async fn get_all(
        &self,
        filter: ApplicationFilter,
    ) -> Result<Vec<entity::application::Model>, DbErr> {
        let mut query = entity::prelude::Application::find()
            .order_by_desc(entity::application::Column::SubmissionDate);

        if let Some(status) = filter.status {
            query = query.filter(entity::application::Column::Status.eq(status));
        }
        if let Some(grant_call_id) = filter.grant_call_id {
            query = query.filter(entity::application::Column::GrantCallId.eq(grant_call_id));
        }
        if let Some(email) = filter.email {
            query = query.filter(entity::application::Column::Email.eq(email));
        }

        query.all(self.db).await
    }

    /// Updates the applicant-editable fields.
    pub async fn update_fields(
        &self,
        id: i32,
        params: UpdateApplicationParams,
    ) -> Result<Option<entity::application::Model>, DbErr> {
        let Some(application) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::application::ActiveModel = application.into();
        if let Some(proposal_title) = params.proposal_title {
            active.proposal_title = ActiveValue::Set(proposal_title);
        }
        if let Some(institution) = params.institution {
            active.institution = ActiveValue::Set(Some(institution));
        }
        if let Some(department) = params.department {
            active.department = ActiveValue::Set(Some(department));
        }
        if let Some(project_summary) = params.project_summary {
            active.project_summary = ActiveValue::Set(Some(project_summary));
        }
        if let Some(objectives) = params.objectives {
            active.objectives = ActiveValue::Set(Some(objectives));
        }
        if let Some(methodology) = params.methodology {
            active.methodology = ActiveValue::Set(Some(methodology));
        }
        if let Some(expected_outcomes) = params.expected_outcomes {
            active.expected_outcomes = ActiveValue::Set(Some(expected_outcomes));
        }
        if let Some(budget_amount) = params.budget_amount {
            active.budget_amount = ActiveValue::Set(Some(budget_amount));
        }
        if let Some(budget_justification) = params.budget_justification {
            active.budget_justification = ActiveValue::Set(Some(budget_justification));
        }
        if let Some(timeline) = params.timeline {
            active.timeline = ActiveValue::Set(Some(timeline));
        }
        if let Some(proposal_file_name) = params.proposal_file_name {
            active.proposal_file_name = ActiveValue::Set(Some(proposal_file_name));
        }
        if let Some(proposal_file_size) = params.proposal_file_size {
            active.proposal_file_size = ActiveValue::Set(Some(proposal_file_size));
        }
        if let Some(proposal_file_type) = params.proposal_file_type {
            active.proposal_file_type = ActiveValue::Set(Some(proposal_file_type));
        }
        if let Some(proposal_file_data) = params.proposal_file_data {
            active.proposal_file_data = ActiveValue::Set(Some(proposal_file_data));
        }
        if let Some(biodata) = params.biodata {
            active.biodata = ActiveValue::Set(Some(biodata));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active.update(self.db).await?))
    }

    /// Sets the workflow status. `is_editable` is derived from the status;
    /// review comments and the final decision are recorded when provided.
    pub async fn set_status(
        &self,
        id: i32,
        status: ApplicationStatus,
        comments: Option<String>,
    ) -> Result<Option<entity::application::Model>, DbErr> {
        let Some(application) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::application::ActiveModel = application.into();
        active.status = ActiveValue::Set(status.as_str().to_string());
        active.is_editable = ActiveValue::Set(status.is_editable());
        if let Some(comments) = comments {
            active.review_comments = ActiveValue::Set(Some(comments.clone()));
            active.final_decision = ActiveValue::Set(Some(status.as_str().to_string()));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active.update(self.db).await?))
    }

    /// Records a researcher resubmission: back to `submitted`, revision
    /// count bumped, submission date refreshed, original date preserved.
    pub async fn resubmit(
        &self,
        id: i32,
    ) -> Result<Option<entity::application::Model>, DbErr> {
        let Some(application) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let original = application
            .original_submission_date
            .unwrap_or(application.submission_date);
        let revision_count = application.revision_count + 1;

        let mut active: entity::application::ActiveModel = application.into();
        active.status = ActiveValue::Set(ApplicationStatus::Submitted.as_str().to_string());
        active.is_editable = ActiveValue::Set(false);
        active.submission_date = ActiveValue::Set(now);
        active.original_submission_date = ActiveValue::Set(Some(original));
        active.revision_count = ActiveValue::Set(revision_count);
        active.updated_at = ActiveValue::Set(now);

        Ok(Some(active.update(self.db).await?))
    }

    /// Appends a reviewer feedback entry, optionally transitioning the
    /// status at the same time.
    pub async fn append_review_entry(
        &self,
        id: i32,
        entry: entity::application::ReviewEntry,
        new_status: Option<ApplicationStatus>,
    ) -> Result<Option<entity::application::Model>, DbErr> {
        let Some(application) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut history = application.review_history.clone();
        history.0.push(entry);

        let mut active: entity::application::ActiveModel = application.into();
        active.review_history = ActiveValue::Set(history);
        if let Some(status) = new_status {
            active.status = ActiveValue::Set(status.as_str().to_string());
            active.is_editable = ActiveValue::Set(status.is_editable());
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active.update(self.db).await?))
    }

    /// Stores the assigned reviewer emails and their access tokens.
    pub async fn assign_reviewers(
        &self,
        id: i32,
        reviewers: entity::application::AssignedReviewers,
        tokens: entity::application::ReviewTokens,
    ) -> Result<Option<entity::application::Model>, DbErr> {
        let Some(application) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::application::ActiveModel = application.into();
        active.assigned_reviewers = ActiveValue::Set(Some(reviewers));
        active.review_tokens = ActiveValue::Set(Some(tokens));
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active.update(self.db).await?))
    }

    /// Finds the application carrying the given reviewer access token.
    ///
    /// Tokens live inside a JSON column, so candidates are narrowed in SQL
    /// and matched in Rust.
    pub async fn find_by_review_token(
        &self,
        token: &str,
    ) -> Result<Option<entity::application::Model>, DbErr> {
        let candidates = entity::prelude::Application::find()
            .filter(entity::application::Column::ReviewTokens.is_not_null())
            .all(self.db)
            .await?;

        Ok(candidates.into_iter().find(|application| {
            application
                .review_tokens
                .as_ref()
                .is_some_and(|tokens| tokens.0.iter().any(|t| t.token == token))
        }))
    }

    /// Replaces the sign-off workflow and moves the application to the
    /// given status in one update.
    pub async fn set_signoff_workflow(
        &self,
        id: i32,
        workflow: entity::application::SignoffWorkflow,
        status: ApplicationStatus,
    ) -> Result<Option<entity::application::Model>, DbErr> {
        let Some(application) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::application::ActiveModel = application.into();
        active.signoff_workflow = ActiveValue::Set(Some(workflow));
        active.status = ActiveValue::Set(status.as_str().to_string());
        active.is_editable = ActiveValue::Set(status.is_editable());
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active.update(self.db).await?))
    }

    /// Finds the application whose sign-off workflow carries the given
    /// approver token.
    pub async fn find_by_signoff_token(
        &self,
        token: &str,
    ) -> Result<Option<entity::application::Model>, DbErr> {
        let candidates = entity::prelude::Application::find()
            .filter(entity::application::Column::SignoffWorkflow.is_not_null())
            .all(self.db)
            .await?;

        Ok(candidates.into_iter().find(|application| {
            application
                .signoff_workflow
                .as_ref()
                .is_some_and(|wf| wf.approvals.iter().any(|a| a.token == token))
        }))
    }

    /// Stores the generated award letter and moves the application to
    /// `award_pending_acceptance`.
    pub async fn store_award_letter(
        &self,
        id: i32,
        file_name: String,
        file_type: String,
        file_data: String,
    ) -> Result<Option<entity::application::Model>, DbErr> {
        let Some(application) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let mut active: entity::application::ActiveModel = application.into();
        active.award_letter_generated = ActiveValue::Set(true);
        active.award_letter_generated_at = ActiveValue::Set(Some(now));
        active.award_letter_file_name = ActiveValue::Set(Some(file_name));
        active.award_letter_file_type = ActiveValue::Set(Some(file_type));
        active.award_letter_file_data = ActiveValue::Set(Some(file_data));
        active.status = ActiveValue::Set(
            ApplicationStatus::AwardPendingAcceptance.as_str().to_string(),
        );
        active.is_editable = ActiveValue::Set(false);
        active.updated_at = ActiveValue::Set(now);

        Ok(Some(active.update(self.db).await?))
    }

    /// Records the received contract file and moves the application to
    /// `contract_received`.
    pub async fn set_contract_file(
        &self,
        id: i32,
        file_name: String,
    ) -> Result<Option<entity::application::Model>, DbErr> {
        let Some(application) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::application::ActiveModel = application.into();
        active.contract_file_name = ActiveValue::Set(Some(file_name));
        active.status =
            ActiveValue::Set(ApplicationStatus::ContractReceived.as_str().to_string());
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active.update(self.db).await?))
    }
}
