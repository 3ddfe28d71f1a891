use sea_orm_migration::{prelude::*, schema::*};

use super::m20260810_000002_create_grant_call_table::GrantCall;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Application::Table)
                    .if_not_exists()
                    .col(pk_auto(Application::Id))
                    .col(integer(Application::GrantCallId))
                    .col(string(Application::ApplicantName))
                    .col(string(Application::Email))
                    .col(string(Application::ProposalTitle))
                    .col(string_null(Application::Institution))
                    .col(string_null(Application::Department))
                    .col(string_null(Application::ProjectSummary))
                    .col(string_null(Application::Objectives))
                    .col(string_null(Application::Methodology))
                    .col(string_null(Application::ExpectedOutcomes))
                    .col(double_null(Application::BudgetAmount))
                    .col(string_null(Application::BudgetJustification))
                    .col(string_null(Application::Timeline))
                    .col(string(Application::Status))
                    .col(timestamp_with_time_zone(Application::SubmissionDate))
                    .col(string_null(Application::ReviewComments))
                    .col(timestamp_with_time_zone_null(Application::Deadline))
                    .col(integer(Application::RevisionCount))
                    .col(timestamp_with_time_zone_null(
                        Application::OriginalSubmissionDate,
                    ))
                    .col(boolean(Application::IsEditable))
                    .col(string_null(Application::ProposalFileName))
                    .col(big_integer_null(Application::ProposalFileSize))
                    .col(string_null(Application::ProposalFileType))
                    .col(string_null(Application::ProposalFileData))
                    .col(json_null(Application::Biodata))
                    .col(json(Application::ReviewHistory))
                    .col(json_null(Application::AssignedReviewers))
                    .col(json_null(Application::ReviewTokens))
                    .col(json_null(Application::SignoffWorkflow))
                    .col(boolean(Application::AwardLetterGenerated))
                    .col(timestamp_with_time_zone_null(
                        Application::AwardLetterGeneratedAt,
                    ))
                    .col(string_null(Application::AwardLetterFileName))
                    .col(string_null(Application::AwardLetterFileType))
                    .col(string_null(Application::AwardLetterFileData))
                    .col(string_null(Application::ContractFileName))
                    .col(string_null(Application::FinalDecision))
                    .col(timestamp_with_time_zone(Application::CreatedAt))
                    .col(timestamp_with_time_zone(Application::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_grant_call")
                            .from(Application::Table, Application::GrantCallId)
                            .to(GrantCall::Table, GrantCall::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Application::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Application {
    Table,
    Id,
    GrantCallId,
    ApplicantName,
    Email,
    ProposalTitle,
    Institution,
    Department,
    ProjectSummary,
    Objectives,
    Methodology,
    ExpectedOutcomes,
    BudgetAmount,
    BudgetJustification,
    Timeline,
    Status,
    SubmissionDate,
    ReviewComments,
    Deadline,
    RevisionCount,
    OriginalSubmissionDate,
    IsEditable,
    ProposalFileName,
    ProposalFileSize,
    ProposalFileType,
    ProposalFileData,
    Biodata,
    ReviewHistory,
    AssignedReviewers,
    ReviewTokens,
    SignoffWorkflow,
    AwardLetterGenerated,
    AwardLetterGeneratedAt,
    AwardLetterFileName,
    AwardLetterFileType,
    AwardLetterFileData,
    ContractFileName,
    FinalDecision,
    CreatedAt,
    UpdatedAt,
}
