use sea_orm_migration::{prelude::*, schema::*};

use super::m20260810_000003_create_application_table::Application;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Project::Table)
                    .if_not_exists()
                    .col(pk_auto(Project::Id))
                    .col(integer(Project::ApplicationId))
                    .col(string(Project::Title))
                    .col(string_null(Project::Description))
                    .col(string(Project::Status))
                    .col(timestamp_with_time_zone(Project::StartDate))
                    .col(timestamp_with_time_zone(Project::EndDate))
                    .col(double_null(Project::Budget))
                    .col(string_null(Project::PrincipalInvestigator))
                    .col(json_null(Project::TeamMembers))
                    .col(json(Project::Milestones))
                    .col(json(Project::Requisitions))
                    .col(json(Project::Partners))
                    .col(json_null(Project::FinalReport))
                    .col(json_null(Project::ClosureWorkflow))
                    .col(timestamp_with_time_zone(Project::CreatedAt))
                    .col(timestamp_with_time_zone(Project::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_application")
                            .from(Project::Table, Project::ApplicationId)
                            .to(Application::Table, Application::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Project::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Project {
    Table,
    Id,
    ApplicationId,
    Title,
    Description,
    Status,
    StartDate,
    EndDate,
    Budget,
    PrincipalInvestigator,
    TeamMembers,
    Milestones,
    Requisitions,
    Partners,
    FinalReport,
    ClosureWorkflow,
    CreatedAt,
    UpdatedAt,
}
