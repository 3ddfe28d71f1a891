use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GrantCall::Table)
                    .if_not_exists()
                    .col(pk_auto(GrantCall::Id))
                    .col(string(GrantCall::Title))
                    .col(string(GrantCall::GrantType))
                    .col(string(GrantCall::Sponsor))
                    .col(string(GrantCall::Scope))
                    .col(string(GrantCall::Status))
                    .col(timestamp_with_time_zone(GrantCall::Deadline))
                    .col(string(GrantCall::Eligibility))
                    .col(string(GrantCall::Requirements))
                    .col(string(GrantCall::Visibility))
                    .col(timestamp_with_time_zone(GrantCall::CreatedAt))
                    .col(timestamp_with_time_zone(GrantCall::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GrantCall::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GrantCall {
    Table,
    Id,
    Title,
    GrantType,
    Sponsor,
    Scope,
    Status,
    Deadline,
    Eligibility,
    Requirements,
    Visibility,
    CreatedAt,
    UpdatedAt,
}
