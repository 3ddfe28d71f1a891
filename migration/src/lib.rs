pub use sea_orm_migration::prelude::*;

mod m20260810_000001_create_user_table;
mod m20260810_000002_create_grant_call_table;
mod m20260810_000003_create_application_table;
mod m20260810_000004_create_project_table;
mod m20260810_000005_create_document_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260810_000001_create_user_table::Migration),
            Box::new(m20260810_000002_create_grant_call_table::Migration),
            Box::new(m20260810_000003_create_application_table::Migration),
            Box::new(m20260810_000004_create_project_table::Migration),
            Box::new(m20260810_000005_create_document_table::Migration),
        ]
    }
}
