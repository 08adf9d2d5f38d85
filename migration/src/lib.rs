pub use sea_orm_migration::prelude::*;

mod m20250903_000001_create_tables;
mod m20251105_000001_create_support_tickets;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250903_000001_create_tables::Migration),
            Box::new(m20251105_000001_create_support_tickets::Migration),
        ]
    }
}
