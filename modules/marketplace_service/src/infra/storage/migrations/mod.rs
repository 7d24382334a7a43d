//! Database migrations for the marketplace service

use sea_orm_migration::prelude::*;

mod m20250301_000001_create_access;
mod m20250301_000002_create_organisations;
mod m20250301_000003_create_catalog;
mod m20250301_000004_create_tickets;
mod m20250301_000005_create_links;
mod m20250301_000006_create_uom;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_access::Migration),
            Box::new(m20250301_000002_create_organisations::Migration),
            Box::new(m20250301_000003_create_catalog::Migration),
            Box::new(m20250301_000004_create_tickets::Migration),
            Box::new(m20250301_000005_create_links::Migration),
            Box::new(m20250301_000006_create_uom::Migration),
        ]
    }
}

fn uuid_pk<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).uuid().not_null().primary_key().to_owned()
}

fn timestamp<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

async fn unique_index<T, C>(
    manager: &SchemaManager<'_>,
    name: &str,
    table: T,
    col: C,
) -> Result<(), DbErr>
where
    T: IntoIden + 'static,
    C: IntoIden + 'static,
{
    manager
        .create_index(
            Index::create()
                .name(name)
                .table(table)
                .col(col)
                .unique()
                .to_owned(),
        )
        .await
}
