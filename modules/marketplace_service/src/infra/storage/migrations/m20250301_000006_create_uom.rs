use super::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UomReferences::Table)
                    .if_not_exists()
                    .col(uuid_pk(UomReferences::Id))
                    .col(ColumnDef::new(UomReferences::UomCode).string().not_null())
                    .col(ColumnDef::new(UomReferences::Description).string().not_null())
                    .col(timestamp(UomReferences::CreatedAt))
                    .to_owned(),
            )
            .await?;
        unique_index(
            manager,
            "idx_uom_references_uom_code",
            UomReferences::Table,
            UomReferences::UomCode,
        )
        .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UomReferences::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UomReferences {
    Table,
    Id,
    UomCode,
    Description,
    CreatedAt,
}
