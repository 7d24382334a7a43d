use super::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SellerItems::Table)
                    .if_not_exists()
                    .col(uuid_pk(SellerItems::Id))
                    .col(ColumnDef::new(SellerItems::SellerOrganisationId).uuid())
                    .col(ColumnDef::new(SellerItems::ProductTitle).string().not_null())
                    .col(ColumnDef::new(SellerItems::BrandModel).string())
                    .col(ColumnDef::new(SellerItems::ModelNumber).string())
                    .col(ColumnDef::new(SellerItems::Description).text())
                    .col(ColumnDef::new(SellerItems::Status).string().not_null())
                    .col(timestamp(SellerItems::CreatedAt))
                    .col(timestamp(SellerItems::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seller_items_organisation")
                            .from(SellerItems::Table, SellerItems::SellerOrganisationId)
                            .to(SellerOrganisations::Table, SellerOrganisations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MainCategories::Table)
                    .if_not_exists()
                    .col(uuid_pk(MainCategories::Id))
                    .col(ColumnDef::new(MainCategories::ExternalId).string().not_null())
                    .col(ColumnDef::new(MainCategories::Title).string().not_null())
                    .col(timestamp(MainCategories::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        unique_index(
            manager,
            "idx_main_categories_external_id",
            MainCategories::Table,
            MainCategories::ExternalId,
        )
        .await?;

        manager
            .create_table(
                Table::create()
                    .table(SubCategories::Table)
                    .if_not_exists()
                    .col(uuid_pk(SubCategories::Id))
                    .col(ColumnDef::new(SubCategories::ExternalId).string().not_null())
                    .col(
                        ColumnDef::new(SubCategories::MainCategoryId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SubCategories::Title).string().not_null())
                    .col(timestamp(SubCategories::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sub_categories_main")
                            .from(SubCategories::Table, SubCategories::MainCategoryId)
                            .to(MainCategories::Table, MainCategories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        unique_index(
            manager,
            "idx_sub_categories_external_id",
            SubCategories::Table,
            SubCategories::ExternalId,
        )
        .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventLogs::Table)
                    .if_not_exists()
                    .col(uuid_pk(EventLogs::Id))
                    .col(ColumnDef::new(EventLogs::EventType).string().not_null())
                    .col(ColumnDef::new(EventLogs::EntityName).string().not_null())
                    .col(ColumnDef::new(EventLogs::Detail).text())
                    .col(timestamp(EventLogs::CreatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_event_logs_type_entity")
                    .table(EventLogs::Table)
                    .col(EventLogs::EventType)
                    .col(EventLogs::EntityName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MainCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SellerItems::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum SellerItems {
    Table,
    Id,
    SellerOrganisationId,
    ProductTitle,
    BrandModel,
    ModelNumber,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SellerOrganisations {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum MainCategories {
    Table,
    Id,
    ExternalId,
    Title,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SubCategories {
    Table,
    Id,
    ExternalId,
    MainCategoryId,
    Title,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EventLogs {
    Table,
    Id,
    EventType,
    EntityName,
    Detail,
    CreatedAt,
}
