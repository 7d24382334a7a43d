use super::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketBodies::Table)
                    .if_not_exists()
                    .col(uuid_pk(TicketBodies::Id))
                    .col(
                        ColumnDef::new(TicketBodies::BuyerOrganisationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TicketBodies::Title).string().not_null())
                    .col(ColumnDef::new(TicketBodies::Priority).string().not_null())
                    .col(ColumnDef::new(TicketBodies::Deadline).timestamp_with_time_zone())
                    .col(ColumnDef::new(TicketBodies::Status).string().not_null())
                    .col(ColumnDef::new(TicketBodies::OwnerId).uuid())
                    .col(ColumnDef::new(TicketBodies::VoidRemark).text())
                    .col(ColumnDef::new(TicketBodies::CreatedBy).uuid().not_null())
                    .col(timestamp(TicketBodies::CreatedAt))
                    .col(timestamp(TicketBodies::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_bodies_buyer_organisation")
                            .from(TicketBodies::Table, TicketBodies::BuyerOrganisationId)
                            .to(BuyerOrganisations::Table, BuyerOrganisations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_bodies_owner")
                            .from(TicketBodies::Table, TicketBodies::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_bodies_buyer_organisation")
                    .table(TicketBodies::Table)
                    .col(TicketBodies::BuyerOrganisationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TicketLineItems::Table)
                    .if_not_exists()
                    .col(uuid_pk(TicketLineItems::Id))
                    .col(ColumnDef::new(TicketLineItems::ItemName).string().not_null())
                    .col(ColumnDef::new(TicketLineItems::Quantity).integer().not_null())
                    .col(ColumnDef::new(TicketLineItems::BudgetCents).big_integer())
                    .col(ColumnDef::new(TicketLineItems::Deadline).timestamp_with_time_zone())
                    .col(ColumnDef::new(TicketLineItems::SourcingRemarks).text())
                    .col(
                        ColumnDef::new(TicketLineItems::SourcingStatus)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TicketLineItems::OwnerId).uuid())
                    .col(ColumnDef::new(TicketLineItems::CreatedBy).uuid().not_null())
                    .col(timestamp(TicketLineItems::CreatedAt))
                    .col(timestamp(TicketLineItems::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_line_items_owner")
                            .from(TicketLineItems::Table, TicketLineItems::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TicketLabels::Table)
                    .if_not_exists()
                    .col(uuid_pk(TicketLabels::Id))
                    .col(ColumnDef::new(TicketLabels::Title).string().not_null())
                    .col(ColumnDef::new(TicketLabels::Description).text())
                    .col(timestamp(TicketLabels::CreatedAt))
                    .col(timestamp(TicketLabels::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(uuid_pk(Comments::Id))
                    .col(ColumnDef::new(Comments::TargetType).string().not_null())
                    .col(ColumnDef::new(Comments::TargetId).uuid().not_null())
                    .col(ColumnDef::new(Comments::Message).text().not_null())
                    .col(ColumnDef::new(Comments::CreatedBy).uuid().not_null())
                    .col(timestamp(Comments::CreatedAt))
                    .col(timestamp(Comments::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_comments_target")
                    .table(Comments::Table)
                    .col(Comments::TargetType)
                    .col(Comments::TargetId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TicketLabels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TicketLineItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TicketBodies::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum TicketBodies {
    Table,
    Id,
    BuyerOrganisationId,
    Title,
    Priority,
    Deadline,
    Status,
    OwnerId,
    VoidRemark,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TicketLineItems {
    Table,
    Id,
    ItemName,
    Quantity,
    BudgetCents,
    Deadline,
    SourcingRemarks,
    SourcingStatus,
    OwnerId,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TicketLabels {
    Table,
    Id,
    Title,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    TargetType,
    TargetId,
    Message,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BuyerOrganisations {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
