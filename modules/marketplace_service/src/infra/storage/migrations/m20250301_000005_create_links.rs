use super::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (table, A column, A target table, B column, B target table)
fn link_table(
    table: &'static str,
    a: &'static str,
    a_target: &'static str,
    b: &'static str,
    b_target: &'static str,
) -> TableCreateStatement {
    Table::create()
        .table(Alias::new(table))
        .if_not_exists()
        .col(ColumnDef::new(Alias::new(a)).uuid().not_null())
        .col(ColumnDef::new(Alias::new(b)).uuid().not_null())
        .col(ColumnDef::new(Alias::new("linked_by")).uuid().not_null())
        .col(timestamp(Alias::new("created_at")))
        .primary_key(Index::create().col(Alias::new(a)).col(Alias::new(b)))
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{}_{}", table, a))
                .from(Alias::new(table), Alias::new(a))
                .to(Alias::new(a_target), Alias::new("id"))
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{}_{}", table, b))
                .from(Alias::new(table), Alias::new(b))
                .to(Alias::new(b_target), Alias::new("id"))
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

const LINK_TABLES: [(&str, &str, &str, &str, &str); 4] = [
    (
        "seller_item_sub_categories",
        "seller_item_id",
        "seller_items",
        "sub_category_id",
        "sub_categories",
    ),
    (
        "ticket_body_line_items",
        "ticket_body_id",
        "ticket_bodies",
        "ticket_line_item_id",
        "ticket_line_items",
    ),
    (
        "line_item_seller_items",
        "ticket_line_item_id",
        "ticket_line_items",
        "seller_item_id",
        "seller_items",
    ),
    (
        "ticket_body_labels",
        "ticket_body_id",
        "ticket_bodies",
        "ticket_label_id",
        "ticket_labels",
    ),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (table, a, a_target, b, b_target) in LINK_TABLES {
            manager
                .create_table(link_table(table, a, a_target, b, b_target))
                .await?;
            // Reverse lookups (list by B) scan this index
            manager
                .create_index(
                    Index::create()
                        .name(format!("idx_{}_{}", table, b))
                        .table(Alias::new(table))
                        .col(Alias::new(b))
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (table, ..) in LINK_TABLES {
            manager
                .drop_table(Table::drop().table(Alias::new(table)).to_owned())
                .await?;
        }
        Ok(())
    }
}
