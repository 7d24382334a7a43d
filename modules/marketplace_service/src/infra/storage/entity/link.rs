//! Join tables of the many-to-many relations
//!
//! Each table has a composite primary key over the (A, B) pair, so a
//! duplicate link is a unique violation.

/// Seller item (A) in sub-category (B)
pub mod seller_item_sub_category {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "seller_item_sub_categories")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub seller_item_id: Uuid,
        #[sea_orm(primary_key, auto_increment = false)]
        pub sub_category_id: Uuid,
        pub linked_by: Uuid,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Ticket body (A) holding line item (B)
pub mod ticket_body_line_item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "ticket_body_line_items")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub ticket_body_id: Uuid,
        #[sea_orm(primary_key, auto_increment = false)]
        pub ticket_line_item_id: Uuid,
        pub linked_by: Uuid,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Line item (A) matched to seller item (B)
pub mod line_item_seller_item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "line_item_seller_items")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub ticket_line_item_id: Uuid,
        #[sea_orm(primary_key, auto_increment = false)]
        pub seller_item_id: Uuid,
        pub linked_by: Uuid,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Ticket body (A) tagged with label (B)
pub mod ticket_body_label {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "ticket_body_labels")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub ticket_body_id: Uuid,
        #[sea_orm(primary_key, auto_increment = false)]
        pub ticket_label_id: Uuid,
        pub linked_by: Uuid,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
