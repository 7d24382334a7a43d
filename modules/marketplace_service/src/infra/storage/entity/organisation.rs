//! Buyer and seller organisations

pub mod buyer_organisation {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "buyer_organisations")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub company_name: String,
        pub company_email: Option<String>,
        pub company_phone: Option<String>,
        pub remarks: Option<String>,
        pub created_by: Uuid,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod seller_organisation {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "seller_organisations")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub company_name: String,
        /// Unique
        pub company_email: String,
        /// Unique
        pub company_phone: String,
        pub company_address: Option<String>,
        pub website: Option<String>,
        pub remarks: Option<String>,
        pub status: String,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::seller_contact::Entity")]
        SellerContact,
        #[sea_orm(has_many = "super::seller_branch_location::Entity")]
        SellerBranchLocation,
    }

    impl Related<super::seller_contact::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::SellerContact.def()
        }
    }

    impl Related<super::seller_branch_location::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::SellerBranchLocation.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod seller_contact {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "seller_contacts")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub seller_organisation_id: Uuid,
        pub name: String,
        /// Unique
        pub email: String,
        /// Unique
        pub phone: String,
        pub department: Option<String>,
        pub role: Option<String>,
        pub status: String,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::seller_organisation::Entity",
            from = "Column::SellerOrganisationId",
            to = "super::seller_organisation::Column::Id"
        )]
        SellerOrganisation,
    }

    impl Related<super::seller_organisation::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::SellerOrganisation.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod seller_branch_location {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "seller_branch_locations")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub seller_organisation_id: Uuid,
        pub branch_name: String,
        pub branch_address: String,
        pub status: String,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::seller_organisation::Entity",
            from = "Column::SellerOrganisationId",
            to = "super::seller_organisation::Column::Id"
        )]
        SellerOrganisation,
    }

    impl Related<super::seller_organisation::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::SellerOrganisation.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod seller_payment_term {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "seller_payment_terms")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        /// Unique, one term per organisation
        pub seller_organisation_id: Uuid,
        pub payment_method: String,
        pub bank_name: Option<String>,
        pub bank_account_holder: Option<String>,
        /// Unique when present
        pub bank_account_number: Option<String>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
