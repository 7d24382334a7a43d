use super::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BuyerOrganisations::Table)
                    .if_not_exists()
                    .col(uuid_pk(BuyerOrganisations::Id))
                    .col(
                        ColumnDef::new(BuyerOrganisations::CompanyName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BuyerOrganisations::CompanyEmail).string())
                    .col(ColumnDef::new(BuyerOrganisations::CompanyPhone).string())
                    .col(ColumnDef::new(BuyerOrganisations::Remarks).text())
                    .col(
                        ColumnDef::new(BuyerOrganisations::CreatedBy)
                            .uuid()
                            .not_null(),
                    )
                    .col(timestamp(BuyerOrganisations::CreatedAt))
                    .col(timestamp(BuyerOrganisations::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SellerOrganisations::Table)
                    .if_not_exists()
                    .col(uuid_pk(SellerOrganisations::Id))
                    .col(
                        ColumnDef::new(SellerOrganisations::CompanyName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SellerOrganisations::CompanyEmail)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SellerOrganisations::CompanyPhone)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SellerOrganisations::CompanyAddress).string())
                    .col(ColumnDef::new(SellerOrganisations::Website).string())
                    .col(ColumnDef::new(SellerOrganisations::Remarks).text())
                    .col(
                        ColumnDef::new(SellerOrganisations::Status)
                            .string()
                            .not_null(),
                    )
                    .col(timestamp(SellerOrganisations::CreatedAt))
                    .col(timestamp(SellerOrganisations::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        unique_index(
            manager,
            "idx_seller_organisations_company_email",
            SellerOrganisations::Table,
            SellerOrganisations::CompanyEmail,
        )
        .await?;
        unique_index(
            manager,
            "idx_seller_organisations_company_phone",
            SellerOrganisations::Table,
            SellerOrganisations::CompanyPhone,
        )
        .await?;

        manager
            .create_table(
                Table::create()
                    .table(SellerContacts::Table)
                    .if_not_exists()
                    .col(uuid_pk(SellerContacts::Id))
                    .col(
                        ColumnDef::new(SellerContacts::SellerOrganisationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SellerContacts::Name).string().not_null())
                    .col(ColumnDef::new(SellerContacts::Email).string().not_null())
                    .col(ColumnDef::new(SellerContacts::Phone).string().not_null())
                    .col(ColumnDef::new(SellerContacts::Department).string())
                    .col(ColumnDef::new(SellerContacts::Role).string())
                    .col(ColumnDef::new(SellerContacts::Status).string().not_null())
                    .col(timestamp(SellerContacts::CreatedAt))
                    .col(timestamp(SellerContacts::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seller_contacts_organisation")
                            .from(SellerContacts::Table, SellerContacts::SellerOrganisationId)
                            .to(SellerOrganisations::Table, SellerOrganisations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        unique_index(
            manager,
            "idx_seller_contacts_email",
            SellerContacts::Table,
            SellerContacts::Email,
        )
        .await?;
        unique_index(
            manager,
            "idx_seller_contacts_phone",
            SellerContacts::Table,
            SellerContacts::Phone,
        )
        .await?;

        manager
            .create_table(
                Table::create()
                    .table(SellerBranchLocations::Table)
                    .if_not_exists()
                    .col(uuid_pk(SellerBranchLocations::Id))
                    .col(
                        ColumnDef::new(SellerBranchLocations::SellerOrganisationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SellerBranchLocations::BranchName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SellerBranchLocations::BranchAddress)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SellerBranchLocations::Status)
                            .string()
                            .not_null(),
                    )
                    .col(timestamp(SellerBranchLocations::CreatedAt))
                    .col(timestamp(SellerBranchLocations::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seller_branch_locations_organisation")
                            .from(
                                SellerBranchLocations::Table,
                                SellerBranchLocations::SellerOrganisationId,
                            )
                            .to(SellerOrganisations::Table, SellerOrganisations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SellerPaymentTerms::Table)
                    .if_not_exists()
                    .col(uuid_pk(SellerPaymentTerms::Id))
                    .col(
                        ColumnDef::new(SellerPaymentTerms::SellerOrganisationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SellerPaymentTerms::PaymentMethod)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SellerPaymentTerms::BankName).string())
                    .col(ColumnDef::new(SellerPaymentTerms::BankAccountHolder).string())
                    .col(ColumnDef::new(SellerPaymentTerms::BankAccountNumber).string())
                    .col(timestamp(SellerPaymentTerms::CreatedAt))
                    .col(timestamp(SellerPaymentTerms::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seller_payment_terms_organisation")
                            .from(
                                SellerPaymentTerms::Table,
                                SellerPaymentTerms::SellerOrganisationId,
                            )
                            .to(SellerOrganisations::Table, SellerOrganisations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        unique_index(
            manager,
            "idx_seller_payment_terms_organisation",
            SellerPaymentTerms::Table,
            SellerPaymentTerms::SellerOrganisationId,
        )
        .await?;
        unique_index(
            manager,
            "idx_seller_payment_terms_account_number",
            SellerPaymentTerms::Table,
            SellerPaymentTerms::BankAccountNumber,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SellerPaymentTerms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SellerBranchLocations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SellerContacts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SellerOrganisations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BuyerOrganisations::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum BuyerOrganisations {
    Table,
    Id,
    CompanyName,
    CompanyEmail,
    CompanyPhone,
    Remarks,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SellerOrganisations {
    Table,
    Id,
    CompanyName,
    CompanyEmail,
    CompanyPhone,
    CompanyAddress,
    Website,
    Remarks,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SellerContacts {
    Table,
    Id,
    SellerOrganisationId,
    Name,
    Email,
    Phone,
    Department,
    Role,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SellerBranchLocations {
    Table,
    Id,
    SellerOrganisationId,
    BranchName,
    BranchAddress,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SellerPaymentTerms {
    Table,
    Id,
    SellerOrganisationId,
    PaymentMethod,
    BankName,
    BankAccountHolder,
    BankAccountNumber,
    CreatedAt,
    UpdatedAt,
}
