use super::{convert, convert_all, convert_opt};
use crate::contract::{
    BuyerOrganisation, Page, PageRequest, SellerBranchLocation, SellerContact, SellerOrganisation,
    SellerPaymentTerm,
};
use crate::domain::repository::{
    BuyerOrganisationRepository, SellerOrganisationRepository, StorageResult,
};
use crate::infra::storage::entity::{
    buyer_organisation, seller_branch_location, seller_contact, seller_organisation,
    seller_payment_term,
};
use crate::infra::storage::{contains_any, equals_ignore_case, fetch_page};
use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

// ===== Buyer organisations =====

pub struct SeaOrmBuyerOrganisationRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmBuyerOrganisationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BuyerOrganisationRepository for SeaOrmBuyerOrganisationRepository {
    async fn insert(&self, organisation: &BuyerOrganisation) -> StorageResult<BuyerOrganisation> {
        let active: buyer_organisation::ActiveModel = organisation.into();
        let model = buyer_organisation::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        convert(model)
    }

    async fn find(&self, id: Uuid) -> StorageResult<Option<BuyerOrganisation>> {
        convert_opt(buyer_organisation::Entity::find_by_id(id).one(&*self.db).await?)
    }

    async fn list_all(&self) -> StorageResult<Vec<BuyerOrganisation>> {
        let models = buyer_organisation::Entity::find()
            .order_by_asc(buyer_organisation::Column::CompanyName)
            .all(&*self.db)
            .await?;
        convert_all(models)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> StorageResult<u64> {
        let result = buyer_organisation::Entity::delete_many()
            .filter(buyer_organisation::Column::Id.is_in(ids.iter().copied()))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected)
    }
}

// ===== Seller organisations =====

pub struct SeaOrmSellerOrganisationRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSellerOrganisationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SellerOrganisationRepository for SeaOrmSellerOrganisationRepository {
    async fn insert_organisation(
        &self,
        organisation: &SellerOrganisation,
        contacts: &[SellerContact],
        branch_locations: &[SellerBranchLocation],
    ) -> StorageResult<SellerOrganisation> {
        let txn = self.db.begin().await?;

        let active: seller_organisation::ActiveModel = organisation.into();
        let model = seller_organisation::Entity::insert(active)
            .exec_with_returning(&txn)
            .await?;

        if !contacts.is_empty() {
            seller_contact::Entity::insert_many(
                contacts.iter().map(seller_contact::ActiveModel::from),
            )
            .exec_without_returning(&txn)
            .await?;
        }
        if !branch_locations.is_empty() {
            seller_branch_location::Entity::insert_many(
                branch_locations
                    .iter()
                    .map(seller_branch_location::ActiveModel::from),
            )
            .exec_without_returning(&txn)
            .await?;
        }

        txn.commit().await?;
        convert(model)
    }

    async fn find_organisation(&self, id: Uuid) -> StorageResult<Option<SellerOrganisation>> {
        convert_opt(seller_organisation::Entity::find_by_id(id).one(&*self.db).await?)
    }

    async fn list_organisations(&self) -> StorageResult<Vec<SellerOrganisation>> {
        let models = seller_organisation::Entity::find()
            .order_by_asc(seller_organisation::Column::CompanyName)
            .all(&*self.db)
            .await?;
        convert_all(models)
    }

    async fn filter_organisations(&self, search: &str) -> StorageResult<Vec<SellerOrganisation>> {
        use seller_organisation::Column;

        let models = seller_organisation::Entity::find()
            .filter(contains_any::<seller_organisation::Entity, _>(
                &[Column::CompanyName, Column::CompanyEmail, Column::CompanyPhone],
                search,
            ))
            .order_by_asc(Column::CompanyName)
            .all(&*self.db)
            .await?;
        convert_all(models)
    }

    async fn paginate_organisations(
        &self,
        request: &PageRequest,
    ) -> StorageResult<Page<SellerOrganisation>> {
        fetch_page(&self.db, seller_organisation::Entity::find(), request).await
    }

    async fn update_organisation(
        &self,
        organisation: &SellerOrganisation,
    ) -> StorageResult<SellerOrganisation> {
        let active: seller_organisation::ActiveModel = organisation.into();
        let model = seller_organisation::Entity::update(active)
            .exec(&*self.db)
            .await?;
        convert(model)
    }

    async fn delete_organisations(&self, ids: &[Uuid]) -> StorageResult<u64> {
        let result = seller_organisation::Entity::delete_many()
            .filter(seller_organisation::Column::Id.is_in(ids.iter().copied()))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn find_organisation_by_email(
        &self,
        email: &str,
    ) -> StorageResult<Option<SellerOrganisation>> {
        let model = seller_organisation::Entity::find()
            .filter(equals_ignore_case::<seller_organisation::Entity, _>(
                seller_organisation::Column::CompanyEmail,
                email,
            ))
            .one(&*self.db)
            .await?;
        convert_opt(model)
    }

    async fn find_organisation_by_phone(
        &self,
        phone: &str,
    ) -> StorageResult<Option<SellerOrganisation>> {
        let model = seller_organisation::Entity::find()
            .filter(seller_organisation::Column::CompanyPhone.eq(phone))
            .one(&*self.db)
            .await?;
        convert_opt(model)
    }

    async fn find_organisation_by_name(
        &self,
        name: &str,
    ) -> StorageResult<Option<SellerOrganisation>> {
        let model = seller_organisation::Entity::find()
            .filter(equals_ignore_case::<seller_organisation::Entity, _>(
                seller_organisation::Column::CompanyName,
                name,
            ))
            .one(&*self.db)
            .await?;
        convert_opt(model)
    }

    // ===== Contacts =====

    async fn insert_contact(&self, contact: &SellerContact) -> StorageResult<SellerContact> {
        let active: seller_contact::ActiveModel = contact.into();
        let model = seller_contact::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        convert(model)
    }

    async fn find_contact(&self, id: Uuid) -> StorageResult<Option<SellerContact>> {
        convert_opt(seller_contact::Entity::find_by_id(id).one(&*self.db).await?)
    }

    async fn update_contact(&self, contact: &SellerContact) -> StorageResult<SellerContact> {
        let active: seller_contact::ActiveModel = contact.into();
        let model = seller_contact::Entity::update(active).exec(&*self.db).await?;
        convert(model)
    }

    async fn filter_contacts(
        &self,
        organisation_id: Uuid,
        search: &str,
    ) -> StorageResult<Vec<SellerContact>> {
        use seller_contact::Column;

        let models = seller_contact::Entity::find()
            .filter(Column::SellerOrganisationId.eq(organisation_id))
            .filter(contains_any::<seller_contact::Entity, _>(
                &[
                    Column::Name,
                    Column::Email,
                    Column::Phone,
                    Column::Department,
                    Column::Role,
                ],
                search,
            ))
            .order_by_asc(Column::Name)
            .all(&*self.db)
            .await?;
        convert_all(models)
    }

    async fn paginate_contacts(
        &self,
        organisation_id: Uuid,
        request: &PageRequest,
    ) -> StorageResult<Page<SellerContact>> {
        let select = seller_contact::Entity::find()
            .filter(seller_contact::Column::SellerOrganisationId.eq(organisation_id));
        fetch_page(&self.db, select, request).await
    }

    async fn find_contact_by_email(&self, email: &str) -> StorageResult<Option<SellerContact>> {
        let model = seller_contact::Entity::find()
            .filter(equals_ignore_case::<seller_contact::Entity, _>(
                seller_contact::Column::Email,
                email,
            ))
            .one(&*self.db)
            .await?;
        convert_opt(model)
    }

    async fn find_contact_by_phone(&self, phone: &str) -> StorageResult<Option<SellerContact>> {
        let model = seller_contact::Entity::find()
            .filter(seller_contact::Column::Phone.eq(phone))
            .one(&*self.db)
            .await?;
        convert_opt(model)
    }

    // ===== Branch locations =====

    async fn insert_branch(
        &self,
        branch: &SellerBranchLocation,
    ) -> StorageResult<SellerBranchLocation> {
        let active: seller_branch_location::ActiveModel = branch.into();
        let model = seller_branch_location::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        convert(model)
    }

    async fn find_branch(&self, id: Uuid) -> StorageResult<Option<SellerBranchLocation>> {
        convert_opt(
            seller_branch_location::Entity::find_by_id(id)
                .one(&*self.db)
                .await?,
        )
    }

    async fn update_branch(
        &self,
        branch: &SellerBranchLocation,
    ) -> StorageResult<SellerBranchLocation> {
        let active: seller_branch_location::ActiveModel = branch.into();
        let model = seller_branch_location::Entity::update(active)
            .exec(&*self.db)
            .await?;
        convert(model)
    }

    async fn filter_branches(
        &self,
        organisation_id: Uuid,
        search: &str,
    ) -> StorageResult<Vec<SellerBranchLocation>> {
        use seller_branch_location::Column;

        let models = seller_branch_location::Entity::find()
            .filter(Column::SellerOrganisationId.eq(organisation_id))
            .filter(contains_any::<seller_branch_location::Entity, _>(
                &[Column::BranchName, Column::BranchAddress],
                search,
            ))
            .order_by_asc(Column::BranchName)
            .all(&*self.db)
            .await?;
        convert_all(models)
    }

    async fn paginate_branches(
        &self,
        organisation_id: Uuid,
        request: &PageRequest,
    ) -> StorageResult<Page<SellerBranchLocation>> {
        let select = seller_branch_location::Entity::find()
            .filter(seller_branch_location::Column::SellerOrganisationId.eq(organisation_id));
        fetch_page(&self.db, select, request).await
    }

    // ===== Payment terms =====

    async fn insert_payment_term(
        &self,
        term: &SellerPaymentTerm,
    ) -> StorageResult<SellerPaymentTerm> {
        let active: seller_payment_term::ActiveModel = term.into();
        let model = seller_payment_term::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        convert(model)
    }

    async fn find_payment_term_by_organisation(
        &self,
        organisation_id: Uuid,
    ) -> StorageResult<Option<SellerPaymentTerm>> {
        let model = seller_payment_term::Entity::find()
            .filter(seller_payment_term::Column::SellerOrganisationId.eq(organisation_id))
            .one(&*self.db)
            .await?;
        convert_opt(model)
    }

    async fn update_payment_term(
        &self,
        term: &SellerPaymentTerm,
    ) -> StorageResult<SellerPaymentTerm> {
        let active: seller_payment_term::ActiveModel = term.into();
        let model = seller_payment_term::Entity::update(active)
            .exec(&*self.db)
            .await?;
        convert(model)
    }
}
