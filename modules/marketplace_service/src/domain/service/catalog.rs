//! Seller item catalog

use super::PagingPolicy;
use crate::contract::{
    LifecycleStatus, MarketplaceError, Page, PageRequest, SellerItem, SellerItemFields,
    SellerItemSearchField,
};
use crate::domain::repository::{
    CategoryRepository, SellerItemRepository, SellerOrganisationRepository,
};
use crate::domain::validation::{normalize_optional, require_text};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct SellerItemService {
    item_repo: Arc<dyn SellerItemRepository>,
    seller_repo: Arc<dyn SellerOrganisationRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    paging: PagingPolicy,
}

impl SellerItemService {
    pub fn new(
        item_repo: Arc<dyn SellerItemRepository>,
        seller_repo: Arc<dyn SellerOrganisationRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        paging: PagingPolicy,
    ) -> Self {
        Self {
            item_repo,
            seller_repo,
            category_repo,
            paging,
        }
    }

    /// Create an item and link it to the given sub-categories
    pub async fn create(
        &self,
        fields: SellerItemFields,
        sub_category_ids: &[Uuid],
        acting_user: Uuid,
    ) -> Result<SellerItem, MarketplaceError> {
        require_text("productTitle", &fields.product_title)?;
        self.ensure_organisation(fields.seller_organisation_id).await?;

        let found = self.category_repo.find_subs(sub_category_ids).await?;
        if let Some(missing) = sub_category_ids
            .iter()
            .find(|id| !found.iter().any(|sub| sub.id == **id))
        {
            return Err(MarketplaceError::not_found("sub_category", missing));
        }

        let now = Utc::now();
        let mut item = SellerItem {
            id: Uuid::new_v4(),
            seller_organisation_id: None,
            product_title: String::new(),
            brand_model: None,
            model_number: None,
            description: None,
            status: LifecycleStatus::Active,
            created_at: now,
            updated_at: now,
        };
        apply_fields(&mut item, fields);

        let created = self
            .item_repo
            .insert(&item, sub_category_ids, acting_user)
            .await?;
        tracing::info!(
            seller_item_id = %created.id,
            sub_categories = sub_category_ids.len(),
            "seller item created"
        );
        Ok(created)
    }

    pub async fn get(&self, id: Uuid) -> Result<SellerItem, MarketplaceError> {
        self.item_repo
            .find(id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("seller_item", id))
    }

    pub async fn update(
        &self,
        id: Uuid,
        fields: SellerItemFields,
    ) -> Result<SellerItem, MarketplaceError> {
        require_text("productTitle", &fields.product_title)?;
        self.ensure_organisation(fields.seller_organisation_id).await?;

        let mut item = self.get(id).await?;
        apply_fields(&mut item, fields);
        item.updated_at = Utc::now();
        Ok(self.item_repo.update(&item).await?)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: LifecycleStatus,
    ) -> Result<SellerItem, MarketplaceError> {
        let mut item = self.get(id).await?;
        item.status = status;
        item.updated_at = Utc::now();
        Ok(self.item_repo.update(&item).await?)
    }

    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, MarketplaceError> {
        Ok(self.item_repo.delete_many(ids).await?)
    }

    /// Substring match on product title, brand model or model number
    pub async fn filter(&self, search: &str) -> Result<Vec<SellerItem>, MarketplaceError> {
        self.filter_by(SellerItemSearchField::Any, search).await
    }

    pub async fn filter_by(
        &self,
        field: SellerItemSearchField,
        search: &str,
    ) -> Result<Vec<SellerItem>, MarketplaceError> {
        Ok(self.item_repo.filter(field, search.trim()).await?)
    }

    pub async fn paginate(
        &self,
        request: &PageRequest,
    ) -> Result<Page<SellerItem>, MarketplaceError> {
        self.paging.check(request)?;
        Ok(self.item_repo.paginate(request).await?)
    }

    async fn ensure_organisation(&self, id: Option<Uuid>) -> Result<(), MarketplaceError> {
        let Some(id) = id else {
            return Ok(());
        };
        if self.seller_repo.find_organisation(id).await?.is_none() {
            return Err(MarketplaceError::not_found("seller_organisation", id));
        }
        Ok(())
    }
}

fn apply_fields(item: &mut SellerItem, fields: SellerItemFields) {
    item.seller_organisation_id = fields.seller_organisation_id;
    item.product_title = fields.product_title.trim().to_string();
    item.brand_model = normalize_optional(fields.brand_model);
    item.model_number = normalize_optional(fields.model_number);
    item.description = normalize_optional(fields.description);
}
