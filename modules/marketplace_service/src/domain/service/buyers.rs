//! Buyer organisations

use crate::contract::{BuyerOrganisation, BuyerOrganisationFields, MarketplaceError};
use crate::domain::repository::BuyerOrganisationRepository;
use crate::domain::validation::{normalize_optional, require_text, validate_optional_email};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct BuyerOrganisationService {
    buyer_repo: Arc<dyn BuyerOrganisationRepository>,
}

impl BuyerOrganisationService {
    pub fn new(buyer_repo: Arc<dyn BuyerOrganisationRepository>) -> Self {
        Self { buyer_repo }
    }

    pub async fn create(
        &self,
        fields: BuyerOrganisationFields,
        acting_user: Uuid,
    ) -> Result<BuyerOrganisation, MarketplaceError> {
        require_text("companyName", &fields.company_name)?;
        let company_email = normalize_optional(fields.company_email);
        validate_optional_email("companyEmail", company_email.as_deref())?;

        let now = Utc::now();
        let organisation = BuyerOrganisation {
            id: Uuid::new_v4(),
            company_name: fields.company_name.trim().to_string(),
            company_email,
            company_phone: normalize_optional(fields.company_phone),
            remarks: normalize_optional(fields.remarks),
            created_by: acting_user,
            created_at: now,
            updated_at: now,
        };

        let created = self.buyer_repo.insert(&organisation).await?;
        tracing::info!(buyer_organisation_id = %created.id, "buyer organisation created");
        Ok(created)
    }

    pub async fn get(&self, id: Uuid) -> Result<BuyerOrganisation, MarketplaceError> {
        self.buyer_repo
            .find(id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("buyer_organisation", id))
    }

    pub async fn list(&self) -> Result<Vec<BuyerOrganisation>, MarketplaceError> {
        Ok(self.buyer_repo.list_all().await?)
    }

    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, MarketplaceError> {
        Ok(self.buyer_repo.delete_many(ids).await?)
    }
}
