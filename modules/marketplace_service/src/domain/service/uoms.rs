//! Unit of measurement reference list

use crate::contract::{MarketplaceError, NewUomReference, UomReference};
use crate::domain::repository::UomRepository;
use crate::domain::validation::require_text;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

pub struct UomService {
    uom_repo: Arc<dyn UomRepository>,
}

impl UomService {
    pub fn new(uom_repo: Arc<dyn UomRepository>) -> Self {
        Self { uom_repo }
    }

    /// Create a batch of units; one invalid or duplicate code rejects the whole batch
    pub async fn create_many(
        &self,
        uoms: Vec<NewUomReference>,
    ) -> Result<Vec<UomReference>, MarketplaceError> {
        if uoms.is_empty() {
            return Err(MarketplaceError::validation(
                "at least one unit of measurement is required",
            ));
        }

        let now = Utc::now();
        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(uoms.len());
        for uom in uoms {
            require_text("uomCode", &uom.uom_code)?;
            require_text("description", &uom.description)?;
            let uom_code = uom.uom_code.trim().to_string();
            if !seen.insert(uom_code.clone()) {
                return Err(MarketplaceError::conflict(format!(
                    "uomCode '{}' appears more than once",
                    uom_code
                )));
            }
            rows.push(UomReference {
                id: Uuid::new_v4(),
                uom_code,
                description: uom.description.trim().to_string(),
                created_at: now,
            });
        }

        let created = self.uom_repo.insert_many(&rows).await?;
        tracing::info!(count = created.len(), "units of measurement created");
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<UomReference>, MarketplaceError> {
        Ok(self.uom_repo.list().await?)
    }
}
