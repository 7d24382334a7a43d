//! Category taxonomy refreshed from the external admin service

use super::PagingPolicy;
use crate::contract::{
    EventLog, EventType, MainCategory, MarketplaceError, Page, PageRequest, RefreshSummary,
    SubCategory,
};
use crate::domain::repository::{CategoryRepository, CategorySource};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Event log entity name used for category refreshes
pub const CATEGORIES_ENTITY: &str = "categories";

pub struct CategoryService {
    category_repo: Arc<dyn CategoryRepository>,
    source: Arc<dyn CategorySource>,
    paging: PagingPolicy,
}

impl CategoryService {
    pub fn new(
        category_repo: Arc<dyn CategoryRepository>,
        source: Arc<dyn CategorySource>,
        paging: PagingPolicy,
    ) -> Self {
        Self {
            category_repo,
            source,
            paging,
        }
    }

    /// Pull the full taxonomy, upsert it by external id and log a FETCH event
    pub async fn refresh_from_source(&self) -> Result<RefreshSummary, MarketplaceError> {
        let snapshot = self.source.fetch().await.map_err(|e| {
            tracing::error!(error = ?e, "category source fetch failed");
            MarketplaceError::Internal
        })?;

        let summary = self.category_repo.apply_snapshot(&snapshot).await?;

        let event = EventLog {
            id: Uuid::new_v4(),
            event_type: EventType::Fetch,
            entity: CATEGORIES_ENTITY.to_string(),
            detail: Some(format!(
                "{} main categories, {} sub-categories",
                summary.main_categories, summary.sub_categories
            )),
            created_at: Utc::now(),
        };
        self.category_repo.append_event(&event).await?;

        tracing::info!(
            main_categories = summary.main_categories,
            sub_categories = summary.sub_categories,
            "categories refreshed"
        );
        Ok(summary)
    }

    /// Latest FETCH event for categories, if a refresh ever ran
    pub async fn last_refresh(&self) -> Result<Option<EventLog>, MarketplaceError> {
        Ok(self
            .category_repo
            .last_event(EventType::Fetch, CATEGORIES_ENTITY)
            .await?)
    }

    pub async fn list_main(&self) -> Result<Vec<MainCategory>, MarketplaceError> {
        Ok(self.category_repo.list_main().await?)
    }

    pub async fn get_sub_category(&self, id: Uuid) -> Result<SubCategory, MarketplaceError> {
        self.category_repo
            .find_sub(id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("sub_category", id))
    }

    pub async fn filter_sub_categories(
        &self,
        search: &str,
    ) -> Result<Vec<SubCategory>, MarketplaceError> {
        Ok(self.category_repo.filter_subs(search.trim()).await?)
    }

    pub async fn paginate_sub_categories(
        &self,
        request: &PageRequest,
    ) -> Result<Page<SubCategory>, MarketplaceError> {
        self.paging.check(request)?;
        Ok(self.category_repo.paginate_subs(request).await?)
    }

    pub async fn delete_all(&self) -> Result<u64, MarketplaceError> {
        Ok(self.category_repo.delete_all().await?)
    }
}
