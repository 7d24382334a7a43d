//! Module declaration and lifecycle: wiring, migrations and REST registration

use crate::api::rest::RestSettings;
use crate::config::Config;
use crate::contract::TicketingApi;
use crate::domain::{PagingPolicy, Services, TracingEventPublisher};
use crate::infra::storage::repositories::sea_orm_repositories;
use crate::infra::HttpCategorySource;
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Marketplace service module
///
/// Built empty, then [`init`](Self::init) wires repositories, the category
/// source and every domain service over one database connection.
pub struct MarketplaceModule {
    config: RwLock<Config>,
    services: RwLock<Option<Services>>,
}

impl Default for MarketplaceModule {
    fn default() -> Self {
        Self {
            config: RwLock::new(Config::default()),
            services: RwLock::new(None),
        }
    }
}

impl MarketplaceModule {
    pub fn init(&self, cfg: Config, db: Arc<DatabaseConnection>) -> Result<()> {
        let repos = sea_orm_repositories(db);
        let category_source = Arc::new(HttpCategorySource::new(&cfg.category_source)?);
        let paging = PagingPolicy {
            max_page_size: cfg.max_page_size,
        };

        let services = Services::new(
            repos,
            category_source,
            Arc::new(TracingEventPublisher),
            paging,
        );
        *self.services.write() = Some(services);
        *self.config.write() = cfg;

        tracing::info!("Marketplace service initialized");
        Ok(())
    }

    /// Apply every pending schema migration
    pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Marketplace service migrations completed");
        Ok(())
    }

    pub fn services(&self) -> Result<Services> {
        self.services
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// In-process client for other modules
    pub fn native_client(&self) -> Result<Arc<dyn TicketingApi>> {
        let services = self.services()?;
        Ok(Arc::new(crate::api::native::NativeClient::new(&services)))
    }

    /// Mount the `/api/v1` routes onto `router`
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let services = self.services()?;
        let settings = Arc::new(RestSettings::from_config(&self.config.read())?);

        tracing::info!("Registering marketplace REST routes");
        Ok(router.merge(crate::api::rest::router(services, settings)))
    }
}
