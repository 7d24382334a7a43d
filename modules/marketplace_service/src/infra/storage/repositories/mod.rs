//! SeaORM repository implementations

mod access;
mod catalog;
mod categories;
mod comments;
mod links;
mod organisations;
mod tickets;
mod uoms;

pub use access::SeaOrmAccessRepository;
pub use catalog::SeaOrmSellerItemRepository;
pub use categories::SeaOrmCategoryRepository;
pub use comments::SeaOrmCommentRepository;
pub use links::SeaOrmLinkRepository;
pub use organisations::{SeaOrmBuyerOrganisationRepository, SeaOrmSellerOrganisationRepository};
pub use tickets::SeaOrmTicketRepository;
pub use uoms::SeaOrmUomRepository;

use crate::domain::repository::StorageResult;
use crate::domain::Repositories;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Build every repository over one connection pool
pub fn sea_orm_repositories(db: Arc<DatabaseConnection>) -> Repositories {
    Repositories {
        access: Arc::new(SeaOrmAccessRepository::new(db.clone())),
        buyers: Arc::new(SeaOrmBuyerOrganisationRepository::new(db.clone())),
        sellers: Arc::new(SeaOrmSellerOrganisationRepository::new(db.clone())),
        items: Arc::new(SeaOrmSellerItemRepository::new(db.clone())),
        categories: Arc::new(SeaOrmCategoryRepository::new(db.clone())),
        tickets: Arc::new(SeaOrmTicketRepository::new(db.clone())),
        comments: Arc::new(SeaOrmCommentRepository::new(db.clone())),
        links: Arc::new(SeaOrmLinkRepository::new(db.clone())),
        uoms: Arc::new(SeaOrmUomRepository::new(db)),
    }
}

fn convert<M, T>(model: M) -> StorageResult<T>
where
    T: TryFrom<M, Error = anyhow::Error>,
{
    Ok(T::try_from(model)?)
}

fn convert_all<M, T>(models: Vec<M>) -> StorageResult<Vec<T>>
where
    T: TryFrom<M, Error = anyhow::Error>,
{
    models.into_iter().map(convert).collect()
}

fn convert_opt<M, T>(model: Option<M>) -> StorageResult<Option<T>>
where
    T: TryFrom<M, Error = anyhow::Error>,
{
    model.map(convert).transpose()
}
