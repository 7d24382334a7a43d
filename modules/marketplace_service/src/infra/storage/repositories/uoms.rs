use super::convert_all;
use crate::contract::UomReference;
use crate::domain::repository::{StorageResult, UomRepository};
use crate::infra::storage::entity::uom_reference;
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, TransactionTrait};
use std::sync::Arc;

pub struct SeaOrmUomRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmUomRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UomRepository for SeaOrmUomRepository {
    async fn insert_many(&self, uoms: &[UomReference]) -> StorageResult<Vec<UomReference>> {
        if uoms.is_empty() {
            return Ok(Vec::new());
        }

        let txn = self.db.begin().await?;
        let rows = uoms.iter().map(uom_reference::ActiveModel::from);
        uom_reference::Entity::insert_many(rows)
            .exec_without_returning(&txn)
            .await?;
        txn.commit().await?;

        Ok(uoms.to_vec())
    }

    async fn list(&self) -> StorageResult<Vec<UomReference>> {
        let models = uom_reference::Entity::find()
            .order_by_asc(uom_reference::Column::UomCode)
            .all(&*self.db)
            .await?;
        convert_all(models)
    }
}
