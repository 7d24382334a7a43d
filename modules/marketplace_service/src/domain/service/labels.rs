//! Ticket labels

use crate::contract::{MarketplaceError, TicketLabel, TicketLabelFields};
use crate::domain::repository::TicketRepository;
use crate::domain::validation::{normalize_optional, require_text};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct LabelService {
    ticket_repo: Arc<dyn TicketRepository>,
}

impl LabelService {
    pub fn new(ticket_repo: Arc<dyn TicketRepository>) -> Self {
        Self { ticket_repo }
    }

    pub async fn create(&self, fields: TicketLabelFields) -> Result<TicketLabel, MarketplaceError> {
        require_text("title", &fields.title)?;
        let now = Utc::now();
        let label = TicketLabel {
            id: Uuid::new_v4(),
            title: fields.title.trim().to_string(),
            description: normalize_optional(fields.description),
            created_at: now,
            updated_at: now,
        };
        Ok(self.ticket_repo.insert_label(&label).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<TicketLabel, MarketplaceError> {
        self.ticket_repo
            .find_label(id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("ticket_label", id))
    }

    pub async fn update(
        &self,
        id: Uuid,
        fields: TicketLabelFields,
    ) -> Result<TicketLabel, MarketplaceError> {
        require_text("title", &fields.title)?;
        let mut label = self.get(id).await?;
        label.title = fields.title.trim().to_string();
        label.description = normalize_optional(fields.description);
        label.updated_at = Utc::now();
        Ok(self.ticket_repo.update_label(&label).await?)
    }

    pub async fn list(&self) -> Result<Vec<TicketLabel>, MarketplaceError> {
        Ok(self.ticket_repo.list_labels().await?)
    }
}
