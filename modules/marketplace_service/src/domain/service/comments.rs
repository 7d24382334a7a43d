//! Comments on ticket bodies, line items and seller organisations

use crate::contract::{Comment, CommentTarget, MarketplaceError};
use crate::domain::repository::{CommentRepository, SellerOrganisationRepository, TicketRepository};
use crate::domain::validation::require_text;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct CommentService {
    comment_repo: Arc<dyn CommentRepository>,
    ticket_repo: Arc<dyn TicketRepository>,
    seller_repo: Arc<dyn SellerOrganisationRepository>,
}

impl CommentService {
    pub fn new(
        comment_repo: Arc<dyn CommentRepository>,
        ticket_repo: Arc<dyn TicketRepository>,
        seller_repo: Arc<dyn SellerOrganisationRepository>,
    ) -> Self {
        Self {
            comment_repo,
            ticket_repo,
            seller_repo,
        }
    }

    pub async fn create(
        &self,
        target: CommentTarget,
        message: &str,
        acting_user: Uuid,
    ) -> Result<Comment, MarketplaceError> {
        require_text("message", message)?;
        self.ensure_target(target).await?;

        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            target,
            message: message.trim().to_string(),
            created_by: acting_user,
            created_at: now,
            updated_at: now,
        };
        Ok(self.comment_repo.insert(&comment).await?)
    }

    /// Replace the message of a comment on `target`.
    ///
    /// A blank message on a seller organisation comment deletes the comment
    /// and yields `None`; on any other target it is a validation error.
    pub async fn update(
        &self,
        target: CommentTarget,
        comment_id: Uuid,
        message: &str,
    ) -> Result<Option<Comment>, MarketplaceError> {
        let mut comment = self.get(target, comment_id).await?;

        if message.trim().is_empty() {
            if let CommentTarget::SellerOrganisation(_) = target {
                self.comment_repo.delete(comment_id).await?;
                tracing::debug!(%comment_id, "blank seller comment removed");
                return Ok(None);
            }
            require_text("message", message)?;
        }

        comment.message = message.trim().to_string();
        comment.updated_at = Utc::now();
        Ok(Some(self.comment_repo.update(&comment).await?))
    }

    /// Comment on `target`; `NotFound` if it hangs off another record
    pub async fn get(
        &self,
        target: CommentTarget,
        comment_id: Uuid,
    ) -> Result<Comment, MarketplaceError> {
        self.comment_repo
            .find(comment_id)
            .await?
            .filter(|c| c.target == target)
            .ok_or_else(|| MarketplaceError::not_found("comment", comment_id))
    }

    pub async fn list_for_target(
        &self,
        target: CommentTarget,
    ) -> Result<Vec<Comment>, MarketplaceError> {
        self.ensure_target(target).await?;
        Ok(self.comment_repo.list_for_target(target).await?)
    }

    pub async fn delete(
        &self,
        target: CommentTarget,
        comment_id: Uuid,
    ) -> Result<(), MarketplaceError> {
        self.get(target, comment_id).await?;
        Ok(self.comment_repo.delete(comment_id).await?)
    }

    async fn ensure_target(&self, target: CommentTarget) -> Result<(), MarketplaceError> {
        let exists = match target {
            CommentTarget::TicketBody(id) => self.ticket_repo.find_ticket(id).await?.is_some(),
            CommentTarget::LineItem(id) => self.ticket_repo.find_line_item(id).await?.is_some(),
            CommentTarget::SellerOrganisation(id) => {
                self.seller_repo.find_organisation(id).await?.is_some()
            }
        };
        if !exists {
            return Err(MarketplaceError::not_found(target.resource(), target.id()));
        }
        Ok(())
    }
}
