//! Uniform link/unlink surface over the many-to-many relations
//!
//! Every relation has an A side and a B side (see `LinkKind`). Linking a
//! pair twice is a conflict; unlinking a missing pair is a no-op.

use crate::contract::{
    LinkKind, MarketplaceError, SellerItem, SubCategory, TicketBody, TicketLabel, TicketLineItem,
};
use crate::domain::repository::{
    CategoryRepository, LinkRepository, SellerItemRepository, TicketRepository,
};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    A,
    B,
}

pub struct LinkService {
    link_repo: Arc<dyn LinkRepository>,
    ticket_repo: Arc<dyn TicketRepository>,
    item_repo: Arc<dyn SellerItemRepository>,
    category_repo: Arc<dyn CategoryRepository>,
}

impl LinkService {
    pub fn new(
        link_repo: Arc<dyn LinkRepository>,
        ticket_repo: Arc<dyn TicketRepository>,
        item_repo: Arc<dyn SellerItemRepository>,
        category_repo: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            link_repo,
            ticket_repo,
            item_repo,
            category_repo,
        }
    }

    // ===== Generic surface =====

    /// Insert the (a, b) join row; both ends must exist
    pub async fn link(
        &self,
        kind: LinkKind,
        a: Uuid,
        b: Uuid,
        acting_user: Uuid,
    ) -> Result<(), MarketplaceError> {
        self.ensure(kind, Side::A, a).await?;
        self.ensure(kind, Side::B, b).await?;
        self.link_repo.link(kind, a, b, acting_user).await?;
        tracing::debug!(%kind, %a, %b, "linked");
        Ok(())
    }

    /// Delete the (a, b) join row; returns whether one existed
    pub async fn unlink(&self, kind: LinkKind, a: Uuid, b: Uuid) -> Result<bool, MarketplaceError> {
        let removed = self.link_repo.unlink(kind, a, b).await?;
        tracing::debug!(%kind, %a, %b, removed, "unlinked");
        Ok(removed)
    }

    /// Replace every link of `a` with links to `bs`
    pub async fn set_links(
        &self,
        kind: LinkKind,
        a: Uuid,
        bs: &[Uuid],
        acting_user: Uuid,
    ) -> Result<(), MarketplaceError> {
        self.ensure(kind, Side::A, a).await?;
        for b in bs {
            self.ensure(kind, Side::B, *b).await?;
        }
        let mut unique = bs.to_vec();
        unique.sort_unstable();
        unique.dedup();
        Ok(self.link_repo.replace(kind, a, &unique, acting_user).await?)
    }

    pub async fn list_by_a(&self, kind: LinkKind, a: Uuid) -> Result<Vec<Uuid>, MarketplaceError> {
        self.ensure(kind, Side::A, a).await?;
        Ok(self.link_repo.list_b(kind, a).await?)
    }

    pub async fn list_by_b(&self, kind: LinkKind, b: Uuid) -> Result<Vec<Uuid>, MarketplaceError> {
        self.ensure(kind, Side::B, b).await?;
        Ok(self.link_repo.list_a(kind, b).await?)
    }

    // ===== Resolved listings =====

    pub async fn sub_categories_of_item(
        &self,
        seller_item_id: Uuid,
    ) -> Result<Vec<SubCategory>, MarketplaceError> {
        let ids = self
            .list_by_a(LinkKind::SellerItemInSubCategory, seller_item_id)
            .await?;
        Ok(self.category_repo.find_subs(&ids).await?)
    }

    pub async fn items_in_sub_category(
        &self,
        sub_category_id: Uuid,
    ) -> Result<Vec<SellerItem>, MarketplaceError> {
        let ids = self
            .list_by_b(LinkKind::SellerItemInSubCategory, sub_category_id)
            .await?;
        Ok(self.item_repo.find_many(&ids).await?)
    }

    pub async fn line_items_of_ticket(
        &self,
        ticket_id: Uuid,
    ) -> Result<Vec<TicketLineItem>, MarketplaceError> {
        let ids = self
            .list_by_a(LinkKind::LineItemInTicketBody, ticket_id)
            .await?;
        Ok(self.ticket_repo.find_line_items(&ids).await?)
    }

    pub async fn seller_items_of_line_item(
        &self,
        line_item_id: Uuid,
    ) -> Result<Vec<SellerItem>, MarketplaceError> {
        let ids = self
            .list_by_a(LinkKind::SellerItemInLineItem, line_item_id)
            .await?;
        Ok(self.item_repo.find_many(&ids).await?)
    }

    pub async fn line_items_for_seller_item(
        &self,
        seller_item_id: Uuid,
    ) -> Result<Vec<TicketLineItem>, MarketplaceError> {
        let ids = self
            .list_by_b(LinkKind::SellerItemInLineItem, seller_item_id)
            .await?;
        Ok(self.ticket_repo.find_line_items(&ids).await?)
    }

    pub async fn labels_of_ticket(
        &self,
        ticket_id: Uuid,
    ) -> Result<Vec<TicketLabel>, MarketplaceError> {
        let ids = self.list_by_a(LinkKind::TicketBodyInLabel, ticket_id).await?;
        Ok(self.ticket_repo.find_labels(&ids).await?)
    }

    pub async fn tickets_with_label(
        &self,
        label_id: Uuid,
    ) -> Result<Vec<TicketBody>, MarketplaceError> {
        let ids = self.list_by_b(LinkKind::TicketBodyInLabel, label_id).await?;
        Ok(self.ticket_repo.find_tickets(&ids).await?)
    }

    async fn ensure(&self, kind: LinkKind, side: Side, id: Uuid) -> Result<(), MarketplaceError> {
        let (resource, exists) = match (kind, side) {
            (LinkKind::SellerItemInSubCategory, Side::A)
            | (LinkKind::SellerItemInLineItem, Side::B) => {
                ("seller_item", self.item_repo.find(id).await?.is_some())
            }
            (LinkKind::SellerItemInSubCategory, Side::B) => {
                ("sub_category", self.category_repo.find_sub(id).await?.is_some())
            }
            (LinkKind::LineItemInTicketBody, Side::A) | (LinkKind::TicketBodyInLabel, Side::A) => {
                ("ticket_body", self.ticket_repo.find_ticket(id).await?.is_some())
            }
            (LinkKind::LineItemInTicketBody, Side::B) | (LinkKind::SellerItemInLineItem, Side::A) => (
                "ticket_line_item",
                self.ticket_repo.find_line_item(id).await?.is_some(),
            ),
            (LinkKind::TicketBodyInLabel, Side::B) => {
                ("ticket_label", self.ticket_repo.find_label(id).await?.is_some())
            }
        };

        if !exists {
            return Err(MarketplaceError::not_found(resource, id));
        }
        Ok(())
    }
}
