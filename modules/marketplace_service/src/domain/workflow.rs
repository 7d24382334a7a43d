//! Ticket and line item state machines
//!
//! Pure transition rules. Services load the record, ask the status for the
//! next status, then persist. Every illegal move is a `PreconditionFailed`.
//!
//! Ticket:    OPEN -> CLAIMED -> SOURCING -> COMPLETED, any non-terminal -> VOID
//! Line item: OPEN -> CLAIMED -> SOURCING -> SOURCED, any non-terminal -> UNABLE_TO_SOURCE

use crate::contract::{LineItemStatus, MarketplaceError, TicketStatus};

fn illegal(entity: &str, op: &str, from: impl std::fmt::Display) -> MarketplaceError {
    MarketplaceError::precondition(format!("cannot {} a {} in status {}", op, entity, from))
}

impl TicketStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TicketStatus::Completed | TicketStatus::Void)
    }

    /// Status at creation time
    pub fn initial(has_owner: bool) -> Self {
        if has_owner {
            TicketStatus::Claimed
        } else {
            TicketStatus::Open
        }
    }

    /// Assigning an owner claims an open ticket; any other status is kept
    pub fn on_owner_assigned(self) -> Self {
        match self {
            TicketStatus::Open => TicketStatus::Claimed,
            other => other,
        }
    }

    pub fn start_sourcing(self) -> Result<Self, MarketplaceError> {
        match self {
            TicketStatus::Claimed => Ok(TicketStatus::Sourcing),
            other => Err(illegal("ticket", "start sourcing", other)),
        }
    }

    /// `all_line_items_settled` must cover every line item linked to the ticket
    pub fn complete(self, all_line_items_settled: bool) -> Result<Self, MarketplaceError> {
        match self {
            TicketStatus::Sourcing if all_line_items_settled => Ok(TicketStatus::Completed),
            TicketStatus::Sourcing => Err(MarketplaceError::precondition(
                "every line item must be SOURCED or UNABLE_TO_SOURCE before completing the ticket",
            )),
            other => Err(illegal("ticket", "complete", other)),
        }
    }

    pub fn void(self) -> Result<Self, MarketplaceError> {
        if self.is_terminal() {
            return Err(illegal("ticket", "void", self));
        }
        Ok(TicketStatus::Void)
    }
}

impl LineItemStatus {
    /// Sourcing is finished, successfully or not
    pub fn is_settled(&self) -> bool {
        matches!(self, LineItemStatus::Sourced | LineItemStatus::UnableToSource)
    }

    pub fn initial(has_owner: bool) -> Self {
        if has_owner {
            LineItemStatus::Claimed
        } else {
            LineItemStatus::Open
        }
    }

    pub fn on_owner_assigned(self) -> Self {
        match self {
            LineItemStatus::Open => LineItemStatus::Claimed,
            other => other,
        }
    }

    pub fn start_sourcing(self) -> Result<Self, MarketplaceError> {
        match self {
            LineItemStatus::Claimed => Ok(LineItemStatus::Sourcing),
            other => Err(illegal("line item", "start sourcing", other)),
        }
    }

    pub fn mark_sourced(self) -> Result<Self, MarketplaceError> {
        match self {
            LineItemStatus::Sourcing => Ok(LineItemStatus::Sourced),
            other => Err(illegal("line item", "mark as sourced", other)),
        }
    }

    pub fn mark_unable_to_source(self) -> Result<Self, MarketplaceError> {
        if self.is_settled() {
            return Err(illegal("line item", "mark as unable to source", self));
        }
        Ok(LineItemStatus::UnableToSource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_initial_status_follows_owner() {
        assert_eq!(TicketStatus::initial(true), TicketStatus::Claimed);
        assert_eq!(TicketStatus::initial(false), TicketStatus::Open);
    }

    #[test]
    fn test_ticket_owner_assignment_only_claims_open() {
        assert_eq!(TicketStatus::Open.on_owner_assigned(), TicketStatus::Claimed);
        for status in [
            TicketStatus::Claimed,
            TicketStatus::Sourcing,
            TicketStatus::Completed,
            TicketStatus::Void,
        ] {
            assert_eq!(status.on_owner_assigned(), status);
        }
    }

    #[test]
    fn test_ticket_start_sourcing_only_from_claimed() {
        assert_eq!(
            TicketStatus::Claimed.start_sourcing(),
            Ok(TicketStatus::Sourcing)
        );
        for status in [
            TicketStatus::Open,
            TicketStatus::Sourcing,
            TicketStatus::Completed,
            TicketStatus::Void,
        ] {
            assert!(matches!(
                status.start_sourcing(),
                Err(MarketplaceError::PreconditionFailed { .. })
            ));
        }
    }

    #[test]
    fn test_ticket_complete_requires_sourcing_and_settled_items() {
        assert_eq!(
            TicketStatus::Sourcing.complete(true),
            Ok(TicketStatus::Completed)
        );
        assert!(TicketStatus::Sourcing.complete(false).is_err());
        assert!(TicketStatus::Claimed.complete(true).is_err());
        assert!(TicketStatus::Completed.complete(true).is_err());
    }

    #[test]
    fn test_ticket_void_from_non_terminal_only() {
        for status in [
            TicketStatus::Open,
            TicketStatus::Claimed,
            TicketStatus::Sourcing,
        ] {
            assert_eq!(status.void(), Ok(TicketStatus::Void));
        }
        assert!(TicketStatus::Void.void().is_err());
        assert!(TicketStatus::Completed.void().is_err());
    }

    #[test]
    fn test_line_item_happy_path() {
        let status = LineItemStatus::Open.on_owner_assigned();
        assert_eq!(status, LineItemStatus::Claimed);

        let status = status.start_sourcing().unwrap();
        assert_eq!(status, LineItemStatus::Sourcing);

        let status = status.mark_sourced().unwrap();
        assert_eq!(status, LineItemStatus::Sourced);
        assert!(status.is_settled());
    }

    #[test]
    fn test_line_item_sourced_requires_sourcing() {
        assert!(LineItemStatus::Open.mark_sourced().is_err());
        assert!(LineItemStatus::Claimed.mark_sourced().is_err());
        assert!(LineItemStatus::UnableToSource.mark_sourced().is_err());
    }

    #[test]
    fn test_line_item_unable_to_source_from_any_unsettled() {
        for status in [
            LineItemStatus::Open,
            LineItemStatus::Claimed,
            LineItemStatus::Sourcing,
        ] {
            assert_eq!(
                status.mark_unable_to_source(),
                Ok(LineItemStatus::UnableToSource)
            );
        }
        assert!(LineItemStatus::Sourced.mark_unable_to_source().is_err());
        assert!(LineItemStatus::UnableToSource
            .mark_unable_to_source()
            .is_err());
    }
}
