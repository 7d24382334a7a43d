//! Permission catalog
//!
//! Every permission key the marketplace understands, as a closed enumeration.
//! The catalog is seeded once into storage and never changes afterwards.

use std::fmt;

/// Ticketing action gated by a permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    TicketCreate,
    TicketUpdate,
    TicketStartSourcing,
    TicketComplete,
    TicketVoid,
    TicketOwnerUpdate,
    TicketDetailsUpdate,
    LineItemCreate,
    LineItemUpdate,
    LineItemStartSourcing,
    LineItemSourced,
    LineItemUnableToSource,
    LineItemOwnerUpdate,
    LineItemDetailsUpdate,
    /// Grants every other ticketing action
    TicketingAdmin,
}

impl Action {
    pub const ALL: [Action; 15] = [
        Action::TicketCreate,
        Action::TicketUpdate,
        Action::TicketStartSourcing,
        Action::TicketComplete,
        Action::TicketVoid,
        Action::TicketOwnerUpdate,
        Action::TicketDetailsUpdate,
        Action::LineItemCreate,
        Action::LineItemUpdate,
        Action::LineItemStartSourcing,
        Action::LineItemSourced,
        Action::LineItemUnableToSource,
        Action::LineItemOwnerUpdate,
        Action::LineItemDetailsUpdate,
        Action::TicketingAdmin,
    ];

    /// Permission key as stored in the permission table
    pub fn key(&self) -> &'static str {
        match self {
            Action::TicketCreate => "ticket:create",
            Action::TicketUpdate => "ticket:update",
            Action::TicketStartSourcing => "ticket:startSourcing",
            Action::TicketComplete => "ticket:complete",
            Action::TicketVoid => "ticket:void",
            Action::TicketOwnerUpdate => "ticketOwner:update",
            Action::TicketDetailsUpdate => "ticketDetails:update",
            Action::LineItemCreate => "lineItem:create",
            Action::LineItemUpdate => "lineItem:update",
            Action::LineItemStartSourcing => "lineItem:startSourcing",
            Action::LineItemSourced => "lineItem:sourced",
            Action::LineItemUnableToSource => "lineItem:unableToSource",
            Action::LineItemOwnerUpdate => "lineItemOwner:update",
            Action::LineItemDetailsUpdate => "lineItemDetails:update",
            Action::TicketingAdmin => "ticketing:admin",
        }
    }

    /// Parse a stored permission key; unknown keys yield `None`
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|action| action.key() == key)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Action::TicketingAdmin)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_the_catalog() {
        for action in Action::ALL {
            assert_eq!(Action::from_key(action.key()), Some(action));
        }
        assert_eq!(Action::from_key("ticket:delete"), None);
    }

    #[test]
    fn catalog_keys_are_distinct() {
        let mut keys: Vec<&str> = Action::ALL.iter().map(|a| a.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), Action::ALL.len());
    }
}
