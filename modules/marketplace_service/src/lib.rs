//! Marketplace Service Module
//!
//! Buyer and seller organisations, a seller catalog with a two-level category
//! taxonomy, and the procurement ticket workflow gated by role permissions.

// Public exports
pub mod contract;
pub use contract::{
    client::TicketingApi, error::MarketplaceError, Action, LineItemStatus, Priority,
    TicketBody, TicketLineItem, TicketStatus,
};

pub mod module;
pub use module::MarketplaceModule;

pub mod config;
pub use config::{CategorySourceConfig, Config};

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
