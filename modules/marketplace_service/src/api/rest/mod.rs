//! REST API layer

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod mapper;
pub mod middleware;
pub mod routes;

pub use extract::RestSettings;
pub use routes::{router, ApiDoc};
