//! Infrastructure layer - persistence and outbound integrations

pub mod category_source;
pub mod storage;

pub use category_source::HttpCategorySource;
