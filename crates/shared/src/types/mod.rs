//! Common types used across the application.

pub mod id;
pub mod money;
pub mod pagination;

pub use id::*;
pub use money::MoneyError;
pub use pagination::{PageRequest, PageResponse};
