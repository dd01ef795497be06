//! Shared types and configuration for ArenaVault.
//!
//! This crate provides common types used across all other crates:
//! - Money scale helpers with decimal precision
//! - Typed IDs for type-safe entity references
//! - Pagination types for list queries
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
