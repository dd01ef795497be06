//! Core business logic for ArenaVault.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `wallet` - Two-pool balance math, fee splitting, ledger vocabulary
//! - `tournament` - Admission rules and registration input validation
//! - `award` - Prize payout batch contracts

pub mod award;
pub mod tournament;
pub mod wallet;
