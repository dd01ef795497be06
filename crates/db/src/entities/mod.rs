//! `SeaORM` entity definitions.

pub mod registrations;
pub mod sea_orm_active_enums;
pub mod tournaments;
pub mod users;
pub mod wallet_transactions;
