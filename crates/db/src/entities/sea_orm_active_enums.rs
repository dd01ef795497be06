//! `SeaORM` active enums mirroring the PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use arenavault_core::{tournament, wallet};

/// Lifecycle state of a tournament.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "tournament_status")]
pub enum TournamentStatus {
    #[sea_orm(string_value = "upcoming")]
    Upcoming,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// Players per team in a tournament.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "team_size")]
pub enum TeamSize {
    #[sea_orm(string_value = "solo")]
    Solo,
    #[sea_orm(string_value = "duo")]
    Duo,
    #[sea_orm(string_value = "squad4")]
    Squad4,
    #[sea_orm(string_value = "squad6")]
    Squad6,
}

/// Team placement choice recorded on a registration.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "team_selection")]
pub enum TeamSelection {
    #[sea_orm(string_value = "pre_made")]
    PreMade,
    #[sea_orm(string_value = "auto_match")]
    AutoMatch,
}

/// State of a registration record.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "registration_status")]
pub enum RegistrationStatus {
    #[sea_orm(string_value = "registered")]
    Registered,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

/// Category of a ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
pub enum TransactionKind {
    #[sea_orm(string_value = "deposit")]
    Deposit,
    #[sea_orm(string_value = "winning")]
    Winning,
    #[sea_orm(string_value = "entry_fee")]
    EntryFee,
    #[sea_orm(string_value = "withdrawal")]
    Withdrawal,
}

/// What a ledger entry's reference points at.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_reference")]
pub enum TransactionReference {
    #[sea_orm(string_value = "tournament_id")]
    TournamentId,
    #[sea_orm(string_value = "order_id")]
    OrderId,
    #[sea_orm(string_value = "withdrawal_id")]
    WithdrawalId,
}

/// Settlement state of a ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_status")]
pub enum TransactionStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "failed")]
    Failed,
}

// ============================================================================
// Conversions between stored enums and domain enums
// ============================================================================

impl From<tournament::TournamentStatus> for TournamentStatus {
    fn from(value: tournament::TournamentStatus) -> Self {
        match value {
            tournament::TournamentStatus::Upcoming => Self::Upcoming,
            tournament::TournamentStatus::Active => Self::Active,
            tournament::TournamentStatus::Completed => Self::Completed,
        }
    }
}

impl From<TournamentStatus> for tournament::TournamentStatus {
    fn from(value: TournamentStatus) -> Self {
        match value {
            TournamentStatus::Upcoming => Self::Upcoming,
            TournamentStatus::Active => Self::Active,
            TournamentStatus::Completed => Self::Completed,
        }
    }
}

impl From<tournament::TeamSize> for TeamSize {
    fn from(value: tournament::TeamSize) -> Self {
        match value {
            tournament::TeamSize::Solo => Self::Solo,
            tournament::TeamSize::Duo => Self::Duo,
            tournament::TeamSize::Squad4 => Self::Squad4,
            tournament::TeamSize::Squad6 => Self::Squad6,
        }
    }
}

impl From<TeamSize> for tournament::TeamSize {
    fn from(value: TeamSize) -> Self {
        match value {
            TeamSize::Solo => Self::Solo,
            TeamSize::Duo => Self::Duo,
            TeamSize::Squad4 => Self::Squad4,
            TeamSize::Squad6 => Self::Squad6,
        }
    }
}

impl From<tournament::TeamSelection> for TeamSelection {
    fn from(value: tournament::TeamSelection) -> Self {
        match value {
            tournament::TeamSelection::PreMade => Self::PreMade,
            tournament::TeamSelection::AutoMatch => Self::AutoMatch,
        }
    }
}

impl From<TeamSelection> for tournament::TeamSelection {
    fn from(value: TeamSelection) -> Self {
        match value {
            TeamSelection::PreMade => Self::PreMade,
            TeamSelection::AutoMatch => Self::AutoMatch,
        }
    }
}

impl From<wallet::TransactionKind> for TransactionKind {
    fn from(value: wallet::TransactionKind) -> Self {
        match value {
            wallet::TransactionKind::Deposit => Self::Deposit,
            wallet::TransactionKind::Winning => Self::Winning,
            wallet::TransactionKind::EntryFee => Self::EntryFee,
            wallet::TransactionKind::Withdrawal => Self::Withdrawal,
        }
    }
}

impl From<TransactionKind> for wallet::TransactionKind {
    fn from(value: TransactionKind) -> Self {
        match value {
            TransactionKind::Deposit => Self::Deposit,
            TransactionKind::Winning => Self::Winning,
            TransactionKind::EntryFee => Self::EntryFee,
            TransactionKind::Withdrawal => Self::Withdrawal,
        }
    }
}

impl From<wallet::ReferenceType> for TransactionReference {
    fn from(value: wallet::ReferenceType) -> Self {
        match value {
            wallet::ReferenceType::TournamentId => Self::TournamentId,
            wallet::ReferenceType::OrderId => Self::OrderId,
            wallet::ReferenceType::WithdrawalId => Self::WithdrawalId,
        }
    }
}

impl From<TransactionReference> for wallet::ReferenceType {
    fn from(value: TransactionReference) -> Self {
        match value {
            TransactionReference::TournamentId => Self::TournamentId,
            TransactionReference::OrderId => Self::OrderId,
            TransactionReference::WithdrawalId => Self::WithdrawalId,
        }
    }
}

impl From<wallet::TransactionStatus> for TransactionStatus {
    fn from(value: wallet::TransactionStatus) -> Self {
        match value {
            wallet::TransactionStatus::Pending => Self::Pending,
            wallet::TransactionStatus::Completed => Self::Completed,
            wallet::TransactionStatus::Failed => Self::Failed,
        }
    }
}

impl From<TransactionStatus> for wallet::TransactionStatus {
    fn from(value: TransactionStatus) -> Self {
        match value {
            TransactionStatus::Pending => Self::Pending,
            TransactionStatus::Completed => Self::Completed,
            TransactionStatus::Failed => Self::Failed,
        }
    }
}
