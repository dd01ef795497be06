//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Coordinators that mutate wallets retry version-guarded
//! writes up to [`MAX_TXN_ATTEMPTS`] times before giving up.

pub mod award;
pub mod ledger;
pub mod registration;
pub mod tournament;
pub mod user;
pub mod wallet;

pub use award::AwardRepository;
pub use ledger::{LedgerAppend, LedgerError, LedgerRepository};
pub use registration::{RegisterInput, RegistrationReceipt, RegistrationRepository};
pub use tournament::{NewTournament, TournamentError, TournamentRepository};
pub use user::{NewUser, UserError, UserRepository};
pub use wallet::{DepositReceipt, WalletOperationError, WalletRepository, WithdrawalReceipt};

/// Retry budget for writes that lose an optimistic-concurrency race.
pub(crate) const MAX_TXN_ATTEMPTS: u32 = 3;
