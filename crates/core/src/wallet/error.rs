//! Wallet error types.

use arenavault_shared::types::money::MoneyError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during wallet balance operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    // ========== Coverage Errors ==========
    /// Both pools together cannot cover the required amount.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientFunds {
        /// The amount the operation needs.
        required: Decimal,
        /// The total the wallet currently holds.
        available: Decimal,
    },

    /// The winnings pool cannot cover a withdrawal.
    #[error("Insufficient winnings: requested {requested}, available {available}")]
    InsufficientWinnings {
        /// The amount requested for withdrawal.
        requested: Decimal,
        /// The winnings currently held.
        available: Decimal,
    },

    // ========== Amount Errors ==========
    /// An amount failed monetary validation.
    #[error(transparent)]
    Amount(#[from] MoneyError),
}

impl WalletError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::InsufficientWinnings { .. } => "INSUFFICIENT_WINNINGS",
            Self::Amount(_) => "INVALID_AMOUNT",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        400
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            WalletError::InsufficientFunds {
                required: dec!(40),
                available: dec!(25),
            }
            .error_code(),
            "INSUFFICIENT_FUNDS"
        );
        assert_eq!(
            WalletError::InsufficientWinnings {
                requested: dec!(50),
                available: dec!(10),
            }
            .error_code(),
            "INSUFFICIENT_WINNINGS"
        );
        assert_eq!(
            WalletError::Amount(MoneyError::Negative(dec!(-1))).error_code(),
            "INVALID_AMOUNT"
        );
    }

    #[test]
    fn test_insufficient_funds_message_carries_amounts() {
        let err = WalletError::InsufficientFunds {
            required: dec!(40.00),
            available: dec!(25.50),
        };
        let message = err.to_string();
        assert!(message.contains("40.00"));
        assert!(message.contains("25.50"));
    }
}
