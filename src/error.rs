use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised at the entry boundary and by ledger lookups.
#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum LedgerError {
    #[error("Description is required")]
    EmptyDescription,

    #[error("Amount must be a positive number, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("Amount must not exceed 1,000,000,000,000, got {0}")]
    AmountTooLarge(Decimal),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Unknown transaction type: {0} (expected expense or income)")]
    UnknownKind(String),

    #[error("No transaction matches id: {0}")]
    TransactionNotFound(String),

    #[error("Id prefix matches more than one transaction: {0}")]
    AmbiguousId(String),
}
