use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    pub(crate) fn parse(s: &str) -> Result<Self, LedgerError> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "expenses" | "e" => Ok(Self::Expense),
            "income" | "i" => Ok(Self::Income),
            other => Err(LedgerError::UnknownKind(other.to_string())),
        }
    }

    pub(crate) fn all() -> &'static [TransactionKind] {
        &[Self::Expense, Self::Income]
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A strictly positive money magnitude. The sign of a transaction lives in
/// its [`TransactionKind`], never in the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Amount(Decimal);

/// Largest amount accepted at entry, in whole currency units.
const MAX_AMOUNT: i64 = 1_000_000_000_000;

impl Amount {
    pub(crate) fn new(value: Decimal) -> Result<Self, LedgerError> {
        if value <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(value));
        }
        if value > Self::max() {
            return Err(LedgerError::AmountTooLarge(value));
        }
        Ok(Self(value))
    }

    pub(crate) fn max() -> Decimal {
        Decimal::from(MAX_AMOUNT)
    }

    /// Parse user input such as `"1,250.50"` or `"$40"`.
    pub(crate) fn parse(input: &str) -> Result<Self, LedgerError> {
        let cleaned = input.trim().replace(['$', ','], "");
        let value = Decimal::from_str(&cleaned)
            .map_err(|_| LedgerError::InvalidAmount(input.trim().to_string()))?;
        Self::new(value)
    }

    pub(crate) fn value(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identity assigned when a transaction is created. Records written
/// before ids existed load as [`TransactionId::is_unassigned`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct TransactionId(Uuid);

impl Default for TransactionId {
    fn default() -> Self {
        Self(Uuid::nil())
    }
}

impl TransactionId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub(crate) fn is_unassigned(&self) -> bool {
        self.0.is_nil()
    }

    /// First block of the hyphenated form, enough to address a record from the CLI.
    pub(crate) fn short(&self) -> String {
        self.0.hyphenated().to_string()[..8].to_string()
    }

    pub(crate) fn matches_prefix(&self, prefix: &str) -> bool {
        !prefix.is_empty()
            && self
                .0
                .hyphenated()
                .to_string()
                .starts_with(&prefix.to_lowercase())
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Transaction {
    #[serde(default)]
    pub(crate) id: TransactionId,
    pub(crate) description: String,
    pub(crate) amount: Amount,
    #[serde(rename = "type")]
    pub(crate) kind: TransactionKind,
    pub(crate) category: String,
    pub(crate) date: DateTime<FixedOffset>,
}

impl Transaction {
    /// Calendar date in the offset the transaction was recorded with.
    pub(crate) fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub(crate) fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub(crate) fn value(&self) -> Decimal {
        self.amount.value()
    }
}

/// Validated user input for a transaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewTransaction {
    pub(crate) description: String,
    pub(crate) amount: Amount,
    pub(crate) kind: TransactionKind,
    pub(crate) category: String,
}

impl NewTransaction {
    pub(crate) fn parse(
        kind: &str,
        amount: &str,
        category: &str,
        description: &str,
    ) -> Result<Self, LedgerError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(LedgerError::EmptyDescription);
        }
        Ok(Self {
            description: description.to_string(),
            amount: Amount::parse(amount)?,
            kind: TransactionKind::parse(kind)?,
            category: category.trim().to_lowercase(),
        })
    }

    pub(crate) fn into_transaction(self, date: DateTime<FixedOffset>) -> Transaction {
        Transaction {
            id: TransactionId::generate(),
            description: self.description,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            date,
        }
    }
}
