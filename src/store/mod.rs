//! Persistence of ledger state as JSON documents in a string key-value store.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::models::{BudgetMap, Transaction};

pub(crate) const TRANSACTIONS_KEY: &str = "transactions";
pub(crate) const BUDGETS_KEY: &str = "budgets";

/// A durable map from string keys to string values.
pub(crate) trait KvBackend {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process backend for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryKv {
    entries: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MemoryKv {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

#[cfg(test)]
impl KvBackend for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct State {
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) budgets: BudgetMap,
}

pub(crate) struct StateStore<B: KvBackend> {
    backend: B,
}

impl<B: KvBackend> StateStore<B> {
    pub(crate) fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Read both documents. A key that is missing, unreadable or not valid
    /// JSON of the expected shape loads as empty; the failure is logged.
    /// Transactions load record by record, so one bad record is dropped
    /// on its own.
    pub(crate) fn load(&self) -> State {
        State {
            transactions: self.load_transactions(),
            budgets: self.load_key(BUDGETS_KEY),
        }
    }

    fn load_transactions(&self) -> Vec<Transaction> {
        let records: Vec<serde_json::Value> = self.load_key(TRANSACTIONS_KEY);
        let total = records.len();
        let transactions: Vec<Transaction> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(txn) => Some(txn),
                Err(err) => {
                    warn!(index, error = %err, "skipping unreadable saved transaction");
                    None
                }
            })
            .collect();
        if transactions.len() < total {
            warn!(
                key = TRANSACTIONS_KEY,
                kept = transactions.len(),
                dropped = total - transactions.len(),
                "some saved transactions could not be read"
            );
        }
        transactions
    }

    fn load_key<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(err) => {
                warn!(key, error = %err, "failed to read saved state, starting empty");
                return T::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    key,
                    bytes = raw.len(),
                    error = %err,
                    "failed to parse saved state, starting empty"
                );
                T::default()
            }
        }
    }

    pub(crate) fn save(&mut self, state: &State) -> Result<()> {
        let transactions = serde_json::to_string(&state.transactions)
            .context("Failed to serialize transactions")?;
        let budgets =
            serde_json::to_string(&state.budgets).context("Failed to serialize budgets")?;
        self.backend.set(TRANSACTIONS_KEY, &transactions)?;
        self.backend.set(BUDGETS_KEY, &budgets)?;
        debug!(
            transactions = state.transactions.len(),
            budgets = state.budgets.len(),
            "state saved"
        );
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }
}
