use anyhow::Result;
use chrono::{DateTime, FixedOffset, Local, TimeZone};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::LedgerError;
use crate::models::{BudgetMap, NewTransaction, Transaction, TransactionId};
use crate::store::{KvBackend, State, StateStore};

/// Owns the in-memory state and writes it through to the store after
/// every change. A change whose save fails is not applied.
pub(crate) struct Ledger<B: KvBackend> {
    state: State,
    store: StateStore<B>,
}

impl<B: KvBackend> Ledger<B> {
    pub(crate) fn open(backend: B) -> Result<Self> {
        Self::open_in_zone(backend, &Local)
    }

    /// Records saved without an id also carry UTC timestamps; they are moved
    /// into `zone` so they group by the calendar day they were entered on.
    pub(crate) fn open_in_zone<Tz: TimeZone>(backend: B, zone: &Tz) -> Result<Self> {
        let mut store = StateStore::new(backend);
        let mut state = store.load();

        let assigned = upgrade_legacy(&mut state.transactions, zone);
        if assigned > 0 {
            info!(assigned, "assigned ids and local dates to transactions saved without an id");
            store.save(&state)?;
        }

        Ok(Self { state, store })
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub(crate) fn budgets(&self) -> &BudgetMap {
        &self.state.budgets
    }

    fn commit(&mut self, next: State) -> Result<()> {
        self.store.save(&next)?;
        self.state = next;
        Ok(())
    }

    pub(crate) fn add(
        &mut self,
        new: NewTransaction,
        date: DateTime<FixedOffset>,
    ) -> Result<Transaction> {
        let txn = new.into_transaction(date);
        let mut next = self.state.clone();
        next.transactions.push(txn.clone());
        self.commit(next)?;
        info!(id = %txn.id, kind = %txn.kind, amount = %txn.amount, "transaction added");
        Ok(txn)
    }

    /// Remove the transaction whose id equals `id`, or whose id uniquely
    /// starts with it.
    pub(crate) fn delete(&mut self, id: &str) -> Result<Transaction> {
        let index = self.find_index(id.trim())?;
        let mut next = self.state.clone();
        let removed = next.transactions.remove(index);
        self.commit(next)?;
        info!(id = %removed.id, "transaction deleted");
        Ok(removed)
    }

    fn find_index(&self, needle: &str) -> Result<usize, LedgerError> {
        let txns = &self.state.transactions;
        if let Some(index) = txns.iter().position(|t| t.id.to_string() == needle) {
            return Ok(index);
        }
        let mut matches = txns
            .iter()
            .enumerate()
            .filter(|(_, t)| t.id.matches_prefix(needle))
            .map(|(index, _)| index);
        match (matches.next(), matches.next()) {
            (Some(index), None) => Ok(index),
            (Some(_), Some(_)) => Err(LedgerError::AmbiguousId(needle.to_string())),
            (None, _) => Err(LedgerError::TransactionNotFound(needle.to_string())),
        }
    }

    /// Set the monthly limit for one category; negative amounts store as 0.
    pub(crate) fn set_budget(&mut self, category: &str, amount: Decimal) -> Result<()> {
        let mut next = self.state.clone();
        next.budgets.set(category, amount);
        self.commit(next)
    }

    /// Returns whether a budget existed for `category`.
    pub(crate) fn clear_budget(&mut self, category: &str) -> Result<bool> {
        let mut next = self.state.clone();
        let existed = next.budgets.remove(category).is_some();
        if existed {
            self.commit(next)?;
        }
        Ok(existed)
    }

    pub(crate) fn replace_budgets(&mut self, budgets: BudgetMap) -> Result<()> {
        let mut next = self.state.clone();
        next.budgets.replace_all(budgets);
        self.commit(next)
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &StateStore<B> {
        &self.store
    }
}

fn upgrade_legacy<Tz: TimeZone>(transactions: &mut [Transaction], zone: &Tz) -> usize {
    let mut assigned = 0;
    for txn in transactions.iter_mut().filter(|t| t.id.is_unassigned()) {
        txn.id = TransactionId::generate();
        txn.date = txn.date.with_timezone(zone).fixed_offset();
        assigned += 1;
    }
    assigned
}
