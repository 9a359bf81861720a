use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Monthly spending limits keyed by expense category id.
///
/// A missing id means "no budget set", which is distinct from a stored
/// limit of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct BudgetMap(BTreeMap<String, Decimal>);

impl BudgetMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replace the limit for `category`. Negative input is clamped to zero.
    pub(crate) fn set(&mut self, category: impl Into<String>, amount: Decimal) {
        self.0.insert(category.into(), amount.max(Decimal::ZERO));
    }

    pub(crate) fn remove(&mut self, category: &str) -> Option<Decimal> {
        self.0.remove(category)
    }

    /// Swap in a whole new map; entries absent from `other` are dropped.
    pub(crate) fn replace_all(&mut self, other: BudgetMap) {
        self.0 = other.0;
    }

    pub(crate) fn get(&self, category: &str) -> Decimal {
        self.0.get(category).copied().unwrap_or(Decimal::ZERO)
    }

    pub(crate) fn contains(&self, category: &str) -> bool {
        self.0.contains_key(category)
    }

    pub(crate) fn total(&self) -> Decimal {
        self.0
            .values()
            .fold(Decimal::ZERO, |total, amount| total.saturating_add(*amount))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>> FromIterator<(K, Decimal)> for BudgetMap {
    fn from_iter<I: IntoIterator<Item = (K, Decimal)>>(iter: I) -> Self {
        let mut map = BudgetMap::new();
        for (category, amount) in iter {
            map.set(category, amount);
        }
        map
    }
}
