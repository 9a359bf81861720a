use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::{percent_of, saturating_sum};
use crate::models::category::{self, Category};
use crate::models::{Transaction, TransactionKind};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Number of months shown by [`monthly_series`], including the current one.
pub(crate) const SERIES_WINDOW: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryTotal {
    pub(crate) id: String,
    pub(crate) total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthBucket {
    /// Calendar month, 1-12.
    pub(crate) month: u32,
    pub(crate) label: &'static str,
    pub(crate) expenses: Decimal,
    pub(crate) income: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthTotals {
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) net: Decimal,
    /// Expenses as a rounded percentage of income, when both are non-zero.
    pub(crate) expense_ratio: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LedgerTotals {
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryShare {
    pub(crate) category: Category,
    pub(crate) color: &'static str,
    pub(crate) total: Decimal,
    /// Rounded percentage of all listed totals.
    pub(crate) share: Decimal,
}

pub(crate) fn same_month(date: NaiveDate, now: NaiveDate) -> bool {
    date.year() == now.year() && date.month() == now.month()
}

/// Transactions dated in the same (year, month) as `now`, optionally
/// restricted to one kind.
pub(crate) fn current_month(
    transactions: &[Transaction],
    now: NaiveDate,
    kind: Option<TransactionKind>,
) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| same_month(t.day(), now))
        .filter(|t| kind.map_or(true, |k| t.kind == k))
        .collect()
}

/// Sum amounts per raw category id. Ids without transactions are absent.
pub(crate) fn sum_by_category<'a, I>(transactions: I) -> BTreeMap<String, Decimal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for txn in transactions {
        let total = totals.entry(txn.category.clone()).or_insert(Decimal::ZERO);
        *total = total.saturating_add(txn.value());
    }
    totals
}

/// Highest-spending expense category.
///
/// Totals are scanned in expense registry order, then unregistered ids in
/// ascending order; only a strictly larger total replaces the leader, so
/// ties go to the earlier entry.
pub(crate) fn top_category<'a, I>(transactions: I) -> Option<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let totals = sum_by_category(transactions.into_iter().filter(|t| t.is_expense()));

    let registered = category::EXPENSE_CATEGORIES
        .iter()
        .filter_map(|c| totals.get_key_value(c.id));
    let unregistered = totals
        .iter()
        .filter(|(id, _)| !category::is_known(id, TransactionKind::Expense));

    let mut best: Option<CategoryTotal> = None;
    for (id, total) in registered.chain(unregistered) {
        let leading = best.as_ref().map_or(Decimal::ZERO, |b| b.total);
        if *total > leading {
            best = Some(CategoryTotal {
                id: id.clone(),
                total: *total,
            });
        }
    }
    best
}

/// Expense and income per calendar month (any year), windowed to the
/// current month and the five before it, oldest first.
pub(crate) fn monthly_series(transactions: &[Transaction], now: NaiveDate) -> Vec<MonthBucket> {
    let mut buckets: Vec<MonthBucket> = MONTH_LABELS
        .iter()
        .enumerate()
        .map(|(idx, label)| MonthBucket {
            month: idx as u32 + 1,
            label: *label,
            expenses: Decimal::ZERO,
            income: Decimal::ZERO,
        })
        .collect();

    for txn in transactions {
        let bucket = &mut buckets[txn.day().month0() as usize];
        match txn.kind {
            TransactionKind::Expense => {
                bucket.expenses = bucket.expenses.saturating_add(txn.value());
            }
            TransactionKind::Income => {
                bucket.income = bucket.income.saturating_add(txn.value());
            }
        }
    }

    let current = now.month0() as usize;
    (0..SERIES_WINDOW)
        .rev()
        .map(|back| buckets[(current + 12 - back) % 12].clone())
        .collect()
}

pub(crate) fn month_totals(transactions: &[Transaction], now: NaiveDate) -> MonthTotals {
    let (income, expenses) = current_month(transactions, now, None).iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expenses), t| match t.kind {
            TransactionKind::Income => (income.saturating_add(t.value()), expenses),
            TransactionKind::Expense => (income, expenses.saturating_add(t.value())),
        },
    );

    let expense_ratio = (income > Decimal::ZERO && expenses > Decimal::ZERO)
        .then(|| percent_of(expenses, income));

    MonthTotals {
        income,
        expenses,
        net: income - expenses,
        expense_ratio,
    }
}

pub(crate) fn ledger_totals(transactions: &[Transaction]) -> LedgerTotals {
    let income = saturating_sum(
        transactions
            .iter()
            .filter(|t| t.is_income())
            .map(Transaction::value),
    );
    let expenses = saturating_sum(
        transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(Transaction::value),
    );
    LedgerTotals {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// Newest first by date; equal dates keep their stored order.
pub(crate) fn recent(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

/// Per-category totals for one kind, limited to registered categories with
/// a non-zero total, largest first.
pub(crate) fn category_breakdown(
    transactions: &[Transaction],
    kind: TransactionKind,
) -> Vec<CategoryShare> {
    let totals = sum_by_category(transactions.iter().filter(|t| t.kind == kind));

    let mut rows: Vec<(Category, Decimal)> = category::categories(kind)
        .iter()
        .filter_map(|c| {
            totals
                .get(c.id)
                .filter(|total| **total > Decimal::ZERO)
                .map(|total| (*c, *total))
        })
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));

    let grand_total = saturating_sum(rows.iter().map(|(_, total)| *total));
    rows.into_iter()
        .map(|(category, total)| CategoryShare {
            category,
            color: category.color(),
            total,
            share: percent_of(total, grand_total),
        })
        .collect()
}
