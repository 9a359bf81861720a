use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::cmp::Ordering;

use super::aggregate::{current_month, sum_by_category};
use super::{percent_of, saturating_sum};
use crate::models::category::{self, Category};
use crate::models::{BudgetMap, Transaction, TransactionKind};

/// Share of a budget at which a category counts as approaching its limit.
const APPROACHING_NUMERATOR: i64 = 4;
const APPROACHING_DENOMINATOR: i64 = 5;

/// Budget versus actual spend for one expense category this month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetLine {
    pub(crate) category: Category,
    pub(crate) budget: Decimal,
    pub(crate) actual: Decimal,
    /// `round(actual / budget * 100)`, or 0 without a budget.
    pub(crate) percentage: Decimal,
}

impl BudgetLine {
    fn new(category: Category, budget: Decimal, actual: Decimal) -> Self {
        Self {
            category,
            budget,
            actual,
            percentage: percent_of(actual, budget),
        }
    }

    pub(crate) fn has_budget(&self) -> bool {
        self.budget > Decimal::ZERO
    }

    pub(crate) fn is_over(&self) -> bool {
        self.has_budget() && self.actual > self.budget
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetStatus {
    pub(crate) total_spent: Decimal,
    pub(crate) total_budget: Decimal,
    pub(crate) percentage: Decimal,
    pub(crate) remaining: Decimal,
    pub(crate) over_budget: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct AtRisk {
    pub(crate) over_budget: Vec<BudgetLine>,
    pub(crate) approaching: Vec<BudgetLine>,
}

/// Everything the insights view shows, computed in one pass over the inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SpendingInsights<'a> {
    pub(crate) status: BudgetStatus,
    pub(crate) at_risk: AtRisk,
    pub(crate) top_category: Option<super::CategoryTotal>,
    pub(crate) largest_expense: Option<&'a Transaction>,
    pub(crate) days_left: u32,
    pub(crate) daily_allowance: Decimal,
}

impl<'a> SpendingInsights<'a> {
    pub(crate) fn compute(
        transactions: &'a [Transaction],
        budgets: &BudgetMap,
        now: NaiveDate,
    ) -> Self {
        let status = budget_utilization(transactions, budgets, now);
        let daily_allowance = daily_allowance(&status, now);
        let month_expenses = current_month(transactions, now, Some(TransactionKind::Expense));
        Self {
            at_risk: categories_at_risk(transactions, budgets, now),
            top_category: super::top_category(month_expenses.iter().copied()),
            largest_expense: largest_expense(transactions, now),
            days_left: days_left_in_month(now),
            daily_allowance,
            status,
        }
    }
}

fn month_expense_lines(
    transactions: &[Transaction],
    budgets: &BudgetMap,
    now: NaiveDate,
) -> Vec<BudgetLine> {
    let spent = sum_by_category(current_month(
        transactions,
        now,
        Some(TransactionKind::Expense),
    ));
    category::EXPENSE_CATEGORIES
        .iter()
        .map(|c| {
            let actual = spent.get(c.id).copied().unwrap_or(Decimal::ZERO);
            BudgetLine::new(*c, budgets.get(c.id), actual)
        })
        .collect()
}

/// Budgeted-first ordering: budgeted lines by percentage, then unbudgeted
/// lines by actual spend, both descending.
fn compare_lines(a: &BudgetLine, b: &BudgetLine) -> Ordering {
    match (a.has_budget(), b.has_budget()) {
        (true, true) => b.percentage.cmp(&a.percentage),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => b.actual.cmp(&a.actual),
    }
}

/// Registered expense categories with a budget or with spend this month.
pub(crate) fn budget_comparison(
    transactions: &[Transaction],
    budgets: &BudgetMap,
    now: NaiveDate,
) -> Vec<BudgetLine> {
    let mut lines: Vec<BudgetLine> = month_expense_lines(transactions, budgets, now)
        .into_iter()
        .filter(|l| l.has_budget() || l.actual > Decimal::ZERO)
        .collect();
    lines.sort_by(compare_lines);
    lines
}

pub(crate) fn budget_utilization(
    transactions: &[Transaction],
    budgets: &BudgetMap,
    now: NaiveDate,
) -> BudgetStatus {
    let total_spent = saturating_sum(
        current_month(transactions, now, Some(TransactionKind::Expense))
            .iter()
            .map(|t| t.value()),
    );
    let total_budget = budgets.total();

    // Without a budget there is nothing to be under or over.
    let remaining = if total_budget > Decimal::ZERO {
        total_budget - total_spent
    } else {
        Decimal::ZERO
    };

    BudgetStatus {
        total_spent,
        total_budget,
        percentage: percent_of(total_spent, total_budget),
        remaining,
        over_budget: total_budget > Decimal::ZERO && total_spent > total_budget,
    }
}

pub(crate) fn categories_at_risk(
    transactions: &[Transaction],
    budgets: &BudgetMap,
    now: NaiveDate,
) -> AtRisk {
    let mut at_risk = AtRisk::default();
    for line in month_expense_lines(transactions, budgets, now) {
        if !line.has_budget() {
            continue;
        }
        if line.is_over() {
            at_risk.over_budget.push(line);
        } else if approaching_limit(&line) {
            at_risk.approaching.push(line);
        }
    }
    at_risk.over_budget.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    at_risk.approaching.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    at_risk
}

/// `actual / budget >= 4/5`; only called for lines with a budget. A ratio
/// too large to represent is past the threshold.
fn approaching_limit(line: &BudgetLine) -> bool {
    let threshold =
        Decimal::from(APPROACHING_NUMERATOR) / Decimal::from(APPROACHING_DENOMINATOR);
    line.actual
        .checked_div(line.budget)
        .map_or(true, |ratio| ratio >= threshold)
}

pub(crate) fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map_or(31, |last| last.day())
}

/// Days after `now` until the month ends; 0 on the last day.
pub(crate) fn days_left_in_month(now: NaiveDate) -> u32 {
    days_in_month(now).saturating_sub(now.day())
}

/// Remaining budget spread over the rest of the month.
pub(crate) fn daily_allowance(status: &BudgetStatus, now: NaiveDate) -> Decimal {
    if status.remaining <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let days = Decimal::from(days_left_in_month(now).max(1));
    status
        .remaining
        .checked_div(days)
        .unwrap_or(Decimal::ZERO)
}

/// The single largest expense this month; the first of equal amounts wins.
pub(crate) fn largest_expense(transactions: &[Transaction], now: NaiveDate) -> Option<&Transaction> {
    current_month(transactions, now, Some(TransactionKind::Expense))
        .into_iter()
        .fold(None, |best: Option<&Transaction>, txn| match best {
            Some(b) if txn.amount <= b.amount => Some(b),
            _ => Some(txn),
        })
}
