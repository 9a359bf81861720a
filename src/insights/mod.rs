//! Pure aggregations over transactions and budgets.
//!
//! Every function takes the reference date explicitly and never touches
//! storage or the clock, so identical inputs give identical output.

mod aggregate;
mod budget;

use rust_decimal::{Decimal, RoundingStrategy};

pub(crate) use aggregate::{
    category_breakdown, current_month, ledger_totals, month_totals, monthly_series, recent,
    top_category, CategoryTotal, SERIES_WINDOW,
};
pub(crate) use budget::{budget_comparison, days_in_month, BudgetLine, SpendingInsights};

/// `round(part / whole * 100)` with halves rounded up, or 0 when `whole`
/// is not positive.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::ZERO, |pct| {
            pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        })
}

/// Sum that pins at `Decimal::MAX` instead of overflowing.
pub(crate) fn saturating_sum<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

#[cfg(test)]
mod tests;
