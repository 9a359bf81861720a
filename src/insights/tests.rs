#![allow(clippy::unwrap_used)]

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::aggregate::*;
use super::budget::*;
use super::*;
use crate::models::transaction::Amount;
use crate::models::{BudgetMap, Transaction, TransactionId, TransactionKind};

fn day(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
}

fn make_txn(kind: TransactionKind, category: &str, amount: Decimal, date: &str) -> Transaction {
    Transaction {
        id: TransactionId::generate(),
        description: format!("{category} {amount}"),
        amount: Amount::new(amount).unwrap(),
        kind,
        category: category.into(),
        date: DateTime::parse_from_rfc3339(&format!("{date}T12:00:00+00:00")).unwrap(),
    }
}

fn expense(category: &str, amount: Decimal, date: &str) -> Transaction {
    make_txn(TransactionKind::Expense, category, amount, date)
}

fn income(category: &str, amount: Decimal, date: &str) -> Transaction {
    make_txn(TransactionKind::Income, category, amount, date)
}

fn budgets(entries: &[(&str, Decimal)]) -> BudgetMap {
    entries.iter().map(|(k, v)| (*k, *v)).collect()
}

const NOW: &str = "2024-03-20";

// ── percent_of ────────────────────────────────────────────────

#[test]
fn test_percent_of_rounds_half_up() {
    assert_eq!(percent_of(dec!(1), dec!(8)), dec!(13)); // 12.5
    assert_eq!(percent_of(dec!(1), dec!(3)), dec!(33));
    assert_eq!(percent_of(dec!(1200), dec!(1000)), dec!(120));
}

#[test]
fn test_percent_of_zero_whole() {
    assert_eq!(percent_of(dec!(500), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(percent_of(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
}

// ── current_month / sum_by_category ──────────────────────────

#[test]
fn test_current_month_filters_year_and_month() {
    let txns = vec![
        expense("food", dec!(10), "2024-03-01"),
        expense("food", dec!(20), "2023-03-15"),
        expense("food", dec!(30), "2024-02-29"),
        income("salary", dec!(40), "2024-03-31"),
    ];
    let now = day(NOW);
    assert_eq!(current_month(&txns, now, None).len(), 2);
    let expenses = current_month(&txns, now, Some(TransactionKind::Expense));
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].value(), dec!(10));
}

#[test]
fn test_sum_by_category_absent_when_unused() {
    let txns = vec![
        expense("food", dec!(500), "2024-03-01"),
        expense("food", dec!(700), "2024-03-15"),
        expense("transport", dec!(40), "2024-03-02"),
    ];
    let totals = sum_by_category(&txns);
    assert_eq!(totals.get("food"), Some(&dec!(1200)));
    assert_eq!(totals.get("transport"), Some(&dec!(40)));
    assert!(!totals.contains_key("housing"));
}

#[test]
fn test_sum_by_category_preserves_total_per_kind() {
    let txns = vec![
        expense("food", dec!(12.34), "2024-03-01"),
        expense("housing", dec!(900), "2024-01-01"),
        expense("mystery", dec!(3.21), "2023-11-05"),
        expense("food", dec!(0.45), "2024-03-09"),
    ];
    let grand: Decimal = txns.iter().map(Transaction::value).sum();
    let summed: Decimal = sum_by_category(&txns).values().copied().sum();
    assert_eq!(summed, grand);
}

#[test]
fn test_sum_by_category_keeps_unknown_ids() {
    let txns = vec![expense("crypto", dec!(99), "2024-03-01")];
    assert_eq!(sum_by_category(&txns).get("crypto"), Some(&dec!(99)));
}

// ── top_category ──────────────────────────────────────────────

#[test]
fn test_top_category_picks_largest() {
    let txns = vec![
        expense("food", dec!(100), "2024-03-01"),
        expense("housing", dec!(900), "2024-03-02"),
        expense("food", dec!(150), "2024-03-03"),
    ];
    let top = top_category(&txns).unwrap();
    assert_eq!(top.id, "housing");
    assert_eq!(top.total, dec!(900));
}

#[test]
fn test_top_category_tie_follows_registry_order() {
    // "other" is inserted first but "food" is declared first.
    let txns = vec![
        expense("other", dec!(100), "2024-03-01"),
        expense("food", dec!(100), "2024-03-02"),
    ];
    assert_eq!(top_category(&txns).unwrap().id, "food");
}

#[test]
fn test_top_category_unknown_ids_after_registry() {
    let txns = vec![
        expense("aaa", dec!(50), "2024-03-01"),
        expense("shopping", dec!(50), "2024-03-02"),
        expense("zzz", dec!(75), "2024-03-03"),
    ];
    assert_eq!(top_category(&txns).unwrap().id, "zzz");

    let tied = vec![
        expense("aaa", dec!(50), "2024-03-01"),
        expense("shopping", dec!(50), "2024-03-02"),
    ];
    assert_eq!(top_category(&tied).unwrap().id, "shopping");
}

#[test]
fn test_top_category_ignores_income() {
    let txns = vec![
        income("salary", dec!(5000), "2024-03-01"),
        expense("food", dec!(10), "2024-03-01"),
    ];
    assert_eq!(top_category(&txns).unwrap().id, "food");
    assert!(top_category(&[income("salary", dec!(1), "2024-03-01")]).is_none());
}

// ── monthly_series ────────────────────────────────────────────

#[test]
fn test_monthly_series_always_six_entries() {
    let empty = monthly_series(&[], day(NOW));
    assert_eq!(empty.len(), SERIES_WINDOW);
    assert!(empty
        .iter()
        .all(|b| b.expenses == Decimal::ZERO && b.income == Decimal::ZERO));

    let many: Vec<Transaction> = (1..=12)
        .map(|m| expense("food", dec!(1), &format!("2023-{m:02}-10")))
        .collect();
    assert_eq!(monthly_series(&many, day(NOW)).len(), 6);
}

#[test]
fn test_monthly_series_window_and_order() {
    let labels: Vec<&str> = monthly_series(&[], day(NOW)).iter().map(|b| b.label).collect();
    assert_eq!(labels, vec!["Oct", "Nov", "Dec", "Jan", "Feb", "Mar"]);

    let june: Vec<u32> = monthly_series(&[], day("2024-06-01"))
        .iter()
        .map(|b| b.month)
        .collect();
    assert_eq!(june, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_monthly_series_buckets_by_kind() {
    let txns = vec![
        expense("food", dec!(100), "2024-03-01"),
        income("salary", dec!(2000), "2024-03-02"),
        expense("housing", dec!(800), "2024-01-05"),
        // same calendar month, previous year: shares the January bucket
        expense("food", dec!(25), "2023-01-20"),
        // outside the window
        expense("food", dec!(999), "2024-07-01"),
    ];
    let series = monthly_series(&txns, day(NOW));
    let march = series.last().unwrap();
    assert_eq!(march.label, "Mar");
    assert_eq!(march.expenses, dec!(100));
    assert_eq!(march.income, dec!(2000));

    let january = series.iter().find(|b| b.month == 1).unwrap();
    assert_eq!(january.expenses, dec!(825));
    assert!(series.iter().all(|b| b.month != 7));
}

// ── month_totals / ledger_totals / recent ────────────────────

#[test]
fn test_month_totals() {
    let txns = vec![
        income("salary", dec!(4000), "2024-03-01"),
        expense("housing", dec!(1000), "2024-03-02"),
        expense("food", dec!(250), "2024-03-03"),
        expense("food", dec!(999), "2024-02-03"),
    ];
    let totals = month_totals(&txns, day(NOW));
    assert_eq!(totals.income, dec!(4000));
    assert_eq!(totals.expenses, dec!(1250));
    assert_eq!(totals.net, dec!(2750));
    assert_eq!(totals.expense_ratio, Some(dec!(31))); // 31.25
}

#[test]
fn test_month_totals_no_ratio_without_income() {
    let txns = vec![expense("food", dec!(10), "2024-03-03")];
    let totals = month_totals(&txns, day(NOW));
    assert_eq!(totals.expense_ratio, None);
    assert_eq!(totals.net, dec!(-10));
}

#[test]
fn test_ledger_totals_all_time() {
    let txns = vec![
        income("salary", dec!(100), "2021-03-01"),
        expense("food", dec!(30), "2024-03-02"),
        expense("food", dec!(20), "2019-03-02"),
    ];
    let totals = ledger_totals(&txns);
    assert_eq!(totals.income, dec!(100));
    assert_eq!(totals.expenses, dec!(50));
    assert_eq!(totals.balance, dec!(50));
}

#[test]
fn test_recent_sorted_newest_first() {
    let txns = vec![
        expense("food", dec!(1), "2024-03-01"),
        expense("food", dec!(2), "2024-03-05"),
        expense("food", dec!(3), "2024-02-01"),
        expense("food", dec!(4), "2024-03-05"),
    ];
    let amounts: Vec<Decimal> = recent(&txns, 3).iter().map(|t| t.value()).collect();
    assert_eq!(amounts, vec![dec!(2), dec!(4), dec!(1)]);
    assert!(recent(&[], 10).is_empty());
}

// ── category_breakdown ────────────────────────────────────────

#[test]
fn test_category_breakdown_sorted_with_shares() {
    let txns = vec![
        expense("food", dec!(100), "2024-03-01"),
        expense("housing", dec!(300), "2024-03-01"),
        expense("mystery", dec!(1000), "2024-03-01"),
        income("salary", dec!(5000), "2024-03-01"),
    ];
    let rows = category_breakdown(&txns, TransactionKind::Expense);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category.id, "housing");
    assert_eq!(rows[0].share, dec!(75));
    assert_eq!(rows[0].color, "#FF9F40");
    assert_eq!(rows[1].category.id, "food");
    assert_eq!(rows[1].share, dec!(25));

    let income_rows = category_breakdown(&txns, TransactionKind::Income);
    assert_eq!(income_rows.len(), 1);
    assert_eq!(income_rows[0].share, dec!(100));
}

#[test]
fn test_category_breakdown_other_is_scoped_by_kind() {
    let txns = vec![
        expense("other", dec!(10), "2024-03-01"),
        income("other", dec!(90), "2024-03-01"),
    ];
    let expense_rows = category_breakdown(&txns, TransactionKind::Expense);
    assert_eq!(expense_rows[0].total, dec!(10));
    let income_rows = category_breakdown(&txns, TransactionKind::Income);
    assert_eq!(income_rows[0].total, dec!(90));
}

// ── budget_comparison ─────────────────────────────────────────

#[test]
fn test_budget_comparison_over_budget_scenario() {
    let txns = vec![
        expense("food", dec!(500), "2024-03-01"),
        expense("food", dec!(700), "2024-03-15"),
    ];
    let budgets = budgets(&[("food", dec!(1000))]);
    let lines = budget_comparison(&txns, &budgets, day(NOW));
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].category.id, "food");
    assert_eq!(lines[0].budget, dec!(1000));
    assert_eq!(lines[0].actual, dec!(1200));
    assert_eq!(lines[0].percentage, dec!(120));
}

#[test]
fn test_budget_comparison_three_tier_order() {
    let txns = vec![
        expense("food", dec!(50), "2024-03-01"),       // 50% of 100
        expense("housing", dec!(900), "2024-03-01"),   // 90% of 1000
        expense("shopping", dec!(20), "2024-03-01"),   // no budget
        expense("education", dec!(80), "2024-03-01"),  // no budget
        expense("food", dec!(999), "2024-02-01"),      // last month, ignored
    ];
    let budgets = budgets(&[
        ("food", dec!(100)),
        ("housing", dec!(1000)),
        ("utilities", dec!(200)), // budget, no spend: 0%
    ]);
    let ids: Vec<&str> = budget_comparison(&txns, &budgets, day(NOW))
        .iter()
        .map(|l| l.category.id)
        .collect();
    assert_eq!(
        ids,
        vec!["housing", "food", "utilities", "education", "shopping"]
    );
}

#[test]
fn test_budget_comparison_budgeted_lines_descend() {
    let txns = vec![
        expense("food", dec!(10), "2024-03-01"),
        expense("transport", dec!(90), "2024-03-01"),
        expense("personal", dec!(45), "2024-03-01"),
    ];
    let budgets = budgets(&[
        ("food", dec!(100)),
        ("transport", dec!(100)),
        ("personal", dec!(100)),
    ]);
    let lines = budget_comparison(&txns, &budgets, day(NOW));
    for pair in lines.windows(2) {
        assert!(pair[0].percentage >= pair[1].percentage);
    }
}

#[test]
fn test_budget_comparison_zero_budget_counts_as_unbudgeted() {
    let txns = vec![expense("food", dec!(10), "2024-03-01")];
    let budgets = budgets(&[("food", Decimal::ZERO)]);
    let lines = budget_comparison(&txns, &budgets, day(NOW));
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].percentage, Decimal::ZERO);
    assert!(!lines[0].has_budget());
}

// ── budget_utilization ────────────────────────────────────────

#[test]
fn test_utilization_without_budget() {
    let txns = vec![expense("transport", dec!(300), "2024-03-05")];
    let status = budget_utilization(&txns, &BudgetMap::new(), day(NOW));
    assert_eq!(
        status,
        BudgetStatus {
            total_spent: dec!(300),
            total_budget: Decimal::ZERO,
            percentage: Decimal::ZERO,
            remaining: Decimal::ZERO,
            over_budget: false,
        }
    );
}

#[test]
fn test_utilization_over_budget() {
    let txns = vec![
        expense("food", dec!(700), "2024-03-05"),
        expense("mystery", dec!(600), "2024-03-06"),
    ];
    let budgets = budgets(&[("food", dec!(500)), ("housing", dec!(500))]);
    let status = budget_utilization(&txns, &budgets, day(NOW));
    assert_eq!(status.total_spent, dec!(1300));
    assert_eq!(status.total_budget, dec!(1000));
    assert_eq!(status.percentage, dec!(130));
    assert_eq!(status.remaining, dec!(-300));
    assert!(status.over_budget);
}

#[test]
fn test_utilization_under_budget() {
    let txns = vec![expense("food", dec!(250), "2024-03-05")];
    let budgets = budgets(&[("food", dec!(1000))]);
    let status = budget_utilization(&txns, &budgets, day(NOW));
    assert_eq!(status.percentage, dec!(25));
    assert_eq!(status.remaining, dec!(750));
    assert!(!status.over_budget);
}

// ── categories_at_risk ────────────────────────────────────────

#[test]
fn test_at_risk_over_budget_scenario() {
    let txns = vec![
        expense("food", dec!(500), "2024-03-01"),
        expense("food", dec!(700), "2024-03-15"),
    ];
    let budgets = budgets(&[("food", dec!(1000))]);
    let risk = categories_at_risk(&txns, &budgets, day(NOW));
    assert_eq!(risk.over_budget.len(), 1);
    assert_eq!(risk.over_budget[0].category.id, "food");
    assert_eq!(risk.over_budget[0].percentage, dec!(120));
    assert!(risk.approaching.is_empty());
}

#[test]
fn test_at_risk_approaching_threshold() {
    let txns = vec![
        expense("food", dec!(80), "2024-03-01"),      // exactly 80%
        expense("transport", dec!(79), "2024-03-01"), // just under
        expense("housing", dec!(100), "2024-03-01"),  // exactly at budget
        expense("shopping", dec!(150), "2024-03-01"), // over
        expense("healthcare", dec!(300), "2024-03-01"), // over, further
    ];
    let budgets = budgets(&[
        ("food", dec!(100)),
        ("transport", dec!(100)),
        ("housing", dec!(100)),
        ("shopping", dec!(100)),
        ("healthcare", dec!(100)),
    ]);
    let risk = categories_at_risk(&txns, &budgets, day(NOW));
    let over: Vec<&str> = risk.over_budget.iter().map(|l| l.category.id).collect();
    let near: Vec<&str> = risk.approaching.iter().map(|l| l.category.id).collect();
    assert_eq!(over, vec!["healthcare", "shopping"]);
    assert_eq!(near, vec!["housing", "food"]);
}

#[test]
fn test_at_risk_lists_are_disjoint() {
    let txns = vec![
        expense("food", dec!(100), "2024-03-01"),
        expense("transport", dec!(101), "2024-03-01"),
        expense("utilities", dec!(85), "2024-03-01"),
    ];
    let budgets = budgets(&[
        ("food", dec!(100)),
        ("transport", dec!(100)),
        ("utilities", dec!(100)),
    ]);
    let risk = categories_at_risk(&txns, &budgets, day(NOW));
    for line in &risk.over_budget {
        assert!(risk
            .approaching
            .iter()
            .all(|other| other.category.id != line.category.id));
    }
    assert_eq!(risk.over_budget.len() + risk.approaching.len(), 3);
}

#[test]
fn test_at_risk_ignores_unbudgeted() {
    let txns = vec![expense("food", dec!(5000), "2024-03-01")];
    let risk = categories_at_risk(&txns, &BudgetMap::new(), day(NOW));
    assert_eq!(risk, AtRisk::default());
}

// ── days / daily_allowance ────────────────────────────────────

#[test]
fn test_days_in_month() {
    assert_eq!(days_in_month(day("2024-02-10")), 29);
    assert_eq!(days_in_month(day("2023-02-10")), 28);
    assert_eq!(days_in_month(day("2024-12-31")), 31);
    assert_eq!(days_in_month(day("2024-04-01")), 30);
}

#[test]
fn test_days_left_in_month() {
    assert_eq!(days_left_in_month(day(NOW)), 11);
    assert_eq!(days_left_in_month(day("2024-03-31")), 0);
    assert_eq!(days_left_in_month(day("2024-02-01")), 28);
}

fn status_with_remaining(remaining: Decimal) -> BudgetStatus {
    BudgetStatus {
        total_spent: Decimal::ZERO,
        total_budget: remaining.max(Decimal::ZERO),
        percentage: Decimal::ZERO,
        remaining,
        over_budget: false,
    }
}

#[test]
fn test_daily_allowance_spreads_remaining() {
    // 11 days left after March 20th
    let allowance = daily_allowance(&status_with_remaining(dec!(110)), day(NOW));
    assert_eq!(allowance, dec!(10));
}

#[test]
fn test_daily_allowance_last_day_guard() {
    let allowance = daily_allowance(&status_with_remaining(dec!(45)), day("2024-03-31"));
    assert_eq!(allowance, dec!(45));
}

#[test]
fn test_daily_allowance_zero_when_nothing_left() {
    assert_eq!(
        daily_allowance(&status_with_remaining(Decimal::ZERO), day(NOW)),
        Decimal::ZERO
    );
    assert_eq!(
        daily_allowance(&status_with_remaining(dec!(-50)), day(NOW)),
        Decimal::ZERO
    );
}

// ── largest_expense ───────────────────────────────────────────

#[test]
fn test_largest_expense_first_wins_ties() {
    let txns = vec![
        expense("food", dec!(40), "2024-03-01"),
        expense("housing", dec!(900), "2024-03-02"),
        expense("shopping", dec!(900), "2024-03-03"),
        expense("food", dec!(5000), "2024-02-03"),
        income("salary", dec!(9000), "2024-03-01"),
    ];
    let largest = largest_expense(&txns, day(NOW)).unwrap();
    assert_eq!(largest.category, "housing");
    assert_eq!(largest.value(), dec!(900));
}

#[test]
fn test_largest_expense_none_without_month_expenses() {
    let txns = vec![income("salary", dec!(9000), "2024-03-01")];
    assert!(largest_expense(&txns, day(NOW)).is_none());
}

// ── empty inputs / purity ─────────────────────────────────────

#[test]
fn test_empty_inputs_give_zero_shapes() {
    let now = day(NOW);
    let empty = BudgetMap::new();
    let none: Vec<Transaction> = Vec::new();
    assert!(current_month(&[], now, None).is_empty());
    assert!(sum_by_category(&none).is_empty());
    assert!(top_category(&none).is_none());
    assert_eq!(monthly_series(&[], now).len(), 6);
    assert!(budget_comparison(&[], &empty, now).is_empty());
    let status = budget_utilization(&[], &empty, now);
    assert_eq!(status.total_spent, Decimal::ZERO);
    assert_eq!(status.percentage, Decimal::ZERO);
    assert!(!status.over_budget);
    assert_eq!(categories_at_risk(&[], &empty, now), AtRisk::default());
    assert_eq!(daily_allowance(&status, now), Decimal::ZERO);
    assert!(largest_expense(&[], now).is_none());
    assert!(category_breakdown(&[], TransactionKind::Expense).is_empty());
    assert_eq!(ledger_totals(&[]).balance, Decimal::ZERO);
}

#[test]
fn test_repeated_calls_are_identical() {
    let txns = vec![
        expense("food", dec!(80), "2024-03-01"),
        expense("housing", dec!(1200), "2024-03-02"),
        income("salary", dec!(3000), "2024-03-03"),
        expense("other", dec!(80), "2024-01-03"),
    ];
    let budgets = budgets(&[("food", dec!(100)), ("housing", dec!(1000))]);
    let now = day(NOW);
    assert_eq!(
        SpendingInsights::compute(&txns, &budgets, now),
        SpendingInsights::compute(&txns, &budgets, now)
    );
    assert_eq!(
        budget_comparison(&txns, &budgets, now),
        budget_comparison(&txns, &budgets, now)
    );
    assert_eq!(monthly_series(&txns, now), monthly_series(&txns, now));
}

#[test]
fn test_spending_insights_bundle() {
    let txns = vec![
        expense("food", dec!(80), "2024-03-01"),
        expense("housing", dec!(1200), "2024-03-02"),
        expense("education", dec!(5000), "2023-12-02"),
    ];
    let budgets = budgets(&[("food", dec!(100)), ("housing", dec!(2000))]);
    let insights = SpendingInsights::compute(&txns, &budgets, day(NOW));
    assert_eq!(insights.status.total_spent, dec!(1280));
    assert_eq!(insights.status.remaining, dec!(820));
    assert_eq!(insights.days_left, 11);
    assert_eq!(insights.top_category.unwrap().id, "housing");
    assert_eq!(insights.largest_expense.unwrap().value(), dec!(1200));
    assert_eq!(insights.at_risk.approaching.len(), 1);
    assert_eq!(insights.at_risk.approaching[0].category.id, "food");
    assert_eq!(insights.daily_allowance, dec!(820) / dec!(11));
}

// ── oversized stored amounts ──────────────────────────────────

fn stored(kind: &str, category: &str, amount: &str, date: &str) -> Transaction {
    serde_json::from_str(&format!(
        r#"{{"description":"stored","amount":{amount},"type":"{kind}","category":"{category}","date":"{date}T12:00:00+00:00"}}"#
    ))
    .unwrap()
}

#[test]
fn test_oversized_stored_amounts_saturate() {
    let txns = vec![
        stored("expense", "food", "5e28", "2024-03-02"),
        stored("expense", "food", "5e28", "2024-03-03"),
        stored("income", "salary", "5e28", "2024-03-04"),
        stored("income", "salary", "5e28", "2024-03-05"),
    ];
    let budgets = budgets(&[("food", dec!(100))]);
    let now = day(NOW);

    let totals = ledger_totals(&txns);
    assert_eq!(totals.expenses, Decimal::MAX);
    assert_eq!(totals.income, Decimal::MAX);
    assert_eq!(totals.balance, Decimal::ZERO);

    let month = month_totals(&txns, now);
    assert_eq!(month.expenses, Decimal::MAX);
    assert_eq!(month.expense_ratio, Some(dec!(100)));

    assert_eq!(sum_by_category(&txns)["food"], Decimal::MAX);
    assert_eq!(monthly_series(&txns, now)[5].expenses, Decimal::MAX);
    assert_eq!(
        category_breakdown(&txns, TransactionKind::Expense)[0].share,
        dec!(100)
    );

    let insights = SpendingInsights::compute(&txns, &budgets, now);
    assert_eq!(insights.status.total_spent, Decimal::MAX);
    assert!(insights.status.over_budget);
    assert_eq!(insights.at_risk.over_budget.len(), 1);
    assert_eq!(insights.top_category.unwrap().total, Decimal::MAX);
}

#[test]
fn test_approaching_threshold_with_large_budget() {
    let txns = vec![expense("food", dec!(800000000000), "2024-03-02")];
    let budgets = budgets(&[("food", dec!(1000000000000))]);
    let at_risk = categories_at_risk(&txns, &budgets, day(NOW));
    assert_eq!(at_risk.approaching.len(), 1);
    assert!(at_risk.over_budget.is_empty());
}
