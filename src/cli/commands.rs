use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use super::{parse_limit, take_flag, Session};
use crate::error::LedgerError;
use crate::export;
use crate::insights::{
    budget_comparison, category_breakdown, current_month, days_in_month, ledger_totals,
    month_totals, monthly_series, recent, top_category, BudgetLine, SpendingInsights,
    SERIES_WINDOW,
};
use crate::models::category::{self, Category};
use crate::models::transaction::Amount;
use crate::models::{BudgetMap, NewTransaction, Transaction, TransactionKind};
use crate::report::{bar, format_amount, format_percent, truncate};

const DEFAULT_LIST_LIMIT: usize = 10;
const SUMMARY_RECENT: usize = 5;
const BAR_WIDTH: usize = 30;

// ── Transactions ─────────────────────────────────────────────

pub(super) fn cmd_add(args: &[String], s: &mut Session<'_>) -> Result<()> {
    let mut args = args.to_vec();
    let date = take_flag(&mut args, "--date")?;
    let [kind, amount, category, description @ ..] = args.as_slice() else {
        bail!("Usage: finvis add <expense|income> <amount> <category> <description...> [--date YYYY-MM-DD]");
    };

    let kind_value = TransactionKind::parse(kind)?;
    let category = resolve_category(category, kind_value)?;
    let new = NewTransaction::parse(kind, amount, category.id, &description.join(" "))?;
    let date = match date {
        Some(day) => on_day(&day, s.now)?,
        None => s.now,
    };

    let txn = s.ledger.add(new, date)?;
    writeln!(
        s.out,
        "Added {} {} in {} on {}: {} [{}]",
        txn.kind,
        format_amount(txn.value()),
        category,
        txn.day().format("%Y-%m-%d"),
        txn.description,
        txn.id.short()
    )?;
    Ok(())
}

pub(super) fn cmd_list(args: &[String], s: &mut Session<'_>) -> Result<()> {
    let mut args = args.to_vec();
    let limit = match take_flag(&mut args, "--limit")? {
        Some(raw) => parse_limit(&raw)?,
        None => DEFAULT_LIST_LIMIT,
    };

    let txns = s.ledger.transactions();
    if txns.is_empty() {
        writeln!(s.out, "No transactions")?;
        return Ok(());
    }

    let totals = ledger_totals(txns);
    writeln!(
        s.out,
        "Total income: {}   Total expenses: {}   Balance: {}",
        format_amount(totals.income),
        format_amount(totals.expenses),
        format_amount(totals.balance)
    )?;
    writeln!(s.out)?;
    write_transaction_table(s.out, &recent(txns, limit))
}

pub(super) fn cmd_delete(args: &[String], s: &mut Session<'_>) -> Result<()> {
    let [id] = args else {
        bail!("Usage: finvis delete <id>");
    };
    let removed = s.ledger.delete(id)?;
    writeln!(
        s.out,
        "Deleted {} {} {} [{}]",
        removed.kind,
        format_amount(removed.value()),
        removed.description,
        removed.id.short()
    )?;
    Ok(())
}

// ── Budgets ──────────────────────────────────────────────────

pub(super) fn cmd_budget(args: &[String], s: &mut Session<'_>) -> Result<()> {
    match args.first().map(String::as_str) {
        None | Some("list") => budget_list(s),
        Some("set") => budget_set(&args[1..], s),
        Some("clear") => budget_clear(&args[1..], s),
        Some(other) => bail!("Unknown budget command: {other}. Use list, set or clear"),
    }
}

fn budget_list(s: &mut Session<'_>) -> Result<()> {
    let budgets = s.ledger.budgets();
    if budgets.is_empty() {
        writeln!(
            s.out,
            "No budgets set. Use `finvis budget set <category> <amount>`"
        )?;
        return Ok(());
    }

    writeln!(s.out, "{:<24} {:>14}", "Category", "Monthly limit")?;
    writeln!(s.out, "{}", "─".repeat(39))?;
    for cat in category::EXPENSE_CATEGORIES {
        if budgets.contains(cat.id) {
            writeln!(
                s.out,
                "{:<24} {:>14}",
                cat.to_string(),
                format_amount(budgets.get(cat.id))
            )?;
        }
    }
    for (id, amount) in budgets.iter() {
        if !category::is_known(id, TransactionKind::Expense) {
            writeln!(s.out, "{:<24} {:>14}", format!("? {id}"), format_amount(amount))?;
        }
    }
    writeln!(s.out, "{}", "─".repeat(39))?;
    writeln!(s.out, "{:<24} {:>14}", "Total", format_amount(budgets.total()))?;
    Ok(())
}

fn budget_set(args: &[String], s: &mut Session<'_>) -> Result<()> {
    let [category, amount] = args else {
        bail!("Usage: finvis budget set <category> <amount>");
    };
    let category = resolve_category(category, TransactionKind::Expense)?;
    let amount = parse_budget_amount(amount)?;

    s.ledger.set_budget(category.id, amount)?;
    writeln!(
        s.out,
        "Budget for {category} set to {}",
        format_amount(s.ledger.budgets().get(category.id))
    )?;
    Ok(())
}

fn budget_clear(args: &[String], s: &mut Session<'_>) -> Result<()> {
    let [target] = args else {
        bail!("Usage: finvis budget clear <category|--all>");
    };
    if target == "--all" {
        s.ledger.replace_budgets(BudgetMap::new())?;
        writeln!(s.out, "All budgets cleared")?;
        return Ok(());
    }

    // Ids outside the registry can still be cleared by raw id.
    let id = category::find(target, TransactionKind::Expense)
        .map_or_else(|| target.trim().to_lowercase(), |c| c.id.to_string());
    if s.ledger.clear_budget(&id)? {
        writeln!(s.out, "Budget for {id} cleared")?;
    } else {
        writeln!(s.out, "No budget set for {id}")?;
    }
    Ok(())
}

fn parse_budget_amount(raw: &str) -> Result<Decimal, LedgerError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != '$' && *c != ',').collect();
    let amount =
        Decimal::from_str(&cleaned).map_err(|_| LedgerError::InvalidAmount(raw.to_string()))?;
    if amount > Amount::max() {
        return Err(LedgerError::AmountTooLarge(amount));
    }
    Ok(amount)
}

// ── Dashboard & insights ─────────────────────────────────────

pub(super) fn cmd_summary(_args: &[String], s: &mut Session<'_>) -> Result<()> {
    let today = s.today();
    let txns = s.ledger.transactions();
    let month = month_totals(txns, today);
    let all_time = ledger_totals(txns);
    let month_count = current_month(txns, today, None).len();

    writeln!(s.out, "Summary for {}", today.format("%B %Y"))?;
    writeln!(s.out, "{}", "─".repeat(40))?;
    writeln!(s.out, "  Income:        {}", format_amount(month.income))?;
    writeln!(s.out, "  Expenses:      {}", format_amount(month.expenses))?;
    writeln!(s.out, "  Net:           {}", format_amount(month.net))?;
    if let Some(ratio) = month.expense_ratio {
        writeln!(s.out, "  Spent:         {} of income", format_percent(ratio))?;
    }
    writeln!(s.out, "  Transactions:  {month_count}")?;
    writeln!(s.out)?;
    writeln!(s.out, "  Balance:       {}", format_amount(all_time.balance))?;

    match top_category(txns) {
        Some(top) => writeln!(
            s.out,
            "  Top category:  {} ({})",
            category::by_id(&top.id, TransactionKind::Expense),
            format_amount(top.total)
        )?,
        None => writeln!(s.out, "  Top category:  none")?,
    }

    let latest = recent(txns, SUMMARY_RECENT);
    if !latest.is_empty() {
        writeln!(s.out)?;
        writeln!(s.out, "Recent transactions:")?;
        write_transaction_table(s.out, &latest)?;
    }
    Ok(())
}

pub(super) fn cmd_insights(_args: &[String], s: &mut Session<'_>) -> Result<()> {
    let today = s.today();
    let insights = SpendingInsights::compute(s.ledger.transactions(), s.ledger.budgets(), today);
    let status = &insights.status;

    writeln!(s.out, "Insights for {}", today.format("%B %Y"))?;
    writeln!(s.out, "{}", "─".repeat(40))?;
    if status.total_budget > Decimal::ZERO {
        writeln!(
            s.out,
            "  Budget used:     {} of {} ({})",
            format_amount(status.total_spent),
            format_amount(status.total_budget),
            format_percent(status.percentage)
        )?;
        let label = if status.over_budget { "Over by:" } else { "Remaining:" };
        writeln!(s.out, "  {label:<16} {}", format_amount(status.remaining.abs()))?;
    } else {
        writeln!(s.out, "  Spent:           {}", format_amount(status.total_spent))?;
        writeln!(s.out, "  No budgets set")?;
    }
    writeln!(
        s.out,
        "  Days left:       {} of {}",
        insights.days_left,
        days_in_month(today)
    )?;
    writeln!(
        s.out,
        "  Daily allowance: {}",
        format_amount(insights.daily_allowance)
    )?;

    if !insights.at_risk.over_budget.is_empty() {
        writeln!(s.out)?;
        writeln!(s.out, "Over budget:")?;
        for line in &insights.at_risk.over_budget {
            write_budget_line(s.out, line)?;
        }
    }
    if !insights.at_risk.approaching.is_empty() {
        writeln!(s.out)?;
        writeln!(s.out, "Approaching limit:")?;
        for line in &insights.at_risk.approaching {
            write_budget_line(s.out, line)?;
        }
    }

    writeln!(s.out)?;
    match &insights.top_category {
        Some(top) => writeln!(
            s.out,
            "Top category:    {} ({})",
            category::by_id(&top.id, TransactionKind::Expense),
            format_amount(top.total)
        )?,
        None => writeln!(s.out, "Top category:    none this month")?,
    }
    match insights.largest_expense {
        Some(txn) => writeln!(
            s.out,
            "Largest expense: {} {} ({})",
            format_amount(txn.value()),
            txn.description,
            txn.day().format("%b %d")
        )?,
        None => writeln!(s.out, "Largest expense: none this month")?,
    }
    Ok(())
}

// ── Charts ───────────────────────────────────────────────────

pub(super) fn cmd_chart(args: &[String], s: &mut Session<'_>) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("monthly") | Some("m") => chart_monthly(s),
        Some("categories") | Some("c") => {
            let kind = match args.get(1) {
                Some(raw) => TransactionKind::parse(raw)?,
                None => TransactionKind::Expense,
            };
            chart_categories(s, kind)
        }
        Some("budget") | Some("b") => chart_budget(s),
        Some(other) => bail!("Unknown chart: {other}. Use monthly, categories or budget"),
        None => bail!("Usage: finvis chart <monthly|categories [expense|income]|budget>"),
    }
}

fn chart_monthly(s: &mut Session<'_>) -> Result<()> {
    let today = s.today();
    let series = monthly_series(s.ledger.transactions(), today);
    let max = series
        .iter()
        .flat_map(|b| [b.expenses, b.income])
        .max()
        .unwrap_or(Decimal::ZERO);

    writeln!(s.out, "Income and expenses, last {SERIES_WINDOW} months")?;
    writeln!(s.out)?;
    for bucket in &series {
        writeln!(
            s.out,
            "{:<4} income   {:<width$} {:>12}",
            bucket.label,
            bar(bucket.income, max, BAR_WIDTH),
            format_amount(bucket.income),
            width = BAR_WIDTH
        )?;
        writeln!(
            s.out,
            "     expenses {:<width$} {:>12}",
            bar(bucket.expenses, max, BAR_WIDTH),
            format_amount(bucket.expenses),
            width = BAR_WIDTH
        )?;
    }
    Ok(())
}

fn chart_categories(s: &mut Session<'_>, kind: TransactionKind) -> Result<()> {
    let rows = category_breakdown(s.ledger.transactions(), kind);
    if rows.is_empty() {
        writeln!(s.out, "No {kind} transactions")?;
        return Ok(());
    }

    let max = rows.first().map_or(Decimal::ZERO, |r| r.total);
    writeln!(s.out, "{} by category, all time", capitalize(kind.as_str()))?;
    writeln!(s.out)?;
    for row in &rows {
        writeln!(
            s.out,
            "{:<22} {:<width$} {:>12} {:>5}",
            truncate(&row.category.to_string(), 22),
            bar(row.total, max, BAR_WIDTH),
            format_amount(row.total),
            format_percent(row.share),
            width = BAR_WIDTH
        )?;
    }
    Ok(())
}

fn chart_budget(s: &mut Session<'_>) -> Result<()> {
    let today = s.today();
    let lines = budget_comparison(s.ledger.transactions(), s.ledger.budgets(), today);
    if lines.is_empty() {
        writeln!(s.out, "No budgets or spending this month")?;
        return Ok(());
    }

    writeln!(s.out, "Budget vs actual, {}", today.format("%B %Y"))?;
    writeln!(s.out)?;
    for line in &lines {
        let gauge = if line.has_budget() {
            bar(line.percentage, Decimal::ONE_HUNDRED, BAR_WIDTH)
        } else {
            String::new()
        };
        let limit = if line.has_budget() {
            format!(
                "{} / {} ({})",
                format_amount(line.actual),
                format_amount(line.budget),
                format_percent(line.percentage)
            )
        } else {
            format!("{} (no budget)", format_amount(line.actual))
        };
        let flag = if line.is_over() { " over" } else { "" };
        writeln!(
            s.out,
            "{:<22} {:<width$} {limit}{flag}",
            truncate(&line.category.to_string(), 22),
            gauge,
            width = BAR_WIDTH
        )?;
    }
    Ok(())
}

// ── Registry & export ────────────────────────────────────────

pub(super) fn cmd_categories(_args: &[String], s: &mut Session<'_>) -> Result<()> {
    for (i, kind) in TransactionKind::all().iter().enumerate() {
        if i > 0 {
            writeln!(s.out)?;
        }
        writeln!(s.out, "{} categories:", capitalize(kind.as_str()))?;
        for cat in category::categories(*kind) {
            writeln!(
                s.out,
                "  {:<14} {:<20} {}",
                cat.id,
                cat.to_string(),
                cat.color()
            )?;
        }
    }
    Ok(())
}

pub(super) fn cmd_export(args: &[String], s: &mut Session<'_>) -> Result<()> {
    match args.first() {
        Some(path) => {
            let path = Path::new(path);
            let count = export::export_to_path(s.ledger.transactions(), path)?;
            writeln!(s.out, "Exported {count} transactions to {}", path.display())?;
        }
        None => {
            export::write_transactions(s.ledger.transactions(), &mut *s.out)?;
        }
    }
    Ok(())
}

// ── Helpers ──────────────────────────────────────────────────

fn resolve_category(input: &str, kind: TransactionKind) -> Result<Category> {
    category::find(input, kind).ok_or_else(|| {
        let ids: Vec<&str> = category::categories(kind).iter().map(|c| c.id).collect();
        anyhow!(
            "Unknown {kind} category '{input}'. Choose one of: {}",
            ids.join(", ")
        )
    })
}

/// `day` at the current time of day, in the current offset.
fn on_day(day: &str, now: DateTime<FixedOffset>) -> Result<DateTime<FixedOffset>> {
    let date = NaiveDate::parse_from_str(day.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::InvalidDate(day.to_string()))?;
    now.offset()
        .from_local_datetime(&date.and_time(now.time()))
        .single()
        .ok_or_else(|| LedgerError::InvalidDate(day.to_string()).into())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn write_transaction_table(out: &mut dyn Write, rows: &[&Transaction]) -> Result<()> {
    writeln!(
        out,
        "{:<8}  {:<10}  {:<22}  {:<28} {:>13}",
        "ID", "Date", "Category", "Description", "Amount"
    )?;
    writeln!(out, "{}", "─".repeat(87))?;
    for txn in rows {
        let sign = if txn.is_expense() { "-" } else { "+" };
        writeln!(
            out,
            "{:<8}  {:<10}  {:<22}  {:<28} {:>13}",
            txn.id.short(),
            txn.day().format("%Y-%m-%d").to_string(),
            truncate(&category::by_id(&txn.category, txn.kind).to_string(), 22),
            truncate(&txn.description, 28),
            format!("{sign}{}", format_amount(txn.value()))
        )?;
    }
    Ok(())
}

fn write_budget_line(out: &mut dyn Write, line: &BudgetLine) -> Result<()> {
    writeln!(
        out,
        "  {:<22} {} / {} ({})",
        line.category.to_string(),
        format_amount(line.actual),
        format_amount(line.budget),
        format_percent(line.percentage)
    )?;
    Ok(())
}
