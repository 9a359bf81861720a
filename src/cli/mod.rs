//! Command-line front end: a name → handler registry over one [`Session`].

mod commands;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};
use std::collections::HashMap;
use std::io::Write;
use std::sync::LazyLock;

use crate::db::Database;
use crate::ledger::Ledger;

/// What a command runs against: the ledger, the reference time and the
/// output sink.
pub(crate) struct Session<'a> {
    pub(crate) ledger: &'a mut Ledger<Database>,
    pub(crate) now: DateTime<FixedOffset>,
    pub(crate) out: &'a mut dyn Write,
}

impl Session<'_> {
    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&[String], &mut Session<'_>) -> Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!(
        "add",
        "Record a transaction: add <expense|income> <amount> <category> <description...> [--date YYYY-MM-DD]",
        commands::cmd_add,
        r
    );
    register_command!(
        "list",
        "Show the most recent transactions: list [--limit N]",
        commands::cmd_list,
        r
    );
    register_command!(
        "ls",
        "Show the most recent transactions",
        commands::cmd_list,
        r
    );
    register_command!(
        "delete",
        "Delete a transaction by id or id prefix: delete <id>",
        commands::cmd_delete,
        r
    );
    register_command!(
        "budget",
        "List budgets, or: budget set <category> <amount> | budget clear <category|--all>",
        commands::cmd_budget,
        r
    );
    register_command!(
        "summary",
        "This month's totals, all-time balance and top category",
        commands::cmd_summary,
        r
    );
    register_command!("s", "Dashboard summary", commands::cmd_summary, r);
    register_command!(
        "insights",
        "Budget utilization, daily allowance and categories at risk",
        commands::cmd_insights,
        r
    );
    register_command!(
        "chart",
        "Text charts: chart monthly | chart categories [expense|income] | chart budget",
        commands::cmd_chart,
        r
    );
    register_command!(
        "categories",
        "List expense and income categories",
        commands::cmd_categories,
        r
    );
    register_command!(
        "export",
        "Export all transactions as CSV: export [path] (stdout when omitted)",
        commands::cmd_export,
        r
    );
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("--help", "Show available commands", cmd_help, r);
    register_command!("-h", "Show available commands", cmd_help, r);
    register_command!("version", "Show version", cmd_version, r);
    register_command!("--version", "Show version", cmd_version, r);
    register_command!("-V", "Show version", cmd_version, r);

    r
});

/// Dispatch `args` (without the program name). No command shows help.
pub(crate) fn run(args: &[String], session: &mut Session<'_>) -> Result<()> {
    let Some(name) = args.first() else {
        return cmd_help(&[], session);
    };
    match COMMANDS.get(name.as_str()) {
        Some(cmd) => (cmd.run)(&args[1..], session),
        None => bail!(
            "Unknown command: {name}. Did you mean `{}`?",
            find_closest(name)
        ),
    }
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 2 && !k.starts_with('-')) // skip aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Remove `--name <value>` from `args` and return the value.
fn take_flag(args: &mut Vec<String>, name: &str) -> Result<Option<String>> {
    let Some(pos) = args.iter().position(|a| a == name) else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        bail!("{name} requires a value");
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(value))
}

fn parse_limit(raw: &str) -> Result<usize> {
    let limit = raw
        .parse::<usize>()
        .with_context(|| format!("Invalid limit: {raw}"))?;
    if limit == 0 {
        bail!("Limit must be at least 1");
    }
    Ok(limit)
}

fn cmd_help(_args: &[String], s: &mut Session<'_>) -> Result<()> {
    writeln!(s.out, "finvis: personal finance tracker")?;
    writeln!(s.out)?;
    writeln!(s.out, "Usage: finvis [--data-dir <path>] <command> [args]")?;
    writeln!(s.out)?;
    writeln!(s.out, "Commands:")?;

    let mut names: Vec<&&str> = COMMANDS
        .keys()
        .filter(|k| k.len() > 2 && !k.starts_with('-'))
        .collect();
    names.sort();
    for name in names {
        if let Some(cmd) = COMMANDS.get(*name) {
            writeln!(s.out, "  {name:<12} {}", cmd.description)?;
        }
    }
    writeln!(s.out)?;
    writeln!(
        s.out,
        "Data lives in {} or --data-dir. Set RUST_LOG=debug for diagnostics.",
        crate::config::DATA_DIR_ENV
    )?;
    Ok(())
}

fn cmd_version(_args: &[String], s: &mut Session<'_>) -> Result<()> {
    writeln!(s.out, "finvis {}", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
