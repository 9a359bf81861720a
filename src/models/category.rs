use super::TransactionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Category {
    pub(crate) id: &'static str,
    pub(crate) name: &'static str,
    pub(crate) icon: &'static str,
}

impl Category {
    const fn new(id: &'static str, name: &'static str, icon: &'static str) -> Self {
        Self { id, name, icon }
    }

    pub(crate) fn color(&self) -> &'static str {
        color_of(self.id)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.icon, self.name)
    }
}

/// Declaration order matters: ranking ties resolve to the earlier entry.
pub(crate) const EXPENSE_CATEGORIES: &[Category] = &[
    Category::new("food", "Food & Dining", "🍔"),
    Category::new("transport", "Transportation", "🚗"),
    Category::new("utilities", "Utilities", "💡"),
    Category::new("entertainment", "Entertainment", "🎬"),
    Category::new("shopping", "Shopping", "🛍️"),
    Category::new("housing", "Housing", "🏠"),
    Category::new("healthcare", "Healthcare", "🏥"),
    Category::new("education", "Education", "📚"),
    Category::new("personal", "Personal Care", "💇"),
    Category::new("other", "Other", "📋"),
];

pub(crate) const INCOME_CATEGORIES: &[Category] = &[
    Category::new("salary", "Salary", "💰"),
    Category::new("business", "Business", "💼"),
    Category::new("investment", "Investment", "📈"),
    Category::new("gift", "Gifts", "🎁"),
    Category::new("other", "Other", "📋"),
];

pub(crate) const UNKNOWN: Category = Category::new("unknown", "Unknown", "❓");

/// Flat id -> color table shared by both registries.
///
/// Not scoped by kind: an id present in both registries gets a single
/// color, and if two rows ever repeat an id the later row wins.
const COLORS: &[(&str, &str)] = &[
    ("food", "#FF6384"),
    ("transport", "#36A2EB"),
    ("utilities", "#FFCE56"),
    ("entertainment", "#4BC0C0"),
    ("shopping", "#9966FF"),
    ("housing", "#FF9F40"),
    ("healthcare", "#8AC926"),
    ("education", "#1982C4"),
    ("personal", "#6A4C93"),
    ("salary", "#32CD32"),
    ("business", "#20B2AA"),
    ("investment", "#3CB371"),
    ("gift", "#7CFC00"),
    ("other", "#C9C9C9"),
    ("unknown", "#858585"),
];

pub(crate) const DEFAULT_COLOR: &str = "#C9C9C9";

pub(crate) fn categories(kind: TransactionKind) -> &'static [Category] {
    match kind {
        TransactionKind::Expense => EXPENSE_CATEGORIES,
        TransactionKind::Income => INCOME_CATEGORIES,
    }
}

/// Resolve a category id within the registry for `kind`, falling back to
/// [`UNKNOWN`] for ids the registry does not define.
pub(crate) fn by_id(id: &str, kind: TransactionKind) -> Category {
    categories(kind)
        .iter()
        .find(|c| c.id == id)
        .copied()
        .unwrap_or(UNKNOWN)
}

pub(crate) fn is_known(id: &str, kind: TransactionKind) -> bool {
    categories(kind).iter().any(|c| c.id == id)
}

pub(crate) fn color_of(id: &str) -> &'static str {
    COLORS
        .iter()
        .rev()
        .find(|(key, _)| *key == id)
        .map_or(DEFAULT_COLOR, |(_, color)| *color)
}

/// Find a category by id or display name (case-insensitive).
pub(crate) fn find(query: &str, kind: TransactionKind) -> Option<Category> {
    let lower = query.trim().to_lowercase();
    categories(kind)
        .iter()
        .find(|c| c.id == lower || c.name.to_lowercase() == lower)
        .copied()
}
