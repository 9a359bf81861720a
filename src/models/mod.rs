mod budget;
pub(crate) mod category;
pub(crate) mod transaction;

pub(crate) use budget::BudgetMap;
pub(crate) use transaction::{NewTransaction, Transaction, TransactionId, TransactionKind};
