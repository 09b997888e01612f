//! Expense service
//!
//! Adding, querying, editing and deleting expenses in the ledger. Dates are
//! validated before the ledger is read, and nothing is written unless the
//! whole operation succeeds.

use tracing::info;

use crate::audit::{Action, Subject};
use crate::error::LedgerResult;
use crate::models::{normalize_date, parse_date, Expense, ExpenseEntry, ExpenseRef, Ledger};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record an expense. `date` defaults to today.
    pub fn add(&self, name: &str, amount: f64, date: Option<&str>) -> LedgerResult<Expense> {
        let date = match date {
            Some(date) => parse_date(date)?,
            None => self.storage.clock().today(),
        };
        let expense = Expense::create(name, amount, date)?;
        let entry = expense.to_entry();

        let mut ledger = self.storage.ledger.load()?;
        ledger.add(expense.date_key(), entry.clone());
        self.storage.ledger.save(&ledger)?;

        self.storage.record(
            Action::Added,
            Subject::Expense {
                date: expense.date_key(),
            },
            format!("{} {}", entry.expense, entry.amount),
        );
        info!(date = %expense.date, name = %expense.name, amount = expense.amount, "added expense");

        Ok(expense)
    }

    /// The whole ledger
    pub fn all(&self) -> LedgerResult<Ledger> {
        self.storage.ledger.load()
    }

    /// Entries on one date; empty when the date has none
    pub fn by_date(&self, date: &str) -> LedgerResult<Vec<ExpenseEntry>> {
        let date = normalize_date(date)?;
        Ok(self.all()?.by_date(&date).to_vec())
    }

    /// Dates with expenses in the 7 days ending today
    pub fn by_week(&self) -> LedgerResult<Ledger> {
        Ok(self.all()?.by_week(self.storage.clock().today()))
    }

    /// Dates with expenses in `[start, end]`
    pub fn by_range(&self, start: &str, end: &str) -> LedgerResult<Ledger> {
        let start = normalize_date(start)?;
        let end = normalize_date(end)?;
        self.all()?.by_range(&start, &end)
    }

    /// Partially update one entry. Returns the updated entry.
    pub fn update(
        &self,
        date: &str,
        reference: &ExpenseRef,
        new_name: Option<&str>,
        new_amount: Option<f64>,
    ) -> LedgerResult<ExpenseEntry> {
        let date = normalize_date(date)?;

        let mut ledger = self.all()?;
        let (before, after) = ledger.update_at(&date, reference, new_name, new_amount)?;
        self.storage.ledger.save(&ledger)?;

        self.storage.record(
            Action::Changed,
            Subject::Expense { date: date.clone() },
            format!(
                "{} {} -> {} {}",
                before.expense, before.amount, after.expense, after.amount
            ),
        );
        info!(date = %date, reference = %reference, "updated expense");

        Ok(after)
    }

    /// Delete one entry. Returns the removed entry.
    pub fn delete(&self, date: &str, reference: &ExpenseRef) -> LedgerResult<ExpenseEntry> {
        let date = normalize_date(date)?;

        let mut ledger = self.all()?;
        let removed = ledger.delete_at(&date, reference)?;
        self.storage.ledger.save(&ledger)?;

        self.storage.record(
            Action::Removed,
            Subject::Expense { date: date.clone() },
            format!("{} {}", removed.expense, removed.amount),
        );
        info!(date = %date, name = %removed.expense, "deleted expense");

        Ok(removed)
    }

    /// Empty the ledger. Returns how many entries were removed.
    pub fn delete_all(&self) -> LedgerResult<usize> {
        let mut ledger = self.all()?;
        let removed = ledger.transaction_count();
        ledger.clear();
        self.storage.ledger.save(&ledger)?;

        self.storage.record(
            Action::Removed,
            Subject::Ledger,
            format!("{} expenses", removed),
        );
        info!(removed, "cleared ledger");

        Ok(removed)
    }

    /// Total spent on one date
    pub fn daily_total(&self, date: &str) -> LedgerResult<f64> {
        Ok(self.by_date(date)?.iter().map(|e| e.amount).sum())
    }

    /// Total spent in `[start, end]`
    pub fn range_total(&self, start: &str, end: &str) -> LedgerResult<f64> {
        Ok(self.by_range(start, end)?.total())
    }
}
