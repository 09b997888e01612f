//! The ledger: date-keyed lists of expense entries
//!
//! Keys are `YYYY-MM-DD` strings kept in document order. Entry order within a
//! date is insertion order and is what index-based edits refer to. A date
//! whose list becomes empty is removed.

use chrono::{Duration, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::dates::month_of;
use super::expense::{title_case, validate_amount, ExpenseEntry, ExpenseRef};
use crate::error::{LedgerError, LedgerResult};

/// Full collection of expenses, keyed by date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    days: IndexMap<String, Vec<ExpenseEntry>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of date keys
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Iterate `(date, entries)` in ledger order
    pub fn days(&self) -> impl Iterator<Item = (&str, &[ExpenseEntry])> {
        self.days.iter().map(|(d, e)| (d.as_str(), e.as_slice()))
    }

    /// Iterate every entry tagged with its date
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ExpenseEntry)> {
        self.days
            .iter()
            .flat_map(|(date, entries)| entries.iter().map(move |e| (date.as_str(), e)))
    }

    pub fn contains_date(&self, date: &str) -> bool {
        self.days.contains_key(date)
    }

    /// Entries for one date, empty if the date is absent
    pub fn by_date(&self, date: &str) -> &[ExpenseEntry] {
        self.days.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dates in the inclusive window `[today - 6, today]` that exist in the
    /// ledger. Missing dates are omitted, not zero-filled.
    pub fn by_week(&self, today: NaiveDate) -> Ledger {
        let mut week = Ledger::new();
        for offset in (0..=6).rev() {
            let key = (today - Duration::days(offset)).format("%Y-%m-%d").to_string();
            if let Some(entries) = self.days.get(&key) {
                week.days.insert(key, entries.clone());
            }
        }
        week
    }

    /// Dates with `start <= date <= end` by string comparison
    pub fn by_range(&self, start: &str, end: &str) -> LedgerResult<Ledger> {
        if start > end {
            return Err(LedgerError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(self.filter(|date| start <= date && date <= end))
    }

    /// Dates whose key starts with the `YYYY-MM` month
    pub fn for_month(&self, month: &str) -> Ledger {
        self.filter(|date| month_of(date) == month)
    }

    fn filter(&self, keep: impl Fn(&str) -> bool) -> Ledger {
        Ledger {
            days: self
                .days
                .iter()
                .filter(|(date, _)| keep(date))
                .map(|(date, entries)| (date.clone(), entries.clone()))
                .collect(),
        }
    }

    /// Append an entry to a date, creating the date if needed
    pub fn add(&mut self, date: impl Into<String>, entry: ExpenseEntry) {
        self.days.entry(date.into()).or_default().push(entry);
    }

    /// Resolve a reference to a concrete index within `date`
    pub fn resolve(&self, date: &str, reference: &ExpenseRef) -> LedgerResult<usize> {
        let entries = self
            .days
            .get(date)
            .ok_or_else(|| LedgerError::expense_not_found(format!("no expenses on {}", date)))?;

        match reference {
            ExpenseRef::ByIndex(index) if *index < entries.len() => Ok(*index),
            ExpenseRef::ByIndex(index) => Err(LedgerError::expense_not_found(format!(
                "index {} on {} ({} entries)",
                index,
                date,
                entries.len()
            ))),
            ExpenseRef::ByName(name) => {
                let wanted = name.trim().to_lowercase();
                entries
                    .iter()
                    .position(|e| e.expense.to_lowercase() == wanted)
                    .ok_or_else(|| {
                        LedgerError::expense_not_found(format!("'{}' on {}", name, date))
                    })
            }
        }
    }

    /// Apply a partial update. Returns the entry before and after the change.
    pub fn update_at(
        &mut self,
        date: &str,
        reference: &ExpenseRef,
        new_name: Option<&str>,
        new_amount: Option<f64>,
    ) -> LedgerResult<(ExpenseEntry, ExpenseEntry)> {
        if new_name.is_none() && new_amount.is_none() {
            return Err(LedgerError::Validation(
                "At least one of expense name or amount must be provided".into(),
            ));
        }

        let new_name = match new_name.map(str::trim) {
            Some("") => {
                return Err(LedgerError::Validation("Expense name cannot be empty".into()))
            }
            Some(name) => Some(title_case(name)),
            None => None,
        };
        if let Some(amount) = new_amount {
            validate_amount(amount)?;
        }

        let index = self.resolve(date, reference)?;
        let entry = &mut self.days[date][index];
        let before = entry.clone();

        if let Some(name) = new_name {
            entry.expense = name;
        }
        if let Some(amount) = new_amount {
            entry.amount = amount;
        }

        Ok((before, entry.clone()))
    }

    /// Remove an entry, dropping the date key when it empties
    pub fn delete_at(&mut self, date: &str, reference: &ExpenseRef) -> LedgerResult<ExpenseEntry> {
        let index = self.resolve(date, reference)?;
        let entries = &mut self.days[date];
        let removed = entries.remove(index);

        if entries.is_empty() {
            self.days.shift_remove(date);
        }

        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }

    /// Sum of all amounts
    pub fn total(&self) -> f64 {
        self.entries().map(|(_, e)| e.amount).sum()
    }

    pub fn transaction_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Dates with at least one entry
    pub fn days_with_expenses(&self) -> usize {
        self.days.values().filter(|e| !e.is_empty()).count()
    }

    /// Live spend for a month by prefix match on the date keys
    pub fn month_total(&self, month: &str) -> f64 {
        self.entries()
            .filter(|(date, _)| date.starts_with(month))
            .map(|(_, e)| e.amount)
            .sum()
    }
}

impl FromIterator<(String, Vec<ExpenseEntry>)> for Ledger {
    fn from_iter<I: IntoIterator<Item = (String, Vec<ExpenseEntry>)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}
