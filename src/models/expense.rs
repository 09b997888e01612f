//! Expense models
//!
//! An [`Expense`] is the validated value built when an expense is added. What
//! the ledger stores per date is the lighter [`ExpenseEntry`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{LedgerError, LedgerResult};

/// A single validated expense
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    /// Title-cased description
    pub name: String,

    /// Amount spent, never negative
    pub amount: f64,

    /// Day of the expense
    pub date: NaiveDate,
}

impl Expense {
    /// Build an expense, normalizing the name to title case
    pub fn create(name: &str, amount: f64, date: NaiveDate) -> LedgerResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation("Expense name cannot be empty".into()));
        }
        validate_amount(amount)?;

        Ok(Self {
            name: title_case(name),
            amount,
            date,
        })
    }

    /// The `YYYY-MM-DD` ledger key for this expense
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// The stored form of this expense
    pub fn to_entry(&self) -> ExpenseEntry {
        ExpenseEntry {
            expense: self.name.clone(),
            amount: self.amount,
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({:.2})", self.date, self.name, self.amount)
    }
}

/// An expense as stored under its date key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub expense: String,
    pub amount: f64,
}

impl ExpenseEntry {
    pub fn new(expense: impl Into<String>, amount: f64) -> Self {
        Self {
            expense: expense.into(),
            amount,
        }
    }
}

/// Identifies an expense within a single date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseRef {
    /// Position in the date's list
    ByIndex(usize),
    /// First case-insensitive match on the description
    ByName(String),
}

impl FromStr for ExpenseRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<usize>() {
            Ok(index) => Self::ByIndex(index),
            Err(_) => Self::ByName(s.to_string()),
        })
    }
}

impl fmt::Display for ExpenseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByIndex(index) => write!(f, "#{}", index),
            Self::ByName(name) => write!(f, "'{}'", name),
        }
    }
}

/// Reject negative amounts
pub fn validate_amount(amount: f64) -> LedgerResult<()> {
    if amount < 0.0 || amount.is_nan() {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(())
}

/// Title-case a description: the first letter of every alphabetic run is
/// upper-cased and the rest lower-cased ("moi-moi" becomes "Moi-Moi").
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;

    for c in value.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}
