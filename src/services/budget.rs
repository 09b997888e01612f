//! Budget service
//!
//! Monthly budgets against live ledger spending. Every operation first runs
//! the rollover check, which moves the tracked month forward and, with
//! auto-reset on, carries the previous amount into the new month.

use tracing::{debug, info};

use crate::audit::{Action, Subject};
use crate::error::LedgerResult;
use crate::models::{parse_month, validate_amount, Budget, Ledger, MonthlyBudget, Rollover};
use crate::storage::Storage;

/// Service for monthly budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Run the rollover check and return the up-to-date budget.
    /// Persists only when the tracked month moved.
    pub fn ensure_current_month(&self) -> LedgerResult<Budget> {
        let clock = self.storage.clock();
        let now_month = clock.current_month();
        let mut budget = self.storage.budget.load(&now_month)?;

        let outcome = budget.roll_over(
            &now_month,
            self.storage.settings().rollover_source,
            clock.now(),
        );

        if let Rollover::Advanced { carried } = outcome {
            self.storage.budget.save(&budget)?;

            if let Some(amount) = carried {
                self.storage.record(
                    Action::Added,
                    Subject::Budget {
                        month: now_month.clone(),
                    },
                    format!("{} carried over", amount),
                );
            }
            info!(month = %now_month, carried = ?carried, "rolled budget over to new month");
        }

        Ok(budget)
    }

    /// Set (or replace) the budget for `month`, default the current month
    pub fn set_budget(&self, amount: f64, month: Option<&str>) -> LedgerResult<MonthlyBudget> {
        validate_amount(amount)?;
        let month = self.resolve_month(month)?;

        let mut budget = self.ensure_current_month()?;
        let mut monthly = MonthlyBudget::new(&month, amount, self.storage.clock().now())?;
        monthly.spent = self.storage.ledger.load()?.month_total(&month);

        let previous = budget.set(monthly.clone());
        self.storage.budget.save(&budget)?;

        let (action, summary) = match previous {
            Some(before) => (Action::Changed, format!("{} -> {}", before.amount, amount)),
            None => (Action::Added, amount.to_string()),
        };
        self.storage.record(
            action,
            Subject::Budget {
                month: month.clone(),
            },
            summary,
        );
        info!(month = %month, amount, spent = monthly.spent, "set monthly budget");

        Ok(monthly)
    }

    /// Budget for `month` (default the current month) with spending freshly
    /// computed. A month without a budget reports a zero amount; that
    /// placeholder is not saved.
    pub fn status(&self, month: Option<&str>) -> LedgerResult<MonthlyBudget> {
        let month = self.resolve_month(month)?;
        let budget = self.ensure_current_month()?;
        let ledger = self.storage.ledger.load()?;

        let mut monthly = budget
            .get(&month)
            .cloned()
            .unwrap_or_else(|| MonthlyBudget::zero(&month, self.storage.clock().now()));
        monthly.spent = ledger.month_total(&month);

        debug!(month = %month, amount = monthly.amount, spent = monthly.spent, "budget status");
        Ok(monthly)
    }

    /// Every monthly budget with spending recomputed, newest month first
    pub fn history(&self) -> LedgerResult<Vec<MonthlyBudget>> {
        let budget = self.ensure_current_month()?;
        let ledger = self.storage.ledger.load()?;
        Ok(history_of(&budget, &ledger))
    }

    /// Whether new months inherit the previous amount
    pub fn auto_reset(&self) -> LedgerResult<bool> {
        Ok(self.ensure_current_month()?.auto_reset)
    }

    /// Set auto-reset, or flip it when `enabled` is `None`. Returns the new value.
    pub fn toggle_auto_reset(&self, enabled: Option<bool>) -> LedgerResult<bool> {
        let mut budget = self.ensure_current_month()?;
        let enabled = enabled.unwrap_or(!budget.auto_reset);

        budget.auto_reset = enabled;
        self.storage.budget.save(&budget)?;
        info!(enabled, "set budget auto-reset");

        Ok(enabled)
    }

    /// Remove the budget for `month` (default the current month).
    /// Returns `false` when there was nothing to remove.
    pub fn delete_month(&self, month: Option<&str>) -> LedgerResult<bool> {
        let month = self.resolve_month(month)?;
        let mut budget = self.ensure_current_month()?;

        let Some(removed) = budget.remove(&month) else {
            debug!(month = %month, "no budget to delete");
            return Ok(false);
        };

        self.storage.budget.save(&budget)?;
        self.storage.record(
            Action::Removed,
            Subject::Budget {
                month: month.clone(),
            },
            removed.amount.to_string(),
        );
        info!(month = %month, "deleted monthly budget");

        Ok(true)
    }

    fn resolve_month(&self, month: Option<&str>) -> LedgerResult<String> {
        match month {
            Some(month) => parse_month(month),
            None => Ok(self.storage.clock().current_month()),
        }
    }
}

fn history_of(budget: &Budget, ledger: &Ledger) -> Vec<MonthlyBudget> {
    let mut history: Vec<MonthlyBudget> = budget
        .months()
        .map(|b| MonthlyBudget {
            spent: ledger.month_total(&b.month),
            ..b.clone()
        })
        .collect();
    history.sort_by(|a, b| b.month.cmp(&a.month));
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;
    use crate::config::{LedgerPaths, RolloverSource, Settings};
    use crate::error::LedgerError;
    use crate::models::ExpenseEntry;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn storage_at(temp_dir: &TempDir, year: i32, month: u32, settings: Settings) -> Storage {
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        Storage::new(paths, settings)
            .unwrap()
            .with_clock(Clock::Fixed(NaiveDate::from_ymd_opt(year, month, 10).unwrap()))
    }

    fn seed_ledger(storage: &Storage) {
        let mut ledger = Ledger::new();
        ledger.add("2025-01-15", ExpenseEntry::new("Lunch", 1500.0));
        ledger.add("2025-01-15", ExpenseEntry::new("Transport", 500.0));
        ledger.add("2025-01-16", ExpenseEntry::new("Coffee", 300.0));
        storage.ledger.save(&ledger).unwrap();
    }

    #[test]
    fn test_set_budget_over_spent_month() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_at(&temp_dir, 2025, 1, Settings::default());
        let mut ledger = Ledger::new();
        ledger.add("2025-01-15", ExpenseEntry::new("Lunch", 1500.0));
        ledger.add("2025-01-16", ExpenseEntry::new("Transport", 500.0));
        ledger.add("2025-02-01", ExpenseEntry::new("Coffee", 300.0));
        storage.ledger.save(&ledger).unwrap();

        let service = BudgetService::new(&storage);
        let monthly = service.set_budget(1000.0, Some("2025-01")).unwrap();

        assert_eq!(monthly.spent, 2000.0);
        assert_eq!(monthly.remaining(), -1000.0);
        assert!(monthly.is_over_budget());
        assert_eq!(monthly.percentage_used(), 100.0);
        assert!(!monthly.reset_from_previous);
    }

    #[test]
    fn test_set_budget_validates_first() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_at(&temp_dir, 2025, 1, Settings::default());
        let service = BudgetService::new(&storage);

        assert!(matches!(
            service.set_budget(-1.0, None),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            service.set_budget(100.0, Some("2025-1")),
            Err(LedgerError::InvalidFormat(_))
        ));
        assert!(!storage.paths().budget_file().exists());
    }

    #[test]
    fn test_status_recomputes_spent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_at(&temp_dir, 2025, 1, Settings::default());
        let service = BudgetService::new(&storage);
        service.set_budget(4600.0, None).unwrap();

        seed_ledger(&storage);

        let status = service.status(None).unwrap();
        assert_eq!(status.month, "2025-01");
        assert_eq!(status.spent, 2300.0);
        assert_eq!(status.remaining(), 2300.0);
        assert_eq!(status.percentage_used(), 50.0);
    }

    #[test]
    fn test_status_without_budget_is_not_saved() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_at(&temp_dir, 2025, 1, Settings::default());
        seed_ledger(&storage);
        let service = BudgetService::new(&storage);

        let status = service.status(Some("2025-01")).unwrap();
        assert_eq!(status.amount, 0.0);
        assert_eq!(status.spent, 2300.0);
        assert_eq!(status.percentage_used(), 0.0);

        let budget = storage.budget.load("2025-01").unwrap();
        assert!(budget.get("2025-01").is_none());
    }

    #[test]
    fn test_rollover_on_any_operation() {
        let temp_dir = TempDir::new().unwrap();
        {
            let january = storage_at(&temp_dir, 2025, 1, Settings::default());
            seed_ledger(&january);
            BudgetService::new(&january)
                .set_budget(1000.0, None)
                .unwrap();
        }

        let february = storage_at(&temp_dir, 2025, 2, Settings::default());
        let history = BudgetService::new(&february).history().unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].month, "2025-02");
        assert_eq!(history[0].amount, 1000.0);
        assert_eq!(history[0].spent, 0.0);
        assert!(history[0].reset_from_previous);
        assert_eq!(history[1].month, "2025-01");
        assert_eq!(history[1].spent, 2300.0);

        let stored = february.budget.load("2025-02").unwrap();
        assert_eq!(stored.current_month, "2025-02");
    }

    #[test]
    fn test_rollover_source_setting() {
        let temp_dir = TempDir::new().unwrap();
        {
            let march = storage_at(&temp_dir, 2025, 3, Settings::default());
            let service = BudgetService::new(&march);
            service.set_budget(300.0, Some("2025-03")).unwrap();
            service.set_budget(100.0, Some("2025-01")).unwrap();
        }

        let settings = Settings {
            rollover_source: RolloverSource::LatestMonth,
            ..Settings::default()
        };
        let april = storage_at(&temp_dir, 2025, 4, settings);
        let status = BudgetService::new(&april).status(None).unwrap();
        assert_eq!(status.amount, 300.0);
    }

    #[test]
    fn test_rollover_keeps_insertion_quirk_by_default() {
        let temp_dir = TempDir::new().unwrap();
        {
            let march = storage_at(&temp_dir, 2025, 3, Settings::default());
            let service = BudgetService::new(&march);
            service.set_budget(300.0, Some("2025-03")).unwrap();
            service.set_budget(100.0, Some("2025-01")).unwrap();
        }

        let april = storage_at(&temp_dir, 2025, 4, Settings::default());
        let status = BudgetService::new(&april).status(None).unwrap();
        assert_eq!(status.amount, 100.0);
    }

    #[test]
    fn test_toggle_auto_reset() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_at(&temp_dir, 2025, 1, Settings::default());
        let service = BudgetService::new(&storage);

        assert!(service.auto_reset().unwrap());
        assert!(!service.toggle_auto_reset(None).unwrap());
        assert!(!service.auto_reset().unwrap());
        assert!(service.toggle_auto_reset(Some(true)).unwrap());
        assert!(service.toggle_auto_reset(Some(true)).unwrap());
    }

    #[test]
    fn test_no_rollover_when_disabled() {
        let temp_dir = TempDir::new().unwrap();
        {
            let january = storage_at(&temp_dir, 2025, 1, Settings::default());
            let service = BudgetService::new(&january);
            service.set_budget(1000.0, None).unwrap();
            service.toggle_auto_reset(Some(false)).unwrap();
        }

        let february = storage_at(&temp_dir, 2025, 2, Settings::default());
        let status = BudgetService::new(&february).status(None).unwrap();
        assert_eq!(status.amount, 0.0);
    }

    #[test]
    fn test_delete_month() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_at(&temp_dir, 2025, 1, Settings::default());
        let service = BudgetService::new(&storage);
        service.set_budget(1000.0, None).unwrap();

        assert!(service.delete_month(None).unwrap());
        assert!(!service.delete_month(None).unwrap());
        assert!(service.history().unwrap().is_empty());
    }

    #[test]
    fn test_budget_changes_are_journaled_best_effort() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_at(&temp_dir, 2025, 1, Settings::default());
        let service = BudgetService::new(&storage);

        service.set_budget(1000.0, None).unwrap();
        service.set_budget(1200.0, None).unwrap();
        let journal = storage.audit().read_recent(10).unwrap();
        assert_eq!(journal.len(), 2);
        assert_eq!(journal[1].action, Action::Changed);
        assert_eq!(journal[1].summary, "1000 -> 1200");

        std::fs::remove_file(storage.paths().audit_log()).unwrap();
        std::fs::create_dir_all(storage.paths().audit_log()).unwrap();

        service.set_budget(1500.0, Some("2025-02")).unwrap();
        assert!(service.delete_month(Some("2025-01")).unwrap());
        let history = service.history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].amount, 1500.0);
    }
}
