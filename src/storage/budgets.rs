//! Monthly budget book
//!
//! Budgets live in their own file (`budgets.json`) so the expense store keeps
//! the plain `{"records": [...]}` envelope. A missing file is an empty book.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, MonthPeriod, MonthlyBudget};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct BudgetData {
    budgets: Vec<MonthlyBudget>,
}

/// Per-month budgets bound to their backing file
#[derive(Debug)]
pub struct BudgetBook {
    path: PathBuf,
    data: BudgetData,
    audit: Option<AuditLogger>,
}

impl BudgetBook {
    /// Load budgets, treating a missing file as an empty book
    pub fn load(path: impl Into<PathBuf>) -> TrackerResult<Self> {
        let path = path.into();
        let data: BudgetData = read_json(&path)?;

        let mut seen = Vec::with_capacity(data.budgets.len());
        for budget in &data.budgets {
            budget
                .validate()
                .map_err(|e| TrackerError::corrupt(&path, e.to_string()))?;
            let period = budget.period()?;
            if seen.contains(&period) {
                return Err(TrackerError::corrupt(
                    &path,
                    format!("duplicate budget for {}", period),
                ));
            }
            seen.push(period);
        }

        Ok(Self {
            path,
            data,
            audit: None,
        })
    }

    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Budget for a month, if one is set
    pub fn get(&self, period: MonthPeriod) -> Option<Money> {
        self.data
            .budgets
            .iter()
            .find(|b| b.year == period.year && b.month == period.month)
            .map(|b| b.amount)
    }

    /// All budgets, sorted by month
    pub fn iter(&self) -> impl Iterator<Item = &MonthlyBudget> + '_ {
        self.data.budgets.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.data.budgets.is_empty()
    }

    /// Set (or replace) the budget for a month and persist
    pub fn set(&mut self, period: MonthPeriod, amount: Money) -> TrackerResult<()> {
        let budget = MonthlyBudget::new(period, amount);
        budget.validate()?;

        let previous = self.get(period);
        let mut next = self.data.clone();
        next.budgets
            .retain(|b| !(b.year == period.year && b.month == period.month));
        next.budgets.push(budget);
        next.budgets.sort_by_key(|b| (b.year, b.month));

        write_json_atomic(&self.path, &next)?;
        self.data = next;

        let entry = match previous {
            Some(old) => AuditEntry::update(
                EntityType::Budget,
                period.to_string(),
                None,
                &MonthlyBudget::new(period, old),
                &budget,
            ),
            None => AuditEntry::create(EntityType::Budget, period.to_string(), None, &budget),
        };
        self.audit(entry);

        Ok(())
    }

    /// Remove the budget for a month; returns the removed amount
    pub fn remove(&mut self, period: MonthPeriod) -> TrackerResult<Money> {
        let amount = self.get(period).ok_or_else(|| TrackerError::NotFound {
            entity_type: "Budget",
            identifier: period.to_string(),
        })?;

        let mut next = self.data.clone();
        next.budgets
            .retain(|b| !(b.year == period.year && b.month == period.month));

        write_json_atomic(&self.path, &next)?;
        self.data = next;

        self.audit(AuditEntry::delete(
            EntityType::Budget,
            period.to_string(),
            None,
            &MonthlyBudget::new(period, amount),
        ));

        Ok(amount)
    }

    fn audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                log::warn!("failed to write audit entry: {}", e);
            }
        }
    }
}
