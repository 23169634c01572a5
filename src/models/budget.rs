//! Monthly budget model
//!
//! A budget is a spending threshold for one calendar month. It is never
//! derived from expenses; the budget check compares the two at query time.

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::period::MonthPeriod;
use crate::error::{TrackerError, TrackerResult};

/// Spending limit for a single month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBudget {
    pub year: i32,
    pub month: u32,
    pub amount: Money,
}

impl MonthlyBudget {
    /// Create a budget for a month
    pub fn new(period: MonthPeriod, amount: Money) -> Self {
        Self {
            year: period.year,
            month: period.month,
            amount,
        }
    }

    /// The month this budget applies to
    pub fn period(&self) -> TrackerResult<MonthPeriod> {
        MonthPeriod::new(self.year, self.month)
    }

    /// Validate the budget
    pub fn validate(&self) -> TrackerResult<()> {
        self.period()?;
        if !self.amount.is_positive() {
            return Err(TrackerError::Validation(format!(
                "Budget must be positive, got {}",
                self.amount
            )));
        }
        if self.amount > Money::MAX {
            return Err(TrackerError::Validation(format!(
                "Budget cannot exceed {}, got {}",
                Money::MAX,
                self.amount
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let march = MonthPeriod::new(2026, 3).unwrap();
        assert!(MonthlyBudget::new(march, Money::from_cents(50000))
            .validate()
            .is_ok());
        assert!(MonthlyBudget::new(march, Money::zero()).validate().is_err());
        assert!(MonthlyBudget::new(march, Money::MAX).validate().is_ok());
        assert!(MonthlyBudget::new(march, Money::from_cents(Money::MAX.cents() + 1))
            .validate()
            .is_err());

        let bad_month = MonthlyBudget {
            year: 2026,
            month: 14,
            amount: Money::from_cents(100),
        };
        assert!(bad_month.validate().is_err());
    }
}
