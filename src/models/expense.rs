//! Expense model
//!
//! Expenses share the task envelope but replace the status with a free-form
//! category and carry an amount.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::RecordId;
use super::money::Money;
use super::record::{Patch, Record};
use crate::audit::EntityType;
use crate::error::{TrackerError, TrackerResult};

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Store-assigned identifier
    pub id: RecordId,

    /// What the money was spent on
    pub title: String,

    /// Optional detail text
    pub description: Option<String>,

    /// Free-form category (e.g. "food", "rent")
    pub category: String,

    /// Amount spent (always positive)
    pub amount: Money,

    /// When the expense was recorded
    pub created_at: DateTime<Utc>,

    /// When the expense was last modified (None until the first update)
    pub updated_at: Option<DateTime<Utc>>,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        id: RecordId,
        title: impl Into<String>,
        category: impl Into<String>,
        amount: Money,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            category: category.into(),
            amount,
            created_at,
            updated_at: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Case-insensitive category match, folding case the same way
    /// `category_totals` groups
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.trim().to_lowercase()
    }
}

impl Record for Expense {
    const ENTITY: EntityType = EntityType::Expense;

    fn id(&self) -> RecordId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    fn validate(&self) -> TrackerResult<()> {
        if self.title.trim().is_empty() {
            return Err(TrackerError::Validation(
                "Expense title cannot be empty".into(),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(TrackerError::Validation(
                "Expense category cannot be empty".into(),
            ));
        }
        if !self.amount.is_positive() {
            return Err(TrackerError::Validation(format!(
                "Expense amount must be positive, got {}",
                self.amount
            )));
        }
        if self.amount > Money::MAX {
            return Err(TrackerError::Validation(format!(
                "Expense amount cannot exceed {}, got {}",
                Money::MAX,
                self.amount
            )));
        }
        Ok(())
    }
}

/// Partial update for an expense
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<String>,
    pub amount: Option<Money>,
}

impl ExpensePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into().trim().to_string());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into().trim().to_string());
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }
}

impl Patch<Expense> for ExpensePatch {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.amount.is_none()
    }

    fn apply(self, expense: &mut Expense) {
        if let Some(title) = self.title {
            expense.title = title;
        }
        if let Some(description) = self.description {
            expense.description = description;
        }
        if let Some(category) = self.category {
            expense.category = category;
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lunch() -> Expense {
        Expense::new(
            RecordId::FIRST,
            "Lunch",
            "food",
            Money::from_cents(1250),
            Utc::now(),
        )
    }

    #[test]
    fn test_valid_expense() {
        assert!(lunch().validate().is_ok());
    }

    #[test]
    fn test_non_positive_amount_invalid() {
        let mut expense = lunch();
        expense.amount = Money::zero();
        assert!(expense.validate().unwrap_err().is_validation());

        expense.amount = Money::from_cents(-100);
        assert!(expense.validate().is_err());
    }

    #[test]
    fn test_empty_category_invalid() {
        let mut expense = lunch();
        expense.category = " ".into();
        assert!(expense.validate().is_err());
    }

    #[test]
    fn test_category_match_ignores_case() {
        assert!(lunch().in_category("FOOD"));
        assert!(!lunch().in_category("rent"));
    }

    #[test]
    fn test_category_match_folds_non_ascii() {
        let mut expense = lunch();
        expense.category = "CAFÉ".into();
        assert!(expense.in_category("café"));
        assert!(expense.in_category(" Café "));
    }

    #[test]
    fn test_amount_above_max_invalid() {
        let mut expense = lunch();
        expense.amount = Money::MAX;
        assert!(expense.validate().is_ok());

        expense.amount = Money::from_cents(Money::MAX.cents() + 1);
        assert!(expense.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_patch_trims_title_and_category() {
        let mut expense = lunch();
        ExpensePatch::new()
            .title("  Dinner  ")
            .category(" eating out ")
            .apply(&mut expense);

        assert_eq!(expense.title, "Dinner");
        assert_eq!(expense.category, "eating out");
    }

    #[test]
    fn test_patch() {
        let mut expense = lunch();
        ExpensePatch::new()
            .amount(Money::from_cents(900))
            .category("eating out")
            .apply(&mut expense);

        assert_eq!(expense.amount.cents(), 900);
        assert_eq!(expense.category, "eating out");
        assert_eq!(expense.title, "Lunch");
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(lunch()).unwrap();
        assert_eq!(value["amount"], serde_json::json!(12.5));
        assert_eq!(value["category"], "food");
        assert!(value["updated_at"].is_null());
        assert!(value.get("status").is_none());
    }
}
