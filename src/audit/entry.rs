//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::diff::generate_diff;

/// Kind of mutation that was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        };
        f.write_str(label)
    }
}

/// Kind of entity a mutation applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Task,
    Expense,
    Budget,
}

impl EntityType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityType::Task => "Task",
            EntityType::Expense => "Expense",
            EntityType::Budget => "Budget",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Record id (or month key for budgets)
    pub entity_id: String,

    /// Record title, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Entity before the operation (updates and deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Entity after the operation (creates and updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Changed fields, updates only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn record(
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: Option<serde_json::Value>,
        after: Option<serde_json::Value>,
    ) -> Self {
        let diff_summary = match (operation, &before, &after) {
            (Operation::Update, Some(b), Some(a)) => generate_diff(b, a),
            _ => None,
        };

        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        }
    }

    /// Entry for a created entity
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let after = serde_json::to_value(entity).ok();
        Self::record(Operation::Create, entity_type, entity_id.into(), entity_name, None, after)
    }

    /// Entry for an updated entity; the diff is computed from both states
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Self {
        Self::record(
            Operation::Update,
            entity_type,
            entity_id.into(),
            entity_name,
            serde_json::to_value(before).ok(),
            serde_json::to_value(after).ok(),
        )
    }

    /// Entry for a deleted entity
    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let before = serde_json::to_value(entity).ok();
        Self::record(Operation::Delete, entity_type, entity_id.into(), entity_name, before, None)
    }

    /// One-line (or two-line, with changes) rendering for the `audit` command
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} #{}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}
