//! Common behaviour shared by every stored record kind
//!
//! The store is generic over [`Record`]; partial updates are expressed as a
//! [`Patch`] that knows which fields were actually supplied.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use super::ids::RecordId;
use crate::audit::EntityType;
use crate::error::TrackerResult;

/// A record that can live in a `Store`
pub trait Record: Clone + Debug + PartialEq + Serialize + DeserializeOwned {
    /// Entity type used for audit entries and "not found" messages
    const ENTITY: EntityType;

    fn id(&self) -> RecordId;

    fn title(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> Option<DateTime<Utc>>;

    /// Stamp `updated_at`
    fn touch(&mut self, at: DateTime<Utc>);

    /// Check field-level invariants (non-empty title, positive amount, ...)
    fn validate(&self) -> TrackerResult<()>;
}

/// A set of optional field changes for a record
pub trait Patch<R> {
    /// True when no field was supplied
    fn is_empty(&self) -> bool;

    /// Apply the supplied fields to `record`, leaving the rest untouched
    fn apply(self, record: &mut R);
}
