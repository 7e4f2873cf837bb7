//! Record store trait definitions.

use plastrack_common::{RecordSet, Result, UsageRecord};

/// Append-only storage for usage records.
pub trait RecordStore: Send + Sync {
    /// Creates an empty store if none exists. Never touches an existing one.
    fn initialize(&self) -> Result<()>;

    /// Whether the backing store currently exists.
    fn exists(&self) -> bool;

    /// Loads every record in insertion order.
    ///
    /// Fails with `StoreUnavailable` if the store does not exist.
    fn load(&self) -> Result<RecordSet>;

    /// Appends one record, persisting the full set.
    fn append(&self, record: UsageRecord) -> Result<()>;

    /// Short description of the backing location for logs.
    fn location(&self) -> String;
}
