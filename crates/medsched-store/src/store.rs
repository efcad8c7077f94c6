//! Generic in-memory collection of records.

use std::collections::HashSet;

use chrono::Utc;
use medsched_core::id::new_record_id;

use crate::error::{StoreError, StoreResult};
use crate::record::Record;

/// ## Summary
/// Owns the canonical list of one kind of record.
///
/// Lookups are linear scans; the collections held here are at most a few
/// hundred records. "Not found" is reported through `Option`/`bool`, never as an
/// error. Every read returns owned copies.
#[derive(Debug, Clone)]
pub struct RecordStore<T: Record> {
    records: Vec<T>,
}

impl<T: Record> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> RecordStore<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Builds a store pre-populated with `records`, kept as given.
    #[must_use]
    pub const fn with_records(records: Vec<T>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|record| record.id() == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    fn unused_id(&self) -> String {
        loop {
            let id = new_record_id();
            if !self.contains(&id) {
                return id;
            }
            tracing::warn!(kind = T::KIND, %id, "Generated id collided, drawing another");
        }
    }

    /// ## Summary
    /// Stores a new record built from `draft` under a fresh id.
    ///
    /// ## Side Effects
    /// Sets `created_at` and `updated_at` to the current time.
    pub fn create(&mut self, draft: T::Draft) -> T {
        let id = self.unused_id();
        let record = T::from_draft(id, draft, Utc::now());
        tracing::debug!(kind = T::KIND, id = record.id(), "Created record");
        self.records.push(record.clone());
        record
    }

    /// ## Summary
    /// Stores a batch of records whose ids were assigned upstream, all or
    /// nothing.
    ///
    /// ## Side Effects
    /// Sets `created_at` and `updated_at` of every record to the same instant.
    ///
    /// ## Errors
    /// Returns `StoreError::DuplicateId` for the first id already held or
    /// repeated within the batch; nothing is stored then.
    pub fn insert_all(&mut self, mut records: Vec<T>) -> StoreResult<Vec<T>> {
        let mut seen: HashSet<&str> = self.records.iter().map(Record::id).collect();
        if let Some(duplicate) = records.iter().map(Record::id).find(|id| !seen.insert(*id)) {
            return Err(StoreError::DuplicateId {
                kind: T::KIND,
                id: duplicate.to_string(),
            });
        }

        let now = Utc::now();
        for record in &mut records {
            record.set_created_at(now);
            record.set_updated_at(now);
        }
        tracing::debug!(kind = T::KIND, count = records.len(), "Inserted records");
        self.records.extend(records.iter().cloned());
        Ok(records)
    }

    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<T> {
        self.records.iter().find(|record| record.id() == id).cloned()
    }

    /// Snapshot of every record, in insertion order.
    #[must_use]
    pub fn get_all(&self) -> Vec<T> {
        self.records.clone()
    }

    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Vec<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// ## Summary
    /// Merges `changes` onto the record with `id`.
    ///
    /// Returns `None` when no such record exists.
    ///
    /// ## Side Effects
    /// Refreshes `updated_at`.
    pub fn update(&mut self, id: &str, changes: T::Changes) -> Option<T> {
        let index = self.position(id)?;
        let record = &mut self.records[index];
        record.merge(changes);
        record.set_updated_at(Utc::now());
        tracing::debug!(kind = T::KIND, id, "Updated record");
        Some(record.clone())
    }

    /// Removes the record with `id`; returns whether one was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.records.remove(index);
        tracing::debug!(kind = T::KIND, id, "Deleted record");
        true
    }

    /// Replaces the whole collection.
    pub fn replace_all(&mut self, records: Vec<T>) {
        tracing::debug!(kind = T::KIND, count = records.len(), "Replacing all records");
        self.records = records;
    }
}
