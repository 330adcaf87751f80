//! Journal use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for the capture/review/edit flows.
//! - Own the tolerance policy for listing versus single-record reads.
//!
//! # Invariants
//! - Listing never fails the whole view for one corrupt record.
//! - Single-record reads surface corruption instead of masking it.
//! - Service layer remains storage-agnostic.

use crate::model::thought::{group_thoughts_by_day, CreateThoughtArgs, Thought, ThoughtGroup};
use crate::repo::kv_repo::KeyValueStore;
use crate::repo::thought_repo::{StoreResult, ThoughtRepository};
use chrono::TimeZone;
use log::{error, warn};

/// Use-case service wrapper for the thought journal.
pub struct JournalService<S: KeyValueStore> {
    repo: ThoughtRepository<S>,
}

impl<S: KeyValueStore> JournalService<S> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: ThoughtRepository<S>) -> Self {
        Self { repo }
    }

    /// Constructs a new thought from capture-flow input and persists it.
    ///
    /// # Contract
    /// - Fresh ID and timestamps; the caller gets the stored record back.
    pub fn create_thought(&self, args: CreateThoughtArgs) -> StoreResult<Thought> {
        let thought = Thought::create(args);
        self.repo.write(&thought)?;
        Ok(thought)
    }

    /// Re-encodes and overwrites one thought under its existing key.
    ///
    /// The editing flow bumps `updated_at_ms` via `Thought::touch` before
    /// calling this; no hidden mutation happens here.
    pub fn save_thought(&self, thought: &Thought) -> StoreResult<()> {
        self.repo.write(thought)
    }

    /// Open-for-edit read: intolerant, corruption and storage failures
    /// both propagate.
    pub fn get_thought(&self, id: &str) -> StoreResult<Thought> {
        self.repo.read(id)
    }

    /// Deletes one thought by ID. Idempotent.
    pub fn delete_thought(&self, id: &str) -> StoreResult<()> {
        self.repo.remove(id)
    }

    /// Review listing: tolerant of individual corrupt records.
    ///
    /// Unreadable records are skipped with a warning; a whole-store failure
    /// degrades to an empty list with an error log. Both choices keep the
    /// review screen alive in the face of bad data.
    pub fn list_thoughts(&self) -> Vec<Thought> {
        let rows = match self.repo.read_all() {
            Ok(rows) => rows,
            Err(err) => {
                error!("event=thought_list module=service status=error error={err}");
                return Vec::new();
            }
        };

        rows.into_iter()
            .filter_map(|(key, result)| match result {
                Ok(thought) => Some(thought),
                Err(err) => {
                    warn!(
                        "event=thought_list module=service status=skipped key={key} error={err}"
                    );
                    None
                }
            })
            .collect()
    }

    /// Review listing bucketed by calendar day in the given timezone.
    pub fn grouped_by_day<Tz: TimeZone>(&self, tz: &Tz) -> Vec<ThoughtGroup> {
        group_thoughts_by_day(&self.list_thoughts(), tz)
    }

    /// Counts stored thought records, decodable or not.
    pub fn count_thoughts(&self) -> StoreResult<usize> {
        self.repo.count()
    }

    /// Whether onboarding has been completed. Degrades to `false` on
    /// storage failure so a broken flag never blocks app start.
    pub fn is_existing_user(&self) -> bool {
        match self.repo.is_existing_user() {
            Ok(flag) => flag,
            Err(err) => {
                error!("event=existing_user_read module=service status=error error={err}");
                false
            }
        }
    }

    /// Marks onboarding as completed.
    pub fn set_existing_user(&self) -> StoreResult<()> {
        self.repo.set_existing_user()
    }
}
