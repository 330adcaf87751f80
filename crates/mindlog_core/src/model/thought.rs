//! Thought domain model.
//!
//! # Responsibility
//! - Define the canonical CBT thought record and its construction lifecycle.
//! - Provide the derived day-grouping view used by the review list.
//!
//! # Invariants
//! - `uuid` and `created_at_ms` never change after creation.
//! - `cognitive_distortions` is a set: unordered semantics, no duplicates.
//! - `v` always holds `CURRENT_VERSION` for in-memory records; only the
//!   codec ever sees other values.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::distortion::Distortion;
use chrono::{TimeZone, Utc};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Current persisted schema version.
///
/// The tag only distinguishes "modern" from "everything else"; bumping it
/// requires a new decode arm, never a rewrite of stored data.
pub const CURRENT_VERSION: u32 = 1;

/// Storage key prefix for thought records. Part of the on-device data
/// contract; changing it would orphan existing records.
pub const THOUGHTS_KEY_PREFIX: &str = "@Mindlog:thoughts:";

/// Stable identifier of a thought. Doubles as its storage key, so the value
/// carries the key prefix.
pub type ThoughtId = String;

/// Builds the storage key (and identifier) for a raw id fragment.
pub fn thought_key(fragment: impl std::fmt::Display) -> ThoughtId {
    format!("{THOUGHTS_KEY_PREFIX}{fragment}")
}

/// One CBT journal entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thought {
    /// Prefixed stable ID, also the storage key.
    pub uuid: ThoughtId,
    /// The automatic negative thought as the user wrote it down.
    pub automatic_thought: String,
    /// The user's challenge to the automatic thought.
    pub challenge: String,
    /// The balanced alternative thought.
    pub alternative_thought: String,
    /// Distortion tags picked for this entry. Set semantics; ordering in
    /// the BTreeSet is by slug, which keeps encoding deterministic.
    pub cognitive_distortions: BTreeSet<Distortion>,
    /// Creation instant, Unix epoch milliseconds. Never changes.
    pub created_at_ms: i64,
    /// Last edit instant, Unix epoch milliseconds.
    pub updated_at_ms: i64,
    /// Schema version tag. `CURRENT_VERSION` for every in-memory record.
    pub v: u32,
}

/// Input for constructing a new thought from the capture flow.
#[derive(Debug, Clone, Default)]
pub struct CreateThoughtArgs {
    pub automatic_thought: String,
    pub challenge: String,
    pub alternative_thought: String,
    pub cognitive_distortions: Vec<Distortion>,
}

impl Thought {
    /// Creates a new thought with a fresh ID and both timestamps set to now.
    ///
    /// Pure construction: no I/O happens here; persistence is an explicit
    /// separate step.
    pub fn create(args: CreateThoughtArgs) -> Self {
        let now_ms = Utc::now().timestamp_millis();
        Self {
            uuid: thought_key(Uuid::new_v4()),
            automatic_thought: args.automatic_thought,
            challenge: args.challenge,
            alternative_thought: args.alternative_thought,
            cognitive_distortions: args.cognitive_distortions.into_iter().collect(),
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
            v: CURRENT_VERSION,
        }
    }

    /// Bumps the edit timestamp. Called by the editing flow before a save.
    pub fn touch(&mut self) {
        self.updated_at_ms = Utc::now().timestamp_millis();
    }
}

/// Derived, non-persisted review view: one calendar day of thoughts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtGroup {
    /// Display string of the calendar day, e.g. `Tue Jan 02 2024`.
    pub date: String,
    /// Thoughts of that day, newest first.
    pub thoughts: Vec<Thought>,
}

/// Buckets thoughts by the calendar day of `created_at_ms`.
///
/// The timezone is an explicit parameter rather than an ambient device
/// default; callers wanting device-local day boundaries pass `chrono::Local`.
/// Groups are ordered newest day first; within a group, newest thought
/// first. Grouping is keyed by the day's display string, so two instants
/// that format to the same day merge.
pub fn group_thoughts_by_day<Tz: TimeZone>(thoughts: &[Thought], tz: &Tz) -> Vec<ThoughtGroup> {
    let mut sorted: Vec<&Thought> = thoughts.iter().collect();
    sorted.sort_by(|first, second| second.created_at_ms.cmp(&first.created_at_ms));

    let mut groups: Vec<ThoughtGroup> = Vec::new();
    for thought in sorted {
        let date = day_label(thought.created_at_ms, tz);
        match groups.last_mut() {
            Some(group) if group.date == date => group.thoughts.push(thought.clone()),
            _ => groups.push(ThoughtGroup {
                date,
                thoughts: vec![thought.clone()],
            }),
        }
    }

    groups
}

fn day_label<Tz: TimeZone>(epoch_ms: i64, tz: &Tz) -> String {
    match tz.timestamp_millis_opt(epoch_ms).single() {
        Some(instant) => instant.date_naive().format("%a %b %d %Y").to_string(),
        // Outside chrono's representable range. Still deterministic, so
        // grouping stays stable even for garbage timestamps.
        None => format!("epoch-ms {epoch_ms}"),
    }
}
