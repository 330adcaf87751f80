//! Core domain logic for Mindlog, a CBT thought-record journal.
//! This crate is the single source of truth for business invariants.

pub mod codec;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use codec::{DecodeCause, DecodeError, JsonError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::distortion::{Distortion, LegacyDistortionV0, UnknownSlugError};
pub use model::thought::{
    group_thoughts_by_day, CreateThoughtArgs, Thought, ThoughtGroup, ThoughtId, CURRENT_VERSION,
    THOUGHTS_KEY_PREFIX,
};
pub use repo::kv_repo::{KeyValueStore, KvError, KvResult, SqliteKeyValueStore};
pub use repo::thought_repo::{StoreError, StoreResult, ThoughtRepository, EXISTING_USER_KEY};
pub use service::journal_service::JournalService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
