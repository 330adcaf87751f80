//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple for the UI: error-as-message envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Return values are UTF-8 strings/structs with stable meaning.

use mindlog_core::db::open_db;
use mindlog_core::model::distortion;
use mindlog_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CreateThoughtArgs, JournalService, SqliteKeyValueStore, StoreResult, Thought,
    ThoughtRepository,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "mindlog.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same configuration (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One distortion catalog entry for the picker UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistortionItem {
    pub slug: String,
    pub label: String,
    pub description: String,
    pub emoji: String,
}

/// Returns the distortion catalog, label-sorted for picker rendering.
///
/// # FFI contract
/// - Sync call, no I/O, deterministic output.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn distortion_catalog() -> Vec<DistortionItem> {
    distortion::sorted_list()
        .into_iter()
        .map(|entry| DistortionItem {
            slug: entry.slug.to_string(),
            label: entry.label.to_string(),
            description: entry.description.to_string(),
            emoji: entry.emoji.to_string(),
        })
        .collect()
}

/// Generic action response envelope for thought mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Stable ID of the affected thought, when one exists.
    pub uuid: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ThoughtActionResponse {
    fn success(message: impl Into<String>, uuid: String) -> Self {
        Self {
            ok: true,
            uuid: Some(uuid),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            uuid: None,
            message: message.into(),
        }
    }
}

/// Fetch response carrying the raw persisted JSON of one thought.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtFetchResponse {
    pub ok: bool,
    /// Modern-format JSON document, present on success.
    pub json: Option<String>,
    pub message: String,
}

/// List item for the review screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtListItem {
    pub uuid: String,
    pub automatic_thought: String,
    pub distortion_emojis: Vec<String>,
    pub created_at_ms: i64,
}

/// One calendar day of the review screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtGroupItem {
    pub date: String,
    pub items: Vec<ThoughtListItem>,
}

/// Captures a new thought.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Unknown distortion slugs fail the whole call; nothing is persisted.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn thought_create(
    automatic_thought: String,
    challenge: String,
    alternative_thought: String,
    distortion_slugs: Vec<String>,
) -> ThoughtActionResponse {
    let mut distortions = Vec::with_capacity(distortion_slugs.len());
    for slug in &distortion_slugs {
        match distortion::by_slug(slug) {
            Ok(entry) => distortions.push(entry),
            Err(err) => return ThoughtActionResponse::failure(format!("thought_create failed: {err}")),
        }
    }

    let args = CreateThoughtArgs {
        automatic_thought,
        challenge,
        alternative_thought,
        cognitive_distortions: distortions,
    };
    match with_journal_service(|service| service.create_thought(args)) {
        Ok(thought) => ThoughtActionResponse::success("Thought saved.", thought.uuid),
        Err(message) => ThoughtActionResponse::failure(message),
    }
}

/// Rewrites the editable fields of one thought and bumps its edit
/// timestamp. `uuid` and creation time never change.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Fails without writing when the record is missing or corrupt.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn thought_update(
    uuid: String,
    automatic_thought: String,
    challenge: String,
    alternative_thought: String,
    distortion_slugs: Vec<String>,
) -> ThoughtActionResponse {
    let mut distortions = Vec::with_capacity(distortion_slugs.len());
    for slug in &distortion_slugs {
        match distortion::by_slug(slug) {
            Ok(entry) => distortions.push(entry),
            Err(err) => return ThoughtActionResponse::failure(format!("thought_update failed: {err}")),
        }
    }

    let result = with_journal_service(|service| {
        let mut thought = service.get_thought(&uuid)?;
        thought.automatic_thought = automatic_thought;
        thought.challenge = challenge;
        thought.alternative_thought = alternative_thought;
        thought.cognitive_distortions = distortions.into_iter().collect();
        thought.touch();
        service.save_thought(&thought)?;
        Ok(thought)
    });
    match result {
        Ok(thought) => ThoughtActionResponse::success("Thought updated.", thought.uuid),
        Err(message) => ThoughtActionResponse::failure(message),
    }
}

/// Reads one thought strictly, returning its modern-format JSON.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Corrupt records surface as failures here (open-for-edit is
///   intolerant); the list call is the tolerant path.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn thought_get(uuid: String) -> ThoughtFetchResponse {
    match with_journal_service(|service| service.get_thought(&uuid)) {
        Ok(thought) => ThoughtFetchResponse {
            ok: true,
            json: Some(mindlog_core::codec::encode(&thought).to_string()),
            message: "Thought loaded.".to_string(),
        },
        Err(message) => ThoughtFetchResponse {
            ok: false,
            json: None,
            message,
        },
    }
}

/// Deletes one thought by ID.
///
/// # FFI contract
/// - Sync call, DB-backed execution. Idempotent.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn thought_delete(uuid: String) -> ThoughtActionResponse {
    match with_journal_service(|service| service.delete_thought(&uuid)) {
        Ok(()) => ThoughtActionResponse::success("Thought deleted.", uuid),
        Err(message) => ThoughtActionResponse::failure(message),
    }
}

/// Returns the review listing bucketed by device-local calendar day.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Corrupt records are silently omitted; storage failure yields an
///   empty listing. The core logs both.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn thought_list_grouped() -> Vec<ThoughtGroupItem> {
    let groups = match with_journal_service(|service| Ok(service.grouped_by_day(&chrono::Local))) {
        Ok(groups) => groups,
        Err(_) => Vec::new(),
    };

    groups
        .into_iter()
        .map(|group| ThoughtGroupItem {
            date: group.date,
            items: group.thoughts.iter().map(to_list_item).collect(),
        })
        .collect()
}

/// Counts stored thought records, decodable or not.
///
/// # FFI contract
/// - Sync call, DB-backed execution. Returns 0 on storage failure.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn thought_count() -> u32 {
    match with_journal_service(|service| service.count_thoughts()) {
        Ok(count) => saturating_count(count),
        Err(_) => 0,
    }
}

/// Whether onboarding has already been completed on this device.
///
/// # FFI contract
/// - Sync call, DB-backed execution. Degrades to `false` on failure.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn onboarding_seen() -> bool {
    with_journal_service(|service| Ok(service.is_existing_user())).unwrap_or(false)
}

/// Marks onboarding as completed.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn mark_onboarding_seen() -> String {
    match with_journal_service(|service| service.set_existing_user()) {
        Ok(()) => String::new(),
        Err(message) => message,
    }
}

// Counts that do not fit the wire type saturate instead of wrapping.
fn saturating_count(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn to_list_item(thought: &Thought) -> ThoughtListItem {
    ThoughtListItem {
        uuid: thought.uuid.clone(),
        automatic_thought: thought.automatic_thought.clone(),
        distortion_emojis: thought
            .cognitive_distortions
            .iter()
            .map(|entry| entry.emoji.to_string())
            .collect(),
        created_at_ms: thought.created_at_ms,
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("MINDLOG_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_journal_service<T>(
    f: impl FnOnce(&JournalService<SqliteKeyValueStore<'_>>) -> StoreResult<T>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("journal DB open failed: {err}"))?;
    let service = JournalService::new(ThoughtRepository::new(SqliteKeyValueStore::new(&conn)));
    f(&service).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::saturating_count;

    #[test]
    fn oversized_counts_saturate_at_the_wire_maximum() {
        assert_eq!(saturating_count(0), 0);
        assert_eq!(saturating_count(42), 42);
        assert_eq!(saturating_count(u32::MAX as usize), u32::MAX);
        assert_eq!(saturating_count(u32::MAX as usize + 1), u32::MAX);
        assert_eq!(saturating_count(usize::MAX), u32::MAX);
    }
}
