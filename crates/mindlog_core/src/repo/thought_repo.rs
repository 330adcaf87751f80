//! Thought persistence over the key-value storage boundary.
//!
//! # Responsibility
//! - Encode/decode thought records at their storage keys.
//! - Keep per-record corruption isolated from whole-store availability.
//!
//! # Invariants
//! - Write paths always re-encode the full record and overwrite in place.
//! - Read paths reject invalid persisted state instead of masking it.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::codec::{self, DecodeError};
use crate::model::thought::{Thought, ThoughtId, THOUGHTS_KEY_PREFIX};
use crate::repo::kv_repo::{KeyValueStore, KvError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key of the single onboarding-completed flag.
pub const EXISTING_USER_KEY: &str = "@Mindlog:existing-user";

pub type StoreResult<T> = Result<T, StoreError>;

/// Thought persistence error.
///
/// The `Kv`/`Decode` split is load-bearing: callers choose different
/// policies for "storage is unavailable" and "this record is corrupt".
#[derive(Debug)]
pub enum StoreError {
    Kv(KvError),
    Decode(DecodeError),
    NotFound(ThoughtId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kv(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "thought not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kv(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

impl From<DecodeError> for StoreError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

/// Thought repository over any key-value store.
pub struct ThoughtRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ThoughtRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persists one thought under its own key, overwriting any prior value.
    pub fn write(&self, thought: &Thought) -> StoreResult<()> {
        let raw = codec::encode(thought).to_string();
        self.store.set(&thought.uuid, &raw)?;
        Ok(())
    }

    /// Reads one thought strictly: both storage and decode failures
    /// propagate, each under its own variant.
    pub fn read(&self, id: &str) -> StoreResult<Thought> {
        match self.store.get(id)? {
            Some(raw) => Ok(codec::decode_str(&raw)?),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    /// Removes one thought. Idempotent; removing an absent id succeeds.
    pub fn remove(&self, id: &str) -> StoreResult<()> {
        self.store.remove(id)?;
        Ok(())
    }

    /// Reads every stored thought record, one decode result per key.
    ///
    /// A whole-store enumeration failure is the outer error; a single bad
    /// record only poisons its own entry, so callers can skip-and-continue.
    pub fn read_all(&self) -> StoreResult<Vec<(String, StoreResult<Thought>)>> {
        let keys = self.store.list_keys_with_prefix(THOUGHTS_KEY_PREFIX)?;

        let mut rows = Vec::with_capacity(keys.len());
        for key in keys {
            let result = match self.store.get(&key) {
                Ok(Some(raw)) => codec::decode_str(&raw).map_err(StoreError::from),
                // Key listed but gone by the time we read it; no cross-record
                // transaction guarantee exists, so surface it per record.
                Ok(None) => Err(StoreError::NotFound(key.clone())),
                Err(err) => Err(StoreError::Kv(err)),
            };
            rows.push((key, result));
        }
        Ok(rows)
    }

    /// Counts stored thought records (decodable or not).
    pub fn count(&self) -> StoreResult<usize> {
        Ok(self.store.list_keys_with_prefix(THOUGHTS_KEY_PREFIX)?.len())
    }

    /// Returns whether the onboarding-completed flag has been set.
    pub fn is_existing_user(&self) -> StoreResult<bool> {
        let value = self.store.get(EXISTING_USER_KEY)?;
        Ok(value.is_some_and(|flag| !flag.is_empty()))
    }

    /// Marks onboarding as completed.
    pub fn set_existing_user(&self) -> StoreResult<()> {
        self.store.set(EXISTING_USER_KEY, "true")?;
        Ok(())
    }
}
