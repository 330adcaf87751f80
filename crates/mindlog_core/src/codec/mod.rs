//! Versioned thought codec.
//!
//! # Responsibility
//! - Serialize thoughts to the persisted JSON wire shape and back.
//! - Keep every schema generation ever shipped decodable.
//!
//! # Invariants
//! - Decoding is total: it returns a fully valid `Thought` or an error,
//!   never a partially populated record.
//! - New schema versions add a new dispatch arm; the fallback arm keeps
//!   decoding the oldest (pre-versioning) format forever.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::distortion::{self, Distortion, UnknownSlugError};
use crate::model::thought::{Thought, CURRENT_VERSION};
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod json;

pub use json::JsonError;

/// Why a decode failed, before the snapshot is attached.
#[derive(Debug)]
pub enum DecodeCause {
    /// The raw payload was not parseable JSON at all.
    Syntax(serde_json::Error),
    /// A field was missing or had the wrong type.
    Json(JsonError),
    /// A distortion reference pointed outside the closed catalog.
    UnknownSlug(UnknownSlugError),
}

impl Display for DecodeCause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
            Self::UnknownSlug(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DecodeCause {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Syntax(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::UnknownSlug(err) => Some(err),
        }
    }
}

impl From<JsonError> for DecodeCause {
    fn from(value: JsonError) -> Self {
        Self::Json(value)
    }
}

impl From<UnknownSlugError> for DecodeCause {
    fn from(value: UnknownSlugError) -> Self {
        Self::UnknownSlug(value)
    }
}

/// A failed thought decode.
///
/// Carries a snapshot of the offending document plus the field-level cause,
/// so a single error value is enough to diagnose a corrupt record.
#[derive(Debug)]
pub struct DecodeError {
    snapshot: Value,
    cause: DecodeCause,
}

impl DecodeError {
    /// The document (or raw text, for syntax failures) that failed to decode.
    pub fn snapshot(&self) -> &Value {
        &self.snapshot
    }

    /// The underlying field-level failure.
    pub fn cause(&self) -> &DecodeCause {
        &self.cause
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "couldn't decode thought: {}", self.snapshot)
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

/// Encodes one distortion reference the modern way: as its bare slug.
pub fn encode_distortion(entry: &Distortion) -> Value {
    Value::String(entry.slug.to_string())
}

/// Encodes one distortion as the pre-versioning inline object.
///
/// Explicit opt-in for compatibility tooling and fixtures.
pub fn encode_distortion_legacy(entry: &Distortion) -> Value {
    json!({
        "slug": entry.slug,
        "label": entry.label,
        "description": entry.description,
        "emoji": entry.emoji,
    })
}

/// Decodes one distortion reference.
///
/// Accepts either a bare slug string (modern) or an object carrying a
/// `slug` field (legacy inline shape); anything the catalog doesn't know
/// is an error. Inline display strings are discarded in favor of the
/// catalog entry, which is how relabels reach old records.
pub fn decode_distortion(value: &Value) -> Result<Distortion, DecodeCause> {
    let slug = match value {
        Value::Object(map) => json::string(json::field(map, "slug")?)?,
        _ => json::string(value)?,
    };
    Ok(distortion::by_slug(&slug)?)
}

/// Serializes a thought to the modern wire shape: distortions as slugs,
/// timestamps as epoch milliseconds, `v` included.
pub fn encode(thought: &Thought) -> Value {
    json!({
        "v": thought.v,
        "uuid": thought.uuid,
        "automaticThought": thought.automatic_thought,
        "alternativeThought": thought.alternative_thought,
        "challenge": thought.challenge,
        "cognitiveDistortions": thought
            .cognitive_distortions
            .iter()
            .map(encode_distortion)
            .collect::<Vec<_>>(),
        "createdAt": thought.created_at_ms,
        "updatedAt": thought.updated_at_ms,
    })
}

/// Serializes a thought to the pre-versioning wire shape: distortions as
/// inline objects, no `v` field.
///
/// Not the normal write path; exists so compatibility tests and tooling can
/// produce the exact documents old app versions wrote.
pub fn encode_legacy(thought: &Thought) -> Value {
    json!({
        "uuid": thought.uuid,
        "automaticThought": thought.automatic_thought,
        "alternativeThought": thought.alternative_thought,
        "challenge": thought.challenge,
        "cognitiveDistortions": thought
            .cognitive_distortions
            .iter()
            .map(encode_distortion_legacy)
            .collect::<Vec<_>>(),
        "createdAt": thought.created_at_ms,
        "updatedAt": thought.updated_at_ms,
    })
}

/// Parses and validates a thought from a JSON document.
///
/// Dispatches on the `v` field: `1` selects the modern shape, anything
/// else (including a missing field) falls back to the pre-versioning
/// layout, whose result is stamped with `CURRENT_VERSION`. Every failure
/// aborts the whole decode.
pub fn decode(value: &Value) -> Result<Thought, DecodeError> {
    decode_value(value).map_err(|cause| DecodeError {
        snapshot: value.clone(),
        cause,
    })
}

/// Parses a thought from raw persisted text.
///
/// Unparseable text surfaces as a `DecodeError` whose snapshot is the raw
/// payload, keeping "record is corrupt" distinct from storage failures.
pub fn decode_str(raw: &str) -> Result<Thought, DecodeError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => decode(&value),
        Err(err) => Err(DecodeError {
            snapshot: Value::String(raw.to_string()),
            cause: DecodeCause::Syntax(err),
        }),
    }
}

fn decode_value(value: &Value) -> Result<Thought, DecodeCause> {
    let map = json::object(value)?;
    match map.get("v").and_then(Value::as_i64) {
        // Modern thought.
        Some(1) => decode_fields(map),
        // Legacy thought: no `v`, or a value this build doesn't know.
        // Existing on-device data uses the pre-versioning layout, so this
        // arm stays forever; the result is stamped with the current version.
        _ => decode_fields(map),
    }
}

// Both generations share one field layout; the distortion decoder accepts
// either reference shape, so a single extractor serves both arms above.
fn decode_fields(map: &Map<String, Value>) -> Result<Thought, DecodeCause> {
    let distortions = json::array(json::field(map, "cognitiveDistortions")?)?
        .iter()
        .map(decode_distortion)
        .collect::<Result<BTreeSet<_>, _>>()?;

    Ok(Thought {
        uuid: json::string(json::field(map, "uuid")?)?,
        automatic_thought: json::string(json::field(map, "automaticThought")?)?,
        alternative_thought: json::string(json::field(map, "alternativeThought")?)?,
        challenge: json::string(json::field(map, "challenge")?)?,
        cognitive_distortions: distortions,
        created_at_ms: json::epoch_ms(json::field(map, "createdAt")?)?,
        updated_at_ms: json::epoch_ms(json::field(map, "updatedAt")?)?,
        v: CURRENT_VERSION,
    })
}
