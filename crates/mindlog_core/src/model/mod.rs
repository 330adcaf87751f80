//! Domain model for the thought journal.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep the distortion catalog as data, resolved by slug, not as a
//!   language enum exposed to persistence.
//!
//! # Invariants
//! - Every thought is identified by a stable prefixed `ThoughtId`.
//! - The distortion catalog is closed and read-only after startup.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod distortion;
pub mod thought;
