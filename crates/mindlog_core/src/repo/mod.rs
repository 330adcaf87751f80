//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the opaque key-value storage contract and its SQLite backend.
//! - Keep codec and policy decisions out of the storage transport.
//!
//! # Invariants
//! - Repository reads return semantic errors (`NotFound`, `Decode`) in
//!   addition to storage transport errors.

pub mod kv_repo;
pub mod thought_repo;
