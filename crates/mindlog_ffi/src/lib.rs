//! Flutter-facing FFI crate for the Mindlog core.

pub mod api;
