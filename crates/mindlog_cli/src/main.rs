//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `mindlog_core` linkage.
//! - Dump the distortion catalog for quick local inspection.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Why: keep a tiny CLI probe to validate core crate wiring independently
    // from the Flutter/FFI runtime setup.
    println!("mindlog_core ping={}", mindlog_core::ping());
    println!("mindlog_core version={}", mindlog_core::core_version());

    if std::env::args().any(|arg| arg == "catalog") {
        for entry in mindlog_core::model::distortion::sorted_list() {
            println!(
                "{} {}  {}: {}",
                entry.emoji, entry.slug, entry.label, entry.description
            );
        }
    }
}
