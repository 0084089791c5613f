//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `deskboard_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("deskboard_core ping={}", deskboard_core::ping());
    println!("deskboard_core version={}", deskboard_core::core_version());
}
