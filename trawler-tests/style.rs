//! Style Enforcement Tests
//!
//! Checks patterns across the workspace sources that clippy does not catch
//! on its own.
//!
//! - `panic_enforcement` - Forbids `unwrap()` and `expect()` in production code

#[path = "style/panic_enforcement.rs"]
mod panic_enforcement;
