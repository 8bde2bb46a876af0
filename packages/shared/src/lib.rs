//! Shared utilities for mnk-live.
//!
//! Logger setup and wall-clock helpers used by the server binary and its tests.

pub mod logger;
pub mod time;
