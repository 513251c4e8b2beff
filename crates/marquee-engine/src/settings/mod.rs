//! Flat key/value settings store.
//!
//! Settings are persisted as a single JSON object whose values are booleans,
//! integers or strings. Every key the engine reads has a default, so a missing
//! file or a missing key never prevents startup.

pub mod keys;
mod store;

pub use store::{SettingValue, Settings};
