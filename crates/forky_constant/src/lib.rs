//! Shared constants for the Forky client crates.

pub mod app;
pub mod defaults;
pub mod messages;
