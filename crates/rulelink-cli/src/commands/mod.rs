//! Command implementations for rulelink-cli

pub mod sync;

pub use sync::run_sync;
