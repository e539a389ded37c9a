//! Shared test utilities for the rulelink workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`workspace`]: [`TestWorkspace`](workspace::TestWorkspace) builder for
//!   multi-project workspaces with per-project rule directories

pub mod workspace;

pub use workspace::TestWorkspace;
