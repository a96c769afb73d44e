//! Database connectors for the workspace.
//!
//! Currently MongoDB only; the `config` feature adds env-based loading of
//! connection settings via `core_config::FromEnv`.

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;
