//! # regis-cli — REGIS Command-Line Interface
//!
//! Offline tooling around the REGIS dataset.
//!
//! ## Subcommands
//!
//! - `generate` — Build a seedable synthetic dataset and write it as JSON
//! - `summary` — Print the risk and conflict breakdowns of a dataset file
//! - `import` — Replace the PostgreSQL contents with a dataset file
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to the core, store and query crates.
//! - Handlers return an exit code; `anyhow` carries context for failures.

pub mod generate;
pub mod import;
pub mod summary;
