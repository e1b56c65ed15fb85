//! Health checks and validation infrastructure
//!
//! This module provides a unified interface for running health checks.
//! All checks implement the `Check` trait, making it easy to add new
//! checks without modifying core logic.
//!
//! # Built-in Checks
//!
//! - **config**: Validates docstamp.toml presence and contents
//! - **manifest-version**: Extracts the declared release from the manifest
//! - **docs-source**: Confirms the docs source tree and doc config exist
//! - **stamp-targets**: Confirms every stamp target holds its assignment line
//! - **api-sources**: Confirms the API doc scan finds source files
//! - **doc-tools**: Probes the configured tools with --version (thorough mode)
//!
//! # Example
//!
//! ```rust,ignore
//! use docstamp::checks::{CheckContext, create_default_runner};
//!
//! let ctx = CheckContext {
//!   project_root: PathBuf::from("."),
//!   thorough: true,
//! };
//!
//! let runner = create_default_runner();
//! let results = runner.run_all(&ctx)?;
//!
//! for result in results {
//!   if !result.passed {
//!     println!("❌ {}: {}", result.check_name, result.message);
//!   }
//! }
//! ```

mod project;
mod runner;
mod tools;
mod trait_def;

// Re-export public API
pub use runner::create_default_runner;
pub use trait_def::{CheckContext, Severity};

// Individual checks are not exported - they're registered in create_default_runner()
// This keeps the API simple and prevents misuse
