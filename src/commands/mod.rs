//! CLI commands for docstamp
//!
//! This module contains all user-facing command implementations:
//!
//! ## Setup & Inspection
//! - **init**: Initialize docstamp.toml configuration for a project
//! - **version**: Show the release string and derived docs version
//! - **doctor**: Run health checks and validation
//!
//! ## Stamping & Patching
//! - **stamp**: Rewrite version stamps in tracked documentation files
//! - **patch**: Apply post-build text fixups to generated output
//!
//! ## Building
//! - **api**: Generate API reference docs from library sources
//! - **build**: Full pipeline (stamp, clean, docs, patch, API docs)
//!
//! All commands discover the project root themselves, so they can run
//! from any directory inside the project.

pub mod api;
pub mod build;
pub mod doctor;
pub mod init;
pub mod patch;
pub mod stamp;
pub mod version;

pub use api::run_api;
pub use build::run_build;
pub use doctor::run_doctor;
pub use init::run_init;
pub use patch::run_patch;
pub use stamp::run_stamp;
pub use version::run_version;
