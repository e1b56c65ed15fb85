//! Core engine for docstamp operations
//!
//! This module contains the fundamental building blocks for all docstamp functionality:
//!
//! - **apidoc**: API doc generator invocation over the scanned source files
//! - **config**: Configuration (docstamp.toml) parsing and validation
//! - **doctree**: Output tree removal and doc builder invocations
//! - **error**: Comprehensive error types with contextual help messages
//! - **patch**: Literal post-build fixups in generated pages
//! - **plan**: Pipeline planning and serialization
//! - **stamp**: Assignment-line stamping in tracked files
//! - **tools**: External tool invocation and probing
//! - **version**: Release extraction and docs-version truncation

pub mod apidoc;
pub mod config;
pub mod doctree;
pub mod error;
pub mod patch;
pub mod plan;
pub mod stamp;
pub mod tools;
pub mod version;
