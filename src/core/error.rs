//! Error types for docstamp with contextual messages and exit codes
//!
//! This module provides a unified error type that categorizes errors and provides
//! contextual help messages to users. Every error includes a helpful suggestion
//! to guide users toward resolution.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for docstamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (external tools, I/O)
  System = 2,
  /// Validation failure (version missing, checks failed, empty scans)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for docstamp
#[derive(Debug)]
pub enum StampError {
  /// Configuration errors
  Config(ConfigError),

  /// External tool errors (sphinx, epydoc, index generators)
  Tool(ToolError),

  /// Validation errors (version extraction, source scans, checks)
  Validation(ValidationError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl StampError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    StampError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    StampError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      StampError::Message { message, context, help } => StampError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      StampError::Config(_) => ExitCode::User,
      StampError::Tool(_) => ExitCode::System,
      StampError::Validation(_) => ExitCode::Validation,
      StampError::Io(_) => ExitCode::System,
      StampError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      StampError::Config(e) => e.help_message(),
      StampError::Tool(e) => e.help_message(),
      StampError::Validation(e) => e.help_message(),
      StampError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for StampError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StampError::Config(e) => write!(f, "{}", e),
      StampError::Tool(e) => write!(f, "{}", e),
      StampError::Validation(e) => write!(f, "{}", e),
      StampError::Io(e) => write!(f, "I/O error: {}", e),
      StampError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for StampError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      StampError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for StampError {
  fn from(err: io::Error) -> Self {
    StampError::Io(err)
  }
}

impl From<String> for StampError {
  fn from(msg: String) -> Self {
    StampError::message(msg)
  }
}

impl From<&str> for StampError {
  fn from(msg: &str) -> Self {
    StampError::message(msg)
  }
}

impl From<toml_edit::TomlError> for StampError {
  fn from(err: toml_edit::TomlError) -> Self {
    StampError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for StampError {
  fn from(err: toml_edit::de::Error) -> Self {
    StampError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for StampError {
  fn from(err: toml_edit::ser::Error) -> Self {
    StampError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for StampError {
  fn from(err: serde_json::Error) -> Self {
    StampError::message(format!("JSON error: {}", err))
  }
}

impl From<regex::Error> for StampError {
  fn from(err: regex::Error) -> Self {
    StampError::message(format!("Pattern error: {}", err))
  }
}

impl From<glob::PatternError> for StampError {
  fn from(err: glob::PatternError) -> Self {
    StampError::message(format!("Glob pattern error: {}", err))
  }
}

impl From<glob::GlobError> for StampError {
  fn from(err: glob::GlobError) -> Self {
    StampError::message(format!("Glob error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for StampError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    StampError::message(format!("UTF-8 conversion error: {}", err))
  }
}

impl From<std::path::StripPrefixError> for StampError {
  fn from(err: std::path::StripPrefixError) -> Self {
    StampError::message(format!("Path strip prefix error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// docstamp.toml not found
  NotFound { search_root: PathBuf },

  /// Missing required field
  MissingField { field: String },

  /// Field has an unusable value
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Run `docstamp init <name>` to create a configuration file.".to_string())
      }
      ConfigError::InvalidField { field, .. } => {
        Some(format!("Fix the '{}' entry in docstamp.toml and retry.", field))
      }
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { search_root } => {
        write!(
          f,
          "No docstamp configuration found.\nSearched from: {}",
          search_root.display()
        )
      }
      ConfigError::MissingField { field } => {
        write!(f, "Missing required field in config: {}", field)
      }
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid config field '{}': {}", field, reason)
      }
    }
  }
}

/// External tool errors
#[derive(Debug)]
pub enum ToolError {
  /// Tool binary not found on PATH
  NotFound { tool: String },

  /// Tool ran and exited non-zero
  Failed { command: String, status: String },

  /// Tool was killed by a signal before exiting
  Interrupted { command: String },
}

impl ToolError {
  fn help_message(&self) -> Option<String> {
    match self {
      ToolError::NotFound { tool } => Some(format!(
        "Install '{}' and make sure it is on PATH. Run `docstamp doctor` to check every configured tool.",
        tool
      )),
      ToolError::Failed { .. } => {
        Some("The tool's own output above usually names the failing input. Fix it and rerun `docstamp build`.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for ToolError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ToolError::NotFound { tool } => {
        write!(f, "Tool not found: {}", tool)
      }
      ToolError::Failed { command, status } => {
        write!(f, "Command failed ({}): {}", status, command)
      }
      ToolError::Interrupted { command } => {
        write!(f, "Command interrupted by signal: {}", command)
      }
    }
  }
}

/// Validation errors
#[derive(Debug)]
pub enum ValidationError {
  /// No version assignment found in the manifest
  VersionNotFound { manifest: PathBuf },

  /// Source scan for the API doc generator matched nothing
  NoSources { dir: PathBuf, pattern: String },

  /// Doctor checks failed
  ChecksFailed { failed: usize },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::VersionNotFound { manifest } => Some(format!(
        "Add a line like version='1.2.3' to {}, or point project.manifest at the right file.",
        manifest.display()
      )),
      ValidationError::NoSources { .. } => {
        Some("Check project.source_root in docstamp.toml; the API step scans it non-recursively.".to_string())
      }
      ValidationError::ChecksFailed { .. } => {
        Some("Fix the issues listed above, then run `docstamp doctor` again.".to_string())
      }
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::VersionNotFound { manifest } => {
        write!(f, "No version='...' line found in {}", manifest.display())
      }
      ValidationError::NoSources { dir, pattern } => {
        write!(f, "No sources matched {} in {}", pattern, dir.display())
      }
      ValidationError::ChecksFailed { failed } => {
        write!(f, "{} check(s) failed", failed)
      }
    }
  }
}

/// Result type alias for docstamp
pub type StampResult<T> = Result<T, StampError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> StampResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> StampResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<StampError>,
{
  fn context(self, ctx: impl Into<String>) -> StampResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> StampResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with colors and help text
pub fn print_error(error: &StampError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}

/// Convert anyhow::Error to StampError (test helpers and adapters)
impl From<anyhow::Error> for StampError {
  fn from(err: anyhow::Error) -> Self {
    StampError::message(err.to_string())
  }
}
