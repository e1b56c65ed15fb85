//! Build plans for reviewable, reproducible pipeline runs
//!
//! Every `build` produces a plan before touching anything, enabling:
//!
//! - **Dry-run mode**: show what will happen without doing it
//! - **Reproducibility**: same config and versions, same plan, same ID
//! - **Auditability**: plans are JSON-serializable for logging and CI
//! - **Receipts**: the executed plan's ID lands in `[last_build]`

use crate::core::error::StampResult;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Plan identifier (SHA256 hash of plan contents)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanId(String);

impl PlanId {
  /// Create a plan ID from plan contents
  pub fn from_contents(contents: &[u8]) -> Self {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    let result = hasher.finalize();
    Self(format!("{:x}", result))
  }

  /// Get the short ID (first 12 characters)
  pub fn short(&self) -> &str {
    &self.0[..12.min(self.0.len())]
  }
}

impl fmt::Display for PlanId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.short())
  }
}

/// One pipeline step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
  /// Rewrite an assignment line in a target file
  Stamp { file: String, key: String, value: String },

  /// Delete the generated output tree
  RemoveTree { path: String },

  /// Run the index build step
  BuildIndex { command: String },

  /// Run the site builder
  BuildSite { command: String },

  /// Replace a literal in a generated page
  Patch { file: String, find: String, replace: String },

  /// Run the API doc generator
  ApiDocs { command: String, files: usize },
}

/// Plan metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanMetadata {
  /// Plan ID (content hash)
  pub id: PlanId,

  /// Project the plan targets
  pub project: String,

  /// Release being stamped and built
  pub release: String,

  /// Truncated docs version
  pub version: String,

  /// Whether this plan deletes existing output
  pub is_destructive: bool,
}

/// An ordered sequence of pipeline operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildPlan {
  /// Plan metadata
  pub metadata: PlanMetadata,

  /// Operations to perform (in order)
  pub operations: Vec<Operation>,
}

impl BuildPlan {
  /// Create an empty plan for a project and version pair
  pub fn new(project: impl Into<String>, release: impl Into<String>, version: impl Into<String>) -> Self {
    Self {
      metadata: PlanMetadata {
        id: PlanId::from_contents(&[]),
        project: project.into(),
        release: release.into(),
        version: version.into(),
        is_destructive: false,
      },
      operations: Vec::new(),
    }
  }

  /// Add an operation to the plan
  pub fn add_operation(&mut self, operation: Operation) {
    if matches!(operation, Operation::RemoveTree { .. }) {
      self.metadata.is_destructive = true;
    }
    self.operations.push(operation);
    self.recompute_id();
  }

  /// Recompute plan ID based on current contents
  fn recompute_id(&mut self) {
    let json = serde_json::to_vec(&self.operations).unwrap_or_default();
    self.metadata.id = PlanId::from_contents(&json);
  }

  /// Serialize to JSON
  pub fn to_json(&self) -> StampResult<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  /// Deserialize from JSON
  pub fn from_json(json: &str) -> StampResult<Self> {
    Ok(serde_json::from_str(json)?)
  }

  /// Get human-readable representation
  pub fn to_human_readable(&self) -> String {
    let mut output = String::new();

    output.push_str(&format!(
      "📋 Plan: build {} {} ({})\n",
      self.metadata.project, self.metadata.release, self.metadata.id
    ));
    output.push_str(&format!("   Docs version: {}\n", self.metadata.version));

    output.push_str(&format!("\n   Operations ({}):\n", self.operations.len()));

    for (i, op) in self.operations.iter().enumerate() {
      output.push_str(&format!("   {}. {}\n", i + 1, operation_to_string(op)));
    }

    if self.metadata.is_destructive {
      output.push_str("\n⚠️  NOTE: The existing output tree is deleted before rebuilding\n");
    }

    output
  }

  /// Get number of operations
  pub fn len(&self) -> usize {
    self.operations.len()
  }

  /// Check if plan is empty
  pub fn is_empty(&self) -> bool {
    self.operations.is_empty()
  }
}

/// Convert operation to human-readable string
fn operation_to_string(op: &Operation) -> String {
  match op {
    Operation::Stamp { file, key, value } => format!("Stamp {} = '{}' in {}", key, value, file),
    Operation::RemoveTree { path } => format!("Remove output tree {}", path),
    Operation::BuildIndex { command } => format!("Build index: {}", command),
    Operation::BuildSite { command } => format!("Build site: {}", command),
    Operation::Patch { file, find, replace } => {
      format!("Patch {}: '{}' → '{}'", file, find, replace)
    }
    Operation::ApiDocs { files, .. } => format!("Generate API docs over {} source files", files),
  }
}
