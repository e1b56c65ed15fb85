//! Literal patches on generated pages
//!
//! Each rule replaces the first occurrence of a literal string in one
//! file, case-sensitively. After a successful patch the search text is
//! gone, so re-running is a reported no-op rather than a second
//! substitution. Missing files and missing text are reported outcomes,
//! not errors.

use crate::core::config::PatchRule;
use crate::core::error::{ResultExt, StampResult};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// What applying one patch rule did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchOutcome {
  /// First occurrence replaced and the file rewritten
  Patched,
  /// Search text gone but the replacement is present
  AlreadyApplied,
  /// Neither search text nor replacement found
  TextMissing,
  /// Target file absent
  FileMissing,
}

impl PatchOutcome {
  /// Warning-grade outcomes: the rule had nothing to act on
  pub fn is_warning(&self) -> bool {
    matches!(self, PatchOutcome::TextMissing | PatchOutcome::FileMissing)
  }

  /// Short human label for status lines
  pub fn describe(&self) -> &'static str {
    match self {
      PatchOutcome::Patched => "patched",
      PatchOutcome::AlreadyApplied => "already applied",
      PatchOutcome::TextMissing => "text not found",
      PatchOutcome::FileMissing => "file not found",
    }
  }
}

/// Report for one applied patch rule
#[derive(Debug, Clone, Serialize)]
pub struct PatchApplication {
  /// Target file as configured (relative to the project root)
  pub file: PathBuf,
  pub find: String,
  pub replace: String,
  pub outcome: PatchOutcome,
  /// File content before and after, kept for dry-run diffs
  #[serde(skip)]
  pub before: Option<String>,
  #[serde(skip)]
  pub after: Option<String>,
}

/// Apply one patch rule to the project tree
///
/// With `dry_run` the outcome and contents are computed but nothing is
/// written.
pub fn apply_patch(root: &Path, rule: &PatchRule, dry_run: bool) -> StampResult<PatchApplication> {
  let path = root.join(&rule.file);

  let report = |outcome, before, after| PatchApplication {
    file: rule.file.clone(),
    find: rule.find.clone(),
    replace: rule.replace.clone(),
    outcome,
    before,
    after,
  };

  if !path.exists() {
    return Ok(report(PatchOutcome::FileMissing, None, None));
  }

  let content =
    fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;

  if !content.contains(&rule.find) {
    let outcome = if content.contains(&rule.replace) {
      PatchOutcome::AlreadyApplied
    } else {
      PatchOutcome::TextMissing
    };
    return Ok(report(outcome, None, None));
  }

  let patched = content.replacen(&rule.find, &rule.replace, 1);

  if !dry_run {
    fs::write(&path, &patched).with_context(|| format!("Failed to write {}", path.display()))?;
  }

  Ok(report(PatchOutcome::Patched, Some(content), Some(patched)))
}

/// Apply a rule list in order, collecting per-rule reports
pub fn apply_patches(root: &Path, rules: &[PatchRule], dry_run: bool) -> StampResult<Vec<PatchApplication>> {
  let mut reports = Vec::with_capacity(rules.len());
  for rule in rules {
    reports.push(apply_patch(root, rule, dry_run)?);
  }
  Ok(reports)
}
