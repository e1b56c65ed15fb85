//! Assignment-line stamping
//!
//! Rewrites `key = '...'` lines in place with the release or docs
//! version. The match is strict: literal single spaces around `=` and
//! single quotes, the exact shape the doc config and `__init__.py`
//! carry. The quoted span is matched greedily to the last quote on the
//! line; the pattern never crosses newlines.
//!
//! Missing files and missing lines are reported outcomes, not errors,
//! and never cause a file or line to be created.

use crate::core::config::{StampRule, StampValue};
use crate::core::error::{ResultExt, StampResult};
use crate::core::version::Versions;
use regex::{NoExpand, Regex};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// What applying one stamp rule did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StampOutcome {
  /// File rewritten with the new value
  Updated,
  /// Matching line already carried the value
  Unchanged,
  /// File exists but holds no matching assignment line
  KeyMissing,
  /// Target file absent
  FileMissing,
}

impl StampOutcome {
  /// Warning-grade outcomes: the rule had nothing to act on
  pub fn is_warning(&self) -> bool {
    matches!(self, StampOutcome::KeyMissing | StampOutcome::FileMissing)
  }

  /// Short human label for status lines
  pub fn describe(&self) -> &'static str {
    match self {
      StampOutcome::Updated => "updated",
      StampOutcome::Unchanged => "already current",
      StampOutcome::KeyMissing => "no matching line",
      StampOutcome::FileMissing => "file not found",
    }
  }
}

/// Report for one applied stamp rule
#[derive(Debug, Clone, Serialize)]
pub struct StampApplication {
  /// Target file as configured (relative to the project root)
  pub file: PathBuf,
  /// Assignment key the rule matched
  pub key: String,
  /// Concrete value written (release or docs version)
  pub value: String,
  pub outcome: StampOutcome,
  /// File content before and after, kept for dry-run diffs
  #[serde(skip)]
  pub before: Option<String>,
  #[serde(skip)]
  pub after: Option<String>,
}

fn stamp_pattern(key: &str) -> String {
  format!("{} = '.*'", regex::escape(key))
}

/// Whether a string holds any `key = '...'` line, as used by doctor
pub fn has_stamp_line(content: &str, key: &str) -> StampResult<bool> {
  let re = Regex::new(&stamp_pattern(key))?;
  Ok(re.is_match(content))
}

/// Rewrite every `key = '...'` line in a string
///
/// Returns `None` when no line matches; otherwise the full rewritten
/// content, which may equal the input when the value is already current.
pub fn stamp_content(content: &str, key: &str, value: &str) -> StampResult<Option<String>> {
  let re = Regex::new(&stamp_pattern(key))?;

  if !re.is_match(content) {
    return Ok(None);
  }

  let replacement = format!("{} = '{}'", key, value);
  Ok(Some(re.replace_all(content, NoExpand(&replacement)).into_owned()))
}

/// Apply one stamp rule to the project tree
///
/// With `dry_run` the outcome and contents are computed but nothing is
/// written.
pub fn apply_stamp(
  root: &Path,
  rule: &StampRule,
  versions: &Versions,
  dry_run: bool,
) -> StampResult<StampApplication> {
  let value = rule.value.resolve(versions).to_string();
  let path = root.join(&rule.file);

  let report = |outcome, before, after| StampApplication {
    file: rule.file.clone(),
    key: rule.key.clone(),
    value: value.clone(),
    outcome,
    before,
    after,
  };

  if !path.exists() {
    return Ok(report(StampOutcome::FileMissing, None, None));
  }

  let content =
    fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;

  let Some(stamped) = stamp_content(&content, &rule.key, &value)? else {
    return Ok(report(StampOutcome::KeyMissing, None, None));
  };

  if stamped == content {
    return Ok(report(StampOutcome::Unchanged, None, None));
  }

  if !dry_run {
    fs::write(&path, &stamped).with_context(|| format!("Failed to write {}", path.display()))?;
  }

  Ok(report(StampOutcome::Updated, Some(content), Some(stamped)))
}

/// Apply a rule list in order, collecting per-rule reports
pub fn apply_stamps(
  root: &Path,
  rules: &[StampRule],
  versions: &Versions,
  dry_run: bool,
) -> StampResult<Vec<StampApplication>> {
  let mut reports = Vec::with_capacity(rules.len());
  for rule in rules {
    reports.push(apply_stamp(root, rule, versions, dry_run)?);
  }
  Ok(reports)
}
