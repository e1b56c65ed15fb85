//! Release extraction and docs-version truncation
//!
//! The packaging manifest is the single source of truth for the release
//! string. It is read once per run, and every stamped value derives from
//! it: either the release itself or its truncated major.minor form.

use crate::core::error::{ResultExt, StampError, StampResult, ValidationError};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// The two values the pipeline stamps into files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versions {
  /// Full release string as declared in the manifest, e.g. `5.1.3`
  pub release: String,
  /// Truncated docs version, e.g. `5.1`
  pub version: String,
}

impl Versions {
  /// Derive both values from a release string
  pub fn from_release(release: impl Into<String>) -> Self {
    let release = release.into();
    let version = truncate_release(&release);
    Self { release, version }
  }

  /// True when the release parses as semver, used for advisory warnings
  pub fn release_is_semver(&self) -> bool {
    semver::Version::parse(&self.release).is_ok()
  }
}

/// Extract the declared release from a packaging manifest
///
/// Scans for the first line containing `version='...'` (single quotes,
/// optional whitespace around `=`) and takes the quoted token verbatim.
/// A manifest without such a line is an error: stamping an absent
/// release would silently corrupt every target file.
pub fn extract_versions(manifest: &Path) -> StampResult<Versions> {
  let content = fs::read_to_string(manifest)
    .with_context(|| format!("Failed to read manifest {}", manifest.display()))?;

  match extract_release(&content) {
    Some(release) => Ok(Versions::from_release(release)),
    None => Err(StampError::Validation(ValidationError::VersionNotFound {
      manifest: manifest.to_path_buf(),
    })),
  }
}

/// Find the first `version='...'` assignment in manifest text
pub fn extract_release(content: &str) -> Option<String> {
  static RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"version\s*=\s*'([^']*)'").expect("Invalid version regex"));

  for line in content.lines() {
    if let Some(caps) = RE.captures(line) {
      return Some(caps[1].to_string());
    }
  }
  None
}

/// Truncate a release string to its docs version
///
/// Everything from the first `digit.digit` pair onward is replaced by
/// just that pair; any prefix before it survives. Strings without such
/// a pair pass through unchanged:
///
/// - `5.1.3` becomes `5.1`
/// - `10.2` stays `10.2` (the pair is `0.2`, the leading `1` survives)
/// - `v2.3.4rc1` becomes `v2.3`
/// - `dev` stays `dev`
pub fn truncate_release(release: &str) -> String {
  static RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]\.[0-9]).*").expect("Invalid truncation regex"));

  RE.replace(release, "$1").into_owned()
}
