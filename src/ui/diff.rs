//! Unified diff rendering for dry runs
//!
//! Dry-run stamping and patching show exactly what would be written
//! without touching the tree.

use similar::TextDiff;
use std::path::Path;

/// Render a unified diff for one would-be file change
pub fn render_diff(file: &Path, before: &str, after: &str) -> String {
  let name = file.display().to_string();
  TextDiff::from_lines(before, after)
    .unified_diff()
    .context_radius(2)
    .header(&format!("a/{}", name), &format!("b/{}", name))
    .to_string()
}
