//! Utility functions for path display and command rendering

use std::path::Path;

/// Render a path relative to a root directory when possible
///
/// Status lines read better as `doc-src/conf.py` than as the absolute
/// path the pipeline works with internally. Falls back to the path as
/// given when it does not live under the root.
pub fn display_path(root: &Path, path: &Path) -> String {
  match path.strip_prefix(root) {
    Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
    Ok(rel) => rel.display().to_string(),
    Err(_) => path.display().to_string(),
  }
}

/// Join an argv into a single display string
///
/// Arguments containing whitespace or quotes are single-quoted so the
/// printed command can be copied back into a shell. This is for display
/// only; execution always passes the argv unmodified.
pub fn shell_join<S: AsRef<str>>(argv: &[S]) -> String {
  argv
    .iter()
    .map(|arg| {
      let arg = arg.as_ref();
      if arg.is_empty() {
        "''".to_string()
      } else if arg.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
        format!("'{}'", arg.replace('\'', "'\\''"))
      } else {
        arg.to_string()
      }
    })
    .collect::<Vec<_>>()
    .join(" ")
}
