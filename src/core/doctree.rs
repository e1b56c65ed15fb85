//! Output tree removal and doc builder invocations
//!
//! The output tree is deleted wholesale before every build so no file
//! from a previous generation can survive. The index and site builders
//! are external tools assembled here and run from the project root with
//! the configured relative paths appended, the way a hand-run build
//! would invoke them.

use crate::core::config::DocsConfig;
use crate::core::error::{ResultExt, StampResult};
use crate::core::tools::ToolCommand;
use std::fs;
use std::path::Path;

/// Delete the generated output tree if present
///
/// Returns whether anything was removed; a missing tree is the normal
/// first-build case, not an error. `docs.output` is validated at config
/// load to never point at the project root itself.
pub fn clean_output(root: &Path, docs: &DocsConfig) -> StampResult<bool> {
  let path = root.join(&docs.output);

  if path.is_dir() {
    fs::remove_dir_all(&path).with_context(|| format!("Failed to remove {}", path.display()))?;
    Ok(true)
  } else if path.exists() {
    fs::remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))?;
    Ok(true)
  } else {
    Ok(false)
  }
}

/// Assemble the index build step, when one is configured
///
/// The documentation source directory is appended as the final
/// argument. Returns `None` when `index_command` is empty.
pub fn index_command(docs: &DocsConfig, root: &Path) -> StampResult<Option<ToolCommand>> {
  if !docs.has_index_step() {
    return Ok(None);
  }

  let cmd = ToolCommand::from_argv(&docs.index_command, root)?.arg(docs.source.display().to_string());
  Ok(Some(cmd))
}

/// Assemble the site builder invocation
///
/// The source and output directories are appended in that order.
pub fn site_command(docs: &DocsConfig, root: &Path) -> StampResult<ToolCommand> {
  let cmd = ToolCommand::from_argv(&docs.build_command, root)?
    .arg(docs.source.display().to_string())
    .arg(docs.output.display().to_string());
  Ok(cmd)
}
