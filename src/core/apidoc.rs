//! API doc generator invocation
//!
//! One external call with fixed flags over the files directly under the
//! library source root. The scan is deliberately non-recursive; the
//! generator follows the package structure itself, and the exclusion
//! list keeps internal subpackages out of the published docs.

use crate::core::config::StampConfig;
use crate::core::error::{StampError, StampResult, ValidationError};
use crate::core::tools::ToolCommand;
use std::path::{Path, PathBuf};

/// Glob applied directly under the source root
const SOURCE_PATTERN: &str = "*.py";

/// Collect the source files the generator is pointed at
///
/// Matches `<source_root>/*.py`, returns project-root-relative paths in
/// lexical order. An empty result is a misconfiguration: handing the
/// generator nothing never produces useful docs.
pub fn scan_sources(root: &Path, source_root: &Path) -> StampResult<Vec<PathBuf>> {
  let dir = root.join(source_root);
  let pattern = dir.join(SOURCE_PATTERN);

  let mut files = Vec::new();
  for entry in glob::glob(&pattern.to_string_lossy())? {
    let path = entry?;
    files.push(path.strip_prefix(root)?.to_path_buf());
  }
  files.sort();

  if files.is_empty() {
    return Err(StampError::Validation(ValidationError::NoSources {
      dir,
      pattern: SOURCE_PATTERN.to_string(),
    }));
  }

  Ok(files)
}

/// Assemble the full generator invocation
///
/// Flag order is fixed: verbosity, format, output, graph, docformat,
/// exclusions, debug, then the sorted source files.
pub fn api_command(config: &StampConfig, root: &Path) -> StampResult<ToolCommand> {
  let sources = scan_sources(root, &config.project.source_dir())?;

  let mut cmd = ToolCommand::from_argv(&config.api.command, root)?;

  if config.api.verbose {
    cmd = cmd.arg("-v");
  }

  cmd = cmd
    .arg("--html")
    .arg("--output")
    .arg(config.api_output_dir().display().to_string())
    .arg("--graph")
    .arg(config.api.graph.as_str())
    .arg("--docformat")
    .arg(config.api.docformat.as_str());

  for exclusion in config.api.excludes(&config.project.name) {
    cmd = cmd.arg("--exclude").arg(exclusion);
  }

  if config.api.debug {
    cmd = cmd.arg("--debug");
  }

  for file in &sources {
    cmd = cmd.arg(file.display().to_string());
  }

  Ok(cmd)
}
