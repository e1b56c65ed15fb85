//! External tool invocation
//!
//! Every pipeline step that shells out (index generator, site builder,
//! API doc generator) goes through [`ToolCommand`] so spawn failures,
//! exit statuses, and display strings are handled one way. Long-running
//! tools inherit stdio and stream their own output; probes capture it.

use crate::core::error::{StampError, StampResult, ToolError};
use crate::utils::shell_join;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// A fully-assembled external command, ready to run or display
#[derive(Debug, Clone)]
pub struct ToolCommand {
  program: String,
  args: Vec<String>,
  cwd: PathBuf,
}

impl ToolCommand {
  /// Build from a configured argv (program first, then its arguments)
  ///
  /// Empty argvs are rejected here as a last line of defense; config
  /// validation normally catches them earlier with a better message.
  pub fn from_argv<S: AsRef<str>>(argv: &[S], cwd: &Path) -> StampResult<Self> {
    let mut parts = argv.iter().map(|s| s.as_ref().to_string());
    let program = parts
      .next()
      .ok_or_else(|| StampError::message("Empty command: nothing to execute"))?;

    Ok(Self {
      program,
      args: parts.collect(),
      cwd: cwd.to_path_buf(),
    })
  }

  /// Append one argument
  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  /// Render the full command line for status output and dry runs
  pub fn display(&self) -> String {
    let mut argv = Vec::with_capacity(1 + self.args.len());
    argv.push(self.program.clone());
    argv.extend(self.args.iter().cloned());
    shell_join(&argv)
  }

  /// Run with inherited stdio and fail on non-zero exit
  ///
  /// This is the path for the doc builders themselves: their output
  /// streams straight to the user, and any failure aborts the pipeline.
  pub fn run_streamed(&self) -> StampResult<()> {
    let status = Command::new(&self.program)
      .args(&self.args)
      .current_dir(&self.cwd)
      .status()
      .map_err(|e| self.spawn_error(e))?;

    if status.success() {
      return Ok(());
    }

    match status.code() {
      Some(code) => Err(StampError::Tool(ToolError::Failed {
        command: self.display(),
        status: format!("exit code {}", code),
      })),
      None => Err(StampError::Tool(ToolError::Interrupted {
        command: self.display(),
      })),
    }
  }

  /// Run with captured output, for probes that inspect what a tool prints
  pub fn probe(&self) -> StampResult<Output> {
    Command::new(&self.program)
      .args(&self.args)
      .current_dir(&self.cwd)
      .output()
      .map_err(|e| self.spawn_error(e))
  }

  fn spawn_error(&self, err: io::Error) -> StampError {
    if err.kind() == io::ErrorKind::NotFound {
      StampError::Tool(ToolError::NotFound {
        tool: self.program.clone(),
      })
    } else {
      StampError::message(format!("Failed to execute {}: {}", self.program, err))
    }
  }
}

/// Check whether a tool responds to `--version`
///
/// Returns the first output line on success. Used by doctor; the build
/// pipeline itself never probes, it just runs and reports failures.
pub fn probe_version(program: &str, cwd: &Path) -> Option<String> {
  let output = ToolCommand::from_argv(&[program, "--version"], cwd).ok()?.probe().ok()?;

  if !output.status.success() {
    return None;
  }

  let text = if output.stdout.is_empty() {
    String::from_utf8_lossy(&output.stderr).to_string()
  } else {
    String::from_utf8_lossy(&output.stdout).to_string()
  };

  text.lines().next().map(|line| line.trim().to_string())
}
