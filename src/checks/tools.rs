//! External tool availability checks
//!
//! Probing spawns one process per configured tool, so this check is
//! gated behind `doctor --thorough`.

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::config::StampConfig;
use crate::core::error::StampResult;
use crate::core::tools::probe_version;
use serde_json::json;

/// Check that every configured doc tool responds to --version
pub struct DocToolsCheck;

impl Check for DocToolsCheck {
  fn name(&self) -> &str {
    "doc-tools"
  }

  fn description(&self) -> &str {
    "Probes the configured doc tools with --version (thorough mode)"
  }

  fn run(&self, ctx: &CheckContext) -> StampResult<CheckResult> {
    let config = match StampConfig::load(&ctx.project_root) {
      Ok(config) => config,
      Err(_) => {
        return Ok(CheckResult::warning(
          self.name(),
          "Skipped: configuration not loadable",
          Some("Fix the config check first"),
        ));
      }
    };

    let mut programs: Vec<&str> = Vec::new();
    for argv in [&config.docs.index_command, &config.docs.build_command, &config.api.command] {
      if let Some(program) = argv.first()
        && !programs.contains(&program.as_str())
      {
        programs.push(program);
      }
    }

    let mut found = Vec::new();
    let mut missing = Vec::new();

    for program in programs {
      match probe_version(program, &ctx.project_root) {
        Some(banner) => found.push((program.to_string(), banner)),
        None => missing.push(program.to_string()),
      }
    }

    if missing.is_empty() {
      let summary = found
        .iter()
        .map(|(_, banner)| banner.as_str())
        .collect::<Vec<_>>()
        .join(", ");
      Ok(
        CheckResult::pass(self.name(), format!("All doc tools respond: {}", summary)).with_details(json!({
          "tools": found.iter().map(|(name, banner)| json!({"name": name, "version": banner})).collect::<Vec<_>>(),
        })),
      )
    } else {
      Ok(CheckResult::error(
        self.name(),
        format!("Tools not responding to --version: {}", missing.join(", ")),
        Some("Install the missing tools or fix the command entries in docstamp.toml"),
      ))
    }
  }

  fn is_expensive(&self) -> bool {
    true
  }
}
