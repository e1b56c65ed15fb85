//! Project structure and configuration checks

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::apidoc;
use crate::core::config::StampConfig;
use crate::core::error::StampResult;
use crate::core::stamp::has_stamp_line;
use crate::core::version::extract_versions;
use crate::utils::display_path;
use serde_json::json;
use std::fs;

/// Load the config for a dependent check, or report it as skipped
///
/// Only the config check itself reports load failures as errors; the
/// others degrade to a warning so one broken file does not produce a
/// wall of identical diagnoses.
fn load_config(name: &str, ctx: &CheckContext) -> Result<StampConfig, CheckResult> {
  StampConfig::load(&ctx.project_root).map_err(|_| {
    CheckResult::warning(
      name,
      "Skipped: configuration not loadable",
      Some("Fix the config check first"),
    )
  })
}

/// Check that validates docstamp.toml presence and contents
pub struct ConfigCheck;

impl Check for ConfigCheck {
  fn name(&self) -> &str {
    "config"
  }

  fn description(&self) -> &str {
    "Validates docstamp.toml presence and contents"
  }

  fn run(&self, ctx: &CheckContext) -> StampResult<CheckResult> {
    if !StampConfig::exists(&ctx.project_root) {
      return Ok(CheckResult::error(
        self.name(),
        "No docstamp.toml found",
        Some("Run `docstamp init <name>` to create a configuration"),
      ));
    }

    match StampConfig::load(&ctx.project_root) {
      Ok(config) => Ok(CheckResult::pass(
        self.name(),
        format!(
          "Configuration valid (project '{}', {} stamps, {} patches)",
          config.project.name,
          config.effective_stamps().len(),
          config.effective_patches().len()
        ),
      )),
      Err(err) => Ok(CheckResult::error(
        self.name(),
        format!("Failed to load docstamp.toml: {}", err),
        Some("Check the syntax of your docstamp.toml file"),
      )),
    }
  }
}

/// Check that the packaging manifest declares an extractable release
pub struct ManifestVersionCheck;

impl Check for ManifestVersionCheck {
  fn name(&self) -> &str {
    "manifest-version"
  }

  fn description(&self) -> &str {
    "Extracts the declared release from the packaging manifest"
  }

  fn run(&self, ctx: &CheckContext) -> StampResult<CheckResult> {
    let config = match load_config(self.name(), ctx) {
      Ok(config) => config,
      Err(skipped) => return Ok(skipped),
    };

    let manifest = ctx.project_root.join(&config.project.manifest);
    if !manifest.exists() {
      return Ok(CheckResult::error(
        self.name(),
        format!("Manifest not found: {}", config.project.manifest.display()),
        Some("Point project.manifest at your packaging manifest"),
      ));
    }

    match extract_versions(&manifest) {
      Ok(versions) => Ok(
        CheckResult::pass(
          self.name(),
          format!("Release {} (docs version {})", versions.release, versions.version),
        )
        .with_details(json!({
          "release": versions.release,
          "version": versions.version,
        })),
      ),
      Err(_) => Ok(CheckResult::error(
        self.name(),
        format!("No version='...' line in {}", config.project.manifest.display()),
        Some("Add a line like version='1.2.3' to the manifest"),
      )),
    }
  }
}

/// Check that the docs source tree is in place
pub struct DocsSourceCheck;

impl Check for DocsSourceCheck {
  fn name(&self) -> &str {
    "docs-source"
  }

  fn description(&self) -> &str {
    "Confirms the docs source tree and doc config exist"
  }

  fn run(&self, ctx: &CheckContext) -> StampResult<CheckResult> {
    let config = match load_config(self.name(), ctx) {
      Ok(config) => config,
      Err(skipped) => return Ok(skipped),
    };

    let source = ctx.project_root.join(&config.docs.source);
    if !source.is_dir() {
      return Ok(CheckResult::error(
        self.name(),
        format!("Docs source directory not found: {}", config.docs.source.display()),
        Some("Create it or point docs.source at your documentation sources"),
      ));
    }

    let doc_config = ctx.project_root.join(config.docs.config_path());
    if !doc_config.exists() {
      return Ok(CheckResult::warning(
        self.name(),
        format!("Doc config not found: {}", config.docs.config_path().display()),
        Some("Stamping will report it as file-missing until it exists"),
      ));
    }

    Ok(CheckResult::pass(
      self.name(),
      format!("Docs source present ({})", config.docs.source.display()),
    ))
  }
}

/// Check that each stamp target file holds its assignment line
pub struct StampTargetsCheck;

impl Check for StampTargetsCheck {
  fn name(&self) -> &str {
    "stamp-targets"
  }

  fn description(&self) -> &str {
    "Confirms every stamp target holds its assignment line"
  }

  fn run(&self, ctx: &CheckContext) -> StampResult<CheckResult> {
    let config = match load_config(self.name(), ctx) {
      Ok(config) => config,
      Err(skipped) => return Ok(skipped),
    };

    let rules = config.effective_stamps();
    let mut issues = Vec::new();

    for rule in &rules {
      let path = ctx.project_root.join(&rule.file);
      if !path.exists() {
        issues.push(format!("{} (file missing)", display_path(&ctx.project_root, &path)));
        continue;
      }

      let content = fs::read_to_string(&path)?;
      if !has_stamp_line(&content, &rule.key)? {
        issues.push(format!(
          "{} (no {} = '...' line)",
          display_path(&ctx.project_root, &path),
          rule.key
        ));
      }
    }

    if issues.is_empty() {
      Ok(CheckResult::pass(
        self.name(),
        format!("All {} stamp targets ready", rules.len()),
      ))
    } else {
      Ok(CheckResult::warning(
        self.name(),
        format!(
          "{} of {} stamp targets need attention: {}",
          issues.len(),
          rules.len(),
          issues.join(", ")
        ),
        Some("Stamping reports these as no-ops; fix the paths or keys in docstamp.toml"),
      ))
    }
  }
}

/// Check that the API generator scan would find source files
pub struct ApiSourcesCheck;

impl Check for ApiSourcesCheck {
  fn name(&self) -> &str {
    "api-sources"
  }

  fn description(&self) -> &str {
    "Confirms the API doc scan finds source files"
  }

  fn run(&self, ctx: &CheckContext) -> StampResult<CheckResult> {
    let config = match load_config(self.name(), ctx) {
      Ok(config) => config,
      Err(skipped) => return Ok(skipped),
    };

    let source_root = config.project.source_dir();
    if !ctx.project_root.join(&source_root).is_dir() {
      return Ok(CheckResult::error(
        self.name(),
        format!("Source root not found: {}", source_root.display()),
        Some("Set project.source_root or create the directory"),
      ));
    }

    match apidoc::scan_sources(&ctx.project_root, &source_root) {
      Ok(files) => Ok(CheckResult::pass(
        self.name(),
        format!("{} source files under {}", files.len(), source_root.display()),
      )),
      Err(_) => Ok(CheckResult::error(
        self.name(),
        format!("No *.py files directly under {}", source_root.display()),
        Some("The API step scans non-recursively; check project.source_root"),
      )),
    }
  }
}
