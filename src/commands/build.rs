//! Build command implementation
//!
//! The full pipeline in fixed order:
//!
//! 1. Stamp version strings into tracked files
//! 2. Remove the old output tree
//! 3. Run the index step (when configured)
//! 4. Run the site builder
//! 5. Patch generated pages
//! 6. Generate API docs (unless --skip-api)
//!
//! The plan is assembled and shown before anything runs. The first
//! failing step aborts the run, and the receipt is written only after
//! every step has succeeded.

use chrono::Utc;
use std::env;

use crate::core::apidoc::{api_command, scan_sources};
use crate::core::config::{BuildRecord, StampConfig};
use crate::core::doctree::{clean_output, index_command, site_command};
use crate::core::error::StampResult;
use crate::core::patch::apply_patches;
use crate::core::plan::{BuildPlan, Operation};
use crate::core::stamp::apply_stamps;
use crate::core::version::extract_versions;

/// Run the build command: the whole pipeline, plan first
pub fn run_build(dry_run: bool, skip_api: bool, json: bool) -> StampResult<()> {
  let current_dir = env::current_dir()?;
  let (root, mut config) = StampConfig::discover(&current_dir)?;

  let versions = extract_versions(&root.join(&config.project.manifest))?;

  // Assemble the full plan before touching anything
  let stamps = config.effective_stamps();
  let patches = config.effective_patches();
  let index_cmd = index_command(&config.docs, &root)?;
  let site_cmd = site_command(&config.docs, &root)?;

  let mut plan = BuildPlan::new(
    config.project.name.as_str(),
    versions.release.as_str(),
    versions.version.as_str(),
  );

  for rule in &stamps {
    plan.add_operation(Operation::Stamp {
      file: rule.file.display().to_string(),
      key: rule.key.clone(),
      value: rule.value.resolve(&versions).to_string(),
    });
  }

  plan.add_operation(Operation::RemoveTree {
    path: config.docs.output.display().to_string(),
  });

  if let Some(cmd) = &index_cmd {
    plan.add_operation(Operation::BuildIndex { command: cmd.display() });
  }
  plan.add_operation(Operation::BuildSite {
    command: site_cmd.display(),
  });

  for rule in &patches {
    plan.add_operation(Operation::Patch {
      file: rule.file.display().to_string(),
      find: rule.find.clone(),
      replace: rule.replace.clone(),
    });
  }

  let api_cmd = if skip_api {
    None
  } else {
    let sources = scan_sources(&root, &config.project.source_dir())?;
    let cmd = api_command(&config, &root)?;
    plan.add_operation(Operation::ApiDocs {
      command: cmd.display(),
      files: sources.len(),
    });
    Some(cmd)
  };

  if json {
    println!("{}", plan.to_json()?);
  } else {
    println!("{}", plan.to_human_readable());
  }

  if dry_run {
    if !json {
      println!("🔍 Dry-run mode (no changes applied)");
    }
    return Ok(());
  }

  // 1. Stamp version strings
  println!("✏️  Stamping version strings...");
  let stamp_reports = apply_stamps(&root, &stamps, &versions, false)?;
  for report in &stamp_reports {
    if report.outcome.is_warning() {
      println!("   ⚠️  {}: {}", report.file.display(), report.outcome.describe());
    } else {
      println!(
        "   {}: {} = '{}' ({})",
        report.file.display(),
        report.key,
        report.value,
        report.outcome.describe()
      );
    }
  }

  // 2. Remove the old output tree
  println!("🧹 Removing old output tree...");
  if clean_output(&root, &config.docs)? {
    println!("   Removed {}", config.docs.output.display());
  } else {
    println!("   Nothing to remove");
  }

  // 3. Index step, when configured
  if let Some(cmd) = &index_cmd {
    println!("📇 Building index...");
    println!("   Running: {}", cmd.display());
    cmd.run_streamed()?;
  }

  // 4. Site builder
  println!("📚 Building documentation site...");
  println!("   Running: {}", site_cmd.display());
  site_cmd.run_streamed()?;

  // 5. Patch generated pages
  println!("🩹 Patching generated pages...");
  let patch_reports = apply_patches(&root, &patches, false)?;
  for report in &patch_reports {
    if report.outcome.is_warning() {
      println!("   ⚠️  {}: {}", report.file.display(), report.outcome.describe());
    } else {
      println!("   {}: {}", report.file.display(), report.outcome.describe());
    }
  }

  // 6. API docs
  if let Some(cmd) = &api_cmd {
    println!("📖 Generating API docs...");
    println!("   Running: {}", cmd.display());
    cmd.run_streamed()?;
  }

  // Receipt lands in the config only after a fully successful run
  config.last_build = Some(BuildRecord {
    release: versions.release.clone(),
    built_at: Utc::now(),
    plan: plan.metadata.id.short().to_string(),
  });
  config.save(&root)?;

  println!("\n🧾 Recorded build receipt (plan {})", plan.metadata.id);
  println!("\n✅ Build {} completed!", versions.release);
  println!("   Output: {}", root.join(&config.docs.output).display());

  Ok(())
}
