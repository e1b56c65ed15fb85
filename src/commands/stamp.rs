use std::env;

use crate::core::config::StampConfig;
use crate::core::error::StampResult;
use crate::core::stamp::{StampApplication, StampOutcome, apply_stamps};
use crate::core::version::extract_versions;
use crate::ui::diff::render_diff;

/// Run the stamp command: rewrite version stamps in tracked files
pub fn run_stamp(dry_run: bool, json: bool) -> StampResult<()> {
  let current_dir = env::current_dir()?;
  let (root, config) = StampConfig::discover(&current_dir)?;

  let versions = extract_versions(&root.join(&config.project.manifest))?;
  let rules = config.effective_stamps();
  let reports = apply_stamps(&root, &rules, &versions, dry_run)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&reports)?);
    return Ok(());
  }

  println!(
    "✏️  Stamping {} {} (docs version {})\n",
    config.project.name, versions.release, versions.version
  );

  for report in &reports {
    print_stamp_line(report);
  }

  if dry_run {
    print_diffs(&reports);
    println!("\n🔍 Dry-run mode (no changes applied)");
    return Ok(());
  }

  let updated = reports.iter().filter(|r| r.outcome == StampOutcome::Updated).count();
  let warnings = reports.iter().filter(|r| r.outcome.is_warning()).count();

  println!("\n✅ Updated {} of {} stamp target(s)", updated, reports.len());
  if warnings > 0 {
    println!("⚠️  {} target(s) had nothing to stamp (see above)", warnings);
  }

  Ok(())
}

fn print_stamp_line(report: &StampApplication) {
  match report.outcome {
    StampOutcome::Updated => {
      println!("  ✏️  {}: {} = '{}'", report.file.display(), report.key, report.value);
    }
    StampOutcome::Unchanged => {
      println!("  ✅ {}: {} {}", report.file.display(), report.key, report.outcome.describe());
    }
    StampOutcome::KeyMissing | StampOutcome::FileMissing => {
      println!(
        "  ⚠️  {}: {} ({})",
        report.file.display(),
        report.outcome.describe(),
        report.key
      );
    }
  }
}

fn print_diffs(reports: &[StampApplication]) {
  for report in reports {
    if let (Some(before), Some(after)) = (&report.before, &report.after) {
      println!();
      print!("{}", render_diff(&report.file, before, after));
    }
  }
}
