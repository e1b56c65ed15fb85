use std::env;

use crate::core::config::StampConfig;
use crate::core::error::StampResult;
use crate::core::patch::{PatchApplication, PatchOutcome, apply_patches};
use crate::ui::diff::render_diff;

/// Run the patch command: apply post-build fixups to generated pages
pub fn run_patch(dry_run: bool) -> StampResult<()> {
  let current_dir = env::current_dir()?;
  let (root, config) = StampConfig::discover(&current_dir)?;

  let rules = config.effective_patches();
  let reports = apply_patches(&root, &rules, dry_run)?;

  println!("🩹 Patching generated pages for {}\n", config.project.name);

  for report in &reports {
    print_patch_line(report);
  }

  if dry_run {
    for report in &reports {
      if let (Some(before), Some(after)) = (&report.before, &report.after) {
        println!();
        print!("{}", render_diff(&report.file, before, after));
      }
    }
    println!("\n🔍 Dry-run mode (no changes applied)");
    return Ok(());
  }

  let patched = reports.iter().filter(|r| r.outcome == PatchOutcome::Patched).count();
  let warnings = reports.iter().filter(|r| r.outcome.is_warning()).count();

  println!("\n✅ Applied {} of {} patch(es)", patched, reports.len());
  if warnings > 0 {
    println!("⚠️  {} patch(es) had nothing to act on; was the site built?", warnings);
  }

  Ok(())
}

fn print_patch_line(report: &PatchApplication) {
  let icon = match report.outcome {
    PatchOutcome::Patched => "🩹",
    PatchOutcome::AlreadyApplied => "✅",
    PatchOutcome::TextMissing | PatchOutcome::FileMissing => "⚠️ ",
  };
  println!("  {} {}: {}", icon, report.file.display(), report.outcome.describe());
}
