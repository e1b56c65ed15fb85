//! Health check command for diagnosing issues
//!
//! The doctor command runs all health checks and reports any issues found.

use std::env;

use crate::checks::{CheckContext, Severity, create_default_runner};
use crate::core::config::StampConfig;
use crate::core::error::{StampError, StampResult, ValidationError};

/// Run the doctor command to diagnose issues
///
/// Returns an error when any error-grade check fails, so the process
/// exits with the validation code.
pub fn run_doctor(thorough: bool, json: bool) -> StampResult<()> {
  let current_dir = env::current_dir()?;

  // Checks report a missing config themselves, so fall back to the
  // working directory when there is no project root to find.
  let project_root = StampConfig::find_project_root(&current_dir).unwrap_or(current_dir);

  let ctx = CheckContext { project_root, thorough };

  let runner = create_default_runner();
  let results = runner.run_all(&ctx)?;

  let errors = results
    .iter()
    .filter(|r| !r.passed && r.severity == Severity::Error)
    .count();
  let warnings = results
    .iter()
    .filter(|r| !r.passed && r.severity == Severity::Warning)
    .count();

  if json {
    println!("{}", serde_json::to_string_pretty(&results)?);
  } else {
    println!("🏥 Running health checks...\n");

    // Show what checks are registered
    println!("📋 Registered checks:");
    for check in runner.checks() {
      println!("   • {}: {}", check.name(), check.description());
    }
    println!();

    for result in &results {
      let icon = if result.passed { "✅" } else { "❌" };
      println!("{} {}: {}", icon, result.check_name, result.message);

      if !result.passed
        && let Some(ref suggestion) = result.suggestion
      {
        println!("   💡 Fix: {}", suggestion);
      }
      println!();
    }

    // Summary
    let passed_count = results.iter().filter(|r| r.passed).count();
    let total_count = results.len();

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Summary: {}/{} checks passed", passed_count, total_count);

    if errors == 0 {
      if warnings > 0 {
        println!("\n⚠️  Some warnings found. Consider addressing them.");
      } else {
        println!("\n✨ All checks passed! Your setup looks healthy.");
      }
    }
  }

  if errors > 0 {
    return Err(StampError::Validation(ValidationError::ChecksFailed { failed: errors }));
  }

  Ok(())
}
