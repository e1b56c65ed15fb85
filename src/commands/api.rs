use std::env;

use crate::core::apidoc::{api_command, scan_sources};
use crate::core::config::StampConfig;
use crate::core::error::StampResult;

/// Run the api command: generate API reference docs from library sources
pub fn run_api(dry_run: bool) -> StampResult<()> {
  let current_dir = env::current_dir()?;
  let (root, config) = StampConfig::discover(&current_dir)?;

  let sources = scan_sources(&root, &config.project.source_dir())?;
  let command = api_command(&config, &root)?;

  if dry_run {
    println!("DRY RUN: Would execute:");
    println!("  {}", command.display());
    return Ok(());
  }

  println!(
    "📖 Generating API docs for {} ({} source files)...",
    config.project.name,
    sources.len()
  );
  println!("   Running: {}", command.display());

  command.run_streamed()?;

  println!("\n✅ API docs generated at {}", config.api_output_dir().display());

  Ok(())
}
