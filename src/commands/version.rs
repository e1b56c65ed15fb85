use std::env;

use crate::core::config::StampConfig;
use crate::core::error::StampResult;
use crate::core::version::extract_versions;

/// Run the version command: show the release and derived docs version
pub fn run_version(json: bool) -> StampResult<()> {
  let current_dir = env::current_dir()?;
  let (root, config) = StampConfig::discover(&current_dir)?;

  let manifest = root.join(&config.project.manifest);
  let versions = extract_versions(&manifest)?;

  if json {
    let output = serde_json::json!({
      "project": config.project.name,
      "release": versions.release,
      "version": versions.version,
      "manifest": config.project.manifest,
      "is_semver": versions.release_is_semver(),
      "last_build": config.last_build,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    return Ok(());
  }

  println!("📦 {} {}", config.project.name, versions.release);
  println!("   Docs version: {}", versions.version);
  println!("   Manifest: {}", config.project.manifest.display());

  if !versions.release_is_semver() {
    println!("\n⚠️  Release '{}' does not parse as semver", versions.release);
    println!("   Stamping still works; version-aware tooling may not.");
  }

  if let Some(receipt) = &config.last_build {
    println!(
      "\n🧾 Last build: {} (plan {}) at {}",
      receipt.release, receipt.plan, receipt.built_at
    );
    if receipt.release != versions.release {
      println!("   Manifest has moved on; run `docstamp build` to refresh the docs.");
    }
  }

  Ok(())
}
