use std::env;

use crate::core::config::StampConfig;
use crate::core::error::{StampError, StampResult};

/// Run the init command to set up docstamp configuration
pub fn run_init(name: String, force: bool) -> StampResult<()> {
  let project_dir = env::current_dir()?;

  println!("📦 Initializing docstamp in: {}", project_dir.display());

  if StampConfig::exists(&project_dir) && !force {
    return Err(StampError::with_help(
      format!(
        "Configuration already exists in {}",
        project_dir.display()
      ),
      "Pass --force to overwrite it.",
    ));
  }

  let name = name.trim().to_string();
  if name.is_empty() {
    return Err(StampError::message("Project name must not be empty"));
  }

  println!("\n🔧 Scaffolding configuration for '{}'...", name);
  let config = StampConfig::scaffold(&name);

  for rule in &config.stamps {
    println!("  ✅ stamp {} in {}", rule.key, rule.file.display());
  }
  for rule in &config.patches {
    println!("  ✅ patch '{}' in {}", rule.find, rule.file.display());
  }

  println!("\n💾 Saving configuration...");
  config.save(&project_dir)?;

  println!("\n✅ Successfully initialized docstamp!");
  println!("   Configuration saved to: {}/docstamp.toml", project_dir.display());
  println!("\n🚀 Next steps:");
  println!("   1. Edit docstamp.toml if your layout differs from the defaults");
  println!("      (manifest: setup.py, sources: src/{}, docs: doc-src -> doc)", name);
  println!("   2. Run: docstamp doctor");
  println!("   3. Run: docstamp build --dry-run");

  Ok(())
}
