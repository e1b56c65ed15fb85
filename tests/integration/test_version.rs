//! Tests for the `version` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_version_reports_release_and_docs_version() -> Result<()> {
  let project = TestProject::new("lepl")?;

  let output = run_docstamp(&project.path, &["version"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("lepl 5.1.3"), "stdout was: {}", stdout);
  assert!(stdout.contains("Docs version: 5.1"));
  assert!(stdout.contains("setup.py"));

  Ok(())
}

#[test]
fn test_version_json_output() -> Result<()> {
  let project = TestProject::new("lepl")?;

  let output = run_docstamp(&project.path, &["version", "--json"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  let json: serde_json::Value = serde_json::from_str(&stdout)?;
  assert_eq!(json["project"], "lepl");
  assert_eq!(json["release"], "5.1.3");
  assert_eq!(json["version"], "5.1");
  assert_eq!(json["is_semver"], true);
  assert!(json["last_build"].is_null());

  Ok(())
}

#[test]
fn test_version_works_from_subdirectory() -> Result<()> {
  let project = TestProject::new("lepl")?;

  let output = run_docstamp(&project.path.join("doc-src"), &["version"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("5.1.3"));

  Ok(())
}

#[test]
fn test_version_warns_on_non_semver_release() -> Result<()> {
  let project = TestProject::new("lepl")?;
  project.write_file("setup.py", "setup(version='4.0b2')\n")?;

  let output = run_docstamp(&project.path, &["version"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("4.0b2"));
  assert!(stdout.contains("does not parse as semver"));

  Ok(())
}

#[test]
fn test_version_missing_line_is_validation_error() -> Result<()> {
  let project = TestProject::new("lepl")?;
  project.write_file("setup.py", "setup(name='lepl')\n")?;

  let output = run_docstamp_unchecked(&project.path, &["version"])?;
  assert_eq!(output.status.code(), Some(3));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("No version="), "stderr was: {}", stderr);

  Ok(())
}

#[test]
fn test_version_without_config_is_user_error() -> Result<()> {
  let temp = tempfile::TempDir::new()?;

  let output = run_docstamp_unchecked(temp.path(), &["version"])?;
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("docstamp init"), "stderr was: {}", stderr);

  Ok(())
}
