//! Tests for the `doctor` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_doctor_passes_on_healthy_project() -> Result<()> {
  let project = TestProject::new("lepl")?;

  let output = run_docstamp(&project.path, &["doctor"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Registered checks:"), "stdout was: {}", stdout);
  // Tool probes are expensive and only run with --thorough
  assert!(stdout.contains("5/5 checks passed"));
  assert!(stdout.contains("All checks passed"));

  Ok(())
}

#[test]
fn test_doctor_fails_without_config() -> Result<()> {
  let temp = tempfile::TempDir::new()?;

  let output = run_docstamp_unchecked(temp.path(), &["doctor"])?;
  assert_eq!(output.status.code(), Some(3), "failed checks exit with the validation code");

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("config"), "stdout was: {}", stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("check(s) failed"), "stderr was: {}", stderr);

  Ok(())
}

#[test]
fn test_doctor_warns_on_missing_stamp_lines() -> Result<()> {
  let project = TestProject::new("lepl")?;
  project.write_file("doc-src/conf.py", "project = 'lepl'\n")?;

  // Stamping treats missing lines as no-ops, so this is a warning, not a failure
  let output = run_docstamp_unchecked(&project.path, &["doctor"])?;
  assert_eq!(output.status.code(), Some(0), "warnings must not fail the doctor");

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("stamp-targets"), "stdout was: {}", stdout);
  assert!(stdout.contains("release"), "the missing key should be named");
  assert!(stdout.contains("Some warnings found"));

  Ok(())
}

#[test]
fn test_doctor_flags_missing_manifest_version() -> Result<()> {
  let project = TestProject::new("lepl")?;
  project.write_file("setup.py", "setup(name='lepl')\n")?;

  let output = run_docstamp_unchecked(&project.path, &["doctor"])?;
  assert_eq!(output.status.code(), Some(3));

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("manifest-version"), "stdout was: {}", stdout);

  Ok(())
}

#[test]
fn test_doctor_json_output() -> Result<()> {
  let project = TestProject::new("lepl")?;

  let output = run_docstamp(&project.path, &["doctor", "--json"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  let json: serde_json::Value = serde_json::from_str(&stdout)?;
  let results = json.as_array().expect("array of check results");
  assert_eq!(results.len(), 5);
  assert!(results.iter().all(|r| r["passed"] == true));

  Ok(())
}

#[test]
fn test_doctor_works_from_subdirectory() -> Result<()> {
  let project = TestProject::new("lepl")?;

  let output = run_docstamp(&project.path.join("src").join("lepl"), &["doctor"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("All checks passed"), "stdout was: {}", stdout);

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_doctor_thorough_probes_tools() -> Result<()> {
  let project = TestProject::with_fake_tools("lepl")?;

  let output = run_docstamp(&project.path, &["doctor", "--thorough"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("6/6 checks passed"), "stdout was: {}", stdout);
  assert!(stdout.contains("doc-tools"));

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_doctor_thorough_reports_missing_tools() -> Result<()> {
  let project = TestProject::new("lepl")?;
  project.write_config(
    "[project]\nname = \"lepl\"\n\n[docs]\nbuild_command = [\"definitely-not-a-real-tool-9x\"]\n",
  )?;

  let output = run_docstamp_unchecked(&project.path, &["doctor", "--thorough"])?;
  assert_eq!(output.status.code(), Some(3));

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("definitely-not-a-real-tool-9x"), "stdout was: {}", stdout);

  Ok(())
}
