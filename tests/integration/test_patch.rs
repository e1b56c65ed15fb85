//! Tests for the `patch` command

use crate::helpers::*;
use anyhow::Result;

/// Lay down the pages a site build would have produced
fn fake_built_site(project: &TestProject) -> Result<()> {
  project.write_file(
    "doc/index.html",
    "<a href=\"intro.html\">Intro</a> <a href=\"manual.html\">Manual</a>\n",
  )?;
  project.write_file("doc/intro-1.html", "<h1>A Tutorial for lepl</h1>\n")?;
  Ok(())
}

#[test]
fn test_patch_rewrites_generated_pages() -> Result<()> {
  let project = TestProject::new("lepl")?;
  fake_built_site(&project)?;

  run_docstamp(&project.path, &["patch"])?;

  assert!(project.read_file("doc/index.html")?.contains("intro-1.html"));
  assert!(project.read_file("doc/intro-1.html")?.contains("Tutorial Contents"));

  Ok(())
}

#[test]
fn test_patch_rerun_reports_already_applied() -> Result<()> {
  let project = TestProject::new("lepl")?;
  fake_built_site(&project)?;

  run_docstamp(&project.path, &["patch"])?;
  let after_first = project.read_file("doc/index.html")?;

  let output = run_docstamp(&project.path, &["patch"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("already applied"), "stdout was: {}", stdout);

  assert_eq!(project.read_file("doc/index.html")?, after_first);

  Ok(())
}

#[test]
fn test_patch_without_built_site_warns() -> Result<()> {
  let project = TestProject::new("lepl")?;

  let output = run_docstamp(&project.path, &["patch"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("file not found"), "stdout was: {}", stdout);
  assert!(!project.file_exists("doc/index.html"), "missing targets must not be created");

  Ok(())
}

#[test]
fn test_patch_dry_run_shows_diff_and_writes_nothing() -> Result<()> {
  let project = TestProject::new("lepl")?;
  fake_built_site(&project)?;

  let output = run_docstamp(&project.path, &["patch", "--dry-run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("intro-1.html"), "stdout was: {}", stdout);
  assert!(stdout.contains("Dry-run mode"));

  let index = project.read_file("doc/index.html")?;
  assert!(index.contains("\"intro.html\""), "index.html was: {}", index);

  Ok(())
}

#[test]
fn test_patch_follows_explicit_rules() -> Result<()> {
  let project = TestProject::new("lepl")?;
  project.write_file("doc/page.html", "one two one\n")?;
  project.write_config(
    "[project]\nname = \"lepl\"\n\n[[patches]]\nfile = \"doc/page.html\"\nfind = \"one\"\nreplace = \"1\"\n",
  )?;

  run_docstamp(&project.path, &["patch"])?;

  // Only the first occurrence is replaced
  assert_eq!(project.read_file("doc/page.html")?, "1 two one\n");

  Ok(())
}
