//! Tests for the `build` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_build_dry_run_shows_plan_without_changes() -> Result<()> {
  let project = TestProject::new("lepl")?;

  let output = run_docstamp(&project.path, &["build", "--dry-run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Plan: build lepl 5.1.3"), "stdout was: {}", stdout);
  assert!(stdout.contains("Docs version: 5.1"));
  assert!(stdout.contains("Stamp release = '5.1.3' in doc-src/conf.py"));
  assert!(stdout.contains("Remove output tree doc"));
  assert!(stdout.contains("sphinx-build doc-src doc"));
  assert!(stdout.contains("output tree is deleted"), "destructive note expected");
  assert!(stdout.contains("Dry-run mode"));

  // Nothing may change in dry-run mode
  assert!(project.read_file("doc-src/conf.py")?.contains("release = '0.0'"));
  assert!(!project.file_exists("doc"));

  Ok(())
}

#[test]
fn test_build_dry_run_json_plan() -> Result<()> {
  let project = TestProject::new("lepl")?;

  let output = run_docstamp(&project.path, &["build", "--dry-run", "--json"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  let plan: serde_json::Value = serde_json::from_str(&stdout)?;
  assert_eq!(plan["metadata"]["project"], "lepl");
  assert_eq!(plan["metadata"]["release"], "5.1.3");
  assert_eq!(plan["metadata"]["version"], "5.1");
  assert_eq!(plan["metadata"]["is_destructive"], true);

  let operations = plan["operations"].as_array().expect("operations array");
  // 3 stamps, remove tree, site build, 2 patches, api docs
  assert_eq!(operations.len(), 8);
  assert_eq!(operations[0]["type"], "stamp");
  assert_eq!(operations[3]["type"], "remove_tree");
  assert_eq!(operations[4]["type"], "build_site");
  assert_eq!(operations[7]["type"], "api_docs");
  assert_eq!(operations[7]["files"], 2);

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_build_executes_pipeline_in_order() -> Result<()> {
  let project = TestProject::with_fake_tools("lepl")?;

  run_docstamp(&project.path, &["build"])?;

  // Stamps land in the tracked files
  let conf = project.read_file("doc-src/conf.py")?;
  assert!(conf.contains("release = '5.1.3'"), "conf.py was: {}", conf);
  assert!(conf.contains("version = '5.1'"));
  assert!(project.read_file("src/lepl/__init__.py")?.contains("__version__ = '5.1.3'"));

  // The fake site builder ran before the fake API generator
  let log = project.read_file("tool.log")?;
  let site_pos = log.find("site-build doc-src doc").expect("site builder invocation");
  let api_pos = log.find("api-gen").expect("api generator invocation");
  assert!(site_pos < api_pos, "tool.log was: {}", log);

  // The API generator got the fixed flags and the sorted source files
  assert!(log.contains("api-gen -v --html --output doc/api --graph all --docformat restructuredtext"));
  assert!(log.contains("--exclude lepl._experiment --exclude lepl._performance --exclude lepl._example"));
  assert!(log.contains("--debug src/lepl/__init__.py src/lepl/matchers.py"));

  // Patches applied to the pages the site builder wrote
  assert!(project.read_file("doc/index.html")?.contains("intro-1.html"));
  assert!(project.read_file("doc/intro-1.html")?.contains("Tutorial Contents"));

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_build_removes_stale_output() -> Result<()> {
  let project = TestProject::with_fake_tools("lepl")?;
  project.write_file("doc/stale.html", "left over from last release\n")?;

  run_docstamp(&project.path, &["build"])?;

  assert!(!project.file_exists("doc/stale.html"), "stale output must be removed");
  assert!(project.file_exists("doc/index.html"), "fresh output must be present");

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_build_skip_api() -> Result<()> {
  let project = TestProject::with_fake_tools("lepl")?;

  let output = run_docstamp(&project.path, &["build", "--skip-api"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(!stdout.contains("Generate API docs"), "plan must omit the API step");

  let log = project.read_file("tool.log")?;
  assert!(log.contains("site-build"));
  assert!(!log.contains("api-gen"), "tool.log was: {}", log);

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_build_runs_index_step_when_configured() -> Result<()> {
  let project = TestProject::with_fake_tools("lepl")?;
  let index = project.write_fake_tool("index-gen", "")?;

  // Rebuild the config with the index step added
  let site = project.path.join("tools/site-build");
  let api = project.path.join("tools/api-gen");
  project.write_config(&format!(
    "[project]\nname = \"lepl\"\n\n[docs]\nindex_command = [\"{}\"]\nbuild_command = [\"{}\"]\n\n[api]\ncommand = [\"{}\"]\n",
    index.display(),
    site.display(),
    api.display()
  ))?;

  run_docstamp(&project.path, &["build"])?;

  let log = project.read_file("tool.log")?;
  let index_pos = log.find("index-gen doc-src").expect("index invocation with source appended");
  let site_pos = log.find("site-build").expect("site builder invocation");
  assert!(index_pos < site_pos, "tool.log was: {}", log);

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_build_aborts_when_tool_fails() -> Result<()> {
  let project = TestProject::with_fake_tools("lepl")?;
  let bad_site = project.write_fake_tool("bad-site", "exit 7")?;
  let api = project.path.join("tools/api-gen");
  project.write_config(&format!(
    "[project]\nname = \"lepl\"\n\n[docs]\nbuild_command = [\"{}\"]\n\n[api]\ncommand = [\"{}\"]\n",
    bad_site.display(),
    api.display()
  ))?;

  let output = run_docstamp_unchecked(&project.path, &["build"])?;
  assert_eq!(output.status.code(), Some(2), "tool failures are system errors");
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("exit code 7"), "stderr was: {}", stderr);

  // Earlier steps ran; later steps did not
  assert!(project.read_file("doc-src/conf.py")?.contains("release = '5.1.3'"));
  let log = project.read_file("tool.log")?;
  assert!(!log.contains("api-gen"), "pipeline must stop at the first failure");

  // No receipt without a fully successful run
  assert!(!project.read_file("docstamp.toml")?.contains("[last_build]"));

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_build_records_receipt() -> Result<()> {
  let project = TestProject::with_fake_tools("lepl")?;

  run_docstamp(&project.path, &["build"])?;

  let config = project.read_file("docstamp.toml")?;
  assert!(config.contains("[last_build]"), "docstamp.toml was: {}", config);
  assert!(config.contains("release = \"5.1.3\""));
  assert!(config.contains("plan = \""));

  // The receipt surfaces in the version command afterwards
  let output = run_docstamp(&project.path, &["version"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Last build: 5.1.3"), "stdout was: {}", stdout);

  Ok(())
}
