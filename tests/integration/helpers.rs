//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A test project with the default docstamp layout
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Create a project with the conventional layout and a minimal config
  ///
  /// The layout matches the built-in defaults: setup.py carrying the
  /// release, src/<name> with Python sources, and doc-src with conf.py.
  pub fn new(name: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    std::fs::write(
      path.join("setup.py"),
      format!(
        "from distutils.core import setup\n\nsetup(name='{}',\n      version='5.1.3',\n      description='A test library')\n",
        name
      ),
    )?;

    let src = path.join("src").join(name);
    std::fs::create_dir_all(&src)?;
    std::fs::write(
      src.join("__init__.py"),
      format!("# {} package\n\n__version__ = '0.0'\n", name),
    )?;
    std::fs::write(src.join("matchers.py"), "# matchers\n")?;

    let doc_src = path.join("doc-src");
    std::fs::create_dir_all(&doc_src)?;
    std::fs::write(
      doc_src.join("conf.py"),
      format!("project = '{}'\nrelease = '0.0'\nversion = '0.0'\n", name),
    )?;

    let project = Self { _root: root, path };
    project.write_config(&format!("[project]\nname = \"{}\"\n", name))?;

    Ok(project)
  }

  /// Create a project whose doc builders are fake shell tools
  ///
  /// The fake site builder creates an output tree with the pages the
  /// built-in patches target; the fake API generator only logs. Every
  /// invocation is appended to tool.log in the project root.
  #[cfg(unix)]
  pub fn with_fake_tools(name: &str) -> Result<Self> {
    let project = Self::new(name)?;

    let site_body = format!(
      r#"for arg in "$@"; do out="$arg"; done
mkdir -p "$out"
printf '%s' '<a href="intro.html">Intro</a>' > "$out/index.html"
printf '%s' '<h1>A Tutorial for {}</h1>' > "$out/intro-1.html""#,
      name
    );
    let site = project.write_fake_tool("site-build", &site_body)?;
    let api = project.write_fake_tool("api-gen", "")?;

    project.write_config(&format!(
      "[project]\nname = \"{}\"\n\n[docs]\nbuild_command = [\"{}\"]\n\n[api]\ncommand = [\"{}\"]\n",
      name,
      site.display(),
      api.display()
    ))?;

    Ok(project)
  }

  /// Write a fake tool script under tools/ and return its absolute path
  ///
  /// The script answers `--version` (so doctor probes succeed), appends
  /// its name and arguments to tool.log, then runs the given body.
  #[cfg(unix)]
  pub fn write_fake_tool(&self, name: &str, body: &str) -> Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let dir = self.path.join("tools");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(name);

    let script = format!(
      "#!/bin/sh\nif [ \"$1\" = \"--version\" ]; then echo \"{} 1.0\"; exit 0; fi\nprintf '{} %s\\n' \"$*\" >> tool.log\n{}\n",
      name, name, body
    );
    std::fs::write(&path, script)?;

    let mut perms = std::fs::metadata(&path)?.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms)?;

    Ok(path)
  }

  /// Overwrite docstamp.toml
  pub fn write_config(&self, content: &str) -> Result<()> {
    std::fs::write(self.path.join("docstamp.toml"), content)?;
    Ok(())
  }

  /// Overwrite any file in the project
  pub fn write_file(&self, rel: &str, content: &str) -> Result<()> {
    let path = self.path.join(rel);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
  }

  /// Check if a file exists
  pub fn file_exists(&self, rel: &str) -> bool {
    self.path.join(rel).exists()
  }

  /// Read a file
  pub fn read_file(&self, rel: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(rel))?)
  }
}

/// Run the docstamp CLI and fail the test on a non-zero exit
pub fn run_docstamp(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_docstamp_unchecked(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "docstamp command failed: docstamp {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run the docstamp CLI and hand back the output, whatever the exit status
pub fn run_docstamp_unchecked(cwd: &Path, args: &[&str]) -> Result<Output> {
  let docstamp_bin = env!("CARGO_BIN_EXE_docstamp");

  Command::new(docstamp_bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run docstamp")
}
