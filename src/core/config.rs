use crate::core::error::{ConfigError, ResultExt, StampError, StampResult};
use crate::core::version::Versions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Subpackages the API doc generator skips when no explicit exclusions
/// are configured. Joined to the project name as `<name>.<subpackage>`.
const INTERNAL_SUBPACKAGES: [&str; 3] = ["_experiment", "_performance", "_example"];

/// Configuration for docstamp
/// Searched in order: docstamp.toml, .docstamp.toml, .config/docstamp.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampConfig {
  pub project: ProjectConfig,
  #[serde(default)]
  pub docs: DocsConfig,
  #[serde(default)]
  pub api: ApiConfig,
  #[serde(default)]
  pub stamps: Vec<StampRule>,
  #[serde(default)]
  pub patches: Vec<PatchRule>,
  /// Receipt of the last successful build (written by `docstamp build`)
  #[serde(default)]
  pub last_build: Option<BuildRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
  /// Project name, used in default paths and default patch text
  pub name: String,

  /// Packaging manifest holding the version='...' line (default: setup.py)
  #[serde(default = "default_manifest")]
  pub manifest: PathBuf,

  /// Library source root (default: src/<name>)
  #[serde(default)]
  pub source_root: Option<PathBuf>,
}

fn default_manifest() -> PathBuf {
  PathBuf::from("setup.py")
}

impl ProjectConfig {
  /// Effective source root, relative to the project root
  pub fn source_dir(&self) -> PathBuf {
    self
      .source_root
      .clone()
      .unwrap_or_else(|| PathBuf::from("src").join(&self.name))
  }
}

/// Documentation tree configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsConfig {
  /// Documentation source tree (default: doc-src)
  #[serde(default = "default_docs_source")]
  pub source: PathBuf,

  /// Generated output tree, deleted and recreated each build (default: doc)
  #[serde(default = "default_docs_output")]
  pub output: PathBuf,

  /// Doc config file carrying release/version lines (default: <source>/conf.py)
  #[serde(default)]
  pub config: Option<PathBuf>,

  /// Index build step, run before the site builder with <source> appended.
  /// Empty (the default) skips the step.
  #[serde(default)]
  pub index_command: Vec<String>,

  /// Site builder, run with <source> and <output> appended
  #[serde(default = "default_build_command")]
  pub build_command: Vec<String>,
}

fn default_docs_source() -> PathBuf {
  PathBuf::from("doc-src")
}

fn default_docs_output() -> PathBuf {
  PathBuf::from("doc")
}

fn default_build_command() -> Vec<String> {
  vec!["sphinx-build".to_string()]
}

impl Default for DocsConfig {
  fn default() -> Self {
    Self {
      source: default_docs_source(),
      output: default_docs_output(),
      config: None,
      index_command: Vec::new(),
      build_command: default_build_command(),
    }
  }
}

impl DocsConfig {
  /// Effective doc config path, relative to the project root
  pub fn config_path(&self) -> PathBuf {
    self.config.clone().unwrap_or_else(|| self.source.join("conf.py"))
  }

  /// Whether an index build step is configured
  pub fn has_index_step(&self) -> bool {
    !self.index_command.is_empty()
  }
}

/// API documentation generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
  /// Generator argv prefix (default: ["epydoc"])
  #[serde(default = "default_api_command")]
  pub command: Vec<String>,

  /// Output directory name under docs.output (default: api)
  #[serde(default = "default_api_output")]
  pub output: String,

  /// Subpackages to exclude. Unset means the built-in internal
  /// subpackages, prefixed with the project name.
  #[serde(default)]
  pub exclude: Option<Vec<String>>,

  /// Doc-comment format passed to the generator
  #[serde(default = "default_docformat")]
  pub docformat: String,

  /// Call-graph mode passed to the generator
  #[serde(default = "default_graph")]
  pub graph: String,

  /// Emit -v
  #[serde(default = "default_flag_on")]
  pub verbose: bool,

  /// Emit --debug
  #[serde(default = "default_flag_on")]
  pub debug: bool,
}

fn default_api_command() -> Vec<String> {
  vec!["epydoc".to_string()]
}

fn default_api_output() -> String {
  "api".to_string()
}

fn default_docformat() -> String {
  "restructuredtext".to_string()
}

fn default_graph() -> String {
  "all".to_string()
}

fn default_flag_on() -> bool {
  true
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      command: default_api_command(),
      output: default_api_output(),
      exclude: None,
      docformat: default_docformat(),
      graph: default_graph(),
      verbose: default_flag_on(),
      debug: default_flag_on(),
    }
  }
}

impl ApiConfig {
  /// Effective exclusion list for a given project name
  pub fn excludes(&self, project: &str) -> Vec<String> {
    match &self.exclude {
      Some(list) => list.clone(),
      None => INTERNAL_SUBPACKAGES
        .iter()
        .map(|sub| format!("{}.{}", project, sub))
        .collect(),
    }
  }
}

/// Which derived value a stamp rule writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StampValue {
  /// The full release string, e.g. `5.1.3`
  Release,
  /// The truncated docs version, e.g. `5.1`
  Version,
}

impl StampValue {
  /// Pick the concrete string out of a [`Versions`]
  pub fn resolve<'a>(&self, versions: &'a Versions) -> &'a str {
    match self {
      StampValue::Release => &versions.release,
      StampValue::Version => &versions.version,
    }
  }
}

/// One assignment-line rewrite
///
/// # Example
///
/// ```toml
/// [[stamps]]
/// file = "doc-src/conf.py"
/// key = "release"
/// value = "release"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampRule {
  /// Target file, relative to the project root
  pub file: PathBuf,
  /// Left-hand side of the `key = '...'` assignment to rewrite
  pub key: String,
  /// Which derived value to write
  pub value: StampValue,
}

/// One literal substitution in a generated page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchRule {
  /// Target file, relative to the project root
  pub file: PathBuf,
  /// Literal text to find (first occurrence)
  pub find: String,
  /// Literal replacement
  pub replace: String,
}

/// Receipt of the last successful build
///
/// # Example
///
/// ```toml
/// [last_build]
/// release = "5.1.3"
/// built_at = "2026-08-23T10:15:00Z"
/// plan = "4fa3c2b19d0e"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRecord {
  /// Release that was stamped and built
  pub release: String,

  /// Completion time of the build
  pub built_at: DateTime<Utc>,

  /// Short ID of the executed plan
  pub plan: String,
}

impl StampConfig {
  /// Find config file in search order: docstamp.toml, .docstamp.toml, .config/docstamp.toml
  pub fn find_config_path(dir: &Path) -> Option<PathBuf> {
    let candidates = vec![
      dir.join("docstamp.toml"),
      dir.join(".docstamp.toml"),
      dir.join(".config").join("docstamp.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Walk up from a starting directory to the project root
  ///
  /// The project root is the nearest ancestor (including the start)
  /// holding a config file in any of the candidate locations.
  pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
      if Self::find_config_path(current).is_some() {
        return Some(current.to_path_buf());
      }
      current = current.parent()?;
    }
  }

  /// Load config from a project directory (searches candidate locations)
  pub fn load(dir: &Path) -> StampResult<Self> {
    let config_path = Self::find_config_path(dir).ok_or_else(|| {
      StampError::Config(ConfigError::NotFound {
        search_root: dir.to_path_buf(),
      })
    })?;

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: StampConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .validate()
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    Ok(config)
  }

  /// Discover the project root from a working directory and load from it
  pub fn discover(start: &Path) -> StampResult<(PathBuf, Self)> {
    let root = Self::find_project_root(start).ok_or_else(|| {
      StampError::Config(ConfigError::NotFound {
        search_root: start.to_path_buf(),
      })
    })?;
    let config = Self::load(&root)?;
    Ok((root, config))
  }

  /// Save config back to its file in the given project directory
  ///
  /// Writes to whichever candidate location already exists so receipt
  /// updates land in the file the user keeps, defaulting to docstamp.toml.
  pub fn save(&self, dir: &Path) -> StampResult<()> {
    let config_path = Self::find_config_path(dir).unwrap_or_else(|| dir.join("docstamp.toml"));
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(())
  }

  /// Check if config exists at the given path
  pub fn exists(dir: &Path) -> bool {
    Self::find_config_path(dir).is_some()
  }

  /// Create a config for a new project with the built-in rules materialized
  pub fn scaffold(name: &str) -> Self {
    let mut config = Self {
      project: ProjectConfig {
        name: name.to_string(),
        manifest: default_manifest(),
        source_root: None,
      },
      docs: DocsConfig::default(),
      api: ApiConfig::default(),
      stamps: Vec::new(),
      patches: Vec::new(),
      last_build: None,
    };
    config.stamps = config.effective_stamps();
    config.patches = config.effective_patches();
    config
  }

  /// Validate the configuration
  pub fn validate(&self) -> StampResult<()> {
    if self.project.name.trim().is_empty() {
      return Err(StampError::Config(ConfigError::MissingField {
        field: "project.name".to_string(),
      }));
    }

    // The output tree is deleted wholesale before every build, so it
    // must never resolve to the project root itself.
    if self.docs.output.as_os_str().is_empty() || self.docs.output == Path::new(".") {
      return Err(StampError::Config(ConfigError::InvalidField {
        field: "docs.output".to_string(),
        reason: "must name a subdirectory, not the project root".to_string(),
      }));
    }

    if self.docs.build_command.is_empty() {
      return Err(StampError::Config(ConfigError::InvalidField {
        field: "docs.build_command".to_string(),
        reason: "must name at least the tool to run".to_string(),
      }));
    }

    if self.api.command.is_empty() {
      return Err(StampError::Config(ConfigError::InvalidField {
        field: "api.command".to_string(),
        reason: "must name at least the tool to run".to_string(),
      }));
    }

    for (i, rule) in self.stamps.iter().enumerate() {
      if rule.key.trim().is_empty() {
        return Err(StampError::Config(ConfigError::InvalidField {
          field: format!("stamps[{}].key", i),
          reason: "an empty key matches nothing".to_string(),
        }));
      }
    }

    for (i, rule) in self.patches.iter().enumerate() {
      if rule.find.is_empty() {
        return Err(StampError::Config(ConfigError::InvalidField {
          field: format!("patches[{}].find", i),
          reason: "an empty find string matches nothing".to_string(),
        }));
      }
    }

    Ok(())
  }

  /// Stamp rules in effect: explicit entries, or the three built-ins
  ///
  /// The built-ins cover the doc config's release and version lines and
  /// the library's `__version__` declaration.
  pub fn effective_stamps(&self) -> Vec<StampRule> {
    if !self.stamps.is_empty() {
      return self.stamps.clone();
    }

    let doc_config = self.docs.config_path();
    vec![
      StampRule {
        file: doc_config.clone(),
        key: "release".to_string(),
        value: StampValue::Release,
      },
      StampRule {
        file: doc_config,
        key: "version".to_string(),
        value: StampValue::Version,
      },
      StampRule {
        file: self.project.source_dir().join("__init__.py"),
        key: "__version__".to_string(),
        value: StampValue::Release,
      },
    ]
  }

  /// Patch rules in effect: explicit entries, or the two built-ins
  pub fn effective_patches(&self) -> Vec<PatchRule> {
    if !self.patches.is_empty() {
      return self.patches.clone();
    }

    vec![
      PatchRule {
        file: self.docs.output.join("index.html"),
        find: "intro.html".to_string(),
        replace: "intro-1.html".to_string(),
      },
      PatchRule {
        file: self.docs.output.join("intro-1.html"),
        find: format!("A Tutorial for {}", self.project.name),
        replace: "Tutorial Contents".to_string(),
      },
    ]
  }

  /// API doc output directory, nested under the docs output tree
  pub fn api_output_dir(&self) -> PathBuf {
    self.docs.output.join(&self.api.output)
  }
}
