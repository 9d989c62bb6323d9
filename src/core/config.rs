use crate::core::error::{ConfigError, ScopeResult};
use crate::utils::absolutize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Property enabling change-based selection
pub const PROP_ENABLED: &str = "make.scmUpdates";
/// Property skipping changes to the top-level manifest
pub const PROP_IGNORE_ROOT_MANIFEST: &str = "make.ignoreRootManifest";
/// Older name of [`PROP_IGNORE_ROOT_MANIFEST`], still accepted
pub const PROP_IGNORE_ROOT_POM: &str = "make.ignoreRootPom";
/// Property overriding the base directory
pub const PROP_BASE_DIR: &str = "make.baseDir";

/// Configuration for cargo-scm-updates
/// Searched in order: scm-updates.toml, .cargo/scm-updates.toml, .config/scm-updates.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
  /// Restrict the build to changed modules (opt-in)
  pub enabled: bool,

  /// Never let a change to the top-level manifest select the top-level module
  pub ignore_root_module: bool,

  /// Directory holding the marker file and anchoring changed paths
  /// (default: the top-level module's directory)
  pub base_dir: Option<PathBuf>,
}

impl ScopeConfig {
  /// Find config file in search order
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("scm-updates.toml"),
      path.join(".cargo").join("scm-updates.toml"),
      path.join(".config").join("scm-updates.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the workspace root, or defaults when no file exists.
  ///
  /// A relative `base_dir` in the file is taken relative to `path`.
  pub fn load(path: &Path) -> ScopeResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Invalid {
      path: config_path.clone(),
      reason: e.to_string(),
    })?;
    let mut config: ScopeConfig = toml_edit::de::from_str(&content).map_err(|e| ConfigError::Invalid {
      path: config_path.clone(),
      reason: e.to_string(),
    })?;

    if let Some(base_dir) = config.base_dir.take() {
      config.base_dir = Some(absolutize(path, &base_dir));
    }

    tracing::debug!(config = %config_path.display(), "loaded configuration");
    Ok(config)
  }

  /// Apply a `key=value` host property. Relative paths resolve against `cwd`.
  ///
  /// Returns false for keys this tool does not know.
  pub fn apply_property(&mut self, key: &str, value: &str, cwd: &Path) -> bool {
    match key {
      PROP_ENABLED => self.enabled = parse_bool(value),
      PROP_IGNORE_ROOT_MANIFEST | PROP_IGNORE_ROOT_POM => self.ignore_root_module = parse_bool(value),
      PROP_BASE_DIR => self.base_dir = Some(absolutize(cwd, Path::new(value))),
      _ => return false,
    }
    true
  }
}

/// Command-line overrides layered over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
  /// `-D key=value` properties, in the order given
  pub properties: Vec<(String, String)>,
  /// `--enable`
  pub enable: bool,
  /// `--ignore-root-manifest`
  pub ignore_root_manifest: bool,
  /// `--base-dir`
  pub base_dir: Option<PathBuf>,
}

impl ConfigOverrides {
  /// Layer properties, then flags, over `config`. Relative paths resolve against `cwd`.
  pub fn apply(&self, config: &mut ScopeConfig, cwd: &Path) {
    for (key, value) in &self.properties {
      if !config.apply_property(key, value, cwd) {
        tracing::debug!("Ignoring unknown property {}", key);
      }
    }

    if self.enable {
      config.enabled = true;
    }
    if self.ignore_root_manifest {
      config.ignore_root_module = true;
    }
    if let Some(dir) = &self.base_dir {
      config.base_dir = Some(absolutize(cwd, dir));
    }
  }
}

/// Parse a `-D` argument: `key=value`, or a bare `key` meaning `true`.
pub fn parse_property(arg: &str) -> Result<(String, String), String> {
  let (key, value) = match arg.split_once('=') {
    Some((key, value)) => (key.trim(), value),
    None => (arg.trim(), "true"),
  };

  if key.is_empty() {
    return Err(format!("invalid property '{}': expected KEY[=VALUE]", arg));
  }

  Ok((key.to_string(), value.to_string()))
}

/// Booleans follow the usual property convention: "true" in any case, anything else is false.
pub fn parse_bool(value: &str) -> bool {
  value.trim().eq_ignore_ascii_case("true")
}

/// Immutable per-invocation settings.
///
/// Built once, after the top-level module is known, and passed by reference to
/// every stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub enabled: bool,
  pub ignore_root_module: bool,
  /// Absolute, normalized base directory
  pub base_dir: PathBuf,
}

impl Settings {
  /// Resolve the effective settings; `top_level_dir` is the default base directory.
  pub fn resolve(config: &ScopeConfig, top_level_dir: &Path) -> Self {
    let base_dir = match &config.base_dir {
      Some(dir) => absolutize(top_level_dir, dir),
      None => absolutize(top_level_dir, Path::new("")),
    };

    Self {
      enabled: config.enabled,
      ignore_root_module: config.ignore_root_module,
      base_dir,
    }
  }
}
