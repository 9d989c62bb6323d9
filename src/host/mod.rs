//! Build host abstraction
//!
//! The selection core never talks to a concrete build graph. It sees the host
//! through [`BuildHost`]: an ordered module list, the top-level module, and a
//! build request it may replace.
//!
//! - **cargo**: [`CargoHost`], backed by the Cargo workspace graph

pub mod cargo;

pub use cargo::CargoHost;

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// One buildable module as seen by the selection core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDescriptor {
  /// Unique key used to select the module
  pub key: String,
  /// Absolute root directory of the module
  pub directory: PathBuf,
  /// Absolute path of the module's manifest file
  pub manifest_path: PathBuf,
}

impl ModuleDescriptor {
  /// Build a descriptor from its manifest path; the directory is the manifest's parent.
  pub fn from_manifest(key: impl Into<String>, manifest_path: impl Into<PathBuf>) -> Self {
    let manifest_path = manifest_path.into();
    let directory = manifest_path
      .parent()
      .map(|p| p.to_path_buf())
      .unwrap_or_else(|| manifest_path.clone());

    Self {
      key: key.into(),
      directory,
      manifest_path,
    }
  }
}

/// Which modules to pull in around an explicit selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClosureMode {
  /// Selected modules plus everything depending on them
  Downstream,
  /// Selected modules plus everything they depend on
  Upstream,
  /// Both directions
  Both,
}

impl ClosureMode {
  /// Combine the "also make" / "also make dependents" switches.
  pub fn from_flags(upstream: bool, downstream: bool) -> Option<Self> {
    match (upstream, downstream) {
      (true, true) => Some(Self::Both),
      (true, false) => Some(Self::Upstream),
      (false, true) => Some(Self::Downstream),
      (false, false) => None,
    }
  }

  pub fn includes_downstream(self) -> bool {
    matches!(self, Self::Downstream | Self::Both)
  }

  pub fn includes_upstream(self) -> bool {
    matches!(self, Self::Upstream | Self::Both)
  }
}

impl fmt::Display for ClosureMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Downstream => write!(f, "downstream"),
      Self::Upstream => write!(f, "upstream"),
      Self::Both => write!(f, "both"),
    }
  }
}

/// The host's build request: what to build and how to expand it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildRequest {
  /// Explicitly selected module keys (empty = everything)
  pub selected: Vec<String>,
  /// Closure mode (`None` = unspecified)
  pub closure: Option<ClosureMode>,
}

/// Narrow capability interface to the host build system.
pub trait BuildHost {
  /// All modules, in the host's stable scan order.
  fn modules(&self) -> &[ModuleDescriptor];

  /// The top-level (aggregator) module owning the invocation.
  fn top_level(&self) -> &ModuleDescriptor;

  /// The current build request.
  fn request(&self) -> &BuildRequest;

  /// Replace the selection and closure mode of the build request.
  fn set_request(&mut self, selected: Vec<String>, closure: ClosureMode);
}
