//! Cargo workspace as a build host
//!
//! The selection core only replaces the build request. Turning a request into
//! concrete `-p` flags (closure expansion) is the host's job and lives here.

use super::{BuildHost, BuildRequest, ClosureMode, ModuleDescriptor};
use crate::core::error::ScopeResult;
use crate::graph::WorkspaceGraph;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// What cargo should build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", content = "packages", rename_all = "kebab-case")]
pub enum BuildPlan {
  /// `--workspace`
  Workspace,
  /// `-p` for each package, in build order
  Packages(Vec<String>),
}

impl BuildPlan {
  /// Package selection arguments for a cargo invocation.
  pub fn cargo_args(&self) -> Vec<String> {
    match self {
      BuildPlan::Workspace => vec!["--workspace".to_string()],
      BuildPlan::Packages(packages) => packages.iter().flat_map(|p| ["-p".to_string(), p.clone()]).collect(),
    }
  }
}

/// Build host backed by the Cargo workspace graph.
pub struct CargoHost {
  graph: Arc<WorkspaceGraph>,
  modules: Vec<ModuleDescriptor>,
  top_level: ModuleDescriptor,
  request: BuildRequest,
}

impl CargoHost {
  /// Create a host with the request given on the command line.
  pub fn new(graph: Arc<WorkspaceGraph>, request: BuildRequest) -> Self {
    let modules = graph.modules();
    let top_level = graph.top_level();
    Self {
      graph,
      modules,
      top_level,
      request,
    }
  }

  /// Expand the current request into a build plan.
  ///
  /// An empty selection, or one that contains the top-level module, builds the
  /// whole workspace: every member inherits from the root manifest.
  pub fn plan(&self) -> ScopeResult<BuildPlan> {
    let selected = &self.request.selected;

    if selected.is_empty() || selected.iter().any(|key| self.graph.is_top_level(key)) {
      return Ok(BuildPlan::Workspace);
    }

    let mut packages: HashSet<String> = HashSet::new();
    for key in selected {
      // Resolves the key, so unknown packages fail even without a closure mode
      let dependents = self.graph.transitive_dependents(key)?;
      packages.insert(key.clone());

      if let Some(mode) = self.request.closure {
        if mode.includes_downstream() {
          packages.extend(dependents);
        }
        if mode.includes_upstream() {
          packages.extend(self.graph.transitive_dependencies(key)?);
        }
      }
    }

    let ordered = self
      .graph
      .build_order()
      .into_iter()
      .filter(|name| packages.contains(name))
      .collect();

    Ok(BuildPlan::Packages(ordered))
  }
}

impl BuildHost for CargoHost {
  fn modules(&self) -> &[ModuleDescriptor] {
    &self.modules
  }

  fn top_level(&self) -> &ModuleDescriptor {
    &self.top_level
  }

  fn request(&self) -> &BuildRequest {
    &self.request
  }

  fn set_request(&mut self, selected: Vec<String>, closure: ClosureMode) {
    self.request = BuildRequest {
      selected,
      closure: Some(closure),
    };
  }
}
