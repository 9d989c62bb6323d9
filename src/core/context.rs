//! Unified invocation context - build once, pass everywhere
//!
//! ```text
//! main.rs:
//!   WorkspaceContext::build() -> &WorkspaceContext
//!   |
//!   v
//! commands/plan.rs, exec.rs, modules.rs:
//!   fn run_*(ctx: &WorkspaceContext, ...)
//! ```

use crate::core::config::{ConfigOverrides, ScopeConfig, Settings};
use crate::core::error::ScopeResult;
use crate::graph::workspace_graph::WorkspaceGraph;
use crate::host::{BuildRequest, CargoHost};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything one invocation needs, loaded once.
#[derive(Clone)]
pub struct WorkspaceContext {
  /// Workspace root directory (absolute path, as reported by cargo)
  pub root: PathBuf,

  /// Dependency graph of the workspace members
  pub graph: Arc<WorkspaceGraph>,

  /// Effective settings (config file + command-line overrides)
  pub settings: Settings,
}

impl WorkspaceContext {
  /// Load the workspace graph and resolve settings for this invocation.
  ///
  /// `cwd` anchors relative paths given on the command line.
  pub fn build(workspace_root: &Path, overrides: &ConfigOverrides, cwd: &Path) -> ScopeResult<Self> {
    let graph = Arc::new(WorkspaceGraph::load(workspace_root)?);
    let root = graph.root().to_path_buf();

    let mut config = ScopeConfig::load(&root)?;
    overrides.apply(&mut config, cwd);

    let top_level = graph.top_level();
    let settings = Settings::resolve(&config, &top_level.directory);
    tracing::debug!(?settings, "resolved settings");

    Ok(Self { root, graph, settings })
  }

  /// A fresh Cargo host seeded with the command-line build request.
  pub fn host(&self, request: BuildRequest) -> CargoHost {
    CargoHost::new(Arc::clone(&self.graph), request)
  }

  /// Get workspace root as Path reference (convenience)
  pub fn workspace_root(&self) -> &Path {
    &self.root
  }
}
