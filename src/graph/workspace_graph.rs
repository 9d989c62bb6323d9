//! Workspace dependency graph built from cargo_metadata + petgraph
//!
//! ## Graph Structure
//!
//! - **Directed Graph**: `A → B` means "A depends on B"
//! - **Nodes**: Workspace members only (external crates never get rebuilt selectively)
//! - **Edges**: Path dependencies between members (normal/dev/build)
//! - **Index**: Lookups by crate name
//! - **Algorithms**: Kahn toposort for build order, DFS for closures

use crate::cargo::metadata::WorkspaceMetadata;
use crate::core::error::{ScopeError, ScopeResult};
use crate::host::ModuleDescriptor;
use cargo_metadata::DependencyKind;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Key of the synthetic top-level module of a virtual workspace
pub const VIRTUAL_ROOT_KEY: &str = "(workspace)";

/// A workspace member in the dependency graph.
#[derive(Debug, Clone)]
pub struct PackageNode {
  pub name: String,
  pub manifest_path: PathBuf,
}

/// Workspace dependency graph.
pub struct WorkspaceGraph {
  /// Nodes: PackageNode, Edges: DependencyKind
  graph: DiGraph<PackageNode, DependencyKind>,

  /// Index: package name → node index
  name_to_node: HashMap<String, NodeIndex>,

  /// Workspace root directory (absolute)
  root: PathBuf,

  /// Name of the package declared in the root manifest, if the workspace is not virtual
  root_package: Option<String>,
}

impl WorkspaceGraph {
  /// Load workspace graph from root directory.
  pub fn load(workspace_root: &Path) -> ScopeResult<Self> {
    let metadata = WorkspaceMetadata::load(workspace_root)?;
    Ok(Self::from_metadata(&metadata))
  }

  fn from_metadata(metadata: &WorkspaceMetadata) -> Self {
    let mut packages = metadata.list_crates();
    packages.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));

    let mut graph = DiGraph::new();
    let mut name_to_node = HashMap::new();

    for package in &packages {
      let node = PackageNode {
        name: package.name.as_ref().to_string(),
        manifest_path: package.manifest_path.clone().into_std_path_buf(),
      };
      let node_idx = graph.add_node(node);
      name_to_node.insert(package.name.as_ref().to_string(), node_idx);
    }

    for package in &packages {
      let from_idx = name_to_node[package.name.as_str()];

      for dep in &package.dependencies {
        // Only path dependencies can point at another member
        if dep.path.is_none() {
          continue;
        }
        if let Some(to_idx) = name_to_node.get(dep.name.as_str())
          && *to_idx != from_idx
        {
          graph.add_edge(from_idx, *to_idx, dep.kind);
        }
      }
    }

    Self {
      graph,
      name_to_node,
      root: metadata.workspace_root().to_path_buf(),
      root_package: metadata.root_package().map(|pkg| pkg.name.as_ref().to_string()),
    }
  }

  /// Workspace root directory.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Get all workspace member crate names, sorted.
  pub fn workspace_members(&self) -> Vec<String> {
    let mut members: Vec<_> = self.name_to_node.keys().cloned().collect();
    members.sort();
    members
  }

  /// The top-level module: the root package, or a synthetic aggregator for a
  /// virtual workspace.
  pub fn top_level(&self) -> ModuleDescriptor {
    let key = self.root_package.as_deref().unwrap_or(VIRTUAL_ROOT_KEY);
    ModuleDescriptor::from_manifest(key, self.root.join("Cargo.toml"))
  }

  /// Is `key` the top-level module?
  pub fn is_top_level(&self, key: &str) -> bool {
    key == self.root_package.as_deref().unwrap_or(VIRTUAL_ROOT_KEY)
  }

  /// Modules in scan order: members deepest directory first (build order breaks
  /// ties), then the top-level module last.
  ///
  /// A changed file is claimed by the first module containing it, so a crate
  /// nested inside another crate's directory must come before it, and the
  /// top-level module only takes what no member contains.
  pub fn modules(&self) -> Vec<ModuleDescriptor> {
    let top = self.top_level();

    let mut modules: Vec<ModuleDescriptor> = self
      .build_order()
      .into_iter()
      .filter(|name| *name != top.key)
      .map(|name| {
        let node = &self.graph[self.name_to_node[&name]];
        ModuleDescriptor::from_manifest(name, node.manifest_path.clone())
      })
      .collect();
    modules.sort_by_key(|m| Reverse(m.directory.components().count()));

    modules.push(top);
    modules
  }

  /// Workspace members in build order: if A depends on B, B comes first.
  ///
  /// Kahn's algorithm; among crates that are ready at the same time, name order
  /// wins, so the order is stable across runs. Dev-dependency edges are ignored
  /// since they may form cycles. Crates left over by a cycle are appended in
  /// name order.
  pub fn build_order(&self) -> Vec<String> {
    let is_build_edge = |kind: &DependencyKind| *kind != DependencyKind::Development;

    let mut pending: HashMap<NodeIndex, usize> = HashMap::new();
    let mut ready: BTreeMap<&str, NodeIndex> = BTreeMap::new();

    for idx in self.graph.node_indices() {
      let deps = self
        .graph
        .edges_directed(idx, Direction::Outgoing)
        .filter(|e| is_build_edge(e.weight()))
        .count();
      if deps == 0 {
        ready.insert(self.graph[idx].name.as_str(), idx);
      } else {
        pending.insert(idx, deps);
      }
    }

    let mut order = Vec::with_capacity(self.graph.node_count());
    while let Some((name, idx)) = ready.pop_first() {
      order.push(name.to_string());

      for edge in self.graph.edges_directed(idx, Direction::Incoming) {
        if !is_build_edge(edge.weight()) {
          continue;
        }
        let dependent = edge.source();
        if let Some(count) = pending.get_mut(&dependent) {
          *count -= 1;
          if *count == 0 {
            pending.remove(&dependent);
            ready.insert(self.graph[dependent].name.as_str(), dependent);
          }
        }
      }
    }

    if !pending.is_empty() {
      let mut stuck: Vec<String> = pending.keys().map(|idx| self.graph[*idx].name.clone()).collect();
      stuck.sort();
      tracing::warn!("Dependency cycle between crates {}, appending in name order", stuck.join(", "));
      order.extend(stuck);
    }

    order
  }

  /// Get transitive reverse dependencies (all members that depend on this one).
  ///
  /// # Performance
  /// O(V + E) where V = vertices, E = edges.
  pub fn transitive_dependents(&self, crate_name: &str) -> ScopeResult<HashSet<String>> {
    self.reachable(crate_name, Direction::Incoming)
  }

  /// Get transitive dependencies (all members this one depends on).
  pub fn transitive_dependencies(&self, crate_name: &str) -> ScopeResult<HashSet<String>> {
    self.reachable(crate_name, Direction::Outgoing)
  }

  /// DFS from `crate_name` along `direction`, excluding the start node.
  fn reachable(&self, crate_name: &str, direction: Direction) -> ScopeResult<HashSet<String>> {
    let start_node = self.find_node(crate_name)?;

    let mut visited = HashSet::new();
    let mut stack = vec![start_node];
    let mut found = HashSet::new();

    while let Some(node_idx) = stack.pop() {
      if !visited.insert(node_idx) {
        continue;
      }

      for neighbor_idx in self.graph.neighbors_directed(node_idx, direction) {
        if neighbor_idx != start_node {
          found.insert(self.graph[neighbor_idx].name.clone());
        }
        stack.push(neighbor_idx);
      }
    }

    Ok(found)
  }

  /// Find node index by crate name.
  fn find_node(&self, crate_name: &str) -> ScopeResult<NodeIndex> {
    self.name_to_node.get(crate_name).copied().ok_or_else(|| {
      ScopeError::message(format!(
        "Crate '{}' not found. Available workspace crates: {}",
        crate_name,
        self.workspace_members().join(", ")
      ))
    })
  }
}
