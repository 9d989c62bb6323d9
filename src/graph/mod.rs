//! Workspace graph
//!
//! Built on cargo_metadata + petgraph. Provides the module list the selection
//! core scans and the dependency closures the Cargo host expands a selection with.

pub mod workspace_graph;

pub use workspace_graph::WorkspaceGraph;
