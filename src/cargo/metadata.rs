use crate::core::error::ScopeResult;
use cargo_metadata::{MetadataCommand, Package};
use std::path::Path;

/// Workspace introspection using cargo_metadata
#[derive(Clone)]
pub struct WorkspaceMetadata {
  metadata: cargo_metadata::Metadata,
}

impl WorkspaceMetadata {
  pub fn load(workspace_root: &Path) -> ScopeResult<Self> {
    let metadata = MetadataCommand::new()
      .manifest_path(workspace_root.join("Cargo.toml"))
      .no_deps()
      .exec()?;
    Ok(Self { metadata })
  }

  pub fn list_crates(&self) -> Vec<&Package> {
    self.metadata.workspace_packages()
  }

  /// The package declared in the workspace root manifest, if any.
  pub fn root_package(&self) -> Option<&Package> {
    let root_manifest = self.workspace_root().join("Cargo.toml");
    self
      .list_crates()
      .into_iter()
      .find(|pkg| pkg.manifest_path.as_std_path() == root_manifest)
  }

  pub fn workspace_root(&self) -> &Path {
    self.metadata.workspace_root.as_std_path()
  }
}
