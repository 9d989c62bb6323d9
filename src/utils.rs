//! Utility functions for cross-platform path handling
//!
//! Changed-file paths are compared as strings of components, never against the
//! filesystem: a path listed in the marker file may no longer exist on disk.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path.
///
/// Removes `.` components and folds `..` into the preceding normal component.
/// A `..` that would climb above the root is dropped; a `..` at the start of a
/// relative path is kept. Symlinks are not resolved.
pub fn normalize(path: &Path) -> PathBuf {
  let mut parts: Vec<Component<'_>> = Vec::new();

  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => match parts.last() {
        Some(Component::Normal(_)) => {
          parts.pop();
        }
        Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
        _ => parts.push(component),
      },
      other => parts.push(other),
    }
  }

  parts.iter().collect()
}

/// Resolve `path` against `base` and normalize the result.
///
/// Absolute paths are taken as they are.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
  if path.is_absolute() {
    normalize(path)
  } else {
    normalize(&base.join(path))
  }
}

/// Is `path` strictly inside `dir`?
///
/// The comparison is component-wise, so `/a/bc` is not inside `/a/b`, and a
/// directory is not inside itself.
pub fn is_strictly_within(path: &Path, dir: &Path) -> bool {
  path != dir && path.starts_with(dir)
}

/// Is `path` either `dir` itself or an immediate child of `dir`?
pub fn is_self_or_child(path: &Path, dir: &Path) -> bool {
  path == dir || path.parent() == Some(dir)
}
