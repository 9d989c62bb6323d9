//! Changed-file list loading
//!
//! The list is produced by whatever ran the VCS status check and left in a
//! marker file directly under the base directory.

use crate::core::error::{InputError, ScopeResult};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the marker file holding the changed-file list
pub const MARKER_FILE_NAME: &str = ".scm-updates";

/// Path of the marker file for a base directory.
pub fn marker_path(base_dir: &Path) -> PathBuf {
  base_dir.join(MARKER_FILE_NAME)
}

/// Read the set of changed files recorded under `base_dir`.
///
/// Paths come back as written (relative to `base_dir`), deduplicated and in
/// sorted order so downstream logging is reproducible. Blank lines are skipped.
///
/// # Errors
/// [`InputError::Unavailable`] when the marker is missing, unreadable, or not
/// UTF-8. There is no fallback: an unknown change set must not turn into
/// "nothing changed".
pub fn load_changed_files(base_dir: &Path) -> ScopeResult<BTreeSet<String>> {
  let path = marker_path(base_dir);

  let content = fs::read_to_string(&path).map_err(|source| InputError::Unavailable {
    path: path.clone(),
    source,
  })?;

  let files: BTreeSet<String> = parse_changed_files(&content);
  tracing::debug!(marker = %path.display(), count = files.len(), "loaded changed-file list");

  Ok(files)
}

/// Split marker content into paths.
fn parse_changed_files(content: &str) -> BTreeSet<String> {
  content
    .lines()
    .filter(|line| !line.trim().is_empty())
    .map(str::to_string)
    .collect()
}
