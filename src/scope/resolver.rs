//! Changed path → module assignment
//!
//! Algorithm, per changed file (resolved against the base directory):
//! 1. With `ignore_root_module`, the top-level manifest itself is skipped.
//! 2. Modules are scanned in host order; the first whose directory strictly
//!    contains the file is a candidate.
//! 3. A top-level candidate is only accepted when the base directory is not the
//!    top-level directory, or the file is the base directory or one of its
//!    immediate children. A rejected candidate does not end the scan.
//! 4. An accepted module ends the scan for that file.
//!
//! O(files × modules). Both are small in practice (tens × low hundreds).

use crate::host::ModuleDescriptor;
use crate::utils::{absolutize, is_self_or_child, is_strictly_within};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Result of resolving changed files to modules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
  /// Module keys to build, in first-match order, without duplicates
  pub included: Vec<String>,

  /// At least one changed file was assigned to a module
  pub any_matched: bool,

  /// Changed files (absolute) that fell outside every module
  pub unmatched: Vec<PathBuf>,

  /// Changed files only the top-level module contained, dropped by the root guard
  pub suppressed: Vec<PathBuf>,
}

/// Assign each changed file to at most one module.
///
/// `changed_files` are relative to `base_dir`; iteration order of the input is
/// kept, so callers pass an ordered set for reproducible output.
pub fn resolve<'a, I>(
  changed_files: I,
  modules: &[ModuleDescriptor],
  top_level: &ModuleDescriptor,
  base_dir: &Path,
  ignore_root_module: bool,
) -> Resolution
where
  I: IntoIterator<Item = &'a String>,
{
  let mut resolution = Resolution::default();
  let mut seen: HashSet<&str> = HashSet::new();

  let top_manifest = absolutize(base_dir, &top_level.manifest_path);
  let top_dir = absolutize(base_dir, &top_level.directory);
  let guard_active = base_dir == top_dir;

  for changed in changed_files {
    tracing::info!("Updated {}", changed);

    let file = absolutize(base_dir, Path::new(changed));

    if ignore_root_module && file == top_manifest {
      tracing::debug!("Ignoring change to top-level manifest {}", file.display());
      continue;
    }

    let mut accepted: Option<&ModuleDescriptor> = None;
    let mut guarded = false;

    for module in modules {
      let module_dir = absolutize(base_dir, &module.directory);
      if !is_strictly_within(&file, &module_dir) {
        continue;
      }

      if module.key == top_level.key && guard_active && !is_self_or_child(&file, base_dir) {
        // Only the top-level module would take this file. It lives in some
        // subdirectory that is not a module, and selecting the top level
        // would rebuild the whole tree.
        tracing::debug!(
          "Not considering top level module for {} because that would trigger a full rebuild",
          file.display()
        );
        guarded = true;
        continue;
      }

      accepted = Some(module);
      break;
    }

    match accepted {
      Some(module) => {
        resolution.any_matched = true;
        if seen.insert(module.key.as_str()) {
          tracing::info!("Including {}", module.key);
          resolution.included.push(module.key.clone());
        }
      }
      None if guarded => resolution.suppressed.push(file),
      None => {
        tracing::debug!("Couldn't find file in any module root: {}", file.display());
        resolution.unmatched.push(file);
      }
    }
  }

  if !resolution.any_matched {
    tracing::info!("No changed file belongs to a module");
  }

  resolution
}
