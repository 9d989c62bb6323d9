//! Change-based build selection
//!
//! Loader → Resolver → Adjuster, run once per invocation before anything is
//! built:
//!
//! - **loader**: read the changed-file list from the `.scm-updates` marker
//! - **resolver**: assign changed files to modules (root guard, boundary checks)
//! - **adjuster**: pick the closure mode, or leave the build request alone
//!
//! [`apply`] wires them to a [`BuildHost`].

pub mod adjuster;
pub mod loader;
pub mod resolver;

pub use adjuster::{Adjustment, adjust};
pub use loader::{MARKER_FILE_NAME, load_changed_files};
pub use resolver::{Resolution, resolve};

use crate::core::config::Settings;
use crate::core::error::ScopeResult;
use crate::host::{BuildHost, ClosureMode};
use serde::Serialize;
use std::path::PathBuf;

/// What the selection did to the build request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Outcome {
  /// Feature disabled; request untouched
  Disabled,

  /// No changed file selected a module; request untouched
  NoChanges {
    changed_files: usize,
    unmatched: Vec<PathBuf>,
    suppressed: Vec<PathBuf>,
  },

  /// Request restricted to `modules`
  Selected {
    changed_files: usize,
    modules: Vec<String>,
    closure: ClosureMode,
  },
}

impl Outcome {
  /// Did this run change the host's build request?
  pub fn modified_request(&self) -> bool {
    matches!(self, Outcome::Selected { .. })
  }
}

/// Run the selection against `host`.
///
/// # Errors
/// Fails only when the feature is enabled and the marker file cannot be read.
pub fn apply<H: BuildHost + ?Sized>(settings: &Settings, host: &mut H) -> ScopeResult<Outcome> {
  if !settings.enabled {
    tracing::debug!("change-based selection disabled, not modifying build request");
    return Ok(Outcome::Disabled);
  }

  let changed = load_changed_files(&settings.base_dir)?;

  let resolution = resolve(
    &changed,
    host.modules(),
    host.top_level(),
    &settings.base_dir,
    settings.ignore_root_module,
  );

  match adjust(resolution.included, host.request().closure) {
    Adjustment::NoOp => {
      tracing::info!("No updates found. Nothing to do!");
      Ok(Outcome::NoChanges {
        changed_files: changed.len(),
        unmatched: resolution.unmatched,
        suppressed: resolution.suppressed,
      })
    }
    Adjustment::Apply { modules, closure } => {
      host.set_request(modules.clone(), closure);
      Ok(Outcome::Selected {
        changed_files: changed.len(),
        modules,
        closure,
      })
    }
  }
}
