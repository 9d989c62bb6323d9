//! Closure-mode adjustment for a resolved selection

use crate::host::ClosureMode;

/// What to do with the host's build request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Adjustment {
  /// Leave the build request untouched
  NoOp,
  /// Restrict the build to `modules`, expanded with `closure`
  Apply { modules: Vec<String>, closure: ClosureMode },
}

/// Decide the final closure mode for a selection.
///
/// An empty selection never means "build nothing": it leaves the host's plan
/// alone. Otherwise an unset mode becomes downstream, and upstream-only is
/// widened to both directions so that selecting changed modules cannot drop
/// their dependents.
pub fn adjust(included: Vec<String>, current: Option<ClosureMode>) -> Adjustment {
  if included.is_empty() {
    return Adjustment::NoOp;
  }

  let closure = match current {
    None => ClosureMode::Downstream,
    Some(ClosureMode::Upstream) => ClosureMode::Both,
    Some(mode) => mode,
  };

  if current != Some(closure) {
    tracing::info!(
      "Closure mode {} -> {}",
      current.map(|m| m.to_string()).unwrap_or_else(|| "unset".to_string()),
      closure
    );
  }

  Adjustment::Apply {
    modules: included,
    closure,
  }
}
