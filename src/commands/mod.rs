//! CLI commands for cargo-scm-updates
//!
//! - **plan**: Show the selection outcome and the resulting build plan
//! - **exec**: Run a cargo command restricted to the build plan
//! - **modules**: Show the module index the selection scans
//!
//! All commands accept `&WorkspaceContext` to avoid redundant workspace loads.

pub mod exec;
pub mod modules;
pub mod plan;

pub use exec::run_exec;
pub use modules::run_modules;
pub use plan::run_plan;

use crate::core::context::WorkspaceContext;
use crate::core::error::ScopeResult;
use crate::host::cargo::BuildPlan;
use crate::host::{BuildHost, BuildRequest, ClosureMode};
use crate::scope::{self, Outcome};

/// Run the selection on a fresh host and expand the resulting request.
///
/// Returns the outcome, the final closure mode, and the build plan.
fn select(ctx: &WorkspaceContext, request: BuildRequest) -> ScopeResult<(Outcome, Option<ClosureMode>, BuildPlan)> {
  let mut host = ctx.host(request);
  let outcome = scope::apply(&ctx.settings, &mut host)?;
  let plan = host.plan()?;
  Ok((outcome, host.request().closure, plan))
}
