//! `cargo scm-updates exec` - Run a cargo command on the selected packages
//!
//! `cargo scm-updates exec test -- --nocapture` becomes
//! `cargo test -p a -p b -- --nocapture`, or `cargo test --workspace ...` when
//! the build request is left untouched.

use super::select;
use crate::core::context::WorkspaceContext;
use crate::core::error::{ResultExt, ScopeError, ScopeResult};
use crate::host::BuildRequest;
use std::process::Command;

/// Run the exec command
pub fn run_exec(
  ctx: &WorkspaceContext,
  request: BuildRequest,
  subcommand: String,
  dry_run: bool,
  cargo_args: Vec<String>,
) -> ScopeResult<()> {
  let (outcome, _, plan) = select(ctx, request)?;

  let mut args = vec![subcommand];
  args.extend(plan.cargo_args());
  args.extend(cargo_args);
  let display = format!("cargo {}", args.join(" "));

  if dry_run {
    println!("DRY RUN: Would execute:");
    println!("  {}", display);
    return Ok(());
  }

  if outcome.modified_request() {
    println!("🎯 Building changed packages");
  }
  println!("Executing: {}", display);

  let status = Command::new("cargo")
    .current_dir(ctx.workspace_root())
    .args(&args)
    .status()
    .with_context(|| format!("Failed to execute {}", display))?;

  if !status.success() {
    return Err(ScopeError::message(format!(
      "{} failed with exit code: {}",
      display,
      status.code().unwrap_or(-1)
    )));
  }

  println!("✅ Completed successfully");
  Ok(())
}
