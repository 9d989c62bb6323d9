//! `cargo scm-updates plan` - Show what a build would be restricted to
//!
//! Runs the selection against the workspace and prints:
//! - Whether selection ran, and what it decided
//! - The closure mode handed to the build
//! - The packages cargo would build

use super::select;
use crate::core::context::WorkspaceContext;
use crate::core::error::{ScopeError, ScopeResult};
use crate::host::cargo::BuildPlan;
use crate::host::{BuildRequest, ClosureMode};
use crate::scope::Outcome;

/// Output format for plan command
#[derive(Debug, Clone, Copy)]
enum OutputFormat {
  Text,
  Json,
  NamesOnly,
}

impl OutputFormat {
  fn from_str(s: &str) -> ScopeResult<Self> {
    match s.to_lowercase().as_str() {
      "text" => Ok(Self::Text),
      "json" => Ok(Self::Json),
      "names" | "names-only" => Ok(Self::NamesOnly),
      _ => Err(ScopeError::message(format!(
        "Unknown format '{}'. Valid formats: text, json, names-only",
        s
      ))),
    }
  }
}

/// Run the plan command
pub fn run_plan(ctx: &WorkspaceContext, request: BuildRequest, format: String) -> ScopeResult<()> {
  let output_format = OutputFormat::from_str(&format)?;

  let (outcome, closure, plan) = select(ctx, request)?;

  match output_format {
    OutputFormat::Text => display_text(ctx, &outcome, closure, &plan),
    OutputFormat::Json => display_json(ctx, &outcome, closure, &plan)?,
    OutputFormat::NamesOnly => display_names_only(&plan),
  }

  Ok(())
}

/// Display results in human-readable text format
fn display_text(ctx: &WorkspaceContext, outcome: &Outcome, closure: Option<ClosureMode>, plan: &BuildPlan) {
  println!("Build Selection");
  println!("===============");
  println!();
  println!("Base directory: {}", ctx.settings.base_dir.display());

  match outcome {
    Outcome::Disabled => {
      println!("Selection: disabled (enable with -D make.scmUpdates=true)");
    }
    Outcome::NoChanges {
      changed_files,
      unmatched,
      suppressed,
    } => {
      println!("Changed files: {}", changed_files);
      println!("Selection: no module changed, build left untouched");
      if !suppressed.is_empty() {
        println!();
        println!("Outside any module, not rebuilding everything for: {}", suppressed.len());
        for path in suppressed {
          println!("  {}", path.display());
        }
      }
      if !unmatched.is_empty() {
        println!();
        println!("Outside the module tree: {}", unmatched.len());
        for path in unmatched {
          println!("  {}", path.display());
        }
      }
    }
    Outcome::Selected {
      changed_files, modules, ..
    } => {
      println!("Changed files: {}", changed_files);
      println!();
      println!("Changed modules: {}", modules.len());
      for key in modules {
        println!("  📦 {}", key);
      }
    }
  }

  println!();
  match closure {
    Some(mode) => println!("Closure mode: {}", mode),
    None => println!("Closure mode: none"),
  }

  match plan {
    BuildPlan::Workspace => println!("Build: entire workspace"),
    BuildPlan::Packages(packages) => {
      println!("Build: {} packages", packages.len());
      for name in packages {
        println!("  🎯 {}", name);
      }
    }
  }
}

/// Display results in JSON format
fn display_json(
  ctx: &WorkspaceContext,
  outcome: &Outcome,
  closure: Option<ClosureMode>,
  plan: &BuildPlan,
) -> ScopeResult<()> {
  use serde_json::json;

  let output = json!({
      "base_dir": ctx.settings.base_dir,
      "outcome": outcome,
      "closure": closure,
      "plan": plan,
  });

  println!("{}", serde_json::to_string_pretty(&output)?);
  Ok(())
}

/// Display only package names (nothing for a whole-workspace build)
fn display_names_only(plan: &BuildPlan) {
  if let BuildPlan::Packages(packages) = plan {
    for name in packages {
      println!("{}", name);
    }
  }
}
