//! Integration tests for `cargo scm-updates plan`

use crate::helpers::{TestWorkspace, planned_json, planned_names, run_scm_updates, run_scm_updates_raw};
use anyhow::Result;

/// lib-a <- lib-b, plus an unrelated lib-c
fn workspace() -> Result<TestWorkspace> {
  let ws = TestWorkspace::new()?;
  ws.add_crate("lib-a", &[])?;
  ws.add_crate("lib-b", &["lib-a"])?;
  ws.add_crate("lib-c", &[])?;
  Ok(ws)
}

#[test]
fn test_disabled_leaves_plan_untouched() -> Result<()> {
  let ws = workspace()?;
  // No marker on disk: disabled runs never read it
  let output = run_scm_updates(&ws.path, &["plan"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("disabled"), "got: {}", stdout);
  assert!(stdout.contains("entire workspace"), "got: {}", stdout);

  let names = planned_names(&ws.path, &["-p", "lib-c"])?;
  assert_eq!(names, vec!["lib-c"]);

  Ok(())
}

#[test]
fn test_changed_crate_selects_it_and_dependents() -> Result<()> {
  let ws = workspace()?;
  ws.record_changes(&["crates/lib-a/src/lib.rs"])?;

  let names = planned_names(&ws.path, &["--enable"])?;
  assert_eq!(names, vec!["lib-a", "lib-b"]);

  Ok(())
}

#[test]
fn test_property_enables_selection() -> Result<()> {
  let ws = workspace()?;
  ws.record_changes(&["crates/lib-c/Cargo.toml", "crates/lib-c/src/lib.rs"])?;

  let names = planned_names(&ws.path, &["-D", "make.scmUpdates=true"])?;
  assert_eq!(names, vec!["lib-c"]);

  Ok(())
}

#[test]
fn test_missing_marker_fails() -> Result<()> {
  let ws = workspace()?;

  let output = run_scm_updates_raw(&ws.path, &["--enable", "plan"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains(".scm-updates"), "got: {}", stderr);
  assert!(String::from_utf8_lossy(&output.stdout).is_empty());

  Ok(())
}

#[test]
fn test_empty_marker_keeps_existing_selection() -> Result<()> {
  let ws = workspace()?;
  ws.record_changes(&[])?;

  let names = planned_names(&ws.path, &["--enable", "-p", "lib-c"])?;
  assert_eq!(names, vec!["lib-c"]);

  let json = planned_json(&ws.path, &["--enable"])?;
  assert_eq!(json["outcome"]["status"], "no-changes");
  assert_eq!(json["outcome"]["changed_files"], 0);
  assert_eq!(json["plan"]["scope"], "workspace");

  Ok(())
}

#[test]
fn test_root_manifest_change_builds_workspace() -> Result<()> {
  let ws = workspace()?;
  ws.record_changes(&["Cargo.toml"])?;

  let json = planned_json(&ws.path, &["--enable"])?;
  assert_eq!(json["outcome"]["status"], "selected");
  assert_eq!(json["outcome"]["modules"], serde_json::json!(["(workspace)"]));
  assert_eq!(json["closure"], "downstream");
  assert_eq!(json["plan"]["scope"], "workspace");

  Ok(())
}

#[test]
fn test_ignore_root_manifest() -> Result<()> {
  let ws = workspace()?;
  ws.record_changes(&["Cargo.toml"])?;

  let json = planned_json(&ws.path, &["--enable", "--ignore-root-manifest"])?;
  assert_eq!(json["outcome"]["status"], "no-changes");

  // Same thing through the property
  let json = planned_json(&ws.path, &["--enable", "-D", "make.ignoreRootManifest=true"])?;
  assert_eq!(json["outcome"]["status"], "no-changes");

  Ok(())
}

#[test]
fn test_untracked_subdirectory_does_not_trigger_full_build() -> Result<()> {
  let ws = workspace()?;
  ws.record_changes(&["docs/guide/intro.md", "crates/lib-c/README.md"])?;

  let names = planned_names(&ws.path, &["--enable"])?;
  assert_eq!(names, vec!["lib-c"]);

  ws.record_changes(&["docs/guide/intro.md"])?;
  let json = planned_json(&ws.path, &["--enable"])?;
  assert_eq!(json["outcome"]["status"], "no-changes");
  assert_eq!(json["outcome"]["suppressed"].as_array().map(|a| a.len()), Some(1));
  assert_eq!(json["plan"]["scope"], "workspace");

  Ok(())
}

#[test]
fn test_similar_directory_name_does_not_match() -> Result<()> {
  let ws = workspace()?;
  ws.record_changes(&["crates/lib-ab/file.txt"])?;

  let json = planned_json(&ws.path, &["--enable"])?;
  assert_eq!(json["outcome"]["status"], "no-changes");

  Ok(())
}

#[test]
fn test_also_make_widens_to_both_directions() -> Result<()> {
  let ws = workspace()?;
  ws.record_changes(&["crates/lib-b/src/lib.rs"])?;

  let json = planned_json(&ws.path, &["--enable", "--also-make"])?;
  assert_eq!(json["closure"], "both");
  assert_eq!(json["plan"]["packages"], serde_json::json!(["lib-a", "lib-b"]));

  Ok(())
}

#[test]
fn test_changed_selection_replaces_explicit_packages() -> Result<()> {
  let ws = workspace()?;
  ws.record_changes(&["crates/lib-b/src/lib.rs"])?;

  let names = planned_names(&ws.path, &["--enable", "-p", "lib-c"])?;
  assert_eq!(names, vec!["lib-b"]);

  Ok(())
}

#[test]
fn test_plan_is_stable() -> Result<()> {
  let ws = workspace()?;
  ws.record_changes(&["crates/lib-c/src/lib.rs", "crates/lib-a/src/lib.rs", "crates/lib-a/Cargo.toml"])?;

  let first = planned_json(&ws.path, &["--enable"])?;
  let second = planned_json(&ws.path, &["--enable"])?;
  assert_eq!(first, second);
  assert_eq!(first["outcome"]["modules"], serde_json::json!(["lib-a", "lib-c"]));

  Ok(())
}

#[test]
fn test_unknown_format() -> Result<()> {
  let ws = workspace()?;
  let output = run_scm_updates_raw(&ws.path, &["plan", "--format", "yaml"])?;
  assert!(!output.status.success());
  Ok(())
}
