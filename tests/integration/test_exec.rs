//! Integration tests for `cargo scm-updates exec`

use crate::helpers::{TestWorkspace, run_scm_updates};
use anyhow::Result;

#[test]
fn test_exec_dry_run_with_selection() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_crate("lib-a", &[])?;
  ws.add_crate("lib-b", &["lib-a"])?;
  ws.record_changes(&["crates/lib-a/src/lib.rs"])?;

  let output = run_scm_updates(&ws.path, &["--enable", "exec", "--dry-run", "check", "--", "--all-targets"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(
    stdout.contains("cargo check -p lib-a -p lib-b --all-targets"),
    "got: {}",
    stdout
  );

  Ok(())
}

#[test]
fn test_exec_dry_run_without_changes_builds_workspace() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_crate("lib-a", &[])?;
  ws.record_changes(&["README.md"])?;
  ws.write_file("README.md", "# readme\n")?;

  // README.md sits directly in the root, so the top-level module is selected
  let output = run_scm_updates(&ws.path, &["--enable", "exec", "--dry-run", "build"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("cargo build --workspace"), "got: {}", stdout);

  let output = run_scm_updates(&ws.path, &["exec", "--dry-run", "test"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("cargo test --workspace"), "got: {}", stdout);

  Ok(())
}

#[test]
fn test_exec_runs_cargo_on_selected_package() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_crate("lib-a", &[])?;
  ws.add_crate("lib-b", &[])?;
  ws.record_changes(&["crates/lib-b/src/lib.rs"])?;

  let output = run_scm_updates(&ws.path, &["--enable", "exec", "check"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Executing: cargo check -p lib-b"), "got: {}", stdout);
  assert!(stdout.contains("Completed successfully"), "got: {}", stdout);

  Ok(())
}
