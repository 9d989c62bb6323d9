//! Integration tests for configuration files and overrides

use crate::helpers::{TestWorkspace, planned_json, planned_names, run_scm_updates_raw};
use anyhow::Result;

#[test]
fn test_config_file_enables_selection() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_crate("lib-a", &[])?;
  ws.add_crate("lib-b", &[])?;
  ws.write_file("scm-updates.toml", "enabled = true\n")?;
  ws.record_changes(&["crates/lib-b/src/lib.rs"])?;

  assert_eq!(planned_names(&ws.path, &[])?, vec!["lib-b"]);

  // Properties win over the file
  let json = planned_json(&ws.path, &["-D", "make.scmUpdates=false"])?;
  assert_eq!(json["outcome"]["status"], "disabled");

  Ok(())
}

#[test]
fn test_base_dir_from_config_file() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_crate("lib-a", &[])?;
  ws.write_file(".config/scm-updates.toml", "enabled = true\nbase_dir = \"crates\"\n")?;
  // Paths are relative to the base directory, and the marker lives there
  ws.write_file("crates/.scm-updates", "lib-a/src/lib.rs\n")?;

  // The root guard is off because the base directory is not the top-level
  // directory, but a member file still selects only its member.
  let json = planned_json(&ws.path, &[])?;
  assert_eq!(json["outcome"]["status"], "selected");
  assert_eq!(json["outcome"]["modules"], serde_json::json!(["lib-a"]));
  assert_eq!(json["plan"]["packages"], serde_json::json!(["lib-a"]));
  assert!(json["base_dir"].as_str().unwrap_or_default().ends_with("crates"));

  Ok(())
}

#[test]
fn test_base_dir_flag_outside_top_level_disables_root_guard() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_crate("lib-a", &[])?;
  ws.write_file("docs/.scm-updates", "../scripts/deep/tool.sh\n")?;

  // Base dir is not the top-level directory, so the guard does not apply and
  // a deep file under the workspace root selects the top-level module.
  let json = planned_json(&ws.path, &["--enable", "--base-dir", "docs"])?;
  assert_eq!(json["outcome"]["modules"], serde_json::json!(["(workspace)"]));
  assert_eq!(json["plan"]["scope"], "workspace");

  Ok(())
}

#[test]
fn test_malformed_config_fails() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_crate("lib-a", &[])?;
  ws.write_file("scm-updates.toml", "enabled = [\n")?;

  let output = run_scm_updates_raw(&ws.path, &["plan"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("scm-updates.toml"));

  Ok(())
}
