//! Integration tests for `cargo scm-updates modules`

use crate::helpers::{TestWorkspace, run_scm_updates};
use anyhow::Result;

#[test]
fn test_modules_lists_top_level_last() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_crate("lib-a", &[])?;
  ws.add_crate("lib-b", &["lib-a"])?;

  let output = run_scm_updates(&ws.path, &["modules", "--json"])?;
  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  let modules = json["modules"].as_array().expect("modules array");
  let keys: Vec<_> = modules.iter().map(|m| m["key"].as_str().unwrap_or_default()).collect();
  assert_eq!(keys, vec!["lib-a", "lib-b", "(workspace)"]);
  assert_eq!(modules[0]["top_level"], false);
  assert_eq!(modules[2]["top_level"], true);
  assert!(json["marker"].as_str().unwrap_or_default().ends_with(".scm-updates"));

  Ok(())
}

#[test]
fn test_modules_with_root_package() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_crate("lib-a", &[])?;
  ws.write_file(
    "Cargo.toml",
    r#"[package]
name = "app"
version = "0.1.0"
edition = "2021"

[dependencies]
lib-a = { path = "crates/lib-a" }

[workspace]
members = ["crates/*"]

[workspace.package]
edition = "2021"
license = "MIT"
authors = ["Test Author"]
"#,
  )?;
  ws.write_file("src/main.rs", "fn main() {}\n")?;

  let output = run_scm_updates(&ws.path, &["modules"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("app (top-level)"), "got: {}", stdout);
  assert!(stdout.contains("lib-a"), "got: {}", stdout);

  Ok(())
}
