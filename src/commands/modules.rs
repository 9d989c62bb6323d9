//! `cargo scm-updates modules` - Show the module index in scan order

use crate::core::context::WorkspaceContext;
use crate::core::error::ScopeResult;
use crate::host::BuildHost;
use crate::host::BuildRequest;
use crate::scope::loader::marker_path;

/// Run the modules command
pub fn run_modules(ctx: &WorkspaceContext, json: bool) -> ScopeResult<()> {
  let host = ctx.host(BuildRequest::default());
  let top_key = &host.top_level().key;

  if json {
    let modules: Vec<_> = host
      .modules()
      .iter()
      .map(|m| {
        serde_json::json!({
            "key": m.key,
            "directory": m.directory,
            "manifest_path": m.manifest_path,
            "top_level": &m.key == top_key,
        })
      })
      .collect();

    let output = serde_json::json!({
        "base_dir": ctx.settings.base_dir,
        "marker": marker_path(&ctx.settings.base_dir),
        "modules": modules,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    return Ok(());
  }

  println!("Modules (scan order)");
  println!("====================");
  for module in host.modules() {
    let marker = if &module.key == top_key { " (top-level)" } else { "" };
    println!("  {}{}  {}", module.key, marker, module.directory.display());
  }
  println!();
  println!("Marker file: {}", marker_path(&ctx.settings.base_dir).display());

  Ok(())
}
