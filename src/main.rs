mod cargo;
mod commands;
mod core;
mod graph;
mod host;
mod logging;
mod scope;
mod utils;

use clap::{Args, Parser, Subcommand};
use core::config::{ConfigOverrides, parse_property};
use core::error::{ResultExt, ScopeError, print_error};
use host::{BuildRequest, ClosureMode};
use std::path::PathBuf;

/// Build only the workspace packages touched by recorded changes
#[derive(Parser)]
#[command(name = "cargo")]
#[command(bin_name = "cargo")]
#[command(styles = get_styles())]
enum CargoCli {
  ScmUpdates(ScmUpdatesCli),
}

#[derive(Parser)]
#[command(name = "scm-updates")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct ScmUpdatesCli {
  #[command(flatten)]
  session: SessionArgs,

  #[command(subcommand)]
  command: Commands,
}

/// Options shared by every command
#[derive(Args)]
struct SessionArgs {
  /// Set a property: make.scmUpdates, make.ignoreRootManifest (or make.ignoreRootPom), make.baseDir (KEY alone means KEY=true)
  #[arg(short = 'D', long = "define", value_name = "KEY[=VALUE]", value_parser = parse_property, global = true)]
  properties: Vec<(String, String)>,

  /// Restrict the build to changed packages (same as -D make.scmUpdates=true)
  #[arg(long, global = true)]
  enable: bool,

  /// Never rebuild everything because the root Cargo.toml changed
  #[arg(long, global = true)]
  ignore_root_manifest: bool,

  /// Directory holding .scm-updates (default: workspace root)
  #[arg(long, value_name = "DIR", global = true)]
  base_dir: Option<PathBuf>,

  /// Package to build (repeatable); replaced by the changed packages when selection applies
  #[arg(short, long = "package", value_name = "SPEC", global = true)]
  packages: Vec<String>,

  /// Also build the dependencies of the selected packages
  #[arg(long, global = true)]
  also_make: bool,

  /// Also build the packages depending on the selected packages
  #[arg(long, global = true)]
  also_make_dependents: bool,

  /// Increase log verbosity (-v info, -vv debug)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  verbose: u8,
}

impl SessionArgs {
  fn overrides(&self) -> ConfigOverrides {
    ConfigOverrides {
      properties: self.properties.clone(),
      enable: self.enable,
      ignore_root_manifest: self.ignore_root_manifest,
      base_dir: self.base_dir.clone(),
    }
  }

  fn request(&self) -> BuildRequest {
    BuildRequest {
      selected: self.packages.clone(),
      closure: ClosureMode::from_flags(self.also_make, self.also_make_dependents),
    }
  }
}

#[derive(Subcommand)]
enum Commands {
  /// Show which packages a build would be restricted to
  Plan {
    /// Output format: text (default), json, names-only
    #[arg(long, default_value = "text")]
    format: String,
  },

  /// Run a cargo command on the selected packages
  Exec {
    /// Cargo subcommand to run (build, test, check, ...)
    subcommand: String,
    /// Show the command without executing it
    #[arg(long)]
    dry_run: bool,
    /// Additional arguments to pass to cargo
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    cargo_args: Vec<String>,
  },

  /// Show the modules changed files are matched against
  Modules {
    /// Output in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let CargoCli::ScmUpdates(cli) = CargoCli::parse();

  logging::init(cli.session.verbose);

  let cwd = match std::env::current_dir().context("Failed to get current directory") {
    Ok(dir) => dir,
    Err(e) => handle_error(e),
  };

  // Settings and the module graph are loaded once, before anything runs
  let ctx = match core::context::WorkspaceContext::build(&cwd, &cli.session.overrides(), &cwd) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let request = cli.session.request();

  let result = match cli.command {
    Commands::Plan { format } => commands::run_plan(&ctx, request, format),
    Commands::Exec {
      subcommand,
      dry_run,
      cargo_args,
    } => commands::run_exec(&ctx, request, subcommand, dry_run, cargo_args),
    Commands::Modules { json } => commands::run_modules(&ctx, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ScopeError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
