//! Error types for cargo-scm-updates with contextual messages and exit codes
//!
//! Every fatal condition maps to one variant, one exit code, and (where there is
//! something the user can do about it) a help line printed under the error.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for cargo-scm-updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing marker file)
  User = 1,
  /// System error (cargo, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for cargo-scm-updates
#[derive(Debug)]
pub enum ScopeError {
  /// Configuration errors
  Config(ConfigError),

  /// Changed-file input errors
  Input(InputError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ScopeError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ScopeError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ScopeError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// Structured variants keep their type and exit code. The context is prefixed
  /// to plain messages and I/O errors.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ScopeError::Message { message, context, help } => ScopeError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ScopeError::Io(err) => ScopeError::Io(io::Error::new(err.kind(), format!("{}: {}", ctx_str, err))),
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ScopeError::Config(_) => ExitCode::User,
      ScopeError::Input(_) => ExitCode::User,
      ScopeError::Io(_) => ExitCode::System,
      ScopeError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ScopeError::Config(e) => e.help_message(),
      ScopeError::Input(e) => e.help_message(),
      ScopeError::Message { help, .. } => help.clone(),
      ScopeError::Io(_) => None,
    }
  }
}

impl fmt::Display for ScopeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ScopeError::Config(e) => write!(f, "{}", e),
      ScopeError::Input(e) => write!(f, "{}", e),
      ScopeError::Io(e) => write!(f, "I/O error: {}", e),
      ScopeError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ScopeError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ScopeError::Io(e) => Some(e),
      ScopeError::Input(InputError::Unavailable { source, .. }) => Some(source),
      _ => None,
    }
  }
}

impl From<io::Error> for ScopeError {
  fn from(err: io::Error) -> Self {
    ScopeError::Io(err)
  }
}

impl From<String> for ScopeError {
  fn from(msg: String) -> Self {
    ScopeError::message(msg)
  }
}

impl From<&str> for ScopeError {
  fn from(msg: &str) -> Self {
    ScopeError::message(msg)
  }
}

impl From<ConfigError> for ScopeError {
  fn from(err: ConfigError) -> Self {
    ScopeError::Config(err)
  }
}

impl From<InputError> for ScopeError {
  fn from(err: InputError) -> Self {
    ScopeError::Input(err)
  }
}

impl From<cargo_metadata::Error> for ScopeError {
  fn from(err: cargo_metadata::Error) -> Self {
    ScopeError::with_help(
      format!("Cargo metadata error: {}", err),
      "Run from inside a Cargo workspace, or check that `cargo metadata` succeeds there.",
    )
  }
}

impl From<serde_json::Error> for ScopeError {
  fn from(err: serde_json::Error) -> Self {
    ScopeError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Config file exists but could not be read or parsed
  Invalid { path: PathBuf, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Invalid { .. } => Some(
        "Supported keys are `enabled`, `ignore_root_module` and `base_dir`. Remove the file to fall back to defaults."
          .to_string(),
      ),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Invalid { path, reason } => {
        write!(f, "Invalid configuration in {}: {}", path.display(), reason)
      }
    }
  }
}

/// Changed-file input errors
#[derive(Debug)]
pub enum InputError {
  /// The marker file could not be read (missing, unreadable, not UTF-8)
  Unavailable { path: PathBuf, source: io::Error },
}

impl InputError {
  fn help_message(&self) -> Option<String> {
    match self {
      InputError::Unavailable { path, .. } => Some(format!(
        "Write the changed files to {} (one path per line, relative to that directory), \
         or run without `-D make.scmUpdates=true` for a full build.",
        path.display()
      )),
    }
  }
}

impl fmt::Display for InputError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      InputError::Unavailable { path, source } => {
        write!(
          f,
          "Failed to read saved list of updated files from {}: {}",
          path.display(),
          source
        )
      }
    }
  }
}

/// Result type alias for cargo-scm-updates
pub type ScopeResult<T> = Result<T, ScopeError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ScopeResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ScopeResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ScopeError>,
{
  fn context(self, ctx: impl Into<String>) -> ScopeResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ScopeResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ScopeError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
