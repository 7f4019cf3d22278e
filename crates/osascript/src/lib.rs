//! # osascript
//!
//! Control macOS applications through the `osascript` automation interpreter.
//!
//! The interpreter is treated as an opaque subprocess: scripts go in as a
//! sequence of statements (each passed after its own `-e` flag), text or an
//! exit status comes out. On top of that this crate provides:
//!
//! - Probing whether an application is running or installed
//! - Ordered fallback selection among candidate applications, with all probes
//!   issued concurrently
//! - Ready-made control scripts for Finder, editors and terminal emulators
//!
//! ## Example
//!
//! ```rust,no_run
//! use osascript::{AppController, Osascript};
//! use std::path::Path;
//!
//! # async fn run() -> osascript::Result<()> {
//! let control = AppController::new(Osascript::new())
//!     .with_warning_handler(|warning| eprintln!("{}", warning));
//!
//! // Open a file in the editor the user is most likely using
//! control.open_in_editor(Path::new("src/main.rs"), Some("Sublime Text")).await?;
//!
//! // Open a terminal in the project directory
//! control.open_folder_in_terminal_app(Path::new("."), false).await?;
//! # Ok(())
//! # }
//! ```

pub mod apps;
pub mod error;
pub mod probe;
pub mod quote;
pub mod runner;
pub mod script;
pub mod select;

// Re-export main types
pub use apps::{AppController, AppLists, EditorWarning, DEFAULT_EDITORS, DEFAULT_TERMINALS};
pub use error::{OsascriptError, Result};
pub use probe::{is_app_running, probe_all, safe_id_of_app, ProbeResult};
pub use runner::{Completion, Osascript, ScriptRunner, StdioMode, StdioOptions};
pub use script::{osascript_args, Script};
pub use select::{choose_app, select_candidate};

/// Run `script` in capturing mode and return its standard output.
///
/// The interpreter is taken from `OSASCRIPT_BIN` when set.
///
/// # Errors
///
/// Returns an error if the interpreter cannot be launched or exits nonzero.
pub async fn exec(script: impl Into<Script>, options: &StdioOptions) -> Result<String> {
    Osascript::from_env().exec(&script.into(), options).await
}

/// Run `script` in interactive mode and return its completion descriptor.
///
/// The interpreter is taken from `OSASCRIPT_BIN` when set.
///
/// # Errors
///
/// Returns an error only if the interpreter cannot be launched.
pub async fn spawn(script: impl Into<Script>, options: &StdioOptions) -> Result<Completion> {
    Osascript::from_env().spawn(&script.into(), options).await
}
