//! Control scripts for Finder, editors and terminal emulators.

use crate::error::{OsascriptError, Result};
use crate::probe::safe_id_of_app;
use crate::quote::{inspect_quote, json_quote, resolve_path};
use crate::runner::{Completion, ScriptRunner, StdioOptions};
use crate::script::Script;
use crate::select::choose_app;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Editors tried when no preferred editor is usable, highest priority first.
///
/// The repeated entry is intentional: first-match semantics make it harmless.
pub const DEFAULT_EDITORS: &[&str] = &[
    "Visual Studio Code",
    "Atom",
    "Sublime Text",
    "TextMate",
    "TextWrangler",
    "Visual Studio Code",
    "Brackets",
    "SubEthaEdit",
    "BBEdit",
    "Textastic",
    "UltraEdit",
    "MacVim",
    "CodeRunner 2",
    "CodeRunner",
    "TextEdit",
];

/// Terminal emulators tried in order.
pub const DEFAULT_TERMINALS: &[&str] = &["iTerm 3", "iTerm 2", "iTerm", "HyperTerm", "Terminal"];

/// Terminal name that gets the iTerm session script.
const ITERM: &str = "iTerm";

/// Candidate lists used by the selection-based operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLists {
    pub editors: Vec<String>,
    pub terminals: Vec<String>,
}

impl Default for AppLists {
    fn default() -> Self {
        Self {
            editors: DEFAULT_EDITORS.iter().map(|s| s.to_string()).collect(),
            terminals: DEFAULT_TERMINALS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Non-fatal conditions reported while choosing an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorWarning {
    /// The preferred editor has no application id on this machine.
    PreferredNotInstalled(String),
}

impl fmt::Display for EditorWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorWarning::PreferredNotInstalled(name) => write!(
                f,
                "Your preferred editor ({}) isn't installed on this computer.",
                name
            ),
        }
    }
}

/// Receives warnings instead of them going to a global console.
pub type WarningHandler = Box<dyn Fn(&EditorWarning) + Send + Sync>;

/// Builds and runs control scripts against a [`ScriptRunner`].
///
/// Each operation builds one script and runs it once. Nothing is retried and
/// no state is kept between calls.
pub struct AppController<R> {
    runner: R,
    lists: AppLists,
    on_warning: WarningHandler,
}

impl<R: ScriptRunner> AppController<R> {
    /// Controller with the default candidate lists; warnings go to `tracing`.
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            lists: AppLists::default(),
            on_warning: Box::new(|warning: &EditorWarning| warn!("{}", warning)),
        }
    }

    pub fn with_lists(mut self, lists: AppLists) -> Self {
        self.lists = lists;
        self
    }

    pub fn with_warning_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EditorWarning) + Send + Sync + 'static,
    {
        self.on_warning = Box::new(handler);
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn lists(&self) -> &AppLists {
        &self.lists
    }

    /// Open `dir` in Finder, bringing Finder to the front unless `activate`
    /// is false.
    pub async fn open_finder_to_folder(&self, dir: &Path, activate: bool) -> Result<Completion> {
        let script = Script::new([
            "tell application \"Finder\"".to_string(),
            format!("open POSIX file {}", json_quote(&dir.to_string_lossy())),
            if activate { "activate" } else { "" }.to_string(),
            "end tell".to_string(),
        ])?;
        self.spawn(&script).await
    }

    /// Tell `app_name` to open the absolute form of `path`.
    pub async fn open_in_app(&self, app_name: &str, path: &Path) -> Result<Completion> {
        let resolved = resolve_path(path)?;
        let statement = format!(
            "tell app {} to open {}",
            json_quote(app_name),
            json_quote(&resolved.to_string_lossy())
        );
        self.spawn(&Script::from(statement)).await
    }

    /// Choose an editor application.
    ///
    /// An installed `preferred` editor is returned without probing the
    /// editor list. A preferred editor that is not installed is reported to
    /// the warning handler and the list is searched instead.
    ///
    /// # Errors
    ///
    /// Propagates a failing running-state query from the list search.
    pub async fn choose_editor_app(&self, preferred: Option<&str>) -> Result<Option<String>> {
        if let Some(preferred) = preferred.filter(|name| !name.is_empty()) {
            if safe_id_of_app(&self.runner, preferred).await.is_some() {
                return Ok(Some(preferred.to_string()));
            }
            (self.on_warning)(&EditorWarning::PreferredNotInstalled(preferred.to_string()));
        }
        choose_app(&self.runner, &self.lists.editors).await
    }

    /// Choose a terminal emulator. `None` means none was found; callers fall
    /// back to Terminal.
    pub async fn choose_terminal_app(&self) -> Result<Option<String>> {
        choose_app(&self.runner, &self.lists.terminals).await
    }

    /// Open `path` in the chosen editor.
    ///
    /// # Errors
    ///
    /// [`OsascriptError::NoEditorFound`] when no editor is running or installed.
    pub async fn open_in_editor(&self, path: &Path, preferred: Option<&str>) -> Result<Completion> {
        let app_name = self
            .choose_editor_app(preferred)
            .await?
            .ok_or(OsascriptError::NoEditorFound)?;
        info!("Will open in {} -- {}", app_name, path.display());
        self.open_in_app(&app_name, path).await
    }

    /// Open a new iTerm terminal with a session that changes into `dir`.
    pub async fn open_iterm_to_folder(&self, dir: &Path) -> Result<Completion> {
        let script = Script::new([
            "tell application \"iTerm\"".to_string(),
            "make new terminal".to_string(),
            "tell the first terminal".to_string(),
            "activate current session".to_string(),
            "launch session \"Default Session\"".to_string(),
            "tell the last session".to_string(),
            format!("write text \"{}\"", cd_command(dir)),
            "end tell".to_string(),
            "end tell".to_string(),
            "end tell".to_string(),
        ])?;
        self.spawn(&script).await
    }

    /// Change into `dir` in Terminal, in a new tab of the front window when
    /// `in_tab` is set and in a new window otherwise.
    pub async fn open_terminal_to_folder(&self, dir: &Path, in_tab: bool) -> Result<Completion> {
        let cd = cd_command(dir);
        let script = if in_tab {
            Script::new([
                "tell application \"terminal\"".to_string(),
                "tell application \"System Events\" to tell process \"terminal\" to keystroke \"t\" using command down".to_string(),
                format!("do script with command \"{}\" in selected tab of the front window", cd),
                "end tell".to_string(),
            ])?
        } else {
            Script::new([
                "tell application \"terminal\"".to_string(),
                format!("do script \"{}\"", cd),
                "end tell".to_string(),
                "tell application \"terminal\" to activate".to_string(),
            ])?
        };
        self.spawn(&script).await
    }

    /// Open `dir` in whichever terminal emulator [`choose_terminal_app`]
    /// picks. Only an exact `iTerm` match uses the iTerm script.
    ///
    /// [`choose_terminal_app`]: AppController::choose_terminal_app
    pub async fn open_folder_in_terminal_app(
        &self,
        dir: &Path,
        in_tab: bool,
    ) -> Result<Completion> {
        let program = self.choose_terminal_app().await?;
        debug!(terminal = ?program, "chose terminal");
        match program.as_deref() {
            Some(ITERM) => self.open_iterm_to_folder(dir).await,
            _ => self.open_terminal_to_folder(dir, in_tab).await,
        }
    }

    async fn spawn(&self, script: &Script) -> Result<Completion> {
        self.runner.spawn(script, &StdioOptions::default()).await
    }
}

/// `cd <dir> && clear` with the directory in inspection quoting.
fn cd_command(dir: &Path) -> String {
    format!("cd {} && clear", inspect_quote(&dir.to_string_lossy()))
}
