//! Command-line interface for controlling macOS applications.
//!
//! Every subcommand maps onto one operation of the `osascript` library, so
//! scripts and shells can probe, pick and drive applications the same way the
//! library does.

use clap::{Parser, Subcommand};
use osascript::{AppController, Completion, Osascript, Script, ScriptRunner, StdioOptions};
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use tracing::warn;

#[derive(Parser)]
#[command(name = "osactl")]
#[command(version, about = "Control macOS applications through osascript", long_about = None)]
struct Cli {
    /// Automation interpreter to launch
    #[arg(long, global = true, env = "OSASCRIPT_BIN", default_value = "osascript")]
    interpreter: PathBuf,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run statements and print their output
    Exec {
        /// Statements, executed in order
        #[arg(required = true)]
        statements: Vec<String>,
    },

    /// Run statements attached to this terminal and report the exit status
    Spawn {
        /// Statements, executed in order
        #[arg(required = true)]
        statements: Vec<String>,

        /// Capture stdout and stderr instead of inheriting them
        #[arg(long)]
        pipe: bool,
    },

    /// Check whether an application is running
    Running {
        /// Application name
        app: String,
    },

    /// Print the registered id of an application
    AppId {
        /// Application name
        app: String,
    },

    /// Pick the first running, else the first installed, application
    Choose {
        /// Candidate application names, highest priority first
        apps: Vec<String>,
    },

    /// Pick an editor application
    ChooseEditor {
        /// Preferred editor, used if installed
        #[arg(long)]
        editor: Option<String>,
    },

    /// Pick a terminal emulator
    ChooseTerminal,

    /// Reveal a folder in Finder
    Reveal {
        /// Folder to open
        dir: PathBuf,

        /// Leave Finder in the background
        #[arg(long)]
        no_activate: bool,
    },

    /// Open a path with a specific application
    Open {
        /// Application name
        app: String,

        /// Path to open
        path: PathBuf,
    },

    /// Open a path in an editor
    Edit {
        /// Path to open
        path: PathBuf,

        /// Preferred editor, used if installed
        #[arg(long)]
        editor: Option<String>,
    },

    /// Open a terminal in a folder
    Terminal {
        /// Folder to change into
        dir: PathBuf,

        /// Open a new tab instead of a new window
        #[arg(long)]
        tab: bool,
    },
}

#[derive(Serialize)]
struct Selection {
    app: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Run one subcommand and return the process exit code.
async fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let runner = Osascript::with_program(cli.interpreter.as_os_str());
    let json = cli.json;

    match cli.command {
        Commands::Exec { statements } => handle_exec(&runner, statements, json).await,
        Commands::Spawn { statements, pipe } => handle_spawn(&runner, statements, pipe, json).await,
        Commands::Running { app } => {
            let running = osascript::is_app_running(&runner, &app).await?;
            print_value(json, &running, || running.to_string())?;
            Ok(if running { 0 } else { 1 })
        }
        Commands::AppId { app } => {
            let id = osascript::safe_id_of_app(&runner, &app).await;
            print_value(json, &id, || id.clone().unwrap_or_default())?;
            Ok(if id.is_some() { 0 } else { 1 })
        }
        Commands::Choose { apps } => {
            let app = osascript::choose_app(&runner, &apps).await?;
            print_selection(json, app)
        }
        Commands::ChooseEditor { editor } => {
            let control = controller(runner);
            let app = control.choose_editor_app(editor.as_deref()).await?;
            print_selection(json, app)
        }
        Commands::ChooseTerminal => {
            let app = controller(runner).choose_terminal_app().await?;
            print_selection(json, app)
        }
        Commands::Reveal { dir, no_activate } => {
            let completion = controller(runner)
                .open_finder_to_folder(&dir, !no_activate)
                .await?;
            print_completion(json, &completion)
        }
        Commands::Open { app, path } => {
            let completion = controller(runner).open_in_app(&app, &path).await?;
            print_completion(json, &completion)
        }
        Commands::Edit { path, editor } => {
            let completion = controller(runner)
                .open_in_editor(&path, editor.as_deref())
                .await?;
            print_completion(json, &completion)
        }
        Commands::Terminal { dir, tab } => {
            let completion = controller(runner)
                .open_folder_in_terminal_app(&dir, tab)
                .await?;
            print_completion(json, &completion)
        }
    }
}

fn controller(runner: Osascript) -> AppController<Osascript> {
    AppController::new(runner).with_warning_handler(|warning| warn!(%warning, "editor fallback"))
}

async fn handle_exec(
    runner: &Osascript,
    statements: Vec<String>,
    json: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    let script = Script::new(statements)?;
    let output = runner.exec(&script, &StdioOptions::default()).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", output);
    }
    Ok(0)
}

async fn handle_spawn(
    runner: &Osascript,
    statements: Vec<String>,
    pipe: bool,
    json: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    let script = Script::new(statements)?;
    let options = if pipe {
        StdioOptions::piped()
    } else {
        StdioOptions::default()
    };
    let completion = runner.spawn(&script, &options).await?;
    if !json {
        if let Some(stdout) = &completion.stdout {
            print!("{}", stdout);
        }
        if let Some(stderr) = &completion.stderr {
            eprint!("{}", stderr);
        }
    }
    print_completion(json, &completion)
}

fn print_value<T, F>(json: bool, value: &T, plain: F) -> Result<(), serde_json::Error>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", plain());
    }
    Ok(())
}

fn print_selection(json: bool, app: Option<String>) -> Result<i32, Box<dyn std::error::Error>> {
    let found = app.is_some();
    let selection = Selection { app };
    print_value(json, &selection, || {
        selection.app.clone().unwrap_or_default()
    })?;
    Ok(if found { 0 } else { 1 })
}

/// Interactive flows are best effort: the interpreter's exit code becomes ours.
fn print_completion(
    json: bool,
    completion: &Completion,
) -> Result<i32, Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(completion)?);
    } else if !completion.success() {
        match completion.signal {
            Some(signal) => eprintln!("osascript terminated by signal {}", signal),
            None => eprintln!("osascript exited with code {}", completion.code.unwrap_or(1)),
        }
    }
    Ok(completion.code.unwrap_or(1))
}
