//! Scripted stand-in for the automation interpreter.

#![allow(dead_code)]

use async_trait::async_trait;
use osascript::{Completion, OsascriptError, Result, Script, ScriptRunner, StdioOptions};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Which entry point a recorded call went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Exec,
    Spawn,
}

#[derive(Debug, Clone)]
enum Reply {
    Output(String),
    Fail(String),
}

/// Answers `exec` calls from a table keyed by the first statement.
///
/// Unlisted running-state queries answer `0`; any other unlisted query fails
/// like `osascript` does for an unknown application. `spawn` always exits 0.
#[derive(Default)]
pub struct FakeRunner {
    replies: HashMap<String, Reply>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<(Mode, Vec<String>)>>,
}

pub fn running_query(app: &str) -> String {
    format!("tell app \"System Events\" to count processes whose name is \"{}\"", app)
}

pub fn id_query(app: &str) -> String {
    format!("id of app \"{}\"", app)
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, statement: impl Into<String>, output: &str) -> Self {
        self.replies
            .insert(statement.into(), Reply::Output(output.to_string()));
        self
    }

    pub fn fail(mut self, statement: impl Into<String>, stderr: &str) -> Self {
        self.replies
            .insert(statement.into(), Reply::Fail(stderr.to_string()));
        self
    }

    pub fn delay(mut self, statement: impl Into<String>, millis: u64) -> Self {
        self.delays
            .insert(statement.into(), Duration::from_millis(millis));
        self
    }

    /// `app` reports `count` matching processes.
    pub fn running(self, app: &str, count: &str) -> Self {
        self.reply(running_query(app), count)
    }

    /// `app` is installed under `id`.
    pub fn installed(self, app: &str, id: &str) -> Self {
        self.reply(id_query(app), &format!("{}\n", id))
    }

    pub fn calls(&self) -> Vec<(Mode, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn spawned(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|(mode, _)| *mode == Mode::Spawn)
            .map(|(_, statements)| statements)
            .collect()
    }

    pub fn executed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(mode, _)| *mode == Mode::Exec)
            .map(|(_, statements)| statements.join("\n"))
            .collect()
    }

    fn record(&self, mode: Mode, script: &Script) {
        self.calls
            .lock()
            .unwrap()
            .push((mode, script.statements().to_vec()));
    }
}

#[async_trait]
impl ScriptRunner for FakeRunner {
    async fn exec(&self, script: &Script, _options: &StdioOptions) -> Result<String> {
        self.record(Mode::Exec, script);
        let key = &script.statements()[0];

        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }

        match self.replies.get(key) {
            Some(Reply::Output(output)) => Ok(output.clone()),
            Some(Reply::Fail(stderr)) => Err(OsascriptError::ProcessFailure {
                code: Some(1),
                stdout: String::new(),
                stderr: stderr.clone(),
            }),
            None if key.starts_with("tell app \"System Events\" to count processes") => {
                Ok("0\n".to_string())
            }
            None => Err(OsascriptError::ProcessFailure {
                code: Some(1),
                stdout: String::new(),
                stderr: "execution error: Can't get application. (-1728)".to_string(),
            }),
        }
    }

    async fn spawn(&self, script: &Script, _options: &StdioOptions) -> Result<Completion> {
        self.record(Mode::Spawn, script);
        Ok(Completion {
            code: Some(0),
            ..Completion::default()
        })
    }
}
