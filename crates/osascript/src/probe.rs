//! Probing candidate applications for "running" and "installed" signals.

use crate::error::Result;
use crate::quote::json_quote;
use crate::runner::{ScriptRunner, StdioOptions};
use crate::script::Script;
use futures::future::{join, join_all, try_join_all};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Both signals gathered for one candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Whether a process with exactly this name is running
    pub running: bool,

    /// Registered application id, absent when not installed or the query failed
    pub installed_id: Option<String>,
}

/// Ask System Events how many processes carry exactly `app_name`.
///
/// Returns true unless the trimmed count is literally `0`.
///
/// # Errors
///
/// Any invocation failure is returned unchanged.
pub async fn is_app_running<R>(runner: &R, app_name: &str) -> Result<bool>
where
    R: ScriptRunner + ?Sized,
{
    let statement = format!(
        "tell app \"System Events\" to count processes whose name is {}",
        json_quote(app_name)
    );
    let count = runner
        .exec(&Script::from(statement), &StdioOptions::default())
        .await?;
    Ok(count.trim() != "0")
}

/// Look up the registered id of `app_name`.
///
/// Failures of any kind mean "not installed" and yield `None`, as does an
/// empty answer.
pub async fn safe_id_of_app<R>(runner: &R, app_name: &str) -> Option<String>
where
    R: ScriptRunner + ?Sized,
{
    let statement = format!("id of app {}", json_quote(app_name));
    match runner
        .exec(&Script::from(statement), &StdioOptions::default())
        .await
    {
        Ok(id) => {
            let id = id.trim();
            (!id.is_empty()).then(|| id.to_string())
        }
        Err(e) => {
            debug!(app = app_name, error = %e, "no application id");
            None
        }
    }
}

/// Probe every candidate concurrently.
///
/// Both queries for all candidates are in flight at once. The returned
/// results are in input order and only available once every query resolved.
///
/// # Errors
///
/// The first failing running-state query. Id queries never fail.
pub async fn probe_all<R, S>(runner: &R, app_names: &[S]) -> Result<Vec<ProbeResult>>
where
    R: ScriptRunner + ?Sized,
    S: AsRef<str>,
{
    let running = try_join_all(
        app_names
            .iter()
            .map(|name| is_app_running(runner, name.as_ref())),
    );
    let ids = join_all(
        app_names
            .iter()
            .map(|name| safe_id_of_app(runner, name.as_ref())),
    );

    let (running, ids) = join(running, ids).await;

    Ok(running?
        .into_iter()
        .zip(ids)
        .map(|(running, installed_id)| ProbeResult {
            running,
            installed_id,
        })
        .collect())
}
