//! Ordered fallback selection among candidate applications.

use crate::error::Result;
use crate::probe::{probe_all, ProbeResult};
use crate::runner::ScriptRunner;

/// Pick a candidate from fully resolved probe results.
///
/// The first running candidate wins; failing that, the first installed one.
/// List order is the only tie-break. `results[i]` belongs to `app_names[i]`.
pub fn select_candidate<'a, S>(app_names: &'a [S], results: &[ProbeResult]) -> Option<&'a str>
where
    S: AsRef<str>,
{
    let paired = || app_names.iter().zip(results);

    paired()
        .find(|(_, probe)| probe.running)
        .or_else(|| paired().find(|(_, probe)| probe.installed_id.is_some()))
        .map(|(name, _)| name.as_ref())
}

/// Probe all candidates concurrently and select one.
///
/// An empty list, or one where nothing is running or installed, yields
/// `Ok(None)`. Duplicate names are kept as given.
///
/// # Errors
///
/// Propagates a failing running-state query.
pub async fn choose_app<R, S>(runner: &R, app_names: &[S]) -> Result<Option<String>>
where
    R: ScriptRunner + ?Sized,
    S: AsRef<str>,
{
    let results = probe_all(runner, app_names).await?;
    Ok(select_candidate(app_names, &results).map(str::to_string))
}
