use scout_core::{Capability, ScoutError};

/// Join a collection of tasks and apply an optional request-level deadline.
///
/// This wraps `futures::future::join_all(tasks)` with
/// `crate::core::with_request_deadline`. On timeout it returns
/// `ScoutError::RequestTimeout` for the given capability.
///
/// # Errors
/// Returns [`ScoutError::RequestTimeout`] when the deadline elapses before
/// every task finishes.
pub async fn join_with_deadline<I, F, T>(
    tasks: I,
    deadline: Option<std::time::Duration>,
    capability: Capability,
) -> Result<Vec<T>, ScoutError>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = T>,
{
    crate::core::with_request_deadline(deadline, capability, futures::future::join_all(tasks)).await
}

/// Collapse a set of engine errors into a uniform `ScoutError` outcome.
///
/// Rules:
/// - If `attempted_any` is false → `NoProviderAvailable(capability)`.
/// - If all errors are `Timeout` → `AllEnginesTimedOut(capability)`.
/// - If `not_found_what` is `Some` and all errors are `NotFound` → `NotFound(what)`.
/// - Else → `AllEnginesFailed(errors)`.
#[must_use]
pub fn collapse_errors(
    capability: Capability,
    attempted_any: bool,
    errors: Vec<ScoutError>,
    not_found_what: Option<String>,
) -> ScoutError {
    if !attempted_any {
        return ScoutError::no_provider(capability);
    }
    if !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, ScoutError::Timeout { .. }))
    {
        return ScoutError::AllEnginesTimedOut {
            capability: capability.to_string(),
        };
    }
    if let Some(what) = not_found_what
        && !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, ScoutError::NotFound { .. }))
    {
        return ScoutError::not_found(what);
    }
    ScoutError::AllEnginesFailed(errors)
}
