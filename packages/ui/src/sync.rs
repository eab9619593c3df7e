//! Mapping server-function results onto write outcomes.

use dioxus::prelude::ServerFnError;
use store::WriteOutcome;

/// Classify the result of a remote mirror call.
///
/// A transport failure (the request never completed) is retryable: the
/// optimistic local state can stand until the next reload. Anything the
/// server itself rejected is fatal and should be rolled back.
pub fn outcome_of<T>(result: &Result<T, ServerFnError>) -> WriteOutcome {
    match result {
        Ok(_) => WriteOutcome::Success,
        Err(ServerFnError::Request(msg)) => WriteOutcome::RetryableFailure(msg.to_string()),
        Err(err) => WriteOutcome::FatalFailure(err.to_string()),
    }
}
