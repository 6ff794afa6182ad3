use crate::error::{IllustraError, Result};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Runs `work` until it finishes or `token` fires, whichever comes first.
///
/// An already-signaled token short-circuits before `work` is polled, so no
/// request is ever sent. On cancellation `work` is dropped, which aborts any
/// in-flight reqwest call and closes its connection. The `cancelled()`
/// observer only lives for the duration of the select.
pub async fn cancellable<F, T>(token: &CancellationToken, work: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    if token.is_cancelled() {
        return Err(IllustraError::Cancelled);
    }

    tokio::select! {
        biased;
        _ = token.cancelled() => Err(IllustraError::Cancelled),
        result = work => result,
    }
}
