//! Single-shot asynchronous call handles.
//!
//! A [`Call`] wraps one in-flight request. It resolves exactly once with a
//! success or a failure. An observer registered with [`Call::subscribe`] is
//! invoked at most once, and never after [`Subscription::unsubscribe`] has been
//! called.

use std::future::Future;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::ApiResult;

/// Handle to a spawned single-shot request.
pub struct Call<T> {
    rx: oneshot::Receiver<ApiResult<T>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Call<T> {
    /// Spawns `future` on the current tokio runtime.
    ///
    /// Cancelling the handle drops the future at its next suspension point, so
    /// a pending network request is abandoned rather than awaited.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ApiResult<T>> + Send + 'static,
    {
        Self::with_token(CancellationToken::new(), future)
    }

    /// Like [`Call::spawn`], cancelled together with `cancel`.
    ///
    /// Pass a child token to cancel a group of calls at once.
    pub fn with_token<F>(cancel: CancellationToken, future: F) -> Self
    where
        F: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!("Call cancelled before resolution");
                }
                result = future => {
                    if !token.is_cancelled() {
                        let _ = tx.send(result);
                    }
                }
            }
        });

        Self { rx, cancel, task }
    }

    /// Cancels the call. No result is delivered afterwards.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// True once the call was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Waits for the single outcome.
    ///
    /// Returns `None` if the call was cancelled first.
    pub async fn outcome(self) -> Option<ApiResult<T>> {
        let Self { rx, cancel, task } = self;
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = rx => result.ok(),
        };
        if result.is_none() {
            task.abort();
        }
        result.filter(|_| !cancel.is_cancelled())
    }

    /// Registers the one observer for this call.
    ///
    /// The observer runs on the runtime once the call resolves, unless the
    /// returned [`Subscription`] is unsubscribed first.
    pub fn subscribe<O>(self, observer: O) -> Subscription
    where
        O: FnOnce(ApiResult<T>) + Send + 'static,
    {
        let cancel = self.cancel.clone();
        let watcher = tokio::spawn(async move {
            if let Some(result) = self.outcome().await {
                observer(result);
            }
        });
        Subscription {
            cancel,
            _watcher: watcher,
        }
    }
}

/// Active observer registration returned by [`Call::subscribe`].
///
/// Dropping a subscription does not cancel it; call
/// [`Subscription::unsubscribe`] explicitly.
pub struct Subscription {
    cancel: CancellationToken,
    _watcher: JoinHandle<()>,
}

impl Subscription {
    /// Stops delivery. If the call has not resolved yet, the observer is
    /// never invoked.
    pub fn unsubscribe(&self) {
        self.cancel.cancel();
    }

    pub fn is_unsubscribed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
