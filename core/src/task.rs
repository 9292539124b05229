//! Async fetch hook: an operation plus the lifecycle state of its last run.
//!
//! # Design
//! The state slot is a `tokio::sync::watch` channel holding a `FetchState`.
//! `trigger` moves the slot to `Loading` synchronously and spawns the
//! operation; the spawned task writes `Succeeded` or `Failed` when it
//! resolves. Every trigger takes a new generation number under the channel's
//! write lock, and a resolution only lands if its generation is still the
//! current one. Superseded calls are not cancelled; their outcome is dropped.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::RequestError;

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;
type Operation<T, E> = dyn Fn() -> BoxFuture<Result<T, E>> + Send + Sync;

/// Lifecycle of one fetch hook.
///
/// `Loading` and `Failed` keep the value of the last successful run so
/// presentation code can keep showing it while refreshing or after an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T, E = RequestError> {
    Idle,
    Loading { previous: Option<T> },
    Succeeded(T),
    Failed { error: E, previous: Option<T> },
}

impl<T, E> Default for FetchState<T, E> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T, E> FetchState<T, E> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The most recent successful value, if any run has succeeded.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Idle => None,
            Self::Succeeded(value) => Some(value),
            Self::Loading { previous } | Self::Failed { previous, .. } => previous.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    fn into_value(self) -> Option<T> {
        match self {
            Self::Idle => None,
            Self::Succeeded(value) => Some(value),
            Self::Loading { previous } | Self::Failed { previous, .. } => previous,
        }
    }
}

/// A fetch hook bound to one operation.
///
/// Clones share the same state slot.
pub struct FetchTask<T, E = RequestError> {
    operation: Arc<Operation<T, E>>,
    state: Arc<watch::Sender<FetchState<T, E>>>,
    generation: Arc<AtomicU64>,
}

impl<T, E> Clone for FetchTask<T, E> {
    fn clone(&self) -> Self {
        Self {
            operation: Arc::clone(&self.operation),
            state: Arc::clone(&self.state),
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<T, E> std::fmt::Debug for FetchTask<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchTask")
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl<T, E> FetchTask<T, E>
where
    T: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Hook over a zero-argument operation.
    pub fn new<F, Fut>(operation: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let operation: Arc<Operation<T, E>> =
            Arc::new(move || -> BoxFuture<Result<T, E>> { Box::pin(operation()) });
        let (state, _) = watch::channel(FetchState::Idle);
        Self {
            operation,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Hook over a one-argument operation; `args` is fixed for the hook's
    /// lifetime and cloned into every run.
    pub fn with_args<A, F, Fut>(operation: F, args: A) -> Self
    where
        A: Clone + Send + Sync + 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::new(move || operation(args.clone()))
    }

    /// Start a run. The state is `Loading` by the time this returns; the
    /// returned handle completes once the outcome has been applied (or
    /// discarded as stale).
    pub fn trigger(&self) -> JoinHandle<()> {
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let previous = std::mem::take(state).into_value();
            *state = FetchState::Loading { previous };
        });

        let run = (self.operation)();
        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);

        tokio::spawn(async move {
            let outcome = match tokio::spawn(run).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(generation, error = %err, "fetch operation did not complete");
                    return;
                }
            };
            state.send_if_modified(|state| {
                if current.load(Ordering::SeqCst) != generation {
                    debug!(generation, "discarding superseded fetch result");
                    return false;
                }
                *state = match outcome {
                    Ok(value) => FetchState::Succeeded(value),
                    Err(error) => FetchState::Failed {
                        error,
                        previous: std::mem::take(state).into_value(),
                    },
                };
                true
            });
        })
    }

    /// Receiver notified after every state transition.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T, E>> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }
}

impl<T, E> FetchTask<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Consistent copy of the current state.
    pub fn snapshot(&self) -> FetchState<T, E> {
        self.state.borrow().clone()
    }

    pub fn value(&self) -> Option<T> {
        self.state.borrow().value().cloned()
    }

    pub fn error(&self) -> Option<E> {
        self.state.borrow().error().cloned()
    }

    /// Trigger and wait for this run's outcome to be applied. Returns the
    /// resulting state, which belongs to a newer run if one superseded it.
    pub async fn run(&self) -> FetchState<T, E> {
        // A panicking operation is logged by the run itself and leaves the
        // slot in Loading until the next trigger.
        if let Err(err) = self.trigger().await {
            warn!(error = %err, "fetch run did not complete");
        }
        self.snapshot()
    }
}
