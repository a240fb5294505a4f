//! Generic request-lifecycle controller.
//!
//! # Design
//! A `FetchController<I, O>` wraps one async call `I -> Result<O, TransportError>`
//! and publishes its lifecycle (`Idle -> Loading -> Success | Failed`) through a
//! `tokio::sync::watch` channel. Screens own controllers and hand plain
//! `FetchState` snapshots to the host.
//!
//! Failures never escape: the transport error is logged and replaced with a
//! fixed, operation-specific message.
//!
//! Overlapping `run` calls on one instance are not serialized; whichever
//! resolves last wins. Results are only dropped when interest is withdrawn:
//! `rearm` invalidates every request started before it, `dispose` invalidates
//! everything for good.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::TransportError;

type Call<I, O> = Arc<dyn Fn(I) -> BoxFuture<'static, Result<O, TransportError>> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// Snapshot of one controller.
///
/// `data` holds the last successful result and survives later failures and
/// `reset`. `error` is only set in `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<O> {
    pub status: FetchStatus,
    pub data: Option<O>,
    pub error: Option<String>,
}

impl<O> FetchState<O> {
    fn with_status(status: FetchStatus) -> Self {
        Self {
            status,
            data: None,
            error: None,
        }
    }

    pub fn loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn success(&self) -> bool {
        self.status == FetchStatus::Success
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, FetchStatus::Success | FetchStatus::Failed)
    }
}

impl<O> Default for FetchState<O> {
    fn default() -> Self {
        Self::with_status(FetchStatus::Idle)
    }
}

/// What a single `run` produced, as seen by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<O> {
    Success(O),
    Failed(String),
    /// Nobody is interested any more; state was left untouched.
    Discarded,
}

impl<O> Outcome<O> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Failed(message) => Some(message),
            _ => None,
        }
    }
}

pub struct FetchController<I, O> {
    operation: &'static str,
    failure_message: &'static str,
    call: Call<I, O>,
    state: watch::Sender<FetchState<O>>,
    epoch: AtomicU64,
    disposed: AtomicBool,
    last_input: Mutex<Option<I>>,
}

impl<I, O> FetchController<I, O>
where
    I: Send + 'static,
    O: Clone + Send + Sync + 'static,
{
    /// `operation` names the call in logs; `failure_message` is what the user
    /// sees when it fails, whatever the cause.
    pub fn new<F, Fut>(operation: &'static str, failure_message: &'static str, call: F) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, TransportError>> + Send + 'static,
    {
        let (state, _) = watch::channel(FetchState::default());
        Self {
            operation,
            failure_message,
            call: Arc::new(move |input| call(input).boxed()),
            state,
            epoch: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
            last_input: Mutex::new(None),
        }
    }

    /// Start in `Loading`, for controllers whose first run happens on mount.
    pub fn preloading(self) -> Self {
        self.state.send_replace(FetchState::with_status(FetchStatus::Loading));
        self
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn state(&self) -> FetchState<O> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<O>> {
        self.state.subscribe()
    }

    pub async fn run(&self, input: I) -> Outcome<O> {
        if self.is_disposed() {
            debug!(operation = self.operation, "controller disposed; not running");
            return Outcome::Discarded;
        }

        let ticket = self.epoch.load(Ordering::SeqCst);
        self.state.send_modify(|state| {
            state.status = FetchStatus::Loading;
            state.error = None;
        });
        debug!(operation = self.operation, "loading");

        let result = (self.call)(input).await;

        if !self.is_current(ticket) {
            debug!(operation = self.operation, "discarding result nobody is waiting for");
            return Outcome::Discarded;
        }

        match result {
            Ok(value) => {
                let stored = value.clone();
                self.state.send_modify(move |state| {
                    state.status = FetchStatus::Success;
                    state.data = Some(stored);
                    state.error = None;
                });
                debug!(operation = self.operation, "succeeded");
                Outcome::Success(value)
            }
            Err(err) => {
                warn!(operation = self.operation, error = %err, "request failed");
                let message = self.failure_message.to_string();
                self.state.send_modify(|state| {
                    state.status = FetchStatus::Failed;
                    state.error = Some(message.clone());
                });
                Outcome::Failed(message)
            }
        }
    }

    /// Runs only when `input` differs from the previous call's, re-arming first
    /// so a response for the old input cannot land afterwards.
    /// Returns `None` when nothing changed.
    pub async fn run_if_changed(&self, input: I) -> Option<Outcome<O>>
    where
        I: Clone + PartialEq,
    {
        {
            let mut last = self.last_input.lock().unwrap_or_else(PoisonError::into_inner);
            if last.as_ref() == Some(&input) {
                return None;
            }
            *last = Some(input.clone());
        }
        self.rearm();
        Some(self.run(input).await)
    }

    /// Runs unconditionally, superseding any request already in flight, and
    /// remembers `input` for `run_if_changed`.
    pub async fn rerun(&self, input: I) -> Outcome<O>
    where
        I: Clone,
    {
        *self.last_input.lock().unwrap_or_else(PoisonError::into_inner) = Some(input.clone());
        self.rearm();
        self.run(input).await
    }

    /// Clears the error and leaves a terminal state. Stored data is kept.
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            if state.is_terminal() {
                state.status = FetchStatus::Idle;
            }
            state.error = None;
        });
    }

    /// Invalidates every request already in flight.
    pub fn rearm(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// The owner is gone: in-flight results are dropped and later runs are refused.
    pub fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::SeqCst) {
            debug!(operation = self.operation, "disposed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    fn is_current(&self, ticket: u64) -> bool {
        !self.is_disposed() && self.epoch.load(Ordering::SeqCst) == ticket
    }
}
