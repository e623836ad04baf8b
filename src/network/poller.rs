//! Interval poller - re-issues a fetch on a fixed period and on demand
//!
//! Each fetch is tagged with a sequence number. The poller never waits for a
//! previous fetch before starting the next one; ordering is settled on the
//! receiving side by [`PollState`], which applies a result only if no
//! later-issued fetch has been applied already.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::constants::FETCH_FAILED_MESSAGE;
use crate::error::ApiError;

/// Lifecycle events emitted by a poller
#[derive(Debug, Clone)]
pub enum PollEvent<T> {
    Started { seq: u64 },
    Finished { seq: u64, result: Result<T, ApiError> },
}

/// Owning handle for a running poller. Dropping it stops the timer and
/// cancels every fetch still in flight.
pub struct PollHandle {
    name: &'static str,
    refetch_tx: mpsc::UnboundedSender<()>,
    _guard: DropGuard,
}

impl PollHandle {
    /// Fetch now, through the same path as a timer tick. The timer is not reset.
    pub fn refetch(&self) {
        tracing::debug!(feed = self.name, "Manual refetch");
        let _ = self.refetch_tx.send(());
    }
}

/// Spawn a poller on the current runtime.
///
/// The first fetch runs immediately, then one per `period`. Events are
/// converted into `M` and sent on `events`; the poller exits when `parent`
/// is cancelled, the handle is dropped, or the receiver goes away.
pub fn spawn_poller<T, F, Fut, M>(
    name: &'static str,
    period: Duration,
    fetch: F,
    events: mpsc::UnboundedSender<M>,
    parent: &CancellationToken,
) -> PollHandle
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    M: From<PollEvent<T>> + Send + 'static,
{
    let cancel = parent.child_token();
    let (refetch_tx, refetch_rx) = mpsc::unbounded_channel();
    let guard = cancel.clone().drop_guard();

    tokio::spawn(run_poller(name, period, Arc::new(fetch), events, refetch_rx, cancel));

    PollHandle {
        name,
        refetch_tx,
        _guard: guard,
    }
}

async fn run_poller<T, F, Fut, M>(
    name: &'static str,
    period: Duration,
    fetch: Arc<F>,
    events: mpsc::UnboundedSender<M>,
    mut refetch_rx: mpsc::UnboundedReceiver<()>,
    cancel: CancellationToken,
) where
    T: Send + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    M: From<PollEvent<T>> + Send + 'static,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut in_flight = JoinSet::new();
    let mut seq = 0u64;

    tracing::info!(feed = name, period_ms = period.as_millis() as u64, "Poller started");

    loop {
        let launch = tokio::select! {
            biased;

            _ = cancel.cancelled() => break,
            _ = ticker.tick() => true,
            msg = refetch_rx.recv() => match msg {
                Some(()) => true,
                None => break,
            },
            Some(_) = in_flight.join_next(), if !in_flight.is_empty() => false,
        };

        if !launch {
            continue;
        }

        seq += 1;
        if events.send(M::from(PollEvent::Started { seq })).is_err() {
            break;
        }

        let fut = fetch();
        let token = cancel.child_token();
        let tx = events.clone();
        in_flight.spawn(async move {
            tokio::select! {
                biased;

                _ = token.cancelled() => {}
                result = fut => {
                    if let Err(e) = &result {
                        tracing::warn!(feed = name, seq, error = %e, "Fetch failed");
                    }
                    if !token.is_cancelled() {
                        let _ = tx.send(M::from(PollEvent::Finished { seq, result }));
                    }
                }
            }
        });
    }

    in_flight.abort_all();
    tracing::info!(feed = name, "Poller stopped");
}

/// What applying an event did to a [`PollState`]
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Started,
    Updated,
    /// The fetch failed. `newly_failed` is true when no error was showing before.
    Failed { error: ApiError, newly_failed: bool },
    /// A later-issued fetch was already applied; this result was dropped
    Stale,
}

/// Receiving side of a poller: `{data, loading, error}` with stale-while-revalidate.
#[derive(Debug, Clone)]
pub struct PollState<T> {
    data: T,
    loading: bool,
    error: Option<String>,
    issued: u64,
    applied: u64,
}

impl<T> PollState<T> {
    /// Starts in the loading state, before the first fetch is observed
    pub fn new(initial: T) -> Self {
        PollState {
            data: initial,
            loading: true,
            error: None,
            issued: 0,
            applied: 0,
        }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn apply(&mut self, event: PollEvent<T>) -> PollOutcome {
        match event {
            PollEvent::Started { seq } => {
                self.issued = self.issued.max(seq);
                self.loading = true;
                PollOutcome::Started
            }
            PollEvent::Finished { seq, result } => {
                if seq <= self.applied {
                    tracing::debug!(seq, applied = self.applied, "Discarding stale poll result");
                    return PollOutcome::Stale;
                }
                self.applied = seq;
                self.issued = self.issued.max(seq);
                self.loading = self.applied < self.issued;

                match result {
                    Ok(data) => {
                        self.data = data;
                        self.error = None;
                        PollOutcome::Updated
                    }
                    Err(error) => {
                        let newly_failed = self.error.is_none();
                        self.error = Some(FETCH_FAILED_MESSAGE.to_string());
                        PollOutcome::Failed { error, newly_failed }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    const PERIOD: Duration = Duration::from_secs(5);

    fn counting_fetch(
        calls: Arc<AtomicU64>,
    ) -> impl Fn() -> std::future::Ready<Result<u64, ApiError>> + Send + Sync + 'static {
        move || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(Ok(n))
        }
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    fn drain<T>(rx: &mut mpsc::UnboundedReceiver<PollEvent<T>>) -> Vec<PollEvent<T>> {
        let mut out = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            out.push(ev);
        }
        out
    }

    #[test]
    fn test_state_starts_loading_with_initial_data() {
        let state = PollState::new(0u64);
        assert!(state.loading());
        assert_eq!(state.error(), None);
        assert_eq!(*state.data(), 0);
    }

    #[test]
    fn test_state_applies_success() {
        let mut state = PollState::new(0u64);
        assert_eq!(state.apply(PollEvent::Started { seq: 1 }), PollOutcome::Started);
        assert_eq!(
            state.apply(PollEvent::Finished { seq: 1, result: Ok(100) }),
            PollOutcome::Updated
        );
        assert!(!state.loading());
        assert_eq!(*state.data(), 100);
    }

    #[test]
    fn test_failure_keeps_last_good_data() {
        let mut state = PollState::new(0u64);
        state.apply(PollEvent::Started { seq: 1 });
        state.apply(PollEvent::Finished { seq: 1, result: Ok(7) });

        state.apply(PollEvent::Started { seq: 2 });
        let outcome = state.apply(PollEvent::Finished {
            seq: 2,
            result: Err(ApiError::Transport("down".into())),
        });
        assert!(matches!(outcome, PollOutcome::Failed { newly_failed: true, .. }));
        assert!(!state.loading());
        assert_eq!(state.error(), Some(FETCH_FAILED_MESSAGE));
        assert_eq!(*state.data(), 7);

        state.apply(PollEvent::Started { seq: 3 });
        let outcome = state.apply(PollEvent::Finished {
            seq: 3,
            result: Err(ApiError::Transport("still down".into())),
        });
        assert!(matches!(outcome, PollOutcome::Failed { newly_failed: false, .. }));

        state.apply(PollEvent::Started { seq: 4 });
        state.apply(PollEvent::Finished { seq: 4, result: Ok(8) });
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut state = PollState::new(0u64);
        state.apply(PollEvent::Started { seq: 1 });
        state.apply(PollEvent::Started { seq: 2 });
        state.apply(PollEvent::Finished { seq: 2, result: Ok(2) });
        assert!(!state.loading());

        let outcome = state.apply(PollEvent::Finished { seq: 1, result: Ok(1) });
        assert_eq!(outcome, PollOutcome::Stale);
        assert_eq!(*state.data(), 2);
    }

    #[test]
    fn test_loading_until_latest_resolves() {
        let mut state = PollState::new(0u64);
        state.apply(PollEvent::Started { seq: 1 });
        state.apply(PollEvent::Started { seq: 2 });
        state.apply(PollEvent::Finished { seq: 1, result: Ok(1) });
        assert!(state.loading());
        assert_eq!(*state.data(), 1);
        state.apply(PollEvent::Finished { seq: 2, result: Ok(2) });
        assert!(!state.loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_fetch_runs_immediately() {
        let calls = Arc::new(AtomicU64::new(0));
        let (tx, mut rx) = mpsc::unbounded_channel::<PollEvent<u64>>();
        let root = CancellationToken::new();
        let _handle = spawn_poller("test", PERIOD, counting_fetch(calls.clone()), tx, &root);

        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let events = drain(&mut rx);
        assert!(matches!(events[0], PollEvent::Started { seq: 1 }));
        assert!(matches!(events[1], PollEvent::Finished { seq: 1, result: Ok(1) }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_period_triggers_exactly_one_more_fetch() {
        let calls = Arc::new(AtomicU64::new(0));
        let (tx, _rx) = mpsc::unbounded_channel::<PollEvent<u64>>();
        let root = CancellationToken::new();
        let _handle = spawn_poller("test", PERIOD, counting_fetch(calls.clone()), tx, &root);

        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(PERIOD).await;
        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refetch_does_not_reset_timer() {
        let calls = Arc::new(AtomicU64::new(0));
        let (tx, _rx) = mpsc::unbounded_channel::<PollEvent<u64>>();
        let root = CancellationToken::new();
        let handle = spawn_poller("test", PERIOD, counting_fetch(calls.clone()), tx, &root);

        settle().await;
        tokio::time::sleep(Duration::from_secs(1)).await;
        handle.refetch();
        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        handle.refetch();
        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        // Tick still due at t=5s, not pushed out by the manual calls
        tokio::time::sleep(Duration::from_millis(3_990)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_in_flight_fetch() {
        let (tx, mut rx) = mpsc::unbounded_channel::<PollEvent<u64>>();
        let root = CancellationToken::new();
        let handle = spawn_poller(
            "test",
            PERIOD,
            || async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok(1u64)
            },
            tx,
            &root,
        );

        settle().await;
        drop(handle);
        tokio::time::sleep(Duration::from_secs(12)).await;

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], PollEvent::Started { seq: 1 }));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_parent_cancel_stops_poller() {
        let calls = Arc::new(AtomicU64::new(0));
        let (tx, _rx) = mpsc::unbounded_channel::<PollEvent<u64>>();
        let root = CancellationToken::new();
        let _handle = spawn_poller("test", PERIOD, counting_fetch(calls.clone()), tx, &root);

        settle().await;
        root.cancel();
        tokio::time::sleep(PERIOD * 3).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_fetches_latest_request_wins() {
        let calls = Arc::new(AtomicU64::new(0));
        let counter = calls.clone();
        let (tx, mut rx) = mpsc::unbounded_channel::<PollEvent<u64>>();
        let root = CancellationToken::new();

        // First fetch is slow, the manual one right after it is fast
        let handle = spawn_poller(
            "test",
            PERIOD,
            move || {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    let delay = if n == 1 { 3_000 } else { 500 };
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    Ok(n)
                }
            },
            tx,
            &root,
        );

        settle().await;
        handle.refetch();
        tokio::time::sleep(Duration::from_secs(4)).await;

        let mut state = PollState::new(0u64);
        let outcomes: Vec<PollOutcome> = drain(&mut rx).into_iter().map(|ev| state.apply(ev)).collect();
        assert_eq!(
            outcomes,
            vec![
                PollOutcome::Started,
                PollOutcome::Started,
                PollOutcome::Updated,
                PollOutcome::Stale,
            ]
        );
        assert_eq!(*state.data(), 2);
        assert!(!state.loading());
    }
}
