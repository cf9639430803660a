//! Hand-off between the background search task and the rendering surface.
//!
//! The background task runs the whole pipeline and sends its single
//! [`SearchOutcome`] through a bounded channel; the consumer side drives a
//! [`Renderer`] with progress ticks while waiting, then delivers results
//! one per tick so a large result set never lands in one burst.
//!
//! [`SearchSupervisor`] enforces that at most one search is alive at a
//! time: starting a second search while one is running is refused, not
//! queued. The permit is released once the outcome arrives, before the
//! paced delivery of results — matching a surface that re-enables input
//! as soon as the search itself is over.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::SearchConfig;
use crate::http::Fetch;
use crate::orchestrator::ranking::RankedResult;
use crate::orchestrator::search::{run_search, SearchOutcome};
use crate::query::classify;

/// Interval between progress ticks and between delivered results.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// The contract a rendering surface implements.
///
/// Called from the consumer side only; implementations never see the
/// background task.
pub trait Renderer {
    /// A search was accepted and its background task spawned.
    fn on_search_started(&mut self);
    /// Periodic heartbeat while the search is in flight.
    fn on_progress_tick(&mut self);
    /// One ranked result, delivered at most once per tick.
    fn on_result_ready(&mut self, result: RankedResult);
    /// The search produced no renderable results but has a URL to offer.
    fn on_fallback(&mut self, url: &str, label: &str);
    /// The search failed with no URL to offer.
    fn on_search_failed(&mut self, message: &str);
}

/// Single-slot guard: at most one search task alive at a time.
#[derive(Debug, Clone, Default)]
pub struct SearchSupervisor {
    busy: Arc<AtomicBool>,
}

/// Held while a search is in flight; releasing it frees the slot.
#[derive(Debug)]
pub struct SearchPermit {
    busy: Arc<AtomicBool>,
}

impl SearchSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the search slot. Returns `None` if a search is already running.
    pub fn begin(&self) -> Option<SearchPermit> {
        let claimed = self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        claimed.then(|| SearchPermit {
            busy: Arc::clone(&self.busy),
        })
    }

    /// Whether a search currently holds the slot.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for SearchPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Run one search and feed the outcome to `renderer`.
///
/// Returns `false` without doing anything if another search already
/// holds the supervisor's slot. Otherwise classifies the query, spawns
/// the pipeline on a background task, ticks the renderer every
/// [`TICK_INTERVAL`] until the outcome arrives, then delivers it:
/// ranked results one per tick, or a fallback link, or the failure
/// status.
pub async fn run_to_renderer<F, R>(
    supervisor: &SearchSupervisor,
    fetcher: F,
    raw_query: &str,
    source_index: usize,
    config: &SearchConfig,
    renderer: &mut R,
) -> bool
where
    F: Fetch + Send + 'static,
    R: Renderer,
{
    let Some(permit) = supervisor.begin() else {
        tracing::debug!("search refused: another search is running");
        return false;
    };

    renderer.on_search_started();
    let query = classify(raw_query);

    let (tx, mut rx) = mpsc::channel::<SearchOutcome>(1);
    let task_query = query.clone();
    let task_config = config.clone();
    tokio::spawn(async move {
        let outcome = run_search(&fetcher, &task_query, source_index, &task_config).await;
        // The receiver only disappears if the consumer gave up entirely.
        let _ = tx.send(outcome).await;
    });

    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    let outcome = loop {
        tokio::select! {
            _ = ticker.tick() => renderer.on_progress_tick(),
            received = rx.recv() => match received {
                Some(outcome) => break outcome,
                None => {
                    tracing::warn!("search task dropped its outcome");
                    renderer.on_search_failed("Failed to fetch recipes.");
                    return true;
                }
            },
        }
    };

    // Input unlocks as soon as the search itself is over; paced result
    // delivery happens with the slot already free.
    drop(permit);

    if outcome.success {
        for result in outcome.results {
            ticker.tick().await;
            renderer.on_result_ready(result);
        }
    } else if let Some(url) = outcome.request_url.as_deref() {
        renderer.on_fallback(url, &outcome.status);
    } else {
        renderer.on_search_failed(&outcome.status);
    }
    true
}
