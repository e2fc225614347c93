//! A bounded pool of probe tasks.
//!
//! Probes run as independent tokio tasks and hand back immutable results;
//! only the task that owns the pool consumes them. At most `limit` probes
//! are in flight, which keeps large ranges from exhausting sockets.

use std::future::Future;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::warn;

pub(crate) struct ProbePool<R> {
    tasks: JoinSet<Option<R>>,
    limit: usize,
    cancel: CancellationToken,
}

impl<R: Send + 'static> ProbePool<R> {
    pub(crate) fn new(limit: usize, cancel: CancellationToken) -> Self {
        Self {
            tasks: JoinSet::new(),
            limit: limit.max(1),
            cancel,
        }
    }

    /// Queues `probe` once a slot is free. Results that complete while
    /// waiting for the slot are passed to `sink`.
    pub(crate) async fn submit<F>(&mut self, probe: F, sink: &mut impl FnMut(R))
    where
        F: Future<Output = R> + Send + 'static,
    {
        while self.tasks.len() >= self.limit {
            if let Some(result) = self.next_finished().await {
                sink(result);
            }
        }

        let cancel = self.cancel.clone();
        self.tasks.spawn(async move {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                result = probe => Some(result),
            }
        });
    }

    /// Waits for every queued probe, passing each result to `sink`.
    pub(crate) async fn drain(mut self, sink: &mut impl FnMut(R)) {
        while !self.tasks.is_empty() {
            if let Some(result) = self.next_finished().await {
                sink(result);
            }
        }
    }

    /// `None` when the finished task was cancelled or panicked.
    async fn next_finished(&mut self) -> Option<R> {
        match self.tasks.join_next().await? {
            Ok(result) => result,
            Err(err) => {
                warn!("Probe task failed: {err}");
                None
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
