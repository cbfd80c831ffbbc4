//! Sequential dispatch context.
//!
//! # Responsibilities
//! - Queue accepted dispatches in acceptance order
//! - Run exactly one dispatch at a time, strictly FIFO
//! - Report each dispatch outcome to its ticket, logs and metrics
//!
//! # Design Decisions
//! - A single tokio task owns the queue receiver; no locking needed
//! - Shutdown stops the worker between dispatches and aborts the one in
//!   flight; dropping the router instead drains what is already queued

use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::dispatch::error::DispatchError;
use crate::dispatch::processor::{DispatchJob, DispatchOutcome, Processor};
use crate::lifecycle::shutdown;
use crate::observability::metrics;

/// Sending half of the dispatch queue.
#[derive(Debug, Clone)]
pub(crate) struct DispatchQueue {
    tx: mpsc::UnboundedSender<DispatchJob>,
}

impl DispatchQueue {
    /// Enqueue `job`. Hands the job back if the worker has stopped.
    pub fn push(&self, job: DispatchJob) -> Result<(), DispatchJob> {
        self.tx.send(job).map_err(|e| e.0)
    }
}

/// Start the worker on `handle`.
pub(crate) fn spawn(
    handle: &Handle,
    processor: Processor,
    shutdown: broadcast::Receiver<()>,
) -> (DispatchQueue, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let task = handle.spawn(run(processor, rx, shutdown));
    (DispatchQueue { tx }, task)
}

async fn run(
    processor: Processor,
    mut queue: mpsc::UnboundedReceiver<DispatchJob>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    tracing::debug!("Dispatch worker started");

    loop {
        let mut job = tokio::select! {
            biased;
            _ = shutdown::requested(&mut shutdown_rx) => {
                tracing::info!("Dispatch worker received shutdown signal, exiting loop");
                break;
            }
            job = queue.recv() => match job {
                Some(job) => job,
                None => break,
            },
        };

        let id = job.id;
        let accepted_at = job.accepted_at;
        let reply = job.reply.take();
        let span = tracing::info_span!("dispatch", dispatch_id = %id, path = %job.path);
        let DispatchJob {
            entries,
            path,
            parameters,
            provisional,
            ..
        } = job;

        let mut stopping = false;
        let result = tokio::select! {
            biased;
            _ = shutdown::requested(&mut shutdown_rx) => {
                stopping = true;
                Err(DispatchError::Shutdown)
            }
            result = processor
                .process(id, entries, path, parameters, provisional)
                .instrument(span.clone()) => result,
        };

        span.in_scope(|| report(id, &result));
        metrics::record_dispatch(outcome_label(&result), accepted_at);

        if let Some(reply) = reply {
            send_reply(reply, result);
        }
        if stopping {
            tracing::info!("Dispatch worker stopped mid-dispatch");
            break;
        }
    }

    tracing::debug!("Dispatch worker finished");
}

fn report(id: Uuid, result: &Result<DispatchOutcome, DispatchError>) {
    match result {
        Ok(outcome) => tracing::info!(
            dispatch_id = %id,
            route = %outcome.route,
            proxies = outcome.proxies,
            fallback = outcome.fallback,
            "Dispatch completed"
        ),
        Err(e) => tracing::error!(dispatch_id = %id, error = %e, "Dispatch failed"),
    }
}

fn outcome_label(result: &Result<DispatchOutcome, DispatchError>) -> &'static str {
    match result {
        Ok(outcome) if outcome.fallback => "fallback",
        Ok(_) => "completed",
        Err(e) => e.label(),
    }
}

fn send_reply(
    reply: oneshot::Sender<Result<DispatchOutcome, DispatchError>>,
    result: Result<DispatchOutcome, DispatchError>,
) {
    // The ticket holder may have stopped listening.
    let _ = reply.send(result);
}
