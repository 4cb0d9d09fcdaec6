//! Coordinator module
//!
//! Fans one [`FileWorker`] out per input file, fans their outcomes back in, and
//! produces a single [`Summary`] for the run.
//!
//! # Architecture
//!
//! ```text
//!   file 1 ──► worker thread ──┐                 ┌─► result channel (bounded: n)
//!   file 2 ──► worker thread ──┼─ one report ────┤
//!   file n ──► worker thread ──┘   each          └─► error channel  (bounded: n)
//!                     │
//!                     └── waiter thread joins all ──► done channel (bounded: 1)
//! ```
//!
//! The collection loop is a `select!` over the three receivers and is the only
//! place the consolidated sequence is mutated. Results are merged in arrival
//! order. The first failure ends the loop and becomes the run's result; whatever
//! was merged until then is discarded.
//!
//! Every channel has room for every message it can ever receive, so a worker's
//! send never blocks. That includes sends after the coordinator has aborted and
//! dropped its receivers: those fail immediately and are ignored, and the worker
//! thread simply exits. In-flight workers are never cancelled.

use crate::config::RunPlan;
use crate::error::ColstatError;
use crate::stats::aggregator::Consolidator;
use crate::stats::Operation;
use crate::worker::{FileResult, FileWorker};
use crossbeam::channel::{bounded, Receiver};
use crossbeam::select;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, trace, warn};

/// Final outcome of a successful run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Operation applied
    pub operation: Operation,
    /// Length of the consolidated sequence
    pub records: usize,
    /// Number of files that contributed
    pub files: usize,
    /// Aggregate value
    pub value: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} recs => {:.2}",
            self.operation, self.records, self.value
        )
    }
}

/// Runs one plan across all of its files
pub struct Coordinator {
    plan: RunPlan,
}

impl Coordinator {
    /// Create a coordinator for a validated plan
    pub fn new(plan: RunPlan) -> Self {
        Self { plan }
    }

    /// Dispatch all workers and collect their results
    ///
    /// Returns the summary once every worker has reported successfully, or the
    /// first failure received from any worker.
    pub fn run(&self) -> Result<Summary, ColstatError> {
        let RunPlan {
            files,
            operation,
            column,
            delimiter,
        } = &self.plan;

        if files.is_empty() {
            return Err(ColstatError::NoFilesProvided);
        }

        let num_workers = files.len();
        let (result_tx, result_rx) = bounded::<FileResult>(num_workers);
        let (error_tx, error_rx) = bounded::<ColstatError>(num_workers);
        let (done_tx, done_rx) = bounded::<()>(1);

        let mut handles = Vec::with_capacity(num_workers);
        for (id, path) in files.iter().enumerate() {
            let worker = FileWorker::new(id, path.clone(), *column, *delimiter);
            let result_tx = result_tx.clone();
            let error_tx = error_tx.clone();

            debug!(worker = id, path = %path.display(), "dispatching worker");

            // Workers already running keep their senders; the buffered
            // channels let them finish even if we bail out here
            let handle = spawn_named(format!("colstat-worker-{}", id), move || {
                // A closed channel means the run already ended; nothing to do
                match worker.run() {
                    Ok(result) => {
                        let _ = result_tx.send(result);
                    }
                    Err(e) => {
                        let _ = error_tx.send(e);
                    }
                }
            })
            .map_err(|e| abort(e, &Consolidator::new()))?;
            handles.push((path.clone(), handle));
        }

        // All-done signal, derived from thread completion rather than from
        // whether anyone consumed the reports. The waiter keeps both senders
        // alive until done is queued so the loop never sees a bare disconnect.
        spawn_named("colstat-waiter".to_string(), move || {
            for (path, handle) in handles {
                if handle.join().is_err() {
                    let _ = error_tx.send(ColstatError::WorkerPanicked { path });
                }
            }
            let _ = done_tx.send(());
            drop(result_tx);
        })
        .map_err(|e| abort(e, &Consolidator::new()))?;

        collect(*operation, num_workers, &result_rx, &error_rx, &done_rx)
    }
}

/// Start a named thread, reporting OS refusal as a run failure
fn spawn_named<F, T>(name: String, f: F) -> Result<JoinHandle<T>, ColstatError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    thread::Builder::new()
        .name(name.clone())
        .spawn(f)
        .map_err(|source| ColstatError::Spawn { name, source })
}

/// One wake-up of the collection loop
enum Report {
    Success(FileResult),
    Failure(ColstatError),
    /// A sender side went away with nothing queued
    Closed,
    Done,
}

/// Collection loop: merge results in arrival order until done or first error
fn collect(
    operation: Operation,
    num_workers: usize,
    result_rx: &Receiver<FileResult>,
    error_rx: &Receiver<ColstatError>,
    done_rx: &Receiver<()>,
) -> Result<Summary, ColstatError> {
    let mut consolidated = Consolidator::with_capacity(num_workers);

    loop {
        let report = select! {
            recv(error_rx) -> msg => msg.map_or(Report::Closed, Report::Failure),
            recv(result_rx) -> msg => msg.map_or(Report::Closed, Report::Success),
            recv(done_rx) -> _ => Report::Done,
        };

        match report {
            Report::Failure(e) => return Err(abort(e, &consolidated)),
            Report::Success(result) => merge(&mut consolidated, result),
            Report::Closed => {}
            Report::Done => break,
        }
    }

    // Reports can still be queued behind the done signal; a queued failure
    // still wins over any result
    if let Some(e) = error_rx.try_iter().next() {
        return Err(abort(e, &consolidated));
    }
    for result in result_rx.try_iter() {
        merge(&mut consolidated, result);
    }

    finalize(operation, &consolidated)
}

fn merge(consolidated: &mut Consolidator, result: FileResult) {
    trace!(
        worker = result.worker_id,
        path = %result.path.display(),
        records = result.values.len(),
        "merging results"
    );
    consolidated.merge(result.path, result.values);
}

fn abort(error: ColstatError, consolidated: &Consolidator) -> ColstatError {
    // The caller reports the error itself; keep the default log level quiet
    info!(
        kind = %error.kind(),
        discarded_records = consolidated.len(),
        "aborting run: {}",
        error
    );
    error
}

fn finalize(operation: Operation, consolidated: &Consolidator) -> Result<Summary, ColstatError> {
    if consolidated.is_empty() && !operation.defined_on_empty() {
        warn!(operation = %operation, "no records to aggregate; result is not a number");
    }

    for (path, records) in consolidated.files() {
        debug!(path = %path.display(), records, "file contribution");
    }

    let summary = Summary {
        operation,
        records: consolidated.len(),
        files: consolidated.num_files(),
        value: consolidated.apply(operation),
    };
    info!(
        operation = %summary.operation,
        records = summary.records,
        files = summary.files,
        value = summary.value,
        "aggregation complete"
    );

    Ok(summary)
}

/// Validate `files` and options, then run the whole pipeline
///
/// Convenience wrapper for callers that do not build a [`RunPlan`] themselves.
/// All option checks happen before any worker is launched.
pub fn run_files(
    files: &[PathBuf],
    op: &str,
    column: i64,
    delimiter: &str,
) -> Result<Summary, ColstatError> {
    let config = crate::config::RunConfig {
        files: files.to_vec(),
        op: op.to_string(),
        col: column,
        delimiter: delimiter.to_string(),
        output: Default::default(),
    };
    let plan = crate::config::validator::validate_config(&config)?;
    Coordinator::new(plan).run()
}
