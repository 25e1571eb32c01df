//! Fan-out writer: one serialized event, every destination
//!
//! A write hands the same buffer to each registered destination, runs the
//! deliveries in parallel and returns once all of them have finished.
//! Destination errors and panics are recorded and discarded; the write
//! itself always reports the full buffer length.
//!
//! Each destination sees the writes of one caller in call order: a call does
//! not return before every destination has taken its buffer.

use super::destination::Destination;
use super::error::{LoggerError, Result};
use super::metrics::DeliveryMetrics;
use super::worker_pool::WorkerPool;
use crossbeam_channel::{bounded, RecvTimeoutError};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

enum Outcome {
    Delivered,
    Failed(LoggerError),
    Panicked(String),
}

pub struct FanOutWriter {
    destinations: Vec<Arc<dyn Destination>>,
    pool: Option<WorkerPool>,
    deadline: Option<Duration>,
    metrics: Arc<DeliveryMetrics>,
}

impl FanOutWriter {
    /// Build a writer over a fixed destination list, with a worker pool
    /// sized for the host.
    pub fn new(destinations: Vec<Arc<dyn Destination>>) -> Self {
        let workers = WorkerPool::default_size();
        Self::with_workers(destinations, workers)
    }

    /// Build a writer with an explicit worker count. With a single
    /// destination no pool is started at all.
    pub fn with_workers(destinations: Vec<Arc<dyn Destination>>, workers: usize) -> Self {
        let pool = if destinations.len() > 1 {
            Some(WorkerPool::new(workers.max(destinations.len() - 1)))
        } else {
            None
        };

        Self {
            destinations,
            pool,
            deadline: None,
            metrics: Arc::new(DeliveryMetrics::new()),
        }
    }

    /// Stop waiting for slow destinations after `deadline`.
    ///
    /// Without a deadline a hung destination blocks every write. With one,
    /// deliveries still running when it expires are counted as timed out and
    /// the write returns; they finish in the background.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        if deadline.is_some() && self.pool.is_none() && !self.destinations.is_empty() {
            self.pool = Some(WorkerPool::new(1));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    pub fn destinations(&self) -> &[Arc<dyn Destination>] {
        &self.destinations
    }

    pub fn metrics(&self) -> &Arc<DeliveryMetrics> {
        &self.metrics
    }

    /// Deliver `buf` to every destination and wait for all of them.
    pub fn write(&self, buf: &[u8]) -> usize {
        self.metrics.record_write();

        match (self.destinations.as_slice(), self.pool.as_ref()) {
            ([], _) => {}
            ([only], None) => {
                let outcome = deliver(only.as_ref(), buf);
                self.record(0, outcome);
            }
            (_, pool) => self.write_parallel(buf, pool),
        }

        buf.len()
    }

    fn write_parallel(&self, buf: &[u8], pool: Option<&WorkerPool>) {
        // The calling thread takes the first destination unless a deadline
        // is set, in which case it only waits.
        let inline = usize::from(self.deadline.is_none());
        let remote = &self.destinations[inline..];

        let shared: Arc<[u8]> = Arc::from(buf);
        // Capacity covers every job, so late senders never block
        let (tx, rx) = bounded::<(usize, Outcome)>(remote.len());

        for (offset, destination) in remote.iter().enumerate() {
            let idx = inline + offset;
            let destination = Arc::clone(destination);
            let shared = Arc::clone(&shared);
            let tx = tx.clone();
            let job: Box<dyn FnOnce() + Send> = Box::new(move || {
                let outcome = deliver(destination.as_ref(), &shared);
                let _ = tx.send((idx, outcome));
            });

            let rejected = match pool {
                Some(pool) => pool.execute(job).err(),
                None => Some(job),
            };
            if let Some(job) = rejected {
                job();
            }
        }
        drop(tx);

        let started = Instant::now();
        if inline == 1 {
            let outcome = deliver(self.destinations[0].as_ref(), buf);
            self.record(0, outcome);
        }

        let mut pending = remote.len();
        while pending > 0 {
            let received = match self.deadline {
                Some(deadline) => rx.recv_deadline(started + deadline),
                None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok((idx, outcome)) => {
                    pending -= 1;
                    self.record(idx, outcome);
                }
                Err(RecvTimeoutError::Timeout) => {
                    for _ in 0..pending {
                        self.metrics.record_timed_out();
                    }
                    alert(
                        self.metrics.timed_out(),
                        &format!(
                            "[LOGGER WARNING] {} destination(s) still writing after {:?}",
                            pending,
                            self.deadline.unwrap_or_default()
                        ),
                    );
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    fn record(&self, idx: usize, outcome: Outcome) {
        let name = self.destinations[idx].name();
        match outcome {
            Outcome::Delivered => {
                self.metrics.record_delivered();
            }
            Outcome::Failed(e) => {
                let previous = self.metrics.record_failed();
                alert(
                    previous + 1,
                    &format!("[LOGGER ERROR] Destination #{} ({}) failed: {}", idx, name, e),
                );
            }
            Outcome::Panicked(msg) => {
                let previous = self.metrics.record_panicked();
                alert(
                    previous + 1,
                    &format!(
                        "[LOGGER CRITICAL] Destination #{} ({}) panicked: {}. \
                         Other destinations continue to function.",
                        idx, name, msg
                    ),
                );
            }
        }
    }

    /// Flush every destination, returning the first error after trying all.
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for destination in &self.destinations {
            if let Err(e) = destination.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl std::io::Write for FanOutWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(FanOutWriter::write(self, buf))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        FanOutWriter::flush(self).map_err(std::io::Error::other)
    }
}

fn deliver(destination: &dyn Destination, buf: &[u8]) -> Outcome {
    match panic::catch_unwind(AssertUnwindSafe(|| destination.write_all(buf))) {
        Ok(Ok(())) => Outcome::Delivered,
        Ok(Err(e)) => Outcome::Failed(e),
        Err(panic_info) => Outcome::Panicked(panic_message(panic_info)),
    }
}

fn panic_message(panic_info: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Report on the first occurrence and every 1000th after it
fn alert(count: u64, message: &str) {
    if count == 1 || count % 1000 == 0 {
        eprintln!("{} (occurrence {})", message, count);
    }
}
