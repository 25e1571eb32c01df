//! Fixed-size worker pool backing the fan-out writer
//!
//! Workers pull boxed jobs off a shared crossbeam channel. The pool owns no
//! per-destination state; any worker may run any destination's delivery.

use crossbeam_channel::{unbounded, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Default time to wait for workers to exit when the pool is dropped
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

pub type Job = Box<dyn FnOnce() + Send + 'static>;

pub struct WorkerPool {
    sender: Option<Sender<Job>>,
    handles: Vec<thread::JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `size` workers (at least one).
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        let (sender, receiver) = unbounded::<Job>();

        let handles = (0..size)
            .filter_map(|idx| {
                let receiver = receiver.clone();
                thread::Builder::new()
                    .name(format!("fanout-worker-{}", idx))
                    .spawn(move || {
                        // Channel closes when the pool is dropped
                        while let Ok(job) = receiver.recv() {
                            job();
                        }
                    })
                    .map_err(|e| {
                        eprintln!("[LOGGER ERROR] Failed to spawn fan-out worker #{}: {}", idx, e);
                    })
                    .ok()
            })
            .collect();

        Self {
            sender: Some(sender),
            handles,
        }
    }

    /// Worker count sized for the host
    pub fn default_size() -> usize {
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Queue a job. When no worker can take it the job is handed back so the
    /// caller can run it itself.
    pub fn execute(&self, job: Job) -> std::result::Result<(), Job> {
        if self.handles.is_empty() {
            return Err(job);
        }
        match self.sender {
            Some(ref sender) => sender.send(job).map_err(|e| e.into_inner()),
            None => Err(job),
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        drop(self.sender.take());

        let start = Instant::now();
        for handle in self.handles.drain(..) {
            // A worker stuck inside a hung destination must not hang the drop
            loop {
                if handle.is_finished() {
                    if let Err(e) = handle.join() {
                        eprintln!("[LOGGER ERROR] Fan-out worker panicked during shutdown: {:?}", e);
                    }
                    break;
                }

                if start.elapsed() >= DEFAULT_SHUTDOWN_TIMEOUT {
                    eprintln!(
                        "[LOGGER WARNING] Fan-out worker did not finish within {:?}. \
                         Pending deliveries may be lost.",
                        DEFAULT_SHUTDOWN_TIMEOUT
                    );
                    break;
                }

                thread::sleep(Duration::from_millis(5));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_jobs_run() {
        let pool = WorkerPool::new(3);
        assert_eq!(pool.size(), 3);

        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = crossbeam_channel::bounded(10);
        for _ in 0..10 {
            let counter = Arc::clone(&counter);
            let tx = tx.clone();
            assert!(pool
                .execute(Box::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    let _ = tx.send(());
                }))
                .is_ok());
        }

        for _ in 0..10 {
            rx.recv_timeout(Duration::from_secs(5)).unwrap();
        }
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_zero_size_gets_one_worker() {
        let pool = WorkerPool::new(0);
        assert_eq!(pool.size(), 1);
    }

    #[test]
    fn test_drop_drains_queue() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let pool = WorkerPool::new(1);
            for _ in 0..5 {
                let counter = Arc::clone(&counter);
                let _ = pool.execute(Box::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }));
            }
        }
        assert_eq!(counter.load(Ordering::SeqCst), 5);
    }
}
