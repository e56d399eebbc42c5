// src/pool/workers.rs
// =============================================================================
// This module runs many probes at once on a fixed number of worker threads.
//
// How it works:
// 1. Put every URL in a queue (VecDeque behind a Mutex)
// 2. Start `concurrency` worker threads
// 3. Each worker pops a URL, probes it, sends the result back on a channel,
//    then pops the next one, until the queue is empty
// 4. The calling thread receives results as they finish and collects them
//
// Because workers only take a new URL after finishing the previous one,
// there are never more than `concurrency` probes in flight.
//
// Results arrive in *completion* order, not input order.
//
// Rust concepts:
// - std::thread::scope: threads that may borrow from the caller's stack
// - mpsc channels: hand results from many threads to one
// - Mutex: one worker at a time touches the queue
// =============================================================================

use log::info;
use std::collections::VecDeque;
use std::sync::{mpsc, Mutex};
use std::thread;

use crate::probe::{Probe, ProbeResult};

/// How many probes run at once unless told otherwise.
pub const DEFAULT_CONCURRENCY: usize = 20;

/// Probes every URL with at most `concurrency` probes in flight.
///
/// Returns exactly one result per input URL, in the order the probes
/// finished. A concurrency of 0 is treated as 1.
pub fn run_all<P>(urls: Vec<String>, concurrency: usize, probe: &P) -> Vec<ProbeResult>
where
    P: Probe + ?Sized,
{
    let total = urls.len();
    if total == 0 {
        return Vec::new();
    }

    // No point starting threads that would find the queue already empty
    let workers = concurrency.max(1).min(total);
    let queue = Mutex::new(urls.into_iter().collect::<VecDeque<_>>());
    let (tx, rx) = mpsc::channel();

    let mut results = Vec::with_capacity(total);

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let queue = &queue;
            scope.spawn(move || {
                while let Some(url) = next_url(queue) {
                    // The receiver outlives every worker, so this only
                    // fails if the collecting loop below panicked
                    if tx.send(probe.probe(&url)).is_err() {
                        break;
                    }
                }
            });
        }

        // Drop our own sender so `rx` ends once every worker is done
        drop(tx);

        for result in rx {
            let remaining = total - results.len() - 1;
            info!("Processed {} ({} remaining)", result.url, remaining);
            results.push(result);
        }
    });

    results
}

// Pops under the lock and releases it before probing.
// A poisoned lock still holds a valid queue, so keep going with it.
fn next_url(queue: &Mutex<VecDeque<String>>) -> Option<String> {
    let mut guard = queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.pop_front()
}
