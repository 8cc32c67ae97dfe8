//! Background write workers.
//!
//! Each worker drains the bounded queue: it persists every payload it
//! dequeues, runs the trigger command if one is configured, and exits when
//! it observes a shutdown sentinel. With more than one worker, files are
//! dequeued in sequence order but may finish writing in any order.

use crate::engine::FlushPayload;
use crate::queue::BoundedQueue;
use crate::trigger::run_trigger;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Spawn `n` write workers draining `queue`.
///
/// A worker that hits a write error keeps draining the queue without
/// writing, so the producer can never block forever on a full queue; the
/// first error is reported through the join handle and fails the run.
pub fn spawn_workers(
    n: usize,
    queue: Arc<BoundedQueue<FlushPayload>>,
    trigger: Option<Arc<str>>,
) -> Vec<JoinHandle<Result<()>>> {
    (0..n)
        .map(|_| {
            let queue = Arc::clone(&queue);
            let trigger = trigger.clone();
            thread::spawn(move || write_loop(&queue, trigger.as_deref()))
        })
        .collect()
}

fn write_loop(queue: &BoundedQueue<FlushPayload>, trigger: Option<&str>) -> Result<()> {
    let mut first_err = None;
    while let Some(item) = queue.pop() {
        if first_err.is_some() {
            continue;
        }
        if let Err(e) = write_one(&item, trigger) {
            first_err = Some(e);
        }
    }
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Persist one payload, then fire the trigger.
fn write_one(item: &FlushPayload, trigger: Option<&str>) -> Result<()> {
    let mut f = File::create(&item.path)
        .with_context(|| format!("create output file {}", item.path.display()))?;
    f.write_all(&item.data)
        .with_context(|| format!("write output file {}", item.path.display()))?;
    drop(f);
    if let Some(cmd) = trigger {
        run_trigger(cmd, &item.path.to_string_lossy(), item.rows);
    }
    Ok(())
}
