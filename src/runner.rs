//! Top-level read loop and run lifecycle.
//!
//! Wires the pieces together: opens the input, feeds parsed records into
//! the [`SplitEngine`] on the calling thread, and drains completed files
//! through the write workers. Input parse errors and output write errors
//! are fatal to the run; trigger failures are not.

use crate::config::SplitConfig;
use crate::engine::{FlushPayload, SplitEngine};
use crate::queue::BoundedQueue;
use crate::trigger::run_trigger;
use crate::writer::spawn_workers;
use anyhow::{anyhow, ensure, Context, Result};
use csv::ByteRecord;
use std::fs::File;
use std::io::{self, Read};
use std::sync::Arc;

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSummary {
    /// Output files produced.
    pub files: u32,
    /// Input records processed.
    pub records: u64,
}

/// Split the configured input into output files.
///
/// The output prefix is the input file's base name, or
/// [`stdin_prefix`](SplitConfig::stdin_prefix) when reading from standard
/// input.
///
/// # Errors
/// Returns an error if the configuration is invalid, the input cannot be
/// opened or parsed, or any output file cannot be written.
pub fn run(cfg: &SplitConfig) -> Result<SplitSummary> {
    match &cfg.input {
        Some(path) => {
            let prefix = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .with_context(|| format!("input path {} has no file name", path.display()))?;
            let file =
                File::open(path).with_context(|| format!("open input {}", path.display()))?;
            run_from_reader(cfg, file, &prefix)
        }
        None => {
            let prefix = cfg
                .stdin_prefix
                .clone()
                .context("an output prefix is required when reading from stdin")?;
            run_from_reader(cfg, io::stdin().lock(), &prefix)
        }
    }
}

/// Split records read from `input`, naming output files `<prefix>.<seq>`.
///
/// This is the core of [`run`]; it is public so callers can split from any
/// byte source.
///
/// # Errors
/// See [`run`].
pub fn run_from_reader(cfg: &SplitConfig, input: impl Read, prefix: &str) -> Result<SplitSummary> {
    ensure!(
        cfg.rows_per_file >= 1,
        "rows per file must be a positive integer"
    );
    ensure!(cfg.queue_depth >= 1, "queue depth must be at least 1");
    let workers = if cfg.workers == 0 {
        num_cpus::get()
    } else {
        cfg.workers
    };

    let queue = Arc::new(BoundedQueue::<FlushPayload>::new(cfg.queue_depth));
    let trigger: Option<Arc<str>> = cfg
        .trigger
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(Arc::from);
    let handles = spawn_workers(workers, Arc::clone(&queue), trigger.clone());
    let mut engine = SplitEngine::new(cfg, prefix, Arc::clone(&queue));

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(cfg.delimiter)
        .from_reader(input);
    let mut record = ByteRecord::new();
    let mut records = 0u64;
    loop {
        let more = rdr
            .read_byte_record(&mut record)
            .with_context(|| format!("parse CSV record #{}", records + 1))?;
        if !more {
            break;
        }
        engine.record(&record);
        records += 1;
    }
    engine.finish();

    // One sentinel per worker; each consumer exits on the first one it sees.
    for _ in 0..workers {
        queue.finish();
    }
    let mut result = Ok(());
    for h in handles {
        match h.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                if result.is_ok() {
                    result = Err(e);
                }
            }
            Err(_) => {
                if result.is_ok() {
                    result = Err(anyhow!("write worker panicked"));
                }
            }
        }
    }
    result?;

    // Final trigger marking overall completion.
    if let Some(t) = &trigger {
        run_trigger(t, "", 0);
    }

    Ok(SplitSummary {
        files: engine.files_written(),
        records,
    })
}
