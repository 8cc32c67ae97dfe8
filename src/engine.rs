//! The streaming split engine.
//!
//! [`SplitEngine`] consumes one field/record event stream from the CSV
//! reader, re-serializes rows into a reusable [`RecordBuffer`], and decides
//! per record whether an output file boundary has been reached. With group
//! tracking enabled, a boundary that falls inside a run of equal group
//! values is deferred: the engine records the buffer offset of the last
//! completed row (the overflow position) and only cuts the file when the
//! group column's value changes, or at end of input. Completed files are
//! handed to the write workers as [`FlushPayload`]s through the bounded
//! queue, which blocks the producer when the write side falls behind.
//!
//! All engine state is driven synchronously from the single parse thread,
//! so it needs no internal locking.

use crate::buffer::RecordBuffer;
use crate::config::SplitConfig;
use crate::queue::BoundedQueue;
use csv::ByteRecord;
use std::path::PathBuf;
use std::sync::Arc;

/// An owned, finalized output file crossing from the engine to a write
/// worker. Ownership transfers wholly: producer until enqueued, the
/// dequeuing worker thereafter.
#[derive(Debug)]
pub struct FlushPayload {
    /// Destination file path.
    pub path: PathBuf,
    /// The bytes to write, duplicated out of the engine's buffer.
    pub data: Vec<u8>,
    /// Number of records `data` represents.
    pub rows: u64,
}

/// Row/column state machine that partitions a record stream into output
/// files.
pub struct SplitEngine {
    out: RecordBuffer,
    /// Last-seen value of the group column; persists across flushes.
    group_val: Option<RecordBuffer>,
    /// Completed rows currently in the buffer.
    rows: u64,
    /// Column index within the active row.
    col: usize,
    pending_delim: bool,
    rows_per_file: u64,
    group_column: Option<usize>,
    /// Byte offset of the deferred cut point; 0 means unset. Only ever set
    /// when group tracking is enabled, and always lands on a completed row
    /// boundary.
    overflow_pos: usize,
    /// Sequence number of the last file produced; file names start at 1.
    seq: u32,
    out_dir: PathBuf,
    prefix: String,
    delimiter: u8,
    queue: Arc<BoundedQueue<FlushPayload>>,
}

impl SplitEngine {
    /// Build an engine writing files named `<prefix>.<seq>` under the
    /// configured output directory.
    pub fn new(cfg: &SplitConfig, prefix: &str, queue: Arc<BoundedQueue<FlushPayload>>) -> Self {
        Self {
            out: RecordBuffer::with_capacity(cfg.buffer_capacity),
            group_val: None,
            rows: 0,
            col: 0,
            pending_delim: false,
            rows_per_file: cfg.rows_per_file,
            group_column: cfg.group_column,
            overflow_pos: 0,
            seq: 0,
            out_dir: cfg.output_dir.clone(),
            prefix: prefix.to_string(),
            delimiter: cfg.delimiter,
            queue,
        }
    }

    /// Feed one parsed field.
    pub fn field(&mut self, s: &[u8]) {
        if self.pending_delim {
            self.out.push_byte(self.delimiter);
        }
        self.pending_delim = true;

        if self.group_column == Some(self.col) {
            // A value change while a cut is deferred forces the flush now.
            let changed = match &self.group_val {
                Some(prev) => self.overflow_pos > 0 && prev.as_bytes() != s,
                None => false,
            };
            if changed {
                self.flush(true);
            }
            match &mut self.group_val {
                Some(prev) => prev.set_contents(s),
                None => {
                    let mut buf = RecordBuffer::with_capacity(s.len());
                    buf.set_contents(s);
                    self.group_val = Some(buf);
                }
            }
        }

        self.out.push_escaped(s, self.delimiter);
        self.col += 1;
    }

    /// Feed one record boundary.
    pub fn end_record(&mut self) {
        self.out.push_byte(b'\n');
        self.rows += 1;
        if self.rows == self.rows_per_file {
            // This record completes a full batch. With group tracking the
            // cut is deferred until the group value changes; otherwise the
            // file is finalized immediately.
            if self.group_column.is_some() {
                self.overflow_pos = self.out.position();
            } else {
                self.flush(false);
            }
        } else if self.overflow_pos > 0 {
            // Already deferring: keep the cut point on the last completed
            // row so same-group rows landing after the limit stay in the
            // flushed file.
            self.overflow_pos = self.out.position();
        }
        self.col = 0;
        self.pending_delim = false;
    }

    /// Feed a whole record: every field, then the record boundary.
    pub fn record(&mut self, rec: &ByteRecord) {
        for f in rec.iter() {
            self.field(f);
        }
        self.end_record();
    }

    /// Emit the trailing partial file, if any. Call once at end of input.
    pub fn finish(&mut self) {
        if self.out.position() > 0 {
            self.flush(false);
        }
    }

    /// Number of files produced so far.
    pub fn files_written(&self) -> u32 {
        self.seq
    }

    /// Finalize the current buffer into a [`FlushPayload`] and enqueue it.
    ///
    /// With `use_overflow`, the cut happens at the recorded overflow
    /// position and any bytes past it (the partially written current row)
    /// stay in the buffer as the start of the next file. Row and overflow
    /// counters reset; the group value does not.
    fn flush(&mut self, use_overflow: bool) {
        let flush_len = if use_overflow && self.overflow_pos > 0 {
            self.overflow_pos
        } else {
            self.out.position()
        };
        self.seq += 1;
        let payload = FlushPayload {
            path: self.out_dir.join(format!("{}.{}", self.prefix, self.seq)),
            data: self.out.duplicate_up_to(flush_len),
            rows: self.rows,
        };
        self.out.discard_front(flush_len);
        self.rows = 0;
        self.overflow_pos = 0;
        // Backpressure: blocks while the write queue is at capacity.
        self.queue.push(payload);
    }
}
