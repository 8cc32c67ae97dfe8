//! # csvshard
//!
//! A **streaming CSV splitter**: partitions one large delimited-text file
//! (or standard input) into a sequence of smaller files of at most a
//! configured number of records each, with two extras the usual split tools
//! lack:
//!
//! - **Group-aware boundaries** - designate a column, and rows sharing its
//!   value are never split across two output files (the input is assumed
//!   pre-sorted by that column). A file may exceed the row limit to keep a
//!   group together.
//! - **Per-file triggers** - after each output file is closed, an external
//!   shell command can run with the file's path and row count exported in
//!   its environment, and once more at overall completion with an empty
//!   path and a zero count.
//!
//! ## Architecture
//!
//! Parsing and splitting happen on the calling thread: the CSV reader feeds
//! records into the [`SplitEngine`], which re-serializes them into a
//! reusable [`RecordBuffer`] and cuts a [`FlushPayload`] whenever a file
//! boundary is reached. Payloads cross a [`BoundedQueue`] to background
//! write workers; the queue blocks the producer when the write side falls
//! behind, capping the memory held by pending files.
//!
//! Output files are named `<prefix>.<seq>` with the sequence starting at 1
//! and are enqueued in sequence order; with more than one write worker the
//! completion order across files is not guaranteed.
//!
//! ## Quick start
//!
//! ```no_run
//! use csvshard::{run, SplitConfig};
//! # fn main() -> anyhow::Result<()> {
//! let cfg = SplitConfig {
//!     input: Some("orders.csv".into()),
//!     output_dir: "out".into(),
//!     rows_per_file: 100_000,
//!     group_column: Some(0),
//!     ..SplitConfig::default()
//! };
//! let summary = run(&cfg)?;
//! println!("{} files, {} records", summary.files, summary.records);
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod config;
pub mod engine;
pub mod queue;
pub mod runner;
pub mod trigger;
pub mod writer;

pub use buffer::RecordBuffer;
pub use config::SplitConfig;
pub use engine::{FlushPayload, SplitEngine};
pub use queue::BoundedQueue;
pub use runner::{run, run_from_reader, SplitSummary};
pub use trigger::{run_trigger, ENV_PAYLOAD_FILE, ENV_ROW_COUNT};
pub use writer::spawn_workers;
