//! Split run configuration.

use std::path::PathBuf;

/// Default backlog allowed in the write queue before the producer blocks.
pub const DEFAULT_QUEUE_DEPTH: usize = 20;

/// Default initial capacity of the output accumulator, sized aggressively
/// so typical batches never reallocate.
pub const DEFAULT_BUFFER_CAPACITY: usize = 10 * 1024 * 1000;

/// Configuration for one split run.
///
/// `workers` may be zero, meaning one write thread per CPU; the runner
/// expands it before spawning.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Input file to split; `None` reads from standard input.
    pub input: Option<PathBuf>,
    /// Output file prefix used when reading from standard input (where no
    /// input file name exists to derive one from).
    pub stdin_prefix: Option<String>,
    /// Directory the output files are written into.
    pub output_dir: PathBuf,
    /// Maximum number of rows per output file. Must be positive.
    pub rows_per_file: u64,
    /// Index of a column whose equal-valued contiguous rows must never be
    /// split across two output files. `None` disables group tracking.
    pub group_column: Option<usize>,
    /// Shell command run after each finalized file, with the file path and
    /// row count exported in its environment. Empty or `None` disables it.
    pub trigger: Option<String>,
    /// Number of background write threads; 0 means one per CPU.
    pub workers: usize,
    /// Maximum depth of the write queue.
    pub queue_depth: usize,
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Initial capacity of the output accumulator.
    pub buffer_capacity: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            input: None,
            stdin_prefix: None,
            output_dir: PathBuf::from("."),
            rows_per_file: 1,
            group_column: None,
            trigger: None,
            workers: 1,
            queue_depth: DEFAULT_QUEUE_DEPTH,
            delimiter: b',',
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}
