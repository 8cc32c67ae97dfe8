use anyhow::{ensure, Result};
use clap::Parser;
use csvshard::{run, SplitConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "csvshard")]
#[command(version, about = "Split a large CSV file into row-limited pieces", long_about = None)]
struct Cli {
    /// Maximum number of rows per output file
    #[arg(short = 'n', long = "num-rows")]
    num_rows: u64,

    /// Index of a column whose equal-valued rows are kept in the same
    /// output file (input must be sorted by it)
    #[arg(short = 'g', long = "group-col")]
    group_col: Option<usize>,

    /// Read input from standard input; FILE is used as the output prefix
    #[arg(long)]
    stdin: bool,

    /// Shell command to run after each output file is written; the file
    /// path and row count are exported as CSV_PAYLOAD_FILE and CSV_ROWCOUNT
    #[arg(short = 't', long)]
    trigger: Option<String>,

    /// Number of background write threads (0 = one per CPU)
    #[arg(long, default_value_t = 1)]
    workers: usize,

    /// Field delimiter
    #[arg(short = 'd', long, default_value_t = ',')]
    delimiter: char,

    /// Input file to split, or the output prefix when --stdin is given
    file: String,

    /// Directory where output files are written
    #[arg(default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    ensure!(
        cli.delimiter.is_ascii(),
        "delimiter must be a single ASCII character"
    );

    let (input, stdin_prefix) = if cli.stdin {
        (None, Some(cli.file))
    } else {
        (Some(PathBuf::from(cli.file)), None)
    };
    let cfg = SplitConfig {
        input,
        stdin_prefix,
        output_dir: cli.output_dir,
        rows_per_file: cli.num_rows,
        group_column: cli.group_col,
        trigger: cli.trigger,
        workers: cli.workers,
        delimiter: cli.delimiter as u8,
        ..SplitConfig::default()
    };

    let summary = run(&cfg)?;
    println!(
        "wrote {} file(s) from {} record(s)",
        summary.files, summary.records
    );
    Ok(())
}
