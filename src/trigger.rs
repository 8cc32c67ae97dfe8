//! External trigger command execution.
//!
//! After each output file is closed, an optional shell command runs with
//! the file path and row count exported in its environment. Failures are
//! logged and never abort the run.

use std::process::Command;

/// Environment variable holding the just-written file's path.
pub const ENV_PAYLOAD_FILE: &str = "CSV_PAYLOAD_FILE";

/// Environment variable holding the row count of the just-written file.
pub const ENV_ROW_COUNT: &str = "CSV_ROWCOUNT";

/// Run `cmd` through the shell with the payload path and row count in its
/// environment. At overall completion this is called once more with an
/// empty path and a row count of zero.
pub fn run_trigger(cmd: &str, payload_file: &str, row_count: u64) {
    let status = Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .env(ENV_PAYLOAD_FILE, payload_file)
        .env(ENV_ROW_COUNT, row_count.to_string())
        .status();
    match status {
        Ok(s) if s.success() => {}
        Ok(s) => eprintln!("trigger command {cmd:?} exited with {s}"),
        Err(e) => eprintln!("couldn't execute trigger command {cmd:?}: {e}"),
    }
}
