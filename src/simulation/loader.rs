/*!
 * Process File Loader
 * Reads `arrival_time size burst_time` records, one per line
 */

use crate::core::errors::ConfigError;
use crate::core::limits::MIN_PROCESS_RECORDS;
use crate::core::types::{Pid, Size, Tick};
use crate::process::Process;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse one line into `(arrival_time, size, burst_time)`
///
/// Exactly three non-negative integers are accepted; a zero size is refused
/// because no block can hold it.
pub fn parse_line(line: &str) -> Option<(Tick, Size, Tick)> {
    let mut fields = line.split_whitespace();
    let arrival = fields.next()?.parse::<Tick>().ok()?;
    let size = fields.next()?.parse::<Size>().ok()?;
    let burst = fields.next()?.parse::<Tick>().ok()?;
    if fields.next().is_some() || size == 0 {
        return None;
    }
    Some((arrival, size, burst))
}

/// Parse every well-formed record, numbering pids from 1 in file order
pub fn parse_processes<R: BufRead>(reader: R) -> std::io::Result<Vec<Process>> {
    let mut processes = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_line(&line) {
            Some((arrival, size, burst)) => {
                let pid = (processes.len() + 1) as Pid;
                processes.push(Process::new(pid, arrival, size, burst));
            }
            None => debug!("Skipping malformed line {}: {:?}", line_no + 1, line),
        }
    }
    Ok(processes)
}

/// Load a process file, requiring the minimum number of valid records
pub fn load_processes(path: &Path) -> Result<Vec<Process>, ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    let processes = parse_processes(BufReader::new(file)).map_err(io_err)?;

    if processes.len() < MIN_PROCESS_RECORDS {
        return Err(ConfigError::TooFewProcesses {
            found: processes.len(),
            required: MIN_PROCESS_RECORDS,
        });
    }
    Ok(processes)
}
