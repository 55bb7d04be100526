/*!
 * Simulation Configuration
 *
 * Startup parameters are resolved from, in order:
 * 1. Command-line arguments
 * 2. `MEMSIM_*` environment variables
 * 3. An interactive prompt
 */

use crate::core::errors::ConfigError;
use crate::core::limits::{ENV_MAX_TICKS, ENV_MEMORY_SIZE, ENV_PROCESS_FILE};
use crate::core::types::{Size, Tick};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const USAGE: &str = "\
Memory allocation simulator - first-fit placement with compaction

Usage: memsim [OPTIONS] [MEMORY_SIZE] [PROCESS_FILE]

Arguments:
  MEMORY_SIZE   Total memory size (positive integer)
  PROCESS_FILE  File with one `arrival_time size burst_time` record per line

Options:
  --json            Print the final report as JSON
  -q, --quiet       Do not print the memory map after every tick
  --max-ticks <N>   Stop after N ticks even if work remains
  -h, --help        Print this help message

Missing parameters are read from MEMSIM_MEMORY_SIZE, MEMSIM_PROCESS_FILE and
MEMSIM_MAX_TICKS, then prompted for on stdin.";

/// Final report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub memory_size: Size,
    pub process_file: PathBuf,
    /// Stop after this many ticks even if processes remain
    pub max_ticks: Option<Tick>,
    pub show_memory_map: bool,
    pub output: OutputFormat,
}

impl SimulationConfig {
    pub fn new(memory_size: Size, process_file: impl Into<PathBuf>) -> Self {
        Self {
            memory_size,
            process_file: process_file.into(),
            max_ticks: None,
            show_memory_map: true,
            output: OutputFormat::Table,
        }
    }

    pub fn with_max_ticks(mut self, max_ticks: Tick) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    pub fn quiet(mut self) -> Self {
        self.show_memory_map = false;
        self
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(SimulationConfig),
    Help,
}

/// Parse a total memory size; must be a positive integer
pub fn parse_memory_size(raw: &str) -> Result<Size, ConfigError> {
    match raw.trim().parse::<Size>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ConfigError::InvalidMemorySize(raw.trim().to_string())),
    }
}

fn parse_max_ticks(raw: &str) -> Result<Tick, ConfigError> {
    raw.trim()
        .parse::<Tick>()
        .map_err(|_| ConfigError::InvalidArgument(format!("--max-ticks expects an integer, got {:?}", raw)))
}

/// Resolve the configuration from arguments (program name excluded), an
/// environment lookup and a prompt used for anything still missing
pub fn resolve<I, E, P>(args: I, env: E, mut prompt: P) -> Result<Command, ConfigError>
where
    I: IntoIterator<Item = String>,
    E: Fn(&str) -> Option<String>,
    P: FnMut(&str) -> std::io::Result<String>,
{
    let mut output = OutputFormat::Table;
    let mut show_memory_map = true;
    let mut max_ticks = None;
    let mut positional: Vec<String> = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--json" => output = OutputFormat::Json,
            "-q" | "--quiet" => show_memory_map = false,
            "--max-ticks" => {
                let value = args
                    .next()
                    .ok_or_else(|| ConfigError::InvalidArgument("--max-ticks needs a value".to_string()))?;
                max_ticks = Some(parse_max_ticks(&value)?);
            }
            _ if arg.starts_with('-') => {
                return Err(ConfigError::InvalidArgument(format!("unknown option {}", arg)))
            }
            _ => positional.push(arg),
        }
    }
    if positional.len() > 2 {
        return Err(ConfigError::InvalidArgument(format!(
            "expected at most 2 arguments, got {}",
            positional.len()
        )));
    }
    let mut positional = positional.into_iter();

    let memory_raw = match positional.next().or_else(|| env(ENV_MEMORY_SIZE)) {
        Some(raw) => raw,
        None => prompt("Enter total RAM size: ")
            .map_err(|_| ConfigError::MissingParameter("memory size"))?,
    };
    let memory_size = parse_memory_size(&memory_raw)?;

    let process_file = match positional.next().or_else(|| env(ENV_PROCESS_FILE)) {
        Some(path) => path,
        None => prompt("Enter process file: ")
            .map_err(|_| ConfigError::MissingParameter("process file"))?,
    };
    let process_file = process_file.trim().to_string();
    if process_file.is_empty() {
        return Err(ConfigError::MissingParameter("process file"));
    }

    if max_ticks.is_none() {
        if let Some(raw) = env(ENV_MAX_TICKS) {
            max_ticks = Some(parse_max_ticks(&raw)?);
        }
    }

    Ok(Command::Run(SimulationConfig {
        memory_size,
        process_file: PathBuf::from(process_file),
        max_ticks,
        show_memory_map,
        output,
    }))
}
