/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

// Re-export MemoryError from memory module
pub use crate::memory::MemoryError;

/// Configuration errors - fatal, the simulation never starts
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Invalid memory size: {0:?}")]
    #[diagnostic(
        code(config::invalid_memory_size),
        help("Total memory size must be a positive integer.")
    )]
    InvalidMemorySize(String),

    #[error("Missing parameter: {0}")]
    #[diagnostic(
        code(config::missing_parameter),
        help("Pass it on the command line, set the matching MEMSIM_* variable, or answer the prompt.")
    )]
    MissingParameter(&'static str),

    #[error("Invalid argument: {0}")]
    #[diagnostic(code(config::invalid_argument), help("Run with --help for usage information."))]
    InvalidArgument(String),

    #[error("Cannot read process file {path}: {source}")]
    #[diagnostic(
        code(config::io_error),
        help("Check that the file exists and is readable.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Need at least {required} processes, found {found} valid records")]
    #[diagnostic(
        code(config::too_few_processes),
        help("Each line must hold three non-negative integers: arrival_time size burst_time.")
    )]
    TooFewProcesses { found: usize, required: usize },
}

/// Unified simulator error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Memory error: {0}")]
    #[diagnostic(
        code(memory::error),
        help("The block list failed an integrity check. Please report this issue.")
    )]
    Memory(#[from] MemoryError),

    #[error("Report serialization failed: {0}")]
    #[diagnostic(code(report::serialization))]
    Report(#[from] serde_json::Error),
}
