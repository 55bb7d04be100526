/*!
 * Memory Allocation Simulator - Main Entry Point
 *
 * Loads a batch of processes and simulates first-fit placement, coalescing,
 * compaction and admission retries until every process has finished.
 */

use miette::IntoDiagnostic;
use std::io::{self, BufRead, Write};
use tracing::info;

use memsim::report::{render_json, render_statistics, render_waiting, write_tick};
use memsim::simulation::config::{resolve, USAGE};
use memsim::simulation::{load_processes, Command, OutputFormat};
use memsim::{init_tracing, SimError, Simulation};

fn prompt(label: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", label)?;
    stdout.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no input"));
    }
    Ok(line)
}

fn main() -> miette::Result<()> {
    init_tracing("warn");

    let command = resolve(std::env::args().skip(1), |key| std::env::var(key).ok(), prompt)
        .map_err(SimError::from)?;
    let config = match command {
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Command::Run(config) => config,
    };

    let processes = load_processes(&config.process_file).map_err(SimError::from)?;
    info!(
        memory_size = config.memory_size,
        processes = processes.len(),
        file = %config.process_file.display(),
        "Configuration loaded"
    );

    let mut simulation =
        Simulation::new(config.memory_size, processes).with_max_ticks(config.max_ticks);

    let stdout = io::stdout();
    let report = match config.output {
        OutputFormat::Table => {
            writeln!(stdout.lock(), "Simulation Start (Memory: {} KB)", config.memory_size)
                .into_diagnostic()?;
            // The first failed write stops further output and fails the run once it ends
            let mut write_error: Option<io::Error> = None;
            let report = simulation.run_with(|snapshot| {
                if config.show_memory_map && write_error.is_none() {
                    write_error = write_tick(&mut stdout.lock(), snapshot).err();
                }
            });
            if let Some(e) = write_error {
                return Err(e).into_diagnostic();
            }
            let mut out = stdout.lock();
            writeln!(out, "\n{}", render_statistics(&report.stats)).into_diagnostic()?;
            write!(out, "{}", render_waiting(&report)).into_diagnostic()?;
            report
        }
        OutputFormat::Json => {
            let report = simulation.run();
            let json = render_json(&report).map_err(SimError::from)?;
            writeln!(stdout.lock(), "{}", json).into_diagnostic()?;
            report
        }
    };

    simulation.check_invariants().map_err(SimError::from)?;
    stdout.lock().flush().into_diagnostic()?;
    info!(run_id = %report.run_id, "Done");
    Ok(())
}
