/*!
 * Reporting
 * Console tables and JSON output for simulation results
 */

use crate::memory::MemoryBlock;
use crate::simulation::{SimulationReport, SimulationStats, TickSnapshot};
use std::fmt::Write;
use std::io;

const MAP_RULE: &str = "+----------------+-----------+----------+";
const STATS_RULE: &str = "+----------------------+----------+";

/// Memory map table, one row per block
pub fn render_memory_map(blocks: &[MemoryBlock]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Current Memory Map:");
    let _ = writeln!(out, "{}", MAP_RULE);
    let _ = writeln!(out, "| Start Address  |   Size    |  Status  |");
    let _ = writeln!(out, "{}", MAP_RULE);
    for block in blocks {
        let _ = writeln!(
            out,
            "| {:>14} | {:>9} | {:<8} |",
            block.start,
            block.size,
            block.status.to_string()
        );
    }
    let _ = writeln!(out, "{}", MAP_RULE);
    out
}

/// Header line plus memory map for one tick
pub fn render_tick(snapshot: &TickSnapshot) -> String {
    format!(
        "Time {} ({} running, {} waiting)\n{}",
        snapshot.tick,
        snapshot.running,
        snapshot.waiting,
        render_memory_map(&snapshot.blocks)
    )
}

/// Write one tick's header and memory map to `out`, surfacing write failures
pub fn write_tick<W: io::Write>(out: &mut W, snapshot: &TickSnapshot) -> io::Result<()> {
    writeln!(out, "\n{}", render_tick(snapshot))
}

/// Final statistics table
pub fn render_statistics(stats: &SimulationStats) -> String {
    let rows = [
        ("Total Processes", stats.total_processes.to_string()),
        ("Successfully Alloc'd", stats.allocated.to_string()),
        ("Average Process Size", format!("{:.2}", stats.average_size)),
        ("Largest Process", stats.largest_size.to_string()),
        ("Smallest Process", stats.smallest_size.to_string()),
        ("Rejected", stats.rejected.to_string()),
        ("Completed", stats.completed.to_string()),
        ("Still Waiting", stats.still_waiting.to_string()),
        ("Compactions", stats.compactions.to_string()),
        ("Ticks Elapsed", stats.ticks_elapsed.to_string()),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "Final Statistics:");
    let _ = writeln!(out, "{}", STATS_RULE);
    let _ = writeln!(out, "| {:<20} | {:<8} |", "Metric", "Value");
    let _ = writeln!(out, "{}", STATS_RULE);
    for (label, value) in rows {
        let _ = writeln!(out, "| {:<20} | {:>8} |", label, value);
    }
    let _ = writeln!(out, "{}", STATS_RULE);
    out
}

/// Processes still queued when the run stopped
pub fn render_waiting(report: &SimulationReport) -> String {
    let mut out = String::new();
    if report.waiting.is_empty() {
        return out;
    }
    let _ = writeln!(out, "Still waiting:");
    for entry in &report.waiting {
        let _ = writeln!(
            out,
            "  PID {:>4}  size {:>6}  attempts {}",
            entry.process.pid, entry.process.size, entry.attempts
        );
    }
    out
}

/// Pretty-printed JSON report
pub fn render_json(report: &SimulationReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
