/*!
 * memsim - Command Line Front End
 * Loads a process set from CSV, runs the simulation to completion, prints
 * the per-process table and summary, and exports the CSV report
 */

use log::warn;
use memsim::{
    read_processes_csv, write_report_csv, EngineConfig, SimulationEngine, Summary, TickReport,
};
use miette::{bail, IntoDiagnostic, Result};
use std::path::PathBuf;

const REPORT_PATH: &str = "simulation_report.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickLog {
    None,
    Events,
    Ticks,
}

struct Args {
    csv: PathBuf,
    tick_log: TickLog,
    header: bool,
    debug: bool,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut csv = None;
    let mut tick_log = TickLog::None;
    let mut header = true;
    let mut debug = false;
    let mut json = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--csv" => {
                let Some(path) = args.next() else {
                    bail!("--csv requires a path argument");
                };
                csv = Some(PathBuf::from(path));
            }
            "--tick-log" => {
                tick_log = match args.next().as_deref() {
                    Some("none") => TickLog::None,
                    Some("events") => TickLog::Events,
                    Some("ticks") => TickLog::Ticks,
                    other => bail!(
                        "--tick-log expects none|events|ticks, got {:?}",
                        other.unwrap_or("nothing")
                    ),
                };
            }
            "--no-header" => header = false,
            "--debug" => debug = true,
            "--json" => json = true,
            "--help" | "-h" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            other => bail!("unknown argument '{}'\n{}", other, USAGE),
        }
    }

    let Some(csv) = csv else {
        bail!("--csv PATH is required\n{}", USAGE);
    };
    Ok(Args {
        csv,
        tick_log,
        header,
        debug,
        json,
    })
}

const USAGE: &str =
    "usage: memsim --csv PATH [--tick-log none|events|ticks] [--no-header] [--debug] [--json]";

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args()?;
    let processes = read_processes_csv(&args.csv)?;
    if processes.is_empty() {
        bail!("no process records in {}", args.csv.display());
    }

    let config = EngineConfig::default().with_debug_mode(args.debug);
    let mut engine = SimulationEngine::with_config(config);
    engine.reset(processes);
    let summary = engine.run_to_completion();

    if args.json {
        // Machine-readable form: the structured summary on stdout
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).into_diagnostic()?
        );
    } else {
        print_tick_log(engine.history(), args.tick_log);
        print_process_table(&summary, args.header);
        print_summary(&summary, args.header);
    }

    if let Err(error) = write_report_csv(REPORT_PATH, &summary) {
        // The report is a convenience; its failure never voids the run
        warn!("failed to export {}: {}", REPORT_PATH, error);
    }

    Ok(())
}

fn print_tick_log(history: &[TickReport], mode: TickLog) {
    let reports: Box<dyn Iterator<Item = &TickReport>> = match mode {
        TickLog::None => return,
        TickLog::Events => Box::new(history.iter().filter(|report| report.event_occurred)),
        TickLog::Ticks => Box::new(history.iter()),
    };
    for report in reports {
        println!("--- tick {} ---", report.time);
        println!("{}", report.snapshot);
    }
}

fn print_process_table(summary: &Summary, header: bool) {
    if summary.processes.is_empty() {
        println!("No processes completed.");
        return;
    }

    if header {
        println!("\nProcess Results:");
        println!("pid  arrival  burst  start_time  finish_time  turnaround  wait");
        println!("---  -------  -----  ----------  -----------  ----------  ----");
    }

    for row in &summary.processes {
        let opt = |value: Option<u64>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
        println!(
            "{:3}  {:7}  {:5}  {:>10}  {:>11}  {:>10}  {:>4}",
            row.pid,
            row.arrival,
            row.burst,
            opt(row.start_time),
            opt(row.finish_time),
            opt(row.turnaround),
            opt(row.wait)
        );
    }
}

fn print_summary(summary: &Summary, header: bool) {
    if header {
        println!("\nSummary:");
    }
    println!("Average Turnaround Time: {:.2}", summary.avg_turnaround);
    println!("Average Wait Time: {:.2}", summary.avg_wait);
    println!("Throughput: {:.4} processes/time unit", summary.throughput);
    println!("Total Simulation Time: {}", summary.total_time);
}
