/*!
 * Process Loading and Report Export
 * CSV boundary around the engine; malformed input is rejected here and
 * never reaches the simulation
 */

use crate::core::errors::{LoadError, LoadResult};
use crate::core::types::{Pid, Size, Tick};
use crate::engine::Summary;
use crate::process::Process;
use log::info;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::Path;

const COLUMNS: [&str; 4] = ["pid", "size", "arrival", "burst"];

/// Read process records from a CSV file with header `pid,size,arrival,burst`
/// (columns may appear in any order). Validates pid uniqueness and the
/// positivity constraints; returns records in file order, the engine sorts.
pub fn read_processes_csv(path: impl AsRef<Path>) -> LoadResult<Vec<Process>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let processes = parse_processes(&content)?;
    info!(
        "loaded {} process records from {}",
        processes.len(),
        path.display()
    );
    Ok(processes)
}

fn parse_processes(content: &str) -> LoadResult<Vec<Process>> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(number, line)| (number + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let header = match lines.next() {
        Some((_, header)) => header,
        None => return Ok(Vec::new()),
    };
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let mut indices = [0usize; 4];
    for (slot, name) in indices.iter_mut().zip(COLUMNS) {
        *slot = columns
            .iter()
            .position(|column| column.eq_ignore_ascii_case(name))
            .ok_or(LoadError::MissingColumn(name))?;
    }
    let [pid_at, size_at, arrival_at, burst_at] = indices;

    let mut processes = Vec::new();
    let mut seen = HashSet::new();

    for (line_number, line) in lines {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < columns.len() {
            return Err(LoadError::ShortRow {
                line: line_number,
                expected: columns.len(),
                found: fields.len(),
            });
        }

        let pid: Pid = parse_field(fields[pid_at], "pid", line_number)?;
        let size: Size = parse_field(fields[size_at], "size", line_number)?;
        let arrival: Tick = parse_field(fields[arrival_at], "arrival", line_number)?;
        let burst: Tick = parse_field(fields[burst_at], "burst", line_number)?;

        if pid == 0 {
            return Err(LoadError::NonPositive {
                line: line_number,
                field: "pid",
            });
        }
        if size == 0 {
            return Err(LoadError::NonPositive {
                line: line_number,
                field: "size",
            });
        }
        if burst == 0 {
            return Err(LoadError::NonPositive {
                line: line_number,
                field: "burst",
            });
        }
        if !seen.insert(pid) {
            return Err(LoadError::DuplicatePid(pid));
        }

        processes.push(Process::new(pid, size, arrival, burst));
    }

    Ok(processes)
}

fn parse_field<T: std::str::FromStr>(
    value: &str,
    field: &'static str,
    line: usize,
) -> LoadResult<T> {
    value.parse().map_err(|_| LoadError::InvalidField {
        line,
        field,
        value: value.to_string(),
    })
}

/// Write the final summary as CSV: one row per process, then a summary
/// block. Timing columns are empty for processes that never ran.
pub fn write_report_csv(path: impl AsRef<Path>, summary: &Summary) -> LoadResult<()> {
    let path = path.as_ref();
    std::fs::write(path, render_report(summary)).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!("simulation report written to {}", path.display());
    Ok(())
}

fn render_report(summary: &Summary) -> String {
    fn opt(value: Option<impl ToString>) -> String {
        value.map_or_else(String::new, |v| v.to_string())
    }

    let mut out = String::new();
    out.push_str("pid,arrival,burst,start_time,finish_time,turnaround,wait,size\n");
    for row in &summary.processes {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            row.pid,
            row.arrival,
            row.burst,
            opt(row.start_time),
            opt(row.finish_time),
            opt(row.turnaround),
            opt(row.wait),
            row.size
        );
    }
    out.push('\n');
    out.push_str("SUMMARY,,,,,,,\n");
    let _ = writeln!(out, "avg_turnaround,{:.2}", summary.avg_turnaround);
    let _ = writeln!(out, "avg_wait,{:.2}", summary.avg_wait);
    let _ = writeln!(out, "throughput,{:.4}", summary.throughput);
    let _ = writeln!(out, "total_time,{}", summary.total_time);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_records() {
        let content = "pid,size,arrival,burst\n1,64,0,3\n2,128,1,2\n";
        let processes = parse_processes(content).unwrap();
        assert_eq!(processes.len(), 2);
        assert_eq!(processes[0].pid, 1);
        assert_eq!(processes[0].remaining, 3);
        assert_eq!(processes[1].size, 128);
    }

    #[test]
    fn test_parse_reordered_columns() {
        let content = "burst,pid,arrival,size\n3,1,0,64\n";
        let processes = parse_processes(content).unwrap();
        assert_eq!(processes[0].pid, 1);
        assert_eq!(processes[0].burst, 3);
        assert_eq!(processes[0].size, 64);
    }

    #[test]
    fn test_missing_column_rejected() {
        let err = parse_processes("pid,size,arrival\n1,64,0\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("burst")));
    }

    #[test]
    fn test_invalid_field_rejected() {
        let err = parse_processes("pid,size,arrival,burst\n1,sixty,0,3\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidField { field: "size", .. }
        ));
    }

    #[test]
    fn test_duplicate_pid_rejected() {
        let err = parse_processes("pid,size,arrival,burst\n1,64,0,3\n1,32,1,2\n").unwrap_err();
        assert!(matches!(err, LoadError::DuplicatePid(1)));
    }

    #[test]
    fn test_zero_burst_rejected() {
        let err = parse_processes("pid,size,arrival,burst\n1,64,0,0\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::NonPositive {
                field: "burst",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_input_is_empty_set() {
        assert!(parse_processes("").unwrap().is_empty());
        assert!(parse_processes("pid,size,arrival,burst\n").unwrap().is_empty());
    }
}
