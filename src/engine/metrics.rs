/*!
 * Final Metrics
 * Per-process and aggregate results computed at completion
 */

use crate::core::types::{Pid, Size, Tick};
use crate::process::Process;
use serde::{Deserialize, Serialize};

/// Per-process result row.
///
/// Timing fields are `None` for processes that never ran: a permanently
/// oversized process stays suspended for the whole run and is reported here
/// with null timing, excluded from the aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub arrival: Tick,
    pub burst: Tick,
    pub size: Size,
    pub start_time: Option<Tick>,
    pub finish_time: Option<Tick>,
    pub turnaround: Option<Tick>,
    pub wait: Option<Tick>,
}

impl From<&Process> for ProcessMetrics {
    fn from(process: &Process) -> Self {
        Self {
            pid: process.pid,
            arrival: process.arrival,
            burst: process.burst,
            size: process.size,
            start_time: process.start_time,
            finish_time: process.finish_time,
            turnaround: process.turnaround(),
            wait: process.wait(),
        }
    }
}

/// Aggregate results of a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Summary {
    pub processes: Vec<ProcessMetrics>,
    pub avg_turnaround: f64,
    pub avg_wait: f64,
    /// Terminated processes per tick; 0.0 for an empty run
    pub throughput: f64,
    pub total_time: Tick,
}

impl Summary {
    /// Compute aggregates over the terminated list. Stranded processes are
    /// appended to the per-process rows but never enter the averages or the
    /// throughput.
    pub(super) fn compute<'a>(
        terminated: &[Process],
        stranded: impl Iterator<Item = &'a Process>,
        total_time: Tick,
    ) -> Self {
        let mut processes: Vec<ProcessMetrics> =
            terminated.iter().map(ProcessMetrics::from).collect();

        let count = terminated.len();
        let total_turnaround: Tick = terminated.iter().filter_map(Process::turnaround).sum();
        let total_wait: Tick = terminated.iter().filter_map(Process::wait).sum();

        let (avg_turnaround, avg_wait) = if count > 0 {
            (
                total_turnaround as f64 / count as f64,
                total_wait as f64 / count as f64,
            )
        } else {
            (0.0, 0.0)
        };

        let throughput = if total_time == 0 {
            0.0
        } else {
            count as f64 / total_time as f64
        };

        processes.extend(stranded.map(ProcessMetrics::from));

        Self {
            processes,
            avg_turnaround,
            avg_wait,
            throughput,
            total_time,
        }
    }
}
