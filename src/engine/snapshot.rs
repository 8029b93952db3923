/*!
 * Tick Reports and State Snapshots
 * Strongly-typed per-tick views, renderable as data or text
 */

use crate::core::types::{Pid, Size, Tick};
use crate::memory::PartitionSnapshot;
use crate::process::Process;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Condensed view of one process inside a queue or the CPU slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessView {
    pub pid: Pid,
    pub remaining: Tick,
    pub size: Size,
}

impl From<&Process> for ProcessView {
    fn from(process: &Process) -> Self {
        Self {
            pid: process.pid,
            remaining: process.remaining,
            size: process.size,
        }
    }
}

/// Full engine state at the end of one tick.
///
/// The structured form serializes for machine consumption; `Display` renders
/// the human-readable block, so front ends pick whichever they need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StateSnapshot {
    pub time: Tick,
    pub running: Option<ProcessView>,
    pub memory: Vec<PartitionSnapshot>,
    /// Ready processes in dispatch order
    pub ready: Vec<ProcessView>,
    /// Suspended processes in FIFO order
    pub suspended: Vec<ProcessView>,
}

impl fmt::Display for StateSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.running {
            Some(view) => writeln!(f, "t={} | CPU: pid={}", self.time, view.pid)?,
            None => writeln!(f, "t={} | CPU: IDLE", self.time)?,
        }

        writeln!(f, "Memory:")?;
        writeln!(f, "  id  start  size  pid  frag  free")?;
        writeln!(f, "  --  -----  ----  ---  ----  ----")?;
        for entry in &self.memory {
            let pid = entry
                .pid
                .map_or_else(|| "---".to_string(), |pid| pid.to_string());
            let free = if entry.is_free { "Yes" } else { "No" };
            writeln!(
                f,
                "  {:<2}  {:>5}  {:>4}  {:>3}  {:>4}  {:<4}",
                entry.id, entry.start, entry.size, pid, entry.internal_fragmentation, free
            )?;
        }

        writeln!(f, "Ready:")?;
        if self.ready.is_empty() {
            writeln!(f, "  (empty)")?;
        } else {
            let items: Vec<String> = self
                .ready
                .iter()
                .map(|view| format!("pid={}(rem={})", view.pid, view.remaining))
                .collect();
            writeln!(f, "  {}", items.join(" "))?;
        }

        writeln!(f, "Ready_susp:")?;
        if self.suspended.is_empty() {
            writeln!(f, "  (empty)")
        } else {
            let items: Vec<String> = self
                .suspended
                .iter()
                .map(|view| format!("pid={}(size={})", view.pid, view.size))
                .collect();
            writeln!(f, "  {}", items.join(" "))
        }
    }
}

/// Report produced by one engine step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TickReport {
    pub time: Tick,
    pub running_pid: Option<Pid>,
    pub ready_count: usize,
    pub suspended_count: usize,
    pub multiprogramming_degree: usize,
    /// Whether an arrival or a termination happened this tick
    pub event_occurred: bool,
    pub snapshot: StateSnapshot,
}
