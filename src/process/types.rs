/*!
 * Process Types
 * Process records and lifecycle states
 */

use crate::core::types::{Pid, Size, Tick};
use serde::{Deserialize, Serialize};

/// Process state
///
/// Transitions: New -> Ready or New -> ReadySuspended on arrival handling,
/// Ready <-> Running under scheduling and preemption, Running -> Terminated
/// on exhausting the burst, ReadySuspended -> Ready on de-suspension. No
/// transition ever returns a process to New.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Created by the loader, not yet handled by the engine
    New,
    /// Resident in memory, waiting for the CPU
    Ready,
    /// Admitted to the system but holding no partition
    ReadySuspended,
    /// Currently on the CPU
    Running,
    /// Burst fully consumed
    Terminated,
}

/// A simulated process
///
/// At any instant a process is owned by exactly one container: the arrivals
/// backlog, the ready queue, the suspended queue, the running slot, or the
/// terminated list. The engine moves processes between containers by value,
/// so double residency is structurally impossible.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Process {
    pub pid: Pid,
    pub size: Size,
    pub arrival: Tick,
    pub burst: Tick,
    /// CPU ticks left, monotonically non-increasing while running
    pub remaining: Tick,
    /// First tick the process began running; set once, never overwritten
    pub start_time: Option<Tick>,
    /// Tick immediately after the last executed tick
    pub finish_time: Option<Tick>,
    pub state: ProcessState,
}

impl Process {
    #[must_use]
    pub fn new(pid: Pid, size: Size, arrival: Tick, burst: Tick) -> Self {
        Self {
            pid,
            size,
            arrival,
            burst,
            remaining: burst,
            start_time: None,
            finish_time: None,
            state: ProcessState::New,
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, ProcessState::Running)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        matches!(self.state, ProcessState::Terminated)
    }

    /// Turnaround time (finish minus arrival), known once the process finished
    #[must_use]
    pub fn turnaround(&self) -> Option<Tick> {
        self.finish_time.map(|finish| finish - self.arrival)
    }

    /// Wait time (turnaround minus burst)
    #[must_use]
    pub fn wait(&self) -> Option<Tick> {
        self.turnaround().map(|turnaround| turnaround - self.burst)
    }
}
