/*!
 * Memory Types
 * Fixed partitions and reporting snapshots
 */

use crate::core::types::{Address, Pid, Size};
use serde::{Deserialize, Serialize};

/// A fixed memory partition
///
/// Partitions are created once at engine reset and mutated in place for the
/// run's duration; they are never destroyed, only reassigned. A partition
/// holds 0 or 1 process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub id: &'static str,
    pub start: Address,
    pub size: Size,
    pub pid_assigned: Option<Pid>,
}

impl Partition {
    #[must_use]
    pub const fn new(id: &'static str, start: Address, size: Size) -> Self {
        Self {
            id,
            start,
            size,
            pid_assigned: None,
        }
    }

    /// A partition is free iff no process is assigned to it
    #[inline(always)]
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.pid_assigned.is_none()
    }

    /// Unused space given the occupant's size, floored at 0; 0 when free
    #[must_use]
    pub fn internal_fragmentation(&self, occupant_size: Size) -> Size {
        if self.is_free() {
            return 0;
        }
        self.size.saturating_sub(occupant_size)
    }
}

/// Reporting view of one partition, emitted in fixed table order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PartitionSnapshot {
    pub id: String,
    pub start: Address,
    pub size: Size,
    pub pid: Option<Pid>,
    pub internal_fragmentation: Size,
    pub is_free: bool,
}
