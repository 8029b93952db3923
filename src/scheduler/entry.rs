/*!
 * Ready Queue Entry
 * Explicit comparable key for shortest-remaining-time ordering
 */

use crate::core::types::Tick;
use crate::process::Process;
use std::cmp::Ordering;

/// Ready-queue entry keyed by `(remaining ascending, sequence ascending)`.
///
/// The sequence number is assigned at insertion time and keeps processes
/// with equal remaining time in FIFO order. `BinaryHeap` is a max-heap, so
/// the comparison is reversed to pop the minimum key first. The remaining
/// time is copied into the key at insertion; it cannot change while the
/// process sits in the queue, since only the running process executes.
#[derive(Debug, Clone)]
pub(super) struct ReadyEntry {
    pub remaining: Tick,
    pub seq: u64,
    pub process: Process,
}

impl ReadyEntry {
    pub fn new(seq: u64, process: Process) -> Self {
        Self {
            remaining: process.remaining,
            seq,
            process,
        }
    }
}

impl PartialEq for ReadyEntry {
    fn eq(&self, other: &Self) -> bool {
        self.remaining == other.remaining && self.seq == other.seq
    }
}

impl Eq for ReadyEntry {}

impl Ord for ReadyEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: lower remaining pops first, earlier sequence breaks ties
        other
            .remaining
            .cmp(&self.remaining)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for ReadyEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
