/*!
 * Memory Management
 * Best-fit allocation over a fixed partition table
 */

use crate::core::types::{Pid, Size};
use log::{debug, info, warn};
use std::collections::HashMap;

pub mod types;

pub use types::{Partition, PartitionSnapshot};

/// Index of a partition in the fixed table
pub type PartitionIndex = usize;

/// Owns the fixed partition table and tracks assignment.
///
/// The table is static: P1 250@100, P2 150@350, P3 50@500. The region 0-100
/// is reserved for the system and never allocatable. The best-fit policy is
/// strict: when no free partition is large enough the lookup returns `None`
/// and the caller decides on suspension.
pub struct MemoryManager {
    partitions: Vec<Partition>,
}

impl MemoryManager {
    #[must_use]
    pub fn new() -> Self {
        let partitions = vec![
            Partition::new("P1", 100, 250),
            Partition::new("P2", 350, 150),
            Partition::new("P3", 500, 50),
        ];
        info!(
            "memory manager initialized with {} fixed partitions",
            partitions.len()
        );
        Self { partitions }
    }

    /// Smallest free partition with capacity >= `size`; ties broken by table
    /// order. `None` when nothing fits.
    #[must_use]
    pub fn best_fit(&self, size: Size) -> Option<PartitionIndex> {
        let mut best: Option<PartitionIndex> = None;
        for (index, partition) in self.partitions.iter().enumerate() {
            if !partition.is_free() || partition.size < size {
                continue;
            }
            match best {
                Some(current) if self.partitions[current].size <= partition.size => {}
                _ => best = Some(index),
            }
        }
        best
    }

    /// Whether a process of `size` could fit in some partition, ignoring
    /// current occupancy. Used for the deadlock test on suspended processes.
    #[must_use]
    pub fn can_ever_fit(&self, size: Size) -> bool {
        self.partitions.iter().any(|p| p.size >= size)
    }

    /// Assign a partition to a process. The caller must have verified the
    /// partition was free (normally via `best_fit`).
    pub fn assign(&mut self, index: PartitionIndex, pid: Pid) {
        let partition = &mut self.partitions[index];
        partition.pid_assigned = Some(pid);
        debug!(
            "partition {} (size {}) assigned to pid {}",
            partition.id, partition.size, pid
        );
    }

    /// Release the partition held by `pid`. No-op if the pid holds nothing;
    /// termination cleanup is idempotent.
    pub fn release(&mut self, pid: Pid) {
        match self.partitions.iter_mut().find(|p| p.pid_assigned == Some(pid)) {
            Some(partition) => {
                partition.pid_assigned = None;
                debug!("partition {} released by pid {}", partition.id, pid);
            }
            None => warn!("release for pid {} ignored: no partition held", pid),
        }
    }

    #[must_use]
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    #[must_use]
    pub fn partition(&self, index: PartitionIndex) -> &Partition {
        &self.partitions[index]
    }

    /// Reporting snapshot in fixed table order. Fragmentation is computed
    /// from the supplied size map; 0 when the occupant's size is unknown.
    #[must_use]
    pub fn snapshot(&self, process_sizes: &HashMap<Pid, Size>) -> Vec<PartitionSnapshot> {
        self.partitions
            .iter()
            .map(|partition| {
                let fragmentation = partition
                    .pid_assigned
                    .and_then(|pid| process_sizes.get(&pid))
                    .map(|&size| partition.internal_fragmentation(size))
                    .unwrap_or(0);
                PartitionSnapshot {
                    id: partition.id.to_string(),
                    start: partition.start,
                    size: partition.size,
                    pid: partition.pid_assigned,
                    internal_fragmentation: fragmentation,
                    is_free: partition.is_free(),
                }
            })
            .collect()
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_fit_selects_smallest_sufficient() {
        let memory = MemoryManager::new();
        assert_eq!(memory.partition(memory.best_fit(45).unwrap()).size, 50);
        assert_eq!(memory.partition(memory.best_fit(120).unwrap()).size, 150);
        assert_eq!(memory.partition(memory.best_fit(200).unwrap()).size, 250);
        assert_eq!(memory.best_fit(300), None);
    }

    #[test]
    fn test_best_fit_skips_occupied() {
        let mut memory = MemoryManager::new();
        let small = memory.best_fit(10).unwrap();
        assert_eq!(memory.partition(small).id, "P3");
        memory.assign(small, 1);

        // Smallest free partition is now P2
        assert_eq!(memory.partition(memory.best_fit(10).unwrap()).id, "P2");
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut memory = MemoryManager::new();
        let index = memory.best_fit(40).unwrap();
        memory.assign(index, 7);
        assert!(!memory.partition(index).is_free());

        memory.release(7);
        assert!(memory.partition(index).is_free());

        // Releasing again (or an unknown pid) is a no-op
        memory.release(7);
        memory.release(999);
        assert!(memory.partitions().iter().all(Partition::is_free));
    }

    #[test]
    fn test_can_ever_fit_ignores_occupancy() {
        let mut memory = MemoryManager::new();
        for index in 0..memory.partitions().len() {
            memory.assign(index, index as Pid + 1);
        }
        assert!(memory.can_ever_fit(250));
        assert!(!memory.can_ever_fit(251));
    }

    #[test]
    fn test_snapshot_fragmentation() {
        let mut memory = MemoryManager::new();
        memory.assign(1, 4); // P2, size 150

        let mut sizes = HashMap::new();
        sizes.insert(4, 128);
        let snapshot = memory.snapshot(&sizes);

        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[1].pid, Some(4));
        assert_eq!(snapshot[1].internal_fragmentation, 22);
        assert!(!snapshot[1].is_free);
        assert_eq!(snapshot[0].internal_fragmentation, 0);
        assert!(snapshot[0].is_free);
    }

    #[test]
    fn test_snapshot_unknown_occupant_size_defaults_to_zero() {
        let mut memory = MemoryManager::new();
        memory.assign(0, 9);
        let snapshot = memory.snapshot(&HashMap::new());
        assert_eq!(snapshot[0].pid, Some(9));
        assert_eq!(snapshot[0].internal_fragmentation, 0);
    }
}
