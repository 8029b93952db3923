/*!
 * Memory Manager Tests
 * Best-fit policy over the fixed partition table
 */

use memsim::MemoryManager;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_best_fit_spec_cases() {
    let memory = MemoryManager::new();
    assert_eq!(memory.partition(memory.best_fit(45).unwrap()).size, 50);
    assert_eq!(memory.partition(memory.best_fit(120).unwrap()).size, 150);
    assert_eq!(memory.partition(memory.best_fit(200).unwrap()).size, 250);
    assert_eq!(memory.best_fit(300), None);
}

#[test]
fn test_exact_fit_leaves_no_fragmentation() {
    let mut memory = MemoryManager::new();
    let index = memory.best_fit(50).unwrap();
    assert_eq!(memory.partition(index).id, "P3");
    memory.assign(index, 1);

    let mut sizes = std::collections::HashMap::new();
    sizes.insert(1, 50);
    let snapshot = memory.snapshot(&sizes);
    assert_eq!(snapshot[2].internal_fragmentation, 0);
}

#[test]
fn test_all_occupied_rejects_everything() {
    let mut memory = MemoryManager::new();
    for pid in 1..=3 {
        let index = memory.best_fit(10).unwrap();
        memory.assign(index, pid);
    }
    assert_eq!(memory.best_fit(1), None);
}

proptest! {
    // For any request, the chosen partition is the minimal-capacity free
    // partition that satisfies it; None only when nothing is large enough.
    #[test]
    fn best_fit_returns_minimal_sufficient_partition(size in 1usize..400) {
        let memory = MemoryManager::new();
        match memory.best_fit(size) {
            Some(index) => {
                let chosen = memory.partition(index);
                prop_assert!(chosen.size >= size);
                for partition in memory.partitions() {
                    if partition.size >= size {
                        prop_assert!(chosen.size <= partition.size);
                    }
                }
            }
            None => {
                for partition in memory.partitions() {
                    prop_assert!(partition.size < size);
                }
            }
        }
    }
}
