/*!
 * SRTF Scheduler
 * Ready priority queue, suspended FIFO queue, and the single CPU slot
 */

use crate::process::Process;
use log::debug;
use std::collections::{BinaryHeap, VecDeque};

mod entry;

use entry::ReadyEntry;

/// Orders ready processes by shortest remaining time with stable FIFO
/// tie-breaking, keeps suspended processes in strict FIFO order, and tracks
/// the single running slot.
///
/// Processes move in and out by value; a process is never reachable from
/// two queues at once.
#[derive(Debug, Default)]
pub struct Scheduler {
    ready: BinaryHeap<ReadyEntry>,
    suspended: VecDeque<Process>,
    running: Option<Process>,
    next_seq: u64,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert into the ready queue with a fresh sequence number. The caller
    /// sets the process state to Ready.
    pub fn push_ready(&mut self, process: Process) {
        let seq = self.next_seq;
        self.next_seq += 1;
        debug!(
            "pid {} enters ready queue (remaining={}, seq={})",
            process.pid, process.remaining, seq
        );
        self.ready.push(ReadyEntry::new(seq, process));
    }

    /// Remove and return the ready process with the minimum key
    pub fn pop_ready_min(&mut self) -> Option<Process> {
        self.ready.pop().map(|entry| entry.process)
    }

    /// Ready process with the minimum key, without removing it
    #[must_use]
    pub fn peek_ready_min(&self) -> Option<&Process> {
        self.ready.peek().map(|entry| &entry.process)
    }

    /// Append to the suspended queue (strict FIFO)
    pub fn enqueue_suspended(&mut self, process: Process) {
        debug!("pid {} enters suspended queue", process.pid);
        self.suspended.push_back(process);
    }

    /// Take from the front of the suspended queue
    pub fn dequeue_suspended(&mut self) -> Option<Process> {
        self.suspended.pop_front()
    }

    /// Return a process to the front of the suspended queue after a failed
    /// admission retry, preserving FIFO order.
    pub fn requeue_suspended_front(&mut self, process: Process) {
        self.suspended.push_front(process);
    }

    #[must_use]
    pub fn peek_suspended_front(&self) -> Option<&Process> {
        self.suspended.front()
    }

    #[must_use]
    pub fn running(&self) -> Option<&Process> {
        self.running.as_ref()
    }

    pub fn running_mut(&mut self) -> Option<&mut Process> {
        self.running.as_mut()
    }

    /// Move a process into the CPU slot. The slot must be empty.
    pub fn set_running(&mut self, process: Process) {
        debug_assert!(self.running.is_none(), "CPU slot already occupied");
        self.running = Some(process);
    }

    /// Vacate the CPU slot
    pub fn take_running(&mut self) -> Option<Process> {
        self.running.take()
    }

    /// Preemption test: strictly smaller remaining time wins the CPU; ties
    /// never preempt.
    #[must_use]
    pub fn should_preempt(&self) -> bool {
        match (self.peek_ready_min(), self.running()) {
            (Some(candidate), Some(running)) => candidate.remaining < running.remaining,
            _ => false,
        }
    }

    /// Multiprogramming degree: ready plus running. Suspended processes
    /// hold no partition and do not count.
    #[must_use]
    pub fn count_in_memory(&self) -> usize {
        self.ready.len() + usize::from(self.running.is_some())
    }

    #[must_use]
    pub fn ready_len(&self) -> usize {
        self.ready.len()
    }

    #[must_use]
    pub fn suspended_len(&self) -> usize {
        self.suspended.len()
    }

    /// Ready processes in dispatch order (remaining ascending, then
    /// insertion order), for snapshots and invariant checks.
    #[must_use]
    pub fn ready_processes(&self) -> Vec<&Process> {
        let mut entries: Vec<&ReadyEntry> = self.ready.iter().collect();
        entries.sort_by_key(|entry| (entry.remaining, entry.seq));
        entries.into_iter().map(|entry| &entry.process).collect()
    }

    /// Suspended processes in FIFO order
    pub fn suspended_iter(&self) -> impl Iterator<Item = &Process> {
        self.suspended.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessState;

    fn ready(pid: u32, remaining: u64) -> Process {
        let mut process = Process::new(pid, 10, 0, remaining);
        process.state = ProcessState::Ready;
        process
    }

    #[test]
    fn test_pop_orders_by_remaining() {
        let mut scheduler = Scheduler::new();
        scheduler.push_ready(ready(1, 6));
        scheduler.push_ready(ready(2, 2));
        scheduler.push_ready(ready(3, 4));

        assert_eq!(scheduler.pop_ready_min().unwrap().pid, 2);
        assert_eq!(scheduler.pop_ready_min().unwrap().pid, 3);
        assert_eq!(scheduler.pop_ready_min().unwrap().pid, 1);
        assert!(scheduler.pop_ready_min().is_none());
    }

    #[test]
    fn test_equal_remaining_is_fifo() {
        let mut scheduler = Scheduler::new();
        scheduler.push_ready(ready(1, 1));
        scheduler.push_ready(ready(2, 1));
        scheduler.push_ready(ready(3, 1));

        assert_eq!(scheduler.pop_ready_min().unwrap().pid, 1);
        assert_eq!(scheduler.pop_ready_min().unwrap().pid, 2);
        assert_eq!(scheduler.pop_ready_min().unwrap().pid, 3);
    }

    #[test]
    fn test_requeue_goes_behind_equal_cohort() {
        let mut scheduler = Scheduler::new();
        scheduler.push_ready(ready(1, 3));
        let first = scheduler.pop_ready_min().unwrap();
        scheduler.push_ready(ready(2, 3));
        // Re-inserting pid 1 gives it a fresh sequence number, so it lands
        // behind pid 2 in the equal-remaining cohort
        scheduler.push_ready(first);

        assert_eq!(scheduler.pop_ready_min().unwrap().pid, 2);
        assert_eq!(scheduler.pop_ready_min().unwrap().pid, 1);
    }

    #[test]
    fn test_preemption_is_strict() {
        let mut scheduler = Scheduler::new();
        scheduler.set_running(ready(1, 6));

        scheduler.push_ready(ready(2, 6));
        assert!(!scheduler.should_preempt());

        scheduler.push_ready(ready(3, 2));
        assert!(scheduler.should_preempt());
    }

    #[test]
    fn test_count_in_memory_excludes_suspended() {
        let mut scheduler = Scheduler::new();
        scheduler.push_ready(ready(1, 5));
        scheduler.push_ready(ready(2, 5));
        scheduler.set_running(ready(3, 5));
        scheduler.enqueue_suspended(ready(4, 5));

        assert_eq!(scheduler.count_in_memory(), 3);
        assert_eq!(scheduler.suspended_len(), 1);
    }

    #[test]
    fn test_suspended_is_fifo_with_front_requeue() {
        let mut scheduler = Scheduler::new();
        scheduler.enqueue_suspended(ready(1, 5));
        scheduler.enqueue_suspended(ready(2, 5));

        let head = scheduler.dequeue_suspended().unwrap();
        assert_eq!(head.pid, 1);
        scheduler.requeue_suspended_front(head);

        assert_eq!(scheduler.peek_suspended_front().unwrap().pid, 1);
        assert_eq!(scheduler.dequeue_suspended().unwrap().pid, 1);
        assert_eq!(scheduler.dequeue_suspended().unwrap().pid, 2);
    }
}
