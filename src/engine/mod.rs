/*!
 * Simulation Engine
 * Tick state machine combining admission, SRTF scheduling, execution,
 * termination, and de-suspension
 */

use crate::core::types::{Pid, Size, Tick};
use crate::memory::MemoryManager;
use crate::process::{Process, ProcessState};
use crate::scheduler::Scheduler;
use log::{debug, info};
use std::collections::{HashMap, HashSet, VecDeque};

pub mod metrics;
pub mod observer;
pub mod snapshot;

pub use metrics::{ProcessMetrics, Summary};
pub use observer::TickObserver;
pub use snapshot::{ProcessView, StateSnapshot, TickReport};

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on processes simultaneously resident in memory
    /// (ready + running); suspended processes hold no partition and are
    /// not counted.
    pub max_multiprogramming: usize,
    /// Run the invariant checker at the end of every tick; violations
    /// panic, they indicate an engine bug rather than a runtime condition.
    pub debug_mode: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_multiprogramming: 5,
            debug_mode: false,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_max_multiprogramming(mut self, limit: usize) -> Self {
        self.max_multiprogramming = limit;
        self
    }

    #[must_use]
    pub fn with_debug_mode(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }
}

/// Lifecycle of the engine itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    NotStarted,
    Running,
    Complete,
}

/// Result of `step_to_next_event`: the first eventful tick and how many
/// uneventful ticks were skipped before it.
#[derive(Debug, Clone)]
pub struct EventStep {
    pub report: TickReport,
    pub skipped: u64,
}

/// Drives the simulation one tick at a time.
///
/// Each tick runs a fixed phase order: arrivals, SRTF scheduling, execution,
/// termination, de-suspension, invariant check, snapshot capture, time
/// advance. The order is load-bearing; reordering changes semantics.
///
/// The same `step` function serves batch and interactive callers; there is
/// no hidden state divergence between driving modes.
pub struct SimulationEngine {
    memory: MemoryManager,
    scheduler: Scheduler,
    arrivals: VecDeque<Process>,
    terminated: Vec<Process>,
    current_time: Tick,
    config: EngineConfig,
    state: EngineState,
    /// Static pid -> size map for fragmentation reporting
    sizes: HashMap<Pid, Size>,
    history: Vec<TickReport>,
    summary: Option<Summary>,
    observer: Option<Box<dyn TickObserver>>,
}

impl SimulationEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            memory: MemoryManager::new(),
            scheduler: Scheduler::new(),
            arrivals: VecDeque::new(),
            terminated: Vec::new(),
            current_time: 0,
            config,
            state: EngineState::NotStarted,
            sizes: HashMap::new(),
            history: Vec::new(),
            summary: None,
            observer: None,
        }
    }

    /// Inject an observer that receives every tick report
    pub fn set_observer(&mut self, observer: Box<dyn TickObserver>) {
        self.observer = Some(observer);
    }

    /// Load a process set and move to Running. Input need not be pre-sorted;
    /// the backlog is ordered by (arrival, pid). All other state is reset.
    pub fn reset(&mut self, mut processes: Vec<Process>) {
        processes.sort_by_key(|p| (p.arrival, p.pid));
        for process in &mut processes {
            process.remaining = process.burst;
            process.start_time = None;
            process.finish_time = None;
            process.state = ProcessState::New;
        }

        self.sizes = processes.iter().map(|p| (p.pid, p.size)).collect();
        self.arrivals = processes.into();
        self.terminated = Vec::new();
        self.current_time = 0;
        self.scheduler = Scheduler::new();
        self.memory = MemoryManager::new();
        self.history = Vec::new();
        self.summary = None;
        self.state = EngineState::Running;

        info!(
            "engine reset with {} processes (max degree {})",
            self.arrivals.len(),
            self.config.max_multiprogramming
        );
    }

    /// Execute exactly one tick; `None` once the run is complete.
    pub fn step(&mut self) -> Option<TickReport> {
        if self.state != EngineState::Running {
            return None;
        }
        if !self.has_pending_work() {
            if self.scheduler.suspended_len() > 0 {
                info!(
                    "run ends with {} permanently suspended processes",
                    self.scheduler.suspended_len()
                );
            }
            self.state = EngineState::Complete;
            return None;
        }

        let arrived = self.handle_arrivals();
        self.schedule_srtf();
        self.execute_tick();
        let finished = self.handle_termination();
        self.handle_desuspension();

        if self.config.debug_mode {
            self.validate_invariants();
        }

        let report = self.capture_report(arrived || finished);
        self.history.push(report.clone());
        if let Some(observer) = self.observer.as_mut() {
            observer.on_tick(&report);
        }

        self.current_time += 1;
        Some(report)
    }

    /// Step until a tick reports an arrival or a termination, or the run
    /// completes. Returns the eventful report plus the count of uneventful
    /// ticks skipped before it.
    pub fn step_to_next_event(&mut self) -> Option<EventStep> {
        let mut skipped = 0;
        while let Some(report) = self.step() {
            if report.event_occurred {
                return Some(EventStep { report, skipped });
            }
            skipped += 1;
        }
        None
    }

    /// Step to completion and return the final summary
    pub fn run_to_completion(&mut self) -> Summary {
        self.finalize()
    }

    /// Drain any remaining ticks, then compute and cache the final summary.
    /// Idempotent: repeated calls return the cached result.
    pub fn finalize(&mut self) -> Summary {
        while self.step().is_some() {}

        if let Some(summary) = &self.summary {
            return summary.clone();
        }

        let summary = Summary::compute(
            &self.terminated,
            self.scheduler.suspended_iter(),
            self.current_time,
        );
        self.summary = Some(summary.clone());
        summary
    }

    /// Whether any progress is still possible.
    ///
    /// When only the suspended queue remains, de-suspension retries the head
    /// in FIFO order with head-of-line blocking, so progress is possible iff
    /// the head could ever fit a partition: with nothing ready or running,
    /// every partition is free, and a statically fittable head is admitted
    /// on the next tick. An oversized head therefore means deadlock and the
    /// run completes instead of ticking forever.
    ///
    /// A degree limit of 0 makes admission impossible regardless of
    /// partition capacity, so a fittable head is still deadlocked.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        if !self.arrivals.is_empty()
            || self.scheduler.ready_len() > 0
            || self.scheduler.running().is_some()
        {
            return true;
        }
        if self.config.max_multiprogramming == 0 {
            return false;
        }
        self.scheduler
            .peek_suspended_front()
            .is_some_and(|process| self.memory.can_ever_fit(process.size))
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == EngineState::Complete
    }

    #[must_use]
    pub fn current_time(&self) -> Tick {
        self.current_time
    }

    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    #[must_use]
    pub fn terminated(&self) -> &[Process] {
        &self.terminated
    }

    /// Run log: one report per executed tick
    #[must_use]
    pub fn history(&self) -> &[TickReport] {
        &self.history
    }

    // Phase 1: pop the arrival-sorted backlog prefix for the current tick
    // and try to admit each process.
    fn handle_arrivals(&mut self) -> bool {
        let mut arrived = false;
        loop {
            match self.arrivals.front() {
                Some(process) if process.arrival == self.current_time => {}
                _ => break,
            }
            let Some(process) = self.arrivals.pop_front() else {
                break;
            };
            arrived = true;
            if let Err(mut process) = self.try_admit(process) {
                debug!(
                    "pid {} suspended on arrival (size={}, degree={})",
                    process.pid,
                    process.size,
                    self.scheduler.count_in_memory()
                );
                process.state = ProcessState::ReadySuspended;
                self.scheduler.enqueue_suspended(process);
            }
        }
        arrived
    }

    // Admission: needs a free degree slot and a best-fit partition. On
    // success the process is re-armed and pushed ready; on failure it is
    // handed back unchanged for the caller to suspend or requeue.
    fn try_admit(&mut self, mut process: Process) -> Result<(), Process> {
        if self.scheduler.count_in_memory() >= self.config.max_multiprogramming {
            return Err(process);
        }
        let Some(index) = self.memory.best_fit(process.size) else {
            return Err(process);
        };

        self.memory.assign(index, process.pid);
        process.remaining = process.burst;
        process.state = ProcessState::Ready;
        debug!(
            "pid {} admitted to {} (size={})",
            process.pid,
            self.memory.partition(index).id,
            process.size
        );
        self.scheduler.push_ready(process);
        Ok(())
    }

    // Phase 2: SRTF dispatch and preemption.
    fn schedule_srtf(&mut self) {
        if self.scheduler.running().is_none() {
            if let Some(process) = self.scheduler.pop_ready_min() {
                self.dispatch(process);
            }
        } else if self.scheduler.should_preempt() {
            if let Some(mut preempted) = self.scheduler.take_running() {
                debug!(
                    "pid {} preempted (remaining={})",
                    preempted.pid, preempted.remaining
                );
                preempted.state = ProcessState::Ready;
                // Fresh sequence number: the preempted process goes to the
                // back of its equal-remaining-time cohort
                self.scheduler.push_ready(preempted);
            }
            if let Some(process) = self.scheduler.pop_ready_min() {
                self.dispatch(process);
            }
        }
    }

    fn dispatch(&mut self, mut process: Process) {
        process.state = ProcessState::Running;
        if process.start_time.is_none() {
            process.start_time = Some(self.current_time);
        }
        debug!(
            "pid {} running at t={} (remaining={})",
            process.pid, self.current_time, process.remaining
        );
        self.scheduler.set_running(process);
    }

    // Phase 3: consume one tick of the running process's burst.
    fn execute_tick(&mut self) {
        if let Some(process) = self.scheduler.running_mut() {
            process.remaining = process.remaining.saturating_sub(1);
        }
    }

    // Phase 4: retire the running process once its burst is exhausted.
    fn handle_termination(&mut self) -> bool {
        let exhausted = self
            .scheduler
            .running()
            .is_some_and(|process| process.remaining == 0);
        if !exhausted {
            return false;
        }

        if let Some(mut process) = self.scheduler.take_running() {
            process.finish_time = Some(self.current_time + 1);
            process.state = ProcessState::Terminated;
            self.memory.release(process.pid);
            info!(
                "pid {} terminated at t={}",
                process.pid,
                self.current_time + 1
            );
            self.terminated.push(process);
        }
        true
    }

    // Phase 5: retry suspended processes in FIFO order. A failed head goes
    // back to the front and ends the attempts for this tick; the queue never
    // skips past an unfittable process.
    fn handle_desuspension(&mut self) {
        while self.scheduler.suspended_len() > 0
            && self.scheduler.count_in_memory() < self.config.max_multiprogramming
        {
            let Some(process) = self.scheduler.dequeue_suspended() else {
                break;
            };
            match self.try_admit(process) {
                Ok(()) => {}
                Err(process) => {
                    debug!(
                        "pid {} remains suspended: no suitable partition",
                        process.pid
                    );
                    self.scheduler.requeue_suspended_front(process);
                    break;
                }
            }
        }
    }

    // Phase 6 (debug mode): fatal checks for engine bugs.
    fn validate_invariants(&self) {
        let degree = self.scheduler.count_in_memory();
        assert!(
            degree <= self.config.max_multiprogramming,
            "multiprogramming degree exceeded: {} > {}",
            degree,
            self.config.max_multiprogramming
        );

        let mut assigned = HashSet::new();
        for partition in self.memory.partitions() {
            if let Some(pid) = partition.pid_assigned {
                assert!(
                    assigned.insert(pid),
                    "pid {} assigned to more than one partition",
                    pid
                );
            }
        }

        let mut seen = HashSet::new();
        let containers = self
            .arrivals
            .iter()
            .chain(self.scheduler.ready_processes())
            .chain(self.scheduler.suspended_iter())
            .chain(self.scheduler.running())
            .chain(self.terminated.iter());
        for process in containers {
            assert!(
                seen.insert(process.pid),
                "pid {} reachable from more than one container",
                process.pid
            );
        }
        assert_eq!(
            seen.len(),
            self.sizes.len(),
            "process set leaked: {} tracked, {} reachable",
            self.sizes.len(),
            seen.len()
        );
    }

    // Phase 7: capture the strongly-typed report for this tick.
    fn capture_report(&self, event_occurred: bool) -> TickReport {
        let ready: Vec<ProcessView> = self
            .scheduler
            .ready_processes()
            .into_iter()
            .map(ProcessView::from)
            .collect();
        let suspended: Vec<ProcessView> = self
            .scheduler
            .suspended_iter()
            .map(ProcessView::from)
            .collect();
        let running = self.scheduler.running().map(ProcessView::from);

        let snapshot = StateSnapshot {
            time: self.current_time,
            running,
            memory: self.memory.snapshot(&self.sizes),
            ready,
            suspended,
        };

        TickReport {
            time: self.current_time,
            running_pid: snapshot.running.map(|view| view.pid),
            ready_count: snapshot.ready.len(),
            suspended_count: snapshot.suspended.len(),
            multiprogramming_degree: self.scheduler.count_in_memory(),
            event_occurred,
            snapshot,
        }
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new()
    }
}
