/*!
 * memsim
 * Discrete-time simulator of fixed-partition memory allocation (best-fit)
 * and preemptive shortest-remaining-time-first CPU scheduling
 */

pub mod core;
pub mod engine;
pub mod io;
pub mod memory;
pub mod process;
pub mod scheduler;

// Re-exports
pub use crate::core::{LoadError, LoadResult};
pub use engine::{
    EngineConfig, EngineState, EventStep, ProcessMetrics, SimulationEngine, StateSnapshot,
    Summary, TickObserver, TickReport,
};
pub use io::{read_processes_csv, write_report_csv};
pub use memory::{MemoryManager, Partition, PartitionSnapshot};
pub use process::{Process, ProcessState};
pub use scheduler::Scheduler;
