/*!
 * Core Module
 * Shared primitives used across the simulator
 */

pub mod errors;
pub mod types;

pub use errors::{LoadError, LoadResult};
pub use types::{Address, Pid, Size, Tick};
