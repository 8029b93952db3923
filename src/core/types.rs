/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// One discrete unit of simulated time
pub type Tick = u64;

/// Size type for memory demands and partition capacities
pub type Size = usize;

/// Address type for partition base addresses
pub type Address = usize;
