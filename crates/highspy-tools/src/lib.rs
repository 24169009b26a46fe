//! Instrumentation shared by the solver handle and the bench.
//!
//! Resident memory is sampled with `sysinfo`; stage timers pair each sample
//! with the wall time elapsed since the timer started.

pub mod memory;

pub use memory::{MemoryError, RssSample, StageTimer, StageRecord, current_rss};
