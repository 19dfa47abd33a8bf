//! Background Tasks Module
//!
//! Contains background tasks that run periodically while a cache is alive.
//!
//! # Tasks
//! - Staleness sweep: removes entries idle for longer than the TTL

mod sweeper;

pub use sweeper::spawn_sweep_task;
