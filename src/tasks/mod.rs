//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired store entries at a configured period

mod cleanup;

pub use cleanup::spawn_cleanup_task;
