//! fleet-warden power scheduler.
//!
//! One externally triggered pass over the instance inventory: evaluate each
//! instance's `schedule` tag against the current UTC clock and issue a start
//! or stop where the observed power state differs from the desired one.
//! No state is carried between invocations and overlapping invocations are
//! not coordinated.

pub mod config;
pub mod enforce;
