//! fleet-warden snapshot runner.
//!
//! One externally triggered pass over the instance inventory: for every
//! instance whose `backup_policy` tag is due today, snapshot each attached
//! volume in turn. Snapshot lifecycle (rotation, deletion) is entirely the
//! provider's concern; a rerun creates additional snapshots.

pub mod backup;
pub mod config;
