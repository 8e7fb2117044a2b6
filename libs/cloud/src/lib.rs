//! Cloud collaborator interfaces for fleet-warden.
//!
//! The provider owns all resources; this crate is a read-and-request surface:
//!
//! - [`model`]: read-only instance inventory types with typed tag access
//! - [`provider`]: the [`CloudProvider`] trait handed to each pass
//! - [`mock`]: a recording mock for tests and development
//! - [`ec2`]: the EC2-backed implementation
//!
//! All calls are fire-and-report: no retries, no confirmation polling, no
//! idempotency tracking. Two overlapping invocations can both act on the
//! same observation; callers accept that hazard.

pub mod ec2;
pub mod mock;
pub mod model;
pub mod provider;

pub use ec2::Ec2Cloud;
pub use mock::{MockCloud, RecordedCall};
pub use model::{Instance, PowerState, Tags, Volume};
pub use provider::{CloudError, CloudProvider, SnapshotRequest};
