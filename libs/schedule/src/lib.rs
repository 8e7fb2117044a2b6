//! Core evaluators for fleet-warden.
//!
//! Two pieces of decision logic live here, shared by the service binaries:
//!
//! - [`OperatingWindow`]: the `schedule` tag micro-language
//!   (`start=HHMM;stop=HHMM;days=D0-D1`) and its evaluation against the
//!   current UTC time, including overnight windows that wrap midnight.
//! - [`BackupPolicy`]: the `backup_policy` cadence classes (daily, weekly,
//!   midweekly) and the "snapshot due today" decision.
//!
//! Both are pure: they take a [`Moment`] (one UTC clock reading captured at
//! the start of a pass) and decide, with no provider calls and no state.

pub mod cadence;
pub mod clock;
pub mod error;
pub mod window;

pub use cadence::BackupPolicy;
pub use clock::Moment;
pub use error::ScheduleError;
pub use window::{DayRange, DesiredState, HhMm, OperatingWindow};
