//! The schedule enforcement pass.
//!
//! Walks the inventory once, sequentially. Every instance resolves to one
//! [`PowerOutcome`]; failures (malformed tags, provider errors) are isolated
//! per instance and never abort the pass.

use serde::Serialize;
use tracing::{info, warn};
use warden_cloud::{CloudError, CloudProvider, Instance, PowerState};
use warden_schedule::{DesiredState, Moment, OperatingWindow};

/// Outcome of evaluating one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerOutcome {
    /// No `schedule` tag: the instance never opted in.
    NoScheduleTag,

    /// The `schedule` tag failed to parse; instance skipped.
    MalformedSchedule,

    /// Today is outside the allowed weekday range; instance untouched.
    OffDay,

    /// A start was issued.
    Started,

    /// A stop was issued.
    Stopped,

    /// Observed state already matches the desired state; no call issued.
    AlreadyCompliant,

    /// Observed state is neither running nor stopped (pending, terminated,
    /// ...); left untouched. Distinct from [`PowerOutcome::AlreadyCompliant`].
    StateInFlux,

    /// The start/stop call failed; logged, pass continued.
    ApiError,
}

/// Tally of one enforcement pass.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PowerReport {
    pub started: usize,
    pub stopped: usize,
    pub already_compliant: usize,
    pub off_day: usize,
    pub in_flux: usize,
    pub no_tag: usize,
    pub malformed: usize,
    pub api_errors: usize,
}

impl PowerReport {
    fn tally(&mut self, outcome: PowerOutcome) {
        match outcome {
            PowerOutcome::Started => self.started += 1,
            PowerOutcome::Stopped => self.stopped += 1,
            PowerOutcome::AlreadyCompliant => self.already_compliant += 1,
            PowerOutcome::OffDay => self.off_day += 1,
            PowerOutcome::StateInFlux => self.in_flux += 1,
            PowerOutcome::NoScheduleTag => self.no_tag += 1,
            PowerOutcome::MalformedSchedule => self.malformed += 1,
            PowerOutcome::ApiError => self.api_errors += 1,
        }
    }
}

/// Run one enforcement pass over the full inventory.
///
/// Only a failed inventory walk returns an error; everything downstream is
/// best-effort per instance.
pub async fn enforce_schedules(
    provider: &dyn CloudProvider,
    moment: &Moment,
) -> Result<PowerReport, CloudError> {
    info!(
        time = %moment.time(),
        weekday = moment.weekday(),
        "Starting enforcement pass"
    );

    let instances = provider.list_instances().await?;
    let mut report = PowerReport::default();

    for instance in &instances {
        let outcome = enforce_instance(provider, moment, instance).await;
        report.tally(outcome);
    }

    info!(
        instances = instances.len(),
        started = report.started,
        stopped = report.stopped,
        already_compliant = report.already_compliant,
        off_day = report.off_day,
        in_flux = report.in_flux,
        no_tag = report.no_tag,
        malformed = report.malformed,
        api_errors = report.api_errors,
        "Enforcement pass complete"
    );
    Ok(report)
}

async fn enforce_instance(
    provider: &dyn CloudProvider,
    moment: &Moment,
    instance: &Instance,
) -> PowerOutcome {
    let instance_id = instance.instance_id.as_str();

    let Some(tag) = instance.tags.schedule() else {
        info!(instance_id, "No schedule tag; skipping instance");
        return PowerOutcome::NoScheduleTag;
    };

    let window = match OperatingWindow::parse(tag) {
        Ok(window) => window,
        Err(error) => {
            warn!(instance_id, tag, %error, "Malformed schedule tag; skipping instance");
            return PowerOutcome::MalformedSchedule;
        }
    };

    let Some(desired) = window.desired_state(moment) else {
        info!(
            instance_id,
            weekday = moment.weekday(),
            days = %window.days,
            "Outside scheduled days; leaving instance untouched"
        );
        return PowerOutcome::OffDay;
    };

    // A start is only issued from `stopped` and a stop only from `running`.
    // Transitional states get no call and a distinct outcome.
    match (desired, &instance.state) {
        (DesiredState::Running, PowerState::Stopped) => {
            match provider.start_instance(instance_id).await {
                Ok(()) => {
                    info!(instance_id, time = %moment.time(), "Started instance (operational hours)");
                    PowerOutcome::Started
                }
                Err(error) => {
                    warn!(instance_id, %error, "Failed to start instance");
                    PowerOutcome::ApiError
                }
            }
        }
        (DesiredState::Stopped, PowerState::Running) => {
            match provider.stop_instance(instance_id).await {
                Ok(()) => {
                    info!(instance_id, time = %moment.time(), "Stopped instance (non-operational hours)");
                    PowerOutcome::Stopped
                }
                Err(error) => {
                    warn!(instance_id, %error, "Failed to stop instance");
                    PowerOutcome::ApiError
                }
            }
        }
        (DesiredState::Running, PowerState::Running)
        | (DesiredState::Stopped, PowerState::Stopped) => {
            info!(instance_id, state = %instance.state, "Instance already in desired state");
            PowerOutcome::AlreadyCompliant
        }
        (_, PowerState::Other(state)) => {
            info!(
                instance_id,
                state = %state,
                desired = ?desired,
                "Instance state in transition; leaving untouched"
            );
            PowerOutcome::StateInFlux
        }
    }
}
