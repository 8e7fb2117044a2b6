//! The backup pass.
//!
//! Walks the inventory once, sequentially; volumes within an instance are
//! snapshotted sequentially too. A failed snapshot is logged with its
//! volume and instance context and the loop moves on.

use serde::Serialize;
use tracing::{error, info};
use warden_cloud::{CloudError, CloudProvider, Instance, SnapshotRequest, Volume};
use warden_schedule::{BackupPolicy, Moment};

/// Tally of one backup pass.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BackupReport {
    pub snapshots_created: usize,
    pub snapshots_failed: usize,
    pub not_due: usize,
    pub no_tag: usize,
    pub unrecognized_policy: usize,
}

/// Build the snapshot request for one volume.
///
/// Pure formatting, deterministic in its inputs. The provider still creates
/// a brand-new snapshot on every call; nothing here deduplicates.
pub fn snapshot_request(
    instance: &Instance,
    volume: &Volume,
    policy: BackupPolicy,
    moment: &Moment,
) -> SnapshotRequest {
    let display_name = instance.display_name();
    SnapshotRequest {
        volume_id: volume.volume_id.clone(),
        instance_id: instance.instance_id.clone(),
        name: format!("{display_name}-{policy}-snapshot"),
        description: format!(
            "Snapshot of {} from instance {} on {}",
            volume.volume_id,
            display_name,
            moment.timestamp()
        ),
        policy: policy.as_str().to_string(),
    }
}

/// Run one backup pass over the full inventory.
///
/// Only a failed inventory walk returns an error; per-volume failures are
/// tallied and logged.
pub async fn run_backups(
    provider: &dyn CloudProvider,
    moment: &Moment,
) -> Result<BackupReport, CloudError> {
    info!(weekday = moment.weekday(), "Starting backup pass");

    let instances = provider.list_instances().await?;
    let mut report = BackupReport::default();

    for instance in &instances {
        backup_instance(provider, moment, instance, &mut report).await;
    }

    info!(
        instances = instances.len(),
        snapshots_created = report.snapshots_created,
        snapshots_failed = report.snapshots_failed,
        not_due = report.not_due,
        no_tag = report.no_tag,
        unrecognized_policy = report.unrecognized_policy,
        "Backup pass complete"
    );
    Ok(report)
}

async fn backup_instance(
    provider: &dyn CloudProvider,
    moment: &Moment,
    instance: &Instance,
    report: &mut BackupReport,
) {
    let instance_id = instance.instance_id.as_str();
    let display_name = instance.display_name();

    let Some(tag) = instance.tags.backup_policy() else {
        info!(instance_id, "No backup_policy tag; skipping instance");
        report.no_tag += 1;
        return;
    };

    // Unrecognized values are a silent opt-out, never an error.
    let Some(policy) = BackupPolicy::from_tag(tag) else {
        info!(instance_id, policy = tag, "Unrecognized backup policy; skipping instance");
        report.unrecognized_policy += 1;
        return;
    };

    if !policy.due_on(moment.weekday()) {
        info!(
            instance_id,
            instance = display_name,
            policy = %policy,
            weekday = moment.weekday(),
            "No backup due today"
        );
        report.not_due += 1;
        return;
    }

    for volume in &instance.volumes {
        let request = snapshot_request(instance, volume, policy, moment);
        info!(
            volume_id = %volume.volume_id,
            instance = display_name,
            snapshot_name = %request.name,
            "Creating snapshot"
        );

        match provider.create_snapshot(&request).await {
            Ok(snapshot_id) => {
                info!(
                    snapshot_id = %snapshot_id,
                    volume_id = %volume.volume_id,
                    "Snapshot created"
                );
                report.snapshots_created += 1;
            }
            Err(error) => {
                error!(
                    volume_id = %volume.volume_id,
                    instance = display_name,
                    %error,
                    "Failed to create snapshot"
                );
                report.snapshots_failed += 1;
            }
        }
    }
}
