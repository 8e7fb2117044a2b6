//! Mock provider for testing and development.
//!
//! Serves a seeded inventory and records every action call so tests can
//! assert exactly which transitions and snapshots a pass issued (including
//! that a no-op pass issued none).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::model::Instance;
use crate::provider::{CloudError, CloudProvider, SnapshotRequest};

/// One action call recorded by [`MockCloud`], in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Start(String),
    Stop(String),
    Snapshot(SnapshotRequest),
}

/// Mock provider for tests and development.
pub struct MockCloud {
    instances: Vec<Instance>,
    calls: Mutex<Vec<RecordedCall>>,
    snapshot_counter: AtomicU64,
    fail_power: bool,
    fail_snapshots: bool,
}

impl MockCloud {
    /// Create a mock serving the given inventory.
    pub fn new(instances: Vec<Instance>) -> Self {
        Self {
            instances,
            calls: Mutex::new(Vec::new()),
            snapshot_counter: AtomicU64::new(0),
            fail_power: false,
            fail_snapshots: false,
        }
    }

    /// A mock whose start/stop calls all fail.
    pub fn failing_power(instances: Vec<Instance>) -> Self {
        Self {
            fail_power: true,
            ..Self::new(instances)
        }
    }

    /// A mock whose snapshot calls all fail.
    pub fn failing_snapshots(instances: Vec<Instance>) -> Self {
        Self {
            fail_snapshots: true,
            ..Self::new(instances)
        }
    }

    /// All recorded action calls, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Instance ids that received a start call.
    pub fn started(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::Start(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Instance ids that received a stop call.
    pub fn stopped(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::Stop(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// All snapshot requests issued.
    pub fn snapshots(&self) -> Vec<SnapshotRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::Snapshot(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_snapshot_id(&self) -> String {
        let counter = self.snapshot_counter.fetch_add(1, Ordering::SeqCst);
        format!("snap-{:08x}", counter)
    }
}

#[async_trait]
impl CloudProvider for MockCloud {
    async fn list_instances(&self) -> Result<Vec<Instance>, CloudError> {
        Ok(self.instances.clone())
    }

    async fn start_instance(&self, instance_id: &str) -> Result<(), CloudError> {
        self.record(RecordedCall::Start(instance_id.to_string()));
        if self.fail_power {
            return Err(CloudError::api("StartInstances", "mock configured to fail"));
        }
        info!(instance_id, "[MOCK] Starting instance");
        Ok(())
    }

    async fn stop_instance(&self, instance_id: &str) -> Result<(), CloudError> {
        self.record(RecordedCall::Stop(instance_id.to_string()));
        if self.fail_power {
            return Err(CloudError::api("StopInstances", "mock configured to fail"));
        }
        info!(instance_id, "[MOCK] Stopping instance");
        Ok(())
    }

    async fn create_snapshot(&self, request: &SnapshotRequest) -> Result<String, CloudError> {
        self.record(RecordedCall::Snapshot(request.clone()));
        if self.fail_snapshots {
            return Err(CloudError::api("CreateSnapshot", "mock configured to fail"));
        }
        let snapshot_id = self.next_snapshot_id();
        info!(
            volume_id = %request.volume_id,
            snapshot_id = %snapshot_id,
            "[MOCK] Created snapshot"
        );
        Ok(snapshot_id)
    }
}
