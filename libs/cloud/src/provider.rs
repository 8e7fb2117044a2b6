//! The cloud provider interface.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::model::Instance;

/// Errors from provider API calls.
///
/// Per-item errors are caught at the call site, logged with instance/volume
/// context, and the pass moves on. Only a failed inventory walk aborts a run.
#[derive(Debug, Error)]
pub enum CloudError {
    /// A provider API call failed.
    #[error("{operation} failed: {message}")]
    Api {
        operation: &'static str,
        message: String,
    },
}

impl CloudError {
    pub fn api(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Api {
            operation,
            message: err.to_string(),
        }
    }
}

/// Everything needed to create and tag one snapshot.
///
/// The provider tags the snapshot with `Name`, `InstanceId`, `VolumeId`, and
/// `BackupPolicy` from these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotRequest {
    pub volume_id: String,
    pub instance_id: String,
    pub name: String,
    pub description: String,
    pub policy: String,
}

/// Cloud provider interface: the inventory walk plus the three actions a
/// pass can take.
///
/// Passed explicitly into each pass (never a module-level client) so tests
/// can substitute the recording mock. All calls are fire-and-report.
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// List all instances with their state, tags, and attached volumes.
    async fn list_instances(&self) -> Result<Vec<Instance>, CloudError>;

    /// Request a start for a stopped instance.
    async fn start_instance(&self, instance_id: &str) -> Result<(), CloudError>;

    /// Request a stop for a running instance.
    async fn stop_instance(&self, instance_id: &str) -> Result<(), CloudError>;

    /// Create a snapshot of one volume; returns the provider snapshot id.
    ///
    /// Not idempotent: the same request creates a new snapshot every time.
    async fn create_snapshot(&self, request: &SnapshotRequest) -> Result<String, CloudError>;
}
