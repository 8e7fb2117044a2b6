//! EC2-backed provider implementation.
//!
//! Thin pass-through to the EC2 API: DescribeInstances for the inventory
//! walk, StartInstances/StopInstances for transitions, CreateSnapshot with
//! snapshot tag specifications for backups. Credentials and the default
//! region come from the hosting environment's SDK config chain.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ec2::config::Region;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::{ResourceType, Tag, TagSpecification};
use tracing::{debug, info};

use crate::model::{Instance, PowerState, Tags, Volume};
use crate::provider::{CloudError, CloudProvider, SnapshotRequest};

/// Cloud provider backed by the EC2 API.
pub struct Ec2Cloud {
    client: aws_sdk_ec2::Client,
}

impl Ec2Cloud {
    /// Load AWS config from the ambient environment and build a client.
    ///
    /// An explicit region overrides the SDK's default chain.
    pub async fn new(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let aws_cfg = loader.load().await;
        let client = aws_sdk_ec2::Client::new(&aws_cfg);

        info!(region = ?aws_cfg.region(), "EC2 client initialised");

        Self { client }
    }
}

/// Map one EC2 instance onto the inventory model.
///
/// Returns `None` for entries without an instance id (never expected from
/// the API, but the field is optional on the wire).
fn instance_from_ec2(instance: &aws_sdk_ec2::types::Instance) -> Option<Instance> {
    let instance_id = instance.instance_id()?.to_string();

    let state = instance
        .state()
        .and_then(|state| state.name())
        .map(|name| PowerState::from_provider(name.as_str()))
        .unwrap_or_else(|| PowerState::Other("unknown".to_string()));

    let tags = Tags::from_pairs(instance.tags().iter().filter_map(|tag| {
        Some((tag.key()?.to_string(), tag.value()?.to_string()))
    }));

    let volumes = instance
        .block_device_mappings()
        .iter()
        .filter_map(|mapping| mapping.ebs().and_then(|ebs| ebs.volume_id()))
        .map(|volume_id| Volume {
            volume_id: volume_id.to_string(),
        })
        .collect();

    Some(Instance {
        instance_id,
        state,
        tags,
        volumes,
    })
}

#[async_trait]
impl CloudProvider for Ec2Cloud {
    async fn list_instances(&self) -> Result<Vec<Instance>, CloudError> {
        let mut instances = Vec::new();

        let mut pages = self.client.describe_instances().into_paginator().send();
        while let Some(page) = pages.next().await {
            let page =
                page.map_err(|e| CloudError::api("DescribeInstances", DisplayErrorContext(e)))?;
            for reservation in page.reservations() {
                for ec2_instance in reservation.instances() {
                    if let Some(instance) = instance_from_ec2(ec2_instance) {
                        instances.push(instance);
                    }
                }
            }
        }

        debug!(count = instances.len(), "Listed instances");
        Ok(instances)
    }

    async fn start_instance(&self, instance_id: &str) -> Result<(), CloudError> {
        self.client
            .start_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|e| CloudError::api("StartInstances", DisplayErrorContext(e)))?;
        Ok(())
    }

    async fn stop_instance(&self, instance_id: &str) -> Result<(), CloudError> {
        self.client
            .stop_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|e| CloudError::api("StopInstances", DisplayErrorContext(e)))?;
        Ok(())
    }

    async fn create_snapshot(&self, request: &SnapshotRequest) -> Result<String, CloudError> {
        let tag = |key: &str, value: &str| Tag::builder().key(key).value(value).build();
        let tags = TagSpecification::builder()
            .resource_type(ResourceType::Snapshot)
            .tags(tag("Name", &request.name))
            .tags(tag("InstanceId", &request.instance_id))
            .tags(tag("VolumeId", &request.volume_id))
            .tags(tag("BackupPolicy", &request.policy))
            .build();

        let response = self
            .client
            .create_snapshot()
            .volume_id(&request.volume_id)
            .description(&request.description)
            .tag_specifications(tags)
            .send()
            .await
            .map_err(|e| CloudError::api("CreateSnapshot", DisplayErrorContext(e)))?;

        Ok(response.snapshot_id().unwrap_or_default().to_string())
    }
}
