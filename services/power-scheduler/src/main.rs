//! fleet-warden power scheduler entry point.
//!
//! Invoked by an external timer with no payload. Captures one UTC clock
//! reading, runs a single enforcement pass against the EC2 inventory, logs
//! the report, and exits. Total inability to reach the provider propagates
//! out to the trigger's own failure reporting.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use warden_cloud::Ec2Cloud;
use warden_power_scheduler::config::Config;
use warden_power_scheduler::enforce;
use warden_schedule::Moment;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting fleet-warden power scheduler");
    info!(aws_region = ?config.aws_region, "Configuration loaded");

    let provider = Ec2Cloud::new(config.aws_region).await;
    let moment = Moment::now();

    let report = enforce::enforce_schedules(&provider, &moment).await?;
    info!(report = ?report, "Power scheduler run complete");

    Ok(())
}
