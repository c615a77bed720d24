//! Print an inventory of a Vexata array
//!
//! Run with:
//! VEXATA_HOST=array VEXATA_USER=admin VEXATA_PASSWORD=secret cargo run --example array_inventory

use serde_json::Value;
use tracing::{info, warn};
use vexata_api::{Client, ClientConfig};

fn count(records: &Value) -> usize {
    records.as_array().map(Vec::len).unwrap_or(0)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ClientConfig::from_env()?;
    info!("Connecting to {}", config.host);
    let client = Client::with_config(config)?;

    if !client.test_connection().await? {
        warn!("Array did not answer the management ping");
        return Ok(());
    }

    let sa = client.sa_info().await?;
    info!("Storage array: {}", sa["name"]);

    let volumes = client.list_volumes().await?;
    info!("Volumes: {}", count(&volumes));
    for volume in volumes.as_array().into_iter().flatten() {
        info!("  - {} ({} MiB)", volume["name"], volume["volSize"]);
    }

    info!("Volume groups: {}", count(&client.list_vgs().await?));
    info!("Initiators: {}", count(&client.list_initiators().await?));
    info!("Initiator groups: {}", count(&client.list_igs().await?));
    info!("Array ports: {}", count(&client.list_saports().await?));
    info!("Port groups: {}", count(&client.list_pgs().await?));

    let egs = client.list_egs().await?;
    info!("Export groups: {}", count(&egs));
    for eg in egs.as_array().into_iter().flatten() {
        let tuple = &eg["exportGroup3Tuple"];
        info!(
            "  - {}: vg {} / ig {} / pg {}",
            eg["name"], tuple["vgId"], tuple["igId"], tuple["pgId"]
        );
    }

    Ok(())
}
