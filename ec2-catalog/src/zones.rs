use anyhow::{Context, Result};
use ec2_catalog_providers::CatalogProvider;
use tracing::info;

/// Zone names of `region`, in provider order. Any failure here is fatal for the run.
pub async fn list_zones(provider: &dyn CatalogProvider, region: &str) -> Result<Vec<String>> {
    let zones = provider
        .list_availability_zones(region)
        .await
        .with_context(|| format!("Failed to list availability zones for region {}", region))?;

    let names: Vec<String> = zones.into_iter().map(|z| z.zone_name).collect();
    info!("Found {} availability zones in {}", names.len(), region);
    Ok(names)
}
