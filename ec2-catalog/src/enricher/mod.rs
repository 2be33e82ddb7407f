//! Per-instance-type enrichment: hardware, spot and on-demand prices, offerings.

pub mod hardware;
pub mod offerings;
pub mod on_demand;
pub mod spot;

use anyhow::Result;
use chrono::Utc;
use ec2_catalog_common::InstanceTypeRecord;
use ec2_catalog_providers::CatalogProvider;
use std::sync::Arc;
use tracing::info;

/// Read-only inputs shared by every enrichment task.
#[derive(Clone)]
pub struct EnrichContext {
    pub provider: Arc<dyn CatalogProvider>,
    pub region: String,
    pub zones: Arc<Vec<String>>,
}

impl EnrichContext {
    pub fn new(provider: Arc<dyn CatalogProvider>, region: &str, zones: Vec<String>) -> Self {
        Self {
            provider,
            region: region.to_string(),
            zones: Arc::new(zones),
        }
    }
}

/// Build the record for one instance type.
///
/// `Ok(None)` means the region does not offer the type. Hardware lookup
/// failures are errors; pricing failures only remove the affected offerings.
pub async fn enrich_instance_type(ctx: &EnrichContext, instance_type: &str) -> Result<Option<InstanceTypeRecord>> {
    info!("Processing instance type: {}", instance_type);
    let provider = ctx.provider.as_ref();

    let Some(hardware) = hardware::fetch_hardware(provider, &ctx.region, instance_type).await? else {
        return Ok(None);
    };

    let spot_prices = spot::fetch_spot_prices(provider, &ctx.region, instance_type, Utc::now()).await;
    let on_demand_price = on_demand::fetch_on_demand_price(provider, &ctx.region, instance_type).await;

    Ok(Some(InstanceTypeRecord {
        name: instance_type.to_string(),
        offerings: offerings::build_offerings(&ctx.zones, &spot_prices, on_demand_price),
        architecture: hardware.architecture,
        operating_systems: hardware.operating_systems,
        resources: hardware.resources,
    }))
}
