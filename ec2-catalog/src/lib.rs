use anyhow::Result;
use ec2_catalog_common::InstanceTypeRecord;
use ec2_catalog_providers::CatalogProvider;
use std::sync::Arc;
use tracing::info;

pub mod enricher;
pub mod families;
pub mod fanout;
pub mod provider_manager;
pub mod serializer;
pub mod settings;
pub mod zones;

use enricher::EnrichContext;
use provider_manager::ProviderManager;
use settings::Settings;

/// Build the catalog with the provider selected in `settings` and write it out.
pub async fn run(settings: &Settings) -> Result<()> {
    let provider = ProviderManager::get_provider(settings)?;
    run_with_provider(settings, provider).await?;
    Ok(())
}

/// Zones, then families, then concurrent enrichment, then the output file.
/// Nothing is written if the zone or family step fails.
pub async fn run_with_provider(
    settings: &Settings,
    provider: Arc<dyn CatalogProvider>,
) -> Result<Vec<InstanceTypeRecord>> {
    info!(
        "Building instance type catalog for {} using the {} provider",
        settings.region,
        provider.code()
    );

    let zones = zones::list_zones(provider.as_ref(), &settings.region).await?;
    let instance_types =
        families::resolve_families(provider.as_ref(), &settings.region, &settings.instance_families).await?;

    let ctx = EnrichContext::new(provider, &settings.region, zones);
    let records = fanout::enrich_all(ctx, instance_types, settings.max_workers as usize).await?;

    serializer::write_records(&settings.output, &records).await?;
    Ok(records)
}
