use anyhow::{bail, Context, Result};
use ec2_catalog_common::family::{family_name_pattern, normalize_family};
use ec2_catalog_providers::CatalogProvider;
use tracing::{debug, info, warn};

/// Concrete instance types of one family. An empty result is not an error.
pub async fn resolve_family(provider: &dyn CatalogProvider, region: &str, family: &str) -> Result<Vec<String>> {
    let instance_types: Vec<String> = provider
        .list_instance_types(region, &family_name_pattern(family))
        .await
        .with_context(|| format!("Failed to list instance types for family {} in region {}", family, region))?
        .into_iter()
        .map(|it| it.instance_type)
        .collect();

    if instance_types.is_empty() {
        warn!("No instance types found for family {} in region {}", family, region);
    }

    Ok(instance_types)
}

/// Expand every requested family token, in request order. Fails if nothing resolved at all.
pub async fn resolve_families(provider: &dyn CatalogProvider, region: &str, tokens: &[String]) -> Result<Vec<String>> {
    let mut all_instance_types = Vec::new();
    for token in tokens {
        let family = normalize_family(token);
        if family != *token {
            debug!("Family token {} normalized to {}", token, family);
        }
        all_instance_types.extend(resolve_family(provider, region, &family).await?);
    }

    if all_instance_types.is_empty() {
        bail!("No instance types found for the specified families");
    }

    info!("Found {} instance types to process", all_instance_types.len());
    Ok(all_instance_types)
}
