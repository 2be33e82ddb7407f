use crate::settings::Settings;
use anyhow::{bail, Result};
use ec2_catalog_providers::CatalogProvider;
use std::sync::Arc;

pub struct ProviderManager;

impl ProviderManager {
    pub fn get_provider(settings: &Settings) -> Result<Arc<dyn CatalogProvider>> {
        match settings.provider.trim().to_lowercase().as_str() {
            #[cfg(feature = "provider-aws")]
            "aws" => Ok(Arc::new(ec2_catalog_providers::aws::AwsCliProvider::new(
                &settings.aws_cli,
                &settings.pricing_region,
            ))),
            #[cfg(feature = "provider-mock")]
            "mock" => {
                use anyhow::Context;
                let path = settings
                    .mock_catalog
                    .as_deref()
                    .context("MOCK_CATALOG_FILE must be set for the mock provider")?;
                Ok(Arc::new(ec2_catalog_providers::mock::MockProvider::from_file(path)?))
            }
            other => bail!("unknown or disabled catalog provider '{}'", other),
        }
    }
}
