use crate::error::ProviderError;
use crate::{inventory, CatalogProvider};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// On-demand catalog entries returned for one (instance type, location) lookup.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OnDemandFixture {
    pub instance_type: String,
    pub location: String,
    #[serde(default)]
    pub price_list: Vec<String>,
}

/// Fixture file layout for `MockProvider::from_file`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MockCatalog {
    #[serde(default)]
    pub zones: Vec<String>,
    #[serde(default)]
    pub instance_types: Vec<inventory::InstanceTypeInfo>,
    #[serde(default)]
    pub spot_prices: HashMap<String, Vec<inventory::SpotPricePoint>>,
    #[serde(default)]
    pub on_demand: Vec<OnDemandFixture>,
}

/// In-memory provider for tests and offline runs. Regions are ignored: the
/// mock serves a single region's worth of data.
#[derive(Default)]
pub struct MockProvider {
    catalog: MockCatalog,
    fail_zones: bool,
    fail_listing: bool,
    failing_hardware: HashSet<String>,
    failing_spot: HashSet<String>,
    failing_on_demand: HashSet<String>,
    panicking: HashSet<String>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog(catalog: MockCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read mock catalog {}", path.display()))?;
        let catalog: MockCatalog = serde_json::from_str(&raw)
            .with_context(|| format!("invalid mock catalog {}", path.display()))?;
        Ok(Self::from_catalog(catalog))
    }

    pub fn with_zones(mut self, zones: &[&str]) -> Self {
        self.catalog.zones = zones.iter().map(|z| z.to_string()).collect();
        self
    }

    pub fn with_instance_type(mut self, info: inventory::InstanceTypeInfo) -> Self {
        self.catalog.instance_types.push(info);
        self
    }

    pub fn with_spot_prices(mut self, instance_type: &str, points: Vec<inventory::SpotPricePoint>) -> Self {
        self.catalog
            .spot_prices
            .entry(instance_type.to_string())
            .or_default()
            .extend(points);
        self
    }

    pub fn with_on_demand(mut self, instance_type: &str, location: &str, price_list: Vec<String>) -> Self {
        self.catalog.on_demand.push(OnDemandFixture {
            instance_type: instance_type.to_string(),
            location: location.to_string(),
            price_list,
        });
        self
    }

    pub fn failing_zones(mut self) -> Self {
        self.fail_zones = true;
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn failing_hardware_for(mut self, instance_type: &str) -> Self {
        self.failing_hardware.insert(instance_type.to_string());
        self
    }

    pub fn failing_spot_for(mut self, instance_type: &str) -> Self {
        self.failing_spot.insert(instance_type.to_string());
        self
    }

    pub fn failing_on_demand_for(mut self, instance_type: &str) -> Self {
        self.failing_on_demand.insert(instance_type.to_string());
        self
    }

    /// Make hardware lookups for `instance_type` panic inside the caller's task.
    pub fn panicking_for(mut self, instance_type: &str) -> Self {
        self.panicking.insert(instance_type.to_string());
        self
    }

    fn injected(call: &str, subject: &str) -> anyhow::Error {
        ProviderError::Injected(format!("mock {} failure for {}", call, subject)).into()
    }
}

/// Build a pricing catalog entry shaped like the real `PriceList` documents.
pub fn price_list_entry(sku: &str, usd: &str) -> String {
    let term_code = format!("{}.JRTCKXETXF", sku);
    let dimension_code = format!("{}.JRTCKXETXF.6YS6EN2CT7", sku);
    serde_json::json!({
        "product": {
            "productFamily": "Compute Instance",
            "sku": sku,
        },
        "serviceCode": "AmazonEC2",
        "terms": {
            "OnDemand": {
                (term_code): {
                    "offerTermCode": "JRTCKXETXF",
                    "sku": sku,
                    "priceDimensions": {
                        (dimension_code): {
                            "unit": "Hrs",
                            "pricePerUnit": { "USD": usd },
                            "description": format!("${} per On Demand Linux instance hour", usd),
                        }
                    }
                }
            }
        }
    })
    .to_string()
}

/// Mock instance type with the fields the catalog reads.
pub fn instance_type(name: &str, arch: &str, vcpus: i64, memory_mib: i64, max_enis: Option<i64>) -> inventory::InstanceTypeInfo {
    inventory::InstanceTypeInfo {
        instance_type: name.to_string(),
        processor_info: Some(inventory::ProcessorInfo {
            supported_architectures: Some(vec![arch.to_string()]),
        }),
        supported_platforms: None,
        v_cpu_info: Some(inventory::VCpuInfo {
            default_v_cpus: Some(vcpus),
        }),
        memory_info: Some(inventory::MemoryInfo {
            size_in_mib: Some(memory_mib),
        }),
        network_info: Some(inventory::NetworkInfo {
            maximum_network_interfaces: max_enis,
        }),
        hypervisor_type: Some("nitro".to_string()),
    }
}

#[async_trait]
impl CatalogProvider for MockProvider {
    fn code(&self) -> &'static str {
        "mock"
    }

    async fn list_availability_zones(&self, region: &str) -> Result<Vec<inventory::AvailabilityZone>> {
        if self.fail_zones {
            return Err(Self::injected("describe-availability-zones", region));
        }
        Ok(self
            .catalog
            .zones
            .iter()
            .map(|z| inventory::AvailabilityZone::named(z))
            .collect())
    }

    async fn list_instance_types(
        &self,
        region: &str,
        name_pattern: &str,
    ) -> Result<Vec<inventory::InstanceTypeInfo>> {
        if self.fail_listing {
            return Err(Self::injected("describe-instance-types", region));
        }
        // Only the `<prefix>*` form is ever sent.
        let prefix = name_pattern.trim_end_matches('*');
        Ok(self
            .catalog
            .instance_types
            .iter()
            .filter(|it| it.instance_type.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn describe_instance_type(
        &self,
        _region: &str,
        instance_type: &str,
    ) -> Result<Option<inventory::InstanceTypeInfo>> {
        if self.panicking.contains(instance_type) {
            panic!("mock provider panic for {}", instance_type);
        }
        if self.failing_hardware.contains(instance_type) {
            return Err(Self::injected("describe-instance-types", instance_type));
        }
        Ok(self
            .catalog
            .instance_types
            .iter()
            .find(|it| it.instance_type == instance_type)
            .cloned())
    }

    async fn spot_price_history(
        &self,
        _region: &str,
        query: &inventory::SpotPriceQuery,
    ) -> Result<Vec<inventory::SpotPricePoint>> {
        if self.failing_spot.contains(&query.instance_type) {
            return Err(Self::injected("describe-spot-price-history", &query.instance_type));
        }
        Ok(self
            .catalog
            .spot_prices
            .get(&query.instance_type)
            .cloned()
            .unwrap_or_default())
    }

    async fn on_demand_products(&self, query: &inventory::OnDemandQuery) -> Result<Vec<String>> {
        if self.failing_on_demand.contains(&query.instance_type) {
            return Err(Self::injected("get-products", &query.instance_type));
        }
        Ok(self
            .catalog
            .on_demand
            .iter()
            .filter(|f| f.instance_type == query.instance_type && f.location == query.location)
            .flat_map(|f| f.price_list.iter().cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_by_prefix_and_describes_exact() {
        let p = MockProvider::new()
            .with_instance_type(instance_type("g6.xlarge", "x86_64", 4, 16384, Some(4)))
            .with_instance_type(instance_type("g6e.xlarge", "x86_64", 4, 32768, Some(4)));

        let listed = p.list_instance_types("us-west-2", "g6.*").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].instance_type, "g6.xlarge");

        assert!(p.describe_instance_type("us-west-2", "g6e.xlarge").await.unwrap().is_some());
        assert!(p.describe_instance_type("us-west-2", "g6.48xlarge").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn on_demand_lookup_matches_location() {
        let p = MockProvider::new().with_on_demand("m5.large", "EU (Ireland)", vec![price_list_entry("SKU1", "0.107")]);
        let hit = inventory::OnDemandQuery::linux_shared("m5.large", "EU (Ireland)");
        let miss = inventory::OnDemandQuery::linux_shared("m5.large", "xx-nowhere-1");
        assert_eq!(p.on_demand_products(&hit).await.unwrap().len(), 1);
        assert!(p.on_demand_products(&miss).await.unwrap().is_empty());
    }

    #[test]
    fn catalog_fixture_parses() {
        let raw = r#"{
            "zones": ["us-west-2a"],
            "instance_types": [{"InstanceType": "c7g.large", "ProcessorInfo": {"SupportedArchitectures": ["arm64"]}}],
            "spot_prices": {"c7g.large": [{"AvailabilityZone": "us-west-2a", "SpotPrice": "0.0300"}]}
        }"#;
        let catalog: MockCatalog = serde_json::from_str(raw).unwrap();
        assert_eq!(catalog.zones, vec!["us-west-2a"]);
        assert_eq!(catalog.instance_types[0].instance_type, "c7g.large");
        assert_eq!(catalog.spot_prices["c7g.large"][0].spot_price.as_deref(), Some("0.0300"));
        assert!(catalog.on_demand.is_empty());
    }
}
