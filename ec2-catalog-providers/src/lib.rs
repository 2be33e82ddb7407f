use anyhow::Result;
use async_trait::async_trait;

pub mod error;

pub use error::ProviderError;

/// Read-only view of a cloud compute + pricing API, as needed to build the catalog.
///
/// Implementations only fetch and decode; interpretation (architecture renames,
/// price selection, offering assembly) happens in the caller.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Short provider code used in logs ("aws", "mock").
    fn code(&self) -> &'static str;

    async fn list_availability_zones(&self, region: &str) -> Result<Vec<inventory::AvailabilityZone>>;

    /// List instance types whose name matches `name_pattern` (e.g. `g6.*`).
    async fn list_instance_types(
        &self,
        region: &str,
        name_pattern: &str,
    ) -> Result<Vec<inventory::InstanceTypeInfo>>;

    /// Describe one instance type. `Ok(None)` when the region does not offer it.
    async fn describe_instance_type(
        &self,
        region: &str,
        instance_type: &str,
    ) -> Result<Option<inventory::InstanceTypeInfo>>;

    async fn spot_price_history(
        &self,
        region: &str,
        query: &inventory::SpotPriceQuery,
    ) -> Result<Vec<inventory::SpotPricePoint>>;

    /// Raw pricing catalog entries (each one a JSON document encoded as a string).
    async fn on_demand_products(&self, query: &inventory::OnDemandQuery) -> Result<Vec<String>>;
}

pub mod inventory {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    pub const SPOT_PRODUCT_DESCRIPTIONS: [&str; 2] = ["Linux/UNIX", "Windows"];

    #[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "PascalCase")]
    pub struct AvailabilityZone {
        pub zone_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub zone_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub region_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub state: Option<String>,
    }

    impl AvailabilityZone {
        pub fn named(zone_name: &str) -> Self {
            Self {
                zone_name: zone_name.to_string(),
                zone_id: None,
                region_name: None,
                state: None,
            }
        }
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "PascalCase")]
    pub struct ProcessorInfo {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub supported_architectures: Option<Vec<String>>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "PascalCase")]
    pub struct VCpuInfo {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub default_v_cpus: Option<i64>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
    pub struct MemoryInfo {
        #[serde(rename = "SizeInMiB", default, skip_serializing_if = "Option::is_none")]
        pub size_in_mib: Option<i64>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "PascalCase")]
    pub struct NetworkInfo {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub maximum_network_interfaces: Option<i64>,
    }

    /// Subset of an EC2 `InstanceTypeInfo` document.
    #[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "PascalCase")]
    pub struct InstanceTypeInfo {
        pub instance_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub processor_info: Option<ProcessorInfo>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub supported_platforms: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub v_cpu_info: Option<VCpuInfo>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub memory_info: Option<MemoryInfo>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub network_info: Option<NetworkInfo>,
        // EC2 itself reports `Hypervisor`; the catalog has always keyed on `HypervisorType`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub hypervisor_type: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "PascalCase")]
    pub struct SpotPricePoint {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub availability_zone: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub instance_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub product_description: Option<String>,
        /// Decimal string as returned by EC2 (e.g. "0.345600").
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub spot_price: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub timestamp: Option<String>,
    }

    impl SpotPricePoint {
        pub fn new(zone: &str, price: &str) -> Self {
            Self {
                availability_zone: Some(zone.to_string()),
                instance_type: None,
                product_description: None,
                spot_price: Some(price.to_string()),
                timestamp: None,
            }
        }
    }

    /// Spot price history window for one instance type.
    #[derive(Clone, Debug, PartialEq)]
    pub struct SpotPriceQuery {
        pub instance_type: String,
        pub product_descriptions: Vec<String>,
        pub start_time: DateTime<Utc>,
        pub end_time: DateTime<Utc>,
    }

    impl SpotPriceQuery {
        /// Zero-width window at `at`: the prices in effect right now.
        pub fn snapshot(instance_type: &str, at: DateTime<Utc>) -> Self {
            Self {
                instance_type: instance_type.to_string(),
                product_descriptions: SPOT_PRODUCT_DESCRIPTIONS.iter().map(|s| s.to_string()).collect(),
                start_time: at,
                end_time: at,
            }
        }
    }

    /// Pricing catalog lookup, every field is an exact (TERM_MATCH) filter.
    #[derive(Clone, Debug, PartialEq)]
    pub struct OnDemandQuery {
        pub instance_type: String,
        pub location: String,
        pub operating_system: String,
        pub pre_installed_sw: String,
        pub tenancy: String,
        pub capacity_status: String,
    }

    impl OnDemandQuery {
        /// Plain Linux, shared tenancy, no licensed software.
        pub fn linux_shared(instance_type: &str, location: &str) -> Self {
            Self {
                instance_type: instance_type.to_string(),
                location: location.to_string(),
                operating_system: "Linux".to_string(),
                pre_installed_sw: "NA".to_string(),
                tenancy: "Shared".to_string(),
                capacity_status: "Used".to_string(),
            }
        }

        /// (field, value) pairs in the order the pricing API receives them.
        pub fn term_filters(&self) -> Vec<(&'static str, &str)> {
            vec![
                ("instanceType", self.instance_type.as_str()),
                ("location", self.location.as_str()),
                ("operatingSystem", self.operating_system.as_str()),
                ("preInstalledSw", self.pre_installed_sw.as_str()),
                ("tenancy", self.tenancy.as_str()),
                ("capacitystatus", self.capacity_status.as_str()),
            ]
        }
    }
}

#[cfg(feature = "aws")]
pub mod aws;

#[cfg(feature = "mock")]
pub mod mock;
