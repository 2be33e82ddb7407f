use crate::error::ProviderError;
use crate::{inventory, CatalogProvider};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

pub const DEFAULT_AWS_CLI: &str = "aws";
/// The pricing API is only served from a handful of regions.
pub const DEFAULT_PRICING_REGION: &str = "us-east-1";

const SPOT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Provider backed by the `aws` CLI. Credentials, profile and endpoint
/// configuration come from the CLI's own environment.
pub struct AwsCliProvider {
    program: String,
    pricing_region: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeAvailabilityZonesOutput {
    #[serde(default)]
    availability_zones: Vec<inventory::AvailabilityZone>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeInstanceTypesOutput {
    #[serde(default)]
    instance_types: Vec<inventory::InstanceTypeInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeSpotPriceHistoryOutput {
    #[serde(default)]
    spot_price_history: Vec<inventory::SpotPricePoint>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetProductsOutput {
    #[serde(default)]
    price_list: Vec<String>,
}

impl AwsCliProvider {
    pub fn new(program: &str, pricing_region: &str) -> Self {
        let program = Some(program.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_AWS_CLI)
            .to_string();
        let pricing_region = Some(pricing_region.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_PRICING_REGION)
            .to_string();
        Self {
            program,
            pricing_region,
        }
    }

    /// Run one CLI call and decode its JSON stdout. No timeout: a hung call stalls its caller.
    async fn run_json<T: DeserializeOwned>(&self, args: Vec<String>) -> Result<T, ProviderError> {
        let command = format!("{} {}", self.program, args.join(" "));
        debug!("aws cli: {}", command);

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| ProviderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProviderError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|source| ProviderError::InvalidJson { command, source })
    }
}

fn args<const N: usize>(parts: [&str; N]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

fn describe_zones_args(region: &str) -> Vec<String> {
    args(["ec2", "describe-availability-zones", "--region", region, "--output", "json"])
}

fn list_instance_types_args(region: &str, name_pattern: &str) -> Vec<String> {
    let filter = format!("Name=instance-type,Values={}", name_pattern);
    args([
        "ec2",
        "describe-instance-types",
        "--region",
        region,
        "--filters",
        &filter,
        "--output",
        "json",
    ])
}

fn describe_instance_type_args(region: &str, instance_type: &str) -> Vec<String> {
    args([
        "ec2",
        "describe-instance-types",
        "--region",
        region,
        "--instance-types",
        instance_type,
        "--output",
        "json",
    ])
}

fn format_spot_time(t: &DateTime<Utc>) -> String {
    t.format(SPOT_TIME_FORMAT).to_string()
}

fn spot_price_history_args(region: &str, query: &inventory::SpotPriceQuery) -> Vec<String> {
    let mut out = args([
        "ec2",
        "describe-spot-price-history",
        "--region",
        region,
        "--instance-types",
        &query.instance_type,
    ]);
    if !query.product_descriptions.is_empty() {
        out.push("--product-descriptions".to_string());
        out.extend(query.product_descriptions.iter().cloned());
    }
    out.extend([
        "--start-time".to_string(),
        format_spot_time(&query.start_time),
        "--end-time".to_string(),
        format_spot_time(&query.end_time),
        "--output".to_string(),
        "json".to_string(),
    ]);
    out
}

fn get_products_args(pricing_region: &str, query: &inventory::OnDemandQuery) -> Vec<String> {
    let mut out = args(["pricing", "get-products", "--service-code", "AmazonEC2", "--filters"]);
    out.extend(
        query
            .term_filters()
            .into_iter()
            .map(|(field, value)| format!("Type=TERM_MATCH,Field={},Value={}", field, value)),
    );
    out.extend(args(["--region", pricing_region, "--output", "json"]));
    out
}

#[async_trait]
impl CatalogProvider for AwsCliProvider {
    fn code(&self) -> &'static str {
        "aws"
    }

    async fn list_availability_zones(&self, region: &str) -> Result<Vec<inventory::AvailabilityZone>> {
        let out: DescribeAvailabilityZonesOutput = self.run_json(describe_zones_args(region)).await?;
        Ok(out.availability_zones)
    }

    async fn list_instance_types(
        &self,
        region: &str,
        name_pattern: &str,
    ) -> Result<Vec<inventory::InstanceTypeInfo>> {
        let out: DescribeInstanceTypesOutput = self
            .run_json(list_instance_types_args(region, name_pattern))
            .await?;
        Ok(out.instance_types)
    }

    async fn describe_instance_type(
        &self,
        region: &str,
        instance_type: &str,
    ) -> Result<Option<inventory::InstanceTypeInfo>> {
        let out: DescribeInstanceTypesOutput = self
            .run_json(describe_instance_type_args(region, instance_type))
            .await?;
        Ok(out.instance_types.into_iter().next())
    }

    async fn spot_price_history(
        &self,
        region: &str,
        query: &inventory::SpotPriceQuery,
    ) -> Result<Vec<inventory::SpotPricePoint>> {
        let out: DescribeSpotPriceHistoryOutput = self.run_json(spot_price_history_args(region, query)).await?;
        Ok(out.spot_price_history)
    }

    async fn on_demand_products(&self, query: &inventory::OnDemandQuery) -> Result<Vec<String>> {
        let out: GetProductsOutput = self
            .run_json(get_products_args(&self.pricing_region, query))
            .await?;
        Ok(out.price_list)
    }
}
