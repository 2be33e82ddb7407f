// Shared fixtures for pipeline tests (all runs use the Mock provider)
#![allow(dead_code)]

use clap::Parser;
use ec2_catalog::settings::Settings;
use ec2_catalog_common::InstanceTypeRecord;
use ec2_catalog_providers::inventory::SpotPricePoint;
use ec2_catalog_providers::mock::{instance_type, price_list_entry, MockProvider};
use std::collections::BTreeMap;
use std::path::Path;

pub const REGION: &str = "us-west-2";
pub const LOCATION: &str = "US West (Oregon)";
pub const ZONES: [&str; 3] = ["us-west-2a", "us-west-2b", "us-west-2c"];

/// Settings as the CLI would build them, writing to `output`.
pub fn settings(region: &str, families: &[&str], output: &Path) -> Settings {
    let mut argv: Vec<String> = vec!["ec2-catalog".to_string(), region.to_string()];
    argv.extend(families.iter().map(|f| f.to_string()));
    argv.push("--output".to_string());
    argv.push(output.display().to_string());
    argv.push("--max-workers".to_string());
    argv.push("2".to_string());
    Settings::try_parse_from(argv).expect("valid test argv")
}

/// g6 family (two sizes, one with default ENIs), a g6e decoy and an arm64 m7g.
pub fn fleet() -> MockProvider {
    MockProvider::new()
        .with_zones(&ZONES)
        .with_instance_type(instance_type("g6.xlarge", "x86_64", 4, 16384, Some(4)))
        .with_instance_type(instance_type("g6.2xlarge", "x86_64", 8, 32768, None))
        .with_instance_type(instance_type("g6e.xlarge", "x86_64", 4, 32768, Some(4)))
        .with_instance_type(instance_type("m7g.large", "arm64", 2, 8192, Some(3)))
        .with_spot_prices(
            "g6.xlarge",
            vec![
                SpotPricePoint::new("us-west-2a", "0.4512"),
                SpotPricePoint::new("us-west-2a", "0.4388"),
                SpotPricePoint::new("us-west-2c", "0.4701"),
            ],
        )
        .with_spot_prices("m7g.large", vec![SpotPricePoint::new("us-west-2b", "0.0301")])
        .with_on_demand("g6.xlarge", LOCATION, vec![price_list_entry("G6XL", "0.8048000000")])
        .with_on_demand("g6.2xlarge", LOCATION, vec![price_list_entry("G62XL", "0.9776000000")])
        .with_on_demand("m7g.large", LOCATION, vec![price_list_entry("M7GL", "0.0816000000")])
}

pub fn by_name(records: &[InstanceTypeRecord]) -> BTreeMap<String, InstanceTypeRecord> {
    records.iter().map(|r| (r.name.clone(), r.clone())).collect()
}

pub fn read_output(path: &Path) -> Vec<InstanceTypeRecord> {
    let raw = std::fs::read_to_string(path).expect("output file written");
    serde_json::from_str(&raw).expect("output is a JSON array of records")
}
