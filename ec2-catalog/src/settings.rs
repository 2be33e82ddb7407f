use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT: &str = "instance_types.json";
pub const DEFAULT_MAX_WORKERS: u32 = 5;

/// Command line + environment configuration. `.env` is loaded before parsing,
/// so every `env` fallback below can also come from there.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ec2-catalog",
    about = "Generate instance type details and pricing information",
    version
)]
pub struct Settings {
    /// AWS region (e.g., us-west-2)
    pub region: String,

    /// Instance type families without sizes (e.g., g6 m5)
    #[arg(required = true, num_args = 1..)]
    pub instance_families: Vec<String>,

    /// Output file path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Maximum number of concurrent enrichment workers
    #[arg(
        short = 'w',
        long,
        default_value_t = DEFAULT_MAX_WORKERS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_workers: u32,

    /// Catalog provider: aws, or mock when built with `provider-mock`
    #[arg(long, env = "CATALOG_PROVIDER", default_value = "aws")]
    pub provider: String,

    /// AWS CLI executable
    #[arg(long = "aws-cli", env = "AWS_CLI_PATH", default_value = "aws")]
    pub aws_cli: String,

    /// Region serving the pricing API
    #[arg(long, env = "AWS_PRICING_REGION", default_value = "us-east-1")]
    pub pricing_region: String,

    /// Fixture file for the mock provider
    #[arg(long, env = "MOCK_CATALOG_FILE")]
    pub mock_catalog: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_region_and_families() {
        let s = Settings::try_parse_from(["ec2-catalog", "us-west-2", "g6", "m5.2xlarge"]).unwrap();
        assert_eq!(s.region, "us-west-2");
        assert_eq!(s.instance_families, vec!["g6", "m5.2xlarge"]);
        assert_eq!(s.output, PathBuf::from("instance_types.json"));
        assert_eq!(s.max_workers, 5);
    }

    #[test]
    fn output_and_worker_overrides() {
        let s = Settings::try_parse_from(["ec2-catalog", "eu-west-1", "c7g", "-o", "/tmp/out.json", "-w", "12"]).unwrap();
        assert_eq!(s.output, PathBuf::from("/tmp/out.json"));
        assert_eq!(s.max_workers, 12);

        let s = Settings::try_parse_from(["ec2-catalog", "eu-west-1", "c7g", "--output", "x.json", "--max-workers", "1"]).unwrap();
        assert_eq!(s.output, PathBuf::from("x.json"));
        assert_eq!(s.max_workers, 1);
    }

    #[test]
    fn rejects_missing_families_and_zero_workers() {
        assert!(Settings::try_parse_from(["ec2-catalog", "us-west-2"]).is_err());
        assert!(Settings::try_parse_from(["ec2-catalog", "us-west-2", "g6", "-w", "0"]).is_err());
    }
}
