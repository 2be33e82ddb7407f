use anyhow::{Context, Result};
use ec2_catalog_common::InstanceTypeRecord;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;

/// JSON array with four-space indentation, keys in record field order.
pub fn to_pretty_json(records: &[InstanceTypeRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    records
        .serialize(&mut ser)
        .context("Failed to serialize instance type records")?;
    Ok(buf)
}

/// Replace `path` with the serialized records and confirm on stdout.
pub async fn write_records(path: &Path, records: &[InstanceTypeRecord]) -> Result<()> {
    let bytes = to_pretty_json(records)?;
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Output written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec2_catalog_common::{CapacityType, Offering, Resources};

    fn record() -> InstanceTypeRecord {
        InstanceTypeRecord {
            name: "c7g.large".to_string(),
            offerings: vec![Offering::new(CapacityType::OnDemand, "eu-west-1a", 0.0725, true)],
            architecture: "arm64".to_string(),
            operating_systems: vec!["linux".to_string()],
            resources: Resources {
                cpu: "2".to_string(),
                memory: "4.0Gi".to_string(),
                ephemeral_storage: "20Gi".to_string(),
                pods: "30".to_string(),
            },
        }
    }

    #[test]
    fn four_space_indent() {
        let s = String::from_utf8(to_pretty_json(&[record()]).unwrap()).unwrap();
        assert!(s.starts_with("[\n    {\n        \"name\": \"c7g.large\",\n        \"offerings\": ["));
        assert!(s.contains("\"ephemeral-storage\": \"20Gi\""));
        assert!(s.ends_with("}\n]"));
    }

    #[test]
    fn empty_catalog_is_an_empty_array() {
        assert_eq!(to_pretty_json(&[]).unwrap(), b"[]");
    }

    #[tokio::test]
    async fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("instance_types.json");
        std::fs::write(&path, "stale content that is longer than the new document").unwrap();

        write_records(&path, &[]).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}
