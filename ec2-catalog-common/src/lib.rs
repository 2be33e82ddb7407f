use serde::{Deserialize, Serialize};

pub mod family;

// -----------------------------------------------------------------------------
// Requirement keys (consumed by the autoscaler's instance selection)
// -----------------------------------------------------------------------------

pub const REQUIREMENT_CAPACITY_TYPE: &str = "karpenter.sh/capacity-type";
pub const REQUIREMENT_ZONE: &str = "topology.kubernetes.io/zone";
pub const OPERATOR_IN: &str = "In";

/// Placeholder until ephemeral storage is derived from the instance storage info.
pub const DEFAULT_EPHEMERAL_STORAGE: &str = "20Gi";

// --- Enums ---

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapacityType {
    #[serde(rename = "spot")]
    Spot,
    #[serde(rename = "on-demand")]
    OnDemand,
}

impl CapacityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapacityType::Spot => "spot",
            CapacityType::OnDemand => "on-demand",
        }
    }
}

// --- Output documents ---

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Requirement {
    pub key: String,
    pub operator: String,
    pub values: Vec<String>,
}

impl Requirement {
    pub fn is_in(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            operator: OPERATOR_IN.to_string(),
            values: vec![value.to_string()],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Offering {
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Available")]
    pub available: bool,
    #[serde(rename = "Requirements")]
    pub requirements: Vec<Requirement>,
}

impl Offering {
    /// Offering pinned to one capacity type in one zone.
    pub fn new(capacity_type: CapacityType, zone: &str, price: f64, available: bool) -> Self {
        Self {
            price,
            available,
            requirements: vec![
                Requirement::is_in(REQUIREMENT_CAPACITY_TYPE, capacity_type.as_str()),
                Requirement::is_in(REQUIREMENT_ZONE, zone),
            ],
        }
    }

    pub fn capacity_type(&self) -> Option<&str> {
        self.requirement_value(REQUIREMENT_CAPACITY_TYPE)
    }

    pub fn zone(&self) -> Option<&str> {
        self.requirement_value(REQUIREMENT_ZONE)
    }

    fn requirement_value(&self, key: &str) -> Option<&str> {
        self.requirements
            .iter()
            .find(|r| r.key == key)
            .and_then(|r| r.values.first())
            .map(|v| v.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Resources {
    pub cpu: String,
    pub memory: String,
    #[serde(rename = "ephemeral-storage")]
    pub ephemeral_storage: String,
    pub pods: String,
}

/// One catalog entry per instance type. Field order is the on-disk key order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InstanceTypeRecord {
    pub name: String,
    pub offerings: Vec<Offering>,
    pub architecture: String,
    #[serde(rename = "operatingSystems")]
    pub operating_systems: Vec<String>,
    pub resources: Resources,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> InstanceTypeRecord {
        InstanceTypeRecord {
            name: "g6.xlarge".to_string(),
            offerings: vec![Offering::new(CapacityType::Spot, "us-west-2a", 0.3412, true)],
            architecture: "amd64".to_string(),
            operating_systems: vec!["linux".to_string()],
            resources: Resources {
                cpu: "4".to_string(),
                memory: "16.0Gi".to_string(),
                ephemeral_storage: DEFAULT_EPHEMERAL_STORAGE.to_string(),
                pods: "40".to_string(),
            },
        }
    }

    #[test]
    fn record_uses_autoscaler_field_names() {
        let v = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(v["name"], "g6.xlarge");
        assert_eq!(v["operatingSystems"][0], "linux");
        assert_eq!(v["resources"]["ephemeral-storage"], "20Gi");
        assert_eq!(v["offerings"][0]["Price"], 0.3412);
        assert_eq!(v["offerings"][0]["Available"], true);

        let reqs = &v["offerings"][0]["Requirements"];
        assert_eq!(reqs[0]["key"], "karpenter.sh/capacity-type");
        assert_eq!(reqs[0]["operator"], "In");
        assert_eq!(reqs[0]["values"][0], "spot");
        assert_eq!(reqs[1]["key"], "topology.kubernetes.io/zone");
        assert_eq!(reqs[1]["values"][0], "us-west-2a");
    }

    #[test]
    fn record_key_order_is_stable() {
        let s = serde_json::to_string(&sample_record()).unwrap();
        let positions: Vec<usize> = ["\"name\"", "\"offerings\"", "\"architecture\"", "\"operatingSystems\"", "\"resources\""]
            .iter()
            .map(|k| s.find(k).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn offering_accessors() {
        let o = Offering::new(CapacityType::OnDemand, "eu-west-1b", 1.0, true);
        assert_eq!(o.capacity_type(), Some("on-demand"));
        assert_eq!(o.zone(), Some("eu-west-1b"));
    }
}
