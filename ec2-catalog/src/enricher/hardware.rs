use anyhow::{bail, Result};
use ec2_catalog_common::{Resources, DEFAULT_EPHEMERAL_STORAGE};
use ec2_catalog_providers::inventory::InstanceTypeInfo;
use ec2_catalog_providers::CatalogProvider;
use tracing::warn;

pub const DEFAULT_ARCHITECTURE: &str = "x86_64";
pub const DEFAULT_NETWORK_INTERFACES: i64 = 8;
/// Rough pod density per ENI; the real limit also depends on IPs per interface.
pub const PODS_PER_NETWORK_INTERFACE: i64 = 10;

/// The describe call itself failed (CLI error, non-zero exit, unparsable JSON).
/// Unlike a missing type or a malformed record this aborts the whole run.
#[derive(Debug, thiserror::Error)]
#[error("Failed to describe instance type {instance_type}: {cause:#}")]
pub struct HardwareLookupError {
    pub instance_type: String,
    pub cause: anyhow::Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HardwareProfile {
    pub architecture: String,
    pub operating_systems: Vec<String>,
    pub resources: Resources,
}

/// Kubernetes spells x86_64 as amd64. Everything else is kept as reported.
pub fn normalize_architecture(arch: &str) -> String {
    if arch == "x86_64" {
        "amd64".to_string()
    } else {
        arch.to_string()
    }
}

fn supported_architectures(info: &InstanceTypeInfo) -> Option<&[String]> {
    info.processor_info
        .as_ref()
        .and_then(|p| p.supported_architectures.as_deref())
}

/// Explicit platforms win. Otherwise linux, plus windows when the hypervisor is
/// not nitro or the architecture list mentions windows.
///
/// The architecture check can never match real EC2 data; it is kept as-is so
/// the catalog output does not change.
pub fn operating_systems(info: &InstanceTypeInfo) -> Vec<String> {
    if let Some(platforms) = info.supported_platforms.as_ref().filter(|p| !p.is_empty()) {
        return platforms.iter().map(|p| p.to_lowercase()).collect();
    }

    let mut out = vec!["linux".to_string()];
    let not_nitro = info.hypervisor_type.as_deref() != Some("nitro");
    let arch_mentions_windows = supported_architectures(info)
        .map(|archs| archs.iter().any(|a| a == "windows"))
        .unwrap_or(false);
    if not_nitro || arch_mentions_windows {
        out.push("windows".to_string());
    }
    out
}

/// MiB to GiB without rounding, always with a fractional part (16384 -> "16.0Gi").
pub fn memory_gib(size_in_mib: i64) -> String {
    format!("{:?}Gi", size_in_mib as f64 / 1024.0)
}

pub fn max_pods(info: &InstanceTypeInfo) -> String {
    let interfaces = info
        .network_info
        .as_ref()
        .and_then(|n| n.maximum_network_interfaces)
        .unwrap_or(DEFAULT_NETWORK_INTERFACES);
    (interfaces * PODS_PER_NETWORK_INTERFACE).to_string()
}

pub fn hardware_profile(info: &InstanceTypeInfo) -> Result<HardwareProfile> {
    let architecture = match supported_architectures(info) {
        None => DEFAULT_ARCHITECTURE,
        Some([first, ..]) => first.as_str(),
        Some([]) => bail!("{} reports an empty architecture list", info.instance_type),
    };

    let cpu = info
        .v_cpu_info
        .as_ref()
        .and_then(|v| v.default_v_cpus)
        .unwrap_or(0);
    let memory_mib = info
        .memory_info
        .as_ref()
        .and_then(|m| m.size_in_mib)
        .unwrap_or(0);

    Ok(HardwareProfile {
        architecture: normalize_architecture(architecture),
        operating_systems: operating_systems(info),
        resources: Resources {
            cpu: cpu.to_string(),
            memory: memory_gib(memory_mib),
            ephemeral_storage: DEFAULT_EPHEMERAL_STORAGE.to_string(),
            pods: max_pods(info),
        },
    })
}

/// `Ok(None)` when the region does not know the type. Provider failures come
/// back as [`HardwareLookupError`].
pub async fn fetch_hardware(
    provider: &dyn CatalogProvider,
    region: &str,
    instance_type: &str,
) -> Result<Option<HardwareProfile>> {
    let info = provider
        .describe_instance_type(region, instance_type)
        .await
        .map_err(|cause| HardwareLookupError {
            instance_type: instance_type.to_string(),
            cause,
        })?;

    let Some(info) = info else {
        warn!("Instance type {} not found in region {}", instance_type, region);
        return Ok(None);
    };

    hardware_profile(&info).map(Some)
}
