use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// GPU hardware attached to an instance type.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct GpuInfo {
    pub manufacturer: String,
    pub count: i32,
}

/// Inference accelerator hardware attached to an instance type.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AcceleratorInfo {
    pub manufacturer: String,
    pub count: i32,
}

/// One instance type in the catalog, annotated with the availability zones
/// where the provider offers it.
///
/// A catalog snapshot holds exactly one record per distinct type name. The
/// `zones` field is unioned during catalog construction and immutable after.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InstanceType {
    pub name: String,
    pub architectures: Vec<String>,
    pub usage_classes: Vec<String>,
    pub bare_metal: bool,
    pub fpga: bool,
    pub gpu: Option<GpuInfo>,
    pub inference_accelerator: Option<AcceleratorInfo>,
    pub zones: Vec<String>,
}

impl InstanceType {
    /// Attach a zone to this record, ignoring duplicates. Only the catalog
    /// builder mutates zone sets; once a snapshot is published they are fixed.
    pub fn add_zone(&mut self, zone: &str) {
        if !self.zones.iter().any(|z| z == zone) {
            self.zones.push(zone.to_string());
        }
    }
}

/// Placement constraints for one scheduling request.
///
/// Owned by the caller and read-only to the catalog: constraints affect
/// filtering, never cache population.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    /// Explicit type-name allow-list. When empty, the default-type heuristic
    /// decides which records qualify instead.
    pub instance_types: Vec<String>,
    /// Capacity/pricing class, e.g. "on-demand" or "spot".
    pub capacity_type: Option<String>,
    /// CPU architecture tag; normalized before matching.
    pub architecture: Option<String>,
    /// Workload pod specs; only their aggregated resource demand is consulted,
    /// to detect GPU / accelerator requirements.
    pub pods: Vec<crate::resources::PodSpec>,
}

// Raw API response structures for parsing

/// One instance-type record as returned by the metadata API.
#[derive(Debug, Deserialize, Serialize)]
pub struct ApiInstanceTypeRecord {
    pub instance_type: String,

    #[serde(default)]
    pub supported_architectures: Vec<String>,

    #[serde(default)]
    pub supported_usage_classes: Vec<String>,

    #[serde(default)]
    pub bare_metal: bool,

    pub fpga_info: Option<serde_json::Value>,

    pub gpu_info: Option<ApiGpuInfo>,

    pub inference_accelerator_info: Option<ApiAcceleratorInfo>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>, // Catch unknown fields
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ApiGpuInfo {
    pub gpus: Vec<ApiGpuDevice>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ApiGpuDevice {
    pub manufacturer: String,
    #[serde(default = "default_device_count")]
    pub count: i32,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ApiAcceleratorInfo {
    pub accelerators: Vec<ApiAcceleratorDevice>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ApiAcceleratorDevice {
    pub manufacturer: String,
    #[serde(default = "default_device_count")]
    pub count: i32,
}

// Default function for device counts
fn default_device_count() -> i32 {
    1
}

/// One page of the paginated instance-types listing.
#[derive(Debug, Deserialize, Serialize)]
pub struct InstanceTypePage {
    pub instance_types: Vec<ApiInstanceTypeRecord>,
    pub next_token: Option<String>,
}

/// One (zone, type name) pair from the zonal-offerings listing.
#[derive(Debug, Deserialize, Serialize)]
pub struct ApiOfferingRecord {
    pub location: String,
    pub instance_type: String,
}

/// One page of the paginated zonal-offerings listing.
#[derive(Debug, Deserialize, Serialize)]
pub struct OfferingPage {
    pub offerings: Vec<ApiOfferingRecord>,
    pub next_token: Option<String>,
}

// Utility functions for conversions
impl From<ApiInstanceTypeRecord> for InstanceType {
    fn from(raw: ApiInstanceTypeRecord) -> Self {
        // The API reports devices per model; the catalog keeps the leading
        // device's manufacturer and the total device count.
        let gpu = raw.gpu_info.and_then(|info| {
            let count = info.gpus.iter().map(|g| g.count).sum();
            info.gpus.into_iter().next().map(|g| GpuInfo {
                manufacturer: g.manufacturer,
                count,
            })
        });

        let inference_accelerator = raw.inference_accelerator_info.and_then(|info| {
            let count = info.accelerators.iter().map(|a| a.count).sum();
            info.accelerators
                .into_iter()
                .next()
                .map(|a| AcceleratorInfo {
                    manufacturer: a.manufacturer,
                    count,
                })
        });

        InstanceType {
            name: raw.instance_type,
            architectures: raw.supported_architectures,
            usage_classes: raw.supported_usage_classes,
            bare_metal: raw.bare_metal,
            fpga: raw.fpga_info.is_some(),
            gpu,
            inference_accelerator,
            zones: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_record(json: serde_json::Value) -> ApiInstanceTypeRecord {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_conversion_from_api_record() {
        let raw = raw_record(serde_json::json!({
            "instance_type": "p3.2xlarge",
            "supported_architectures": ["x86_64"],
            "supported_usage_classes": ["on-demand", "spot"],
            "bare_metal": false,
            "gpu_info": {"gpus": [{"manufacturer": "NVIDIA", "count": 4}]},
            "network_info": {"ena_support": true}
        }));

        let it: InstanceType = raw.into();
        assert_eq!(it.name, "p3.2xlarge");
        assert_eq!(it.architectures, vec!["x86_64"]);
        assert!(!it.bare_metal);
        assert!(!it.fpga);
        let gpu = it.gpu.unwrap();
        assert_eq!(gpu.manufacturer, "NVIDIA");
        assert_eq!(gpu.count, 4);
        assert!(it.inference_accelerator.is_none());
        assert!(it.zones.is_empty());
    }

    #[test]
    fn test_fpga_presence_maps_to_flag() {
        let raw = raw_record(serde_json::json!({
            "instance_type": "f1.2xlarge",
            "fpga_info": {"fpgas": [{"manufacturer": "Xilinx"}]}
        }));
        let it: InstanceType = raw.into();
        assert!(it.fpga);
    }

    #[test]
    fn test_gpu_count_sums_across_devices() {
        let raw = raw_record(serde_json::json!({
            "instance_type": "g4dn.metal",
            "bare_metal": true,
            "gpu_info": {"gpus": [
                {"manufacturer": "NVIDIA", "count": 4},
                {"manufacturer": "NVIDIA", "count": 4}
            ]}
        }));
        let it: InstanceType = raw.into();
        assert_eq!(it.gpu.unwrap().count, 8);
    }

    #[test]
    fn test_add_zone_deduplicates() {
        let mut it = InstanceType {
            name: "m5.large".to_string(),
            architectures: vec![],
            usage_classes: vec![],
            bare_metal: false,
            fpga: false,
            gpu: None,
            inference_accelerator: None,
            zones: Vec::new(),
        };
        it.add_zone("us-east-1a");
        it.add_zone("us-east-1b");
        it.add_zone("us-east-1a");
        assert_eq!(it.zones, vec!["us-east-1a", "us-east-1b"]);
    }
}
