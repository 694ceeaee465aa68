use crate::models::{Constraints, InstanceType};
use crate::resources::{self, ResourceRequests};

/// Instance family prefixes eligible when no explicit allow-list is given:
/// standard, burstable, and accelerator-capable families. Keeps unconstrained
/// requests away from specialized and bare-metal hardware.
const DEFAULT_FAMILY_PREFIXES: &[&str] = &[
    "m", "c", "r", "a", // Standard
    "t3", "t4", // Burstable
    "p", "inf", "g", // Accelerators
];

/// Map a free-form architecture constraint to the tag the metadata API uses.
pub fn normalize_architecture(architecture: &str) -> &str {
    match architecture {
        "amd64" => "x86_64",
        other => other,
    }
}

fn has_any_prefix(value: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| value.starts_with(p))
}

fn intersects(a: &[String], b: &[String]) -> bool {
    a.iter().any(|x| b.contains(x))
}

/// True when the record conforms to the default instance type criteria:
/// no FPGA, not bare metal, and a general-purpose family prefix. Applied
/// only when the caller gave no explicit allow-list.
pub fn is_default_instance_type(instance_type: &InstanceType) -> bool {
    !instance_type.fpga
        && !instance_type.bare_metal
        && has_any_prefix(&instance_type.name, DEFAULT_FAMILY_PREFIXES)
}

fn is_instance_type_supported(allow_list: &[String], instance_type: &InstanceType) -> bool {
    if allow_list.is_empty() {
        // No allow-list given; fall back to the default-type heuristic.
        is_default_instance_type(instance_type)
    } else {
        allow_list.iter().any(|name| name == &instance_type.name)
    }
}

fn is_capacity_type_supported(capacity_type: Option<&str>, instance_type: &InstanceType) -> bool {
    match capacity_type {
        None => true,
        Some(ct) => instance_type.usage_classes.iter().any(|c| c == ct),
    }
}

fn is_architecture_supported(architecture: Option<&str>, instance_type: &InstanceType) -> bool {
    match architecture {
        None => true,
        Some(arch) => instance_type.architectures.iter().any(|a| a == arch),
    }
}

fn is_zones_supported(zones: &[String], instance_type: &InstanceType) -> bool {
    zones.is_empty() || intersects(&instance_type.zones, zones)
}

fn is_nvidia_gpu_supported(requests: &ResourceRequests, instance_type: &InstanceType) -> bool {
    if !requests.contains_key(resources::NVIDIA_GPU) {
        return true;
    }
    matches!(&instance_type.gpu, Some(gpu) if gpu.manufacturer == "NVIDIA")
}

fn is_neuron_supported(requests: &ResourceRequests, instance_type: &InstanceType) -> bool {
    if !requests.contains_key(resources::AWS_NEURON) {
        return true;
    }
    matches!(&instance_type.inference_accelerator, Some(acc) if acc.manufacturer == "AWS")
}

/// Apply the full predicate pipeline over a catalog snapshot.
///
/// All predicates must hold for a record to pass; cheap name/class checks
/// run before the zone intersection and hardware gates. Filtering is pure
/// and cannot fail.
pub fn filter_instance_types(
    instance_types: &[InstanceType],
    constraints: &Constraints,
    zones: &[String],
) -> Vec<InstanceType> {
    let requests = resources::requests_for_pods(&constraints.pods);
    let architecture = constraints
        .architecture
        .as_deref()
        .map(normalize_architecture);

    instance_types
        .iter()
        .filter(|it| {
            is_instance_type_supported(&constraints.instance_types, it)
                && is_capacity_type_supported(constraints.capacity_type.as_deref(), it)
                && is_architecture_supported(architecture, it)
                && is_zones_supported(zones, it)
                && is_nvidia_gpu_supported(&requests, it)
                && is_neuron_supported(&requests, it)
        })
        .cloned()
        .collect()
}
