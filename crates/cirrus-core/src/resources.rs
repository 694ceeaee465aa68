use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resource key for NVIDIA GPUs in pod resource requests.
pub const NVIDIA_GPU: &str = "nvidia.com/gpu";
/// Resource key for AWS Neuron inference accelerators.
pub const AWS_NEURON: &str = "aws.amazon.com/neuron";
/// Resource key for CPU, in millicores.
pub const CPU: &str = "cpu";
/// Resource key for memory, in bytes.
pub const MEMORY: &str = "memory";

/// Aggregated resource demand, keyed by resource name.
pub type ResourceRequests = HashMap<String, i64>;

/// Resource requests of one container.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ContainerSpec {
    #[serde(default)]
    pub requests: HashMap<String, i64>,
}

/// A workload pod, reduced to what scheduling needs: its containers'
/// resource requests.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PodSpec {
    #[serde(default)]
    pub containers: Vec<ContainerSpec>,
}

/// Sum resource requests across all containers of all pods.
///
/// The catalog filter only inspects the result for the presence of the GPU
/// and accelerator keys, but the aggregation sums every key so downstream
/// packing can reuse the same vector.
pub fn requests_for_pods(pods: &[PodSpec]) -> ResourceRequests {
    let mut requests = ResourceRequests::new();
    for pod in pods {
        for container in &pod.containers {
            for (name, quantity) in &container.requests {
                *requests.entry(name.clone()).or_insert(0) += quantity;
            }
        }
    }
    requests
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pod(requests: &[(&str, i64)]) -> PodSpec {
        PodSpec {
            containers: vec![ContainerSpec {
                requests: requests
                    .iter()
                    .map(|(k, v)| (k.to_string(), *v))
                    .collect(),
            }],
        }
    }

    #[test]
    fn test_requests_sum_across_pods_and_containers() {
        let pods = vec![
            pod(&[(CPU, 500), (NVIDIA_GPU, 1)]),
            pod(&[(CPU, 250), (MEMORY, 1 << 30)]),
        ];
        let requests = requests_for_pods(&pods);
        assert_eq!(requests[CPU], 750);
        assert_eq!(requests[NVIDIA_GPU], 1);
        assert_eq!(requests[MEMORY], 1 << 30);
    }

    #[test]
    fn test_empty_pods_yield_empty_requests() {
        assert!(requests_for_pods(&[]).is_empty());
    }
}
