use crate::errors::{ProviderError, Result};
use cirrus_api::{ApiError, ComputeMetadata};
use cirrus_core::{ApiInstanceTypeRecord, InstanceType};
use log::debug;
use std::collections::{HashMap, HashSet};

/// Build one catalog snapshot: fetch capability metadata and zonal offerings
/// (two independent paginated listings, run concurrently) and join them by
/// instance type name.
///
/// Records with no zonal offerings stay in the catalog with an empty zone
/// set; they simply fail zone filtering later when zones are required.
/// Catalog order is first-encounter order of the metadata listing.
pub async fn build_catalog<A>(api: &A) -> Result<Vec<InstanceType>>
where
    A: ComputeMetadata + ?Sized,
{
    let (records, zonal) = futures::future::try_join(
        async {
            fetch_all_instance_types(api)
                .await
                .map_err(ProviderError::DescribeInstanceTypes)
        },
        async {
            fetch_zonal_offerings(api)
                .await
                .map_err(ProviderError::DescribeOfferings)
        },
    )
    .await?;

    Ok(join_zones(records, &zonal))
}

/// Drain the paginated instance-types listing. The hvm virtualization filter
/// is applied server-side by the client.
async fn fetch_all_instance_types<A>(
    api: &A,
) -> std::result::Result<Vec<ApiInstanceTypeRecord>, ApiError>
where
    A: ComputeMetadata + ?Sized,
{
    let mut records = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let page = api.describe_instance_types(token.as_deref()).await?;
        records.extend(page.instance_types);
        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }
    debug!("Fetched {} instance type records", records.len());
    Ok(records)
}

/// Drain the paginated offerings listing into a zone -> type names map.
async fn fetch_zonal_offerings<A>(
    api: &A,
) -> std::result::Result<HashMap<String, Vec<String>>, ApiError>
where
    A: ComputeMetadata + ?Sized,
{
    let mut zonal: HashMap<String, Vec<String>> = HashMap::new();
    let mut token: Option<String> = None;
    loop {
        let page = api.describe_instance_type_offerings(token.as_deref()).await?;
        for offering in page.offerings {
            zonal
                .entry(offering.location)
                .or_default()
                .push(offering.instance_type);
        }
        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }
    debug!("Fetched offerings across {} zones", zonal.len());
    Ok(zonal)
}

/// Join capability records with zonal presence. A type name maps to exactly
/// one record per snapshot; repeated metadata entries for the same name are
/// ignored, and zone attachment deduplicates.
fn join_zones(
    records: Vec<ApiInstanceTypeRecord>,
    zonal: &HashMap<String, Vec<String>>,
) -> Vec<InstanceType> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut catalog: Vec<InstanceType> = Vec::new();

    for raw in records {
        if !seen.insert(raw.instance_type.clone()) {
            continue;
        }
        let mut instance_type: InstanceType = raw.into();
        for (zone, names) in zonal {
            if names.iter().any(|name| name == &instance_type.name) {
                instance_type.add_zone(zone);
            }
        }
        catalog.push(instance_type);
    }
    catalog
}
