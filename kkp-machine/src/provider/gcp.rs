//! Google Compute Engine instances
use kkp_core::{
    api::GcpNodeSpec, cloudprovider::gce::RawConfig, kubermatic::GcpDatacenterSpec, Cluster, OperatingSystem,
    ProviderType,
};

use super::{cluster_name, project_id};
use crate::{Error, Result};

/// Maps the user owned settings
pub fn raw_config(spec: &GcpNodeSpec) -> RawConfig {
    RawConfig {
        zone: spec.zone.clone().into(),
        machine_type: spec.machine_type.clone().into(),
        disk_size: spec.disk_size,
        disk_type: spec.disk_type.clone().into(),
        preemptible: spec.preemptible.into(),
        labels: spec.labels.clone(),
        tags: spec.tags.clone(),
        custom_image: spec.custom_image.clone().into(),
        ..Default::default()
    }
}

/// Fills zone and network settings and the platform network tags
///
/// Without a zone the first zone suffix of the datacenter region is used.
pub fn complete(
    spec: Option<RawConfig>,
    cluster: Option<&Cluster>,
    dc: &GcpDatacenterSpec,
    _os: OperatingSystem,
) -> Result<RawConfig> {
    let mut config = spec.unwrap_or_default();

    if config.zone.is_empty() {
        let suffix = dc.zone_suffixes.first().filter(|_| !dc.region.is_empty());
        let Some(suffix) = suffix else {
            return Err(Error::ProviderConfig {
                provider: ProviderType::Gcp,
                reason: "zone must be specified".into(),
            });
        };
        config.zone = format!("{}-{suffix}", dc.region).into();
    }
    if let Some(gcp) = cluster.and_then(|c| c.spec.cloud.gcp.as_ref()) {
        config.network.set_if_empty(gcp.network.as_str());
        config.subnetwork.set_if_empty(gcp.subnetwork.as_str());
    }
    config.preemptible.set_if_empty(false);
    config.assign_public_ip_address.get_or_insert_with(|| true.into());
    config.multi_zone.set_if_empty(false);
    config.regional.set_if_empty(dc.regional);

    let mut extra = Vec::new();
    if let Some(name) = cluster_name(cluster) {
        extra.push(format!("kubernetes-cluster-{name}"));
        extra.push(format!("system-cluster-{name}"));
    }
    if let Some(project) = project_id(cluster) {
        extra.push(format!("system-project-{project}"));
    }
    let mut tags: Vec<String> = config.tags.drain(..).chain(extra).filter(|t| !t.is_empty()).collect();
    tags.sort();
    tags.dedup();
    config.tags = tags;
    Ok(config)
}

/// Maps back the user owned settings
pub fn node_spec(config: &RawConfig) -> GcpNodeSpec {
    GcpNodeSpec {
        zone: config.zone.value.clone(),
        machine_type: config.machine_type.value.clone(),
        disk_size: config.disk_size,
        disk_type: config.disk_type.value.clone(),
        preemptible: config.preemptible.is_true(),
        labels: config.labels.clone(),
        tags: config.tags.clone(),
        custom_image: config.custom_image.value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::fixtures::{cluster_for, datacenter_for};
    use assert_json_diff::assert_json_include;
    use serde_json::json;

    fn dc() -> GcpDatacenterSpec {
        datacenter_for(ProviderType::Gcp).spec.gcp.unwrap()
    }

    #[test]
    fn zone_defaults_to_first_suffix() {
        let config = complete(
            Some(raw_config(&GcpNodeSpec {
                machine_type: "e2-small".into(),
                tags: vec!["web".into()],
                ..Default::default()
            })),
            Some(&cluster_for(ProviderType::Gcp)),
            &dc(),
            OperatingSystem::Ubuntu,
        )
        .unwrap();
        assert_json_include!(
            actual: serde_json::to_value(&config).unwrap(),
            expected: json!({
                "zone": "europe-west3-c",
                "network": "global/networks/default",
                "subnetwork": "",
                "preemptible": false,
                "assignPublicIPAddress": true,
                "multizone": false,
                "regional": false,
                "tags": ["kubernetes-cluster-xyz", "system-cluster-xyz", "system-project-p1", "web"]
            })
        );
    }

    #[test]
    fn zone_is_required_without_suffixes() {
        let err = complete(
            None,
            None,
            &GcpDatacenterSpec {
                zone_suffixes: vec![],
                ..dc()
            },
            OperatingSystem::Ubuntu,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid gcp provider config: zone must be specified");
    }
}
