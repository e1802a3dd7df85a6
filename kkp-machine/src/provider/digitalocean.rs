//! DigitalOcean droplets
use kkp_core::{
    api::DigitaloceanNodeSpec, cloudprovider::digitalocean::RawConfig, kubermatic::DigitaloceanDatacenterSpec,
    Cluster, OperatingSystem, ProviderType,
};

use super::{cluster_name, merge_tags, project_id, require};
use crate::Result;

/// Size, extras and tags chosen by the user
pub fn raw_config(spec: &DigitaloceanNodeSpec) -> RawConfig {
    RawConfig {
        size: spec.size.clone().into(),
        backups: spec.backups.into(),
        ipv6: spec.ipv6.into(),
        monitoring: spec.monitoring.into(),
        tags: spec.tags.iter().map(|t| t.as_str().into()).collect(),
        ..Default::default()
    }
}

/// Fills the region and the platform tags
///
/// Droplets always get private networking. On dual-stack clusters IPv6 is switched on
/// regardless of the node setting.
pub fn complete(
    spec: Option<RawConfig>,
    cluster: Option<&Cluster>,
    dc: &DigitaloceanDatacenterSpec,
    _os: OperatingSystem,
) -> Result<RawConfig> {
    let mut config = spec.unwrap_or_default();

    config.region.set_if_empty(dc.region.as_str());
    require(ProviderType::Digitalocean, "region", &config.region)?;
    config.private_networking = true.into();
    if cluster.is_some_and(Cluster::is_dual_stack) {
        config.ipv6 = true.into();
    }
    config.backups.set_if_empty(false);
    config.ipv6.set_if_empty(false);
    config.monitoring.set_if_empty(false);

    let mut extra = vec!["kubernetes".to_string()];
    if let Some(name) = cluster_name(cluster) {
        extra.push(format!("kubernetes-cluster-{name}"));
        extra.push(format!("system-cluster-{name}"));
    }
    if let Some(project) = project_id(cluster) {
        extra.push(format!("system-project-{project}"));
    }
    config.tags = merge_tags(&config.tags, extra);
    Ok(config)
}

/// Maps back the user owned settings
pub fn node_spec(config: &RawConfig) -> DigitaloceanNodeSpec {
    DigitaloceanNodeSpec {
        size: config.size.value.clone(),
        backups: config.backups.is_true(),
        ipv6: config.ipv6.is_true(),
        monitoring: config.monitoring.is_true(),
        tags: config.tags.iter().map(|t| t.value.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::fixtures::{cluster_for, datacenter_for};
    use assert_json_diff::assert_json_eq;
    use kkp_core::kubermatic::ClusterIpFamily;
    use serde_json::json;

    fn dc() -> DigitaloceanDatacenterSpec {
        datacenter_for(ProviderType::Digitalocean).spec.digitalocean.unwrap()
    }

    #[test]
    fn completes_droplet() {
        let given = raw_config(&DigitaloceanNodeSpec {
            size: "s-1vcpu-1gb".into(),
            monitoring: true,
            tags: vec!["app".into(), "kubernetes".into()],
            ..Default::default()
        });
        let config = complete(
            Some(given),
            Some(&cluster_for(ProviderType::Digitalocean)),
            &dc(),
            OperatingSystem::Ubuntu,
        )
        .unwrap();
        assert_json_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({
                "region": "fra1",
                "size": "s-1vcpu-1gb",
                "backups": false,
                "ipv6": false,
                "private_networking": true,
                "monitoring": true,
                "tags": [
                    "app",
                    "kubernetes",
                    "kubernetes-cluster-xyz",
                    "system-cluster-xyz",
                    "system-project-p1"
                ]
            })
        );
    }

    #[test]
    fn dual_stack_forces_ipv6() {
        let mut cluster = cluster_for(ProviderType::Digitalocean);
        cluster.spec.cluster_network.ip_family = Some(ClusterIpFamily::DualStack);
        let config = complete(None, Some(&cluster), &dc(), OperatingSystem::Ubuntu).unwrap();
        assert_eq!(config.ipv6.value, Some(true));
    }

    #[test]
    fn monitoring_maps_back_to_monitoring() {
        let node = DigitaloceanNodeSpec {
            monitoring: true,
            ..Default::default()
        };
        let back = node_spec(&raw_config(&node));
        assert!(back.monitoring);
        assert!(!back.backups);
    }
}
