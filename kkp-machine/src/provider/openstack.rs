//! OpenStack servers
use kkp_core::{
    api::OpenstackNodeSpec, cloudprovider::openstack::RawConfig, kubermatic::OpenstackDatacenterSpec, Cluster,
    OperatingSystem, ProviderType,
};

use super::{cluster_name, project_id, require};
use crate::Result;

/// Maps the user owned settings
///
/// A node asking for a floating IP gets one from the cluster's pool.
pub fn raw_config(spec: &OpenstackNodeSpec, cluster: Option<&Cluster>) -> RawConfig {
    let floating_ip_pool = cluster
        .and_then(|c| c.spec.cloud.openstack.as_ref())
        .filter(|_| spec.use_floating_ip)
        .map(|o| o.floating_ip_pool.clone())
        .unwrap_or_default();
    RawConfig {
        flavor: spec.flavor.clone().into(),
        image: spec.image.clone().into(),
        availability_zone: spec.availability_zone.clone().into(),
        floating_ip_pool: floating_ip_pool.into(),
        root_disk_size_gb: spec.root_disk_size_gb.filter(|size| *size > 0),
        server_group: spec.server_group.clone().into(),
        instance_ready_check_period: spec.instance_ready_check_period.clone().into(),
        instance_ready_check_timeout: spec.instance_ready_check_timeout.clone().into(),
        tags: spec.tags.clone(),
        ..Default::default()
    }
}

/// Fills identity endpoint, region, network and image settings
///
/// Datacenters enforcing floating IPs get the cluster pool even when the node asked
/// for none.
pub fn complete(
    spec: Option<RawConfig>,
    cluster: Option<&Cluster>,
    dc: &OpenstackDatacenterSpec,
    os: OperatingSystem,
) -> Result<RawConfig> {
    let mut config = spec.unwrap_or_default();

    config.identity_endpoint.set_if_empty(dc.auth_url.as_str());
    config.region.set_if_empty(dc.region.as_str());
    require(ProviderType::Openstack, "region", &config.region)?;
    config.availability_zone.set_if_empty(dc.availability_zone.as_str());
    if let Some(image) = dc.images.get(&os) {
        config.image.set_if_empty(image.as_str());
    }
    config
        .trust_device_path
        .set_if_empty(dc.trust_device_path.unwrap_or_default());

    if let Some(openstack) = cluster.and_then(|c| c.spec.cloud.openstack.as_ref()) {
        config.network.set_if_empty(openstack.network.as_str());
        config.subnet.set_if_empty(openstack.subnet_id.as_str());
        if config.security_groups.is_empty() && !openstack.security_groups.is_empty() {
            config.security_groups.push(openstack.security_groups.as_str().into());
        }
        if dc.enforce_floating_ip {
            config.floating_ip_pool.set_if_empty(openstack.floating_ip_pool.as_str());
        }
    }

    if let Some(name) = cluster_name(cluster) {
        config.tags.insert("kubernetes-cluster".into(), name.clone());
        config.tags.insert("system-cluster".into(), name);
    }
    if let Some(project) = project_id(cluster) {
        config.tags.insert("system-project".into(), project.into());
    }
    Ok(config)
}

/// Maps back the user owned settings
pub fn node_spec(config: &RawConfig) -> OpenstackNodeSpec {
    OpenstackNodeSpec {
        flavor: config.flavor.value.clone(),
        image: config.image.value.clone(),
        tags: config.tags.clone(),
        use_floating_ip: !config.floating_ip_pool.is_empty(),
        root_disk_size_gb: config.root_disk_size_gb.filter(|size| *size > 0),
        availability_zone: config.availability_zone.value.clone(),
        instance_ready_check_period: config.instance_ready_check_period.value.clone(),
        instance_ready_check_timeout: config.instance_ready_check_timeout.value.clone(),
        server_group: config.server_group.value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::fixtures::{cluster_for, datacenter_for};
    use assert_json_diff::assert_json_include;
    use serde_json::json;

    fn dc() -> OpenstackDatacenterSpec {
        datacenter_for(ProviderType::Openstack).spec.openstack.unwrap()
    }

    #[test]
    fn completes_from_cluster_and_datacenter() {
        let cluster = cluster_for(ProviderType::Openstack);
        let node = OpenstackNodeSpec {
            flavor: "m1.small".into(),
            ..Default::default()
        };
        let config = complete(
            Some(raw_config(&node, Some(&cluster))),
            Some(&cluster),
            &dc(),
            OperatingSystem::Ubuntu,
        )
        .unwrap();
        assert_json_include!(
            actual: serde_json::to_value(&config).unwrap(),
            expected: json!({
                "identityEndpoint": "https://keystone.example.com:5000/v3",
                "region": "RegionOne",
                "availabilityZone": "nova",
                "flavor": "m1.small",
                "image": "ubuntu-22.04",
                "securityGroups": ["sg"],
                "network": "net",
                "subnet": "subnet-1",
                "floatingIpPool": "",
                "trustDevicePath": true,
                "tags": {
                    "kubernetes-cluster": "xyz",
                    "system-cluster": "xyz",
                    "system-project": "p1"
                }
            })
        );
        assert!(config.root_disk_size_gb.is_none());
    }

    #[test]
    fn floating_ip_follows_node_or_datacenter() {
        let cluster = cluster_for(ProviderType::Openstack);
        let node = OpenstackNodeSpec {
            use_floating_ip: true,
            ..Default::default()
        };
        assert_eq!(raw_config(&node, Some(&cluster)).floating_ip_pool.value, "ext-net");
        assert!(raw_config(&node, None).floating_ip_pool.is_empty());

        let enforcing = OpenstackDatacenterSpec {
            enforce_floating_ip: true,
            ..dc()
        };
        let config = complete(None, Some(&cluster), &enforcing, OperatingSystem::Ubuntu).unwrap();
        assert_eq!(config.floating_ip_pool.value, "ext-net");
        assert!(node_spec(&config).use_floating_ip);
    }

    #[test]
    fn node_zone_wins_and_zero_disk_is_dropped() {
        let node = OpenstackNodeSpec {
            availability_zone: "az-2".into(),
            root_disk_size_gb: Some(0),
            ..Default::default()
        };
        let config = complete(Some(raw_config(&node, None)), None, &dc(), OperatingSystem::Ubuntu).unwrap();
        assert_eq!(config.availability_zone.value, "az-2");
        assert_eq!(config.root_disk_size_gb, None);
        assert_eq!(config.trust_device_path.value, Some(true));
    }
}
