//! Equinix Metal (formerly Packet) devices
use kkp_core::{
    api::PacketNodeSpec, cloudprovider::equinixmetal::RawConfig, kubermatic::PacketDatacenterSpec, Cluster,
    OperatingSystem, ProviderType,
};

use super::{cluster_name, merge_tags, project_id};
use crate::{Error, Result};

/// Instance type and tags chosen by the user
pub fn raw_config(spec: &PacketNodeSpec) -> RawConfig {
    RawConfig {
        instance_type: spec.instance_type.clone().into(),
        tags: spec.tags.iter().map(|t| t.as_str().into()).collect(),
        ..Default::default()
    }
}

/// Fills placement and billing settings and the platform tags
///
/// A device needs either a metro or at least one facility.
pub fn complete(
    spec: Option<RawConfig>,
    cluster: Option<&Cluster>,
    dc: &PacketDatacenterSpec,
    _os: OperatingSystem,
) -> Result<RawConfig> {
    let mut config = spec.unwrap_or_default();

    config.metro.set_if_empty(dc.metro.as_str());
    if config.facilities.is_empty() {
        let mut facilities = dc.facilities.clone();
        facilities.sort();
        config.facilities = facilities.into_iter().map(Into::into).collect();
    }
    if config.metro.is_empty() && config.facilities.is_empty() {
        return Err(Error::ProviderConfig {
            provider: ProviderType::Packet,
            reason: "equinixmetal metro or facilities must be specified".into(),
        });
    }
    if let Some(packet) = cluster.and_then(|c| c.spec.cloud.packet.as_ref()) {
        config.billing_cycle.set_if_empty(packet.billing_cycle.as_str());
    }

    let mut extra = vec!["kubernetes".to_string()];
    if let Some(name) = cluster_name(cluster) {
        extra.push(format!("kubernetes-cluster-{name}"));
        extra.push(format!("system/cluster:{name}"));
    }
    if let Some(project) = project_id(cluster) {
        extra.push(format!("system/project:{project}"));
    }
    config.tags = merge_tags(&config.tags, extra);
    Ok(config)
}

/// Maps back the user owned settings
pub fn node_spec(config: &RawConfig) -> PacketNodeSpec {
    PacketNodeSpec {
        instance_type: config.instance_type.value.clone(),
        tags: config.tags.iter().map(|t| t.value.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::fixtures::{cluster_for, datacenter_for};

    #[test]
    fn tags_and_placement() {
        let dc = PacketDatacenterSpec {
            facilities: vec!["sv15".into(), "ams1".into()],
            metro: String::new(),
        };
        let config = complete(
            Some(raw_config(&PacketNodeSpec {
                instance_type: "c3.small.x86".into(),
                tags: vec!["app".into()],
            })),
            Some(&cluster_for(ProviderType::Packet)),
            &dc,
            OperatingSystem::Ubuntu,
        )
        .unwrap();
        let facilities: Vec<_> = config.facilities.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(facilities, ["ams1", "sv15"]);
        assert_eq!(config.billing_cycle.value, "hourly");
        let tags: Vec<_> = config.tags.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(
            tags,
            [
                "app",
                "kubernetes",
                "kubernetes-cluster-xyz",
                "system/cluster:xyz",
                "system/project:p1"
            ]
        );
    }

    #[test]
    fn metro_alone_is_enough() {
        let dc = datacenter_for(ProviderType::Packet).spec.packet.unwrap();
        let config = complete(
            None,
            None,
            &PacketDatacenterSpec {
                facilities: vec![],
                ..dc
            },
            OperatingSystem::Ubuntu,
        )
        .unwrap();
        assert_eq!(config.metro.value, "AM");
        assert!(config.facilities.is_empty());
    }

    #[test]
    fn placement_is_required() {
        let err = complete(None, None, &PacketDatacenterSpec::default(), OperatingSystem::Ubuntu).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid packet provider config: equinixmetal metro or facilities must be specified"
        );
    }
}
