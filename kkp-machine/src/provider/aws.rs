//! AWS EC2 instances
use kkp_core::{
    api::AwsNodeSpec,
    cloudprovider::aws::{RawConfig, SpotInstanceConfig},
    kubermatic::AwsDatacenterSpec,
    Cluster, OperatingSystem, ProviderType,
};

use super::{cluster_name, project_id, require};
use crate::Result;

/// Root volume type used when the node spec names none
pub const DEFAULT_VOLUME_TYPE: &str = "gp2";

/// Root volume size in GB used when the node spec names none
pub const DEFAULT_VOLUME_SIZE: i32 = 25;

/// Maps the user owned settings
///
/// Spot instance settings are only carried when a spot instance is requested.
pub fn raw_config(spec: &AwsNodeSpec) -> RawConfig {
    let spot_instance_config = (spec.is_spot_instance == Some(true)).then(|| SpotInstanceConfig {
        max_price: spec.spot_instance_max_price.clone().unwrap_or_default().into(),
        persistent_request: spec.spot_instance_persistent_request.into(),
        interruption_behavior: spec
            .spot_instance_interruption_behavior
            .clone()
            .unwrap_or_default()
            .into(),
    });
    let disk_type = match spec.volume_type.as_str() {
        "" => DEFAULT_VOLUME_TYPE.to_string(),
        given => given.to_string(),
    };
    RawConfig {
        assume_role_arn: spec.assume_role_arn.clone().into(),
        assume_role_external_id: spec.assume_role_external_id.clone().into(),
        availability_zone: spec.availability_zone.clone().into(),
        subnet_id: spec.subnet_id.clone().into(),
        instance_type: spec.instance_type.clone().into(),
        ami: spec.ami.clone().into(),
        disk_size: match spec.volume_size {
            0 => DEFAULT_VOLUME_SIZE,
            size => size,
        },
        disk_type: disk_type.into(),
        tags: spec.tags.clone(),
        assign_public_ip: spec.assign_public_ip,
        is_spot_instance: spec.is_spot_instance,
        spot_instance_config,
        ..Default::default()
    }
}

/// Fills region, image and network placement from the datacenter and the cluster
///
/// The availability zone is only ever the node's choice. Left empty, EC2 places the
/// instance in the zone of its subnet.
pub fn complete(
    spec: Option<RawConfig>,
    cluster: Option<&Cluster>,
    dc: &AwsDatacenterSpec,
    os: OperatingSystem,
) -> Result<RawConfig> {
    let mut config = spec.unwrap_or_default();

    config.region.set_if_empty(dc.region.as_str());
    require(ProviderType::Aws, "region", &config.region)?;
    if let Some(ami) = dc.images.get(&os) {
        config.ami.set_if_empty(ami.as_str());
    }

    if let Some(aws) = cluster.and_then(|c| c.spec.cloud.aws.as_ref()) {
        config.vpc_id.set_if_empty(aws.vpc_id.as_str());
        config.instance_profile.set_if_empty(aws.instance_profile_name.as_str());
        config.assume_role_arn.set_if_empty(aws.assume_role_arn.as_str());
        config
            .assume_role_external_id
            .set_if_empty(aws.assume_role_external_id.as_str());
        if config.security_group_ids.is_empty() && !aws.security_group_id.is_empty() {
            config.security_group_ids.push(aws.security_group_id.as_str().into());
        }
    }
    config.ebs_volume_encrypted.set_if_empty(false);

    if let Some(name) = cluster_name(cluster) {
        config.tags.insert(format!("kubernetes.io/cluster/{name}"), String::new());
        config.tags.insert("system/cluster".into(), name);
    }
    if let Some(project) = project_id(cluster) {
        config.tags.insert("system/project".into(), project.into());
    }
    Ok(config)
}

/// Maps back the user owned settings
pub fn node_spec(config: &RawConfig) -> AwsNodeSpec {
    let spot = config
        .spot_instance_config
        .as_ref()
        .filter(|_| config.is_spot_instance == Some(true));
    AwsNodeSpec {
        instance_type: config.instance_type.value.clone(),
        volume_size: config.disk_size,
        volume_type: config.disk_type.value.clone(),
        ami: config.ami.value.clone(),
        tags: config.tags.clone(),
        availability_zone: config.availability_zone.value.clone(),
        subnet_id: config.subnet_id.value.clone(),
        assign_public_ip: config.assign_public_ip,
        is_spot_instance: config.is_spot_instance,
        spot_instance_max_price: spot.map(|s| s.max_price.value.clone()),
        spot_instance_persistent_request: spot.and_then(|s| s.persistent_request.value),
        spot_instance_interruption_behavior: spot.map(|s| s.interruption_behavior.value.clone()),
        assume_role_arn: config.assume_role_arn.value.clone(),
        assume_role_external_id: config.assume_role_external_id.value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::fixtures::{cluster_for, datacenter_for};
    use assert_json_diff::assert_json_include;
    use serde_json::json;

    fn dc() -> AwsDatacenterSpec {
        datacenter_for(ProviderType::Aws).spec.aws.unwrap()
    }

    #[test]
    fn completes_from_cluster_and_datacenter() {
        let cluster = cluster_for(ProviderType::Aws);
        let given = raw_config(&AwsNodeSpec {
            instance_type: "t3.small".into(),
            ..Default::default()
        });
        let config = complete(Some(given), Some(&cluster), &dc(), OperatingSystem::Flatcar).unwrap();
        assert_json_include!(
            actual: serde_json::to_value(&config).unwrap(),
            expected: json!({
                "region": "eu-central-1",
                "vpcId": "vpc-1",
                "securityGroupIDs": ["sg-1"],
                "instanceProfile": "xyz-profile",
                "instanceType": "t3.small",
                "ami": "ami-flatcar",
                "diskSize": 25,
                "diskType": "gp2",
                "ebsvolumeEncrypted": false,
                "tags": {
                    "kubernetes.io/cluster/xyz": "",
                    "system/cluster": "xyz",
                    "system/project": "p1"
                }
            })
        );
    }

    #[test]
    fn node_settings_win_over_context() {
        let given = raw_config(&AwsNodeSpec {
            instance_type: "t3.small".into(),
            ami: "ami-custom".into(),
            availability_zone: "eu-central-1b".into(),
            ..Default::default()
        });
        let config = complete(Some(given), None, &dc(), OperatingSystem::Ubuntu).unwrap();
        assert_eq!(config.ami.value, "ami-custom");
        assert_eq!(config.availability_zone.value, "eu-central-1b");
        assert!(config.tags.is_empty());
    }

    #[test]
    fn zone_is_left_to_the_subnet() {
        let given = raw_config(&AwsNodeSpec {
            instance_type: "t3.small".into(),
            subnet_id: "subnet-in-1b".into(),
            ..Default::default()
        });
        let config = complete(
            Some(given),
            Some(&cluster_for(ProviderType::Aws)),
            &dc(),
            OperatingSystem::Ubuntu,
        )
        .unwrap();
        assert_eq!(config.subnet_id.value, "subnet-in-1b");
        assert_eq!(config.availability_zone.value, "");
    }

    #[test]
    fn spot_settings_need_a_spot_instance() {
        let spec = AwsNodeSpec {
            spot_instance_max_price: Some("0.5".into()),
            ..Default::default()
        };
        assert!(raw_config(&spec).spot_instance_config.is_none());
        let spot = raw_config(&AwsNodeSpec {
            is_spot_instance: Some(true),
            ..spec
        });
        assert_eq!(spot.spot_instance_config.unwrap().max_price.value, "0.5");
    }

    #[test]
    fn region_is_required() {
        let err = complete(None, None, &AwsDatacenterSpec::default(), OperatingSystem::Ubuntu).unwrap_err();
        assert_eq!(err.to_string(), "invalid aws provider config: region must be specified");
    }
}
