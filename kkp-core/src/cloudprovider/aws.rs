//! AWS settings as read by the machine controller
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::providerconfig::{ConfigVarBool, ConfigVarString};

/// Settings for an EC2 instance
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConfig {
    #[serde(rename = "assumeRoleARN")]
    pub assume_role_arn: ConfigVarString,
    #[serde(rename = "assumeRoleExternalID")]
    pub assume_role_external_id: ConfigVarString,
    pub region: ConfigVarString,
    pub availability_zone: ConfigVarString,
    #[serde(rename = "vpcId")]
    pub vpc_id: ConfigVarString,
    #[serde(rename = "subnetId")]
    pub subnet_id: ConfigVarString,
    #[serde(rename = "securityGroupIDs")]
    pub security_group_ids: Vec<ConfigVarString>,
    pub instance_profile: ConfigVarString,
    pub instance_type: ConfigVarString,
    #[serde(rename = "ami")]
    pub ami: ConfigVarString,
    pub disk_size: i32,
    pub disk_type: ConfigVarString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_iops: Option<i32>,
    #[serde(rename = "ebsvolumeEncrypted")]
    pub ebs_volume_encrypted: ConfigVarBool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    #[serde(rename = "assignPublicIP", skip_serializing_if = "Option::is_none")]
    pub assign_public_ip: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_spot_instance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot_instance_config: Option<SpotInstanceConfig>,
}

/// Spot request settings, only honoured together with `isSpotInstance`
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SpotInstanceConfig {
    pub max_price: ConfigVarString,
    pub persistent_request: ConfigVarBool,
    pub interruption_behavior: ConfigVarString,
}
