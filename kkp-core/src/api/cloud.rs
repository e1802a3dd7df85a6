use std::collections::BTreeMap;

use derive_more::From;
use serde::{Deserialize, Serialize};

use crate::{
    required::{missing, serialize_checked},
    ProviderType, RequiredFields,
};

/// Cloud provider settings for a node, exactly one provider per spec
///
/// Serializing a variant checks its [`RequiredFields`] first, so a spec that is missing
/// fields fails to encode with the list of missing field names.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, From)]
#[serde(rename_all = "lowercase")]
pub enum NodeCloudSpec {
    /// DigitalOcean droplets
    #[serde(serialize_with = "serialize_checked")]
    Digitalocean(DigitaloceanNodeSpec),
    /// AWS EC2 instances
    #[serde(serialize_with = "serialize_checked")]
    Aws(AwsNodeSpec),
    /// Azure virtual machines
    #[serde(serialize_with = "serialize_checked")]
    Azure(AzureNodeSpec),
    /// OpenStack servers
    #[serde(serialize_with = "serialize_checked")]
    Openstack(OpenstackNodeSpec),
    /// Equinix Metal (formerly Packet) devices
    #[serde(serialize_with = "serialize_checked")]
    Packet(PacketNodeSpec),
    /// Hetzner Cloud servers
    #[serde(serialize_with = "serialize_checked")]
    Hetzner(HetznerNodeSpec),
    /// vSphere virtual machines
    #[serde(serialize_with = "serialize_checked")]
    Vsphere(VsphereNodeSpec),
    /// Google Compute Engine instances
    #[serde(serialize_with = "serialize_checked")]
    Gcp(GcpNodeSpec),
    /// KubeVirt virtual machines
    #[serde(serialize_with = "serialize_checked")]
    Kubevirt(KubevirtNodeSpec),
    /// Alibaba ECS instances
    #[serde(serialize_with = "serialize_checked")]
    Alibaba(AlibabaNodeSpec),
    /// Anexia Engine virtual machines
    #[serde(serialize_with = "serialize_checked")]
    Anexia(AnexiaNodeSpec),
    /// Nutanix virtual machines
    #[serde(serialize_with = "serialize_checked")]
    Nutanix(NutanixNodeSpec),
    /// VMware Cloud Director virtual machines
    #[serde(serialize_with = "serialize_checked")]
    VmwareCloudDirector(VmwareCloudDirectorNodeSpec),
}

variant_accessors!(NodeCloudSpec {
    Digitalocean(DigitaloceanNodeSpec) => digitalocean, into_digitalocean;
    Aws(AwsNodeSpec) => aws, into_aws;
    Azure(AzureNodeSpec) => azure, into_azure;
    Openstack(OpenstackNodeSpec) => openstack, into_openstack;
    Packet(PacketNodeSpec) => packet, into_packet;
    Hetzner(HetznerNodeSpec) => hetzner, into_hetzner;
    Vsphere(VsphereNodeSpec) => vsphere, into_vsphere;
    Gcp(GcpNodeSpec) => gcp, into_gcp;
    Kubevirt(KubevirtNodeSpec) => kubevirt, into_kubevirt;
    Alibaba(AlibabaNodeSpec) => alibaba, into_alibaba;
    Anexia(AnexiaNodeSpec) => anexia, into_anexia;
    Nutanix(NutanixNodeSpec) => nutanix, into_nutanix;
    VmwareCloudDirector(VmwareCloudDirectorNodeSpec) => vmware_cloud_director, into_vmware_cloud_director;
});

impl NodeCloudSpec {
    /// The provider this spec is for
    pub fn provider_type(&self) -> ProviderType {
        match self {
            Self::Digitalocean(_) => ProviderType::Digitalocean,
            Self::Aws(_) => ProviderType::Aws,
            Self::Azure(_) => ProviderType::Azure,
            Self::Openstack(_) => ProviderType::Openstack,
            Self::Packet(_) => ProviderType::Packet,
            Self::Hetzner(_) => ProviderType::Hetzner,
            Self::Vsphere(_) => ProviderType::Vsphere,
            Self::Gcp(_) => ProviderType::Gcp,
            Self::Kubevirt(_) => ProviderType::Kubevirt,
            Self::Alibaba(_) => ProviderType::Alibaba,
            Self::Anexia(_) => ProviderType::Anexia,
            Self::Nutanix(_) => ProviderType::Nutanix,
            Self::VmwareCloudDirector(_) => ProviderType::VmwareCloudDirector,
        }
    }
}

impl RequiredFields for NodeCloudSpec {
    fn missing_required_fields(&self) -> Vec<&'static str> {
        match self {
            Self::Digitalocean(spec) => spec.missing_required_fields(),
            Self::Aws(spec) => spec.missing_required_fields(),
            Self::Azure(spec) => spec.missing_required_fields(),
            Self::Openstack(spec) => spec.missing_required_fields(),
            Self::Packet(spec) => spec.missing_required_fields(),
            Self::Hetzner(spec) => spec.missing_required_fields(),
            Self::Vsphere(spec) => spec.missing_required_fields(),
            Self::Gcp(spec) => spec.missing_required_fields(),
            Self::Kubevirt(spec) => spec.missing_required_fields(),
            Self::Alibaba(spec) => spec.missing_required_fields(),
            Self::Anexia(spec) => spec.missing_required_fields(),
            Self::Nutanix(spec) => spec.missing_required_fields(),
            Self::VmwareCloudDirector(spec) => spec.missing_required_fields(),
        }
    }
}

/// DigitalOcean droplet settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DigitaloceanNodeSpec {
    /// Droplet size slug, e.g. `s-1vcpu-1gb`
    pub size: String,
    /// Enable provider backups
    pub backups: bool,
    /// Enable IPv6 networking
    pub ipv6: bool,
    /// Enable the monitoring agent
    pub monitoring: bool,
    /// Extra droplet tags
    pub tags: Vec<String>,
}

impl RequiredFields for DigitaloceanNodeSpec {
    fn missing_required_fields(&self) -> Vec<&'static str> {
        missing([("size", self.size.is_empty())])
    }
}

/// Hetzner Cloud server settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct HetznerNodeSpec {
    /// Server type, e.g. `cx21`
    #[serde(rename = "type")]
    pub server_type: String,
    /// Private network to attach, falls back to the cluster's and then the datacenter's
    pub network: String,
}

impl RequiredFields for HetznerNodeSpec {
    fn missing_required_fields(&self) -> Vec<&'static str> {
        missing([("type", self.server_type.is_empty())])
    }
}

/// Azure virtual machine settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AzureNodeSpec {
    /// VM size, e.g. `Standard_B1ms`
    pub size: String,
    /// Attach a public IP
    #[serde(rename = "assignPublicIP")]
    pub assign_public_ip: bool,
    /// Extra resource tags
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    /// OS disk size in GB, zero for the image default
    pub os_disk_size: i32,
    /// Data disk size in GB, zero for none
    pub data_disk_size: i32,
    /// Availability zones
    pub zones: Vec<String>,
    /// Custom image, overriding the datacenter's image for the operating system
    #[serde(rename = "imageID")]
    pub image_id: String,
    /// Place the VM in the cluster's availability set
    pub assign_availability_set: bool,
}

impl RequiredFields for AzureNodeSpec {
    fn missing_required_fields(&self) -> Vec<&'static str> {
        missing([("size", self.size.is_empty())])
    }
}

/// vSphere virtual machine settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct VsphereNodeSpec {
    /// Number of vCPUs
    pub cpus: i32,
    /// Memory in MB
    pub memory: i32,
    /// Disk size in GB
    #[serde(rename = "diskSizeGB", skip_serializing_if = "Option::is_none")]
    pub disk_size_gb: Option<i64>,
    /// Template VM to clone
    pub template: String,
    /// Tags attached to the VM
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<VsphereTag>,
}

/// A vSphere tag
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct VsphereTag {
    /// Tag name
    pub name: String,
    /// Tag description
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Tag category, defaults to the cluster's category
    #[serde(rename = "categoryID", skip_serializing_if = "String::is_empty")]
    pub category_id: String,
}

impl RequiredFields for VsphereNodeSpec {
    fn missing_required_fields(&self) -> Vec<&'static str> {
        missing([
            ("cpus", self.cpus == 0),
            ("memory", self.memory == 0),
            ("diskSizeGB", self.disk_size_gb.unwrap_or_default() == 0),
            ("template", self.template.is_empty()),
        ])
    }
}

/// OpenStack server settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct OpenstackNodeSpec {
    /// Flavor name
    pub flavor: String,
    /// Image name
    pub image: String,
    /// Extra server metadata tags
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    /// Attach a floating IP from the cluster's pool
    #[serde(rename = "useFloatingIP", skip_serializing_if = "std::ops::Not::not")]
    pub use_floating_ip: bool,
    /// Boot from a volume of this size in GB
    #[serde(rename = "diskSize")]
    pub root_disk_size_gb: Option<i32>,
    /// Availability zone, overriding the datacenter's
    pub availability_zone: String,
    /// Poll period while waiting for the server to become ready
    pub instance_ready_check_period: String,
    /// Timeout while waiting for the server to become ready
    pub instance_ready_check_timeout: String,
    /// Server group to schedule into
    pub server_group: String,
}

impl RequiredFields for OpenstackNodeSpec {
    fn missing_required_fields(&self) -> Vec<&'static str> {
        missing([("flavor", self.flavor.is_empty()), ("image", self.image.is_empty())])
    }
}

/// AWS EC2 instance settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AwsNodeSpec {
    /// Instance type, e.g. `t3.small`
    pub instance_type: String,
    /// Root volume size in GB
    #[serde(rename = "diskSize")]
    pub volume_size: i32,
    /// Root volume type, e.g. `gp2`
    pub volume_type: String,
    /// AMI, overriding the datacenter's image for the operating system
    pub ami: String,
    /// Extra instance tags
    pub tags: BTreeMap<String, String>,
    /// Availability zone
    pub availability_zone: String,
    /// Subnet, the zone's default subnet when empty
    #[serde(rename = "subnetID")]
    pub subnet_id: String,
    /// Attach a public IP
    #[serde(rename = "assignPublicIP")]
    pub assign_public_ip: Option<bool>,
    /// Request a spot instance
    pub is_spot_instance: Option<bool>,
    /// Maximum spot price
    pub spot_instance_max_price: Option<String>,
    /// Keep the spot request open after interruption
    pub spot_instance_persistent_request: Option<bool>,
    /// What happens on interruption: `stop`, `hibernate` or `terminate`
    pub spot_instance_interruption_behavior: Option<String>,
    /// Role to assume for instance management
    #[serde(rename = "assumeRoleARN")]
    pub assume_role_arn: String,
    /// External id used when assuming the role
    #[serde(rename = "assumeRoleExternalID")]
    pub assume_role_external_id: String,
}

impl RequiredFields for AwsNodeSpec {
    fn missing_required_fields(&self) -> Vec<&'static str> {
        missing([
            ("instanceType", self.instance_type.is_empty()),
            ("diskSize", self.volume_size == 0),
            ("volumeType", self.volume_type.is_empty()),
        ])
    }
}

/// Equinix Metal device settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct PacketNodeSpec {
    /// Device plan, e.g. `c3.small.x86`
    pub instance_type: String,
    /// Extra device tags
    pub tags: Vec<String>,
}

impl RequiredFields for PacketNodeSpec {
    fn missing_required_fields(&self) -> Vec<&'static str> {
        missing([("instanceType", self.instance_type.is_empty())])
    }
}

/// Google Compute Engine instance settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct GcpNodeSpec {
    /// Zone, e.g. `europe-west3-a`
    pub zone: String,
    /// Machine type, e.g. `e2-small`
    pub machine_type: String,
    /// Boot disk size in GB
    pub disk_size: i64,
    /// Boot disk type, e.g. `pd-standard`
    pub disk_type: String,
    /// Create a preemptible instance
    pub preemptible: bool,
    /// Extra instance labels
    pub labels: BTreeMap<String, String>,
    /// Extra network tags
    pub tags: Vec<String>,
    /// Custom image, overriding the default image for the operating system
    pub custom_image: String,
}

impl RequiredFields for GcpNodeSpec {
    fn missing_required_fields(&self) -> Vec<&'static str> {
        missing([
            ("zone", self.zone.is_empty()),
            ("machineType", self.machine_type.is_empty()),
            ("diskSize", self.disk_size == 0),
            ("diskType", self.disk_type.is_empty()),
        ])
    }
}

/// KubeVirt virtual machine settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct KubevirtNodeSpec {
    /// Flavor providing cpu and memory, makes `cpus` and `memory` optional
    pub flavor_name: String,
    /// Profile within the flavor
    pub flavor_profile: String,
    /// CPU quantity, e.g. `2`
    pub cpus: String,
    /// Memory quantity, e.g. `4Gi`
    pub memory: String,
    /// URL or DataVolume name of the OS image
    #[serde(rename = "primaryDiskOSImage")]
    pub primary_disk_os_image: String,
    /// Storage class of the primary disk
    pub primary_disk_storage_class_name: String,
    /// Primary disk size quantity, e.g. `20Gi`
    pub primary_disk_size: String,
    /// Additional disks
    pub secondary_disks: Vec<SecondaryDisks>,
    /// Pod affinity preset, `soft` or `hard`
    pub pod_affinity_preset: String,
    /// Pod anti-affinity preset, `soft` or `hard`
    pub pod_anti_affinity_preset: String,
    /// Node affinity preset
    pub node_affinity_preset: NodeAffinityPreset,
}

/// An additional KubeVirt disk
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SecondaryDisks {
    /// Size quantity
    pub size: String,
    /// Storage class
    pub storage_class_name: String,
}

/// KubeVirt node affinity preset
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct NodeAffinityPreset {
    /// `soft` or `hard`
    #[serde(rename = "type")]
    pub preset_type: String,
    /// Node label key
    pub key: String,
    /// Node label values
    pub values: Vec<String>,
}

impl RequiredFields for KubevirtNodeSpec {
    fn missing_required_fields(&self) -> Vec<&'static str> {
        let without_flavor = self.flavor_name.is_empty();
        missing([
            ("cpus", without_flavor && self.cpus.is_empty()),
            ("memory", without_flavor && self.memory.is_empty()),
            ("primaryDiskOSImage", self.primary_disk_os_image.is_empty()),
            ("primaryDiskStorageClassName", self.primary_disk_storage_class_name.is_empty()),
            ("primaryDiskSize", self.primary_disk_size.is_empty()),
        ])
    }
}

/// Alibaba ECS instance settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AlibabaNodeSpec {
    /// Instance type, e.g. `ecs.t1.xsmall`
    pub instance_type: String,
    /// System disk size in GB
    pub disk_size: String,
    /// System disk category
    pub disk_type: String,
    /// Virtual switch
    #[serde(rename = "vSwitchID")]
    pub v_switch_id: String,
    /// Outbound bandwidth cap in Mbit/s
    pub internet_max_bandwidth_out: String,
    /// Extra instance labels
    pub labels: BTreeMap<String, String>,
    /// Zone
    #[serde(rename = "zoneID")]
    pub zone_id: String,
}

impl RequiredFields for AlibabaNodeSpec {
    fn missing_required_fields(&self) -> Vec<&'static str> {
        missing([
            ("instanceType", self.instance_type.is_empty()),
            ("diskSize", self.disk_size.is_empty()),
            ("diskType", self.disk_type.is_empty()),
            ("vSwitchID", self.v_switch_id.is_empty()),
            ("internetMaxBandwidthOut", self.internet_max_bandwidth_out.is_empty()),
            ("zoneID", self.zone_id.is_empty()),
        ])
    }
}

/// Anexia Engine virtual machine settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AnexiaNodeSpec {
    /// VLAN identifier
    #[serde(rename = "vlanID")]
    pub vlan_id: String,
    /// Template identifier
    #[serde(rename = "templateID")]
    pub template_id: String,
    /// Number of CPUs
    pub cpus: i32,
    /// Memory in MB
    pub memory: i64,
    /// Single disk size in GB, superseded by `disks`
    pub disk_size: Option<i64>,
    /// Disks to attach
    pub disks: Vec<AnexiaDiskConfig>,
}

/// A disk attached to an Anexia virtual machine
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AnexiaDiskConfig {
    /// Size in GB
    pub size: i64,
    /// Performance type, the engine default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_type: Option<String>,
}

impl RequiredFields for AnexiaNodeSpec {
    fn missing_required_fields(&self) -> Vec<&'static str> {
        let has_disks = self.disk_size.unwrap_or_default() > 0 || !self.disks.is_empty();
        missing([
            ("vlanID", self.vlan_id.is_empty()),
            ("templateID", self.template_id.is_empty()),
            ("cpus", self.cpus == 0),
            ("memory", self.memory == 0),
            ("disks", !has_disks),
        ])
    }
}

/// Nutanix virtual machine settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct NutanixNodeSpec {
    /// Subnet to attach
    pub subnet_name: String,
    /// Image to boot from
    pub image_name: String,
    /// Extra categories
    pub categories: BTreeMap<String, String>,
    /// Number of vCPUs
    pub cpus: i64,
    /// Cores per vCPU
    pub cpu_cores: Option<i64>,
    /// Pass the host CPU model through
    pub cpu_passthrough: Option<bool>,
    /// Memory in MB
    #[serde(rename = "memoryMB")]
    pub memory_mb: i64,
    /// Disk size in GB
    pub disk_size: Option<i64>,
}

impl RequiredFields for NutanixNodeSpec {
    fn missing_required_fields(&self) -> Vec<&'static str> {
        missing([
            ("subnetName", self.subnet_name.is_empty()),
            ("imageName", self.image_name.is_empty()),
            ("cpus", self.cpus == 0),
            ("memoryMB", self.memory_mb == 0),
        ])
    }
}

/// VMware Cloud Director virtual machine settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct VmwareCloudDirectorNodeSpec {
    /// Number of CPUs
    pub cpus: i32,
    /// Cores per socket
    pub cpu_cores: i32,
    /// Memory in MB
    #[serde(rename = "memoryMB")]
    pub memory_mb: i32,
    /// Disk size in GB
    #[serde(rename = "diskSizeGB", skip_serializing_if = "Option::is_none")]
    pub disk_size_gb: Option<i64>,
    /// Disk IOPS limit
    #[serde(rename = "diskIOPS", skip_serializing_if = "Option::is_none")]
    pub disk_iops: Option<i64>,
    /// vApp template
    pub template: String,
    /// Catalog holding the template, defaults to the datacenter's
    pub catalog: String,
    /// Storage profile, defaults to the datacenter's
    pub storage_profile: String,
    /// `DHCP`, `POOL` or `MANUAL`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ip_allocation_mode: String,
    /// vApp the VM is placed in, informational
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vapp: String,
    /// Network the VM is attached to, informational
    #[serde(skip_serializing_if = "String::is_empty")]
    pub network: String,
    /// VM metadata
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl RequiredFields for VmwareCloudDirectorNodeSpec {
    fn missing_required_fields(&self) -> Vec<&'static str> {
        missing([
            ("cpus", self.cpus == 0),
            ("cpuCores", self.cpu_cores == 0),
            ("memoryMB", self.memory_mb == 0),
            ("template", self.template.is_empty()),
            ("catalog", self.catalog.is_empty()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_error(spec: impl Into<NodeCloudSpec>) -> String {
        serde_json::to_string(&spec.into()).unwrap_err().to_string()
    }

    #[test]
    fn zero_specs_list_missing_fields_in_declaration_order() {
        let prefix = "missing or invalid required parameter(s): ";
        let cases: Vec<(NodeCloudSpec, &str)> = vec![
            (DigitaloceanNodeSpec::default().into(), "size"),
            (AwsNodeSpec::default().into(), "instanceType, diskSize, volumeType"),
            (AzureNodeSpec::default().into(), "size"),
            (OpenstackNodeSpec::default().into(), "flavor, image"),
            (PacketNodeSpec::default().into(), "instanceType"),
            (HetznerNodeSpec::default().into(), "type"),
            (VsphereNodeSpec::default().into(), "cpus, memory, diskSizeGB, template"),
            (GcpNodeSpec::default().into(), "zone, machineType, diskSize, diskType"),
            (
                KubevirtNodeSpec::default().into(),
                "cpus, memory, primaryDiskOSImage, primaryDiskStorageClassName, primaryDiskSize",
            ),
            (
                AlibabaNodeSpec::default().into(),
                "instanceType, diskSize, diskType, vSwitchID, internetMaxBandwidthOut, zoneID",
            ),
            (AnexiaNodeSpec::default().into(), "vlanID, templateID, cpus, memory, disks"),
            (NutanixNodeSpec::default().into(), "subnetName, imageName, cpus, memoryMB"),
            (
                VmwareCloudDirectorNodeSpec::default().into(),
                "cpus, cpuCores, memoryMB, template, catalog",
            ),
        ];
        assert_eq!(cases.len(), ProviderType::ALL.len());
        for (spec, fields) in cases {
            let provider = spec.provider_type();
            assert_eq!(encode_error(spec), format!("{prefix}{fields}"), "{provider}");
        }
    }

    #[test]
    fn aws_example_message() {
        assert_eq!(
            encode_error(AwsNodeSpec::default()),
            "missing or invalid required parameter(s): instanceType, diskSize, volumeType"
        );
    }

    #[test]
    fn kubevirt_flavor_replaces_cpus_and_memory() {
        let spec = KubevirtNodeSpec {
            flavor_name: "small".into(),
            primary_disk_os_image: "ubuntu-22.04".into(),
            primary_disk_storage_class_name: "longhorn".into(),
            primary_disk_size: "20Gi".into(),
            ..Default::default()
        };
        assert!(spec.missing_required_fields().is_empty());
    }

    #[test]
    fn anexia_accepts_legacy_disk_size() {
        let mut spec = AnexiaNodeSpec {
            vlan_id: "vlan".into(),
            template_id: "tpl".into(),
            cpus: 2,
            memory: 2048,
            ..Default::default()
        };
        assert_eq!(spec.missing_required_fields(), vec!["disks"]);
        spec.disk_size = Some(60);
        assert!(spec.missing_required_fields().is_empty());
        spec.disk_size = None;
        spec.disks.push(AnexiaDiskConfig { size: 60, performance_type: None });
        assert!(spec.missing_required_fields().is_empty());
    }

    #[test]
    fn complete_spec_encodes_under_provider_key() {
        let spec: NodeCloudSpec = HetznerNodeSpec {
            server_type: "cx21".into(),
            network: String::new(),
        }
        .into();
        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            serde_json::json!({"hetzner": {"type": "cx21", "network": ""}})
        );
    }

    #[test]
    fn accessors_match_variants() {
        let spec = NodeCloudSpec::from(PacketNodeSpec::default());
        assert!(spec.packet().is_some());
        assert!(spec.aws().is_none());
        assert_eq!(spec.provider_type(), ProviderType::Packet);
        assert_eq!(spec.into_packet(), Some(PacketNodeSpec::default()));
    }
}
