use serde::{Deserialize, Serialize};

use crate::{metadata::ObjectMeta, version::KubernetesVersion, Resource, ResourceExt, TypeMeta};

use super::ProviderType;

/// Label on a [`Cluster`] naming the project it belongs to
pub const PROJECT_ID_LABEL_KEY: &str = "project-id";

/// A user cluster managed by the platform
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Cluster {
    /// `apiVersion` and `kind`
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,
    /// Standard object metadata
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Desired state
    #[serde(default)]
    pub spec: ClusterSpec,
    /// Observed state
    #[serde(default)]
    pub status: ClusterStatus,
}

impl Resource for Cluster {
    const GROUP: &'static str = "kubermatic.k8c.io";
    const KIND: &'static str = "Cluster";
    const VERSION: &'static str = "v1";

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

impl Cluster {
    /// The owning project, taken from the [`PROJECT_ID_LABEL_KEY`] label
    pub fn project_id(&self) -> Option<&str> {
        self.labels().get(PROJECT_ID_LABEL_KEY).map(String::as_str)
    }

    /// Whether pods and services get both IPv4 and IPv6 addresses
    pub fn is_dual_stack(&self) -> bool {
        self.spec.cluster_network.ip_family == Some(ClusterIpFamily::DualStack)
    }
}

/// Desired state of a [`Cluster`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    /// Where and on which provider the cluster runs
    #[serde(default)]
    pub cloud: CloudSpec,
    /// Pod and service networking
    #[serde(default)]
    pub cluster_network: ClusterNetworkingConfig,
    /// Static networks for machines that are not configured via DHCP
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub machine_networks: Vec<MachineNetworkingConfig>,
    /// Control plane version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<KubernetesVersion>,
}

/// IP families of a cluster network
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClusterIpFamily {
    /// IPv4 only
    #[serde(rename = "IPv4")]
    Ipv4,
    /// IPv4 and IPv6
    #[serde(rename = "IPv4+IPv6")]
    DualStack,
}

/// Pod and service networking of a cluster
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNetworkingConfig {
    /// Defaults to IPv4 when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_family: Option<ClusterIpFamily>,
    /// Service address ranges
    #[serde(default)]
    pub services: NetworkRanges,
    /// Pod address ranges
    #[serde(default)]
    pub pods: NetworkRanges,
}

/// A list of CIDR blocks
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRanges {
    /// The blocks
    #[serde(default)]
    pub cidr_blocks: Vec<String>,
}

/// A statically addressed machine network
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MachineNetworkingConfig {
    /// Network in CIDR notation
    #[serde(default)]
    pub cidr: String,
    /// Default gateway
    #[serde(default)]
    pub gateway: String,
    /// Nameservers
    #[serde(default)]
    pub dns_servers: Vec<String>,
}

/// Observed state of a [`Cluster`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStatus {
    /// Seed namespace holding the control plane
    #[serde(default)]
    pub namespace_name: String,
}

/// Provider placement of a cluster
///
/// Mirrors the "one of N" layout of the platform resource: exactly one provider field is
/// expected to be set, matching `provider_name`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CloudSpec {
    /// Name of the datacenter within its seed
    #[serde(rename = "dc", default)]
    pub datacenter_name: String,
    /// The provider name, redundant with the set provider field
    #[serde(default)]
    pub provider_name: String,
    /// DigitalOcean settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digitalocean: Option<DigitaloceanCloudSpec>,
    /// AWS resources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<AwsCloudSpec>,
    /// Azure resources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure: Option<AzureCloudSpec>,
    /// OpenStack resources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openstack: Option<OpenstackCloudSpec>,
    /// Equinix Metal settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet: Option<PacketCloudSpec>,
    /// Hetzner settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hetzner: Option<HetznerCloudSpec>,
    /// vSphere resources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vsphere: Option<VsphereCloudSpec>,
    /// GCP network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcp: Option<GcpCloudSpec>,
    /// KubeVirt settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubevirt: Option<KubevirtCloudSpec>,
    /// Alibaba settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alibaba: Option<AlibabaCloudSpec>,
    /// Anexia settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anexia: Option<AnexiaCloudSpec>,
    /// Nutanix placement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutanix: Option<NutanixCloudSpec>,
    /// VMware Cloud Director placement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vmwareclouddirector: Option<VmwareCloudDirectorCloudSpec>,
}

impl CloudSpec {
    /// Providers with a set field, in [`ProviderType::ALL`] order
    pub fn provider_types(&self) -> Vec<ProviderType> {
        let set = [
            self.digitalocean.is_some(),
            self.aws.is_some(),
            self.azure.is_some(),
            self.openstack.is_some(),
            self.packet.is_some(),
            self.hetzner.is_some(),
            self.vsphere.is_some(),
            self.gcp.is_some(),
            self.kubevirt.is_some(),
            self.alibaba.is_some(),
            self.anexia.is_some(),
            self.nutanix.is_some(),
            self.vmwareclouddirector.is_some(),
        ];
        ProviderType::ALL
            .into_iter()
            .zip(set)
            .filter_map(|(provider, is_set)| is_set.then_some(provider))
            .collect()
    }

    /// The provider the cluster runs on
    ///
    /// Prefers the set provider field and falls back on `provider_name`.
    pub fn provider_type(&self) -> Option<ProviderType> {
        self.provider_types()
            .first()
            .copied()
            .or_else(|| self.provider_name.parse().ok())
    }
}

/// DigitalOcean placement, credentials only
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct DigitaloceanCloudSpec {}

/// AWS resources created for the cluster
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AwsCloudSpec {
    /// VPC the nodes run in
    #[serde(rename = "vpcID")]
    pub vpc_id: String,
    /// Route table of the VPC
    #[serde(rename = "routeTableID")]
    pub route_table_id: String,
    /// IAM instance profile of the nodes
    pub instance_profile_name: String,
    /// Security group of the nodes
    #[serde(rename = "securityGroupID")]
    pub security_group_id: String,
    /// Role assumed for API calls
    #[serde(rename = "assumeRoleARN", skip_serializing_if = "String::is_empty")]
    pub assume_role_arn: String,
    /// External id for assuming `assume_role_arn`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub assume_role_external_id: String,
}

/// Azure resources created for the cluster
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AzureCloudSpec {
    /// Resource group of the cluster
    pub resource_group: String,
    /// Resource group of the virtual network, if different
    pub vnet_resource_group: String,
    /// Virtual network
    #[serde(rename = "vnet")]
    pub vnet_name: String,
    /// Subnet of the nodes
    #[serde(rename = "subnet")]
    pub subnet_name: String,
    /// Route table
    #[serde(rename = "routeTable")]
    pub route_table_name: String,
    /// Network security group
    pub security_group: String,
    /// Whether nodes join `availability_set`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assign_availability_set: Option<bool>,
    /// Availability set
    pub availability_set: String,
}

/// OpenStack resources created for the cluster
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct OpenstackCloudSpec {
    /// Node network
    pub network: String,
    /// Comma separated group names
    pub security_groups: String,
    /// External network floating IPs come from
    #[serde(rename = "floatingIPPool")]
    pub floating_ip_pool: String,
    /// Router of the node network
    #[serde(rename = "routerID")]
    pub router_id: String,
    /// Node subnet
    #[serde(rename = "subnetID")]
    pub subnet_id: String,
}

/// Equinix Metal settings of the cluster
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct PacketCloudSpec {
    /// `hourly` or `monthly`
    pub billing_cycle: String,
}

/// Hetzner settings of the cluster
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct HetznerCloudSpec {
    /// Private network, overrides the datacenter default
    #[serde(skip_serializing_if = "String::is_empty")]
    pub network: String,
}

/// vSphere resources used by the cluster
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct VsphereCloudSpec {
    /// Network the VMs attach to
    #[serde(rename = "vmNetName", skip_serializing_if = "String::is_empty")]
    pub vm_net_name: String,
    /// Folder the VMs are created in
    pub folder: String,
    /// Datastore, overrides the datacenter default
    #[serde(skip_serializing_if = "String::is_empty")]
    pub datastore: String,
    /// Datastore cluster, exclusive with `datastore`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub datastore_cluster: String,
    /// Resource pool
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_pool: String,
    /// Tags for the VMs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<VsphereTag>,
}

/// Tags attached to every vSphere object of the cluster
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct VsphereTag {
    /// Tag names
    pub tags: Vec<String>,
    /// Category, overrides the datacenter default
    #[serde(rename = "categoryID", skip_serializing_if = "String::is_empty")]
    pub category_id: String,
}

/// GCP network of the cluster
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct GcpCloudSpec {
    /// VPC network
    pub network: String,
    /// Subnetwork of the nodes
    pub subnetwork: String,
}

/// KubeVirt placement, credentials only
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct KubevirtCloudSpec {}

/// Alibaba placement, credentials only
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AlibabaCloudSpec {}

/// Anexia placement, credentials only
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AnexiaCloudSpec {}

/// Nutanix placement of the cluster
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct NutanixCloudSpec {
    /// Prism Element cluster
    pub cluster_name: String,
    /// Project, if any
    #[serde(skip_serializing_if = "String::is_empty")]
    pub project_name: String,
}

/// VMware Cloud Director placement of the cluster
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct VmwareCloudDirectorCloudSpec {
    /// Organization
    #[serde(skip_serializing_if = "String::is_empty")]
    pub organization: String,
    /// Organization VDC
    #[serde(rename = "vdc", skip_serializing_if = "String::is_empty")]
    pub vdc: String,
    /// Network of the organization VDC
    #[serde(rename = "ovdcNetwork", skip_serializing_if = "String::is_empty")]
    pub ovdc_network: String,
    /// vApp the VMs are placed in
    #[serde(rename = "vapp", skip_serializing_if = "String::is_empty")]
    pub vapp: String,
}
