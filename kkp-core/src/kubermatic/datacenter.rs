use std::{collections::BTreeMap, fs, path::Path};

use k8s_openapi::api::core::v1::PodDNSConfig;
use serde::{Deserialize, Serialize};

use crate::{metadata::ObjectMeta, Error, OperatingSystem, Resource, Result, TypeMeta};

use super::ProviderType;

/// Images or templates keyed by operating system
pub type ImageList = BTreeMap<OperatingSystem, String>;

/// A management cluster and the datacenters it serves
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Seed {
    /// `apiVersion` and `kind`
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,
    /// Standard object metadata
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Desired state
    #[serde(default)]
    pub spec: SeedSpec,
}

impl Resource for Seed {
    const GROUP: &'static str = "kubermatic.k8c.io";
    const KIND: &'static str = "Seed";
    const VERSION: &'static str = "v1";

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

/// Desired state of a [`Seed`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeedSpec {
    /// Country code of the seed location
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
    /// Human readable location
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    /// Datacenters by name
    #[serde(default)]
    pub datacenters: BTreeMap<String, Datacenter>,
}

impl Seed {
    /// Parses a seed from YAML
    ///
    /// The text may hold several documents; the first one that is not empty is used.
    pub fn from_yaml(text: &str) -> Result<Seed> {
        for doc in serde_yaml::Deserializer::from_str(text) {
            let value = serde_yaml::Value::deserialize(doc).map_err(Error::ParseConfig)?;
            if value.is_null() {
                continue;
            }
            return serde_yaml::from_value(value).map_err(Error::ParseConfig);
        }
        Err(Error::EmptyConfig)
    }

    /// Reads and parses a seed from a YAML file
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Seed> {
        let data =
            fs::read_to_string(&path).map_err(|source| Error::ReadConfig(source, path.as_ref().into()))?;
        Self::from_yaml(&data)
    }

    /// Looks up a datacenter by name
    pub fn datacenter(&self, name: &str) -> Option<&Datacenter> {
        self.spec.datacenters.get(name)
    }
}

/// A region and provider combination clusters can be placed in
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Datacenter {
    /// Country code
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
    /// Human readable location
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    /// Provider settings
    #[serde(default)]
    pub spec: DatacenterSpec,
}

/// Static provider settings of a [`Datacenter`]
///
/// Usually exactly one provider field is set.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatacenterSpec {
    /// DigitalOcean region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digitalocean: Option<DigitaloceanDatacenterSpec>,
    /// AWS region and AMIs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<AwsDatacenterSpec>,
    /// Azure location and images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure: Option<AzureDatacenterSpec>,
    /// OpenStack endpoint, region and images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openstack: Option<OpenstackDatacenterSpec>,
    /// Equinix Metal facilities or metro
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet: Option<PacketDatacenterSpec>,
    /// Hetzner datacenter and network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hetzner: Option<HetznerDatacenterSpec>,
    /// vCenter endpoint, placement and templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vsphere: Option<VsphereDatacenterSpec>,
    /// GCP region and zones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcp: Option<GcpDatacenterSpec>,
    /// KubeVirt DNS settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubevirt: Option<KubevirtDatacenterSpec>,
    /// Alibaba region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alibaba: Option<AlibabaDatacenterSpec>,
    /// Anexia location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anexia: Option<AnexiaDatacenterSpec>,
    /// Prism Central endpoint and images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutanix: Option<NutanixDatacenterSpec>,
    /// VMware Cloud Director endpoint, catalog and templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vmwareclouddirector: Option<VmwareCloudDirectorDatacenterSpec>,
    /// Default operating system profile per operating system
    #[serde(
        rename = "operatingSystemProfiles",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub default_operating_system_profiles: BTreeMap<OperatingSystem, String>,
}

impl DatacenterSpec {
    /// The provider of the first set provider field
    pub fn provider_type(&self) -> Option<ProviderType> {
        self.provider_types().first().copied()
    }

    /// Whether the datacenter carries settings for `provider`
    pub fn offers(&self, provider: ProviderType) -> bool {
        self.provider_types().contains(&provider)
    }

    /// Every provider with settings, in [`ProviderType::ALL`] order
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
}

/// DigitalOcean datacenter settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct DigitaloceanDatacenterSpec {
    /// Region slug, e.g. `fra1`
    pub region: String,
}

/// AWS datacenter settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AwsDatacenterSpec {
    /// EC2 region
    pub region: String,
    /// AMIs per operating system
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub images: ImageList,
}

/// Azure datacenter settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AzureDatacenterSpec {
    /// Azure location, e.g. `westeurope`
    pub location: String,
    /// Image ids per operating system
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub images: ImageList,
}

/// OpenStack datacenter settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct OpenstackDatacenterSpec {
    /// Keystone endpoint
    #[serde(rename = "authURL")]
    pub auth_url: String,
    /// Default availability zone
    #[serde(skip_serializing_if = "String::is_empty")]
    pub availability_zone: String,
    /// Region name
    pub region: String,
    /// Every node gets a floating IP
    #[serde(rename = "enforceFloatingIP")]
    pub enforce_floating_ip: bool,
    /// Nameservers of the datacenter networks
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dns_servers: Vec<String>,
    /// Image names per operating system
    pub images: ImageList,
    /// Default for trusting the cinder device path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_device_path: Option<bool>,
}

/// Equinix Metal datacenter settings
///
/// Either `facilities` or `metro` places the devices.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct PacketDatacenterSpec {
    /// Facility codes
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub facilities: Vec<String>,
    /// Metro code
    #[serde(skip_serializing_if = "String::is_empty")]
    pub metro: String,
}

/// Hetzner datacenter settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct HetznerDatacenterSpec {
    /// Datacenter name, e.g. `fsn1-dc14`
    pub datacenter: String,
    /// Default private network
    pub network: String,
    /// Location name, e.g. `fsn1`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,
}

/// vSphere datacenter settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct VsphereDatacenterSpec {
    /// vCenter URL
    pub endpoint: String,
    /// Skip TLS verification
    pub allow_insecure: bool,
    /// Datastore used unless the cluster names one
    #[serde(rename = "datastore")]
    pub default_datastore: String,
    /// vSphere datacenter name
    pub datacenter: String,
    /// Compute cluster
    pub cluster: String,
    /// Storage policy used unless the cluster names one
    #[serde(rename = "storagePolicy", skip_serializing_if = "String::is_empty")]
    pub default_storage_policy: String,
    /// Folder that cluster folders are created under
    #[serde(skip_serializing_if = "String::is_empty")]
    pub root_path: String,
    /// VM templates per operating system
    pub templates: ImageList,
    /// Tag category used unless the cluster names one
    #[serde(rename = "defaultTagCategoryID", skip_serializing_if = "String::is_empty")]
    pub default_tag_category_id: String,
}

/// VMware Cloud Director datacenter settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct VmwareCloudDirectorDatacenterSpec {
    /// API endpoint
    pub url: String,
    /// Skip TLS verification
    pub allow_insecure: bool,
    /// Catalog holding the templates
    #[serde(rename = "catalog", skip_serializing_if = "String::is_empty")]
    pub default_catalog: String,
    /// Storage profile used unless the node names one
    #[serde(rename = "storageProfile", skip_serializing_if = "String::is_empty")]
    pub default_storage_profile: String,
    /// vApp templates per operating system
    pub templates: ImageList,
}

/// GCP datacenter settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct GcpDatacenterSpec {
    /// Region, e.g. `europe-west3`
    pub region: String,
    /// Zone suffixes such as `a` and `b`, appended to the region
    pub zone_suffixes: Vec<String>,
    /// Use regional instead of zonal resources
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub regional: bool,
}

/// KubeVirt datacenter settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct KubevirtDatacenterSpec {
    /// DNS policy of the virtual machine pods
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dns_policy: String,
    /// DNS config of the virtual machine pods, used with the `None` policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_config: Option<PodDNSConfig>,
}

/// Alibaba datacenter settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AlibabaDatacenterSpec {
    /// Region id
    pub region: String,
}

/// Anexia datacenter settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AnexiaDatacenterSpec {
    /// Location identifier
    #[serde(rename = "locationID")]
    pub location_id: String,
}

/// Nutanix datacenter settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct NutanixDatacenterSpec {
    /// Prism Central host
    pub endpoint: String,
    /// Prism Central port
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    /// Skip TLS verification
    pub allow_insecure: bool,
    /// Image names per operating system
    pub images: ImageList,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SEED: &str = r#"
apiVersion: kubermatic.k8c.io/v1
kind: Seed
metadata:
  name: europe-west
  namespace: kubermatic
spec:
  country: DE
  location: Frankfurt
  datacenters:
    do-fra1:
      country: DE
      location: Frankfurt
      spec:
        digitalocean:
          region: fra1
    vsphere-ber:
      location: Berlin
      spec:
        vsphere:
          endpoint: https://vcenter.example.com
          datastore: ds-1
          datacenter: dc-1
          cluster: cl-1
          templates:
            ubuntu: ubuntu-22.04
            flatcar: flatcar-stable
        operatingSystemProfiles:
          ubuntu: osp-ubuntu-custom
"#;

    #[test]
    fn parses_seed() {
        let seed = Seed::from_yaml(SEED).unwrap();
        assert_eq!(seed.types, Some(TypeMeta::resource::<Seed>()));
        let fra = seed.datacenter("do-fra1").unwrap();
        assert_eq!(fra.spec.provider_type(), Some(ProviderType::Digitalocean));
        assert_eq!(fra.spec.digitalocean.as_ref().unwrap().region, "fra1");

        let ber = seed.datacenter("vsphere-ber").unwrap();
        let vsphere = ber.spec.vsphere.as_ref().unwrap();
        assert_eq!(vsphere.default_datastore, "ds-1");
        assert_eq!(vsphere.templates[&OperatingSystem::Flatcar], "flatcar-stable");
        assert_eq!(
            ber.spec.default_operating_system_profiles.get(&OperatingSystem::Ubuntu),
            Some(&"osp-ubuntu-custom".to_string())
        );
        assert!(seed.datacenter("missing").is_none());
    }

    #[test]
    fn lists_every_offered_provider() {
        let spec = DatacenterSpec {
            hetzner: Some(HetznerDatacenterSpec::default()),
            digitalocean: Some(DigitaloceanDatacenterSpec::default()),
            ..Default::default()
        };
        assert_eq!(spec.provider_types(), [ProviderType::Digitalocean, ProviderType::Hetzner]);
        assert!(spec.offers(ProviderType::Hetzner));
        assert!(!spec.offers(ProviderType::Aws));
        assert!(DatacenterSpec::default().provider_types().is_empty());
    }

    #[test]
    fn skips_leading_empty_documents() {
        let text = format!("---\n---{SEED}");
        let seed = Seed::from_yaml(&text).unwrap();
        assert_eq!(seed.metadata.name.as_deref(), Some("europe-west"));
    }

    #[test]
    fn empty_and_malformed_documents() {
        assert!(matches!(Seed::from_yaml(""), Err(Error::EmptyConfig)));
        assert!(matches!(
            Seed::from_yaml("spec: {datacenters: [1, 2]}"),
            Err(Error::ParseConfig(_))
        ));
    }

    #[test]
    fn reads_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SEED.as_bytes()).unwrap();
        let seed = Seed::read_from(file.path()).unwrap();
        assert_eq!(seed.spec.datacenters.len(), 2);

        let missing = file.path().with_extension("missing");
        assert!(matches!(Seed::read_from(&missing), Err(Error::ReadConfig(_, p)) if p == missing));
    }
}
