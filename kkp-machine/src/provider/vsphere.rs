//! vSphere virtual machines
use kkp_core::{
    api::{VsphereNodeSpec, VsphereTag},
    cloudprovider::vsphere::{RawConfig, Tag},
    kubermatic::VsphereDatacenterSpec,
    Cluster, OperatingSystem, ProviderType,
};

use super::require;
use crate::Result;

/// Maps the user owned settings
pub fn raw_config(spec: &VsphereNodeSpec) -> RawConfig {
    RawConfig {
        cpus: spec.cpus,
        memory_mb: i64::from(spec.memory),
        disk_size_gb: spec.disk_size_gb,
        template_vm_name: spec.template.clone().into(),
        tags: spec
            .tags
            .iter()
            .map(|t| Tag {
                name: t.name.clone(),
                description: t.description.clone(),
                category_id: t.category_id.clone(),
            })
            .collect(),
        ..Default::default()
    }
}

/// Fills inventory placement from the datacenter and the cluster
///
/// A cluster with a datastore cluster never gets a single datastore as well. Tags without
/// a category get the cluster's category, or the datacenter default.
pub fn complete(
    spec: Option<RawConfig>,
    cluster: Option<&Cluster>,
    dc: &VsphereDatacenterSpec,
    os: OperatingSystem,
) -> Result<RawConfig> {
    let mut config = spec.unwrap_or_default();
    let vsphere = cluster.and_then(|c| c.spec.cloud.vsphere.as_ref());

    config.datacenter.set_if_empty(dc.datacenter.as_str());
    require(ProviderType::Vsphere, "datacenter", &config.datacenter)?;
    config.cluster.set_if_empty(dc.cluster.as_str());
    config.allow_insecure.set_if_empty(dc.allow_insecure);
    if let Some(template) = dc.templates.get(&os) {
        config.template_vm_name.set_if_empty(template.as_str());
    }

    let datastore_cluster = vsphere.map(|v| v.datastore_cluster.as_str()).unwrap_or_default();
    if datastore_cluster.is_empty() {
        let datastore = vsphere
            .map(|v| v.datastore.as_str())
            .filter(|d| !d.is_empty())
            .unwrap_or(dc.default_datastore.as_str());
        config.datastore.set_if_empty(datastore);
    } else {
        config.datastore_cluster.set_if_empty(datastore_cluster);
    }

    if let Some(vsphere) = vsphere {
        config.vm_net_name.set_if_empty(vsphere.vm_net_name.as_str());
        config.folder.set_if_empty(vsphere.folder.as_str());
        config.resource_pool.set_if_empty(vsphere.resource_pool.as_str());
    }

    let category = vsphere
        .and_then(|v| v.tags.as_ref())
        .map(|t| t.category_id.as_str())
        .filter(|c| !c.is_empty())
        .unwrap_or(dc.default_tag_category_id.as_str());
    for tag in config.tags.iter_mut().filter(|t| t.category_id.is_empty()) {
        tag.category_id = category.to_string();
    }
    Ok(config)
}

/// Maps back the user owned settings
pub fn node_spec(config: &RawConfig) -> VsphereNodeSpec {
    VsphereNodeSpec {
        cpus: config.cpus,
        memory: i32::try_from(config.memory_mb).unwrap_or(i32::MAX),
        disk_size_gb: config.disk_size_gb,
        template: config.template_vm_name.value.clone(),
        tags: config
            .tags
            .iter()
            .map(|t| VsphereTag {
                name: t.name.clone(),
                description: t.description.clone(),
                category_id: t.category_id.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::fixtures::{cluster_for, datacenter_for};
    use assert_json_diff::assert_json_include;
    use serde_json::json;

    fn dc() -> VsphereDatacenterSpec {
        datacenter_for(ProviderType::Vsphere).spec.vsphere.unwrap()
    }

    fn node() -> VsphereNodeSpec {
        VsphereNodeSpec {
            cpus: 2,
            memory: 4096,
            disk_size_gb: Some(20),
            template: String::new(),
            tags: vec![VsphereTag {
                name: "env".into(),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn completes_inventory_placement() {
        let config = complete(
            Some(raw_config(&node())),
            Some(&cluster_for(ProviderType::Vsphere)),
            &dc(),
            OperatingSystem::Ubuntu,
        )
        .unwrap();
        assert_json_include!(
            actual: serde_json::to_value(&config).unwrap(),
            expected: json!({
                "templateVMName": "ubuntu-template",
                "vmNetName": "VM Network",
                "datacenter": "Datacenter",
                "cluster": "Cluster",
                "folder": "/dc/vm/xyz",
                "datastore": "datastore1",
                "datastoreCluster": "",
                "allowInsecure": true,
                "cpus": 2,
                "memoryMB": 4096,
                "diskSizeGB": 20,
                "tags": [{"name": "env", "categoryID": "cat-1"}]
            })
        );
    }

    #[test]
    fn datastore_cluster_excludes_datastore() {
        let mut cluster = cluster_for(ProviderType::Vsphere);
        if let Some(vsphere) = cluster.spec.cloud.vsphere.as_mut() {
            vsphere.datastore_cluster = "dsc-1".into();
            vsphere.tags = None;
        }
        let dc = VsphereDatacenterSpec {
            default_tag_category_id: "dc-cat".into(),
            ..dc()
        };
        let config = complete(Some(raw_config(&node())), Some(&cluster), &dc, OperatingSystem::Ubuntu).unwrap();
        assert_eq!(config.datastore_cluster.value, "dsc-1");
        assert!(config.datastore.is_empty());
        assert_eq!(config.tags[0].category_id, "dc-cat");
    }

    #[test]
    fn cluster_datastore_wins_over_datacenter_default() {
        let mut cluster = cluster_for(ProviderType::Vsphere);
        if let Some(vsphere) = cluster.spec.cloud.vsphere.as_mut() {
            vsphere.datastore = "ds-cluster".into();
        }
        let config = complete(None, Some(&cluster), &dc(), OperatingSystem::Ubuntu).unwrap();
        assert_eq!(config.datastore.value, "ds-cluster");
    }
}
