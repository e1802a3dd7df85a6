//! KubeVirt virtual machines
use kkp_core::{
    api::{KubevirtNodeSpec, NodeAffinityPreset, SecondaryDisks},
    cloudprovider::kubevirt::{self, Affinity, Flavor, PrimaryDisk, RawConfig, SecondaryDisk, Template, VirtualMachine},
    kubermatic::KubevirtDatacenterSpec,
    Cluster, OperatingSystem,
};
use tracing::trace;
use url::Url;

use crate::Result;

/// Maps the user owned settings
pub fn raw_config(spec: &KubevirtNodeSpec) -> RawConfig {
    RawConfig {
        virtual_machine: VirtualMachine {
            flavor: Flavor {
                name: spec.flavor_name.clone().into(),
                profile: spec.flavor_profile.clone().into(),
            },
            template: Template {
                cpus: spec.cpus.clone().into(),
                memory: spec.memory.clone().into(),
                primary_disk: PrimaryDisk {
                    size: spec.primary_disk_size.clone().into(),
                    storage_class_name: spec.primary_disk_storage_class_name.clone().into(),
                    os_image: spec.primary_disk_os_image.clone().into(),
                },
                secondary_disks: spec
                    .secondary_disks
                    .iter()
                    .map(|d| SecondaryDisk {
                        size: d.size.clone().into(),
                        storage_class_name: d.storage_class_name.clone().into(),
                    })
                    .collect(),
            },
            ..Default::default()
        },
        affinity: Affinity {
            pod_affinity_preset: spec.pod_affinity_preset.clone().into(),
            pod_anti_affinity_preset: spec.pod_anti_affinity_preset.clone().into(),
            node_affinity_preset: kubevirt::NodeAffinityPreset {
                preset_type: spec.node_affinity_preset.preset_type.clone().into(),
                key: spec.node_affinity_preset.key.clone().into(),
                values: spec
                    .node_affinity_preset
                    .values
                    .iter()
                    .map(|v| v.as_str().into())
                    .collect(),
            },
        },
    }
}

/// Whether an OS image already names its source, either by URL or as `<namespace>/<name>`
fn is_qualified_image(image: &str) -> bool {
    image.contains('/') || Url::parse(image).is_ok()
}

/// Fills DNS settings and qualifies the OS image with the cluster namespace
///
/// A bare image name refers to a DataVolume in the cluster namespace.
pub fn complete(
    spec: Option<RawConfig>,
    cluster: Option<&Cluster>,
    dc: &KubevirtDatacenterSpec,
    _os: OperatingSystem,
) -> Result<RawConfig> {
    let mut config = spec.unwrap_or_default();
    let vm = &mut config.virtual_machine;

    vm.dns_policy.set_if_empty(dc.dns_policy.as_str());
    if vm.dns_config.is_none() {
        vm.dns_config = dc.dns_config.clone();
    }

    let namespace = cluster
        .map(|c| c.status.namespace_name.as_str())
        .filter(|ns| !ns.is_empty());
    let image = &mut vm.template.primary_disk.os_image;
    if let Some(namespace) = namespace {
        if !image.value.is_empty() && !is_qualified_image(&image.value) {
            trace!(image = %image.value, namespace, "qualifying kubevirt os image");
            image.value = format!("{namespace}/{}", image.value);
        }
    }
    Ok(config)
}

/// Maps back the user owned settings
pub fn node_spec(config: &RawConfig) -> KubevirtNodeSpec {
    let vm = &config.virtual_machine;
    let template = &vm.template;
    let affinity = &config.affinity;
    KubevirtNodeSpec {
        flavor_name: vm.flavor.name.value.clone(),
        flavor_profile: vm.flavor.profile.value.clone(),
        cpus: template.cpus.value.clone(),
        memory: template.memory.value.clone(),
        primary_disk_os_image: template.primary_disk.os_image.value.clone(),
        primary_disk_storage_class_name: template.primary_disk.storage_class_name.value.clone(),
        primary_disk_size: template.primary_disk.size.value.clone(),
        secondary_disks: template
            .secondary_disks
            .iter()
            .map(|d| SecondaryDisks {
                size: d.size.value.clone(),
                storage_class_name: d.storage_class_name.value.clone(),
            })
            .collect(),
        pod_affinity_preset: affinity.pod_affinity_preset.value.clone(),
        pod_anti_affinity_preset: affinity.pod_anti_affinity_preset.value.clone(),
        node_affinity_preset: NodeAffinityPreset {
            preset_type: affinity.node_affinity_preset.preset_type.value.clone(),
            key: affinity.node_affinity_preset.key.value.clone(),
            values: affinity
                .node_affinity_preset
                .values
                .iter()
                .map(|v| v.value.clone())
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::fixtures::{cluster_for, datacenter_for};
    use k8s_openapi::api::core::v1::PodDNSConfig;
    use kkp_core::ProviderType;

    fn completed_image(image: &str) -> String {
        let node = KubevirtNodeSpec {
            primary_disk_os_image: image.into(),
            ..Default::default()
        };
        let config = complete(
            Some(raw_config(&node)),
            Some(&cluster_for(ProviderType::Kubevirt)),
            &datacenter_for(ProviderType::Kubevirt).spec.kubevirt.unwrap(),
            OperatingSystem::Ubuntu,
        )
        .unwrap();
        config.virtual_machine.template.primary_disk.os_image.value
    }

    #[test]
    fn bare_images_live_in_cluster_namespace() {
        assert_eq!(completed_image("ubuntu-22.04"), "cluster-xyz/ubuntu-22.04");
        assert_eq!(completed_image("images/ubuntu"), "images/ubuntu");
        assert_eq!(
            completed_image("http://images.example.com/ubuntu.img"),
            "http://images.example.com/ubuntu.img"
        );
        assert_eq!(completed_image("docker://ubuntu"), "docker://ubuntu");
    }

    #[test]
    fn dns_settings_come_from_datacenter() {
        let dc = KubevirtDatacenterSpec {
            dns_policy: "None".into(),
            dns_config: Some(PodDNSConfig {
                nameservers: Some(vec!["8.8.8.8".into()]),
                ..Default::default()
            }),
        };
        let config = complete(None, None, &dc, OperatingSystem::Ubuntu).unwrap();
        assert_eq!(config.virtual_machine.dns_policy.value, "None");
        assert_eq!(config.virtual_machine.dns_config, dc.dns_config);
    }
}
