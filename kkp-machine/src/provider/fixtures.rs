//! Cluster, datacenter and node settings for every provider
use std::collections::BTreeMap;

use kkp_core::{
    api::{
        AlibabaNodeSpec, AnexiaDiskConfig, AnexiaNodeSpec, AwsNodeSpec, AzureNodeSpec, DigitaloceanNodeSpec,
        GcpNodeSpec, HetznerNodeSpec, KubevirtNodeSpec, NodeAffinityPreset, NutanixNodeSpec, OpenstackNodeSpec,
        PacketNodeSpec, SecondaryDisks, VmwareCloudDirectorNodeSpec, VsphereNodeSpec,
    },
    kubermatic::{
        AlibabaDatacenterSpec, AnexiaDatacenterSpec, AwsCloudSpec, AwsDatacenterSpec, AzureCloudSpec,
        AzureDatacenterSpec, DigitaloceanDatacenterSpec, GcpCloudSpec, GcpDatacenterSpec, HetznerCloudSpec,
        HetznerDatacenterSpec, KubevirtDatacenterSpec, NutanixCloudSpec, NutanixDatacenterSpec,
        OpenstackCloudSpec, OpenstackDatacenterSpec, PacketCloudSpec, PacketDatacenterSpec,
        VmwareCloudDirectorCloudSpec, VmwareCloudDirectorDatacenterSpec, VsphereCloudSpec,
        VsphereDatacenterSpec, PROJECT_ID_LABEL_KEY,
    },
    Cluster, Datacenter, NodeCloudSpec, OperatingSystem, ProviderType, ResourceExt,
};

pub(crate) const CLUSTER_NAME: &str = "xyz";
pub(crate) const PROJECT_ID: &str = "p1";

fn map<const N: usize>(entries: [(&str, &str); N]) -> BTreeMap<String, String> {
    entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

fn images<const N: usize>(entries: [(OperatingSystem, &str); N]) -> BTreeMap<OperatingSystem, String> {
    entries.into_iter().map(|(os, image)| (os, image.into())).collect()
}

pub(crate) fn cluster_for(provider: ProviderType) -> Cluster {
    let mut cluster = Cluster::default();
    cluster.metadata.name = Some(CLUSTER_NAME.into());
    cluster
        .labels_mut()
        .insert(PROJECT_ID_LABEL_KEY.into(), PROJECT_ID.into());
    cluster.status.namespace_name = format!("cluster-{CLUSTER_NAME}");

    let cloud = &mut cluster.spec.cloud;
    cloud.datacenter_name = format!("{provider}-dc");
    cloud.provider_name = provider.as_str().into();
    match provider {
        ProviderType::Digitalocean => cloud.digitalocean = Some(Default::default()),
        ProviderType::Aws => {
            cloud.aws = Some(AwsCloudSpec {
                vpc_id: "vpc-1".into(),
                security_group_id: "sg-1".into(),
                instance_profile_name: "xyz-profile".into(),
                ..Default::default()
            })
        }
        ProviderType::Azure => {
            cloud.azure = Some(AzureCloudSpec {
                resource_group: "rg".into(),
                vnet_name: "vnet".into(),
                subnet_name: "subnet".into(),
                route_table_name: "rt".into(),
                security_group: "sg".into(),
                availability_set: "as".into(),
                ..Default::default()
            })
        }
        ProviderType::Openstack => {
            cloud.openstack = Some(OpenstackCloudSpec {
                network: "net".into(),
                security_groups: "sg".into(),
                floating_ip_pool: "ext-net".into(),
                subnet_id: "subnet-1".into(),
                ..Default::default()
            })
        }
        ProviderType::Packet => {
            cloud.packet = Some(PacketCloudSpec {
                billing_cycle: "hourly".into(),
            })
        }
        ProviderType::Hetzner => {
            cloud.hetzner = Some(HetznerCloudSpec {
                network: "cluster-net".into(),
            })
        }
        ProviderType::Vsphere => {
            cloud.vsphere = Some(VsphereCloudSpec {
                vm_net_name: "VM Network".into(),
                folder: "/dc/vm/xyz".into(),
                tags: Some(kkp_core::kubermatic::VsphereTag {
                    tags: vec![],
                    category_id: "cat-1".into(),
                }),
                ..Default::default()
            })
        }
        ProviderType::Gcp => {
            cloud.gcp = Some(GcpCloudSpec {
                network: "global/networks/default".into(),
                subnetwork: String::new(),
            })
        }
        ProviderType::Kubevirt => cloud.kubevirt = Some(Default::default()),
        ProviderType::Alibaba => cloud.alibaba = Some(Default::default()),
        ProviderType::Anexia => cloud.anexia = Some(Default::default()),
        ProviderType::Nutanix => {
            cloud.nutanix = Some(NutanixCloudSpec {
                cluster_name: "nx-cluster".into(),
                project_name: "kkp".into(),
            })
        }
        ProviderType::VmwareCloudDirector => {
            cloud.vmwareclouddirector = Some(VmwareCloudDirectorCloudSpec {
                organization: "org".into(),
                vdc: "vdc".into(),
                ovdc_network: "ovdc-net".into(),
                vapp: "xyz-vapp".into(),
            })
        }
    }
    cluster
}

pub(crate) fn datacenter_for(provider: ProviderType) -> Datacenter {
    let mut datacenter = Datacenter {
        country: "DE".into(),
        location: "Frankfurt".into(),
        ..Default::default()
    };
    let spec = &mut datacenter.spec;
    match provider {
        ProviderType::Digitalocean => {
            spec.digitalocean = Some(DigitaloceanDatacenterSpec { region: "fra1".into() })
        }
        ProviderType::Aws => {
            spec.aws = Some(AwsDatacenterSpec {
                region: "eu-central-1".into(),
                images: images([(OperatingSystem::Ubuntu, "ami-ubuntu"), (OperatingSystem::Flatcar, "ami-flatcar")]),
            })
        }
        ProviderType::Azure => {
            spec.azure = Some(AzureDatacenterSpec {
                location: "westeurope".into(),
                images: images([(OperatingSystem::Ubuntu, "img-ubuntu")]),
            })
        }
        ProviderType::Openstack => {
            spec.openstack = Some(OpenstackDatacenterSpec {
                auth_url: "https://keystone.example.com:5000/v3".into(),
                availability_zone: "nova".into(),
                region: "RegionOne".into(),
                images: images([(OperatingSystem::Ubuntu, "ubuntu-22.04")]),
                trust_device_path: Some(true),
                ..Default::default()
            })
        }
        ProviderType::Packet => {
            spec.packet = Some(PacketDatacenterSpec {
                facilities: vec!["ams1".into()],
                metro: "AM".into(),
            })
        }
        ProviderType::Hetzner => {
            spec.hetzner = Some(HetznerDatacenterSpec {
                datacenter: "fsn1-dc14".into(),
                network: "dc-net".into(),
                location: String::new(),
            })
        }
        ProviderType::Vsphere => {
            spec.vsphere = Some(VsphereDatacenterSpec {
                endpoint: "https://vcenter.example.com".into(),
                allow_insecure: true,
                default_datastore: "datastore1".into(),
                datacenter: "Datacenter".into(),
                cluster: "Cluster".into(),
                templates: images([(OperatingSystem::Ubuntu, "ubuntu-template")]),
                ..Default::default()
            })
        }
        ProviderType::Gcp => {
            spec.gcp = Some(GcpDatacenterSpec {
                region: "europe-west3".into(),
                zone_suffixes: vec!["c".into(), "a".into()],
                regional: false,
            })
        }
        ProviderType::Kubevirt => {
            spec.kubevirt = Some(KubevirtDatacenterSpec {
                dns_policy: "ClusterFirst".into(),
                dns_config: None,
            })
        }
        ProviderType::Alibaba => {
            spec.alibaba = Some(AlibabaDatacenterSpec {
                region: "eu-central-1".into(),
            })
        }
        ProviderType::Anexia => {
            spec.anexia = Some(AnexiaDatacenterSpec {
                location_id: "loc-1".into(),
            })
        }
        ProviderType::Nutanix => {
            spec.nutanix = Some(NutanixDatacenterSpec {
                endpoint: "prism.example.com".into(),
                port: Some(9440),
                allow_insecure: true,
                images: images([(OperatingSystem::Ubuntu, "ubuntu-22.04")]),
            })
        }
        ProviderType::VmwareCloudDirector => {
            spec.vmwareclouddirector = Some(VmwareCloudDirectorDatacenterSpec {
                url: "https://vcd.example.com".into(),
                allow_insecure: false,
                default_catalog: "kkp".into(),
                default_storage_profile: "*".into(),
                templates: images([(OperatingSystem::Ubuntu, "ubuntu-22.04")]),
            })
        }
    }
    datacenter
}

/// A node spec with every required field set, for the provider
pub(crate) fn node_spec_for(provider: ProviderType) -> NodeCloudSpec {
    match provider {
        ProviderType::Digitalocean => DigitaloceanNodeSpec {
            size: "s-1vcpu-1gb".into(),
            monitoring: true,
            tags: vec!["app".into()],
            ..Default::default()
        }
        .into(),
        ProviderType::Aws => AwsNodeSpec {
            instance_type: "t3.small".into(),
            volume_size: 25,
            volume_type: "gp2".into(),
            tags: map([("team", "a")]),
            assign_public_ip: Some(true),
            is_spot_instance: Some(true),
            spot_instance_max_price: Some("0.5".into()),
            spot_instance_persistent_request: Some(false),
            spot_instance_interruption_behavior: Some("terminate".into()),
            ..Default::default()
        }
        .into(),
        ProviderType::Azure => AzureNodeSpec {
            size: "Standard_B2s".into(),
            assign_public_ip: true,
            tags: map([("team", "a")]),
            os_disk_size: 30,
            zones: vec!["1".into()],
            ..Default::default()
        }
        .into(),
        ProviderType::Openstack => OpenstackNodeSpec {
            flavor: "m1.small".into(),
            image: "ubuntu-22.04".into(),
            use_floating_ip: true,
            root_disk_size_gb: Some(20),
            ..Default::default()
        }
        .into(),
        ProviderType::Packet => PacketNodeSpec {
            instance_type: "c3.small.x86".into(),
            tags: vec!["app".into()],
        }
        .into(),
        ProviderType::Hetzner => HetznerNodeSpec {
            server_type: "cx21".into(),
            network: "node-net".into(),
        }
        .into(),
        ProviderType::Vsphere => VsphereNodeSpec {
            cpus: 2,
            memory: 4096,
            disk_size_gb: Some(20),
            template: "ubuntu-template".into(),
            tags: vec![kkp_core::api::VsphereTag {
                name: "env".into(),
                ..Default::default()
            }],
        }
        .into(),
        ProviderType::Gcp => GcpNodeSpec {
            zone: "europe-west3-c".into(),
            machine_type: "e2-small".into(),
            disk_size: 25,
            disk_type: "pd-standard".into(),
            labels: map([("team", "a")]),
            tags: vec!["web".into()],
            ..Default::default()
        }
        .into(),
        ProviderType::Kubevirt => KubevirtNodeSpec {
            cpus: "2".into(),
            memory: "4Gi".into(),
            primary_disk_os_image: "ubuntu-22.04".into(),
            primary_disk_storage_class_name: "longhorn".into(),
            primary_disk_size: "20Gi".into(),
            secondary_disks: vec![SecondaryDisks {
                size: "10Gi".into(),
                storage_class_name: "longhorn".into(),
            }],
            node_affinity_preset: NodeAffinityPreset {
                preset_type: "hard".into(),
                key: "zone".into(),
                values: vec!["a".into()],
            },
            ..Default::default()
        }
        .into(),
        ProviderType::Alibaba => AlibabaNodeSpec {
            instance_type: "ecs.t1.xsmall".into(),
            disk_size: "40".into(),
            disk_type: "cloud_efficiency".into(),
            v_switch_id: "vsw-1".into(),
            internet_max_bandwidth_out: "10".into(),
            labels: map([("team", "a")]),
            zone_id: "eu-central-1a".into(),
        }
        .into(),
        ProviderType::Anexia => AnexiaNodeSpec {
            vlan_id: "vlan".into(),
            template_id: "tpl".into(),
            cpus: 2,
            memory: 2048,
            disk_size: None,
            disks: vec![AnexiaDiskConfig {
                size: 60,
                performance_type: Some("ENT2".into()),
            }],
        }
        .into(),
        ProviderType::Nutanix => NutanixNodeSpec {
            subnet_name: "subnet".into(),
            image_name: "ubuntu-22.04".into(),
            categories: map([("env", "dev")]),
            cpus: 2,
            cpu_cores: Some(1),
            cpu_passthrough: None,
            memory_mb: 2048,
            disk_size: Some(40),
        }
        .into(),
        ProviderType::VmwareCloudDirector => VmwareCloudDirectorNodeSpec {
            cpus: 2,
            cpu_cores: 1,
            memory_mb: 2048,
            disk_size_gb: Some(20),
            template: "ubuntu-22.04".into(),
            catalog: "kkp".into(),
            storage_profile: "gold".into(),
            ip_allocation_mode: "DHCP".into(),
            metadata: map([("team", "a")]),
            ..Default::default()
        }
        .into(),
    }
}
