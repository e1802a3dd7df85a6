//! End-to-end runs from platform configuration to machine-controller objects
use std::io::Write;

use assert_json_diff::assert_json_include;
use serde_json::json;

use crate::{
    core::{CloudProvider, OperatingSystem},
    machine::{
        deployment, node_deployment, parse_node_or_machine_deployment, validate, DatacenterSource,
        ParsedDeployment,
    },
    Builder, Cluster, Error, KubernetesVersion, NodeDeployment, ProviderConfig, ResourceExt, Seed,
    UserSshKey,
};

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
        operatingSystemProfiles:
          ubuntu: osp-ubuntu
"#;

const CLUSTER: &str = r#"
apiVersion: kubermatic.k8c.io/v1
kind: Cluster
metadata:
  name: xyz
  labels:
    project-id: p1
spec:
  cloud:
    dc: do-fra1
    providerName: digitalocean
    digitalocean: {}
  version: 9.9.9
status:
  namespaceName: cluster-xyz
"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn seed() -> Seed {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SEED.as_bytes()).unwrap();
    Seed::read_from(file.path()).unwrap()
}

fn cluster() -> Cluster {
    serde_yaml::from_str(CLUSTER).unwrap()
}

fn node_deployment_json() -> serde_json::Value {
    json!({
        "name": "workers",
        "spec": {
            "replicas": 1,
            "template": {
                "cloud": {"digitalocean": {"size": "s-1vcpu-1gb", "monitoring": true}},
                "operatingSystem": {"ubuntu": {"distUpgradeOnBoot": true}},
                "versions": {"kubelet": "9.9.9"},
                "labels": {"tier": "backend"}
            }
        }
    })
}

#[test]
fn datacenter_is_resolved_from_cluster_and_seed() {
    let (seed, cluster) = (seed(), cluster());
    let datacenter = Builder::new()
        .datacenter_source(DatacenterSource::FromClusterAndSeed(&cluster, &seed))
        .determine_datacenter()
        .unwrap();
    assert_eq!(datacenter.spec.digitalocean.as_ref().unwrap().region, "fra1");
}

#[test]
fn unknown_datacenter_is_reported() {
    let seed = seed();
    let err = Builder::new()
        .datacenter_source(DatacenterSource::FromNameAndSeed("foo", &seed))
        .determine_datacenter()
        .unwrap_err();
    assert!(matches!(err, Error::DatacenterResolution(_)));
    assert!(err.to_string().contains(r#""foo""#), "{err}");
}

#[test]
fn node_deployment_becomes_machine_deployment() {
    init_tracing();
    let (seed, cluster) = (seed(), cluster());
    let datacenter = seed.datacenter(&cluster.spec.cloud.datacenter_name).unwrap();
    let control_plane = cluster.spec.version.clone().unwrap();
    assert_eq!(control_plane, KubernetesVersion::new(9, 9, 9));

    let nd: NodeDeployment = serde_json::from_value(node_deployment_json()).unwrap();
    let nd = validate(nd, &control_plane).unwrap();
    let keys = [
        UserSshKey::new("ssh-ed25519 BBBB bob@host"),
        UserSshKey::new("ssh-ed25519 AAAA alice@host"),
    ];
    let md = deployment(&cluster, &nd, datacenter, &keys).unwrap();

    assert_eq!(md.name_any(), "workers");
    assert_eq!(md.namespace().as_deref(), Some("kube-system"));
    assert_eq!(md.annotations()["k8c.io/operating-system-profile"], "osp-ubuntu");
    assert_eq!(md.spec.replicas, Some(1));
    assert_eq!(md.spec.template.spec.versions.kubelet, "9.9.9");
    let labels = md.spec.template.spec.metadata.labels.as_ref().unwrap();
    assert_eq!(labels["tier"], "backend");
    assert_eq!(labels["system/project"], "p1");

    let config = ProviderConfig::from_provider_spec(&md.spec.template.spec.provider_spec).unwrap();
    assert_eq!(config.cloud_provider, CloudProvider::Digitalocean);
    assert_eq!(config.operating_system, OperatingSystem::Ubuntu);
    assert_json_include!(
        actual: serde_json::to_value(&config).unwrap(),
        expected: json!({
            "sshPublicKeys": ["ssh-ed25519 AAAA alice@host", "ssh-ed25519 BBBB bob@host"],
            "cloudProvider": "digitalocean",
            "cloudProviderSpec": {
                "region": "fra1",
                "size": "s-1vcpu-1gb",
                "monitoring": true,
                "private_networking": true
            },
            "operatingSystem": "ubuntu",
            "operatingSystemSpec": {"distUpgradeOnBoot": true}
        })
    );

    let back = node_deployment(&md).unwrap();
    let cloud = back.spec.template.cloud.unwrap();
    assert_eq!(cloud.digitalocean().unwrap().size, "s-1vcpu-1gb");
    assert_eq!(back.spec.template.operating_system, nd.spec.template.operating_system);
}

#[test]
fn stored_documents_are_migrated_once() {
    let (seed, cluster) = (seed(), cluster());
    let datacenter = seed.datacenter("do-fra1").unwrap();

    let legacy = node_deployment_json().to_string();
    let parsed = parse_node_or_machine_deployment(&cluster, datacenter, &legacy).unwrap();
    let ParsedDeployment::Migrated(md) = parsed else {
        panic!("expected a migrated deployment, got {parsed:?}");
    };

    let stored = serde_json::to_string(&md).unwrap();
    let parsed = parse_node_or_machine_deployment(&cluster, datacenter, &stored).unwrap();
    assert_eq!(parsed, ParsedDeployment::Current(md));
}

#[test]
fn incompatible_kubelet_is_rejected_before_conversion() {
    let nd: NodeDeployment = serde_json::from_value(node_deployment_json()).unwrap();
    let err = validate(nd, &KubernetesVersion::new(9, 7, 0)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "kubelet version 9.9.9 is not compatible with control plane version 9.7.0"
    );
}
