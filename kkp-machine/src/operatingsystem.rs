//! Resolution and defaulting of operating system settings.
//!
//! The public API and the machine controller describe operating systems with different
//! shapes: [`OperatingSystemSpec`] on the API side, [`OperatingSystemConfig`] on the
//! controller side. This module maps between the two and fills in the settings the
//! platform always enforces.
use kkp_core::{
    api::{AmazonLinuxSpec, CentosSpec, FlatcarSpec, RhelSpec, RockyLinuxSpec, UbuntuSpec},
    userdata::{DistUpgradeConfig, FlatcarConfig, ProvisioningUtility, RhelConfig},
    OperatingSystem, OperatingSystemConfig, OperatingSystemSpec, ProviderType,
};
use tracing::trace;

use crate::{Error, Result};

/// The operating system a controller-side spec is for
///
/// Fails with [`UnknownOperatingSystem`](kkp_core::Error::UnknownOperatingSystem) when no
/// spec is given.
pub fn operating_system_from_spec(spec: Option<&OperatingSystemConfig>) -> Result<OperatingSystem> {
    spec.map(OperatingSystemConfig::operating_system)
        .ok_or_else(|| kkp_core::Error::UnknownOperatingSystem(String::new()).into())
}

/// The operating system an API-side spec is for
pub fn operating_system_from_api_spec(spec: Option<&OperatingSystemSpec>) -> Result<OperatingSystem> {
    spec.map(OperatingSystemSpec::operating_system)
        .ok_or_else(|| kkp_core::Error::UnknownOperatingSystem(String::new()).into())
}

/// How Flatcar nodes on the given provider receive their provisioning data
///
/// Anexia has no ignition support, every other provider boots Flatcar with ignition.
pub fn default_provisioning_utility(provider: ProviderType) -> ProvisioningUtility {
    match provider {
        ProviderType::Anexia => ProvisioningUtility::CloudInit,
        _ => ProvisioningUtility::Ignition,
    }
}

/// Default settings for `os` on `provider`
pub fn default_spec(os: OperatingSystem, provider: ProviderType) -> OperatingSystemConfig {
    match os {
        OperatingSystem::Ubuntu => OperatingSystemConfig::Ubuntu(DistUpgradeConfig::default()),
        OperatingSystem::Centos => OperatingSystemConfig::Centos(DistUpgradeConfig::default()),
        OperatingSystem::AmazonLinux2 => OperatingSystemConfig::AmazonLinux2(DistUpgradeConfig::default()),
        OperatingSystem::Rhel => OperatingSystemConfig::Rhel(RhelConfig::default()),
        OperatingSystem::RockyLinux => OperatingSystemConfig::RockyLinux(DistUpgradeConfig::default()),
        OperatingSystem::Flatcar => OperatingSystemConfig::Flatcar(FlatcarConfig {
            disable_locksmithd: true,
            provisioning_utility: Some(default_provisioning_utility(provider)),
            ..Default::default()
        }),
    }
}

/// Completes a possibly absent spec for `os`
///
/// A missing spec becomes [`default_spec`]. A given spec must be for `os`. Flatcar always
/// gets locksmithd disabled since updates are coordinated by the update operator.
pub fn complete_operating_system_spec(
    spec: Option<OperatingSystemConfig>,
    os: OperatingSystem,
    provider: ProviderType,
) -> Result<OperatingSystemConfig> {
    let Some(mut spec) = spec else {
        trace!(%os, %provider, "defaulting operating system spec");
        return Ok(default_spec(os, provider));
    };
    let found = spec.operating_system();
    if found != os {
        return Err(Error::OperatingSystemMismatch { expected: os, found });
    }
    if let OperatingSystemConfig::Flatcar(flatcar) = &mut spec {
        flatcar.disable_locksmithd = true;
        flatcar
            .provisioning_utility
            .get_or_insert_with(|| default_provisioning_utility(provider));
    }
    Ok(spec)
}

/// Maps API operating system settings into the controller dialect
pub fn os_config_from_api(spec: &OperatingSystemSpec, provider: ProviderType) -> OperatingSystemConfig {
    let dist_upgrade = |dist_upgrade_on_boot| DistUpgradeConfig { dist_upgrade_on_boot };
    match spec {
        OperatingSystemSpec::Ubuntu(s) => OperatingSystemConfig::Ubuntu(dist_upgrade(s.dist_upgrade_on_boot)),
        OperatingSystemSpec::Centos(s) => OperatingSystemConfig::Centos(dist_upgrade(s.dist_upgrade_on_boot)),
        OperatingSystemSpec::AmazonLinux(s) => {
            OperatingSystemConfig::AmazonLinux2(dist_upgrade(s.dist_upgrade_on_boot))
        }
        OperatingSystemSpec::RockyLinux(s) => {
            OperatingSystemConfig::RockyLinux(dist_upgrade(s.dist_upgrade_on_boot))
        }
        OperatingSystemSpec::Rhel(s) => RhelConfig {
            dist_upgrade_on_boot: s.dist_upgrade_on_boot,
            subscription_manager_user: s.subscription_manager_user.clone(),
            subscription_manager_password: s.subscription_manager_password.clone(),
            offline_token: s.offline_token.clone(),
            attach_subscription: false,
        }
        .into(),
        OperatingSystemSpec::Flatcar(s) => {
            let utility = match provider {
                ProviderType::Anexia => ProvisioningUtility::CloudInit,
                _ => s.provisioning_utility.unwrap_or(ProvisioningUtility::Ignition),
            };
            FlatcarConfig {
                disable_auto_update: s.disable_auto_update,
                disable_locksmithd: true,
                disable_update_engine: false,
                provisioning_utility: Some(utility),
            }
            .into()
        }
    }
}

/// Maps controller operating system settings back into the API shape
///
/// Only a non-default Flatcar provisioning utility (`cloud-init`) is reported back.
pub fn api_spec_from_os_config(config: &OperatingSystemConfig) -> OperatingSystemSpec {
    match config {
        OperatingSystemConfig::Ubuntu(c) => UbuntuSpec {
            dist_upgrade_on_boot: c.dist_upgrade_on_boot,
        }
        .into(),
        OperatingSystemConfig::Centos(c) => CentosSpec {
            dist_upgrade_on_boot: c.dist_upgrade_on_boot,
        }
        .into(),
        OperatingSystemConfig::AmazonLinux2(c) => AmazonLinuxSpec {
            dist_upgrade_on_boot: c.dist_upgrade_on_boot,
        }
        .into(),
        OperatingSystemConfig::RockyLinux(c) => RockyLinuxSpec {
            dist_upgrade_on_boot: c.dist_upgrade_on_boot,
        }
        .into(),
        OperatingSystemConfig::Rhel(c) => RhelSpec {
            dist_upgrade_on_boot: c.dist_upgrade_on_boot,
            subscription_manager_user: c.subscription_manager_user.clone(),
            subscription_manager_password: c.subscription_manager_password.clone(),
            offline_token: c.offline_token.clone(),
        }
        .into(),
        OperatingSystemConfig::Flatcar(c) => FlatcarSpec {
            disable_auto_update: c.disable_auto_update,
            provisioning_utility: c
                .provisioning_utility
                .filter(|u| *u == ProvisioningUtility::CloudInit),
        }
        .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn resolves_operating_system_from_either_shape() {
        for os in OperatingSystem::ALL {
            let config = default_spec(os, ProviderType::Aws);
            assert_eq!(operating_system_from_spec(Some(&config)).unwrap(), os);
            let api = api_spec_from_os_config(&config);
            assert_eq!(operating_system_from_api_spec(Some(&api)).unwrap(), os);
        }
    }

    #[test]
    fn missing_spec_is_unknown() {
        assert!(matches!(
            operating_system_from_spec(None),
            Err(Error::Core(kkp_core::Error::UnknownOperatingSystem(_)))
        ));
        assert!(operating_system_from_api_spec(None).is_err());
    }

    #[test]
    fn flatcar_defaults_depend_on_provider() {
        let on_aws = default_spec(OperatingSystem::Flatcar, ProviderType::Aws);
        assert_json_eq!(
            serde_json::to_value(&on_aws).unwrap(),
            json!({
                "disableAutoUpdate": false,
                "disableLocksmithD": true,
                "disableUpdateEngine": false,
                "provisioningUtility": "ignition"
            })
        );
        let on_anexia = default_spec(OperatingSystem::Flatcar, ProviderType::Anexia);
        assert_eq!(
            on_anexia.flatcar().unwrap().provisioning_utility,
            Some(ProvisioningUtility::CloudInit)
        );
    }

    #[test]
    fn anexia_forces_cloud_init() {
        let spec = OperatingSystemSpec::Flatcar(FlatcarSpec {
            disable_auto_update: true,
            provisioning_utility: Some(ProvisioningUtility::Ignition),
        });
        let config = os_config_from_api(&spec, ProviderType::Anexia);
        let flatcar = config.flatcar().unwrap();
        assert_eq!(flatcar.provisioning_utility, Some(ProvisioningUtility::CloudInit));
        assert!(flatcar.disable_locksmithd);
        assert!(flatcar.disable_auto_update);

        let config = os_config_from_api(&spec, ProviderType::Hetzner);
        assert_eq!(
            config.flatcar().unwrap().provisioning_utility,
            Some(ProvisioningUtility::Ignition)
        );
    }

    #[test]
    fn completion_keeps_given_settings() {
        let given = OperatingSystemConfig::Ubuntu(DistUpgradeConfig {
            dist_upgrade_on_boot: true,
        });
        let done = complete_operating_system_spec(Some(given.clone()), OperatingSystem::Ubuntu, ProviderType::Aws)
            .unwrap();
        assert_eq!(done, given);

        let flatcar = OperatingSystemConfig::Flatcar(FlatcarConfig {
            provisioning_utility: Some(ProvisioningUtility::CloudInit),
            ..Default::default()
        });
        let done =
            complete_operating_system_spec(Some(flatcar), OperatingSystem::Flatcar, ProviderType::Aws).unwrap();
        let again =
            complete_operating_system_spec(Some(done.clone()), OperatingSystem::Flatcar, ProviderType::Aws)
                .unwrap();
        assert_eq!(done, again);
        let flatcar = done.flatcar().unwrap();
        assert!(flatcar.disable_locksmithd);
        assert_eq!(flatcar.provisioning_utility, Some(ProvisioningUtility::CloudInit));
    }

    #[test]
    fn completion_rejects_other_operating_system() {
        let err = complete_operating_system_spec(
            Some(default_spec(OperatingSystem::Centos, ProviderType::Aws)),
            OperatingSystem::Ubuntu,
            ProviderType::Aws,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::OperatingSystemMismatch {
                expected: OperatingSystem::Ubuntu,
                found: OperatingSystem::Centos
            }
        ));
    }

    #[test]
    fn reverse_mapping_reports_only_cloud_init() {
        let ignition = default_spec(OperatingSystem::Flatcar, ProviderType::Aws);
        assert_eq!(api_spec_from_os_config(&ignition).flatcar().unwrap().provisioning_utility, None);
        let cloud_init = default_spec(OperatingSystem::Flatcar, ProviderType::Anexia);
        assert_eq!(
            api_spec_from_os_config(&cloud_init).flatcar().unwrap().provisioning_utility,
            Some(ProvisioningUtility::CloudInit)
        );
    }

    #[test]
    fn rhel_credentials_survive_both_directions() {
        let spec = OperatingSystemSpec::Rhel(RhelSpec {
            dist_upgrade_on_boot: true,
            subscription_manager_user: "user".into(),
            subscription_manager_password: "secret".into(),
            offline_token: "token".into(),
        });
        let config = os_config_from_api(&spec, ProviderType::Aws);
        assert_eq!(config.rhel().unwrap().subscription_manager_user, "user");
        assert_eq!(api_spec_from_os_config(&config), spec);
    }
}
