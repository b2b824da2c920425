#![allow(clippy::unwrap_used, clippy::expect_used)]

use figment::Jail;
use yarnkit_config::{ConfigError, YarnConfiguration, keys};

const SITE_YAML: &str = r"
yarn:
  resourcemanager:
    cluster-id: prod-cluster
    address: rm1.example:8032
    ha:
      enabled: false
      rm-ids: [rm1, rm2]
hadoop.security.authentication: kerberos
";

#[test]
fn loads_nested_and_flat_keys_from_yaml() {
    Jail::expect_with(|jail| {
        jail.create_file("yarn-site.yaml", SITE_YAML)?;

        let conf = YarnConfiguration::load("yarn-site.yaml").map_err(|e| e.to_string())?;

        assert_eq!(conf.get(keys::RM_CLUSTER_ID), Some("prod-cluster"));
        assert_eq!(conf.get(keys::RM_ADDRESS), Some("rm1.example:8032"));
        assert_eq!(conf.get(keys::RM_HA_IDS), Some("rm1,rm2"));
        assert_eq!(conf.get(keys::HADOOP_SECURITY_AUTHENTICATION), Some("kerberos"));
        assert!(!conf.get_bool(keys::RM_HA_ENABLED, true).unwrap());
        Ok(())
    });
}

#[test]
fn environment_overrides_file_values() {
    Jail::expect_with(|jail| {
        jail.create_file("yarn-site.yaml", SITE_YAML)?;
        jail.set_env("YARN_CONF_YARN__RESOURCEMANAGER__ADDRESS", "rm9.example:8032");
        jail.set_env("YARN_CONF_IPC__CLIENT__CONNECT__TIMEOUT", "500");

        let conf = YarnConfiguration::load("yarn-site.yaml").map_err(|e| e.to_string())?;

        assert_eq!(conf.get(keys::RM_ADDRESS), Some("rm9.example:8032"));
        assert_eq!(
            conf.get_u64(keys::IPC_CLIENT_CONNECT_TIMEOUT_MS, 0).unwrap(),
            500
        );
        assert_eq!(conf.get(keys::RM_CLUSTER_ID), Some("prod-cluster"));
        Ok(())
    });
}

#[test]
fn environment_overrides_flat_dotted_file_keys() {
    Jail::expect_with(|jail| {
        jail.create_file("yarn-site.yaml", SITE_YAML)?;
        jail.set_env("YARN_CONF_HADOOP__SECURITY__AUTHENTICATION", "token");

        let conf = YarnConfiguration::load("yarn-site.yaml").map_err(|e| e.to_string())?;

        assert_eq!(conf.get(keys::HADOOP_SECURITY_AUTHENTICATION), Some("token"));
        assert_eq!(conf.get(keys::RM_ADDRESS), Some("rm1.example:8032"));
        Ok(())
    });
}

#[test]
fn missing_file_yields_empty_configuration() {
    Jail::expect_with(|_jail| {
        let conf = YarnConfiguration::load("absent.yaml").map_err(|e| e.to_string())?;
        assert!(conf.is_empty());
        assert_eq!(
            conf.get_or(keys::RM_CLUSTER_ID, keys::DEFAULT_RM_CLUSTER_ID),
            "yarn_cluster"
        );
        Ok(())
    });
}

#[test]
fn malformed_yaml_is_a_load_error() {
    Jail::expect_with(|jail| {
        jail.create_file("broken.yaml", "yarn: [unclosed")?;

        let err = YarnConfiguration::load("broken.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
        Ok(())
    });
}
