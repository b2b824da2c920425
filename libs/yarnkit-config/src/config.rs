//! The [`YarnConfiguration`] key/value store.

use std::collections::BTreeMap;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

/// Environment variables with this prefix override file values.
///
/// Key segments are separated by `__`: `YARN_CONF_YARN__RESOURCEMANAGER__ADDRESS`
/// sets `yarn.resourcemanager.address`.
pub const ENV_PREFIX: &str = "YARN_CONF_";

/// Flat, ordered map of dotted configuration keys to string values.
///
/// Lookups return the raw stored string; typed getters trim before parsing.
/// The store is owned by the caller and borrowed mutably by components that
/// need to adjust a setting for the connection they are about to make.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YarnConfiguration {
    props: BTreeMap<String, String>,
}

impl YarnConfiguration {
    /// Create an empty configuration. Every lookup falls back to its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a YAML file and overlay `YARN_CONF_*` environment variables.
    ///
    /// A missing file contributes nothing. Nested maps are flattened into
    /// dotted keys and sequences are joined with `,`. Each source is flattened
    /// on its own before the environment is laid over the file, so
    /// `hadoop.security.authentication: kerberos` in YAML is still replaced by
    /// `YARN_CONF_HADOOP__SECURITY__AUTHENTICATION`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Load`] if the file or environment cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let sources = [
            Figment::from(Yaml::file(path.as_ref())),
            Figment::from(Env::prefixed(ENV_PREFIX).split("__")),
        ];
        let mut props = BTreeMap::new();
        for figment in &sources {
            flatten_figment(figment, &mut props)?;
        }
        Ok(Self { props })
    }

    /// Build a configuration from an already assembled figment.
    ///
    /// # Errors
    /// Returns [`ConfigError::Load`] if the providers fail to produce a map.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let mut props = BTreeMap::new();
        flatten_figment(figment, &mut props)?;
        Ok(Self { props })
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.props.get(key).map(String::as_str)
    }

    /// Value for `key`, or `default` when the key is absent.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.props.insert(key.into(), value.into());
    }

    /// Remove `key`, returning its previous value.
    pub fn unset(&mut self, key: &str) -> Option<String> {
        self.props.remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    /// Boolean value for `key` (`true`/`false`, case-insensitive).
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if the value is not a boolean.
    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        let Some(raw) = self.get(key) else {
            return Ok(default);
        };
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConfigError::invalid_value(key, raw, "a boolean"))
        }
    }

    /// Unsigned integer value for `key`.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if the value is not an unsigned integer.
    pub fn get_u64(&self, key: &str, default: u64) -> Result<u64, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid_value(key, raw, "an unsigned integer")),
        }
    }

    /// Comma separated values for `key`, trimmed, with empty entries dropped.
    #[must_use]
    pub fn get_trimmed_strings(&self, key: &str) -> Vec<String> {
        self.get(key)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToOwned::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.props.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for YarnConfiguration
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            props: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn flatten_figment(figment: &Figment, out: &mut BTreeMap<String, String>) -> Result<(), ConfigError> {
    let value: Value = figment.extract().map_err(Box::new)?;
    flatten_into(None, &value, out);
    Ok(())
}

fn flatten_into(prefix: Option<&str>, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let key = match prefix {
                    Some(p) => format!("{p}.{k}"),
                    None => k.clone(),
                };
                flatten_into(Some(&key), v, out);
            }
        }
        Value::Array(items) => {
            if let Some(key) = prefix {
                let joined = items
                    .iter()
                    .filter_map(scalar_to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                out.insert(key.to_owned(), joined);
            }
        }
        scalar => {
            if let (Some(key), Some(s)) = (prefix, scalar_to_string(scalar)) {
                out.insert(key.to_owned(), s);
            }
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::keys;

    #[test]
    fn get_or_falls_back_to_default() {
        let conf = YarnConfiguration::new();
        assert_eq!(
            conf.get_or(keys::RM_CLUSTER_ID, keys::DEFAULT_RM_CLUSTER_ID),
            "yarn_cluster"
        );
    }

    #[test]
    fn set_overwrites_previous_value() {
        let mut conf = YarnConfiguration::new();
        conf.set(keys::HADOOP_SECURITY_AUTHENTICATION, "kerberos");
        conf.set(keys::HADOOP_SECURITY_AUTHENTICATION, "TOKEN");
        assert_eq!(conf.get(keys::HADOOP_SECURITY_AUTHENTICATION), Some("TOKEN"));
        assert_eq!(conf.len(), 1);
    }

    #[test]
    fn unset_removes_key() {
        let mut conf: YarnConfiguration = [(keys::RM_HA_ID, "rm1")].into_iter().collect();
        assert_eq!(conf.unset(keys::RM_HA_ID).as_deref(), Some("rm1"));
        assert!(!conf.contains_key(keys::RM_HA_ID));
        assert!(conf.is_empty());
    }

    #[test]
    fn get_bool_parses_case_insensitively() {
        let conf: YarnConfiguration = [(keys::RM_HA_ENABLED, " TRUE ")].into_iter().collect();
        assert!(conf.get_bool(keys::RM_HA_ENABLED, false).unwrap());
        assert!(conf.get_bool("missing.key", true).unwrap());
    }

    #[test]
    fn get_bool_rejects_garbage() {
        let conf: YarnConfiguration = [(keys::RM_HA_ENABLED, "yes")].into_iter().collect();
        let err = conf.get_bool(keys::RM_HA_ENABLED, false).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("yarn.resourcemanager.ha.enabled"));
    }

    #[test]
    fn get_u64_parses_and_rejects() {
        let conf: YarnConfiguration = [
            (keys::IPC_CLIENT_CONNECT_TIMEOUT_MS, "1500"),
            ("bad.number", "-3"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            conf.get_u64(keys::IPC_CLIENT_CONNECT_TIMEOUT_MS, 0).unwrap(),
            1500
        );
        assert!(conf.get_u64("bad.number", 0).is_err());
        assert_eq!(conf.get_u64("missing", 7).unwrap(), 7);
    }

    #[test]
    fn trimmed_strings_drop_empty_entries() {
        let conf: YarnConfiguration = [(keys::RM_HA_IDS, " rm1, ,rm2 ,")].into_iter().collect();
        assert_eq!(conf.get_trimmed_strings(keys::RM_HA_IDS), vec!["rm1", "rm2"]);
        assert!(conf.get_trimmed_strings("missing").is_empty());
    }

    #[test]
    fn flatten_handles_nested_maps_and_sequences() {
        let value = serde_json::json!({
            "yarn": {
                "resourcemanager": {
                    "address": "rm1.example:8032",
                    "ha": { "enabled": true, "rm-ids": ["rm1", "rm2"] }
                }
            },
            "ipc.client.connect.timeout": 500,
            "ignored": null
        });
        let mut props = BTreeMap::new();
        flatten_into(None, &value, &mut props);

        assert_eq!(props["yarn.resourcemanager.address"], "rm1.example:8032");
        assert_eq!(props["yarn.resourcemanager.ha.enabled"], "true");
        assert_eq!(props["yarn.resourcemanager.ha.rm-ids"], "rm1,rm2");
        assert_eq!(props["ipc.client.connect.timeout"], "500");
        assert!(!props.contains_key("ignored"));
    }

    #[test]
    fn serializes_as_plain_map() {
        let conf: YarnConfiguration = [(keys::RM_ADDRESS, "rm:8032")].into_iter().collect();
        let json = serde_json::to_string(&conf).unwrap();
        assert_eq!(json, r#"{"yarn.resourcemanager.address":"rm:8032"}"#);
        let back: YarnConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, conf);
    }
}
