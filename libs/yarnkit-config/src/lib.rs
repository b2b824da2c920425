#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Configuration store shared by the yarnkit client libraries.
//!
//! [`YarnConfiguration`] is a flat map of dotted keys (`yarn.resourcemanager.address`)
//! to string values. It can be built programmatically or loaded from a YAML file
//! merged with `YARN_CONF_*` environment variables.

pub mod config;
pub mod error;
pub mod keys;

pub use config::{ENV_PREFIX, YarnConfiguration};
pub use error::ConfigError;
