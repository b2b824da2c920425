//! RPC authentication methods.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use yarnkit_config::{YarnConfiguration, keys};

/// Authentication method an identity was established with, and the scheme
/// RPC clients negotiate with the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthMethod {
    #[default]
    Simple,
    Kerberos,
    /// Delegation token (SASL DIGEST).
    Token,
    /// Identity impersonated by a real user.
    Proxy,
}

#[derive(Debug, Error)]
#[error("unknown authentication method '{0}'")]
pub struct AuthMethodParseError(String);

impl AuthMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "SIMPLE",
            Self::Kerberos => "KERBEROS",
            Self::Token => "TOKEN",
            Self::Proxy => "PROXY",
        }
    }

    /// Method configured under `hadoop.security.authentication`, `SIMPLE` if unset.
    ///
    /// # Errors
    /// Returns [`AuthMethodParseError`] if the configured value is not a known method.
    pub fn from_conf(conf: &YarnConfiguration) -> Result<Self, AuthMethodParseError> {
        conf.get(keys::HADOOP_SECURITY_AUTHENTICATION)
            .map_or(Ok(Self::Simple), str::parse)
    }

    /// Record this method as the one RPC clients built from `conf` negotiate.
    pub fn apply_to(self, conf: &mut YarnConfiguration) {
        conf.set(keys::HADOOP_SECURITY_AUTHENTICATION, self.as_str());
    }
}

impl FromStr for AuthMethod {
    type Err = AuthMethodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        [Self::Simple, Self::Kerberos, Self::Token, Self::Proxy]
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| AuthMethodParseError(s.to_owned()))
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("kerberos".parse::<AuthMethod>().unwrap(), AuthMethod::Kerberos);
        assert_eq!(" Token ".parse::<AuthMethod>().unwrap(), AuthMethod::Token);
        assert!("ldap".parse::<AuthMethod>().is_err());
    }

    #[test]
    fn from_conf_defaults_to_simple() {
        let conf = YarnConfiguration::new();
        assert_eq!(AuthMethod::from_conf(&conf).unwrap(), AuthMethod::Simple);
    }

    #[test]
    fn apply_to_writes_upper_case_name() {
        let mut conf = YarnConfiguration::new();
        AuthMethod::Token.apply_to(&mut conf);
        assert_eq!(conf.get(keys::HADOOP_SECURITY_AUTHENTICATION), Some("TOKEN"));
        assert_eq!(AuthMethod::from_conf(&conf).unwrap(), AuthMethod::Token);
    }
}
