//! Resource manager address resolution.
//!
//! Every lookup is a pure function of [`YarnConfiguration`]: host names are
//! never resolved through DNS.

use std::fmt;
use std::net::{IpAddr, Ipv6Addr};

use yarnkit_config::{YarnConfiguration, keys};

use crate::error::AddressError;

/// RPC endpoints exposed by a resource manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RmEndpoint {
    /// Application submission and cluster queries.
    Client,
    /// Application master registration and allocation.
    Scheduler,
    /// Node manager heartbeats.
    ResourceTracker,
    Admin,
}

impl RmEndpoint {
    #[must_use]
    pub const fn address_key(self) -> &'static str {
        match self {
            Self::Client => keys::RM_ADDRESS,
            Self::Scheduler => keys::RM_SCHEDULER_ADDRESS,
            Self::ResourceTracker => keys::RM_RESOURCE_TRACKER_ADDRESS,
            Self::Admin => keys::RM_ADMIN_ADDRESS,
        }
    }

    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Client => keys::DEFAULT_RM_PORT,
            Self::Scheduler => keys::DEFAULT_RM_SCHEDULER_PORT,
            Self::ResourceTracker => keys::DEFAULT_RM_RESOURCE_TRACKER_PORT,
            Self::Admin => keys::DEFAULT_RM_ADMIN_PORT,
        }
    }
}

/// A `host:port` pair as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostPort {
    host: String,
    port: u16,
}

impl HostPort {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse `host[:port]`, `[v6][:port]` or a bare IPv6 literal read from `key`.
    ///
    /// # Errors
    /// Returns [`AddressError::InvalidAddress`] for an empty host or a bad port.
    pub fn parse(key: &str, raw: &str, default_port: u16) -> Result<Self, AddressError> {
        let value = raw.trim();
        let invalid = |reason| AddressError::invalid_address(key, raw, reason);

        let (host, port) = if let Some(rest) = value.strip_prefix('[') {
            let (host, after) = rest
                .split_once(']')
                .ok_or_else(|| invalid("unterminated IPv6 literal"))?;
            if host.parse::<Ipv6Addr>().is_err() {
                return Err(invalid("brackets must enclose an IPv6 literal"));
            }
            let port = match after {
                "" => None,
                p => Some(p.strip_prefix(':').ok_or_else(|| invalid("expected ':' after ']'"))?),
            };
            (host, port)
        } else if value.parse::<IpAddr>().is_ok_and(|ip| ip.is_ipv6()) {
            (value, None)
        } else {
            let (host, port) = match value.rsplit_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (value, None),
            };
            if !host.chars().all(is_host_char) {
                return Err(invalid("host contains characters outside [A-Za-z0-9.-_]"));
            }
            (host, port)
        };

        if host.is_empty() {
            return Err(invalid("missing host"));
        }
        let port = match port {
            None => default_port,
            Some(p) => p.parse().map_err(|_| invalid("port is not a number in 0..=65535"))?,
        };
        Ok(Self::new(host, port))
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Render the address the way token services are named: lower-cased host,
    /// IP literals in canonical form when `use_ip` is set.
    #[must_use]
    pub fn token_service(&self, use_ip: bool) -> String {
        let host = match self.host.parse::<IpAddr>() {
            Ok(ip) if use_ip => ip.to_string(),
            _ => self.host.to_ascii_lowercase(),
        };
        Self::new(host, self.port).to_string()
    }
}

impl fmt::Display for HostPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Id of the resource manager to connect to, or `None` when HA is disabled.
///
/// `yarn.resourcemanager.ha.id` wins when set; a single configured id is used
/// implicitly.
///
/// # Errors
/// - `NoHaIds` if HA is enabled without any ids
/// - `UnknownRmId` if the selected id is not listed
/// - `AmbiguousActiveRm` if several ids are listed and none is selected
/// - `Config` if the HA flag is not a boolean
pub fn active_rm_id(conf: &YarnConfiguration) -> Result<Option<String>, AddressError> {
    if !conf.get_bool(keys::RM_HA_ENABLED, keys::DEFAULT_RM_HA_ENABLED)? {
        return Ok(None);
    }

    let ids = conf.get_trimmed_strings(keys::RM_HA_IDS);
    if ids.is_empty() {
        return Err(AddressError::NoHaIds {
            key: keys::RM_HA_IDS,
        });
    }

    let selected = conf.get(keys::RM_HA_ID).map(str::trim).filter(|id| !id.is_empty());
    match selected {
        Some(id) if ids.iter().any(|known| known == id) => Ok(Some(id.to_owned())),
        Some(id) => Err(AddressError::UnknownRmId {
            id: id.to_owned(),
            ids: ids.join(","),
        }),
        None => match ids.as_slice() {
            [only] => Ok(Some(only.clone())),
            _ => Err(AddressError::AmbiguousActiveRm {
                ids: ids.join(","),
                key: keys::RM_HA_ID,
            }),
        },
    }
}

/// Address of `endpoint` on the active resource manager.
///
/// Lookup order, with every key suffixed by the active RM id under HA:
/// the endpoint's own address key, `yarn.resourcemanager.hostname`, the host
/// of the client address, then `0.0.0.0`. Only the first source may carry a
/// port; the others use the endpoint's default port.
///
/// # Errors
/// Returns [`AddressError`] if HA selection fails or a configured address is malformed.
pub fn rm_address(
    conf: &YarnConfiguration,
    endpoint: RmEndpoint,
) -> Result<HostPort, AddressError> {
    let rm_id = active_rm_id(conf)?;
    let suffix = rm_id.as_deref().unwrap_or_default();
    let default_port = endpoint.default_port();

    let address_key = keys::add_suffix(endpoint.address_key(), suffix);
    if let Some(raw) = non_blank(conf.get(&address_key)) {
        return HostPort::parse(&address_key, raw, default_port);
    }

    let host_key = keys::add_suffix(keys::RM_HOSTNAME, suffix);
    if let Some(raw) = non_blank(conf.get(&host_key)) {
        let parsed = HostPort::parse(&host_key, raw, default_port)?;
        return Ok(HostPort::new(parsed.host, default_port));
    }

    if endpoint != RmEndpoint::Client {
        let client_key = keys::add_suffix(keys::RM_ADDRESS, suffix);
        if let Some(raw) = non_blank(conf.get(&client_key)) {
            let parsed = HostPort::parse(&client_key, raw, keys::DEFAULT_RM_PORT)?;
            return Ok(HostPort::new(parsed.host, default_port));
        }
    }

    Ok(HostPort::new(keys::DEFAULT_RM_HOST, default_port))
}

/// Service address application master tokens must carry to authenticate
/// against the active resource manager's scheduler endpoint.
///
/// # Errors
/// Returns [`AddressError`] if the scheduler address cannot be resolved.
pub fn resolve_token_service_address(conf: &YarnConfiguration) -> Result<String, AddressError> {
    let address = rm_address(conf, RmEndpoint::Scheduler)?;
    let use_ip = conf.get_bool(keys::TOKEN_SERVICE_USE_IP, keys::DEFAULT_TOKEN_SERVICE_USE_IP)?;
    Ok(address.token_service(use_ip))
}

fn is_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
