//! Descriptors of the remote interfaces a resource manager serves.

use std::fmt;

use crate::address::RmEndpoint;

/// Identifies a remote interface and the endpoint it is served on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtocolDescriptor {
    name: &'static str,
    endpoint: RmEndpoint,
}

impl ProtocolDescriptor {
    #[must_use]
    pub const fn new(name: &'static str, endpoint: RmEndpoint) -> Self {
        Self { name, endpoint }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn endpoint(&self) -> RmEndpoint {
        self.endpoint
    }
}

impl fmt::Display for ProtocolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Application master registration, heartbeats and container allocation.
pub const APPLICATION_MASTER: ProtocolDescriptor =
    ProtocolDescriptor::new("ApplicationMasterProtocol", RmEndpoint::Scheduler);

/// Application submission and cluster queries.
pub const APPLICATION_CLIENT: ProtocolDescriptor =
    ProtocolDescriptor::new("ApplicationClientProtocol", RmEndpoint::Client);

pub const RESOURCE_MANAGER_ADMIN: ProtocolDescriptor =
    ProtocolDescriptor::new("ResourceManagerAdministrationProtocol", RmEndpoint::Admin);

pub const RESOURCE_TRACKER: ProtocolDescriptor =
    ProtocolDescriptor::new("ResourceTracker", RmEndpoint::ResourceTracker);

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn well_known_protocols_map_to_endpoints() {
        assert_eq!(APPLICATION_MASTER.endpoint(), RmEndpoint::Scheduler);
        assert_eq!(APPLICATION_CLIENT.endpoint(), RmEndpoint::Client);
        assert_eq!(RESOURCE_MANAGER_ADMIN.endpoint(), RmEndpoint::Admin);
        assert_eq!(RESOURCE_TRACKER.endpoint(), RmEndpoint::ResourceTracker);
        assert_eq!(APPLICATION_MASTER.to_string(), "ApplicationMasterProtocol");
    }
}
