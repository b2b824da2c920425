//! Well-known configuration keys and their defaults.

/// Logical cluster identifier of the resource manager.
pub const RM_CLUSTER_ID: &str = "yarn.resourcemanager.cluster-id";
pub const DEFAULT_RM_CLUSTER_ID: &str = "yarn_cluster";

/// Host name shared by every RM endpoint that has no explicit address.
pub const RM_HOSTNAME: &str = "yarn.resourcemanager.hostname";

/// Client protocol endpoint (applications, queues, cluster metrics).
pub const RM_ADDRESS: &str = "yarn.resourcemanager.address";
pub const DEFAULT_RM_PORT: u16 = 8032;

/// Scheduler endpoint used by application masters.
pub const RM_SCHEDULER_ADDRESS: &str = "yarn.resourcemanager.scheduler.address";
pub const DEFAULT_RM_SCHEDULER_PORT: u16 = 8030;

/// Node manager heartbeat endpoint.
pub const RM_RESOURCE_TRACKER_ADDRESS: &str = "yarn.resourcemanager.resource-tracker.address";
pub const DEFAULT_RM_RESOURCE_TRACKER_PORT: u16 = 8031;

/// Administrative endpoint.
pub const RM_ADMIN_ADDRESS: &str = "yarn.resourcemanager.admin.address";
pub const DEFAULT_RM_ADMIN_PORT: u16 = 8033;

/// Host used when neither an address nor a host name is configured.
pub const DEFAULT_RM_HOST: &str = "0.0.0.0";

pub const RM_HA_ENABLED: &str = "yarn.resourcemanager.ha.enabled";
pub const DEFAULT_RM_HA_ENABLED: bool = false;
/// Comma separated list of RM instance ids taking part in HA.
pub const RM_HA_IDS: &str = "yarn.resourcemanager.ha.rm-ids";
/// Id of the RM instance to talk to when HA is enabled.
pub const RM_HA_ID: &str = "yarn.resourcemanager.ha.id";

/// Authentication method negotiated by RPC clients (`simple`, `kerberos`, `token`).
pub const HADOOP_SECURITY_AUTHENTICATION: &str = "hadoop.security.authentication";

/// Render token services as IP literals when the host already is one.
pub const TOKEN_SERVICE_USE_IP: &str = "hadoop.security.token.service.use_ip";
pub const DEFAULT_TOKEN_SERVICE_USE_IP: bool = true;

/// RPC connect timeout in milliseconds.
pub const IPC_CLIENT_CONNECT_TIMEOUT_MS: &str = "ipc.client.connect.timeout";
pub const DEFAULT_IPC_CLIENT_CONNECT_TIMEOUT_MS: u64 = 20_000;

/// Appends the HA instance id to a key (`yarn.resourcemanager.address.rm1`).
#[must_use]
pub fn add_suffix(key: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return key.to_owned();
    }
    format!("{key}.{suffix}")
}
