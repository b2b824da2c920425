//! gRPC transport backed by `tonic` channels.

use std::time::Duration;

use tokio::runtime::Handle;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;
use yarnkit_config::{YarnConfiguration, keys};
use yarnkit_security::{AuthMethod, UserIdentity};

use crate::address::{HostPort, rm_address};
use crate::error::TransportError;
use crate::protocol::ProtocolDescriptor;
use crate::transport::TransportFactory;

/// Proxy handle bound to one resource manager endpoint.
#[derive(Debug, Clone)]
pub struct RmProxy {
    protocol: ProtocolDescriptor,
    address: HostPort,
    user: String,
    auth_method: AuthMethod,
    channel: Channel,
}

impl RmProxy {
    #[must_use]
    pub fn protocol(&self) -> &ProtocolDescriptor {
        &self.protocol
    }

    #[must_use]
    pub fn address(&self) -> &HostPort {
        &self.address
    }

    /// User the proxy was created for.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Authentication method the connection negotiates.
    #[must_use]
    pub fn auth_method(&self) -> AuthMethod {
        self.auth_method
    }

    #[must_use]
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    #[must_use]
    pub fn into_channel(self) -> Channel {
        self.channel
    }
}

/// Creates lazily connecting `tonic` channels to the resource manager.
///
/// The connection is established on first use by a task on the current Tokio
/// runtime. Outside a runtime `create_proxy` fails with
/// [`TransportError::NoRuntime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GrpcTransportFactory;

impl GrpcTransportFactory {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TransportFactory for GrpcTransportFactory {
    type Proxy = RmProxy;

    fn create_proxy(
        &self,
        conf: &YarnConfiguration,
        protocol: &ProtocolDescriptor,
        caller: &UserIdentity,
    ) -> Result<RmProxy, TransportError> {
        let address = rm_address(conf, protocol.endpoint())?;
        let auth_method = AuthMethod::from_conf(conf)?;
        let connect_timeout = Duration::from_millis(conf.get_u64(
            keys::IPC_CLIENT_CONNECT_TIMEOUT_MS,
            keys::DEFAULT_IPC_CLIENT_CONNECT_TIMEOUT_MS,
        )?);

        if Handle::try_current().is_err() {
            return Err(TransportError::NoRuntime {
                address: address.to_string(),
            });
        }

        let uri = format!("http://{address}");
        let endpoint = Endpoint::from_shared(uri.clone())
            .map_err(|source| TransportError::InvalidEndpoint { uri, source })?
            .connect_timeout(connect_timeout);

        debug!(
            protocol = %protocol,
            address = %address,
            auth = %auth_method,
            user = %caller.user_name(),
            "Preparing resource manager channel"
        );

        Ok(RmProxy {
            protocol: *protocol,
            address,
            user: caller.user_name().to_owned(),
            auth_method,
            channel: endpoint.connect_lazy(),
        })
    }
}
