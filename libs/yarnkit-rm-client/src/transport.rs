//! The seam between proxy construction and the RPC stack.

use yarnkit_config::YarnConfiguration;
use yarnkit_security::UserIdentity;

use crate::error::TransportError;
use crate::protocol::ProtocolDescriptor;

/// Builds live proxies for resource manager protocols.
///
/// Implementations resolve the endpoint for `protocol` from `conf` and open
/// (or lazily prepare) the connection. `caller` is the identity the proxy is
/// being created for; its credentials are the ones to authenticate with.
pub trait TransportFactory {
    type Proxy;

    /// Build a proxy for `protocol`.
    ///
    /// # Errors
    /// Returns [`TransportError`] if the endpoint cannot be resolved or the
    /// connection cannot be prepared.
    fn create_proxy(
        &self,
        conf: &YarnConfiguration,
        protocol: &ProtocolDescriptor,
        caller: &UserIdentity,
    ) -> Result<Self::Proxy, TransportError>;
}

impl<T: TransportFactory + ?Sized> TransportFactory for &T {
    type Proxy = T::Proxy;

    fn create_proxy(
        &self,
        conf: &YarnConfiguration,
        protocol: &ProtocolDescriptor,
        caller: &UserIdentity,
    ) -> Result<Self::Proxy, TransportError> {
        (**self).create_proxy(conf, protocol, caller)
    }
}
