//! Authenticated resource manager proxy construction.

use tracing::{debug, info};
use yarnkit_config::{YarnConfiguration, keys};
use yarnkit_security::{AuthMethod, IdentityContext, Token, UserIdentity};

use crate::address::resolve_token_service_address;
use crate::error::{AddressError, RmProxyError};
use crate::protocol::ProtocolDescriptor;
use crate::transport::TransportFactory;

/// Message prefix the resource manager uses when an application master
/// registers twice.
pub const APP_ALREADY_REGISTERED_MESSAGE: &str = "Application Master is already registered : ";

/// Builds resource manager proxies on behalf of a user.
#[derive(Debug, Clone, Default)]
pub struct RmProxyFactory<I, F> {
    identity_ctx: I,
    transport: F,
}

impl<I, F> RmProxyFactory<I, F>
where
    I: IdentityContext,
    F: TransportFactory,
{
    #[must_use]
    pub fn new(identity_ctx: I, transport: F) -> Self {
        Self {
            identity_ctx,
            transport,
        }
    }

    #[must_use]
    pub fn identity_context(&self) -> &I {
        &self.identity_ctx
    }

    #[must_use]
    pub fn transport(&self) -> &F {
        &self.transport
    }

    /// Create a proxy for `protocol` that runs as `identity`.
    ///
    /// See [`create_rm_proxy`].
    ///
    /// # Errors
    /// Same as [`create_rm_proxy`].
    pub fn create_rm_proxy(
        &self,
        conf: &mut YarnConfiguration,
        protocol: &ProtocolDescriptor,
        identity: &mut UserIdentity,
        token: Option<&Token>,
    ) -> Result<F::Proxy, RmProxyError> {
        create_rm_proxy(
            &self.identity_ctx,
            &self.transport,
            conf,
            protocol,
            identity,
            token,
        )
    }
}

/// Create a proxy for `protocol` that runs as `identity`, authenticated with `token`.
///
/// When a token is given it is first attached to `identity` (keyed by the
/// service it currently carries), then rebound to the token service of the
/// resource manager `conf` points at, and `conf` is switched to token
/// authentication. These three mutations of caller-owned state are part of
/// the contract and are idempotent. Without a token neither argument is
/// touched.
///
/// The transport is then invoked once under `identity` and its proxy is
/// returned as is.
///
/// # Errors
/// - [`RmProxyError::Fatal`] if the run-as step was interrupted
/// - [`RmProxyError::Address`] if the token service cannot be resolved
/// - [`RmProxyError::Transport`] with the transport's own error
#[tracing::instrument(skip_all, fields(protocol = %protocol))]
pub fn create_rm_proxy<I, F>(
    identity_ctx: &I,
    transport: &F,
    conf: &mut YarnConfiguration,
    protocol: &ProtocolDescriptor,
    identity: &mut UserIdentity,
    token: Option<&Token>,
) -> Result<F::Proxy, RmProxyError>
where
    I: IdentityContext,
    F: TransportFactory,
{
    let rm_cluster_id = conf.get_or(keys::RM_CLUSTER_ID, keys::DEFAULT_RM_CLUSTER_ID);
    info!(
        rm_cluster_id,
        protocol = protocol.name(),
        user = %identity,
        "Creating RM proxy"
    );

    if let Some(token) = token {
        bind_token(conf, identity, token)?;
    }

    let conf: &YarnConfiguration = conf;
    identity_ctx
        .run_as(identity, |caller| transport.create_proxy(conf, protocol, caller))
        .map_err(RmProxyError::from)
}

/// Attach `token` to `identity` under its current service, then point it at
/// the resource manager's token service and select token authentication.
fn bind_token(
    conf: &mut YarnConfiguration,
    identity: &mut UserIdentity,
    token: &Token,
) -> Result<(), AddressError> {
    let alias = identity.add_token(token);
    let service = resolve_token_service_address(conf)?;
    debug!(kind = token.kind(), alias = %alias, service = %service, "Rebinding token service");
    token.set_service(service);
    AuthMethod::Token.apply_to(conf);
    Ok(())
}
