//! Resource manager client plumbing.
//!
//! The entry point is [`RmProxyFactory::create_rm_proxy`]: given a configuration,
//! a protocol, the identity to act as and an optional delegation token, it
//! rebinds the token to the resource manager the proxy will actually talk to,
//! switches the configuration to token authentication and builds the proxy
//! under that identity.
//!
//! ```ignore
//! use yarnkit_rm_client::{GrpcTransportFactory, RmProxyFactory, protocol};
//! use yarnkit_security::CancellableIdentityContext;
//!
//! let factory = RmProxyFactory::new(CancellableIdentityContext::new(), GrpcTransportFactory::new());
//! let proxy = factory.create_rm_proxy(&mut conf, &protocol::APPLICATION_MASTER, &mut user, Some(&amrm_token))?;
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod address;
pub mod error;
pub mod grpc;
pub mod protocol;
pub mod proxy;
pub mod transport;

pub use address::{HostPort, RmEndpoint, active_rm_id, resolve_token_service_address, rm_address};
pub use error::{AddressError, RmProxyError, TransportError};
pub use grpc::{GrpcTransportFactory, RmProxy};
pub use protocol::ProtocolDescriptor;
pub use proxy::{APP_ALREADY_REGISTERED_MESSAGE, RmProxyFactory, create_rm_proxy};
pub use transport::TransportFactory;
