#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod auth_method;
pub mod credentials;
pub mod identity;
pub mod run_as;
pub mod token;

pub use auth_method::{AuthMethod, AuthMethodParseError};
pub use credentials::Credentials;
pub use identity::UserIdentity;
pub use run_as::{CancellableIdentityContext, IdentityContext, Interrupted, RunAsError};
pub use token::Token;
