//! Delegation tokens.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use secrecy::SecretSlice;

/// A delegation credential scoped to a service address.
///
/// `Token` is a shared handle: clones refer to the same credential, so a copy
/// stored in a [`Credentials`](crate::Credentials) set observes a later
/// [`set_service`](Self::set_service) made through any other handle.
///
/// Two tokens are equal when their kind and identifier match. The service
/// address is routing metadata and does not take part in equality.
#[derive(Clone)]
pub struct Token {
    inner: Arc<TokenInner>,
}

struct TokenInner {
    kind: String,
    identifier: Vec<u8>,
    password: SecretSlice<u8>,
    service: RwLock<String>,
}

impl Token {
    #[must_use]
    pub fn new(
        kind: impl Into<String>,
        identifier: impl Into<Vec<u8>>,
        password: impl Into<Vec<u8>>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(TokenInner {
                kind: kind.into(),
                identifier: identifier.into(),
                password: SecretSlice::from(password.into()),
                service: RwLock::new(service.into()),
            }),
        }
    }

    /// Token kind, e.g. `YARN_AM_RM_TOKEN`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.inner.kind
    }

    #[must_use]
    pub fn identifier(&self) -> &[u8] {
        &self.inner.identifier
    }

    #[must_use]
    pub fn password(&self) -> &SecretSlice<u8> {
        &self.inner.password
    }

    /// Service address (`host:port`) the token is currently scoped to.
    #[must_use]
    pub fn service(&self) -> String {
        self.inner.service.read().clone()
    }

    pub fn set_service(&self, service: impl Into<String>) {
        *self.inner.service.write() = service.into();
    }

    /// Whether both handles refer to the same credential instance.
    #[must_use]
    pub fn same_handle(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.same_handle(other)
            || (self.inner.kind == other.inner.kind
                && self.inner.identifier == other.inner.identifier)
    }
}

impl Eq for Token {}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("kind", &self.inner.kind)
            .field("identifier_len", &self.inner.identifier.len())
            .field("password", &self.inner.password)
            .field("service", &*self.inner.service.read())
            .finish()
    }
}
