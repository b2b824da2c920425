use std::fmt;

use crate::auth_method::AuthMethod;
use crate::credentials::Credentials;
use crate::token::Token;

/// `UserIdentity` is the principal a remote call executes as.
///
/// It owns a mutable [`Credentials`] set. Proxy users carry the identity of
/// the real user that impersonates them.
#[derive(Debug, Clone)]
pub struct UserIdentity {
    user_name: String,
    auth_method: AuthMethod,
    real_user: Option<Box<UserIdentity>>,
    credentials: Credentials,
}

impl UserIdentity {
    /// Identity for a user authenticated elsewhere (e.g. by an RPC server or a token).
    #[must_use]
    pub fn create_remote_user(user_name: impl Into<String>, auth_method: AuthMethod) -> Self {
        Self {
            user_name: user_name.into(),
            auth_method,
            real_user: None,
            credentials: Credentials::new(),
        }
    }

    /// Identity for `user_name` impersonated by `real_user`.
    #[must_use]
    pub fn create_proxy_user(user_name: impl Into<String>, real_user: UserIdentity) -> Self {
        Self {
            user_name: user_name.into(),
            auth_method: AuthMethod::Proxy,
            real_user: Some(Box::new(real_user)),
            credentials: Credentials::new(),
        }
    }

    /// Full principal name, e.g. `appmaster/host.example@EXAMPLE.COM`.
    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Principal name without the host and realm components.
    #[must_use]
    pub fn short_user_name(&self) -> &str {
        self.user_name
            .split(['/', '@'])
            .next()
            .unwrap_or(self.user_name.as_str())
    }

    #[must_use]
    pub fn authentication_method(&self) -> AuthMethod {
        self.auth_method
    }

    #[must_use]
    pub fn real_user(&self) -> Option<&UserIdentity> {
        self.real_user.as_deref()
    }

    /// Attach `token`, keyed by the service address it carries right now.
    ///
    /// Returns the alias the token is held under.
    pub fn add_token(&mut self, token: &Token) -> String {
        let alias = token.service();
        self.credentials.add_token(alias.clone(), token.clone());
        alias
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn credentials_mut(&mut self) -> &mut Credentials {
        &mut self.credentials
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.credentials.tokens()
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (auth:{})", self.user_name, self.auth_method)?;
        if let Some(real) = &self.real_user {
            write!(f, " via {real}")?;
        }
        Ok(())
    }
}
