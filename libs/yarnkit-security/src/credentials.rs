//! Token sets held by an identity.

use std::collections::BTreeMap;

use crate::token::Token;

/// Tokens keyed by alias.
///
/// The alias is normally the service address a token carried when it was
/// added, so a newer token for the same service replaces the older one.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    tokens: BTreeMap<String, Token>,
}

impl Credentials {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `token` under `alias`, replacing whatever the alias held.
    ///
    /// Adding a token that is already present under a different alias leaves
    /// the set unchanged, so the same credential is never held twice.
    pub fn add_token(&mut self, alias: impl Into<String>, token: Token) {
        let alias = alias.into();
        let held_elsewhere = self
            .tokens
            .iter()
            .any(|(existing, held)| *existing != alias && *held == token);
        if held_elsewhere {
            return;
        }
        self.tokens.insert(alias, token);
    }

    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&Token> {
        self.tokens.get(alias)
    }

    #[must_use]
    pub fn contains(&self, token: &Token) -> bool {
        self.tokens.values().any(|held| held == token)
    }

    pub fn remove(&mut self, alias: &str) -> Option<Token> {
        self.tokens.remove(alias)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Token)> {
        self.tokens.iter().map(|(alias, token)| (alias.as_str(), token))
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn token(id: &str, service: &str) -> Token {
        Token::new("YARN_AM_RM_TOKEN", id.as_bytes().to_vec(), b"pw".to_vec(), service)
    }

    #[test]
    fn newer_token_replaces_same_alias() {
        let mut creds = Credentials::new();
        let old = token("attempt-1", "rm:8030");
        let rolled = token("attempt-1-rolled", "rm:8030");

        creds.add_token("rm:8030", old.clone());
        creds.add_token("rm:8030", rolled.clone());

        assert_eq!(creds.len(), 1);
        assert!(creds.contains(&rolled));
        assert!(!creds.contains(&old));
    }

    #[test]
    fn same_token_under_new_alias_is_kept_once() {
        let mut creds = Credentials::new();
        let t = token("attempt-1", "stale:1");

        creds.add_token("stale:1", t.clone());
        t.set_service("rm:8030");
        creds.add_token(t.service(), t.clone());

        assert_eq!(creds.len(), 1);
        assert!(creds.get("stale:1").is_some());
        assert_eq!(creds.get("stale:1").map(Token::service).as_deref(), Some("rm:8030"));
    }

    #[test]
    fn remove_returns_token() {
        let mut creds = Credentials::new();
        creds.add_token("a", token("x", "a"));
        assert!(creds.remove("a").is_some());
        assert!(creds.is_empty());
    }
}
