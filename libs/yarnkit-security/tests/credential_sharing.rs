#![allow(clippy::unwrap_used, clippy::expect_used)]

use yarnkit_security::{AuthMethod, Token, UserIdentity};

#[test]
fn identity_observes_service_rewrite_made_after_attach() {
    let mut user = UserIdentity::create_remote_user("appattempt_1_0001_000001", AuthMethod::Token);
    let token = Token::new(
        "YARN_AM_RM_TOKEN",
        b"appattempt_1_0001_000001".to_vec(),
        b"pw".to_vec(),
        "stale:1",
    );

    let alias = user.add_token(&token);
    token.set_service("rm1.example:8030");

    let held = user.credentials().get(&alias).expect("token attached");
    assert!(held.same_handle(&token));
    assert_eq!(held.service(), "rm1.example:8030");
}

#[test]
fn reattaching_same_token_keeps_single_entry() {
    let mut user = UserIdentity::create_remote_user("alice", AuthMethod::Simple);
    let token = Token::new("YARN_AM_RM_TOKEN", b"id".to_vec(), b"pw".to_vec(), "stale:1");

    user.add_token(&token);
    token.set_service("rm1.example:8030");
    user.add_token(&token);

    assert_eq!(user.credentials().len(), 1);
    assert!(user.credentials().contains(&token));
}

#[test]
fn cloned_identity_shares_token_handles() {
    let mut user = UserIdentity::create_remote_user("alice", AuthMethod::Simple);
    let token = Token::new("YARN_AM_RM_TOKEN", b"id".to_vec(), b"pw".to_vec(), "rm:8030");
    user.add_token(&token);

    let copy = user.clone();
    token.set_service("rm2:8030");

    assert_eq!(copy.tokens().next().map(Token::service).as_deref(), Some("rm2:8030"));
}
