//! Client-side session state.
//!
//! Authentication on the client is nothing more than the presence of an
//! opaque token: the server session cookie is the durable token, and the
//! client mirrors it here after asking the server who is signed in. No
//! validation happens on this side; a stale mirror is indistinguishable
//! from a live one until the next server round-trip.
//!
//! The state machine has exactly two states: Anonymous → Authenticated on a
//! successful login, Authenticated → Anonymous on logout. There is no
//! pending state and no client-side expiry.

use serde::{Deserialize, Serialize};

/// Opaque session token. The client stores it, never inspects it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The session value passed explicitly to operations that are gated on
/// authentication. There is one of these per mounted app, owned by the auth
/// provider rather than living in a global flag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    token: Option<SessionToken>,
}

impl SessionState {
    /// A visitor with no token.
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    /// A session holding the given token.
    pub fn authenticated(token: SessionToken) -> Self {
        Self { token: Some(token) }
    }

    /// Token presence is the whole of the check.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    /// Transition to Authenticated with a fresh token.
    pub fn begin(&mut self, token: SessionToken) {
        self.token = Some(token);
    }

    /// Transition to Anonymous, dropping the token.
    pub fn end(&mut self) {
        self.token = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_anonymous() {
        let session = SessionState::default();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn login_then_check_is_authenticated() {
        let mut session = SessionState::anonymous();
        session.begin(SessionToken::new("tok-1"));
        assert!(session.is_authenticated());
        assert_eq!(session.token().unwrap().as_str(), "tok-1");
    }

    #[test]
    fn logout_then_check_is_anonymous() {
        let mut session = SessionState::authenticated(SessionToken::new("tok-1"));
        session.end();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn relogin_replaces_token() {
        let mut session = SessionState::authenticated(SessionToken::new("old"));
        session.begin(SessionToken::new("new"));
        assert_eq!(session.token().unwrap().as_str(), "new");
    }
}
