//! Shared-secret access control for state-mutating commands.

use std::fmt;

use uuid::Uuid;

use super::{CommandType, Partition};

/// The process-wide admin token controllers must present.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminToken(String);

impl AdminToken {
    /// Wrap an operator-supplied token. Returns `None` for an empty or blank value.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// Generate a random token (32 lowercase hex characters).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact string equality. Not constant-time.
    pub fn matches(&self, candidate: Option<&str>) -> bool {
        candidate == Some(self.0.as_str())
    }
}

impl fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminToken(***)")
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Denied,
}

/// Decides whether a command from a connection may proceed.
#[derive(Debug, Clone)]
pub struct AccessGate {
    token: AdminToken,
}

impl AccessGate {
    pub fn new(token: AdminToken) -> Self {
        Self { token }
    }

    /// Controllers must present the admin token for everything except `PING`.
    /// Overlays are never checked.
    ///
    /// `GET_STATE` is read-only but still needs the token from a controller.
    pub fn authorize(
        &self,
        partition: Partition,
        command_type: Option<&str>,
        token: Option<&str>,
    ) -> Access {
        if partition == Partition::Controllers && command_type != Some(CommandType::Ping.as_str()) {
            if self.token.matches(token) {
                Access::Allowed
            } else {
                Access::Denied
            }
        } else {
            Access::Allowed
        }
    }
}
