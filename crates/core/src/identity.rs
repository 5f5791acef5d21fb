//! Authenticated principal and the resolver seam used by adapters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Identifier of the user who owns every record, rule and setting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        UserId(value.to_string())
    }
}

/// Resolves the principal behind a request.
///
/// `credentials` is whatever the transport carried (a bearer token for the
/// web server). Implementations return `Error::Unauthenticated` when no
/// principal can be resolved; callers never retry that.
pub trait IdentityResolverTrait: Send + Sync {
    fn resolve_current_user(&self, credentials: Option<&str>) -> Result<UserId>;
}
