//! Provider-level authorization boundary.
//!
//! The migration engine delegates access decisions to an external
//! user-context collaborator; this module defines that seam and two local
//! implementations.

use std::collections::HashSet;

/// Answers "can the current caller operate on provider X".
pub trait UserContext: Send + Sync {
    fn has_access_to_provider(&self, provider_code: &str) -> bool;
}

/// Grants access to every provider. Intended for local development and
/// trusted in-process callers.
pub struct FullAccess;

impl UserContext for FullAccess {
    fn has_access_to_provider(&self, _provider_code: &str) -> bool {
        true
    }
}

/// Grants access to a fixed allow-list of provider codes.
pub struct StaticUserContext {
    providers: HashSet<String>,
}

impl StaticUserContext {
    pub fn new<I, S>(providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            providers: providers.into_iter().map(Into::into).collect(),
        }
    }
}

impl UserContext for StaticUserContext {
    fn has_access_to_provider(&self, provider_code: &str) -> bool {
        self.providers.contains(provider_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_access() {
        assert!(FullAccess.has_access_to_provider("ANY"));
    }

    #[test]
    fn test_static_allow_list() {
        let ctx = StaticUserContext::new(["SRC", "DST"]);
        assert!(ctx.has_access_to_provider("SRC"));
        assert!(ctx.has_access_to_provider("DST"));
        assert!(!ctx.has_access_to_provider("OTHER"));
    }
}
