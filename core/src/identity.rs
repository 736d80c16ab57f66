use std::{convert::Infallible, fmt, str::FromStr};

/// A mesh service identity, e.g. `bookbuyer.default`.
///
/// Identities are opaque to the route builders; the `*` sentinel matches any
/// caller.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceIdentity(String);

// === impl ServiceIdentity ===

impl ServiceIdentity {
    /// The sentinel identity matching any caller.
    pub fn wildcard() -> Self {
        Self("*".to_string())
    }

    pub fn is_wildcard(&self) -> bool {
        self.0 == "*"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ServiceIdentity {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Infallible> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for ServiceIdentity {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ServiceIdentity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ServiceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
