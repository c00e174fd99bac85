//! Domain primitive types used across the sitestack workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SitestackError};

/// Template-level name of a resource, unique within one composition.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LogicalId(String);

impl LogicalId {
    /// Creates a logical id, rejecting anything that is not ASCII alphanumeric.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or contains other characters.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SitestackError::Config {
                message: format!("logical id must be non-empty and alphanumeric: {id:?}"),
            });
        }
        Ok(Self(id))
    }

    /// Builds a logical id from a constant known to be valid.
    pub(crate) const fn from_static(id: &'static str) -> StaticLogicalId {
        StaticLogicalId(id)
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A logical id known at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticLogicalId(&'static str);

impl StaticLogicalId {
    /// Returns the id as a string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl From<StaticLogicalId> for LogicalId {
    fn from(id: StaticLogicalId) -> Self {
        Self(id.0.to_string())
    }
}

impl PartialEq<StaticLogicalId> for LogicalId {
    fn eq(&self, other: &StaticLogicalId) -> bool {
        self.0 == other.0
    }
}

/// Unique identifier of one composition run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositionId(String);

impl CompositionId {
    /// Generates a random composition ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque source-control credential.
///
/// The value is never inspected, and both `Debug` and `Display` redact it.
/// Only [`SecretToken::expose`] hands out the raw value.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SecretToken(String);

impl SecretToken {
    /// Wraps a credential value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw credential.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` if no credential was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretToken(***)")
    }
}

impl fmt::Display for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// ARN of a pre-issued TLS certificate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateRef(String);

impl CertificateRef {
    /// Creates a certificate reference.
    #[must_use]
    pub fn new(arn: impl Into<String>) -> Self {
        Self(arn.into())
    }

    /// Returns the certificate ARN.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CertificateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved DNS hosted zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostedZone {
    /// Provider id of the zone.
    pub id: String,
    /// Zone apex, without trailing dot (e.g. `example.com`).
    pub name: String,
}

impl HostedZone {
    /// Creates a hosted zone handle. A trailing dot on the name is dropped.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            id: id.into(),
            name: name.trim_end_matches('.').to_string(),
        }
    }

    /// Returns `true` if `host` is the zone apex or lies beneath it.
    #[must_use]
    pub fn contains(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.');
        host.eq_ignore_ascii_case(&self.name)
            || host
                .to_ascii_lowercase()
                .ends_with(&format!(".{}", self.name.to_ascii_lowercase()))
    }
}

impl fmt::Display for HostedZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
