//! DNS alias records.

use std::fmt;

use serde::Serialize;
use sitestack_common::types::{HostedZone, LogicalId};

/// Address family of an alias record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordType {
    /// IPv4.
    A,
    /// IPv6.
    Aaaa,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::Aaaa => write!(f, "AAAA"),
        }
    }
}

/// What an alias record resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum AliasTarget {
    /// Website endpoint of a storage bucket.
    StorageWebsite(LogicalId),
    /// Edge hostname of a CDN distribution.
    Distribution(LogicalId),
}

impl AliasTarget {
    /// Logical id of the resource the alias resolves through.
    #[must_use]
    pub const fn logical_id(&self) -> &LogicalId {
        match self {
            Self::StorageWebsite(id) | Self::Distribution(id) => id,
        }
    }
}

impl fmt::Display for AliasTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StorageWebsite(id) => write!(f, "{id} (website)"),
            Self::Distribution(id) => write!(f, "{id} (distribution)"),
        }
    }
}

/// A DNS alias record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainRecord {
    /// Logical id.
    pub id: LogicalId,
    /// Zone owning the record.
    pub zone: HostedZone,
    /// Fully qualified record name.
    pub name: String,
    /// Address family.
    pub record_type: RecordType,
    /// Alias target.
    pub target: AliasTarget,
}
