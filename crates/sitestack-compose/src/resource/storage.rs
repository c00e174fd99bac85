//! Site storage descriptor.

use serde::Serialize;
use sitestack_common::types::LogicalId;

use super::dns::AliasTarget;

/// The public object store backing the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteStorage {
    /// Logical id.
    pub id: LogicalId,
    /// Explicit bucket name; `None` lets the provider assign one.
    pub name: Option<String>,
    /// Whether objects are world-readable. Always `true` for a site.
    pub public_read: bool,
    /// Document served for directory requests.
    pub index_document: String,
    /// Document served on errors.
    pub error_document: String,
}

impl SiteStorage {
    /// Alias target pointing at this storage's website interface.
    #[must_use]
    pub fn website_target(&self) -> AliasTarget {
        AliasTarget::StorageWebsite(self.id.clone())
    }
}
