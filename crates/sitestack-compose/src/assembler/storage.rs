//! Storage assembler.

use sitestack_common::constants::{SITE_BUCKET, SITE_ENTRY_DOCUMENT};

use crate::resource::storage::SiteStorage;

/// Creates the site storage: public-read, with the single-page entry point
/// as both index and error document.
///
/// Name availability is left to the provider.
#[must_use]
pub fn assemble(name: Option<&str>) -> SiteStorage {
    tracing::info!(name = name.unwrap_or("(provider-assigned)"), "assembling site storage");
    SiteStorage {
        id: SITE_BUCKET.into(),
        name: name.map(str::to_string),
        public_read: true,
        index_document: SITE_ENTRY_DOCUMENT.into(),
        error_document: SITE_ENTRY_DOCUMENT.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnamed_storage_is_public_single_page_site() {
        let storage = assemble(None);
        assert_eq!(storage.id, SITE_BUCKET);
        assert!(storage.name.is_none());
        assert!(storage.public_read);
        assert_eq!(storage.index_document, "index.html");
        assert_eq!(storage.error_document, "index.html");
    }

    #[test]
    fn explicit_name_is_kept() {
        let storage = assemble(Some("www.example.com"));
        assert_eq!(storage.name.as_deref(), Some("www.example.com"));
    }
}
