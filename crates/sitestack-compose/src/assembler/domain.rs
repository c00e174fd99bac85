//! Domain assembler.

use sitestack_common::config::DomainConfig;
use sitestack_common::constants::DOMAIN_A_RECORD;

use crate::resource::dns::{DomainRecord, RecordType};
use crate::resource::storage::SiteStorage;

/// Creates one A record in the configured zone aliasing the storage
/// website interface.
#[must_use]
pub fn assemble(storage: &SiteStorage, config: &DomainConfig) -> DomainRecord {
    tracing::info!(domain = %config.domain_name, zone = %config.zone, "assembling domain record");
    DomainRecord {
        id: DOMAIN_A_RECORD.into(),
        zone: config.zone.clone(),
        name: config.domain_name.clone(),
        record_type: RecordType::A,
        target: storage.website_target(),
    }
}
