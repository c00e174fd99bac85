//! CDN assembler.
//!
//! Produces the distribution together with its A/AAAA alias pair. The pair
//! is a fixed-size array, so one address family can never be emitted
//! without the other.

use sitestack_common::config::CdnConfig;
use sitestack_common::constants::{
    CDN_A_RECORD, CDN_AAAA_RECORD, DEFAULT_ORIGIN_ID, DISTRIBUTION, SITE_ENTRY_DOCUMENT,
};
use sitestack_common::types::LogicalId;

use crate::resource::cdn::{
    CacheBehavior, Distribution, StorageOrigin, ViewerCertificate, ViewerProtocolPolicy,
};
use crate::resource::dns::{AliasTarget, DomainRecord, RecordType};
use crate::resource::storage::SiteStorage;

/// Everything the CDN assembler creates.
#[derive(Debug, Clone)]
pub struct CdnParts {
    /// The distribution.
    pub distribution: Distribution,
    /// A and AAAA records, in that order, both aliasing the distribution.
    pub records: [DomainRecord; 2],
}

/// Creates a distribution fronting `storage` and its alias record pair.
#[must_use]
pub fn assemble(storage: &SiteStorage, config: &CdnConfig) -> CdnParts {
    tracing::info!(alias = %config.alias, zone = %config.zone, "assembling CDN distribution");

    let viewer_certificate =
        ViewerCertificate::from_acm_certificate(config.certificate.clone(), config.alias.clone());

    let distribution = Distribution::new(
        DISTRIBUTION.into(),
        StorageOrigin {
            id: DEFAULT_ORIGIN_ID.into(),
            storage: storage.id.clone(),
        },
        CacheBehavior {
            target_origin_id: DEFAULT_ORIGIN_ID.into(),
            viewer_protocol_policy: ViewerProtocolPolicy::RedirectToHttps,
        },
        viewer_certificate,
        SITE_ENTRY_DOCUMENT,
    );

    let record = |id: LogicalId, record_type: RecordType| DomainRecord {
        id,
        zone: config.zone.clone(),
        name: config.alias.clone(),
        record_type,
        target: AliasTarget::Distribution(distribution.id.clone()),
    };
    let records = [
        record(CDN_A_RECORD.into(), RecordType::A),
        record(CDN_AAAA_RECORD.into(), RecordType::Aaaa),
    ];

    CdnParts {
        distribution,
        records,
    }
}

#[cfg(test)]
mod tests {
    use sitestack_common::types::{CertificateRef, HostedZone};

    use super::*;
    use crate::assembler::storage;

    fn config() -> CdnConfig {
        CdnConfig {
            zone: HostedZone::new("Z1", "example.com"),
            alias: "foo.example.com".into(),
            certificate: CertificateRef::new("arn:aws:acm:us-east-1:1:certificate/c"),
        }
    }

    #[test]
    fn distribution_fronts_storage_with_one_default_behavior() {
        let storage = storage::assemble(None);
        let parts = assemble(&storage, &config());
        assert_eq!(parts.distribution.origin.storage, storage.id);
        assert_eq!(parts.distribution.behaviors().len(), 1);
        assert_eq!(
            parts.distribution.default_behavior().target_origin_id,
            parts.distribution.origin.id
        );
    }

    #[test]
    fn certificate_is_bound_to_exactly_the_alias() {
        let storage = storage::assemble(None);
        let parts = assemble(&storage, &config());
        let cert = &parts.distribution.viewer_certificate;
        assert_eq!(cert.aliases(), ["foo.example.com"]);
        assert_eq!(cert.certificate, config().certificate);
    }

    #[test]
    fn record_pair_differs_only_in_family() {
        let storage = storage::assemble(None);
        let parts = assemble(&storage, &config());
        let [a, aaaa] = &parts.records;
        assert_eq!(a.record_type, RecordType::A);
        assert_eq!(aaaa.record_type, RecordType::Aaaa);
        assert_eq!(a.target, aaaa.target);
        assert_eq!(a.zone, aaaa.zone);
        assert_eq!(a.name, aaaa.name);
        assert_ne!(a.id, aaaa.id);
        assert_eq!(
            a.target,
            AliasTarget::Distribution(parts.distribution.id.clone())
        );
    }
}
