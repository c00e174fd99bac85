//! Zone resolution for configuration documents.
//!
//! Documents may name a zone, or leave it out and let it be derived from the
//! host name. Either way every zone is resolved here, before the composer
//! runs, so a lookup failure never reaches graph construction.

use std::collections::BTreeMap;

use sitestack_common::config::{
    CdnConfig, DomainConfig, SiteConfig, SiteDocument, ZoneSpec,
};
use sitestack_common::error::{Result, SitestackError};
use sitestack_common::types::HostedZone;

/// Resolves a domain name to the hosted zone that serves it.
pub trait ZoneLookup {
    /// Returns the zone for `domain`, which may be the apex or any host below it.
    ///
    /// # Errors
    ///
    /// Returns `ZoneNotFound` if no known zone serves the domain.
    fn lookup(&self, domain: &str) -> Result<HostedZone>;
}

/// Lookup over a fixed table of zones (apex name to zone id).
///
/// The deepest known zone containing the host wins, so `a.b.example.com`
/// resolves to `b.example.com` when both it and `example.com` are known.
#[derive(Debug, Clone, Default)]
pub struct StaticZoneLookup {
    zones: BTreeMap<String, String>,
}

impl StaticZoneLookup {
    /// Creates a lookup from apex names to zone ids.
    #[must_use]
    pub fn new(zones: BTreeMap<String, String>) -> Self {
        let zones = zones
            .into_iter()
            .map(|(name, id)| (name.trim_end_matches('.').to_ascii_lowercase(), id))
            .collect();
        Self { zones }
    }
}

impl ZoneLookup for StaticZoneLookup {
    fn lookup(&self, domain: &str) -> Result<HostedZone> {
        let host = domain.trim_end_matches('.').to_ascii_lowercase();
        let mut candidate = host.as_str();
        loop {
            if let Some(id) = self.zones.get(candidate) {
                tracing::debug!(domain, zone = candidate, "resolved hosted zone");
                return Ok(HostedZone::new(id.clone(), candidate));
            }
            match candidate.split_once('.') {
                Some((_, parent)) if parent.contains('.') => candidate = parent,
                _ => break,
            }
        }
        Err(SitestackError::ZoneNotFound {
            domain: domain.to_string(),
        })
    }
}

fn resolve_zone(spec: Option<ZoneSpec>, host: &str, lookup: &dyn ZoneLookup) -> Result<HostedZone> {
    match spec {
        Some(ZoneSpec::Resolved(zone)) => Ok(HostedZone::new(zone.id, zone.name)),
        Some(ZoneSpec::Named(name)) => lookup.lookup(&name),
        None => lookup.lookup(host),
    }
}

/// Turns a document into a composable configuration, resolving every zone.
///
/// # Errors
///
/// Returns `ZoneNotFound` if a zone cannot be resolved.
pub fn resolve_document(document: SiteDocument, lookup: &dyn ZoneLookup) -> Result<SiteConfig> {
    let domain = document
        .domain
        .map(|d| -> Result<DomainConfig> {
            Ok(DomainConfig {
                zone: resolve_zone(d.zone, &d.domain_name, lookup)?,
                domain_name: d.domain_name,
            })
        })
        .transpose()?;

    let cdn = document
        .cdn
        .map(|c| -> Result<CdnConfig> {
            Ok(CdnConfig {
                zone: resolve_zone(c.zone, &c.alias, lookup)?,
                alias: c.alias,
                certificate: c.certificate,
            })
        })
        .transpose()?;

    Ok(SiteConfig {
        storage_name: document.storage_name,
        pipeline: document.pipeline,
        domain,
        cdn,
    })
}

/// Resolves a document against the zones it declares itself.
///
/// # Errors
///
/// Returns `ZoneNotFound` if a zone cannot be resolved.
pub fn resolve_with_declared_zones(document: SiteDocument) -> Result<SiteConfig> {
    let lookup = StaticZoneLookup::new(document.zones.clone());
    resolve_document(document, &lookup)
}
