//! Static checks on a resolved configuration.
//!
//! These are opt-in pre-checks for callers such as the CLI. The composer
//! never runs them: configuration values are opaque to it, and anything the
//! checks catch would otherwise surface from the provider at deploy time.

use sitestack_common::config::SiteConfig;
use sitestack_common::error::{Result, SitestackError};
use sitestack_common::types::HostedZone;

/// Validates a configuration for composition.
///
/// # Checks performed
///
/// 1. Present blocks carry no empty values.
/// 2. Every host name lies inside the zone it is placed in.
///
/// Domain and CDN blocks claiming the same host are not rejected here; see
/// [`shared_host`].
///
/// # Errors
///
/// Returns a `Config` error describing the first failed check.
pub fn validate(config: &SiteConfig) -> Result<()> {
    tracing::debug!("validating site configuration");
    check_required_values(config)?;
    check_hosts_in_zones(config)
}

fn config_err(message: String) -> SitestackError {
    SitestackError::Config { message }
}

fn require(block: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(config_err(format!("{block}.{field} must not be empty")));
    }
    Ok(())
}

fn require_zone(block: &str, zone: &HostedZone) -> Result<()> {
    require(block, "zone.id", &zone.id)?;
    require(block, "zone.name", &zone.name)
}

fn check_required_values(config: &SiteConfig) -> Result<()> {
    if let Some(name) = &config.storage_name {
        require("site", "storage_name", name)?;
    }
    if let Some(pipeline) = &config.pipeline {
        if pipeline.oauth_token.is_empty() {
            return Err(config_err("pipeline.oauth_token must not be empty".into()));
        }
        require("pipeline", "owner", &pipeline.owner)?;
        require("pipeline", "repo", &pipeline.repo)?;
        require("pipeline", "branch", &pipeline.branch)?;
    }
    if let Some(domain) = &config.domain {
        require_zone("domain", &domain.zone)?;
        require("domain", "domain_name", &domain.domain_name)?;
    }
    if let Some(cdn) = &config.cdn {
        require_zone("cdn", &cdn.zone)?;
        require("cdn", "alias", &cdn.alias)?;
        require("cdn", "certificate", cdn.certificate.as_str())?;
    }
    Ok(())
}

fn check_hosts_in_zones(config: &SiteConfig) -> Result<()> {
    if let Some(domain) = &config.domain {
        if !domain.zone.contains(&domain.domain_name) {
            return Err(config_err(format!(
                "domain {} is outside zone {}",
                domain.domain_name, domain.zone.name
            )));
        }
    }
    if let Some(cdn) = &config.cdn {
        if !cdn.zone.contains(&cdn.alias) {
            return Err(config_err(format!(
                "cdn alias {} is outside zone {}",
                cdn.alias, cdn.zone.name
            )));
        }
    }
    Ok(())
}

fn normalize_host(host: &str) -> String {
    host.trim_end_matches('.').to_ascii_lowercase()
}

/// Returns the host claimed by both the domain and the CDN block, if any.
///
/// Both blocks then produce an A record for that name, which the DNS
/// provider refuses at provisioning time. Neither record is dropped.
#[must_use]
pub fn shared_host(config: &SiteConfig) -> Option<&str> {
    let (domain, cdn) = (config.domain.as_ref()?, config.cdn.as_ref()?);
    (normalize_host(&domain.domain_name) == normalize_host(&cdn.alias))
        .then_some(cdn.alias.as_str())
}

/// Like [`validate`], but also rejects a host shared by domain and CDN.
///
/// # Errors
///
/// Returns a `Config` error describing the first failed check.
pub fn validate_strict(config: &SiteConfig) -> Result<()> {
    validate(config)?;
    if let Some(host) = shared_host(config) {
        return Err(config_err(format!(
            "domain and cdn both claim host {host}; use a different host for one of them"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use sitestack_common::config::{CdnConfig, DomainConfig, PipelineConfig};
    use sitestack_common::types::{CertificateRef, SecretToken};

    use super::*;

    fn zone() -> HostedZone {
        HostedZone::new("Z1", "example.com")
    }

    fn domain(name: &str) -> DomainConfig {
        DomainConfig {
            zone: zone(),
            domain_name: name.into(),
        }
    }

    fn cdn(alias: &str) -> CdnConfig {
        CdnConfig {
            zone: zone(),
            alias: alias.into(),
            certificate: CertificateRef::new("arn:aws:acm:us-east-1:1:certificate/c"),
        }
    }

    #[test]
    fn validate_empty_config_succeeds() {
        assert!(validate(&SiteConfig::default()).is_ok());
    }

    #[test]
    fn validate_distinct_domain_and_cdn_hosts_succeeds() {
        let config = SiteConfig {
            domain: Some(domain("origin.example.com")),
            cdn: Some(cdn("www.example.com")),
            ..SiteConfig::default()
        };
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn same_host_for_domain_and_cdn_is_reported() {
        let config = SiteConfig {
            domain: Some(domain("www.example.com")),
            cdn: Some(cdn("WWW.example.com.")),
            ..SiteConfig::default()
        };
        assert!(validate(&config).is_ok());
        assert_eq!(shared_host(&config), Some("WWW.example.com."));
        let msg = validate_strict(&config).unwrap_err().to_string();
        assert!(msg.contains("both claim host"), "got: {msg}");
    }

    #[test]
    fn distinct_hosts_pass_strict_validation() {
        let config = SiteConfig {
            domain: Some(domain("origin.example.com")),
            cdn: Some(cdn("www.example.com")),
            ..SiteConfig::default()
        };
        assert!(shared_host(&config).is_none());
        assert!(validate_strict(&config).is_ok());
    }

    #[test]
    fn validate_empty_pipeline_branch_fails() {
        let config = SiteConfig {
            pipeline: Some(PipelineConfig {
                oauth_token: SecretToken::new("t"),
                owner: "o".into(),
                repo: "r".into(),
                branch: String::new(),
            }),
            ..SiteConfig::default()
        };
        let msg = validate(&config).unwrap_err().to_string();
        assert!(msg.contains("pipeline.branch"), "got: {msg}");
    }

    #[test]
    fn validate_empty_token_fails_without_echoing_it() {
        let config = SiteConfig {
            pipeline: Some(PipelineConfig {
                oauth_token: SecretToken::new(""),
                owner: "o".into(),
                repo: "r".into(),
                branch: "b".into(),
            }),
            ..SiteConfig::default()
        };
        let msg = validate(&config).unwrap_err().to_string();
        assert!(msg.contains("oauth_token"), "got: {msg}");
    }

    #[test]
    fn validate_host_outside_zone_fails() {
        let config = SiteConfig {
            cdn: Some(cdn("www.example.org")),
            ..SiteConfig::default()
        };
        let msg = validate(&config).unwrap_err().to_string();
        assert!(msg.contains("outside zone"), "got: {msg}");
    }

    #[test]
    fn validate_empty_storage_name_fails() {
        let config = SiteConfig {
            storage_name: Some("  ".into()),
            ..SiteConfig::default()
        };
        assert!(validate(&config).is_err());
    }
}
