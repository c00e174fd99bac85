//! Configuration model for a static-site composition.
//!
//! [`SiteConfig`] is what the composer consumes: every optional block is an
//! `Option`, and every zone is already resolved. [`SiteDocument`] is the
//! on-disk form, where zones may still be given by name only and are resolved
//! before composition.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SitestackError};
use crate::types::{CertificateRef, HostedZone, SecretToken};

/// Fully resolved input to one composition.
#[derive(Debug, Clone, Default)]
pub struct SiteConfig {
    /// Explicit storage name; provider-assigned when absent.
    pub storage_name: Option<String>,
    /// Build/deploy pipeline settings.
    pub pipeline: Option<PipelineConfig>,
    /// Direct-to-storage custom domain.
    pub domain: Option<DomainConfig>,
    /// CDN distribution with its own aliases.
    pub cdn: Option<CdnConfig>,
}

/// Source repository feeding the build/deploy pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Source-control credential, passed through untouched.
    pub oauth_token: SecretToken,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Branch to track.
    pub branch: String,
}

/// Custom domain aliased straight at the storage website endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainConfig {
    /// Zone holding the record.
    pub zone: HostedZone,
    /// Fully qualified host name.
    pub domain_name: String,
}

/// CDN distribution settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdnConfig {
    /// Zone holding the A/AAAA pair.
    pub zone: HostedZone,
    /// Host name the distribution answers to.
    pub alias: String,
    /// Pre-issued certificate covering `alias`.
    pub certificate: CertificateRef,
}

/// How a configuration document refers to a hosted zone.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ZoneSpec {
    /// Zone given by apex name; resolved through a zone lookup.
    Named(String),
    /// Zone given in full.
    Resolved(HostedZone),
}

/// On-disk `domain` block.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainDocument {
    /// Zone reference; looked up from `domain_name` when absent.
    #[serde(default)]
    pub zone: Option<ZoneSpec>,
    /// Fully qualified host name.
    pub domain_name: String,
}

/// On-disk `cdn` block.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CdnDocument {
    /// Zone reference; looked up from `alias` when absent.
    #[serde(default)]
    pub zone: Option<ZoneSpec>,
    /// Host name the distribution answers to.
    pub alias: String,
    /// Certificate ARN.
    pub certificate: CertificateRef,
}

/// A configuration document as written by users (YAML or JSON).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteDocument {
    /// Known hosted zones, apex name to zone id.
    #[serde(default)]
    pub zones: BTreeMap<String, String>,
    /// Explicit storage name.
    #[serde(default)]
    pub storage_name: Option<String>,
    /// Pipeline block.
    #[serde(default)]
    pub pipeline: Option<PipelineConfig>,
    /// Domain block.
    #[serde(default)]
    pub domain: Option<DomainDocument>,
    /// CDN block.
    #[serde(default)]
    pub cdn: Option<CdnDocument>,
}

impl SiteDocument {
    /// Parses a document from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed YAML or keys outside the supported topology.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON or keys outside the supported topology.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Loads a document, picking the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unsupported
    /// extension, or fails to parse.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "loading site configuration");

        let content = std::fs::read_to_string(path).map_err(|e| SitestackError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&content),
            Some("json") => Self::from_json(&content),
            other => Err(SitestackError::Config {
                message: format!(
                    "unsupported configuration format {other:?} for {}; expected .yaml, .yml or .json",
                    path.display()
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_yaml_document_has_no_blocks() {
        let doc = SiteDocument::from_yaml("{}").expect("parse");
        assert!(doc.storage_name.is_none());
        assert!(doc.pipeline.is_none());
        assert!(doc.domain.is_none());
        assert!(doc.cdn.is_none());
    }

    #[test]
    fn full_yaml_document_parses() {
        let yaml = r#"
zones:
  example.com: Z123
storage_name: my-site
pipeline:
  oauth_token: "{{resolve:secretsmanager:github}}"
  owner: o
  repo: r
  branch: master
domain:
  zone: example.com
  domain_name: www.example.com
cdn:
  zone:
    id: Z123
    name: example.com
  alias: cdn.example.com
  certificate: arn:aws:acm:us-east-1:123:certificate/abc
"#;
        let doc = SiteDocument::from_yaml(yaml).expect("parse");
        assert_eq!(doc.zones.get("example.com").map(String::as_str), Some("Z123"));
        let pipeline = doc.pipeline.expect("pipeline");
        assert_eq!(pipeline.branch, "master");
        let domain = doc.domain.expect("domain");
        assert_eq!(domain.zone, Some(ZoneSpec::Named("example.com".into())));
        let cdn = doc.cdn.expect("cdn");
        assert_eq!(
            cdn.zone,
            Some(ZoneSpec::Resolved(HostedZone::new("Z123", "example.com")))
        );
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        let err = SiteDocument::from_yaml("database:\n  engine: postgres\n").unwrap_err();
        assert!(err.to_string().contains("database"), "got: {err}");
    }

    #[test]
    fn unknown_block_key_is_rejected() {
        let json = r#"{"cdn": {"alias": "a.example.com", "certificate": "arn", "origins": []}}"#;
        assert!(SiteDocument::from_json(json).is_err());
    }

    #[test]
    fn pipeline_debug_output_hides_token() {
        let json = r#"{"pipeline": {"oauth_token": "t0ps3cret", "owner": "o", "repo": "r", "branch": "b"}}"#;
        let doc = SiteDocument::from_json(json).expect("parse");
        let rendered = format!("{doc:?}");
        assert!(!rendered.contains("t0ps3cret"), "got: {rendered}");
    }

    #[test]
    fn load_picks_format_from_extension() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("tempfile");
        file.write_all(br#"{"storage_name": "bucket"}"#)
            .expect("write");
        let doc = SiteDocument::load(file.path()).expect("load");
        assert_eq!(doc.storage_name.as_deref(), Some("bucket"));
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("tempfile");
        let err = SiteDocument::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported"), "got: {err}");
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = SiteDocument::load(Path::new("/nonexistent/site.yaml")).unwrap_err();
        assert!(matches!(err, SitestackError::Io { .. }));
    }
}
