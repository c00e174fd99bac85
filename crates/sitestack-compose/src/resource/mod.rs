//! Typed descriptors for every resource a composition can create.
//!
//! Cross-references between resources are plain [`LogicalId`]s; they record
//! "depends on" and never ownership. [`Resource::dependencies`] is the single
//! source of the graph's edges.

pub mod cdn;
pub mod dns;
pub mod pipeline;
pub mod storage;

use std::fmt;

use serde::Serialize;
use sitestack_common::types::LogicalId;

use self::cdn::Distribution;
use self::dns::DomainRecord;
use self::pipeline::{BuildProject, Pipeline};
use self::storage::SiteStorage;

/// Kind of a resource, used for counting and provider type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceKind {
    /// Site storage bucket.
    SiteStorage,
    /// Build project.
    BuildProject,
    /// Build/deploy pipeline.
    Pipeline,
    /// DNS alias record.
    DomainRecord,
    /// CDN distribution.
    Distribution,
}

impl ResourceKind {
    /// `CloudFormation` type name.
    #[must_use]
    pub const fn cfn_type(self) -> &'static str {
        match self {
            Self::SiteStorage => "AWS::S3::Bucket",
            Self::BuildProject => "AWS::CodeBuild::Project",
            Self::Pipeline => "AWS::CodePipeline::Pipeline",
            Self::DomainRecord => "AWS::Route53::RecordSet",
            Self::Distribution => "AWS::CloudFront::Distribution",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SiteStorage => write!(f, "site storage"),
            Self::BuildProject => write!(f, "build project"),
            Self::Pipeline => write!(f, "pipeline"),
            Self::DomainRecord => write!(f, "domain record"),
            Self::Distribution => write!(f, "distribution"),
        }
    }
}

/// Any resource in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "resource")]
pub enum Resource {
    /// Site storage.
    Storage(SiteStorage),
    /// Build project.
    BuildProject(BuildProject),
    /// Pipeline.
    Pipeline(Pipeline),
    /// Alias record.
    Record(DomainRecord),
    /// Distribution.
    Distribution(Distribution),
}

impl Resource {
    /// Logical id of the resource.
    #[must_use]
    pub const fn logical_id(&self) -> &LogicalId {
        match self {
            Self::Storage(r) => &r.id,
            Self::BuildProject(r) => &r.id,
            Self::Pipeline(r) => &r.id,
            Self::Record(r) => &r.id,
            Self::Distribution(r) => &r.id,
        }
    }

    /// Kind of the resource.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Storage(_) => ResourceKind::SiteStorage,
            Self::BuildProject(_) => ResourceKind::BuildProject,
            Self::Pipeline(_) => ResourceKind::Pipeline,
            Self::Record(_) => ResourceKind::DomainRecord,
            Self::Distribution(_) => ResourceKind::Distribution,
        }
    }

    /// Resources this one references and therefore depends on.
    #[must_use]
    pub fn dependencies(&self) -> Vec<&LogicalId> {
        match self {
            Self::Storage(_) | Self::BuildProject(_) => Vec::new(),
            Self::Pipeline(p) => p.build_project().into_iter().chain(p.deploy_target()).collect(),
            Self::Record(r) => vec![r.target.logical_id()],
            Self::Distribution(d) => vec![&d.origin.storage],
        }
    }

    /// Human-readable key attributes, for plans and logs.
    ///
    /// Credentials never appear here.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Storage(s) => vec![
                (
                    "name",
                    s.name.clone().unwrap_or_else(|| "(provider-assigned)".into()),
                ),
                ("public_read", s.public_read.to_string()),
                ("index_document", s.index_document.clone()),
                ("error_document", s.error_document.clone()),
            ],
            Self::BuildProject(_) => Vec::new(),
            Self::Pipeline(p) => p
                .stages()
                .iter()
                .map(|stage| ("stage", format!("{} ({})", stage.name, stage.action.name())))
                .collect(),
            Self::Record(r) => vec![
                ("name", r.name.clone()),
                ("type", r.record_type.to_string()),
                ("zone", r.zone.to_string()),
                ("target", r.target.to_string()),
            ],
            Self::Distribution(d) => vec![
                ("origin", d.origin.storage.to_string()),
                ("aliases", d.viewer_certificate.aliases().join(", ")),
                ("certificate", d.viewer_certificate.certificate.to_string()),
                ("behaviors", d.behaviors().len().to_string()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use sitestack_common::types::HostedZone;

    use super::*;
    use crate::resource::dns::{AliasTarget, RecordType};

    #[test]
    fn record_depends_on_its_target() {
        let storage = LogicalId::new("SiteBucket").expect("id");
        let record = Resource::Record(DomainRecord {
            id: LogicalId::new("ARecord").expect("id"),
            zone: HostedZone::new("Z1", "example.com"),
            name: "foo.example.com".into(),
            record_type: RecordType::A,
            target: AliasTarget::StorageWebsite(storage.clone()),
        });
        assert_eq!(record.dependencies(), vec![&storage]);
        assert_eq!(record.kind(), ResourceKind::DomainRecord);
    }

    #[test]
    fn storage_has_no_dependencies() {
        let storage = Resource::Storage(SiteStorage {
            id: LogicalId::new("SiteBucket").expect("id"),
            name: None,
            public_read: true,
            index_document: "index.html".into(),
            error_document: "index.html".into(),
        });
        assert!(storage.dependencies().is_empty());
        let attrs = storage.attributes();
        assert!(attrs.contains(&("name", "(provider-assigned)".to_string())));
    }

    #[test]
    fn cfn_types_match_provider_names() {
        assert_eq!(ResourceKind::SiteStorage.cfn_type(), "AWS::S3::Bucket");
        assert_eq!(ResourceKind::Distribution.cfn_type(), "AWS::CloudFront::Distribution");
    }
}
