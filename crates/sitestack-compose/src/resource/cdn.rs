//! CDN distribution descriptor.

use serde::Serialize;
use sitestack_common::types::{CertificateRef, LogicalId};

/// Certificate and host names presented to viewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewerCertificate {
    /// Pre-issued certificate.
    pub certificate: CertificateRef,
    aliases: Vec<String>,
}

impl ViewerCertificate {
    /// Binds a certificate to exactly one alias host name.
    #[must_use]
    pub fn from_acm_certificate(certificate: CertificateRef, alias: impl Into<String>) -> Self {
        Self {
            certificate,
            aliases: vec![alias.into()],
        }
    }

    /// Host names bound to the certificate.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }
}

/// How the edge talks to viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewerProtocolPolicy {
    /// Serve HTTP and HTTPS.
    AllowAll,
    /// Redirect HTTP to HTTPS.
    RedirectToHttps,
}

impl ViewerProtocolPolicy {
    /// Provider spelling of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllowAll => "allow-all",
            Self::RedirectToHttps => "redirect-to-https",
        }
    }
}

/// A cache behavior routing requests to an origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheBehavior {
    /// Origin requests are forwarded to.
    pub target_origin_id: String,
    /// Viewer protocol policy.
    pub viewer_protocol_policy: ViewerProtocolPolicy,
}

/// Storage origin of a distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageOrigin {
    /// Origin id referenced by behaviors.
    pub id: String,
    /// Storage serving as origin.
    pub storage: LogicalId,
}

/// A content-delivery distribution fronting the site storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution {
    /// Logical id.
    pub id: LogicalId,
    /// The single origin.
    pub origin: StorageOrigin,
    default_behavior: CacheBehavior,
    /// Viewer TLS binding.
    pub viewer_certificate: ViewerCertificate,
    /// Object returned for the root URL.
    pub default_root_object: String,
}

impl Distribution {
    /// Creates a distribution whose only cache behavior is the catch-all
    /// `default_behavior`.
    #[must_use]
    pub fn new(
        id: LogicalId,
        origin: StorageOrigin,
        default_behavior: CacheBehavior,
        viewer_certificate: ViewerCertificate,
        default_root_object: impl Into<String>,
    ) -> Self {
        Self {
            id,
            origin,
            default_behavior,
            viewer_certificate,
            default_root_object: default_root_object.into(),
        }
    }

    /// The catch-all behavior.
    #[must_use]
    pub const fn default_behavior(&self) -> &CacheBehavior {
        &self.default_behavior
    }

    /// All cache behaviors; the default one is always present.
    #[must_use]
    pub fn behaviors(&self) -> &[CacheBehavior] {
        std::slice::from_ref(&self.default_behavior)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acm_binding_holds_exactly_one_alias() {
        let cert = ViewerCertificate::from_acm_certificate(
            CertificateRef::new("arn:aws:acm:us-east-1:1:certificate/x"),
            "foo.example.com",
        );
        assert_eq!(cert.aliases(), ["foo.example.com"]);
    }

    #[test]
    fn distribution_holds_exactly_one_default_behavior() {
        let distribution = Distribution::new(
            LogicalId::new("Cdn").expect("id"),
            StorageOrigin {
                id: "origin1".into(),
                storage: LogicalId::new("SiteBucket").expect("id"),
            },
            CacheBehavior {
                target_origin_id: "origin1".into(),
                viewer_protocol_policy: ViewerProtocolPolicy::RedirectToHttps,
            },
            ViewerCertificate::from_acm_certificate(
                CertificateRef::new("arn:aws:acm:us-east-1:1:certificate/x"),
                "foo.example.com",
            ),
            "index.html",
        );
        assert_eq!(distribution.behaviors().len(), 1);
        assert_eq!(distribution.behaviors()[0], *distribution.default_behavior());
        assert_eq!(distribution.default_behavior().target_origin_id, "origin1");
    }

    #[test]
    fn viewer_protocol_policy_spelling() {
        assert_eq!(ViewerProtocolPolicy::RedirectToHttps.as_str(), "redirect-to-https");
        assert_eq!(ViewerProtocolPolicy::AllowAll.as_str(), "allow-all");
    }
}
