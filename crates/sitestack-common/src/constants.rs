//! System-wide constants: logical ids, document names and provider ids.

use crate::types::{LogicalId, StaticLogicalId};

/// Single-page entry point served for both index and error documents.
pub const SITE_ENTRY_DOCUMENT: &str = "index.html";

/// Logical id of the site storage bucket.
pub const SITE_BUCKET: StaticLogicalId = LogicalId::from_static("SiteBucket");
/// Logical id of the build/deploy pipeline.
pub const PIPELINE: StaticLogicalId = LogicalId::from_static("Pipeline");
/// Logical id of the build project driven by the pipeline.
pub const BUILD_PROJECT: StaticLogicalId = LogicalId::from_static("Project");
/// Logical id of the direct-to-storage alias record.
pub const DOMAIN_A_RECORD: StaticLogicalId = LogicalId::from_static("ARecord");
/// Logical id of the CDN distribution.
pub const DISTRIBUTION: StaticLogicalId = LogicalId::from_static("CloudFrontDistribution");
/// Logical id of the distribution's IPv4 alias record.
pub const CDN_A_RECORD: StaticLogicalId = LogicalId::from_static("CloudFrontARecord");
/// Logical id of the distribution's IPv6 alias record.
pub const CDN_AAAA_RECORD: StaticLogicalId = LogicalId::from_static("CloudFrontAaaaRecord");

/// Name of the pipeline's source action.
pub const SOURCE_ACTION_NAME: &str = "SiteSource";
/// Name of the pipeline's build action.
pub const BUILD_ACTION_NAME: &str = "BuildAction";
/// Name of the pipeline's deploy action.
pub const DEPLOY_ACTION_NAME: &str = "S3Deploy";
/// Artifact carrying fetched sources from Fetch to Build.
pub const SOURCE_OUTPUT_ARTIFACT: &str = "SourceOutput";
/// Artifact carrying build output from Build to Deploy.
pub const BUILD_OUTPUT_ARTIFACT: &str = "BuildOutput";

/// Origin id used by the distribution's single origin.
pub const DEFAULT_ORIGIN_ID: &str = "origin1";

/// Hosted zone id every CloudFront distribution alias resolves through.
pub const CLOUDFRONT_HOSTED_ZONE_ID: &str = "Z2FDTNDATAQYW2";

/// Minimum TLS version presented to viewers.
pub const MINIMUM_PROTOCOL_VERSION: &str = "TLSv1.2_2021";

/// Region, S3 website endpoint and S3 website hosted zone id.
///
/// Website alias records must name the endpoint of the region the bucket
/// lives in; the template resolves the row at deploy time.
pub const S3_WEBSITE_ENDPOINTS: &[(&str, &str, &str)] = &[
    ("us-east-1", "s3-website-us-east-1.amazonaws.com", "Z3AQBSTGFYJSTF"),
    ("us-east-2", "s3-website.us-east-2.amazonaws.com", "Z2O1EMRO9K5GLX"),
    ("us-west-1", "s3-website-us-west-1.amazonaws.com", "Z2F56UZL2M1ACD"),
    ("us-west-2", "s3-website-us-west-2.amazonaws.com", "Z3BJ6K6RIION7M"),
    ("af-south-1", "s3-website.af-south-1.amazonaws.com", "Z83WF9RJE8B12"),
    ("ap-east-1", "s3-website.ap-east-1.amazonaws.com", "ZNB98KWMFR0R6"),
    ("ap-south-1", "s3-website.ap-south-1.amazonaws.com", "Z11RGJOFQNVJUP"),
    ("ap-south-2", "s3-website.ap-south-2.amazonaws.com", "Z02976202B4EZMXIPMXF7"),
    ("ap-northeast-1", "s3-website-ap-northeast-1.amazonaws.com", "Z2M4EHUR26P7ZW"),
    ("ap-northeast-2", "s3-website.ap-northeast-2.amazonaws.com", "Z3W03O7B5YMIYP"),
    ("ap-northeast-3", "s3-website.ap-northeast-3.amazonaws.com", "Z2YQB5RD63NC85"),
    ("ap-southeast-1", "s3-website-ap-southeast-1.amazonaws.com", "Z3O0J2DXBE1FTB"),
    ("ap-southeast-2", "s3-website-ap-southeast-2.amazonaws.com", "Z1WCIGYICN2BYD"),
    ("ap-southeast-3", "s3-website.ap-southeast-3.amazonaws.com", "Z01846753K324LI26A3VV"),
    ("ap-southeast-4", "s3-website.ap-southeast-4.amazonaws.com", "Z0312387243XT5FE14WFO"),
    ("ca-central-1", "s3-website.ca-central-1.amazonaws.com", "Z1QDHH18159H29"),
    ("ca-west-1", "s3-website.ca-west-1.amazonaws.com", "Z03565811Z33SLEZTHOUL"),
    ("eu-central-1", "s3-website.eu-central-1.amazonaws.com", "Z21DNDUVLTQW6Q"),
    ("eu-central-2", "s3-website.eu-central-2.amazonaws.com", "Z030506016YDQGETNASS"),
    ("eu-west-1", "s3-website-eu-west-1.amazonaws.com", "Z1BKCTXD74EZPE"),
    ("eu-west-2", "s3-website.eu-west-2.amazonaws.com", "Z3GKZC51ZF0DB4"),
    ("eu-west-3", "s3-website.eu-west-3.amazonaws.com", "Z3R1K369G5AVDG"),
    ("eu-south-1", "s3-website.eu-south-1.amazonaws.com", "Z30OZKI7KPW7MI"),
    ("eu-south-2", "s3-website.eu-south-2.amazonaws.com", "Z0081959F7139GRJC19J"),
    ("eu-north-1", "s3-website.eu-north-1.amazonaws.com", "Z3BAZG2TWCNX0D"),
    ("il-central-1", "s3-website.il-central-1.amazonaws.com", "Z09640613K4A3MN55U7GU"),
    ("me-south-1", "s3-website.me-south-1.amazonaws.com", "Z1MPMWCPA7YB62"),
    ("me-central-1", "s3-website.me-central-1.amazonaws.com", "Z06143092I8HRXZRUZROF"),
    ("sa-east-1", "s3-website-sa-east-1.amazonaws.com", "Z7KQH4QJS55SO"),
    ("us-gov-east-1", "s3-website.us-gov-east-1.amazonaws.com", "Z2NIFVYYW2VKV1"),
    ("us-gov-west-1", "s3-website-us-gov-west-1.amazonaws.com", "Z31GFT0UA1I2HV"),
];

/// Application name used in CLI output.
pub const APP_NAME: &str = "sitestack";

/// Default configuration file looked up by the CLI.
pub const DEFAULT_CONFIG_FILE: &str = "sitestack.yaml";
