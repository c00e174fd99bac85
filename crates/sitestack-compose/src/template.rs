//! `CloudFormation` rendering of a composed site.
//!
//! Resources are emitted in deployment order with `DependsOn` taken from the
//! graph edges. Anything the graph only implies is rendered here: the public
//! read policy of the bucket, the region table for website alias records, and
//! the parameters a pipeline needs (service roles and artifact store).

use serde_json::{Map, Value, json};
use sitestack_common::constants::{
    CLOUDFRONT_HOSTED_ZONE_ID, MINIMUM_PROTOCOL_VERSION, S3_WEBSITE_ENDPOINTS,
};
use sitestack_common::error::Result;
use sitestack_common::types::LogicalId;

use crate::StaticSite;
use crate::resource::Resource;
use crate::resource::cdn::Distribution;
use crate::resource::dns::{AliasTarget, DomainRecord};
use crate::resource::pipeline::{Action, Artifact, Pipeline};
use crate::resource::storage::SiteStorage;

/// Template format version.
const FORMAT_VERSION: &str = "2010-09-09";
/// Mapping holding the S3 website endpoint of every supported region.
const WEBSITE_MAPPING: &str = "S3WebsiteEndpoints";
/// Parameter naming the pipeline's service role.
pub const PIPELINE_ROLE_PARAM: &str = "PipelineRoleArn";
/// Parameter naming the build project's service role.
pub const BUILD_ROLE_PARAM: &str = "BuildProjectRoleArn";
/// Parameter naming the bucket that stores pipeline artifacts.
pub const ARTIFACT_BUCKET_PARAM: &str = "PipelineArtifactBucket";
/// Build image used by the build project.
const BUILD_IMAGE: &str = "aws/codebuild/standard:7.0";

fn reference(id: &LogicalId) -> Value {
    json!({ "Ref": id.as_str() })
}

fn get_att(id: &LogicalId, attribute: &str) -> Value {
    json!({ "Fn::GetAtt": [id.as_str(), attribute] })
}

fn website_lookup(key: &str) -> Value {
    json!({ "Fn::FindInMap": [WEBSITE_MAPPING, { "Ref": "AWS::Region" }, key] })
}

fn storage_properties(storage: &SiteStorage) -> Value {
    let mut props = json!({
        "WebsiteConfiguration": {
            "IndexDocument": storage.index_document,
            "ErrorDocument": storage.error_document,
        },
    });
    if let Some(name) = &storage.name {
        props["BucketName"] = json!(name);
    }
    if storage.public_read {
        props["PublicAccessBlockConfiguration"] = json!({
            "BlockPublicAcls": false,
            "BlockPublicPolicy": false,
            "IgnorePublicAcls": false,
            "RestrictPublicBuckets": false,
        });
    }
    props
}

fn public_read_policy(storage: &SiteStorage) -> Value {
    json!({
        "Type": "AWS::S3::BucketPolicy",
        "DependsOn": [storage.id.as_str()],
        "Properties": {
            "Bucket": reference(&storage.id),
            "PolicyDocument": {
                "Version": "2012-10-17",
                "Statement": [{
                    "Action": "s3:GetObject",
                    "Effect": "Allow",
                    "Principal": "*",
                    "Resource": { "Fn::Sub": format!("${{{}.Arn}}/*", storage.id) },
                }],
            },
        },
    })
}

fn build_project_properties() -> Value {
    json!({
        "Source": { "Type": "CODEPIPELINE" },
        "Artifacts": { "Type": "CODEPIPELINE" },
        "Environment": {
            "Type": "LINUX_CONTAINER",
            "ComputeType": "BUILD_GENERAL1_SMALL",
            "Image": BUILD_IMAGE,
        },
        "ServiceRole": { "Ref": BUILD_ROLE_PARAM },
    })
}

fn artifact_list(artifact: Option<&Artifact>) -> Value {
    artifact.map_or_else(|| json!([]), |a| json!([{ "Name": a.name }]))
}

fn action_json(action: &Action) -> Value {
    let (category, owner, provider, configuration) = match action {
        Action::Source(a) => (
            "Source",
            "ThirdParty",
            "GitHub",
            json!({
                "Owner": a.owner,
                "Repo": a.repo,
                "Branch": a.branch,
                "OAuthToken": a.oauth_token.expose(),
                "PollForSourceChanges": false,
            }),
        ),
        Action::Build(a) => (
            "Build",
            "AWS",
            "CodeBuild",
            json!({ "ProjectName": reference(&a.project) }),
        ),
        Action::Deploy(a) => (
            "Deploy",
            "AWS",
            "S3",
            json!({ "BucketName": reference(&a.bucket), "Extract": "true" }),
        ),
    };
    json!({
        "Name": action.name(),
        "ActionTypeId": {
            "Category": category,
            "Owner": owner,
            "Provider": provider,
            "Version": "1",
        },
        "Configuration": configuration,
        "InputArtifacts": artifact_list(action.input()),
        "OutputArtifacts": artifact_list(action.output()),
        "RunOrder": 1,
    })
}

fn pipeline_properties(pipeline: &Pipeline) -> Value {
    let stages: Vec<Value> = pipeline
        .stages()
        .iter()
        .map(|stage| {
            json!({
                "Name": stage.name.to_string(),
                "Actions": [action_json(&stage.action)],
            })
        })
        .collect();
    json!({
        "RoleArn": { "Ref": PIPELINE_ROLE_PARAM },
        "ArtifactStore": { "Type": "S3", "Location": { "Ref": ARTIFACT_BUCKET_PARAM } },
        "Stages": stages,
    })
}

fn record_properties(record: &DomainRecord) -> Value {
    let alias_target = match &record.target {
        AliasTarget::StorageWebsite(_) => json!({
            "DNSName": website_lookup("Endpoint"),
            "HostedZoneId": website_lookup("HostedZoneId"),
        }),
        AliasTarget::Distribution(id) => json!({
            "DNSName": get_att(id, "DomainName"),
            "HostedZoneId": CLOUDFRONT_HOSTED_ZONE_ID,
        }),
    };
    json!({
        "HostedZoneId": record.zone.id,
        "Name": record.name,
        "Type": record.record_type.to_string(),
        "AliasTarget": alias_target,
    })
}

fn distribution_properties(distribution: &Distribution) -> Value {
    let default = distribution.default_behavior();
    json!({
        "DistributionConfig": {
            "Enabled": true,
            "Aliases": distribution.viewer_certificate.aliases(),
            "DefaultRootObject": distribution.default_root_object,
            "Origins": [{
                "Id": distribution.origin.id,
                "DomainName": get_att(&distribution.origin.storage, "RegionalDomainName"),
                "S3OriginConfig": {},
            }],
            "DefaultCacheBehavior": {
                "TargetOriginId": default.target_origin_id,
                "ViewerProtocolPolicy": default.viewer_protocol_policy.as_str(),
                "AllowedMethods": ["GET", "HEAD"],
                "CachedMethods": ["GET", "HEAD"],
                "ForwardedValues": { "QueryString": false },
            },
            "ViewerCertificate": {
                "AcmCertificateArn": distribution.viewer_certificate.certificate.as_str(),
                "SslSupportMethod": "sni-only",
                "MinimumProtocolVersion": MINIMUM_PROTOCOL_VERSION,
            },
        },
    })
}

fn resource_properties(resource: &Resource) -> Value {
    match resource {
        Resource::Storage(s) => storage_properties(s),
        Resource::BuildProject(_) => build_project_properties(),
        Resource::Pipeline(p) => pipeline_properties(p),
        Resource::Record(r) => record_properties(r),
        Resource::Distribution(d) => distribution_properties(d),
    }
}

fn website_mapping() -> Value {
    let rows: Map<String, Value> = S3_WEBSITE_ENDPOINTS
        .iter()
        .map(|(region, endpoint, zone)| {
            (
                (*region).to_string(),
                json!({ "Endpoint": endpoint, "HostedZoneId": zone }),
            )
        })
        .collect();
    json!({ WEBSITE_MAPPING: rows })
}

fn pipeline_parameters() -> Value {
    json!({
        PIPELINE_ROLE_PARAM: {
            "Type": "String",
            "Description": "ARN of the role the pipeline assumes",
        },
        BUILD_ROLE_PARAM: {
            "Type": "String",
            "Description": "ARN of the role the build project assumes",
        },
        ARTIFACT_BUCKET_PARAM: {
            "Type": "String",
            "Description": "Bucket holding artifacts passed between pipeline stages",
        },
    })
}

/// Renders the site as a `CloudFormation` template.
///
/// # Errors
///
/// Returns an error if the graph contains cycles.
pub fn render(site: &StaticSite) -> Result<Value> {
    let graph = site.graph();
    let mut resources = Map::new();

    for resource in site.deployment_order()? {
        let id = resource.logical_id();
        let mut entry = json!({
            "Type": resource.kind().cfn_type(),
            "Properties": resource_properties(resource),
        });
        let depends_on: Vec<&str> = graph
            .dependencies_of(id)
            .into_iter()
            .map(LogicalId::as_str)
            .collect();
        if !depends_on.is_empty() {
            entry["DependsOn"] = json!(depends_on);
        }
        let _ = resources.insert(id.to_string(), entry);

        if let Resource::Storage(storage) = resource {
            if storage.public_read {
                let _ = resources.insert(format!("{id}Policy"), public_read_policy(storage));
            }
        }
    }

    let storage = site.site_storage();
    let mut outputs = json!({
        "SiteBucketName": { "Value": reference(&storage.id) },
        "WebsiteURL": { "Value": get_att(&storage.id, "WebsiteURL") },
    });
    if let Some(distribution) = graph.distributions().next() {
        outputs["DistributionDomainName"] = json!({
            "Value": get_att(&distribution.id, "DomainName"),
        });
    }

    let mut template = json!({
        "AWSTemplateFormatVersion": FORMAT_VERSION,
        "Description": "Static site hosting",
        "Metadata": { "sitestack": { "composition": site.id().as_str() } },
        "Resources": resources,
        "Outputs": outputs,
    });
    if site.pipeline().is_some() {
        template["Parameters"] = pipeline_parameters();
    }
    if graph
        .records()
        .any(|r| matches!(r.target, AliasTarget::StorageWebsite(_)))
    {
        template["Mappings"] = website_mapping();
    }

    tracing::info!(resources = graph.len(), "rendered template");
    Ok(template)
}

/// Renders the site as pretty-printed template JSON.
///
/// # Errors
///
/// Returns an error if rendering or serialization fails.
pub fn render_string(site: &StaticSite) -> Result<String> {
    Ok(serde_json::to_string_pretty(&render(site)?)?)
}

#[cfg(test)]
mod tests {
    use sitestack_common::config::{CdnConfig, DomainConfig, PipelineConfig, SiteConfig};
    use sitestack_common::types::{CertificateRef, HostedZone, SecretToken};

    use super::*;

    fn full_config() -> SiteConfig {
        SiteConfig {
            storage_name: None,
            pipeline: Some(PipelineConfig {
                oauth_token: SecretToken::new("ghp_token"),
                owner: "o".into(),
                repo: "r".into(),
                branch: "master".into(),
            }),
            domain: Some(DomainConfig {
                zone: HostedZone::new("Z1", "example.com"),
                domain_name: "origin.example.com".into(),
            }),
            cdn: Some(CdnConfig {
                zone: HostedZone::new("Z1", "example.com"),
                alias: "www.example.com".into(),
                certificate: CertificateRef::new("arn:aws:acm:us-east-1:1:certificate/c"),
            }),
        }
    }

    fn count_type(template: &Value, ty: &str) -> usize {
        template["Resources"]
            .as_object()
            .map_or(0, |r| r.values().filter(|v| v["Type"] == ty).count())
    }

    #[test]
    fn empty_site_renders_bucket_and_policy_only() {
        let site = StaticSite::compose(&SiteConfig::default()).expect("compose");
        let template = render(&site).expect("render");
        let resources = template["Resources"].as_object().expect("resources");
        assert_eq!(resources.len(), 2);
        assert_eq!(template["Resources"]["SiteBucket"]["Type"], "AWS::S3::Bucket");
        assert_eq!(
            template["Resources"]["SiteBucketPolicy"]["Type"],
            "AWS::S3::BucketPolicy"
        );
        assert!(template.get("Parameters").is_none());
        assert!(template.get("Mappings").is_none());
        assert!(template["Resources"]["SiteBucket"]["Properties"].get("BucketName").is_none());
    }

    #[test]
    fn full_site_renders_every_resource_type() {
        let site = StaticSite::compose(&full_config()).expect("compose");
        let template = render(&site).expect("render");
        assert_eq!(count_type(&template, "AWS::S3::Bucket"), 1);
        assert_eq!(count_type(&template, "AWS::CodeBuild::Project"), 1);
        assert_eq!(count_type(&template, "AWS::CodePipeline::Pipeline"), 1);
        assert_eq!(count_type(&template, "AWS::CloudFront::Distribution"), 1);
        assert_eq!(count_type(&template, "AWS::Route53::RecordSet"), 3);
        assert!(template["Parameters"].get(PIPELINE_ROLE_PARAM).is_some());
        let regions = &template["Mappings"][WEBSITE_MAPPING];
        for region in ["us-east-1", "eu-west-2", "ap-south-1", "sa-east-1"] {
            assert!(regions.get(region).is_some(), "missing {region}");
        }
        assert_eq!(regions["eu-west-2"]["HostedZoneId"], "Z3GKZC51ZF0DB4");
    }

    #[test]
    fn pipeline_stages_render_in_order_with_artifacts() {
        let site = StaticSite::compose(&full_config()).expect("compose");
        let template = render(&site).expect("render");
        let stages = template["Resources"]["Pipeline"]["Properties"]["Stages"]
            .as_array()
            .expect("stages");
        let names: Vec<&str> = stages.iter().filter_map(|s| s["Name"].as_str()).collect();
        assert_eq!(names, ["Fetch", "Build", "Deploy"]);
        assert_eq!(stages[0]["Actions"][0]["OutputArtifacts"][0]["Name"], "SourceOutput");
        assert_eq!(stages[1]["Actions"][0]["InputArtifacts"][0]["Name"], "SourceOutput");
        assert_eq!(stages[1]["Actions"][0]["OutputArtifacts"][0]["Name"], "BuildOutput");
        assert_eq!(stages[2]["Actions"][0]["InputArtifacts"][0]["Name"], "BuildOutput");
        assert_eq!(
            stages[2]["Actions"][0]["Configuration"]["BucketName"],
            json!({ "Ref": "SiteBucket" })
        );
    }

    #[test]
    fn token_only_appears_in_source_configuration() {
        let site = StaticSite::compose(&full_config()).expect("compose");
        let text = render_string(&site).expect("render");
        assert_eq!(text.matches("ghp_token").count(), 1);
    }

    #[test]
    fn cdn_records_alias_the_distribution() {
        let site = StaticSite::compose(&full_config()).expect("compose");
        let template = render(&site).expect("render");
        for id in ["CloudFrontARecord", "CloudFrontAaaaRecord"] {
            let alias = &template["Resources"][id]["Properties"]["AliasTarget"];
            assert_eq!(alias["HostedZoneId"], CLOUDFRONT_HOSTED_ZONE_ID);
            assert_eq!(
                alias["DNSName"],
                json!({ "Fn::GetAtt": ["CloudFrontDistribution", "DomainName"] })
            );
            assert_eq!(
                template["Resources"][id]["DependsOn"],
                json!(["CloudFrontDistribution"])
            );
        }
        assert_eq!(
            template["Resources"]["CloudFrontAaaaRecord"]["Properties"]["Type"],
            "AAAA"
        );
    }

    #[test]
    fn viewer_certificate_lists_only_the_alias() {
        let site = StaticSite::compose(&full_config()).expect("compose");
        let template = render(&site).expect("render");
        let config = &template["Resources"]["CloudFrontDistribution"]["Properties"]["DistributionConfig"];
        assert_eq!(config["Aliases"], json!(["www.example.com"]));
        assert_eq!(
            config["ViewerCertificate"]["AcmCertificateArn"],
            "arn:aws:acm:us-east-1:1:certificate/c"
        );
    }
}
