//! CLI command definitions and dispatch.

pub mod plan;
pub mod synth;
pub mod validate;

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sitestack_common::config::{SiteConfig, SiteDocument};
use sitestack_compose::StaticSite;
use sitestack_compose::{validator, zone};

/// Static-site hosting stacks from a single document.
#[derive(Parser, Debug)]
#[command(name = "sitestack", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Display the resources a site document composes to.
    Plan(plan::PlanArgs),
    /// Render the composed site as a template.
    Synth(synth::SynthArgs),
    /// Check a site document without composing it.
    Validate(validate::ValidateArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Plan(args) => plan::execute(&args),
        Command::Synth(args) => synth::execute(&args),
        Command::Validate(args) => validate::execute(&args),
    }
}

/// Loads a site document and resolves its zones.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or resolved.
pub fn load_config(file: &Path) -> anyhow::Result<SiteConfig> {
    let document = SiteDocument::load(file)?;
    zone::resolve_with_declared_zones(document)
        .with_context(|| format!("resolving zones in {}", file.display()))
}

/// Loads, resolves and composes a site document.
///
/// Failed pre-checks are logged as warnings; the site is composed anyway and
/// the provider has the final word.
///
/// # Errors
///
/// Returns an error if loading or composition fails.
pub fn load_site(file: &Path) -> anyhow::Result<StaticSite> {
    let config = load_config(file)?;
    if let Err(e) = validator::validate(&config) {
        tracing::warn!(file = %file.display(), error = %e, "configuration pre-check failed");
    }
    StaticSite::compose(&config).with_context(|| format!("composing {}", file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_synth_with_output() {
        let cli = Cli::try_parse_from(["sitestack", "synth", "site.yaml", "-o", "out.json"])
            .expect("parse");
        match cli.command {
            Command::Synth(args) => {
                assert_eq!(args.file, Path::new("site.yaml"));
                assert_eq!(args.output.as_deref(), Some(Path::new("out.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_defaults_plan_file() {
        let cli = Cli::try_parse_from(["sitestack", "plan"]).expect("parse");
        match cli.command {
            Command::Plan(args) => assert_eq!(args.file, Path::new("sitestack.yaml")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn load_site_composes_yaml_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("site.yaml");
        std::fs::write(
            &path,
            "zones:\n  example.com: Z1\ndomain:\n  domain_name: www.example.com\n",
        )
        .expect("write");
        let site = load_site(&path).expect("compose");
        assert_eq!(site.graph().len(), 2);
    }

    #[test]
    fn load_site_composes_despite_failed_pre_check() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("site.yaml");
        std::fs::write(
            &path,
            "pipeline:\n  oauth_token: t\n  owner: o\n  repo: r\n  branch: ''\n",
        )
        .expect("write");
        let config = load_config(&path).expect("load");
        assert!(validator::validate(&config).is_err());
        let site = load_site(&path).expect("compose");
        assert!(site.pipeline().is_some());
    }

    #[test]
    fn load_site_reports_missing_file() {
        let err = load_site(Path::new("/nonexistent/site.yaml")).unwrap_err();
        assert!(format!("{err:#}").contains("site.yaml"), "got: {err:#}");
    }
}
