//! `sitestack plan`: Display the resources a site composes to.

use std::path::PathBuf;

use clap::Args;
use sitestack_common::constants::DEFAULT_CONFIG_FILE;

use crate::output;

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Path to the site document (YAML or JSON).
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    pub file: PathBuf,
}

/// Executes the `plan` command.
///
/// Composes the site and prints its resources in deployment order, with
/// their key attributes and dependencies.
///
/// # Errors
///
/// Returns an error if loading, composition, or ordering fails.
pub fn execute(args: &PlanArgs) -> anyhow::Result<()> {
    let site = super::load_site(&args.file)?;
    let order = site.deployment_order()?;

    println!("Deployment Plan for: {}", args.file.display());
    println!("{}", output::rule(35));
    println!();

    for resource in &order {
        let id = resource.logical_id();
        println!("  + {id} ({})", resource.kind().cfn_type());
        for (key, value) in resource.attributes() {
            println!("      {key}: {value}");
        }
        let deps = site.graph().dependencies_of(id);
        if !deps.is_empty() {
            println!("      depends on: {}", output::join(&deps));
        }
    }

    println!();
    println!("  {}", output::resource_count(order.len()));

    if let Some(pipeline) = site.pipeline() {
        println!();
        println!("  Artifacts:");
        for flow in pipeline.artifacts() {
            println!(
                "    {}: {} -> {}",
                flow.artifact.name, flow.producer, flow.consumer
            );
        }
    }

    Ok(())
}
