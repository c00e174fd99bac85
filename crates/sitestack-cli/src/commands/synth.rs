//! `sitestack synth`: Render the composed site as a template.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use sitestack_common::constants::DEFAULT_CONFIG_FILE;
use sitestack_compose::template;

/// Arguments for the `synth` command.
#[derive(Args, Debug)]
pub struct SynthArgs {
    /// Path to the site document (YAML or JSON).
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    pub file: PathBuf,

    /// Write the template here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Executes the `synth` command.
///
/// # Errors
///
/// Returns an error if composition, rendering or writing fails.
pub fn execute(args: &SynthArgs) -> anyhow::Result<()> {
    let site = super::load_site(&args.file)?;
    let rendered = template::render_string(&site)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "template written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
