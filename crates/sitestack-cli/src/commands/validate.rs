//! `sitestack validate`: Check a site document.

use std::path::PathBuf;

use clap::Args;
use sitestack_common::constants::DEFAULT_CONFIG_FILE;
use sitestack_compose::validator;

/// Arguments for the `validate` command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the site document (YAML or JSON).
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    pub file: PathBuf,

    /// Fail when the domain and CDN blocks claim the same host.
    #[arg(long)]
    pub strict: bool,
}

/// Executes the `validate` command.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or fails validation.
pub fn execute(args: &ValidateArgs) -> anyhow::Result<()> {
    let config = super::load_config(&args.file)?;
    if args.strict {
        validator::validate_strict(&config)?;
    } else {
        validator::validate(&config)?;
        if let Some(host) = validator::shared_host(&config) {
            tracing::warn!(host, "domain and cdn both claim this host; its A records will conflict");
        }
    }
    println!("{} is valid", args.file.display());
    Ok(())
}
