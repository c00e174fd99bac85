//! Pipeline assembler.
//!
//! Builds the Fetch → Build → Deploy pipeline. Each stage reads only the
//! artifact written by the stage before it, so deployment can never observe
//! sources that were not built.

use sitestack_common::config::PipelineConfig;
use sitestack_common::constants::{
    BUILD_ACTION_NAME, BUILD_OUTPUT_ARTIFACT, BUILD_PROJECT, DEPLOY_ACTION_NAME, PIPELINE,
    SOURCE_ACTION_NAME, SOURCE_OUTPUT_ARTIFACT,
};
use sitestack_common::error::Result;

use crate::resource::pipeline::{
    Action, Artifact, BuildAction, BuildProject, DeployAction, Pipeline, SourceAction, Stage,
};
use crate::resource::storage::SiteStorage;

/// Everything the pipeline assembler creates.
#[derive(Debug, Clone)]
pub struct PipelineParts {
    /// Build project, fresh for this composition.
    pub project: BuildProject,
    /// The three-stage pipeline.
    pub pipeline: Pipeline,
}

/// Creates the build project and the pipeline deploying into `storage`.
///
/// Repository coordinates and the credential are passed through untouched.
///
/// # Errors
///
/// Returns an error only if a stage is rejected by [`Pipeline::push_stage`].
pub fn assemble(storage: &SiteStorage, config: &PipelineConfig) -> Result<PipelineParts> {
    tracing::info!(
        owner = %config.owner,
        repo = %config.repo,
        branch = %config.branch,
        "assembling pipeline"
    );

    let source_output = Artifact::new(SOURCE_OUTPUT_ARTIFACT);
    let build_output = Artifact::new(BUILD_OUTPUT_ARTIFACT);
    let project = BuildProject {
        id: BUILD_PROJECT.into(),
    };

    let mut pipeline = Pipeline::new(PIPELINE.into());

    pipeline.push_stage(Stage::new(Action::Source(SourceAction {
        name: SOURCE_ACTION_NAME.into(),
        owner: config.owner.clone(),
        repo: config.repo.clone(),
        branch: config.branch.clone(),
        oauth_token: config.oauth_token.clone(),
        output: source_output.clone(),
    })))?;

    pipeline.push_stage(Stage::new(Action::Build(BuildAction {
        name: BUILD_ACTION_NAME.into(),
        project: project.id.clone(),
        input: source_output,
        output: build_output.clone(),
    })))?;

    pipeline.push_stage(Stage::new(Action::Deploy(DeployAction {
        name: DEPLOY_ACTION_NAME.into(),
        bucket: storage.id.clone(),
        input: build_output,
    })))?;

    Ok(PipelineParts { project, pipeline })
}
