//! Build/deploy pipeline descriptor.
//!
//! A pipeline is an ordered list of stages, one action each. Stages are only
//! ever appended through [`Pipeline::push_stage`], which refuses a stage that
//! is out of order or reads anything other than the artifact written by the
//! stage immediately before it.

use std::fmt;

use serde::Serialize;
use sitestack_common::error::{Result, SitestackError};
use sitestack_common::types::{LogicalId, SecretToken};

/// Name of a pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StageName {
    /// Retrieve sources.
    Fetch,
    /// Run the build project.
    Build,
    /// Write build output into storage.
    Deploy,
}

impl StageName {
    /// Every stage, in the only order a pipeline accepts.
    pub const ORDER: [Self; 3] = [Self::Fetch, Self::Build, Self::Deploy];
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch => write!(f, "Fetch"),
            Self::Build => write!(f, "Build"),
            Self::Deploy => write!(f, "Deploy"),
        }
    }
}

/// A named channel carrying files between two stages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Artifact {
    /// Artifact name, unique within the pipeline.
    pub name: String,
}

impl Artifact {
    /// Creates an artifact.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Retrieves sources from a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceAction {
    /// Action name.
    pub name: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Tracked branch.
    pub branch: String,
    /// Credential used by the source integration.
    #[serde(skip)]
    pub oauth_token: SecretToken,
    /// Artifact the sources are written to.
    pub output: Artifact,
}

/// Runs a build project over the fetched sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildAction {
    /// Action name.
    pub name: String,
    /// Build project to run.
    pub project: LogicalId,
    /// Sources consumed.
    pub input: Artifact,
    /// Build output produced.
    pub output: Artifact,
}

/// Extracts build output into the site storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployAction {
    /// Action name.
    pub name: String,
    /// Storage written to.
    pub bucket: LogicalId,
    /// Build output consumed.
    pub input: Artifact,
}

/// The single unit of work a stage performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Action {
    /// Source retrieval.
    Source(SourceAction),
    /// Build.
    Build(BuildAction),
    /// Deployment.
    Deploy(DeployAction),
}

impl Action {
    /// Action name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Source(a) => &a.name,
            Self::Build(a) => &a.name,
            Self::Deploy(a) => &a.name,
        }
    }

    /// Stage this kind of action belongs to.
    #[must_use]
    pub const fn stage(&self) -> StageName {
        match self {
            Self::Source(_) => StageName::Fetch,
            Self::Build(_) => StageName::Build,
            Self::Deploy(_) => StageName::Deploy,
        }
    }

    /// Artifact read by the action, if any.
    #[must_use]
    pub const fn input(&self) -> Option<&Artifact> {
        match self {
            Self::Source(_) => None,
            Self::Build(a) => Some(&a.input),
            Self::Deploy(a) => Some(&a.input),
        }
    }

    /// Artifact written by the action, if any.
    #[must_use]
    pub const fn output(&self) -> Option<&Artifact> {
        match self {
            Self::Source(a) => Some(&a.output),
            Self::Build(a) => Some(&a.output),
            Self::Deploy(_) => None,
        }
    }
}

/// A pipeline stage holding exactly one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    /// Stage name, derived from the action kind.
    pub name: StageName,
    /// The stage's action.
    pub action: Action,
}

impl Stage {
    /// Wraps an action in the stage it belongs to.
    #[must_use]
    pub fn new(action: Action) -> Self {
        Self {
            name: action.stage(),
            action,
        }
    }
}

/// An artifact together with the stages on either end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFlow<'a> {
    /// The artifact.
    pub artifact: &'a Artifact,
    /// Stage writing it.
    pub producer: StageName,
    /// Stage reading it.
    pub consumer: StageName,
}

/// Build project run by the pipeline's build action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildProject {
    /// Logical id.
    pub id: LogicalId,
}

/// An ordered build/deploy pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pipeline {
    /// Logical id.
    pub id: LogicalId,
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Creates a pipeline with no stages.
    #[must_use]
    pub const fn new(id: LogicalId) -> Self {
        Self {
            id,
            stages: Vec::new(),
        }
    }

    /// Appends the next stage.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStage` if the stage is not the next one in
    /// [`StageName::ORDER`], or if its input is not the artifact produced by
    /// the previous stage.
    pub fn push_stage(&mut self, stage: Stage) -> Result<()> {
        let expected = StageName::ORDER
            .get(self.stages.len())
            .copied()
            .ok_or_else(|| SitestackError::InvalidStage {
                message: format!("pipeline already has {} stages", StageName::ORDER.len()),
            })?;
        if stage.name != expected {
            return Err(SitestackError::InvalidStage {
                message: format!("expected stage {expected}, got {}", stage.name),
            });
        }

        let available = self.stages.last().and_then(|s| s.action.output());
        if stage.action.input() != available {
            return Err(SitestackError::InvalidStage {
                message: format!(
                    "stage {} reads {:?} but the previous stage writes {:?}",
                    stage.name,
                    stage.action.input().map(|a| a.name.as_str()),
                    available.map(|a| a.name.as_str()),
                ),
            });
        }

        tracing::debug!(pipeline = %self.id, stage = %stage.name, action = stage.action.name(), "stage appended");
        self.stages.push(stage);
        Ok(())
    }

    /// Stages in execution order.
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Artifacts passed between consecutive stages.
    #[must_use]
    pub fn artifacts(&self) -> Vec<ArtifactFlow<'_>> {
        self.stages
            .windows(2)
            .filter_map(|pair| {
                let artifact = pair[0].action.output()?;
                (pair[1].action.input() == Some(artifact)).then_some(ArtifactFlow {
                    artifact,
                    producer: pair[0].name,
                    consumer: pair[1].name,
                })
            })
            .collect()
    }

    /// Storage written by the deploy stage.
    #[must_use]
    pub fn deploy_target(&self) -> Option<&LogicalId> {
        self.stages.iter().find_map(|s| match &s.action {
            Action::Deploy(a) => Some(&a.bucket),
            _ => None,
        })
    }

    /// Build project run by the build stage.
    #[must_use]
    pub fn build_project(&self) -> Option<&LogicalId> {
        self.stages.iter().find_map(|s| match &s.action {
            Action::Build(a) => Some(&a.project),
            _ => None,
        })
    }
}
