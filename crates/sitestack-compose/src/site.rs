//! The static-site composer.
//!
//! [`StaticSite::compose`] runs the storage, pipeline, domain and CDN
//! assemblers in that order, registering what each returns in a fresh
//! [`ResourceGraph`]. Configuration values are passed through as given;
//! checking them is left to [`crate::validator`] and to the provider. Any
//! error drops the graph under construction, so a caller only ever sees a
//! fully wired site.

use sitestack_common::config::SiteConfig;
use sitestack_common::error::Result;
use sitestack_common::types::CompositionId;

use crate::assembler::{cdn, domain, pipeline, storage};
use crate::graph::ResourceGraph;
use crate::resource::Resource;
use crate::resource::pipeline::Pipeline;
use crate::resource::storage::SiteStorage;
use crate::validator;

/// A composed static site: the resource graph plus its stable handles.
#[derive(Debug)]
pub struct StaticSite {
    id: CompositionId,
    graph: ResourceGraph,
    storage: SiteStorage,
    pipeline: Option<Pipeline>,
}

impl StaticSite {
    /// Composes the resource graph for `config`.
    ///
    /// When no explicit storage name is given but a custom domain is, the
    /// storage is named after the domain so the website alias can resolve.
    ///
    /// # Errors
    ///
    /// Returns an error if a resource cannot be registered. Nothing built so
    /// far is returned in that case.
    pub fn compose(config: &SiteConfig) -> Result<Self> {
        let id = CompositionId::generate();
        let span = tracing::info_span!("compose", composition = %id);
        let _guard = span.enter();

        if let Some(host) = validator::shared_host(config) {
            tracing::warn!(host, "domain and cdn both claim this host; its A records will conflict");
        }

        let mut graph = ResourceGraph::new();

        let storage_name = config
            .storage_name
            .as_deref()
            .or_else(|| config.domain.as_ref().map(|d| d.domain_name.as_str()));
        let storage = storage::assemble(storage_name);
        let _ = graph.add(Resource::Storage(storage.clone()))?;

        let pipeline = match &config.pipeline {
            Some(pipeline_config) => {
                let parts = pipeline::assemble(&storage, pipeline_config)?;
                let _ = graph.add(Resource::BuildProject(parts.project))?;
                let _ = graph.add(Resource::Pipeline(parts.pipeline.clone()))?;
                Some(parts.pipeline)
            }
            None => {
                tracing::debug!("no pipeline configuration, skipping pipeline");
                None
            }
        };

        if let Some(domain_config) = &config.domain {
            let record = domain::assemble(&storage, domain_config);
            let _ = graph.add(Resource::Record(record))?;
        } else {
            tracing::debug!("no domain configuration, skipping domain record");
        }

        if let Some(cdn_config) = &config.cdn {
            let parts = cdn::assemble(&storage, cdn_config);
            let _ = graph.add(Resource::Distribution(parts.distribution))?;
            for record in parts.records {
                let _ = graph.add(Resource::Record(record))?;
            }
        } else {
            tracing::debug!("no cdn configuration, skipping distribution");
        }

        tracing::info!(resources = graph.len(), "composition complete");
        Ok(Self {
            id,
            graph,
            storage,
            pipeline,
        })
    }

    /// Identifier of this composition run.
    #[must_use]
    pub const fn id(&self) -> &CompositionId {
        &self.id
    }

    /// The full resource graph.
    #[must_use]
    pub const fn graph(&self) -> &ResourceGraph {
        &self.graph
    }

    /// The site storage.
    #[must_use]
    pub const fn site_storage(&self) -> &SiteStorage {
        &self.storage
    }

    /// The pipeline, if pipeline configuration was supplied.
    #[must_use]
    pub const fn pipeline(&self) -> Option<&Pipeline> {
        self.pipeline.as_ref()
    }

    /// Resources in creation order: dependencies first.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph contains cycles.
    pub fn deployment_order(&self) -> Result<Vec<&Resource>> {
        self.graph.resolve_order()
    }
}
