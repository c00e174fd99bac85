//! Resource graph built on `petgraph`.
//!
//! Resources are added one at a time. Every reference a resource holds
//! becomes an edge from the referenced resource to the referencing one, so a
//! topological sort yields dependencies first. A reference to a resource not
//! yet in the graph is refused, which keeps insertion order equal to
//! creation order.

use std::collections::HashMap;

use petgraph::graph::{Graph, NodeIndex};
use sitestack_common::error::{Result, SitestackError};
use sitestack_common::types::LogicalId;

use crate::resource::cdn::Distribution;
use crate::resource::dns::DomainRecord;
use crate::resource::pipeline::{BuildProject, Pipeline};
use crate::resource::storage::SiteStorage;
use crate::resource::{Resource, ResourceKind};

/// A dependency graph of resources.
#[derive(Debug, Default)]
pub struct ResourceGraph {
    /// Internal petgraph representation; node weights are resources.
    graph: Graph<Resource, ()>,
    /// Logical id to node lookup.
    index: HashMap<LogicalId, NodeIndex>,
}

impl ResourceGraph {
    /// Creates an empty resource graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource and an edge for each of its dependencies.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateResource` if the logical id is taken, or `NotFound`
    /// if a dependency has not been added yet. The graph is unchanged on error.
    pub fn add(&mut self, resource: Resource) -> Result<NodeIndex> {
        let id = resource.logical_id().clone();
        if self.index.contains_key(&id) {
            return Err(SitestackError::DuplicateResource { id: id.to_string() });
        }

        let dependencies = resource
            .dependencies()
            .into_iter()
            .map(|dep| {
                self.index
                    .get(dep)
                    .copied()
                    .ok_or_else(|| SitestackError::NotFound {
                        kind: "resource",
                        id: format!("{dep} (referenced by {id})"),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(id = %id, kind = %resource.kind(), "adding resource");
        let node = self.graph.add_node(resource);
        for dependency in dependencies {
            let _ = self.graph.add_edge(dependency, node, ());
        }
        let _ = self.index.insert(id, node);
        Ok(node)
    }

    /// Looks up a resource by logical id.
    #[must_use]
    pub fn get(&self, id: &LogicalId) -> Option<&Resource> {
        self.index
            .get(id)
            .and_then(|&node| self.graph.node_weight(node))
    }

    /// Number of resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns `true` if the graph holds no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Resources in insertion order.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.graph.node_weights()
    }

    /// Number of resources of a kind.
    #[must_use]
    pub fn count(&self, kind: ResourceKind) -> usize {
        self.resources().filter(|r| r.kind() == kind).count()
    }

    /// Logical ids a resource depends on.
    #[must_use]
    pub fn dependencies_of(&self, id: &LogicalId) -> Vec<&LogicalId> {
        let Some(&node) = self.index.get(id) else {
            return Vec::new();
        };
        let mut deps: Vec<&LogicalId> = self
            .graph
            .neighbors_directed(node, petgraph::Direction::Incoming)
            .filter_map(|n| self.graph.node_weight(n).map(Resource::logical_id))
            .collect();
        deps.sort();
        deps
    }

    /// Returns the resources in creation order: dependencies first.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph contains cycles.
    pub fn resolve_order(&self) -> Result<Vec<&Resource>> {
        match petgraph::algo::toposort(&self.graph, None) {
            Ok(indices) => Ok(indices
                .into_iter()
                .filter_map(|idx| self.graph.node_weight(idx))
                .collect()),
            Err(cycle) => Err(SitestackError::CyclicDependency {
                id: self
                    .graph
                    .node_weight(cycle.node_id())
                    .map_or_else(String::new, |r| r.logical_id().to_string()),
            }),
        }
    }

    /// All site storages.
    pub fn storages(&self) -> impl Iterator<Item = &SiteStorage> {
        self.resources().filter_map(|r| match r {
            Resource::Storage(s) => Some(s),
            _ => None,
        })
    }

    /// All build projects.
    pub fn build_projects(&self) -> impl Iterator<Item = &BuildProject> {
        self.resources().filter_map(|r| match r {
            Resource::BuildProject(p) => Some(p),
            _ => None,
        })
    }

    /// All pipelines.
    pub fn pipelines(&self) -> impl Iterator<Item = &Pipeline> {
        self.resources().filter_map(|r| match r {
            Resource::Pipeline(p) => Some(p),
            _ => None,
        })
    }

    /// All alias records.
    pub fn records(&self) -> impl Iterator<Item = &DomainRecord> {
        self.resources().filter_map(|r| match r {
            Resource::Record(d) => Some(d),
            _ => None,
        })
    }

    /// All distributions.
    pub fn distributions(&self) -> impl Iterator<Item = &Distribution> {
        self.resources().filter_map(|r| match r {
            Resource::Distribution(d) => Some(d),
            _ => None,
        })
    }
}
