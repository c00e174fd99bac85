//! # sitestack-compose
//!
//! Assembles the resource graph that hosts a static website.
//!
//! Handles:
//! - **Resource**: Typed descriptors for storage, pipeline, DNS records and CDN.
//! - **Graph**: Dependency graph of resources and topological resolution.
//! - **Assembler**: The storage, pipeline, domain and CDN assemblers.
//! - **Site**: The one-shot composer that runs the assemblers in order.
//! - **Validator**: Configuration checks performed before composing.
//! - **Zone**: Resolution of zone references in configuration documents.
//! - **Template**: Rendering a composed site as a `CloudFormation` template.

pub mod assembler;
pub mod graph;
pub mod resource;
pub mod site;
pub mod template;
pub mod validator;
pub mod zone;

pub use site::StaticSite;
