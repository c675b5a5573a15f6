//! Resource descriptors: the declarative output of a resolution pass.
//!
//! A descriptor is one unit of desired state (a file, a package, a service
//! or an auxiliary repository) plus the ordering edges the apply engine
//! must honour. Descriptors are immutable once built.

use serde::Serialize;
use std::fmt;
use strum::Display;

use crate::types::{AuxRepo, BoolLike, ServiceState};

/// Resource type, used to address descriptors in edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Repository,
    Package,
    File,
    Service,
}

/// Apply stage a descriptor belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Repository,
    Install,
    Config,
    Service,
}

/// Address of a descriptor: `file[/etc/sysconfig/docker]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub title: String,
}

impl ResourceRef {
    pub fn new(kind: ResourceKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.kind, self.title)
    }
}

/// Relationship from the owning descriptor to `target`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Owner is applied before the target
    Before,
    /// Owner is applied after the target and refreshed when it changes
    Subscribe,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub kind: EdgeKind,
    pub target: ResourceRef,
}

/// The desired state carried by a descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResourceBody {
    Repository {
        name: AuxRepo,
    },
    Package {
        name: String,
        ensure: String,
    },
    File {
        path: String,
        content: String,
    },
    Service {
        name: String,
        ensure: ServiceState,
        enable: BoolLike,
    },
}

/// A single resource descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub stage: Stage,
    #[serde(flatten)]
    pub body: ResourceBody,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<Edge>,
}

impl Resource {
    pub fn repository(name: AuxRepo) -> Self {
        Self::new(Stage::Repository, ResourceBody::Repository { name })
    }

    pub fn package(name: impl Into<String>, ensure: impl Into<String>) -> Self {
        Self::new(
            Stage::Install,
            ResourceBody::Package {
                name: name.into(),
                ensure: ensure.into(),
            },
        )
    }

    pub fn file(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(
            Stage::Config,
            ResourceBody::File {
                path: path.into(),
                content: content.into(),
            },
        )
    }

    pub fn service(name: impl Into<String>, ensure: ServiceState, enable: BoolLike) -> Self {
        Self::new(
            Stage::Service,
            ResourceBody::Service {
                name: name.into(),
                ensure,
                enable,
            },
        )
    }

    fn new(stage: Stage, body: ResourceBody) -> Self {
        Self {
            stage,
            body,
            edges: Vec::new(),
        }
    }

    /// Add an edge to `target`
    pub fn with_edge(mut self, kind: EdgeKind, target: ResourceRef) -> Self {
        self.edges.push(Edge { kind, target });
        self
    }

    pub fn kind(&self) -> ResourceKind {
        match self.body {
            ResourceBody::Repository { .. } => ResourceKind::Repository,
            ResourceBody::Package { .. } => ResourceKind::Package,
            ResourceBody::File { .. } => ResourceKind::File,
            ResourceBody::Service { .. } => ResourceKind::Service,
        }
    }

    pub fn title(&self) -> String {
        match &self.body {
            ResourceBody::Repository { name } => name.to_string(),
            ResourceBody::Package { name, .. } => name.clone(),
            ResourceBody::File { path, .. } => path.clone(),
            ResourceBody::Service { name, .. } => name.clone(),
        }
    }

    pub fn reference(&self) -> ResourceRef {
        ResourceRef::new(self.kind(), self.title())
    }

    /// File content, if this is a file descriptor
    pub fn content(&self) -> Option<&str> {
        match &self.body {
            ResourceBody::File { content, .. } => Some(content),
            _ => None,
        }
    }
}

/// Lookup helpers over a resolved descriptor list.
pub trait ResourceSet {
    /// Find a descriptor by kind and title
    fn find(&self, kind: ResourceKind, title: &str) -> Option<&Resource>;

    /// Content of the file at `path`
    fn file_content(&self, path: &str) -> Option<&str> {
        self.find(ResourceKind::File, path).and_then(Resource::content)
    }

    /// The single package descriptor, if any
    fn package(&self) -> Option<&Resource>;

    /// The single service descriptor, if any
    fn service(&self) -> Option<&Resource>;
}

impl ResourceSet for [Resource] {
    fn find(&self, kind: ResourceKind, title: &str) -> Option<&Resource> {
        self.iter().find(|r| r.kind() == kind && r.title() == title)
    }

    fn package(&self) -> Option<&Resource> {
        self.iter().find(|r| r.kind() == ResourceKind::Package)
    }

    fn service(&self) -> Option<&Resource> {
        self.iter().find(|r| r.kind() == ResourceKind::Service)
    }
}
