//! dockerconf Library
//!
//! Resolves Docker parameters and OS facts into declarative resource
//! descriptors (files, package, service, auxiliary repository) for an
//! external apply engine.

pub mod cli;
pub mod config_file;
pub mod engine;
pub mod error;
pub mod facts;
pub mod logic;
pub mod platform;
pub mod render;
pub mod resource;
pub mod types;

// Re-export main types for convenience
pub use config_file::DockerParams;
pub use error::{DockerConfError, Result};
pub use facts::Facts;
pub use resource::{Edge, EdgeKind, Resource, ResourceBody, ResourceKind, ResourceRef, ResourceSet, Stage};
pub use types::{AuxRepo, BoolLike, LogLevel, OneOrMany, OsFamily, PackageEnsure, ServiceState};

// Apply ordering engine
pub use engine::order::{apply_order, ApplyPlan};

// Configuration resolver
pub use logic::resolver::resolve;
