//! Docker Configuration Resolver
//!
//! Translates a parameter set and the target's OS facts into resource
//! descriptors: an optional auxiliary repository, the package, the rendered
//! config files and the service.
//!
//! # Design
//!
//! - **Pure logic**: No I/O, no side effects — only builds descriptors
//! - **All-or-nothing**: Validation runs before anything is built
//! - **Deterministic**: Fixed output order (repository, package, files, service)
//!
//! # Ordering Edges
//!
//! | From       | Edge      | To           |
//! |------------|-----------|--------------|
//! | repository | before    | package      |
//! | package    | before    | every file   |
//! | service    | subscribe | every file   |

use tracing::{debug, info};

use crate::config_file::DockerParams;
use crate::error::Result;
use crate::facts::Facts;
use crate::platform::{self, PlatformPolicy};
use crate::render;
use crate::resource::{EdgeKind, Resource, ResourceRef};
use crate::types::PackageEnsure;

/// Resolve parameters and facts into the full descriptor list.
///
/// # Errors
///
/// - `Validation` when an enumerated parameter is out of range (e.g. log_level)
/// - `UnsupportedPlatform` when no platform policy matches the facts
///
/// Nothing is returned on error; there is no partial output.
pub fn resolve(params: &DockerParams, facts: &Facts) -> Result<Vec<Resource>> {
    params.validate()?;
    let log_level = params.log_level()?;

    let policy = platform::lookup(facts, params.use_upstream_package_source)?;
    debug!(
        "Platform {} {} (major {}) -> package {}, aux repo {:?}",
        facts.osfamily,
        facts.operatingsystem,
        facts.major_release(),
        policy.package,
        policy.aux_repo
    );

    let files = config_files(params, log_level, &policy);
    let file_refs: Vec<ResourceRef> = files.iter().map(Resource::reference).collect();

    let mut resources = Vec::with_capacity(files.len() + 3);

    if params.manage_package {
        let name = params.package_name.as_deref().unwrap_or(&policy.package);
        let package = file_refs.iter().fold(
            Resource::package(name, params.package_ensure()),
            |pkg, file| pkg.with_edge(EdgeKind::Before, file.clone()),
        );

        // No point enabling a repository for a package being removed
        if params.ensure != PackageEnsure::Absent {
            if let Some(repo) = policy.aux_repo {
                resources.push(Resource::repository(repo).with_edge(EdgeKind::Before, package.reference()));
            }
        }
        resources.push(package);
    }

    let service = file_refs.iter().fold(
        Resource::service(
            &params.service_name,
            params.service_state,
            params.service_enable.clone(),
        ),
        |svc, file| svc.with_edge(EdgeKind::Subscribe, file.clone()),
    );

    resources.extend(files);
    resources.push(service);

    info!(
        "Resolved {} resources for {} {}",
        resources.len(),
        facts.operatingsystem,
        facts.operatingsystemrelease
    );

    Ok(resources)
}

fn config_files(
    params: &DockerParams,
    log_level: Option<crate::types::LogLevel>,
    policy: &PlatformPolicy,
) -> Vec<Resource> {
    let layout = &policy.layout;
    let mut files = vec![Resource::file(
        layout.service_config,
        render::service_config(params, log_level, layout),
    )];

    if let Some(path) = layout.storage_config {
        files.push(Resource::file(path, render::storage_config(params, path)));
    }

    files
}
