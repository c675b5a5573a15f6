//! Platform policy table.
//!
//! Maps (osfamily, operatingsystem, major release) to the package name,
//! auxiliary repository and config file locations for that platform.
//! Rows are matched top to bottom; the first match wins, so more specific
//! rows come first.
//!
//! | Family    | Distribution | Min major | Package   | Aux repo |
//! |-----------|--------------|-----------|-----------|----------|
//! | RedHat    | Fedora       | 21        | docker    | -        |
//! | RedHat    | Fedora       | 0         | docker-io | epel     |
//! | RedHat    | Amazon       | 0         | docker    | -        |
//! | RedHat    | any          | 7         | docker    | -        |
//! | RedHat    | any          | 0         | docker-io | epel     |
//! | Debian    | any          | 0         | docker.io | -        |
//! | Archlinux | any          | 0         | docker    | -        |
//!
//! Debian switches to `lxc-docker` from the upstream `docker` apt source
//! when `use_upstream_package_source` is set.

use std::str::FromStr;

use crate::error::{DockerConfError, Result};
use crate::facts::Facts;
use crate::types::{AuxRepo, OsFamily};

/// Where the daemon options and storage options live on a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigLayout {
    /// File holding the daemon options line and environment
    pub service_config: &'static str,
    /// Variable the options line is assigned to
    pub options_var: &'static str,
    /// Separate storage options file, if the platform has one
    pub storage_config: Option<&'static str>,
}

const SYSCONFIG: ConfigLayout = ConfigLayout {
    service_config: "/etc/sysconfig/docker",
    options_var: "other_args",
    storage_config: Some("/etc/sysconfig/docker-storage"),
};

const DEFAULT_FILE: ConfigLayout = ConfigLayout {
    service_config: "/etc/default/docker",
    options_var: "DOCKER_OPTS",
    storage_config: None,
};

const CONF_D: ConfigLayout = ConfigLayout {
    service_config: "/etc/conf.d/docker",
    options_var: "DOCKER_OPTS",
    storage_config: None,
};

/// One row of the policy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformRule {
    pub family: OsFamily,
    /// `None` matches any distribution in the family
    pub distribution: Option<&'static str>,
    pub min_major: u32,
    pub package: &'static str,
    pub aux_repo: Option<AuxRepo>,
    pub layout: ConfigLayout,
}

impl PlatformRule {
    fn matches(&self, family: OsFamily, distribution: &str, major: u32) -> bool {
        self.family == family
            && self.distribution.is_none_or(|d| d == distribution)
            && major >= self.min_major
    }
}

/// The policy table, most specific rows first.
pub const PLATFORM_RULES: &[PlatformRule] = &[
    PlatformRule {
        family: OsFamily::RedHat,
        distribution: Some("Fedora"),
        min_major: 21,
        package: "docker",
        aux_repo: None,
        layout: SYSCONFIG,
    },
    PlatformRule {
        family: OsFamily::RedHat,
        distribution: Some("Fedora"),
        min_major: 0,
        package: "docker-io",
        aux_repo: Some(AuxRepo::Epel),
        layout: SYSCONFIG,
    },
    PlatformRule {
        family: OsFamily::RedHat,
        distribution: Some("Amazon"),
        min_major: 0,
        package: "docker",
        aux_repo: None,
        layout: SYSCONFIG,
    },
    PlatformRule {
        family: OsFamily::RedHat,
        distribution: None,
        min_major: 7,
        package: "docker",
        aux_repo: None,
        layout: SYSCONFIG,
    },
    PlatformRule {
        family: OsFamily::RedHat,
        distribution: None,
        min_major: 0,
        package: "docker-io",
        aux_repo: Some(AuxRepo::Epel),
        layout: SYSCONFIG,
    },
    PlatformRule {
        family: OsFamily::Debian,
        distribution: None,
        min_major: 0,
        package: "docker.io",
        aux_repo: None,
        layout: DEFAULT_FILE,
    },
    PlatformRule {
        family: OsFamily::Archlinux,
        distribution: None,
        min_major: 0,
        package: "docker",
        aux_repo: None,
        layout: CONF_D,
    },
];

/// Package name used with the upstream Docker apt source
pub const UPSTREAM_DEBIAN_PACKAGE: &str = "lxc-docker";

/// The resolved policy for a concrete set of facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformPolicy {
    pub family: OsFamily,
    pub package: String,
    pub aux_repo: Option<AuxRepo>,
    pub layout: ConfigLayout,
}

/// Look up the platform policy for the given facts.
///
/// `use_upstream_package_source` only affects the Debian family.
///
/// # Errors
///
/// Returns `UnsupportedPlatform` when the family is unknown or no row matches.
pub fn lookup(facts: &Facts, use_upstream_package_source: bool) -> Result<PlatformPolicy> {
    let unsupported =
        || DockerConfError::unsupported_platform(&facts.osfamily, &facts.operatingsystem);

    let family = OsFamily::from_str(&facts.osfamily).map_err(|_| unsupported())?;
    let major = facts.major_release();

    let rule = PLATFORM_RULES
        .iter()
        .find(|r| r.matches(family, &facts.operatingsystem, major))
        .ok_or_else(unsupported)?;

    let mut policy = PlatformPolicy {
        family,
        package: rule.package.to_string(),
        aux_repo: rule.aux_repo,
        layout: rule.layout,
    };

    if family == OsFamily::Debian && use_upstream_package_source {
        policy.package = UPSTREAM_DEBIAN_PACKAGE.to_string();
        policy.aux_repo = Some(AuxRepo::Docker);
    }

    Ok(policy)
}
