//! Parameter file handling for saving and loading Docker parameters.
//!
//! Parameters are deserialized with static types; unset parameters take
//! their defaults. Enumerated values that need a descriptive error (the
//! log level) are kept as raw strings and checked by [`DockerParams::validate`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::DockerConfError;
use crate::types::{BoolLike, LogLevel, OneOrMany, PackageEnsure, ServiceState};

/// Default Docker socket bind address
pub const DEFAULT_SOCKET_BIND: &str = "unix:///var/run/docker.sock";

/// Default managed service name
pub const DEFAULT_SERVICE_NAME: &str = "docker";

/// Docker module parameters that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DockerParams {
    // Package
    pub ensure: PackageEnsure,
    pub version: Option<String>,
    pub package_name: Option<String>,
    pub manage_package: bool,
    pub use_upstream_package_source: bool,

    // Daemon options
    pub tmp_dir: Option<String>,
    pub root_dir: Option<String>,
    pub tcp_bind: Option<String>,
    pub socket_bind: String,
    pub socket_group: Option<String>,
    pub storage_driver: Option<String>,
    pub execdriver: Option<String>,
    pub dns: Option<OneOrMany>,
    pub dns_search: Option<OneOrMany>,
    pub extra_parameters: Option<OneOrMany>,
    pub log_level: Option<String>, // Checked against LogLevel in validate()
    pub selinux_enabled: Option<bool>,
    pub proxy: Option<String>,
    pub no_proxy: Option<String>,

    // Service
    pub service_name: String,
    pub service_state: ServiceState,
    pub service_enable: BoolLike,
}

impl DockerParams {
    /// Create a parameter set with every parameter at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Save parameters to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize parameters to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write parameters to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load parameters from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read parameters from {:?}", path.as_ref()))?;

        let params: Self =
            serde_json::from_str(&content).context("Failed to parse parameters JSON")?;

        Ok(params)
    }

    /// The parsed log level, if one was given.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the allowed set when the value is
    /// not one of the known levels.
    pub fn log_level(&self) -> crate::error::Result<Option<LogLevel>> {
        self.log_level
            .as_deref()
            .map(|raw| {
                LogLevel::from_str(raw).map_err(|_| {
                    DockerConfError::validation(format!(
                        "log_level must be one of {}",
                        LogLevel::allowed_values()
                    ))
                })
            })
            .transpose()
    }

    /// Validate the parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        self.log_level()?;

        if let BoolLike::Text(raw) = &self.service_enable {
            if raw != "true" && raw != "false" {
                return Err(DockerConfError::validation("service_enable must be true or false"));
            }
        }

        // Rendered inside "..." in the options and storage files
        let double_quoted = [
            ("tmp_dir", self.tmp_dir.as_deref()),
            ("root_dir", self.root_dir.as_deref()),
            ("tcp_bind", self.tcp_bind.as_deref()),
            ("socket_bind", Some(self.socket_bind.as_str())),
            ("socket_group", self.socket_group.as_deref()),
            ("storage_driver", self.storage_driver.as_deref()),
            ("execdriver", self.execdriver.as_deref()),
        ];
        for (name, value) in double_quoted {
            reject_quote(name, value.into_iter(), '"')?;
        }
        for (name, values) in [
            ("dns", &self.dns),
            ("dns_search", &self.dns_search),
            ("extra_parameters", &self.extra_parameters),
        ] {
            if let Some(values) = values {
                reject_quote(name, values.iter(), '"')?;
            }
        }

        // Rendered inside '...' in the proxy export lines
        reject_quote("proxy", self.proxy.as_deref().into_iter(), '\'')?;
        reject_quote("no_proxy", self.no_proxy.as_deref().into_iter(), '\'')?;

        if self.service_name.trim().is_empty() {
            return Err(DockerConfError::validation("service_name must not be empty"));
        }
        if let Some(name) = &self.package_name {
            if name.trim().is_empty() {
                return Err(DockerConfError::validation("package_name must not be empty"));
            }
        }
        if let Some(version) = &self.version {
            if version.trim().is_empty() {
                return Err(DockerConfError::validation("version must not be empty"));
            }
        }

        Ok(())
    }

    /// The package ensure-state handed to the package resource.
    ///
    /// A pinned `version` replaces `present`/`latest`; `absent` always wins.
    pub fn package_ensure(&self) -> String {
        match (self.ensure, &self.version) {
            (PackageEnsure::Absent, _) => PackageEnsure::Absent.to_string(),
            (_, Some(version)) => version.clone(),
            (ensure, None) => ensure.to_string(),
        }
    }
}

fn reject_quote<'a>(
    name: &str,
    mut values: impl Iterator<Item = &'a str>,
    quote: char,
) -> crate::error::Result<()> {
    if values.any(|v| v.contains(quote)) {
        return Err(DockerConfError::validation(format!(
            "{} must not contain the {} character",
            name, quote
        )));
    }
    Ok(())
}

impl Default for DockerParams {
    fn default() -> Self {
        Self {
            ensure: PackageEnsure::Present,
            version: None,
            package_name: None,
            manage_package: true,
            use_upstream_package_source: true,
            tmp_dir: None,
            root_dir: None,
            tcp_bind: None,
            socket_bind: DEFAULT_SOCKET_BIND.to_string(),
            socket_group: None,
            storage_driver: None,
            execdriver: None,
            dns: None,
            dns_search: None,
            extra_parameters: None,
            log_level: None,
            selinux_enabled: None,
            proxy: None,
            no_proxy: None,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            service_state: ServiceState::Running,
            service_enable: BoolLike::Bool(true),
        }
    }
}
