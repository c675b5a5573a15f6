//! Config file rendering.
//!
//! Produces the line-oriented text of the daemon options file and the
//! storage options file. Pure string building; nothing is written here.

use std::fmt::Write;

use crate::config_file::DockerParams;
use crate::platform::ConfigLayout;
use crate::types::LogLevel;

/// Build the daemon flags in their fixed order.
///
/// The storage driver flag is only emitted here when the platform has no
/// separate storage options file.
pub fn daemon_flags(
    params: &DockerParams,
    log_level: Option<LogLevel>,
    inline_storage_driver: bool,
) -> Vec<String> {
    let mut flags = Vec::new();

    if let Some(dir) = &params.root_dir {
        flags.push(format!("-g {}", dir));
    }
    if let Some(addr) = &params.tcp_bind {
        flags.push(format!("-H {}", addr));
    }
    if !params.socket_bind.is_empty() {
        flags.push(format!("-H {}", params.socket_bind));
    }
    if let Some(group) = &params.socket_group {
        flags.push(format!("-G {}", group));
    }
    if let Some(dns) = &params.dns {
        flags.extend(dns.iter().map(|addr| format!("--dns {}", addr)));
    }
    if let Some(search) = &params.dns_search {
        flags.extend(search.iter().map(|domain| format!("--dns-search {}", domain)));
    }
    if let Some(driver) = &params.execdriver {
        flags.push(format!("-e {}", driver));
    }
    if let Some(level) = log_level {
        flags.push(format!("-l {}", level));
    }
    if let Some(selinux) = params.selinux_enabled {
        flags.push(format!("--selinux-enabled={}", selinux));
    }
    if inline_storage_driver {
        if let Some(driver) = &params.storage_driver {
            flags.push(format!("--storage-driver={}", driver));
        }
    }
    // Verbatim, spacing included
    if let Some(extra) = &params.extra_parameters {
        flags.extend(extra.iter().map(str::to_string));
    }

    flags
}

/// Render the daemon options file for `layout`.
pub fn service_config(params: &DockerParams, log_level: Option<LogLevel>, layout: &ConfigLayout) -> String {
    let flags = daemon_flags(params, log_level, layout.storage_config.is_none());
    let mut out = String::new();

    // Infallible: writing to a String
    let _ = writeln!(out, "# {}", layout.service_config);
    let _ = writeln!(out, "#");
    let _ = writeln!(out, "# Arguments passed to the docker daemon process.");
    let _ = writeln!(out, "# Managed by dockerconf; local changes will be overwritten.");
    let _ = writeln!(out);
    let _ = writeln!(out, "{}=\"{}\"", layout.options_var, flags.join(" "));
    let _ = writeln!(out, "DOCKER_CERT_PATH=/etc/docker");

    if let Some(tmp) = &params.tmp_dir {
        let _ = writeln!(out, "DOCKER_TMPDIR=\"{}\"", tmp);
    }
    if let Some(proxy) = &params.proxy {
        let _ = writeln!(out, "export http_proxy='{}'", proxy);
        let _ = writeln!(out, "export https_proxy='{}'", proxy);
    }
    if let Some(no_proxy) = &params.no_proxy {
        let _ = writeln!(out, "export no_proxy='{}'", no_proxy);
    }

    out
}

/// Render the storage options file at `path`.
pub fn storage_config(params: &DockerParams, path: &str) -> String {
    let options = params
        .storage_driver
        .as_deref()
        .map(|driver| format!("--storage-driver={}", driver))
        .unwrap_or_default();

    format!(
        "# {}\n# Managed by dockerconf; local changes will be overwritten.\n\nDOCKER_STORAGE_OPTIONS=\"{}\"\n",
        path, options
    )
}
