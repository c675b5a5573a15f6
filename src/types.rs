//! Type-safe parameter types for dockerconf
//!
//! Enumerated parameters are proper Rust enums with strum string forms that
//! match the values accepted in parameter files.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Docker daemon log level (`-l <level>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    /// Human-readable list of accepted values: "debug, info, warn, error or fatal"
    pub fn allowed_values() -> String {
        let names: Vec<String> = Self::iter().map(|l| l.to_string()).collect();
        match names.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
            Some((last, _)) => last.clone(),
            None => String::new(),
        }
    }
}

/// Desired package state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PackageEnsure {
    #[default]
    Present,
    Absent,
    Latest,
}

/// Desired service lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    #[default]
    Running,
    Stopped,
}

/// Supported operating system families (the `osfamily` fact)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum OsFamily {
    RedHat,
    Debian,
    Archlinux,
}

/// Auxiliary repository component that must be enabled before the package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AuxRepo {
    /// Extra Packages for Enterprise Linux
    Epel,
    /// Upstream Docker apt source
    Docker,
}

/// A boolean given either as a real bool or as a `'true'`/`'false'` string.
///
/// The original spelling is kept so it can be passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoolLike {
    Bool(bool),
    Text(String),
}

impl Default for BoolLike {
    fn default() -> Self {
        Self::Bool(true)
    }
}

impl fmt::Display for BoolLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for BoolLike {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for BoolLike {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A parameter that accepts a single string or an ordered list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Iterate the values in their given order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let items = match self {
            Self::One(s) => std::slice::from_ref(s),
            Self::Many(v) => v.as_slice(),
        };
        items.iter().map(String::as_str)
    }
}

impl From<&str> for OneOrMany {
    fn from(s: &str) -> Self {
        Self::One(s.to_string())
    }
}

impl From<Vec<&str>> for OneOrMany {
    fn from(v: Vec<&str>) -> Self {
        Self::Many(v.into_iter().map(str::to_string).collect())
    }
}
