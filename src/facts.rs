//! OS identification facts supplied by the execution environment.
//!
//! The resolver only reads these; it never discovers or mutates them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The facts that identify the target machine's operating system.
/// Unrelated facts in the input are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Facts {
    pub osfamily: String,
    pub operatingsystem: String,
    #[serde(default)]
    pub operatingsystemrelease: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operatingsystemmajrelease: Option<String>,
}

impl Facts {
    pub fn new(
        osfamily: impl Into<String>,
        operatingsystem: impl Into<String>,
        operatingsystemrelease: impl Into<String>,
    ) -> Self {
        Self {
            osfamily: osfamily.into(),
            operatingsystem: operatingsystem.into(),
            operatingsystemrelease: operatingsystemrelease.into(),
            operatingsystemmajrelease: None,
        }
    }

    /// Set the explicit major release fact
    pub fn with_majrelease(mut self, major: impl Into<String>) -> Self {
        self.operatingsystemmajrelease = Some(major.into());
        self
    }

    /// The major release number.
    ///
    /// Prefers `operatingsystemmajrelease`; otherwise takes the leading
    /// integer of `operatingsystemrelease` ("21.0" -> 21). Unparseable
    /// releases yield 0; oversized ones saturate at `u32::MAX`.
    pub fn major_release(&self) -> u32 {
        self.operatingsystemmajrelease
            .as_deref()
            .and_then(leading_integer)
            .or_else(|| leading_integer(&self.operatingsystemrelease))
            .unwrap_or(0)
    }

    /// Load facts from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read facts from {:?}", path.as_ref()))?;

        let facts: Self = serde_json::from_str(&content).context("Failed to parse facts JSON")?;

        Ok(facts)
    }
}

/// Leading decimal integer; saturates at `u32::MAX` when it overflows.
fn leading_integer(s: &str) -> Option<u32> {
    let digits: String = s.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_release_from_release() {
        assert_eq!(Facts::new("RedHat", "Fedora", "21.0").major_release(), 21);
        assert_eq!(Facts::new("RedHat", "RedHat", "6.5").major_release(), 6);
        assert_eq!(Facts::new("Debian", "Ubuntu", "14.04").major_release(), 14);
    }

    #[test]
    fn test_major_release_prefers_majrelease_fact() {
        let facts = Facts::new("RedHat", "RedHat", "7.0").with_majrelease("7");
        assert_eq!(facts.major_release(), 7);

        let facts = Facts::new("RedHat", "RedHat", "6.5").with_majrelease("7");
        assert_eq!(facts.major_release(), 7);
    }

    #[test]
    fn test_major_release_unparseable() {
        assert_eq!(Facts::new("Archlinux", "Archlinux", "rolling").major_release(), 0);
        assert_eq!(Facts::new("Archlinux", "Archlinux", "").major_release(), 0);
        let facts = Facts::new("RedHat", "RedHat", "7.1").with_majrelease("n/a");
        assert_eq!(facts.major_release(), 7);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facts.json");
        fs::write(
            &path,
            r#"{"osfamily":"RedHat","operatingsystem":"OracleLinux","operatingsystemrelease":"7.0","operatingsystemmajrelease":"7"}"#,
        )
        .unwrap();

        let facts = Facts::load_from_file(&path).unwrap();
        assert_eq!(facts.operatingsystem, "OracleLinux");
        assert_eq!(facts.major_release(), 7);
    }

    #[test]
    fn test_major_release_overflow_saturates() {
        let facts = Facts::new("RedHat", "Fedora", "99999999999.0");
        assert_eq!(facts.major_release(), u32::MAX);

        let facts = Facts::new("RedHat", "RedHat", "7.0").with_majrelease("99999999999");
        assert_eq!(facts.major_release(), u32::MAX);
    }

    #[test]
    fn test_extra_facts_ignored() {
        let facts: Facts = serde_json::from_str(
            r#"{"osfamily":"Debian","operatingsystem":"Ubuntu","operatingsystemrelease":"14.04","kernel":"Linux"}"#,
        )
        .unwrap();
        assert_eq!(facts.osfamily, "Debian");
        assert!(facts.operatingsystemmajrelease.is_none());
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Facts::load_from_file(dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read facts"));
    }
}
