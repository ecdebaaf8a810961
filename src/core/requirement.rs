//! Requirements on external packages.
//!
//! A requirement names a package, an optional version and the scope it is
//! needed in. `(name, scope)` is the identity of a requirement inside a
//! manifest; the version is not part of it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a requirement is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementScope {
    /// Linked into or shipped with the package.
    Runtime,
    /// Only needed to build or test the package.
    #[serde(alias = "test")]
    Build,
}

impl RequirementScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequirementScope::Runtime => "runtime",
            RequirementScope::Build => "build",
        }
    }
}

impl fmt::Display for RequirementScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RequirementScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "runtime" => Ok(RequirementScope::Runtime),
            "build" | "test" => Ok(RequirementScope::Build),
            _ => Err(format!(
                "invalid requirement scope '{}'; expected 'runtime', 'build', or 'test'",
                s
            )),
        }
    }
}

/// A declared dependency on an external package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Requirement {
    name: String,

    /// `None` leaves the choice to the resolver.
    version: Option<String>,

    scope: RequirementScope,
}

impl Requirement {
    pub fn new(name: impl Into<String>, version: Option<String>, scope: RequirementScope) -> Self {
        Requirement {
            name: name.into(),
            version,
            scope,
        }
    }

    /// Parse a `name` or `name/version` reference.
    pub fn parse_reference(reference: &str, scope: RequirementScope) -> Result<Self, String> {
        let reference = reference.trim();

        let (name, version) = match reference.split_once('/') {
            Some((name, version)) => (name.trim(), Some(version.trim())),
            None => (reference, None),
        };

        validate_name(name)?;

        if let Some(version) = version {
            validate_version(version)
                .map_err(|reason| format!("reference `{}`: {}", reference, reason))?;
        }

        Ok(Requirement::new(name, version.map(str::to_string), scope))
    }

    /// Check the name and version, however the requirement was built.
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        if let Some(version) = &self.version {
            validate_version(version)
                .map_err(|reason| format!("requirement `{}`: {}", self.name, reason))?;
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn scope(&self) -> RequirementScope {
        self.scope
    }

    /// Check if two requirements occupy the same `(name, scope)` slot.
    pub fn same_slot(&self, other: &Requirement) -> bool {
        self.name == other.name && self.scope == other.scope
    }

    /// Render as a `name/version` reference.
    pub fn reference(&self) -> String {
        match &self.version {
            Some(version) => format!("{}/{}", self.name, version),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.reference(), self.scope)
    }
}

/// Check that a package name is usable in a reference.
fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("requirement name cannot be empty".to_string());
    }

    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')))
    {
        return Err(format!(
            "requirement name `{}` contains invalid character `{}`",
            name, c
        ));
    }

    Ok(())
}

/// Check that a version is usable in a reference.
fn validate_version(version: &str) -> Result<(), String> {
    if version.is_empty() {
        return Err("version cannot be empty".to_string());
    }

    if version.chars().any(char::is_whitespace) || version.contains('/') {
        return Err(format!("invalid version `{}`", version));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_with_version() {
        let req = Requirement::parse_reference("gtest/1.14.0", RequirementScope::Build).unwrap();
        assert_eq!(req.name(), "gtest");
        assert_eq!(req.version(), Some("1.14.0"));
        assert_eq!(req.scope(), RequirementScope::Build);
        assert_eq!(req.reference(), "gtest/1.14.0");
    }

    #[test]
    fn test_parse_reference_without_version() {
        let req = Requirement::parse_reference("zlib", RequirementScope::Runtime).unwrap();
        assert_eq!(req.name(), "zlib");
        assert_eq!(req.version(), None);
        assert_eq!(req.reference(), "zlib");
    }

    #[test]
    fn test_parse_reference_rejects_malformed() {
        assert!(Requirement::parse_reference("", RequirementScope::Runtime).is_err());
        assert!(Requirement::parse_reference("/1.0", RequirementScope::Runtime).is_err());
        assert!(Requirement::parse_reference("zlib/", RequirementScope::Runtime).is_err());
        assert!(Requirement::parse_reference("zlib/1.0/extra", RequirementScope::Runtime).is_err());
        assert!(Requirement::parse_reference("my lib/1.0", RequirementScope::Runtime).is_err());
    }

    #[test]
    fn test_version_range_is_kept_verbatim() {
        let req =
            Requirement::parse_reference("fmt/[>=10.0 <11]", RequirementScope::Runtime);
        assert!(req.is_err(), "whitespace is not allowed inside a reference");

        let req = Requirement::parse_reference("fmt/[>=10.0]", RequirementScope::Runtime).unwrap();
        assert_eq!(req.version(), Some("[>=10.0]"));
    }

    #[test]
    fn test_same_slot_ignores_version() {
        let a = Requirement::new("gtest", Some("1.14.0".into()), RequirementScope::Build);
        let b = Requirement::new("gtest", Some("1.13.0".into()), RequirementScope::Build);
        let c = Requirement::new("gtest", None, RequirementScope::Runtime);
        assert!(a.same_slot(&b));
        assert!(!a.same_slot(&c));
    }

    #[test]
    fn test_scope_from_str() {
        assert_eq!("runtime".parse::<RequirementScope>(), Ok(RequirementScope::Runtime));
        assert_eq!("test".parse::<RequirementScope>(), Ok(RequirementScope::Build));
        assert_eq!("Build".parse::<RequirementScope>(), Ok(RequirementScope::Build));
        assert!("dev".parse::<RequirementScope>().is_err());
    }
}
