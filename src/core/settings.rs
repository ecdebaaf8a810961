//! Settings axes and the values bound to them.
//!
//! A recipe only declares *which* axes matter (`os`, `compiler`, ...).
//! Concrete values are supplied at invocation time, from host detection,
//! config files and `-s axis=value` flags, and bound to the declared axes
//! by [`SettingValues::bind`].

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operating system axis.
pub const OS: &str = "os";
/// Compiler axis.
pub const COMPILER: &str = "compiler";
/// Build type axis (Debug, Release, ...).
pub const BUILD_TYPE: &str = "build_type";
/// Architecture axis.
pub const ARCH: &str = "arch";

/// Axes every package manager understands out of the box.
pub const WELL_KNOWN_AXES: &[&str] = &[OS, COMPILER, BUILD_TYPE, ARCH];

/// Build type assumed when nothing binds `build_type`.
pub const DEFAULT_BUILD_TYPE: &str = "Release";

/// A named dimension of build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsAxis(String);

impl SettingsAxis {
    pub fn new(name: impl Into<String>) -> Self {
        SettingsAxis(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is one of the [`WELL_KNOWN_AXES`].
    pub fn is_well_known(&self) -> bool {
        WELL_KNOWN_AXES.contains(&self.0.as_str())
    }
}

impl fmt::Display for SettingsAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for SettingsAxis {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SettingsAxis {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SettingsAxis {
    fn from(s: &str) -> Self {
        SettingsAxis::new(s)
    }
}

impl From<String> for SettingsAxis {
    fn from(s: String) -> Self {
        SettingsAxis(s)
    }
}

/// Error in a `-s axis=value` flag.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum SettingsError {
    #[error("invalid setting `{flag}`: expected `axis=value`")]
    #[diagnostic(
        code(recipe::settings::invalid_flag),
        help("Pass settings as `-s build_type=Debug`")
    )]
    InvalidFlag { flag: String },
}

/// Parse a single `axis=value` flag.
pub fn parse_setting_flag(flag: &str) -> Result<(String, String), SettingsError> {
    let invalid = || SettingsError::InvalidFlag {
        flag: flag.to_string(),
    };

    let (axis, value) = flag.split_once('=').ok_or_else(invalid)?;
    let axis = axis.trim();
    let value = value.trim();

    if axis.is_empty() || value.is_empty() {
        return Err(invalid());
    }

    Ok((axis.to_string(), value.to_string()))
}

/// Values detected from the running host.
///
/// Only `os`, `arch` and `build_type` are detected; the compiler is left
/// for config files or flags.
pub fn host_defaults() -> BTreeMap<String, String> {
    let os = match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "Macos",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        "android" => "Android",
        "ios" => "iOS",
        other => other,
    };

    let arch = match std::env::consts::ARCH {
        "aarch64" => "armv8",
        "arm" => "armv7",
        "powerpc64" => "ppc64",
        other => other,
    };

    let mut values = BTreeMap::new();
    values.insert(OS.to_string(), os.to_string());
    values.insert(ARCH.to_string(), arch.to_string());
    values.insert(BUILD_TYPE.to_string(), DEFAULT_BUILD_TYPE.to_string());
    values
}

/// A declared axis together with the value bound to it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundSetting {
    pub axis: SettingsAxis,
    pub value: Option<String>,
}

/// Concrete values for the axes a manifest declares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SettingValues {
    bound: Vec<BoundSetting>,
}

impl SettingValues {
    /// Bind values to `axes`.
    ///
    /// `layers` are applied in order, so later layers win. Values for axes
    /// the manifest does not declare are dropped.
    pub fn bind<'a, L>(axes: &[SettingsAxis], layers: L) -> Self
    where
        L: IntoIterator<Item = &'a BTreeMap<String, String>>,
    {
        let mut bound: Vec<BoundSetting> = axes
            .iter()
            .map(|axis| BoundSetting {
                axis: axis.clone(),
                value: None,
            })
            .collect();

        for layer in layers {
            for (axis, value) in layer {
                match bound.iter_mut().find(|b| b.axis.as_str() == axis) {
                    Some(slot) => slot.value = Some(value.clone()),
                    None => tracing::debug!("ignoring value for undeclared axis `{}`", axis),
                }
            }
        }

        SettingValues { bound }
    }

    /// Get the value bound to an axis.
    pub fn get(&self, axis: &str) -> Option<&str> {
        self.bound
            .iter()
            .find(|b| b.axis.as_str() == axis)
            .and_then(|b| b.value.as_deref())
    }

    /// Declared axes that received no value.
    pub fn missing(&self) -> Vec<&SettingsAxis> {
        self.bound
            .iter()
            .filter(|b| b.value.is_none())
            .map(|b| &b.axis)
            .collect()
    }

    /// The bound build type, or [`DEFAULT_BUILD_TYPE`].
    pub fn build_type(&self) -> &str {
        self.get(BUILD_TYPE).unwrap_or(DEFAULT_BUILD_TYPE)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundSetting> {
        self.bound.iter()
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}
