//! Generator identifiers.
//!
//! A generator names a downstream build-file format (for example the
//! `CMakeDeps` dependency descriptors or the `CMakeToolchain` toolchain
//! file). The evaluator records them; producing the files is up to the
//! build descriptor generator that consumes the manifest.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generators recognized by the common build-file generators.
pub const KNOWN_GENERATORS: &[&str] = &[
    "CMakeDeps",
    "CMakeToolchain",
    "MesonToolchain",
    "PkgConfigDeps",
    "BazelDeps",
    "BazelToolchain",
    "AutotoolsDeps",
    "AutotoolsToolchain",
    "MSBuildDeps",
    "MSBuildToolchain",
    "VirtualBuildEnv",
    "VirtualRunEnv",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generator(String);

impl Generator {
    pub fn new(name: impl Into<String>) -> Self {
        Generator(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this generator is in [`KNOWN_GENERATORS`].
    pub fn is_known(&self) -> bool {
        KNOWN_GENERATORS.contains(&self.0.as_str())
    }

    /// Find a known generator whose name differs only in case.
    pub fn suggestion(&self) -> Option<&'static str> {
        KNOWN_GENERATORS
            .iter()
            .copied()
            .find(|known| known.eq_ignore_ascii_case(&self.0) && *known != self.0)
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for Generator {
    fn from(s: &str) -> Self {
        Generator::new(s)
    }
}

impl From<String> for Generator {
    fn from(s: String) -> Self {
        Generator(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_respects_width() {
        assert_eq!(format!("{:<12}|", Generator::from("Meson")), "Meson       |");
    }

    #[test]
    fn test_known_generators() {
        assert!(Generator::from("CMakeDeps").is_known());
        assert!(Generator::from("CMakeToolchain").is_known());
        assert!(!Generator::from("cmake_find_package_multi").is_known());
    }

    #[test]
    fn test_suggestion_for_wrong_case() {
        assert_eq!(Generator::from("cmakedeps").suggestion(), Some("CMakeDeps"));
        assert_eq!(Generator::from("CMakeDeps").suggestion(), None);
        assert_eq!(Generator::from("Ninja").suggestion(), None);
    }
}
