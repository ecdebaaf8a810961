//! Recipe.toml parsing.
//!
//! The recipe is the on-disk form of a build configuration:
//!
//! ```toml
//! [package]
//! name = "market-tracker"
//! version = "0.1.0"
//!
//! [build]
//! settings = ["os", "compiler", "build_type", "arch"]
//! generators = ["CMakeDeps", "CMakeToolchain"]
//! layout = "cmake_layout"
//!
//! [requirements]
//! runtime = []
//! test = ["gtest/1.14.0"]
//! ```
//!
//! Loading a recipe replays its declarations through the
//! [`ManifestEvaluator`] in a fixed order (settings, generators, runtime,
//! build and test requirements, layout). The first rejected declaration
//! stops loading and is reported with the span it came from.

use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use miette::{Diagnostic, NamedSource, SourceSpan};
use semver::Version;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use toml::Spanned;

use crate::core::evaluator::{EvaluatorError, ManifestEvaluator};
use crate::core::manifest::Manifest;
use crate::core::requirement::{Requirement, RequirementScope};

/// Canonical recipe file name.
pub const RECIPE_FILE: &str = "Recipe.toml";

/// A `[requirements]` key.
///
/// `build` and `test` both land in the build/test scope; they are kept
/// apart in the file so tooling can tell test frameworks from build tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequirementSection {
    Runtime,
    Build,
    Test,
}

impl RequirementSection {
    /// Sections in evaluation order.
    pub const ALL: &'static [RequirementSection] = &[
        RequirementSection::Runtime,
        RequirementSection::Build,
        RequirementSection::Test,
    ];

    /// Key under `[requirements]`.
    pub fn key(&self) -> &'static str {
        match self {
            RequirementSection::Runtime => "runtime",
            RequirementSection::Build => "build",
            RequirementSection::Test => "test",
        }
    }

    /// Scope the section's entries are declared in.
    pub fn scope(&self) -> RequirementScope {
        match self {
            RequirementSection::Runtime => RequirementScope::Runtime,
            RequirementSection::Build | RequirementSection::Test => RequirementScope::Build,
        }
    }
}

impl fmt::Display for RequirementSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

impl FromStr for RequirementSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "runtime" => Ok(RequirementSection::Runtime),
            "build" => Ok(RequirementSection::Build),
            "test" => Ok(RequirementSection::Test),
            _ => Err(format!(
                "invalid requirement section '{}'; expected 'runtime', 'build', or 'test'",
                s
            )),
        }
    }
}

/// Package metadata from the `[package]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    pub name: String,

    pub version: Option<Version>,

    pub description: Option<String>,

    pub license: Option<String>,
}

/// A recipe that could not be loaded.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(recipe::invalid_recipe))]
pub struct RecipeError {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("declared here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: Option<String>,

    /// The rejected declaration, if the file itself parsed.
    #[source]
    pub cause: Option<EvaluatorError>,
}

impl RecipeError {
    fn parse(path: &Path, content: &str, err: toml::de::Error) -> Self {
        RecipeError {
            message: format!("failed to parse {}: {}", path.display(), err.message()),
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: err.span().map(SourceSpan::from),
            help: None,
            cause: None,
        }
    }

    fn declaration(path: &Path, content: &str, span: Range<usize>, cause: EvaluatorError) -> Self {
        RecipeError {
            message: format!("invalid declaration in {}", path.display()),
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: Some(span.into()),
            help: cause.help_text(),
            cause: Some(cause),
        }
    }

    fn invalid_version(path: &Path, content: &str, span: Range<usize>, err: semver::Error) -> Self {
        RecipeError {
            message: format!("invalid package version in {}: {}", path.display(), err),
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: Some(span.into()),
            help: Some("Package versions follow semver, e.g. `0.1.0`".to_string()),
            cause: None,
        }
    }
}

/// Raw recipe as deserialized from TOML.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRecipe {
    #[serde(default)]
    package: Option<RawPackage>,

    #[serde(default)]
    build: RawBuild,

    #[serde(default)]
    requirements: RawRequirements,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPackage {
    name: String,

    #[serde(default)]
    version: Option<Spanned<String>>,

    #[serde(default)]
    description: Option<String>,

    #[serde(default)]
    license: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBuild {
    #[serde(default)]
    settings: Vec<Spanned<String>>,

    #[serde(default)]
    generators: Vec<Spanned<String>>,

    #[serde(default)]
    layout: Option<Spanned<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRequirements {
    #[serde(default)]
    runtime: Vec<Spanned<RawRequirement>>,

    #[serde(default)]
    build: Vec<Spanned<RawRequirement>>,

    #[serde(default)]
    test: Vec<Spanned<RawRequirement>>,
}

impl RawRequirements {
    fn section(&self, section: RequirementSection) -> &[Spanned<RawRequirement>] {
        match section {
            RequirementSection::Runtime => &self.runtime,
            RequirementSection::Build => &self.build,
            RequirementSection::Test => &self.test,
        }
    }
}

/// A requirement entry: `"name/version"` or `{ name = "...", version = "..." }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawRequirement {
    Reference(String),
    Detailed {
        name: String,
        #[serde(default)]
        version: Option<String>,
    },
}

impl RawRequirement {
    fn into_requirement(self, scope: RequirementScope) -> Result<Requirement, EvaluatorError> {
        let invalid = |reason| EvaluatorError::InvalidRequirement { reason };
        match self {
            RawRequirement::Reference(reference) => {
                Requirement::parse_reference(&reference, scope).map_err(invalid)
            }
            RawRequirement::Detailed { name, version } => Ok(Requirement::new(name, version, scope)),
        }
    }
}

/// A loaded and evaluated recipe.
#[derive(Debug, Clone)]
pub struct RecipeFile {
    path: PathBuf,
    package: Option<PackageMetadata>,
    manifest: Manifest,
}

impl RecipeFile {
    /// Load a recipe from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read recipe: {}", path.display()))?;

        Ok(Self::parse(&content, path)?)
    }

    /// Parse and evaluate recipe content.
    pub fn parse(content: &str, path: &Path) -> Result<Self, RecipeError> {
        let raw: RawRecipe =
            toml::from_str(content).map_err(|e| RecipeError::parse(path, content, e))?;

        let package = match raw.package {
            Some(pkg) => {
                let version = match pkg.version {
                    Some(v) => Some(v.get_ref().parse::<Version>().map_err(|e| {
                        RecipeError::invalid_version(path, content, v.span(), e)
                    })?),
                    None => None,
                };
                Some(PackageMetadata {
                    name: pkg.name,
                    version,
                    description: pkg.description,
                    license: pkg.license,
                })
            }
            None => None,
        };

        let at = |span: Range<usize>| {
            move |cause: EvaluatorError| RecipeError::declaration(path, content, span, cause)
        };

        let mut evaluator = ManifestEvaluator::new();

        for axis in &raw.build.settings {
            evaluator
                .declare_settings([axis.get_ref().as_str()])
                .map_err(at(axis.span()))?;
        }

        evaluator.declare_generators(raw.build.generators.iter().map(|g| g.get_ref().as_str()));

        for &section in RequirementSection::ALL {
            for entry in raw.requirements.section(section) {
                let span = entry.span();
                let requirement = entry
                    .get_ref()
                    .clone()
                    .into_requirement(section.scope())
                    .map_err(at(span.clone()))?;

                evaluator.require(requirement).map_err(at(span))?;
            }
        }

        if let Some(layout) = &raw.build.layout {
            evaluator
                .set_layout(layout.get_ref())
                .map_err(at(layout.span()))?;
        }

        tracing::debug!("evaluated recipe {}", path.display());

        Ok(RecipeFile {
            path: path.to_path_buf(),
            package,
            manifest: evaluator.evaluate(),
        })
    }

    /// Path of the recipe file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the recipe; layout folders are relative to it.
    pub fn root(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    pub fn package(&self) -> Option<&PackageMetadata> {
        self.package.as_ref()
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn into_manifest(self) -> Manifest {
        self.manifest
    }
}

/// Find `Recipe.toml` in a directory.
pub fn find_recipe(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(RECIPE_FILE);
    path.is_file().then_some(path)
}

/// Generate a starter Recipe.toml.
///
/// With `tests`, GoogleTest is declared as a test requirement.
pub fn generate_default_recipe(name: &str, tests: bool) -> String {
    let test = if tests { r#"["gtest/1.14.0"]"# } else { "[]" };

    format!(
        r#"[package]
name = "{name}"
version = "0.1.0"

[build]
settings = ["os", "compiler", "build_type", "arch"]
generators = ["CMakeDeps", "CMakeToolchain"]
layout = "cmake_layout"

[requirements]
runtime = []
test = {test}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::Layout;
    use tempfile::TempDir;

    fn parse(content: &str) -> Result<RecipeFile, RecipeError> {
        RecipeFile::parse(content, Path::new("Recipe.toml"))
    }

    #[test]
    fn test_parse_basic_recipe() {
        let content = r#"
[package]
name = "market-tracker"
version = "0.1.0"

[build]
settings = ["os", "compiler", "build_type", "arch"]
generators = ["CMakeDeps", "CMakeToolchain"]
layout = "cmake_layout"

[requirements]
runtime = []
test = ["gtest/1.14.0"]
"#;
        let recipe = parse(content).unwrap();
        let package = recipe.package().unwrap();
        assert_eq!(package.name, "market-tracker");
        assert_eq!(package.version, Some(Version::new(0, 1, 0)));

        let manifest = recipe.manifest();
        assert_eq!(manifest.settings().len(), 4);
        assert_eq!(manifest.generators().len(), 2);
        assert_eq!(manifest.layout(), Some(Layout::Cmake));

        let gtest = manifest.requirement("gtest", RequirementScope::Build).unwrap();
        assert_eq!(gtest.version(), Some("1.14.0"));
        assert_eq!(manifest.requirements_in(RequirementScope::Runtime).count(), 0);
    }

    #[test]
    fn test_parse_empty_recipe() {
        let recipe = parse("").unwrap();
        assert!(recipe.package().is_none());
        assert!(recipe.manifest().is_empty());
    }

    #[test]
    fn test_parse_detailed_requirement() {
        let content = r#"
[requirements]
runtime = [{ name = "fmt", version = "10.2.1" }, { name = "spdlog" }]
"#;
        let manifest = parse(content).unwrap().into_manifest();
        let fmt = manifest.requirement("fmt", RequirementScope::Runtime).unwrap();
        assert_eq!(fmt.version(), Some("10.2.1"));
        let spdlog = manifest.requirement("spdlog", RequirementScope::Runtime).unwrap();
        assert_eq!(spdlog.version(), None);
    }

    #[test]
    fn test_duplicate_axis_points_at_second_entry() {
        let content = r#"[build]
settings = ["os", "arch", "os"]
"#;
        let err = parse(content).unwrap_err();
        assert_eq!(
            err.cause,
            Some(EvaluatorError::DuplicateAxis { axis: "os".into() })
        );

        // The first `os` is accepted; the span lands after `arch`
        let span = err.span.unwrap();
        assert!(span.offset() > content.find("arch").unwrap());
        assert!(err.help.unwrap().contains("os"));
    }

    #[test]
    fn test_build_and_test_share_a_scope() {
        let content = r#"
[requirements]
build = ["gtest/1.14.0"]
test = ["gtest/1.13.0"]
"#;
        let err = parse(content).unwrap_err();
        assert!(matches!(
            err.cause,
            Some(EvaluatorError::DuplicateRequirement { ref name, scope: RequirementScope::Build })
                if name == "gtest"
        ));
    }

    #[test]
    fn test_same_requirement_in_runtime_and_test() {
        let content = r#"
[requirements]
runtime = ["fmt/10.2.1"]
test = ["fmt/10.2.1"]
"#;
        let manifest = parse(content).unwrap().into_manifest();
        assert_eq!(manifest.requirements().len(), 2);
    }

    #[test]
    fn test_unknown_layout() {
        let content = r#"
[build]
layout = "vs_layout"
"#;
        let err = parse(content).unwrap_err();
        assert_eq!(
            err.cause,
            Some(EvaluatorError::unknown_layout("vs_layout"))
        );
        assert!(err.span.is_some());
    }

    #[test]
    fn test_invalid_reference() {
        let content = r#"
[requirements]
runtime = ["zlib/"]
"#;
        let err = parse(content).unwrap_err();
        assert!(matches!(err.cause, Some(EvaluatorError::InvalidRequirement { .. })));
    }

    #[test]
    fn test_detailed_requirement_with_empty_version() {
        let content = r#"
[requirements]
runtime = [{ name = "fmt", version = "" }]
"#;
        let err = parse(content).unwrap_err();
        assert!(matches!(err.cause, Some(EvaluatorError::InvalidRequirement { .. })));
        assert!(err.span.is_some());
    }

    #[test]
    fn test_invalid_package_version() {
        let content = r#"
[package]
name = "app"
version = "one"
"#;
        let err = parse(content).unwrap_err();
        assert!(err.message.contains("invalid package version"));
        assert!(err.cause.is_none());
        assert!(err.span.is_some());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let content = r#"
[build]
generator = ["CMakeDeps"]
"#;
        let err = parse(content).unwrap_err();
        assert!(err.message.contains("failed to parse"));
        assert!(err.cause.is_none());
    }

    #[test]
    fn test_generated_recipe_round_trips() {
        let recipe = parse(&generate_default_recipe("demo", true)).unwrap();
        assert_eq!(recipe.package().unwrap().name, "demo");
        let manifest = recipe.manifest();
        assert!(manifest.requirement("gtest", RequirementScope::Build).is_some());
        assert_eq!(manifest.layout(), Some(Layout::Cmake));

        let recipe = parse(&generate_default_recipe("demo", false)).unwrap();
        assert!(recipe.manifest().requirements().is_empty());
    }

    #[test]
    fn test_load_and_find_recipe() {
        let tmp = TempDir::new().unwrap();
        assert!(find_recipe(tmp.path()).is_none());

        let path = tmp.path().join(RECIPE_FILE);
        std::fs::write(&path, generate_default_recipe("demo", false)).unwrap();

        assert_eq!(find_recipe(tmp.path()), Some(path.clone()));
        let recipe = RecipeFile::load(&path).unwrap();
        assert_eq!(recipe.root(), tmp.path());
    }

    #[test]
    fn test_section_parsing() {
        assert_eq!("test".parse::<RequirementSection>(), Ok(RequirementSection::Test));
        assert_eq!(RequirementSection::Test.scope(), RequirementScope::Build);
        assert_eq!(RequirementSection::Runtime.scope(), RequirementScope::Runtime);
        assert!("dev".parse::<RequirementSection>().is_err());
    }
}
