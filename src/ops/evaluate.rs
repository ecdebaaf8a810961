//! Implementation of `recipe evaluate` and `recipe check`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::manifest::Manifest;
use crate::core::recipe::RecipeFile;
use crate::core::requirement::RequirementScope;
use crate::util::diagnostic::Diagnostic;
use crate::util::fs;

/// Load and evaluate a recipe.
pub fn load_manifest(path: &Path) -> Result<RecipeFile> {
    let recipe = RecipeFile::load(path)?;

    let manifest = recipe.manifest();
    tracing::debug!(
        "{}: {} axes, {} generators, {} requirements",
        path.display(),
        manifest.settings().len(),
        manifest.generators().len(),
        manifest.requirements().len()
    );

    Ok(recipe)
}

/// The JSON document handed to resolvers and build-file generators.
pub fn manifest_to_json(manifest: &Manifest) -> Result<serde_json::Value> {
    serde_json::to_value(manifest).context("failed to serialize manifest")
}

/// Write the JSON document for a manifest to `out`.
pub fn export_manifest(manifest: &Manifest, out: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&manifest_to_json(manifest)?)
        .context("failed to serialize manifest")?;
    fs::write_string(out, &format!("{}\n", json))
}

/// Find declarations that are valid but probably not what was meant.
pub fn lint(recipe: &RecipeFile) -> Vec<Diagnostic> {
    let manifest = recipe.manifest();
    let mut diagnostics = Vec::new();

    for generator in manifest.generators().iter().filter(|g| !g.is_known()) {
        let mut diag = Diagnostic::warning(format!("generator `{}` is not recognized", generator))
            .with_location(recipe.path());
        diag = match generator.suggestion() {
            Some(known) => diag.with_suggestion(format!("Did you mean `{}`?", known)),
            None => diag.with_context("it is passed through to the build-file generator as-is"),
        };
        diagnostics.push(diag);
    }

    for scope in [RequirementScope::Runtime, RequirementScope::Build] {
        let unpinned: Vec<_> = manifest
            .requirements_in(scope)
            .filter(|r| r.version().is_none())
            .map(|r| format!("`{}`", r.name()))
            .collect();

        if !unpinned.is_empty() {
            diagnostics.push(
                Diagnostic::note(format!(
                    "{} requirement(s) without a version: {}",
                    scope,
                    unpinned.join(", ")
                ))
                .with_location(recipe.path())
                .with_context("the package manager will pick the latest available version"),
            );
        }
    }

    if manifest.layout().is_none() && !manifest.generators().is_empty() {
        diagnostics.push(
            Diagnostic::note("no layout declared; generated files land in the recipe directory")
                .with_location(recipe.path())
                .with_suggestion("Add `layout = \"cmake_layout\"` under [build]"),
        );
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::recipe::generate_default_recipe;
    use crate::util::diagnostic::Severity;
    use tempfile::TempDir;

    fn write_recipe(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join("Recipe.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_manifest() {
        let tmp = TempDir::new().unwrap();
        let path = write_recipe(tmp.path(), &generate_default_recipe("demo", true));

        let recipe = load_manifest(&path).unwrap();
        assert_eq!(recipe.manifest().settings().len(), 4);
    }

    #[test]
    fn test_load_manifest_surfaces_recipe_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_recipe(tmp.path(), "[build]\nlayout = \"nope\"\n");

        let err = load_manifest(&path).unwrap_err();
        let recipe_err = err
            .downcast_ref::<crate::core::recipe::RecipeError>()
            .expect("recipe error");
        assert!(recipe_err.cause.is_some());
    }

    #[test]
    fn test_export_manifest() {
        let tmp = TempDir::new().unwrap();
        let path = write_recipe(tmp.path(), &generate_default_recipe("demo", true));
        let recipe = load_manifest(&path).unwrap();

        let out = tmp.path().join("build").join("manifest.json");
        export_manifest(recipe.manifest(), &out).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "settings": ["os", "compiler", "build_type", "arch"],
                "generators": ["CMakeDeps", "CMakeToolchain"],
                "requirements": [
                    {"name": "gtest", "version": "1.14.0", "scope": "build"}
                ],
                "layout": "cmake_layout"
            })
        );
    }

    #[test]
    fn test_lint_clean_recipe() {
        let tmp = TempDir::new().unwrap();
        let path = write_recipe(tmp.path(), &generate_default_recipe("demo", true));
        let recipe = load_manifest(&path).unwrap();
        assert!(lint(&recipe).is_empty());
    }

    #[test]
    fn test_lint_reports_questionable_declarations() {
        let tmp = TempDir::new().unwrap();
        let path = write_recipe(
            tmp.path(),
            r#"
[build]
generators = ["cmakedeps", "CMakeToolchain"]

[requirements]
runtime = ["zlib"]
"#,
        );
        let recipe = load_manifest(&path).unwrap();
        let diagnostics = lint(&recipe);

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(diagnostics[0].suggestions[0].contains("CMakeDeps"));
        assert!(diagnostics[1].message.contains("`zlib`"));
        assert!(diagnostics[2].message.contains("no layout"));
    }
}
