//! Implementation of `recipe new` and `recipe init`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::recipe::{generate_default_recipe, RECIPE_FILE};

/// Options for creating a new recipe.
#[derive(Debug, Clone)]
pub struct NewOptions {
    /// Package name
    pub name: String,

    /// Declare GoogleTest as a test requirement
    pub tests: bool,

    /// Initialize in existing directory
    pub init: bool,
}

/// Check that a package name can be used in `[package]`.
pub fn validate_package_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("package name cannot be empty");
    }

    if name.starts_with('-') || name.starts_with('_') {
        return Err("package name cannot start with a hyphen or underscore");
    }

    if name.starts_with('.') {
        return Err("package name cannot start with a dot");
    }

    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err("package name contains invalid characters");
    }

    Ok(())
}

/// Create a new directory containing a starter Recipe.toml.
pub fn new_recipe(path: &Path, opts: &NewOptions) -> Result<PathBuf> {
    if let Err(reason) = validate_package_name(&opts.name) {
        bail!(
            "invalid package name `{}`: {}\n\
             \n\
             Use letters, digits, `-` and `_`, or pass --name.",
            opts.name,
            reason
        );
    }

    if path.exists() && !opts.init {
        bail!(
            "destination `{}` already exists\n\
             \n\
             Use `recipe init` to initialize an existing directory.",
            path.display()
        );
    }

    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }

    let manifest_path = path.join(RECIPE_FILE);
    if manifest_path.exists() {
        bail!("`{}` already exists in `{}`", RECIPE_FILE, path.display());
    }

    fs::write(&manifest_path, generate_default_recipe(&opts.name, opts.tests))
        .with_context(|| format!("failed to write {}", RECIPE_FILE))?;

    tracing::debug!("wrote {}", manifest_path.display());
    Ok(manifest_path)
}

/// Write a starter Recipe.toml into an existing directory.
///
/// The package name defaults to the directory name.
pub fn init_recipe(path: &Path, name: Option<String>, tests: bool) -> Result<PathBuf> {
    if !path.is_dir() {
        bail!("`{}` is not a directory", path.display());
    }

    let name = match name {
        Some(name) => name,
        None => default_name(path)?,
    };

    new_recipe(
        path,
        &NewOptions {
            name,
            tests,
            init: true,
        },
    )
}

fn default_name(path: &Path) -> Result<String> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("failed to resolve path: {}", path.display()))?;

    canonical
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .with_context(|| {
            format!(
                "cannot infer a package name from `{}`; pass --name",
                path.display()
            )
        })
}
