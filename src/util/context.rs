//! Global context for recipe operations.
//!
//! Provides centralized access to configuration, paths, and environment.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};

use crate::core::recipe::{find_recipe, RECIPE_FILE};
use crate::util::config::{load_config, Config};
use crate::util::diagnostic::suggestions;

/// Project directories for recipe
static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("com", "recipe", "recipe"));

/// Name of the project-local directory holding config overrides.
pub const PROJECT_DIR: &str = ".recipe";

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global recipe data
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let home = if let Some(home) = std::env::var_os("RECIPE_HOME") {
            PathBuf::from(home)
        } else if let Some(dirs) = PROJECT_DIRS.as_ref() {
            dirs.config_dir().to_path_buf()
        } else {
            // Fallback to ~/.recipe
            BaseDirs::new()
                .map(|b| b.home_dir().join(PROJECT_DIR))
                .unwrap_or_else(|| PathBuf::from(PROJECT_DIR))
        };

        Ok(GlobalContext { cwd, home })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Use a different home directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project configuration file path for a project root.
    pub fn project_config_path(&self, root: &Path) -> PathBuf {
        root.join(PROJECT_DIR).join("config.toml")
    }

    /// Load the merged global and project configuration.
    pub fn load_config(&self, root: &Path) -> Config {
        load_config(&self.config_path(), &self.project_config_path(root))
    }

    /// Find Recipe.toml starting from cwd and searching upward.
    pub fn find_manifest(&self) -> Result<PathBuf> {
        let mut current = self.cwd.clone();
        loop {
            if let Some(path) = find_recipe(&current) {
                return Ok(path);
            }
            if !current.pop() {
                anyhow::bail!(
                    "could not find {} in {} or any parent directory\n{}",
                    RECIPE_FILE,
                    self.cwd.display(),
                    suggestions::NO_MANIFEST
                );
            }
        }
    }

    /// Resolve an explicit `--manifest-path`, or search for Recipe.toml.
    pub fn manifest_path(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    self.cwd.join(path)
                };
                if !path.is_file() {
                    anyhow::bail!("manifest path `{}` does not exist", path.display());
                }
                Ok(path)
            }
            None => self.find_manifest(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_paths() {
        let ctx = GlobalContext::new().unwrap();
        assert!(ctx.cwd().is_absolute());
        assert!(ctx.config_path().ends_with("config.toml"));
    }

    #[test]
    fn test_find_manifest_in_parent() {
        let tmp = TempDir::new().unwrap();
        let manifest = tmp.path().join(RECIPE_FILE);
        std::fs::write(&manifest, "[package]\nname = \"test\"\n").unwrap();

        let nested = tmp.path().join("src").join("app");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = GlobalContext::with_cwd(nested).unwrap();
        assert_eq!(ctx.find_manifest().ok(), Some(manifest));
    }

    #[test]
    fn test_find_manifest_missing() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();

        // A Recipe.toml further up the real filesystem would be found, so
        // only check the message when the search fails.
        if let Err(err) = ctx.find_manifest() {
            assert!(err.to_string().contains("recipe init"));
        }
    }

    #[test]
    fn test_explicit_manifest_path() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("custom.toml"), "").unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();
        let path = ctx.manifest_path(Some(Path::new("custom.toml"))).unwrap();
        assert_eq!(path, tmp.path().join("custom.toml"));

        assert!(ctx.manifest_path(Some(Path::new("missing.toml"))).is_err());
    }

    #[test]
    fn test_load_config_from_project_dir() {
        let tmp = TempDir::new().unwrap();
        let project_dir = tmp.path().join(PROJECT_DIR);
        std::fs::create_dir_all(&project_dir).unwrap();
        std::fs::write(
            project_dir.join("config.toml"),
            "[settings]\ncompiler = \"msvc\"\n",
        )
        .unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf())
            .unwrap()
            .with_home(tmp.path().join("home"));
        let config = ctx.load_config(tmp.path());
        assert_eq!(config.settings.get("compiler").map(String::as_str), Some("msvc"));
    }
}
