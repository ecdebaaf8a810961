//! Implementation of `recipe settings` and `recipe layout`.

use std::collections::BTreeMap;

use anyhow::{bail, Result};

use crate::core::layout::Folders;
use crate::core::recipe::RecipeFile;
use crate::core::settings::{host_defaults, parse_setting_flag, SettingValues};
use crate::util::config::Config;

/// Bind values to the axes a recipe declares.
///
/// Precedence, highest first: `flags`, `config`, host detection.
pub fn bind_settings(recipe: &RecipeFile, config: &Config, flags: &[String]) -> Result<SettingValues> {
    let mut cli = BTreeMap::new();
    for flag in flags {
        let (axis, value) = parse_setting_flag(flag)?;
        cli.insert(axis, value);
    }

    let host = host_defaults();
    Ok(SettingValues::bind(
        recipe.manifest().settings(),
        [&host, &config.settings, &cli],
    ))
}

/// Folders the recipe's layout selects, anchored at the recipe directory.
///
/// `None` when the recipe declares no layout. The build type becomes a
/// single path component, so values that would leave the recipe directory
/// are rejected.
pub fn resolve_folders(recipe: &RecipeFile, values: &SettingValues) -> Result<Option<Folders>> {
    let Some(layout) = recipe.manifest().layout() else {
        return Ok(None);
    };

    let build_type = values.build_type();
    if build_type.contains(['/', '\\']) || build_type == "." || build_type == ".." {
        bail!(
            "build_type `{}` cannot be used in a folder name\n\
             help: Use a plain name such as `Debug` or `Release`",
            build_type
        );
    }

    Ok(Some(layout.folders(build_type).under(recipe.root())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn recipe(content: &str) -> RecipeFile {
        RecipeFile::parse(content, Path::new("/work/app/Recipe.toml")).unwrap()
    }

    #[test]
    fn test_flags_override_config_and_host() {
        let recipe = recipe("[build]\nsettings = [\"os\", \"compiler\", \"build_type\"]\n");
        let mut config = Config::default();
        config.settings.insert("compiler".into(), "gcc".into());
        config.settings.insert("build_type".into(), "RelWithDebInfo".into());

        let values =
            bind_settings(&recipe, &config, &["build_type=Debug".to_string()]).unwrap();
        assert_eq!(values.get("compiler"), Some("gcc"));
        assert_eq!(values.get("build_type"), Some("Debug"));
        assert!(values.get("os").is_some());
        assert!(values.missing().is_empty());
    }

    #[test]
    fn test_invalid_flag_is_an_error() {
        let recipe = recipe("[build]\nsettings = [\"os\"]\n");
        assert!(bind_settings(&recipe, &Config::default(), &["os".to_string()]).is_err());
    }

    #[test]
    fn test_resolve_folders_uses_build_type() {
        let recipe = recipe(
            "[build]\nsettings = [\"build_type\"]\nlayout = \"cmake_layout\"\n",
        );
        let values =
            bind_settings(&recipe, &Config::default(), &["build_type=Debug".to_string()])
                .unwrap();

        let folders = resolve_folders(&recipe, &values).unwrap().unwrap();
        assert_eq!(folders.build, Path::new("/work/app/build/Debug"));
        assert_eq!(
            folders.generators,
            Path::new("/work/app/build/Debug/generators")
        );
    }

    #[test]
    fn test_resolve_folders_without_layout() {
        let recipe = recipe("[build]\nsettings = [\"os\"]\n");
        let values = bind_settings(&recipe, &Config::default(), &[]).unwrap();
        assert!(resolve_folders(&recipe, &values).unwrap().is_none());
    }

    #[test]
    fn test_resolve_folders_rejects_path_like_build_type() {
        let recipe = recipe(
            "[build]\nsettings = [\"build_type\"]\nlayout = \"cmake_layout\"\n",
        );

        for build_type in ["../../x", "a/b", "a\\b", ".."] {
            let values = bind_settings(
                &recipe,
                &Config::default(),
                &[format!("build_type={}", build_type)],
            )
            .unwrap();
            let err = resolve_folders(&recipe, &values).unwrap_err();
            assert!(err.to_string().contains("cannot be used in a folder name"));
        }
    }
}
