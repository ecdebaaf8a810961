//! `recipe settings` command

use anyhow::Result;

use crate::cli::SettingsArgs;
use crate::GlobalOptions;
use recipe::core::settings::SettingValues;
use recipe::ops::evaluate::load_manifest;
use recipe::ops::settings::bind_settings;
use recipe::util::diagnostic::suggestions;

pub fn execute(args: SettingsArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let manifest_path = global_opts.manifest_path()?;

    let recipe = load_manifest(&manifest_path)?;
    let config = global_opts.ctx.load_config(recipe.root());
    let values = bind_settings(&recipe, &config, &args.settings)?;

    if args.json || config.output.json() {
        return shell.print_json(&values);
    }

    if values.is_empty() {
        shell.note("recipe declares no settings axes");
        return Ok(());
    }

    for line in format_values(&values) {
        shell.print(line);
    }

    let missing = values.missing();
    if !missing.is_empty() {
        let names: Vec<_> = missing.iter().map(|a| format!("`{}`", a)).collect();
        shell.warn(format!(
            "no value bound for {}\n{}",
            names.join(", "),
            suggestions::MISSING_SETTINGS
        ));
    }

    Ok(())
}

/// One `axis = value` line per declared axis, aligned on `=`.
pub fn format_values(values: &SettingValues) -> Vec<String> {
    let width = values
        .iter()
        .map(|b| b.axis.as_str().len())
        .max()
        .unwrap_or(0);

    values
        .iter()
        .map(|b| {
            format!(
                "{:<width$} = {}",
                b.axis,
                b.value.as_deref().unwrap_or("<unset>"),
                width = width
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use recipe::core::settings::SettingsAxis;
    use std::collections::BTreeMap;

    fn parse_settings_args(args: &[&str]) -> SettingsArgs {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            settings: SettingsArgs,
        }
        TestCli::parse_from(args).settings
    }

    #[test]
    fn test_settings_args_repeatable() {
        let args = parse_settings_args(&[
            "test",
            "-s",
            "build_type=Debug",
            "--setting",
            "compiler=clang",
        ]);
        assert_eq!(args.settings, vec!["build_type=Debug", "compiler=clang"]);
        assert!(!args.json);
    }

    #[test]
    fn test_format_values() {
        let axes = vec![SettingsAxis::new("os"), SettingsAxis::new("build_type")];
        let mut layer = BTreeMap::new();
        layer.insert("build_type".to_string(), "Debug".to_string());

        let values = SettingValues::bind(&axes, [&layer]);
        assert_eq!(
            format_values(&values),
            vec!["os         = <unset>", "build_type = Debug"]
        );
    }
}
