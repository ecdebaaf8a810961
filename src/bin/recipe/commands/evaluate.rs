//! `recipe evaluate` command

use anyhow::Result;

use crate::cli::EvaluateArgs;
use crate::GlobalOptions;
use recipe::core::recipe::RecipeFile;
use recipe::ops::evaluate::{export_manifest, load_manifest, manifest_to_json};
use recipe::util::Status;

pub fn execute(args: EvaluateArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let manifest_path = global_opts.manifest_path()?;

    let recipe = load_manifest(&manifest_path)?;
    let config = global_opts.ctx.load_config(recipe.root());

    if let Some(out) = &args.out {
        export_manifest(recipe.manifest(), out)?;
        shell.status(Status::Exported, out.display());
    }

    if args.json || config.output.json() {
        shell.print_json(&manifest_to_json(recipe.manifest())?)?;
    } else if args.out.is_none() {
        for line in format_manifest(&recipe) {
            shell.print(line);
        }
    }

    Ok(())
}

/// Human-readable summary of an evaluated recipe.
pub fn format_manifest(recipe: &RecipeFile) -> Vec<String> {
    let manifest = recipe.manifest();
    let mut lines = Vec::new();

    if let Some(package) = recipe.package() {
        match &package.version {
            Some(version) => lines.push(format!("{} v{}", package.name, version)),
            None => lines.push(package.name.clone()),
        }
    }

    lines.push(format!("settings:     {}", join_or_none(manifest.settings())));
    lines.push(format!("generators:   {}", join_or_none(manifest.generators())));
    lines.push(format!(
        "layout:       {}",
        manifest.layout().map_or("(none)", |l| l.as_str())
    ));

    if manifest.requirements().is_empty() {
        lines.push("requirements: (none)".to_string());
    } else {
        lines.push("requirements:".to_string());
        for requirement in manifest.requirements() {
            lines.push(format!("  {}", requirement));
        }
    }

    lines
}

fn join_or_none<T: std::fmt::Display>(items: &[T]) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
