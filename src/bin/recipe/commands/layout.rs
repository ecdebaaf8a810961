//! `recipe layout` command

use anyhow::Result;

use crate::cli::LayoutArgs;
use crate::GlobalOptions;
use recipe::ops::evaluate::load_manifest;
use recipe::ops::settings::{bind_settings, resolve_folders};

pub fn execute(args: LayoutArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let manifest_path = global_opts.manifest_path()?;

    let recipe = load_manifest(&manifest_path)?;
    let config = global_opts.ctx.load_config(recipe.root());
    let values = bind_settings(&recipe, &config, &args.settings)?;

    let (Some(layout), Some(folders)) =
        (recipe.manifest().layout(), resolve_folders(&recipe, &values)?)
    else {
        shell.note("recipe declares no layout");
        return Ok(());
    };

    if config.output.json() {
        return shell.print_json(&folders);
    }

    shell.print(format!("layout:     {} ({})", layout, values.build_type()));
    shell.print(format!("source:     {}", folders.source.display()));
    shell.print(format!("build:      {}", folders.build.display()));
    shell.print(format!("generators: {}", folders.generators.display()));

    Ok(())
}
