//! `recipe new` command

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::NewArgs;
use crate::GlobalOptions;
use recipe::ops::recipe_new::{new_recipe, NewOptions};
use recipe::util::Status;

/// Directory a new recipe is created in: `--path`, or a directory named
/// after the package.
pub fn determine_recipe_dir(name: &str, path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(name))
}

pub fn execute(args: NewArgs, global_opts: &GlobalOptions) -> Result<()> {
    let dir = determine_recipe_dir(&args.name, args.path.as_deref());
    let dir = global_opts.ctx.cwd().join(dir);

    let opts = NewOptions {
        name: args.name.clone(),
        tests: !args.no_tests,
        init: false,
    };

    new_recipe(&dir, &opts)?;

    global_opts
        .shell
        .status(Status::Created, format!("recipe `{}`", args.name));

    Ok(())
}
