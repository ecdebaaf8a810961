//! `recipe init` command

use anyhow::Result;

use crate::cli::InitArgs;
use crate::GlobalOptions;
use recipe::ops::recipe_new::init_recipe;
use recipe::util::Status;

pub fn execute(args: InitArgs, global_opts: &GlobalOptions) -> Result<()> {
    let dir = match args.path {
        Some(path) => global_opts.ctx.cwd().join(path),
        None => global_opts.ctx.cwd().to_path_buf(),
    };

    let manifest_path = init_recipe(&dir, args.name, !args.no_tests)?;

    global_opts
        .shell
        .status(Status::Created, manifest_path.display());

    Ok(())
}
