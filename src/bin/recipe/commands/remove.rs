//! `recipe remove` command

use anyhow::Result;

use crate::cli::RemoveArgs;
use crate::GlobalOptions;
use recipe::ops::recipe_add::remove_requirement;
use recipe::util::Status;

pub fn execute(args: RemoveArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let manifest_path = global_opts.manifest_path()?;

    let result = remove_requirement(&manifest_path, &args.name, args.section)?;

    for (section, entry) in &result.removed {
        shell.status(Status::Removed, format!("{} from {}", entry, section));
    }

    Ok(())
}
