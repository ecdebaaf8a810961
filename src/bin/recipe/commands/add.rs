//! `recipe add` command

use anyhow::Result;

use crate::cli::AddArgs;
use crate::GlobalOptions;
use recipe::ops::recipe_add::{add_requirement, AddOptions, AddResult};
use recipe::util::Status;

pub fn execute(args: AddArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let manifest_path = global_opts.manifest_path()?;

    let opts = AddOptions {
        reference: args.reference,
        section: args.section,
        dry_run: args.dry_run,
    };

    match add_requirement(&manifest_path, &opts)? {
        AddResult::Added {
            requirement,
            section,
        } => {
            if args.dry_run {
                shell.status(
                    Status::Info,
                    format!("Would add {} to {}", requirement.reference(), section),
                );
            } else {
                shell.status(
                    Status::Added,
                    format!("{} to {}", requirement.reference(), section),
                );
            }
        }
        AddResult::Updated {
            requirement,
            section,
            from,
        } => {
            if args.dry_run {
                shell.status(
                    Status::Info,
                    format!(
                        "Would update {} -> {} in {}",
                        from,
                        requirement.reference(),
                        section
                    ),
                );
            } else {
                shell.status(
                    Status::Updated,
                    format!("{} -> {} in {}", from, requirement.reference(), section),
                );
            }
        }
    }

    Ok(())
}
