//! `recipe check` command
//!
//! Evaluates the recipe and reports declarations that are valid but
//! probably not intended.

use anyhow::{bail, Result};

use crate::cli::CheckArgs;
use crate::GlobalOptions;
use recipe::core::recipe::RECIPE_FILE;
use recipe::ops::evaluate::{lint, load_manifest};
use recipe::util::diagnostic::Severity;
use recipe::util::Status;

pub fn execute(args: CheckArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let manifest_path = global_opts.manifest_path()?;

    shell.status(Status::Evaluating, manifest_path.display());
    let recipe = load_manifest(&manifest_path)?;

    let diagnostics = lint(&recipe);
    for diag in &diagnostics {
        shell.diagnostic(diag);
    }

    let warnings = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();

    if args.deny_warnings && warnings > 0 {
        bail!("{} warning(s) reported and --deny-warnings is set", warnings);
    }

    shell.status(Status::Finished, format!("`{}` is valid", RECIPE_FILE));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse_check_args(args: &[&str]) -> CheckArgs {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            check: CheckArgs,
        }
        TestCli::parse_from(args).check
    }

    #[test]
    fn test_check_args() {
        assert!(!parse_check_args(&["test"]).deny_warnings);
        assert!(parse_check_args(&["test", "--deny-warnings"]).deny_warnings);
    }
}
