//! recipe CLI - evaluate declarative build recipes

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use recipe::core::recipe::RecipeError;
use recipe::util::{GlobalContext, Shell};

/// Options shared by every command.
pub struct GlobalOptions {
    pub shell: Shell,
    pub ctx: GlobalContext,
    pub manifest_path: Option<PathBuf>,
}

impl GlobalOptions {
    /// Locate the recipe for this invocation.
    pub fn manifest_path(&self) -> Result<PathBuf> {
        self.ctx.manifest_path(self.manifest_path.as_deref())
    }
}

fn main() {
    if let Err(e) = run() {
        match e.downcast::<RecipeError>() {
            Ok(recipe_err) => eprintln!("{:?}", miette::Report::new(recipe_err)),
            Err(e) => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.color);

    // Set up logging
    let default_filter = if shell.is_verbose() {
        "recipe=debug"
    } else if shell.is_quiet() {
        "recipe=error"
    } else {
        "recipe=info"
    };
    let filter =
        EnvFilter::try_from_env("RECIPE_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(shell.use_color())
        .with_target(false)
        .without_time()
        .init();

    let use_color = shell.use_color();
    let _ = miette::set_hook(Box::new(move |_| {
        Box::new(miette::MietteHandlerOpts::new().color(use_color).build())
    }));

    let ctx = GlobalContext::new()?;

    let opts = GlobalOptions {
        shell,
        ctx,
        manifest_path: cli.manifest_path,
    };

    // Execute command
    match cli.command {
        Commands::New(args) => commands::new::execute(args, &opts),
        Commands::Init(args) => commands::init::execute(args, &opts),
        Commands::Evaluate(args) => commands::evaluate::execute(args, &opts),
        Commands::Check(args) => commands::check::execute(args, &opts),
        Commands::Settings(args) => commands::settings::execute(args, &opts),
        Commands::Layout(args) => commands::layout::execute(args, &opts),
        Commands::Add(args) => commands::add::execute(args, &opts),
        Commands::Remove(args) => commands::remove::execute(args, &opts),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
