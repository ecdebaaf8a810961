//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use recipe::core::recipe::RequirementSection;
use recipe::util::ColorChoice;

/// recipe - evaluate declarative build recipes into manifests
#[derive(Parser)]
#[command(name = "recipe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// Path to Recipe.toml (defaults to searching upward from the current directory)
    #[arg(long, global = true, value_name = "PATH", env = "RECIPE_MANIFEST_PATH")]
    pub manifest_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new directory with a Recipe.toml
    New(NewArgs),

    /// Create a Recipe.toml in an existing directory
    Init(InitArgs),

    /// Evaluate the recipe and print the manifest
    Evaluate(EvaluateArgs),

    /// Validate the recipe and report questionable declarations
    Check(CheckArgs),

    /// Show the values bound to the declared settings axes
    Settings(SettingsArgs),

    /// Show the folders selected by the declared layout
    Layout(LayoutArgs),

    /// Add a requirement to Recipe.toml
    Add(AddArgs),

    /// Remove a requirement from Recipe.toml
    Remove(RemoveArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct NewArgs {
    /// Package name
    pub name: String,

    /// Directory to create the recipe in (defaults to name)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Do not declare GoogleTest as a test requirement
    #[arg(long)]
    pub no_tests: bool,
}

#[derive(Args)]
pub struct InitArgs {
    /// Package name (defaults to directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Do not declare GoogleTest as a test requirement
    #[arg(long)]
    pub no_tests: bool,

    /// Directory to initialize (defaults to current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct EvaluateArgs {
    /// Print the manifest as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the manifest JSON to a file
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Fail if any warning is reported
    #[arg(long)]
    pub deny_warnings: bool,
}

#[derive(Args)]
pub struct SettingsArgs {
    /// Bind a settings value (`axis=value`); repeatable
    #[arg(short = 's', long = "setting", value_name = "AXIS=VALUE")]
    pub settings: Vec<String>,

    /// Print the bound values as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct LayoutArgs {
    /// Bind a settings value (`axis=value`); repeatable
    #[arg(short = 's', long = "setting", value_name = "AXIS=VALUE")]
    pub settings: Vec<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Requirement reference (`name` or `name/version`)
    pub reference: String,

    /// Section to add to: runtime, build, test
    #[arg(long = "scope", value_name = "SCOPE", default_value = "runtime")]
    pub section: RequirementSection,

    /// Validate the change without writing Recipe.toml
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Package name to remove
    pub name: String,

    /// Only remove from this section: runtime, build, test
    #[arg(long = "scope", value_name = "SCOPE")]
    pub section: Option<RequirementSection>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
