//! recipe - evaluates declarative build recipes
//!
//! A recipe declares which settings axes matter, which build-file
//! generators to run, which packages are required and which directory
//! layout to use. This crate validates those declarations and produces an
//! immutable [`Manifest`] for package managers and build-file generators.

pub mod core;
pub mod ops;
pub mod util;

pub use crate::core::{
    evaluator::{EvaluatorError, ManifestEvaluator},
    layout::Layout,
    manifest::Manifest,
    recipe::RecipeFile,
    requirement::{Requirement, RequirementScope},
};

pub use util::context::GlobalContext;
