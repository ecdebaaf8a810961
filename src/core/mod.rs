//! Core data structures for recipe.
//!
//! This module contains the foundational types:
//! - Settings axes, generators, requirements and layouts
//! - The manifest evaluator and the manifests it produces
//! - Recipe.toml parsing

pub mod evaluator;
pub mod generator;
pub mod layout;
pub mod manifest;
pub mod recipe;
pub mod requirement;
pub mod settings;

pub use evaluator::{EvaluatorError, ManifestEvaluator};
pub use generator::Generator;
pub use layout::{Folders, Layout};
pub use manifest::Manifest;
pub use recipe::{find_recipe, RecipeError, RecipeFile, RequirementSection, RECIPE_FILE};
pub use requirement::{Requirement, RequirementScope};
pub use settings::{SettingValues, SettingsAxis};
