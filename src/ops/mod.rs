//! High-level operations.
//!
//! This module contains the implementation of recipe commands.

pub mod evaluate;
pub mod recipe_add;
pub mod recipe_new;
pub mod settings;

pub use evaluate::{export_manifest, lint, load_manifest, manifest_to_json};
pub use recipe_add::{add_requirement, remove_requirement, AddOptions, AddResult, RemoveResult};
pub use recipe_new::{init_recipe, new_recipe, NewOptions};
pub use settings::{bind_settings, resolve_folders};
