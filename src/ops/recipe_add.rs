//! Implementation of `recipe add` and `recipe remove`.
//!
//! Both edit Recipe.toml in place through `toml_edit`, so comments and
//! formatting outside the touched array survive.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use toml_edit::{value, Array, DocumentMut, Item, Table, Value};

use crate::core::recipe::{RecipeFile, RequirementSection, RECIPE_FILE};
use crate::core::requirement::Requirement;
use crate::util::diagnostic::suggestions;
use crate::util::fs;

/// Options for adding a requirement.
#[derive(Debug, Clone)]
pub struct AddOptions {
    /// `name` or `name/version`
    pub reference: String,

    /// `[requirements]` key to add to
    pub section: RequirementSection,

    /// Validate without writing
    pub dry_run: bool,
}

/// Outcome of [`add_requirement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddResult {
    Added {
        requirement: Requirement,
        section: RequirementSection,
    },
    /// The section already listed the package; its entry was replaced.
    Updated {
        requirement: Requirement,
        section: RequirementSection,
        from: String,
    },
}

/// Outcome of [`remove_requirement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveResult {
    /// Removed entries as `(section, entry)`.
    pub removed: Vec<(RequirementSection, String)>,
}

/// Add a requirement to Recipe.toml.
///
/// The edited recipe is evaluated before it is written, so a change that
/// would make the recipe invalid leaves the file untouched.
pub fn add_requirement(manifest_path: &Path, opts: &AddOptions) -> Result<AddResult> {
    let requirement = Requirement::parse_reference(&opts.reference, opts.section.scope())
        .map_err(|reason| anyhow!(reason))?;

    let mut doc = load_document(manifest_path)?;
    let array = section_array_mut(&mut doc, opts.section)?;

    let existing = array
        .iter()
        .position(|entry| entry_name(entry).as_deref() == Some(requirement.name()));

    let result = match existing {
        Some(index) => {
            let previous = array.replace(index, requirement.reference());
            AddResult::Updated {
                requirement,
                section: opts.section,
                from: entry_display(&previous),
            }
        }
        None => {
            array.push(requirement.reference());
            AddResult::Added {
                requirement,
                section: opts.section,
            }
        }
    };

    let updated = doc.to_string();
    RecipeFile::parse(&updated, manifest_path)?;

    if !opts.dry_run {
        fs::write_string(manifest_path, &updated)?;
    }

    Ok(result)
}

/// Remove a requirement from Recipe.toml.
///
/// With `section` of `None`, the name is removed from every section.
pub fn remove_requirement(
    manifest_path: &Path,
    name: &str,
    section: Option<RequirementSection>,
) -> Result<RemoveResult> {
    let mut doc = load_document(manifest_path)?;
    let mut removed = Vec::new();

    if let Some(requirements) = doc
        .get_mut("requirements")
        .and_then(Item::as_table_like_mut)
    {
        for &candidate in RequirementSection::ALL {
            if section.is_some_and(|s| s != candidate) {
                continue;
            }

            let Some(array) = requirements
                .get_mut(candidate.key())
                .and_then(Item::as_array_mut)
            else {
                continue;
            };

            let matching: Vec<usize> = array
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry_name(entry).as_deref() == Some(name))
                .map(|(index, _)| index)
                .collect();

            for index in matching.into_iter().rev() {
                let entry = array.remove(index);
                removed.push((candidate, entry_display(&entry)));
            }
        }
    }

    if removed.is_empty() {
        bail!(
            "requirement `{}` not found in {}\n{}",
            name,
            RECIPE_FILE,
            suggestions::REQUIREMENT_NOT_FOUND
        );
    }

    fs::write_string(manifest_path, &doc.to_string())?;

    Ok(RemoveResult { removed })
}

fn load_document(manifest_path: &Path) -> Result<DocumentMut> {
    let content = fs::read_to_string(manifest_path)?;
    content
        .parse()
        .with_context(|| format!("failed to parse {}", manifest_path.display()))
}

/// Get the array for a section, creating `[requirements]` and the key if needed.
fn section_array_mut(doc: &mut DocumentMut, section: RequirementSection) -> Result<&mut Array> {
    let requirements = doc
        .entry("requirements")
        .or_insert(Item::Table(Table::new()))
        .as_table_like_mut()
        .context("`requirements` must be a table")?;

    requirements
        .entry(section.key())
        .or_insert(value(Array::new()))
        .as_array_mut()
        .with_context(|| format!("`requirements.{}` must be an array", section.key()))
}

/// Package name of an array entry.
fn entry_name(entry: &Value) -> Option<String> {
    match entry {
        Value::String(s) => {
            let reference = s.value();
            let name = reference.split_once('/').map_or(reference.as_str(), |(n, _)| n);
            Some(name.trim().to_string())
        }
        Value::InlineTable(table) => table.get("name").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn entry_display(entry: &Value) -> String {
    match entry {
        Value::String(s) => s.value().clone(),
        Value::InlineTable(table) => {
            let name = table.get("name").and_then(Value::as_str).unwrap_or("?");
            match table.get("version").and_then(Value::as_str) {
                Some(version) => format!("{}/{}", name, version),
                None => name.to_string(),
            }
        }
        other => other.to_string().trim().to_string(),
    }
}
