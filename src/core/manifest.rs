//! The evaluated manifest.
//!
//! A [`Manifest`] is the immutable snapshot produced by
//! [`ManifestEvaluator::evaluate`](crate::core::evaluator::ManifestEvaluator::evaluate).
//! It is what the dependency resolver (requirements) and the build
//! descriptor generator (settings, generators, layout) consume.

use serde::Serialize;

use crate::core::generator::Generator;
use crate::core::layout::Layout;
use crate::core::requirement::{Requirement, RequirementScope};
use crate::core::settings::SettingsAxis;

/// Normalized result of evaluating a build recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
    settings: Vec<SettingsAxis>,
    generators: Vec<Generator>,
    requirements: Vec<Requirement>,
    layout: Option<Layout>,
}

impl Manifest {
    pub(crate) fn new(
        settings: Vec<SettingsAxis>,
        generators: Vec<Generator>,
        requirements: Vec<Requirement>,
        layout: Option<Layout>,
    ) -> Self {
        Manifest {
            settings,
            generators,
            requirements,
            layout,
        }
    }

    /// Declared settings axes, in declaration order.
    pub fn settings(&self) -> &[SettingsAxis] {
        &self.settings
    }

    /// Generators, in declaration order without repeats.
    pub fn generators(&self) -> &[Generator] {
        &self.generators
    }

    /// All requirements, in declaration order.
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn layout(&self) -> Option<Layout> {
        self.layout
    }

    /// Requirements declared in one scope.
    pub fn requirements_in(&self, scope: RequirementScope) -> impl Iterator<Item = &Requirement> {
        self.requirements.iter().filter(move |r| r.scope() == scope)
    }

    /// Find a requirement by its `(name, scope)` identity.
    pub fn requirement(&self, name: &str, scope: RequirementScope) -> Option<&Requirement> {
        self.requirements
            .iter()
            .find(|r| r.name() == name && r.scope() == scope)
    }

    /// Check if an axis is declared.
    pub fn has_axis(&self, name: &str) -> bool {
        self.settings.iter().any(|a| a.as_str() == name)
    }

    /// Check if nothing at all was declared.
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
            && self.generators.is_empty()
            && self.requirements.is_empty()
            && self.layout.is_none()
    }
}
