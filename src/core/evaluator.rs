//! Manifest evaluator.
//!
//! The evaluator accumulates declarations through a fixed set of
//! operations and produces an immutable [`Manifest`] snapshot. Every
//! operation is optional; skipping one leaves its part of the manifest
//! empty.
//!
//! Validation happens at the declaration call. A rejected declaration
//! leaves the accumulated state untouched, so the caller sees either every
//! declaration applied or the first invalid one reported.

use miette::Diagnostic;
use thiserror::Error;

use crate::core::generator::Generator;
use crate::core::layout::Layout;
use crate::core::manifest::Manifest;
use crate::core::requirement::{Requirement, RequirementScope};
use crate::core::settings::SettingsAxis;

/// A rejected declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum EvaluatorError {
    #[error("settings axis `{axis}` is declared more than once")]
    #[diagnostic(
        code(recipe::evaluate::duplicate_axis),
        help("Remove the repeated `{axis}` entry from `settings`")
    )]
    DuplicateAxis { axis: String },

    #[error("requirement `{name}` is already declared in the {scope} scope")]
    #[diagnostic(
        code(recipe::evaluate::duplicate_requirement),
        help("Keep a single `{name}` entry per scope; the version is not part of its identity")
    )]
    DuplicateRequirement {
        name: String,
        scope: RequirementScope,
    },

    #[error("unknown layout `{name}`")]
    #[diagnostic(
        code(recipe::evaluate::unknown_layout),
        help("Use one of: {expected}")
    )]
    UnknownLayout { name: String, expected: String },

    #[error("invalid requirement: {reason}")]
    #[diagnostic(
        code(recipe::evaluate::invalid_requirement),
        help("Write requirements as `name` or `name/version`")
    )]
    InvalidRequirement { reason: String },
}

impl EvaluatorError {
    /// `name` is not a recognized layout.
    pub fn unknown_layout(name: impl Into<String>) -> Self {
        EvaluatorError::UnknownLayout {
            name: name.into(),
            expected: Layout::recognized().join(", "),
        }
    }

    /// The help text shown alongside this error.
    pub fn help_text(&self) -> Option<String> {
        Diagnostic::help(self).map(|h| h.to_string())
    }
}

/// Builder accumulating declarations for one evaluation run.
#[derive(Debug, Clone, Default)]
pub struct ManifestEvaluator {
    settings: Vec<SettingsAxis>,
    generators: Vec<Generator>,
    requirements: Vec<Requirement>,
    layout: Option<Layout>,
}

impl ManifestEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare settings axes.
    ///
    /// Fails if a name repeats within `names` or was declared by an
    /// earlier call. Nothing is recorded on failure.
    pub fn declare_settings<I, S>(&mut self, names: I) -> Result<&mut Self, EvaluatorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut staged: Vec<SettingsAxis> = Vec::new();

        for name in names {
            let axis = SettingsAxis::new(name);
            if self.settings.contains(&axis) || staged.contains(&axis) {
                return Err(EvaluatorError::DuplicateAxis {
                    axis: axis.as_str().to_string(),
                });
            }
            staged.push(axis);
        }

        tracing::debug!(
            "declared settings: {}",
            staged.iter().map(SettingsAxis::as_str).collect::<Vec<_>>().join(", ")
        );
        self.settings.extend(staged);
        Ok(self)
    }

    /// Declare generators.
    ///
    /// A generator that is already declared keeps its original position.
    pub fn declare_generators<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let generator = Generator::new(name);

            if self.generators.contains(&generator) {
                tracing::debug!("generator `{}` already declared", generator);
                continue;
            }

            if !generator.is_known() {
                match generator.suggestion() {
                    Some(known) => tracing::warn!(
                        "generator `{}` is not recognized (did you mean `{}`?)",
                        generator,
                        known
                    ),
                    None => tracing::warn!("generator `{}` is not recognized", generator),
                }
            }

            self.generators.push(generator);
        }
        self
    }

    /// Add a requirement.
    ///
    /// `version` of `None` leaves the choice to the resolver.
    pub fn add_requirement(
        &mut self,
        name: &str,
        version: Option<&str>,
        scope: RequirementScope,
    ) -> Result<&mut Self, EvaluatorError> {
        self.require(Requirement::new(name, version.map(str::to_string), scope))
    }

    /// Add an already-built requirement.
    ///
    /// Every requirement passes through here, so names and versions are
    /// checked here whichever way they were built.
    pub fn require(&mut self, requirement: Requirement) -> Result<&mut Self, EvaluatorError> {
        requirement
            .validate()
            .map_err(|reason| EvaluatorError::InvalidRequirement { reason })?;

        if self.requirements.iter().any(|r| r.same_slot(&requirement)) {
            return Err(EvaluatorError::DuplicateRequirement {
                name: requirement.name().to_string(),
                scope: requirement.scope(),
            });
        }

        tracing::debug!("declared requirement {}", requirement);
        self.requirements.push(requirement);
        Ok(self)
    }

    /// Select the layout. A later call replaces an earlier one.
    pub fn set_layout(&mut self, convention: &str) -> Result<&mut Self, EvaluatorError> {
        let layout = Layout::from_name(convention)
            .ok_or_else(|| EvaluatorError::unknown_layout(convention))?;

        if let Some(previous) = self.layout.replace(layout) {
            if previous != layout {
                tracing::debug!("layout `{}` replaced by `{}`", previous, layout);
            }
        }
        Ok(self)
    }

    /// Produce the manifest for everything declared so far.
    pub fn evaluate(&self) -> Manifest {
        Manifest::new(
            self.settings.clone(),
            self.generators.clone(),
            self.requirements.clone(),
            self.layout,
        )
    }
}
