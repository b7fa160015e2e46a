//! Form state: live data, last validation errors, and the submitted snapshot.

use tracing::{debug, info};

use crate::data::{Field, FormData, Skill};
use crate::error::{ErrorMap, FormError, Result};
use crate::validation::FormValidator;

/// Read-only copy of the form data taken when a submission was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedApplication {
    data: FormData,
}

impl SubmittedApplication {
    /// Returns the submitted data.
    #[must_use]
    pub const fn data(&self) -> &FormData {
        &self.data
    }

    /// Renders the submitted data as indented JSON keyed by field name.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Serialization`] if the data cannot be encoded.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.data)?)
    }
}

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No submission has been accepted yet.
    Editing,
    /// A submission was accepted and a snapshot is available.
    Submitted,
}

/// An input event from whatever drives the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// A scalar input changed, identified by its field name.
    SetField { name: String, value: String },
    /// A skill checkbox changed.
    ToggleSkill { skill: Skill, included: bool },
    /// The submit control was used.
    Submit,
    /// Start over with an empty form.
    Reset,
}

/// State of one application form, owned by the caller.
#[derive(Debug, Default)]
pub struct FormState {
    data: FormData,
    errors: ErrorMap,
    submitted: Option<SubmittedApplication>,
    validator: FormValidator,
}

impl FormState {
    /// Creates an empty form in the editing phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a form validated by a custom rule table.
    #[must_use]
    pub fn with_validator(validator: FormValidator) -> Self {
        Self {
            validator,
            ..Self::default()
        }
    }

    /// Returns the live data.
    #[must_use]
    pub const fn data(&self) -> &FormData {
        &self.data
    }

    /// Returns the errors from the last submit attempt.
    #[must_use]
    pub const fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Returns the last accepted submission.
    #[must_use]
    pub const fn submitted(&self) -> Option<&SubmittedApplication> {
        self.submitted.as_ref()
    }

    /// Returns the lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.submitted.is_some() {
            Phase::Submitted
        } else {
            Phase::Editing
        }
    }

    /// Replaces a scalar field.
    ///
    /// # Errors
    ///
    /// See [`FormData::set`].
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<()> {
        self.data.set(field, value)
    }

    /// Replaces a scalar field identified by its name.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] for names outside the form, and
    /// the errors of [`FormData::set`] otherwise.
    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        self.set_field(name.parse()?, value)
    }

    /// Selects or deselects a skill.
    pub fn toggle_skill(&mut self, skill: Skill, included: bool) {
        self.data.toggle_skill(skill, included);
    }

    /// Selects or deselects a skill identified by its catalog name.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidValue`] for names outside the catalog.
    pub fn toggle_skill_by_name(&mut self, name: &str, included: bool) -> Result<()> {
        self.toggle_skill(name.parse()?, included);
        Ok(())
    }

    /// Validates the live data and, if it passes, snapshots it.
    ///
    /// A rejected submission keeps the previous snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Validation`] with the same errors that
    /// [`errors`](Self::errors) reports afterwards.
    pub fn submit(&mut self) -> Result<&SubmittedApplication> {
        let errors = self.validator.validate(&self.data);
        if !errors.is_empty() {
            debug!(error_count = errors.len(), "Submission rejected");
            self.errors = errors.clone();
            return Err(FormError::Validation(errors));
        }

        info!(
            position = %self.data.value(Field::ApplyingFor),
            "Submission accepted"
        );
        self.errors = ErrorMap::new();
        Ok(&*self.submitted.insert(SubmittedApplication {
            data: self.data.clone(),
        }))
    }

    /// Clears the data, the errors, and any snapshot.
    pub fn reset(&mut self) {
        debug!("Resetting form");
        self.data = FormData::new();
        self.errors = ErrorMap::new();
        self.submitted = None;
    }

    /// Applies an input event.
    ///
    /// # Errors
    ///
    /// Propagates the error of the operation the event maps to.
    pub fn apply(&mut self, event: FormEvent) -> Result<()> {
        match event {
            FormEvent::SetField { name, value } => self.set_field_by_name(&name, value),
            FormEvent::ToggleSkill { skill, included } => {
                self.toggle_skill(skill, included);
                Ok(())
            }
            FormEvent::Submit => self.submit().map(|_| ()),
            FormEvent::Reset => {
                self.reset();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Position;

    fn fill_manager(state: &mut FormState) {
        state.set_field(Field::FullName, "Jane Doe").unwrap();
        state.set_field(Field::Email, "jane@x.com").unwrap();
        state.set_field(Field::PhoneNumber, "5551234567").unwrap();
        state.set_field(Field::ApplyingFor, "Manager").unwrap();
        state
            .set_field(Field::ManagementExperience, "5 years")
            .unwrap();
        state.toggle_skill(Skill::Css, true);
        state
            .set_field(Field::PreferredInterviewTime, "2024-01-01T10:00")
            .unwrap();
    }

    #[test]
    fn test_new_state_is_editing() {
        let state = FormState::new();
        assert_eq!(state.phase(), Phase::Editing);
        assert!(state.errors().is_empty());
        assert!(state.submitted().is_none());
        assert_eq!(state.data(), &FormData::new());
    }

    #[test]
    fn test_invalid_submit_stores_errors() {
        let mut state = FormState::new();
        let errors = match state.submit() {
            Err(FormError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {other:?}"),
        };
        assert_eq!(&errors, state.errors());
        assert!(state.errors().contains(Field::ApplyingFor));
        assert_eq!(state.phase(), Phase::Editing);
    }

    #[test]
    fn test_valid_submit_snapshots_data() {
        let mut state = FormState::new();
        fill_manager(&mut state);

        let snapshot = state.submit().unwrap().clone();
        assert_eq!(snapshot.data(), state.data());
        assert_eq!(state.phase(), Phase::Submitted);
        assert!(state.errors().is_empty());

        state.set_field(Field::FullName, "Someone Else").unwrap();
        state.toggle_skill(Skill::Css, false);
        let stored = state.submitted().unwrap();
        assert_eq!(stored, &snapshot);
        assert_eq!(stored.data().full_name, "Jane Doe");
        assert!(stored.data().has_skill(Skill::Css));
    }

    #[test]
    fn test_failed_resubmit_keeps_snapshot() {
        let mut state = FormState::new();
        fill_manager(&mut state);
        state.submit().unwrap();

        state.set_field(Field::Email, "").unwrap();
        assert!(state.submit().is_err());
        assert_eq!(state.errors().get(Field::Email), Some("Email is invalid"));
        assert_eq!(
            state.submitted().unwrap().data().email,
            "jane@x.com".to_string()
        );
    }

    #[test]
    fn test_successful_submit_clears_errors() {
        let mut state = FormState::new();
        assert!(state.submit().is_err());
        assert!(!state.errors().is_empty());

        fill_manager(&mut state);
        state.submit().unwrap();
        assert!(state.errors().is_empty());
    }

    #[test]
    fn test_events() {
        let mut state = FormState::new();
        state
            .apply(FormEvent::SetField {
                name: "applyingFor".to_string(),
                value: "Developer".to_string(),
            })
            .unwrap();
        state
            .apply(FormEvent::ToggleSkill {
                skill: Skill::Python,
                included: true,
            })
            .unwrap();
        assert_eq!(state.data().applying_for, Some(Position::Developer));
        assert!(state.data().has_skill(Skill::Python));

        assert!(matches!(
            state.apply(FormEvent::Submit),
            Err(FormError::Validation(_))
        ));
        assert!(matches!(
            state.apply(FormEvent::SetField {
                name: "salary".to_string(),
                value: "1".to_string(),
            }),
            Err(FormError::UnknownField(_))
        ));

        state.apply(FormEvent::Reset).unwrap();
        assert_eq!(state.data(), &FormData::new());
        assert!(state.errors().is_empty());
    }

    #[test]
    fn test_toggle_skill_by_name() {
        let mut state = FormState::new();
        state.toggle_skill_by_name("JavaScript", true).unwrap();
        assert!(state.data().has_skill(Skill::JavaScript));
        assert!(state.toggle_skill_by_name("Rust", true).is_err());
    }

    #[test]
    fn test_snapshot_json() {
        let mut state = FormState::new();
        fill_manager(&mut state);
        let json = state.submit().unwrap().to_json_pretty().unwrap();
        assert!(json.contains("  \"fullName\": \"Jane Doe\""));
        assert!(json.contains("\"applyingFor\": \"Manager\""));
        assert!(json.contains("\"CSS\""));
    }
}
