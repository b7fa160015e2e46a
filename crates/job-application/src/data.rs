//! Form data record and its field vocabulary.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{FormError, Result};

/// Position an applicant is applying for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Software developer.
    Developer,
    /// Designer; also needs a portfolio.
    Designer,
    /// Manager; needs management experience instead of years.
    Manager,
}

impl Position {
    /// All positions, in the order the select lists them.
    pub const ALL: [Self; 3] = [Self::Developer, Self::Designer, Self::Manager];

    /// Returns the position name used as the select value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Developer => "Developer",
            Self::Designer => "Designer",
            Self::Manager => "Manager",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|position| position.as_str() == s)
            .ok_or_else(|| FormError::InvalidValue {
                field: Field::ApplyingFor,
                message: format!("unknown position '{s}'"),
            })
    }
}

/// Skill from the fixed catalog offered as checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    JavaScript,
    #[serde(rename = "CSS")]
    Css,
    Python,
}

impl Skill {
    /// The whole catalog, in display order.
    pub const ALL: [Self; 3] = [Self::JavaScript, Self::Css, Self::Python];

    /// Returns the catalog name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JavaScript => "JavaScript",
            Self::Css => "CSS",
            Self::Python => "Python",
        }
    }
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Skill {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|skill| skill.as_str() == s)
            .ok_or_else(|| FormError::InvalidValue {
                field: Field::AdditionalSkills,
                message: format!("'{s}' is not in the skill catalog"),
            })
    }
}

/// A field of the application form.
///
/// Ordering follows the form layout, so error listings come out top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FullName,
    Email,
    PhoneNumber,
    ApplyingFor,
    RelevantExperience,
    PortfolioUrl,
    ManagementExperience,
    AdditionalSkills,
    PreferredInterviewTime,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Self; 9] = [
        Self::FullName,
        Self::Email,
        Self::PhoneNumber,
        Self::ApplyingFor,
        Self::RelevantExperience,
        Self::PortfolioUrl,
        Self::ManagementExperience,
        Self::AdditionalSkills,
        Self::PreferredInterviewTime,
    ];

    /// Returns the name used for inputs, JSON keys, and error lookups.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::PhoneNumber => "phoneNumber",
            Self::ApplyingFor => "applyingFor",
            Self::RelevantExperience => "relevantExperience",
            Self::PortfolioUrl => "portfolioURL",
            Self::ManagementExperience => "managementExperience",
            Self::AdditionalSkills => "additionalSkills",
            Self::PreferredInterviewTime => "preferredInterviewTime",
        }
    }

    /// Returns the label shown next to the input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::PhoneNumber => "Phone Number",
            Self::ApplyingFor => "Applying for Position",
            Self::RelevantExperience => "Relevant Experience (years)",
            Self::PortfolioUrl => "Portfolio URL",
            Self::ManagementExperience => "Management Experience",
            Self::AdditionalSkills => "Additional Skills",
            Self::PreferredInterviewTime => "Preferred Interview Time",
        }
    }

    /// Returns whether the field is part of the form for the given position.
    ///
    /// Fields that do not apply are neither shown nor validated.
    #[must_use]
    pub const fn applies_to(self, position: Option<Position>) -> bool {
        match self {
            Self::RelevantExperience => {
                matches!(position, Some(Position::Developer | Position::Designer))
            }
            Self::PortfolioUrl => matches!(position, Some(Position::Designer)),
            Self::ManagementExperience => matches!(position, Some(Position::Manager)),
            _ => true,
        }
    }

    /// Returns the fields that apply to the given position, in form order.
    #[must_use]
    pub fn applicable(position: Option<Position>) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|field| field.applies_to(position))
            .collect()
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// The values entered into the application form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(with = "position_or_blank")]
    pub applying_for: Option<Position>,
    pub relevant_experience: String,
    #[serde(rename = "portfolioURL")]
    pub portfolio_url: String,
    pub management_experience: String,
    pub additional_skills: BTreeSet<Skill>,
    pub preferred_interview_time: String,
}

impl FormData {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds form data from decoded `name=value` pairs.
    ///
    /// Every `additionalSkills` pair selects one skill; other names replace
    /// the matching scalar field.
    ///
    /// # Errors
    ///
    /// Fails on names outside the form or values that cannot be stored.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut data = Self::new();
        for (name, value) in pairs {
            let (name, value) = (name.as_ref(), value.as_ref());
            if name == Field::AdditionalSkills.name() {
                data.toggle_skill(value.parse()?, true);
            } else {
                data.set(name.parse()?, value)?;
            }
        }
        Ok(data)
    }

    /// Replaces a scalar field.
    ///
    /// An empty value for `applyingFor` unsets the position.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotScalar`] for `additionalSkills` and
    /// [`FormError::InvalidValue`] for an unknown position.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        trace!(field = field.name(), value = %value, "Setting field");

        match field {
            Field::FullName => self.full_name = value,
            Field::Email => self.email = value,
            Field::PhoneNumber => self.phone_number = value,
            Field::ApplyingFor => {
                self.applying_for = if value.is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                };
            }
            Field::RelevantExperience => self.relevant_experience = value,
            Field::PortfolioUrl => self.portfolio_url = value,
            Field::ManagementExperience => self.management_experience = value,
            Field::AdditionalSkills => return Err(FormError::NotScalar(field)),
            Field::PreferredInterviewTime => self.preferred_interview_time = value,
        }
        Ok(())
    }

    /// Selects or deselects a skill. Repeating the same call has no effect.
    pub fn toggle_skill(&mut self, skill: Skill, included: bool) {
        trace!(skill = skill.as_str(), included, "Toggling skill");
        if included {
            self.additional_skills.insert(skill);
        } else {
            self.additional_skills.remove(&skill);
        }
    }

    /// Returns whether the skill is selected.
    #[must_use]
    pub fn has_skill(&self, skill: Skill) -> bool {
        self.additional_skills.contains(&skill)
    }

    /// Returns the text value of a field as an input would hold it.
    ///
    /// The position is its name or empty; skills are comma-joined, so the
    /// value is empty exactly when no skill is selected.
    #[must_use]
    pub fn value(&self, field: Field) -> Cow<'_, str> {
        match field {
            Field::FullName => Cow::Borrowed(&self.full_name),
            Field::Email => Cow::Borrowed(&self.email),
            Field::PhoneNumber => Cow::Borrowed(&self.phone_number),
            Field::ApplyingFor => Cow::Borrowed(self.applying_for.map_or("", Position::as_str)),
            Field::RelevantExperience => Cow::Borrowed(&self.relevant_experience),
            Field::PortfolioUrl => Cow::Borrowed(&self.portfolio_url),
            Field::ManagementExperience => Cow::Borrowed(&self.management_experience),
            Field::AdditionalSkills => Cow::Owned(
                self.additional_skills
                    .iter()
                    .map(|skill| skill.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Field::PreferredInterviewTime => Cow::Borrowed(&self.preferred_interview_time),
        }
    }
}

/// Serializes an unset position as an empty string, like the blank select option.
mod position_or_blank {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Position;

    pub fn serialize<S: Serializer>(
        position: &Option<Position>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(position.map_or("", Position::as_str))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Position>, D::Error> {
        let value = String::deserialize(deserializer)?;
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some).map_err(serde::de::Error::custom)
    }
}
