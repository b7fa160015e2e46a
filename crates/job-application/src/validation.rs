//! Field validators and the application rule table.
//!
//! Each [`FieldRule`] pairs a field with an ordered list of value
//! validators. A rule only runs when its field applies to the selected
//! position (see [`Field::applies_to`]), and the first failing validator
//! supplies the field's message, so every field reports at most one error.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::data::{Field, FormData};
use crate::error::ErrorMap;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

static PORTFOLIO_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^\s$.?#].[^\s]*$").expect("portfolio URL pattern compiles")
});

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validates a value and returns an error message if invalid.
    ///
    /// # Errors
    ///
    /// Returns the validator's message when the value is rejected.
    fn validate(&self, value: &str) -> Result<(), String>;

    /// Returns the error message for this validator.
    fn message(&self) -> &str;
}

/// Validator that requires a non-empty value. Whitespace counts as a value.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates a new RequiredValidator with default message.
    #[must_use]
    pub fn new() -> Self {
        Self::with_message("This field is required.")
    }

    /// Creates a new RequiredValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.is_empty() {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator for email addresses: something, `@`, something, `.`, something.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    message: String,
}

impl EmailValidator {
    /// Creates a new EmailValidator with default message.
    #[must_use]
    pub fn new() -> Self {
        Self::with_message("Enter a valid email address.")
    }

    /// Creates a new EmailValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for EmailValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if EMAIL_PATTERN.is_match(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Reads a number the way browsers coerce form input with `Number()`.
///
/// Surrounding whitespace is ignored and blank text reads as zero. Decimal
/// literals may carry a sign and an exponent, `Infinity` is accepted, and
/// unsigned `0x`, `0o` and `0b` prefixes select the radix. Anything else,
/// including Rust-only spellings such as `inf` and `NaN`, is rejected.
fn parse_number(value: &str) -> Option<f64> {
    let text = value.trim();
    if text.is_empty() {
        return Some(0.0);
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&text[2..], radix);
    }

    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned == "Infinity" {
        return Some(if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    if unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        text.parse().ok()
    } else {
        None
    }
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|digit| acc.mul_add(f64::from(radix), f64::from(digit)))
    })
}

/// Validator that accepts any value a browser reads as a number.
#[derive(Debug, Clone)]
pub struct NumericValidator {
    message: String,
}

impl NumericValidator {
    /// Creates a new NumericValidator with default message.
    #[must_use]
    pub fn new() -> Self {
        Self::with_message("Enter a valid number.")
    }

    /// Creates a new NumericValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for NumericValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for NumericValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        parse_number(value)
            .map(|_| ())
            .ok_or_else(|| self.message.clone())
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator for numbers strictly greater than zero.
#[derive(Debug, Clone)]
pub struct PositiveNumberValidator {
    message: String,
}

impl PositiveNumberValidator {
    /// Creates a new PositiveNumberValidator with default message.
    #[must_use]
    pub fn new() -> Self {
        Self::with_message("Value must be greater than 0.")
    }

    /// Creates a new PositiveNumberValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for PositiveNumberValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for PositiveNumberValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        match parse_number(value) {
            Some(number) if number > 0.0 => Ok(()),
            _ => Err(self.message.clone()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator for portfolio links: an `http` or `https` URL without spaces.
#[derive(Debug, Clone)]
pub struct PortfolioUrlValidator {
    message: String,
}

impl PortfolioUrlValidator {
    /// Creates a new PortfolioUrlValidator with default message.
    #[must_use]
    pub fn new() -> Self {
        Self::with_message("Enter a valid URL.")
    }

    /// Creates a new PortfolioUrlValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for PortfolioUrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for PortfolioUrlValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if PORTFOLIO_URL_PATTERN.is_match(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// The validators guarding one field.
pub struct FieldRule {
    /// Field the rule reports on.
    pub field: Field,
    /// Validators, run in order until one fails.
    pub validators: Vec<Box<dyn Validator>>,
}

impl std::fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .field(
                "messages",
                &self.validators.iter().map(|v| v.message()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl FieldRule {
    /// Creates a rule with no validators.
    #[must_use]
    pub const fn new(field: Field) -> Self {
        Self {
            field,
            validators: Vec::new(),
        }
    }

    /// Adds a validator.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Returns whether the rule runs for this data.
    #[must_use]
    pub const fn applies(&self, data: &FormData) -> bool {
        self.field.applies_to(data.applying_for)
    }

    /// Runs the rule against the data.
    ///
    /// # Errors
    ///
    /// Returns the message of the first failing validator. A rule whose field
    /// does not apply always passes.
    pub fn check(&self, data: &FormData) -> Result<(), String> {
        if !self.applies(data) {
            return Ok(());
        }
        let value = data.value(self.field);
        self.validators
            .iter()
            .try_for_each(|validator| validator.validate(&value))
    }
}

/// Validates application data against the rule table.
#[derive(Debug)]
pub struct FormValidator {
    rules: Vec<FieldRule>,
}

impl FormValidator {
    /// Creates a validator with the job application rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(application_rules())
    }

    /// Creates a validator from a custom rule table.
    #[must_use]
    pub const fn with_rules(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// Returns the rules in table order.
    #[must_use]
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Returns the rule for a field.
    #[must_use]
    pub fn rule(&self, field: Field) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.field == field)
    }

    /// Validates the data. An empty map means every applicable rule passed.
    #[must_use]
    pub fn validate(&self, data: &FormData) -> ErrorMap {
        let mut errors = ErrorMap::new();
        for rule in &self.rules {
            if let Err(message) = rule.check(data) {
                errors.insert(rule.field, message);
            }
        }

        debug!(
            error_count = errors.len(),
            fields = ?errors.fields(),
            "Validated application"
        );
        errors
    }
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// The job application rule table.
#[must_use]
pub fn application_rules() -> Vec<FieldRule> {
    const EMAIL: &str = "Email is invalid";
    const PHONE: &str = "Phone Number is invalid";
    const EXPERIENCE: &str = "Relevant Experience must be greater than 0";
    const PORTFOLIO: &str = "Portfolio URL is invalid";

    vec![
        FieldRule::new(Field::FullName)
            .validator(RequiredValidator::with_message("Full Name is required")),
        FieldRule::new(Field::Email)
            .validator(RequiredValidator::with_message(EMAIL))
            .validator(EmailValidator::with_message(EMAIL)),
        FieldRule::new(Field::PhoneNumber)
            .validator(RequiredValidator::with_message(PHONE))
            .validator(NumericValidator::with_message(PHONE)),
        FieldRule::new(Field::ApplyingFor).validator(RequiredValidator::with_message(
            "Applying for Position is required",
        )),
        FieldRule::new(Field::RelevantExperience)
            .validator(RequiredValidator::with_message(EXPERIENCE))
            .validator(PositiveNumberValidator::with_message(EXPERIENCE)),
        FieldRule::new(Field::PortfolioUrl)
            .validator(RequiredValidator::with_message(PORTFOLIO))
            .validator(PortfolioUrlValidator::with_message(PORTFOLIO)),
        FieldRule::new(Field::ManagementExperience).validator(RequiredValidator::with_message(
            "Management Experience is required",
        )),
        FieldRule::new(Field::AdditionalSkills).validator(RequiredValidator::with_message(
            "At least one skill must be selected",
        )),
        FieldRule::new(Field::PreferredInterviewTime).validator(RequiredValidator::with_message(
            "Preferred Interview Time is required",
        )),
    ]
}
