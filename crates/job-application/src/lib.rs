//! # job-application
//!
//! A job application form whose required fields depend on the position
//! being applied for, with Bootstrap 5 rendering.
//!
//! This crate provides:
//! - The form data record and its field vocabulary
//! - A declarative validation rule table gated on the selected position
//! - A caller-owned form state with an immutable submission snapshot
//! - HTML rendering of the form and of the submitted data
//! - Decoding of the url-encoded body the rendered form posts
//!
//! ## Quick Start
//!
//! ```rust
//! use job_application::{Field, FormState, Skill};
//!
//! let mut state = FormState::new();
//! state.set_field(Field::FullName, "Jane Doe")?;
//! state.set_field(Field::Email, "jane@x.com")?;
//! state.set_field(Field::PhoneNumber, "5551234567")?;
//! state.set_field(Field::ApplyingFor, "Manager")?;
//! state.set_field(Field::ManagementExperience, "5 years")?;
//! state.toggle_skill(Skill::Css, true);
//! state.set_field(Field::PreferredInterviewTime, "2024-01-01T10:00")?;
//!
//! let submitted = state.submit()?;
//! assert_eq!(submitted.data().full_name, "Jane Doe");
//! # Ok::<(), job_application::FormError>(())
//! ```
//!
//! ## Conditional Rules
//!
//! Fields that do not apply to the selected position are never validated:
//!
//! ```rust
//! use job_application::{Field, FormData, FormValidator, Position};
//!
//! let mut data = FormData::new();
//! data.applying_for = Some(Position::Developer);
//! data.portfolio_url = "not a url".to_string();
//! data.relevant_experience = "0".to_string();
//!
//! let errors = FormValidator::new().validate(&data);
//! assert_eq!(
//!     errors.get(Field::RelevantExperience),
//!     Some("Relevant Experience must be greater than 0"),
//! );
//! assert!(!errors.contains(Field::PortfolioUrl));
//! ```
//!
//! ## Rendering
//!
//! ```rust
//! use job_application::{render_page, FormState, RenderOptions};
//!
//! let mut state = FormState::new();
//! let _ = state.submit();
//!
//! let html = render_page(&state, &RenderOptions::new().action("/apply"))?;
//! assert!(html.contains("Full Name is required"));
//! # Ok::<(), job_application::FormError>(())
//! ```

mod body;
mod data;
mod error;
pub mod render;
mod state;
pub mod validation;

pub use body::{form_data_from_body, parse_form_body};
pub use data::{Field, FormData, Position, Skill};
pub use error::{ErrorMap, FormError, Result};
pub use render::{render_form, render_page, render_submitted, RenderOptions};
pub use state::{FormEvent, FormState, Phase, SubmittedApplication};
pub use validation::{FormValidator, Validator};
