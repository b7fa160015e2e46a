//! Bootstrap 5 rendering of the application form and the submitted data.

use ironhtml::typed::Element;
use ironhtml_elements::{Button, Div, Form, Input, Label, Option_, Pre, Select, H1, H2};

use crate::data::{Field, FormData, Position, Skill};
use crate::error::{ErrorMap, Result};
use crate::state::{FormState, SubmittedApplication};

/// Page-level settings for rendering the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Heading shown above the form.
    pub title: String,
    /// Form `action` attribute.
    pub action: String,
    /// Form `method` attribute.
    pub method: String,
    /// Text of the submit button.
    pub submit_label: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "Job Application Form".to_string(),
            action: String::new(),
            method: "post".to_string(),
            submit_label: "Submit".to_string(),
        }
    }
}

impl RenderOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the heading.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the form action URL.
    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Sets the form method.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Sets the submit button text.
    #[must_use]
    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }
}

fn field_id(field: Field) -> String {
    format!("id_{}", field.name())
}

fn control_class(base: &str, invalid: bool) -> String {
    if invalid {
        format!("{base} is-invalid")
    } else {
        base.to_string()
    }
}

fn input_type(field: Field) -> &'static str {
    match field {
        Field::Email => "email",
        Field::RelevantExperience => "number",
        Field::PreferredInterviewTime => "datetime-local",
        _ => "text",
    }
}

fn render_input(field: Field, value: &str, invalid: bool) -> String {
    let id = field_id(field);
    Element::<Input>::new()
        .attr("type", input_type(field))
        .class(control_class("form-control", invalid))
        .id(&id)
        .attr("name", field.name())
        .attr("value", value)
        .render()
}

fn render_position_select(current: Option<Position>, invalid: bool) -> String {
    let id = field_id(Field::ApplyingFor);
    let mut select = Element::<Select>::new()
        .class(control_class("form-select", invalid))
        .id(&id)
        .attr("name", Field::ApplyingFor.name())
        .child::<Option_, _>(|o| o.attr("value", "").text("Select..."));

    for position in Position::ALL {
        let selected = current == Some(position);
        select = select.child::<Option_, _>(|o| {
            let o = o.attr("value", position.as_str()).text(position.as_str());
            if selected {
                o.bool_attr("selected")
            } else {
                o
            }
        });
    }

    select.render()
}

fn render_skill_checkboxes(data: &FormData, invalid: bool) -> String {
    let mut html = String::new();
    for skill in Skill::ALL {
        let id = format!("{}_{}", field_id(Field::AdditionalSkills), skill.as_str());
        let checked = data.has_skill(skill);
        Element::<Div>::new()
            .class("form-check form-check-inline")
            .child::<Input, _>(|i| {
                let i = i
                    .attr("type", "checkbox")
                    .class(control_class("form-check-input", invalid))
                    .id(&id)
                    .attr("name", Field::AdditionalSkills.name())
                    .attr("value", skill.as_str());
                if checked {
                    i.bool_attr("checked")
                } else {
                    i
                }
            })
            .child::<Label, _>(|l| {
                l.attr("for", &id)
                    .class("form-check-label")
                    .text(skill.as_str())
            })
            .render_to(&mut html);
    }
    html
}

/// Fills a field group with its label, control, and inline error.
fn field_group(
    group: Element<Div>,
    field: Field,
    data: &FormData,
    errors: &ErrorMap,
) -> Element<Div> {
    let error = errors.get(field);
    let invalid = error.is_some();

    let control = match field {
        Field::ApplyingFor => render_position_select(data.applying_for, invalid),
        Field::AdditionalSkills => render_skill_checkboxes(data, invalid),
        _ => render_input(field, &data.value(field), invalid),
    };

    // The skills label names a group, not a single control.
    let label_for = match field {
        Field::AdditionalSkills => None,
        _ => Some(field_id(field)),
    };

    group
        .class("mb-3")
        .child::<Label, _>(|l| {
            let l = l.class("form-label d-block").text(field.label());
            match &label_for {
                Some(id) => l.attr("for", id),
                None => l,
            }
        })
        .raw(control)
        .when(invalid, |d| {
            d.child::<Div, _>(|e| {
                e.class("invalid-feedback d-block")
                    .text(error.unwrap_or(""))
            })
        })
}

/// Renders one field with its label, control, and inline error.
#[must_use]
pub fn render_field(field: Field, data: &FormData, errors: &ErrorMap) -> String {
    field_group(Element::<Div>::new(), field, data, errors).render()
}

/// Renders the form with the sections that apply to the selected position.
#[must_use]
pub fn render_form(state: &FormState, options: &RenderOptions) -> String {
    let data = state.data();
    Element::<Form>::new()
        .attr("action", &options.action)
        .attr("method", &options.method)
        .bool_attr("novalidate")
        .children(Field::applicable(data.applying_for), |field, group: Element<Div>| {
            field_group(group, field, data, state.errors())
        })
        .child::<Button, _>(|b| {
            b.attr("type", "submit")
                .class("btn btn-primary")
                .text(&options.submit_label)
        })
        .render()
}

/// Renders the submitted data as a heading and an indented JSON block.
///
/// # Errors
///
/// Returns [`crate::FormError::Serialization`] if the snapshot cannot be
/// encoded.
pub fn render_submitted(submitted: &SubmittedApplication) -> Result<String> {
    let json = submitted.to_json_pretty()?;

    Ok(Element::<Div>::new()
        .class("mt-4")
        .child::<H2, _>(|h| h.class("h4").text("Submitted Data"))
        .child::<Pre, _>(|p| p.class("bg-light border rounded p-3").text(json))
        .render())
}

/// Renders the whole card: title, form, and the submitted data if any.
///
/// # Errors
///
/// See [`render_submitted`].
pub fn render_page(state: &FormState, options: &RenderOptions) -> Result<String> {
    let form_html = render_form(state, options);
    let submitted_html = state
        .submitted()
        .map(render_submitted)
        .transpose()?
        .unwrap_or_default();

    Ok(Element::<Div>::new()
        .class("card")
        .child::<Div, _>(|body| {
            body.class("card-body")
                .child::<H1, _>(|h| h.class("card-title h3 mb-4").text(&options.title))
                .raw(&form_html)
                .raw(&submitted_html)
        })
        .render())
}
