//! Walks one applicant through the form and prints the resulting page.
//!
//! Run with `cargo run -p job-application --example apply`.

use job_application::{
    form_data_from_body, render_page, Field, FormEvent, FormState, RenderOptions, Skill,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = RenderOptions::new().action("/apply");
    let mut state = FormState::new();

    // First attempt: only a name and a category.
    for (name, value) in [("fullName", "Jane Doe"), ("applyingFor", "Designer")] {
        state.apply(FormEvent::SetField {
            name: name.to_string(),
            value: value.to_string(),
        })?;
    }
    if let Err(err) = state.submit() {
        info!("First attempt rejected: {err}");
        print!("{}", state.errors());
    }

    // Second attempt: the body a browser would post from the rendered form.
    let body = "fullName=Jane+Doe&email=jane%40x.com&phoneNumber=5551234567\
                &applyingFor=Designer&relevantExperience=4\
                &portfolioURL=https%3A%2F%2Fjane.design\
                &preferredInterviewTime=2024-01-01T10%3A00";
    let data = form_data_from_body(body)?;
    for field in Field::ALL {
        if field != Field::AdditionalSkills {
            state.set_field(field, data.value(field))?;
        }
    }
    state.toggle_skill(Skill::Css, true);
    state.toggle_skill(Skill::JavaScript, true);
    state.submit()?;

    println!("{}", render_page(&state, &options)?);
    Ok(())
}
