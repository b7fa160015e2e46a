#![allow(dead_code)]

use job_application::{ErrorMap, Field, FormData, FormState, FormValidator, Position, Skill};
use regex::Regex;

/// The reference application that passes every rule.
pub fn valid_manager() -> FormData {
    FormData {
        full_name: "Jane Doe".to_string(),
        email: "jane@x.com".to_string(),
        phone_number: "5551234567".to_string(),
        applying_for: Some(Position::Manager),
        management_experience: "5 years".to_string(),
        additional_skills: [Skill::Css].into_iter().collect(),
        preferred_interview_time: "2024-01-01T10:00".to_string(),
        ..FormData::default()
    }
}

pub fn valid_developer() -> FormData {
    FormData {
        applying_for: Some(Position::Developer),
        relevant_experience: "3".to_string(),
        management_experience: String::new(),
        ..valid_manager()
    }
}

pub fn valid_designer() -> FormData {
    FormData {
        applying_for: Some(Position::Designer),
        relevant_experience: "2".to_string(),
        portfolio_url: "https://jane.design/work".to_string(),
        management_experience: String::new(),
        ..valid_manager()
    }
}

pub fn validate(data: &FormData) -> ErrorMap {
    FormValidator::new().validate(data)
}

pub fn error_for(data: &FormData, field: Field) -> Option<String> {
    validate(data).get(field).map(str::to_string)
}

/// All subsets of the skill catalog, including the empty one.
pub fn skill_subsets() -> Vec<Vec<Skill>> {
    (0..1u8 << Skill::ALL.len())
        .map(|mask| {
            Skill::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, skill)| skill)
                .collect()
        })
        .collect()
}

/// A form state holding the given data, built through the edit operations.
pub fn state_for(data: &FormData) -> FormState {
    let mut state = FormState::new();
    for field in Field::ALL {
        if field != Field::AdditionalSkills {
            state.set_field(field, data.value(field)).unwrap();
        }
    }
    for skill in &data.additional_skills {
        state.toggle_skill(*skill, true);
    }
    state
}

fn unescape(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Reads an attribute from the inside of a tag. Bare attributes read as "".
fn attr(tag: &str, name: &str) -> Option<String> {
    let pattern = Regex::new(&format!(r#"\s{name}(?:="([^"]*)")?(?:[\s/>]|$)"#)).unwrap();
    pattern
        .captures(tag)
        .map(|caps| caps.get(1).map_or_else(String::new, |v| unescape(v.as_str())))
}

/// The name/value pairs a browser posts for a rendered form: every named
/// input, checked checkboxes only, and the selected option of each select.
pub fn posted_pairs(html: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for tag in Regex::new(r"<input\b[^>]*>").unwrap().find_iter(html) {
        let tag = tag.as_str();
        let Some(name) = attr(tag, "name") else {
            continue;
        };
        let checkbox = attr(tag, "type").as_deref() == Some("checkbox");
        if checkbox && attr(tag, "checked").is_none() {
            continue;
        }
        pairs.push((name, attr(tag, "value").unwrap_or_default()));
    }

    let select = Regex::new(r"(?s)<select\b([^>]*)>(.*?)</select>").unwrap();
    let option = Regex::new(r"<option\b([^>]*)>").unwrap();
    for caps in select.captures_iter(html) {
        let Some(name) = attr(&caps[1], "name") else {
            continue;
        };
        let value = option
            .captures_iter(&caps[2])
            .find(|o| attr(&o[1], "selected").is_some())
            .and_then(|o| attr(&o[1], "value"))
            .unwrap_or_default();
        pairs.push((name, value));
    }

    pairs
}

/// Encodes pairs as an `application/x-www-form-urlencoded` body.
pub fn encode_body(pairs: &[(String, String)]) -> String {
    let encode = |s: &str| -> String {
        s.bytes()
            .map(|b| match b {
                b' ' => "+".to_string(),
                b if b.is_ascii_alphanumeric() || b"-_.*".contains(&b) => char::from(b).to_string(),
                b => format!("%{b:02X}"),
            })
            .collect()
    };
    pairs
        .iter()
        .map(|(name, value)| format!("{}={}", encode(name), encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
