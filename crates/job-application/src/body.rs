//! Decoding of `application/x-www-form-urlencoded` bodies posted by the form.

use crate::data::FormData;
use crate::error::Result;

/// Splits a form body into decoded `(name, value)` pairs.
///
/// Repeated names are kept in order, which is how checkbox groups arrive.
#[must_use]
pub fn parse_form_body(body: &str) -> Vec<(String, String)> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(name), decode_component(value))
        })
        .collect()
}

/// Decodes a form body straight into [`FormData`].
///
/// # Errors
///
/// See [`FormData::from_pairs`].
pub fn form_data_from_body(body: &str) -> Result<FormData> {
    FormData::from_pairs(parse_form_body(body))
}

/// Decodes `+` and `%XX` escapes. Malformed escapes are kept as written.
fn decode_component(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let escaped = bytes
                    .get(i + 1..i + 3)
                    .and_then(|hex| std::str::from_utf8(hex).ok())
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                if let Some(byte) = escaped {
                    out.push(byte);
                    i += 3;
                    continue;
                }
                out.push(b'%');
            }
            byte => out.push(byte),
        }
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}
