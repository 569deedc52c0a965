//! Canonical XML text for a generated record.
//!
//! Output is byte-for-byte deterministic: no declaration, no whitespace between
//! elements, attributes always written as `name` then `value`.

use std::borrow::Cow;
use std::fmt::{Display, Write};

use crate::error::GeneratorError;

/// Render a document of the form
///
/// ```text
/// <root><var name="id" value="…"/><var name="level" value="…"/><objects><object name="…"/>…</objects></root>
/// ```
pub fn render_document<S: AsRef<str>>(
    id: &str,
    level: impl Display,
    objects: &[S],
) -> Result<String, GeneratorError> {
    if objects.is_empty() {
        return Err(GeneratorError::EmptyObjects);
    }

    let level = level.to_string();
    for value in [id, level.as_str()]
        .into_iter()
        .chain(objects.iter().map(|object| object.as_ref()))
    {
        if !is_xml_text(value) {
            return Err(GeneratorError::InvalidCharacter {
                value: value.to_string(),
            });
        }
    }

    let mut xml = String::with_capacity(96 + objects.len() * 48);
    xml.push_str("<root>");
    push_var(&mut xml, "id", id);
    push_var(&mut xml, "level", &level);
    xml.push_str("<objects>");
    for object in objects {
        // Writing into a String cannot fail
        let _ = write!(
            xml,
            r#"<object name="{}"/>"#,
            escape_attribute(object.as_ref())
        );
    }
    xml.push_str("</objects></root>");
    Ok(xml)
}

fn push_var(xml: &mut String, name: &str, value: &str) {
    let _ = write!(
        xml,
        r#"<var name="{}" value="{}"/>"#,
        name,
        escape_attribute(value)
    );
}

/// Whether every character of `value` may appear in an XML 1.0 document
pub fn is_xml_text(value: &str) -> bool {
    value.chars().all(|c| {
        matches!(c,
            '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}')
    })
}

/// Escape a string for use inside a double-quoted attribute value.
///
/// Tabs and line breaks become character references so that attribute value
/// normalization on the reading side returns the original text.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value
        .chars()
        .any(|c| matches!(c, '&' | '<' | '>' | '"' | '\t' | '\n' | '\r'))
    {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 16);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\t' => escaped.push_str("&#9;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
