//! Inline rich text: spans, attributes, and the token-array parser.
//!
//! ```text
//! The service encodes a block's rich text as a JSON array of spans,
//! each `[text]` or `[text, [attr, ...]]`, where an attr is `[code]`
//! or `[code, payload]`. Formatting flags nest by declaration order;
//! payload attributes carry links, user mentions, dates, comment
//! threads, highlights, and references to other pages.
//!
//! `parse_text_spans` turns that encoding into [`TextSpan`]s and
//! refuses malformed input loudly: a shape error here means the record
//! is corrupt, and rendering guessed-at content downstream would be
//! worse than failing.
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::date::DateValue;
use crate::error::DecodeError;

/// One inline markup instruction attached to a span.
///
/// Declaration order is inner-to-outer: the first attribute in a span's
/// list wraps the text tightest when rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Attr {
    Bold,
    Italic,
    Strikethrough,
    Code,
    /// Anchor around the span.
    Link(String),
    /// Inline user mention; replaces the span text when rendered.
    User(String),
    /// Comment-thread marker; parsed for completeness, never styled.
    Comment(String),
    /// Inline date mention; replaces the span text when rendered.
    Date(DateValue),
    /// Background color, by service color name.
    Highlight(String),
    /// Reference to another page; replaces the span text when rendered.
    Page(String),
}

/// A run of text plus the attributes covering it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    #[serde(default)]
    pub attrs: Vec<Attr>,
}

impl TextSpan {
    pub fn plain(text: impl Into<String>) -> TextSpan {
        TextSpan {
            text: text.into(),
            attrs: Vec::new(),
        }
    }

    pub fn styled(text: impl Into<String>, attrs: Vec<Attr>) -> TextSpan {
        TextSpan {
            text: text.into(),
            attrs,
        }
    }
}

/// Decodes the service's raw token encoding into structured spans.
///
/// # Examples
///
/// ```ignore
/// let raw = serde_json::json!([["bold move", [["b"]]]]);
/// let spans = parse_text_spans(&raw)?;
/// assert_eq!(spans[0].attrs, vec![Attr::Bold]);
/// ```
pub fn parse_text_spans(raw: &Value) -> Result<Vec<TextSpan>, DecodeError> {
    let elements = raw
        .as_array()
        .ok_or(DecodeError::ExpectedArray("inline content"))?;
    let mut spans = Vec::with_capacity(elements.len());
    for element in elements {
        spans.push(parse_span(element)?);
    }
    Ok(spans)
}

fn parse_span(element: &Value) -> Result<TextSpan, DecodeError> {
    let parts = element.as_array().ok_or(DecodeError::ExpectedArray("span"))?;
    if parts.is_empty() || parts.len() > 2 {
        return Err(DecodeError::SpanLength(parts.len()));
    }
    let text = parts[0].as_str().ok_or(DecodeError::TextNotString)?;
    let mut attrs = Vec::new();
    if let Some(list) = parts.get(1) {
        let list = list
            .as_array()
            .ok_or(DecodeError::ExpectedArray("attribute list"))?;
        attrs.reserve(list.len());
        for attr in list {
            attrs.push(parse_attr(attr)?);
        }
    }
    Ok(TextSpan {
        text: text.to_string(),
        attrs,
    })
}

fn parse_attr(value: &Value) -> Result<Attr, DecodeError> {
    let tuple = value
        .as_array()
        .ok_or(DecodeError::ExpectedArray("attribute"))?;
    if tuple.is_empty() {
        return Err(DecodeError::EmptyAttribute);
    }
    if tuple.len() > 2 {
        return Err(DecodeError::AttributeLength(tuple.len()));
    }
    let code = tuple[0].as_str().ok_or(DecodeError::CodeNotString)?;
    let payload = tuple.get(1);
    match code {
        "b" => flag(Attr::Bold, "b", payload),
        "i" => flag(Attr::Italic, "i", payload),
        "s" => flag(Attr::Strikethrough, "s", payload),
        "c" => flag(Attr::Code, "c", payload),
        "a" => Ok(Attr::Link(string_payload("a", payload)?)),
        "u" => Ok(Attr::User(string_payload("u", payload)?)),
        "m" => Ok(Attr::Comment(string_payload("m", payload)?)),
        "h" => Ok(Attr::Highlight(string_payload("h", payload)?)),
        "p" => Ok(Attr::Page(string_payload("p", payload)?)),
        "d" => {
            let value = payload.ok_or(DecodeError::MissingPayload("d"))?;
            let date = serde_json::from_value::<DateValue>(value.clone())
                .map_err(|e| DecodeError::DatePayload(format!("{e}")))?;
            Ok(Attr::Date(date))
        }
        _ => Err(DecodeError::UnknownAttributeCode(code.to_string())),
    }
}

fn flag(attr: Attr, code: &'static str, payload: Option<&Value>) -> Result<Attr, DecodeError> {
    if payload.is_some() {
        return Err(DecodeError::UnexpectedPayload(code));
    }
    Ok(attr)
}

fn string_payload(code: &'static str, payload: Option<&Value>) -> Result<String, DecodeError> {
    let value = payload.ok_or(DecodeError::MissingPayload(code))?;
    let s = value.as_str().ok_or(DecodeError::PayloadType {
        code,
        expected: "a string",
    })?;
    Ok(s.to_string())
}

/// Flattens spans to their plain text, dropping all attributes.
pub fn spans_to_text(spans: &[TextSpan]) -> String {
    let mut out = String::new();
    for span in spans {
        out.push_str(&span.text);
    }
    out
}
