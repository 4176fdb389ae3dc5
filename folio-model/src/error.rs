use std::fmt;

/// Error raised while decoding inline rich-text token arrays.
///
/// Every variant means the record is malformed, not that something was
/// merely missing; callers are expected to propagate these rather than
/// paper over them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A value that must be a JSON array was something else. Carries the
    /// name of the structure being decoded ("span", "attribute", ...).
    ExpectedArray(&'static str),
    /// A span array had a length other than 1 or 2.
    SpanLength(usize),
    /// The first element of a span was not a string.
    TextNotString,
    /// An attribute tuple was empty.
    EmptyAttribute,
    /// An attribute tuple had more than two elements.
    AttributeLength(usize),
    /// An attribute code was not a string.
    CodeNotString,
    /// An attribute code outside the recognized set.
    UnknownAttributeCode(String),
    /// A payload-free code carried a payload.
    UnexpectedPayload(&'static str),
    /// A payload-carrying code came without its payload.
    MissingPayload(&'static str),
    /// A payload had the wrong JSON type.
    PayloadType {
        code: &'static str,
        expected: &'static str,
    },
    /// A date payload did not decode into a [`crate::DateValue`].
    DatePayload(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::ExpectedArray(what) => write!(f, "expected a JSON array for {what}"),
            DecodeError::SpanLength(n) => write!(f, "span has {n} elements, expected 1 or 2"),
            DecodeError::TextNotString => write!(f, "first element of a span must be a string"),
            DecodeError::EmptyAttribute => write!(f, "attribute tuple is empty"),
            DecodeError::AttributeLength(n) => {
                write!(f, "attribute tuple has {n} elements, expected 1 or 2")
            }
            DecodeError::CodeNotString => write!(f, "attribute code must be a string"),
            DecodeError::UnknownAttributeCode(code) => {
                write!(f, "unknown attribute code '{code}'")
            }
            DecodeError::UnexpectedPayload(code) => {
                write!(f, "attribute '{code}' takes no payload")
            }
            DecodeError::MissingPayload(code) => {
                write!(f, "attribute '{code}' requires a payload")
            }
            DecodeError::PayloadType { code, expected } => {
                write!(f, "attribute '{code}' payload must be {expected}")
            }
            DecodeError::DatePayload(err) => write!(f, "malformed date payload: {err}"),
        }
    }
}

impl std::error::Error for DecodeError {}
