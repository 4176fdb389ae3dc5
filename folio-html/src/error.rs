//! Error type for the rendering pipeline.

use std::fmt;

use folio_model::DecodeError;

/// A conversion failure. Rendering is all-or-nothing: the first error
/// aborts the walk and no partial output is returned.
#[derive(Debug, PartialEq)]
pub enum RenderError {
    /// Raw inline content stored in the page could not be decoded. This
    /// mostly comes up with collection row cells, which are kept as raw
    /// JSON until the table renderer needs them.
    Decode(DecodeError),
    /// A block kind with no rendering rule was encountered while the
    /// converter runs in strict mode.
    UnsupportedBlock { kind: String, id: String },
    /// The requested configuration cannot be satisfied, e.g. equation
    /// typesetting is enabled but no katex binary can be found.
    Config(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenderError::Decode(err) => write!(f, "invalid inline content: {err}"),
            RenderError::UnsupportedBlock { kind, id } => {
                write!(f, "no rendering rule for block '{kind}' ({id})")
            }
            RenderError::Config(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<DecodeError> for RenderError {
    fn from(err: DecodeError) -> RenderError {
        RenderError::Decode(err)
    }
}
