use std::fmt;

/// Errors raised while parsing, expanding or matching a template.
///
/// A URI that simply does not fit a template is not an error; see
/// [`UriTemplate::match_uri`](crate::UriTemplate::match_uri).
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid URI template at byte {position}: {kind}")]
    Parse {
        position: usize,
        kind: ParseErrorKind,
    },

    #[error("variable `{name}` holds an unexpandable value ({found})")]
    InvalidValueType { name: String, found: &'static str },

    /// Matching through an operator that has no extraction algorithm. Every
    /// RFC 6570 operator currently has one.
    #[error("cannot match against `{template}`: {reason}")]
    UnsupportedOperation {
        template: String,
        reason: &'static str,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseErrorKind {
    IncompleteVarspec,
    UnterminatedExpression,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::IncompleteVarspec => f.write_str("incomplete variable specification"),
            ParseErrorKind::UnterminatedExpression => f.write_str("unterminated expression"),
        }
    }
}
