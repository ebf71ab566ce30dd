use thiserror::Error;

/// An error produced by [`parse`](crate::parse).
///
/// The parser distinguishes exactly two failure channels, matching the two
/// non-zero return paths of the source library: a grammar/lexical failure
/// detected by the tokenizer itself, and a handler that chose to abort the
/// parse. Malformed escapes and invalid UTF-8 are *not* represented here —
/// the [`codec`](crate::codec) module never fails; it degrades instead (see
/// its module docs).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The input is not well-formed JSON. `position` is the byte offset (from
    /// the start of the buffer passed to [`parse`](crate::parse)) at which
    /// the violation was detected.
    #[error("syntax error at byte {position}")]
    Syntax {
        /// Byte offset of the offending input.
        position: usize,
    },

    /// A [`Handler`](crate::Handler) callback returned
    /// [`ControlFlow::Break`](std::ops::ControlFlow::Break), asking the
    /// parser to stop. `code` is the value it broke with, propagated
    /// verbatim; `position` is the scan cursor at the time of the abort.
    #[error("parse aborted by handler with code {code} at byte {position}")]
    Aborted {
        /// Byte offset of the scan cursor when the handler aborted.
        position: usize,
        /// The handler-supplied abort code.
        code: i32,
    },
}

impl ParseError {
    /// The byte offset at which parsing stopped, regardless of which variant
    /// this is.
    pub fn position(&self) -> usize {
        match self {
            ParseError::Syntax { position } => *position,
            ParseError::Aborted { position, .. } => *position,
        }
    }
}
