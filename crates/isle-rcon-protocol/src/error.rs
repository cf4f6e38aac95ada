//! Error types for the protocol layer.
//!
//! Two levels: [`ParseError`] is what a single primitive reports when its
//! lexeme is missing at the cursor, and [`ProtocolError`] is what a decoder
//! hands back to the caller. A `ProtocolError` always means "the server sent
//! something this grammar does not describe", never a network problem.

use std::fmt;

/// Maximum number of characters of input quoted in a [`ParseError`].
const CONTEXT_CHARS: usize = 24;

/// The lexical rule a primitive was trying to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// A literal string, e.g. `"PlayerID:"` or a response type tag.
    Tag(String),
    /// One or more ASCII digits.
    Digits,
    /// A decimal integer that fits the target width.
    Integer,
    /// A decimal integer that did not fit the target width.
    Overflow,
    /// A floating-point number (`-12.5`, `3`, `0.75`).
    Float,
    /// `true` or `false`.
    Bool,
    /// A key made of ASCII letters.
    Key,
    /// A decorated class identifier such as `BP_Carnotaurus_C`.
    ClassName,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(literal) => write!(f, "{literal:?}"),
            Self::Digits => write!(f, "digits"),
            Self::Integer => write!(f, "integer"),
            Self::Overflow => write!(f, "integer within range"),
            Self::Float => write!(f, "float"),
            Self::Bool => write!(f, "boolean"),
            Self::Key => write!(f, "key"),
            Self::ClassName => write!(f, "class name"),
        }
    }
}

/// A primitive parser failed to match at the current cursor.
///
/// `context` holds the first few characters of the remaining input so a
/// log line is enough to see where the grammar and the payload diverged.
/// It is empty when the parser ran out of input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} at {context:?}")]
pub struct ParseError {
    /// The rule that did not match.
    pub expected: Expected,
    /// A snippet of the input at the failing position.
    pub context: String,
}

impl ParseError {
    /// Builds an error for `expected`, quoting the start of `input`.
    pub fn new(expected: Expected, input: &str) -> Self {
        Self {
            expected,
            context: input.chars().take(CONTEXT_CHARS).collect(),
        }
    }

    /// Returns `true` if the parser failed because the input was exhausted.
    pub fn is_end_of_input(&self) -> bool {
        self.context.is_empty()
    }
}

/// Errors produced while decoding a server response.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProtocolError {
    /// The timestamp prefix or the response type tag did not match.
    #[error("malformed {tag} envelope: {source}")]
    MalformedEnvelope {
        /// The type tag the caller asked for.
        tag: String,
        /// The primitive that failed.
        #[source]
        source: ParseError,
    },

    /// A field inside the payload did not match its grammar.
    #[error("malformed field: {0}")]
    MalformedField(#[from] ParseError),

    /// A `ServerDetails` key outside the known table.
    ///
    /// This is fatal on purpose: it is the only signal that the server
    /// speaks a newer dialect than this decoder.
    #[error("unknown server detail key {0:?}")]
    UnknownKey(String),

    /// A record ended before all of its fields were read.
    #[error("record {line} is incomplete: missing {missing}")]
    IncompleteRecord {
        /// 1-based record number within the payload.
        line: usize,
        /// The first field that could not be found.
        missing: Expected,
    },
}
