//! Error codes for payload diagnostics.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Lexical errors in raw literal text
//! - `E1xx` - Syntax errors in raw literal text
//! - `E2xx` - Decoding errors (shape of a decoded entry)

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexical Errors (E0xx)
    // =========================================================================
    /// Unterminated string literal.
    ///
    /// A string was opened with a quote but never closed.
    E001,

    /// Unexpected character.
    ///
    /// A character that cannot start a value was found.
    E002,

    /// Invalid escape sequence.
    ///
    /// A `\x` or `\u` escape was not followed by enough hexadecimal digits,
    /// or named an invalid codepoint.
    E003,

    /// Invalid number.
    ///
    /// A numeric literal could not be read as an integer or a finite float.
    E004,

    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    ///
    /// The parser found something other than what the grammar allows here,
    /// such as an unknown bare word or a missing `:` after a key.
    E100,

    /// Incomplete input.
    ///
    /// The text ended before the value was complete.
    E101,

    /// Trailing input.
    ///
    /// A complete value was read but more text follows it.
    E102,

    // =========================================================================
    // Decoding Errors (E2xx)
    // =========================================================================
    /// Entry is not a mapping.
    ///
    /// Components and edges must decode to a dictionary / JSON object.
    E200,

    /// Component has no style type.
    ///
    /// None of `styleTypeId`, `style_type_id`, `library_id` or `libraryId`
    /// is present.
    E201,

    /// Edge endpoint missing.
    ///
    /// An edge has no usable source or target id.
    E202,

    /// Invalid field value.
    ///
    /// A field has a type that cannot be used, e.g. a non-numeric `x`.
    /// The field is ignored.
    E203,
}

impl ErrorCode {
    /// Returns the code as a string, e.g. `"E001"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
        }
    }

    /// Returns a short description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            // Lexical errors
            ErrorCode::E001 => "unterminated string literal",
            ErrorCode::E002 => "unexpected character",
            ErrorCode::E003 => "invalid escape sequence",
            ErrorCode::E004 => "invalid number",
            // Syntax errors
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "incomplete input",
            ErrorCode::E102 => "trailing input",
            // Decoding errors
            ErrorCode::E200 => "entry is not a mapping",
            ErrorCode::E201 => "component has no style type",
            ErrorCode::E202 => "edge endpoint missing",
            ErrorCode::E203 => "invalid field value",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
