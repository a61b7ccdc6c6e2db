//! Parser for Python-style literal text.
//!
//! Agents that cannot emit structured tool arguments often send entries as
//! the `repr` of a dictionary: single-quoted strings, `True`/`False`/`None`,
//! tuples and trailing commas. This module reads that notation (and plain
//! JSON, which is a subset of it apart from `true`/`false`/`null`, also
//! accepted here) into a [`serde_json::Value`].
//!
//! The public entry point is [`parse`].

use serde_json::{Map, Number, Value};
use winnow::{
    Parser as _,
    combinator::{cut_err, delimited, dispatch, opt, peek},
    error::{ContextError, ErrMode},
    token::{any, one_of, take_while},
};

use crate::{
    error::{self, Diagnostic, ErrorCode},
    span::Span,
};

/// Context type for parser errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of what the parser expected at the failure point
    Expected(&'static str),
    /// Error code to report for the failure
    Code(ErrorCode),
}

type Input<'src> = &'src str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;

/// Helper to create a Cut error carrying a code and an expectation
fn cut_error(code: ErrorCode, expected: &'static str) -> ErrMode<ContextError<Context>> {
    let mut e = ContextError::new();
    e.push(Context::Code(code));
    e.push(Context::Expected(expected));
    ErrMode::Cut(e)
}

/// Parse zero or more whitespace characters
fn ws(input: &mut Input<'_>) -> IResult<()> {
    take_while(0.., char::is_whitespace)
        .void()
        .parse_next(input)
}

/// Parse exactly `expected`
fn token(input: &mut Input<'_>, mut expected: char) -> IResult<char> {
    expected.parse_next(input)
}

/// Parse `expected` if it is next, reporting whether it was there
fn eat(input: &mut Input<'_>, expected: char) -> IResult<bool> {
    opt(expected).map(|c| c.is_some()).parse_next(input)
}

/// Parse any value surrounded by optional whitespace
fn value(input: &mut Input<'_>) -> IResult<Value> {
    delimited(
        ws,
        dispatch! {peek(any);
            '{' => dict,
            '[' => |i: &mut Input<'_>| sequence(i, '[', ']'),
            '(' => |i: &mut Input<'_>| sequence(i, '(', ')'),
            '\'' | '"' => string_literal.map(Value::String),
            '-' | '+' | '.' | '0'..='9' => number,
            c if c.is_alphabetic() || c == '_' => keyword,
            _ => |_: &mut Input<'_>| -> IResult<Value> {
                Err(cut_error(ErrorCode::E002, "a value"))
            },
        },
        ws,
    )
    .parse_next(input)
}

/// Parse a dictionary: `{key: value, ...}` with an optional trailing comma
fn dict(input: &mut Input<'_>) -> IResult<Value> {
    token(input, '{')?;
    let mut map = Map::new();

    loop {
        ws(input)?;
        if eat(input, '}')? {
            return Ok(Value::Object(map));
        }

        let key = key(input)?;
        ws(input)?;
        cut_err(|i: &mut Input<'_>| token(i, ':'))
            .context(Context::Code(ErrorCode::E100))
            .context(Context::Expected("':' after dictionary key"))
            .parse_next(input)?;
        let item = cut_err(value).parse_next(input)?;
        // Later duplicates win, as in a Python dict display
        map.insert(key, item);

        let separator = cut_err(one_of([',', '}']))
            .context(Context::Code(ErrorCode::E100))
            .context(Context::Expected("',' or '}'"))
            .parse_next(input)?;
        if separator == '}' {
            return Ok(Value::Object(map));
        }
    }
}

/// Parse a dictionary key. Quoted strings, numbers and bare words are accepted;
/// numbers and words are used by their text.
fn key(input: &mut Input<'_>) -> IResult<String> {
    dispatch! {peek(any);
        '\'' | '"' => string_literal,
        '-' | '+' | '.' | '0'..='9' => number.map(|n| n.to_string()),
        c if c.is_alphabetic() || c == '_' => bare_word.map(str::to_string),
        _ => |_: &mut Input<'_>| -> IResult<String> {
            Err(cut_error(ErrorCode::E100, "a dictionary key"))
        },
    }
    .parse_next(input)
}

/// Parse a list or tuple delimited by `open` and `close`
fn sequence(input: &mut Input<'_>, open: char, close: char) -> IResult<Value> {
    token(input, open)?;
    let mut items = Vec::new();

    loop {
        ws(input)?;
        if eat(input, close)? {
            return Ok(Value::Array(items));
        }

        items.push(cut_err(value).parse_next(input)?);

        if eat(input, close)? {
            return Ok(Value::Array(items));
        }
        if !eat(input, ',')? {
            return Err(cut_error(ErrorCode::E100, "',' between items"));
        }
    }
}

/// Parse a single- or double-quoted string, resolving escapes
fn string_literal(input: &mut Input<'_>) -> IResult<String> {
    let quote = one_of(['\'', '"']).parse_next(input)?;
    let mut text = String::new();

    loop {
        let Some(c) = opt(any).parse_next(input)? else {
            return Err(cut_error(ErrorCode::E001, "a closing quote"));
        };

        match c {
            c if c == quote => return Ok(text),
            '\\' => escape(input, &mut text)?,
            c => text.push(c),
        }
    }
}

/// Resolve the escape following a backslash. Unknown escapes are kept
/// verbatim, backslash included.
fn escape(input: &mut Input<'_>, text: &mut String) -> IResult<()> {
    let Some(c) = opt(any).parse_next(input)? else {
        return Err(cut_error(ErrorCode::E001, "a closing quote"));
    };

    match c {
        'n' => text.push('\n'),
        't' => text.push('\t'),
        'r' => text.push('\r'),
        '0' => text.push('\0'),
        '\\' | '\'' | '"' => text.push(c),
        '\n' => {}
        'x' => text.push(hex_escape(input, 2)?),
        'u' => text.push(hex_escape(input, 4)?),
        other => {
            text.push('\\');
            text.push(other);
        }
    }
    Ok(())
}

/// Parse exactly `digits` hexadecimal digits as a codepoint
fn hex_escape(input: &mut Input<'_>, digits: usize) -> IResult<char> {
    let hex = take_while(digits, |c: char| c.is_ascii_hexdigit())
        .parse_next(input)
        .map_err(|_: ErrMode<ContextError<Context>>| {
            cut_error(ErrorCode::E003, "hexadecimal digits")
        })?;

    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| cut_error(ErrorCode::E003, "a valid codepoint"))
}

/// Parse an integer or float
fn number(input: &mut Input<'_>) -> IResult<Value> {
    let checkpoint = *input;
    let text = take_while(1.., |c: char| {
        c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E' | '_')
    })
    .parse_next(input)?;
    let cleaned = text.replace('_', "");

    let is_float = cleaned.contains(['.', 'e', 'E']);
    let parsed = if is_float {
        cleaned
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
    } else {
        cleaned
            .trim_start_matches('+')
            .parse::<i64>()
            .ok()
            .map(Number::from)
    };

    match parsed {
        Some(number) => Ok(Value::Number(number)),
        None => {
            *input = checkpoint;
            Err(cut_error(ErrorCode::E004, "a number"))
        }
    }
}

/// Parse an identifier-like word
fn bare_word<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)
}

/// Parse `True`, `False`, `None` or their JSON spellings
fn keyword(input: &mut Input<'_>) -> IResult<Value> {
    let checkpoint = *input;
    let word = bare_word(input)?;

    match word {
        "True" | "true" => Ok(Value::Bool(true)),
        "False" | "false" => Ok(Value::Bool(false)),
        "None" | "null" => Ok(Value::Null),
        _ => {
            *input = checkpoint;
            Err(cut_error(ErrorCode::E100, "True, False or None"))
        }
    }
}

/// Parse literal text into a JSON value.
///
/// # Errors
///
/// Returns an error [`Diagnostic`] whose label points at the offending byte
/// range of `source`.
pub(crate) fn parse(source: &str) -> error::Result<Value> {
    let mut input = source;
    let outcome = value(&mut input);
    let offset = source.len() - input.len();

    match outcome {
        Ok(parsed) if input.is_empty() => Ok(parsed),
        Ok(_) => Err(Diagnostic::error(ErrorCode::E102.description())
            .with_code(ErrorCode::E102)
            .with_label(Span::new(offset..source.len()), "unexpected text after the value")),
        Err(ErrMode::Backtrack(e) | ErrMode::Cut(e)) => Err(to_diagnostic(&e, source, offset)),
        #[allow(unreachable_patterns)]
        Err(_) => Err(incomplete(source)),
    }
}

fn incomplete(source: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E101.description())
        .with_code(ErrorCode::E101)
        .with_label(Span::new(source.len()..source.len()), "text ends here")
}

fn to_diagnostic(error: &ContextError<Context>, source: &str, offset: usize) -> Diagnostic {
    let mut code = None;
    let mut expected = None;
    for context in error.context() {
        match context {
            Context::Code(c) if code.is_none() => code = Some(*c),
            Context::Expected(e) if expected.is_none() => expected = Some(*e),
            _ => {}
        }
    }

    let at_end = offset >= source.len();
    let code = match code {
        Some(ErrorCode::E001) => ErrorCode::E001,
        _ if at_end => ErrorCode::E101,
        Some(code) => code,
        None => ErrorCode::E100,
    };

    let message = match expected {
        Some(expected) => format!("{}: expected {expected}", code.description()),
        None => code.description().to_string(),
    };

    let label = if at_end {
        "text ends here".to_string()
    } else {
        let found = source[offset..].chars().next().unwrap_or_default();
        format!("found `{found}`")
    };
    let width = source[offset..].chars().next().map_or(0, char::len_utf8);

    Diagnostic::error(message)
        .with_code(code)
        .with_label(Span::new(offset..offset + width), label)
}
