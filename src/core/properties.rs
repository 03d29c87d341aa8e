// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/properties.rs
//!
//! `.properties` file reader and writer
//!
//! Import and export files use the classic escaped key-value syntax:
//! - Comment lines starting with `#` or `!`
//! - Key and value separated by `=`, `:` or whitespace
//! - Lines ending in an odd number of backslashes continue on the next line
//! - Escapes `\t \n \r \f \\` and `\uXXXX` (UTF-16 code units)
//!
//! # Architecture
//! Parsing is two-pass, like the config parser it grew out of:
//! 1. First pass: Join natural lines into logical lines, dropping comments
//! 2. Second pass: Split each logical line into key and value with nom
//!
//! The writer escapes everything the reader treats specially, plus every
//! non-ASCII character, so output round-trips through any encoding.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while_m_n},
    character::complete::{char, none_of, one_of},
    combinator::{map, map_res, opt, value},
    multi::many0,
    sequence::preceded,
    IResult, Parser,
};
use thiserror::Error;

/// Parse errors with line number context
#[derive(Debug, Error, PartialEq)]
pub enum PropertiesError {
    #[error("Parse error on line {line}: {message}")]
    InvalidSyntax { line: usize, message: String },

    #[error("Invalid UTF-16 escape sequence on line {line}")]
    InvalidUtf16 { line: usize },
}

/// A decoded piece of a key or value
///
/// `\uXXXX` escapes are UTF-16 code units and may be one half of a
/// surrogate pair, so they are kept apart from ordinary characters until
/// the whole key or value has been read.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Unit {
    Char(char),
    CodeUnit(u16),
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Parse a complete `.properties` document
///
/// # Returns
/// All key/value pairs in file order. Duplicate keys are kept; the last
/// occurrence is the one that counts when pairs are collected into a map.
///
/// # Example
/// ```
/// use teamcreds::core::properties::parse_properties;
///
/// let pairs = parse_properties("# exported\nhttp\\://x!username=bob\n")?;
/// assert_eq!(pairs, vec![("http://x!username".to_string(), "bob".to_string())]);
/// # Ok::<(), teamcreds::core::properties::PropertiesError>(())
/// ```
pub fn parse_properties(content: &str) -> Result<Vec<(String, String)>, PropertiesError> {
    let mut pairs = Vec::new();

    for (line_num, line) in logical_lines(content) {
        let (rest, (key, value)) = parse_entry(&line).map_err(|e| PropertiesError::InvalidSyntax {
            line: line_num,
            message: format!("{:?}", e),
        })?;

        // A lone trailing backslash is dropped, anything else is malformed
        if !rest.is_empty() && rest != "\\" {
            return Err(PropertiesError::InvalidSyntax {
                line: line_num,
                message: format!("malformed escape near '{}'", rest),
            });
        }

        pairs.push((decode_units(&key, line_num)?, decode_units(&value, line_num)?));
    }

    Ok(pairs)
}

/// Join natural lines into logical lines
///
/// Returns `(first_line_number, text)` for every non-comment, non-blank
/// logical line. Leading whitespace of each natural line is removed, and
/// the continuation backslash is stripped before joining.
fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line_num = idx + 1;
        let trimmed = raw.trim_start_matches(is_blank);

        let (start, mut text) = match pending.take() {
            Some(continued) => continued,
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                (line_num, String::new())
            }
        };

        if ends_with_continuation(trimmed) {
            text.push_str(&trimmed[..trimmed.len() - 1]);
            pending = Some((start, text));
        } else {
            text.push_str(trimmed);
            lines.push((start, text));
        }
    }

    if let Some(last) = pending {
        lines.push(last);
    }

    lines
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Parse one logical line into raw key and value units
///
/// Format: KEY [blanks] [= or :] [blanks] VALUE
fn parse_entry(input: &str) -> IResult<&str, (Vec<Unit>, Vec<Unit>)> {
    let (input, key) = many0(alt((escape, map(none_of("=: \t\x0c\\"), Unit::Char)))).parse(input)?;
    let (input, _) = (take_while(is_blank), opt(one_of("=:")), take_while(is_blank)).parse(input)?;
    let (input, value) = many0(alt((escape, map(none_of("\\"), Unit::Char)))).parse(input)?;

    Ok((input, (key, value)))
}

/// Parse a backslash escape
///
/// `\u` must be followed by exactly four hex digits; any other escaped
/// character stands for itself.
fn escape(input: &str) -> IResult<&str, Unit> {
    preceded(
        char('\\'),
        alt((
            unicode_escape,
            value(Unit::Char('\t'), char('t')),
            value(Unit::Char('\n'), char('n')),
            value(Unit::Char('\r'), char('r')),
            value(Unit::Char('\x0c'), char('f')),
            map(none_of("u"), Unit::Char),
        )),
    )
    .parse(input)
}

fn unicode_escape(input: &str) -> IResult<&str, Unit> {
    map(
        map_res(
            preceded(char('u'), take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit())),
            |hex: &str| u16::from_str_radix(hex, 16),
        ),
        Unit::CodeUnit,
    )
    .parse(input)
}

fn decode_units(units: &[Unit], line: usize) -> Result<String, PropertiesError> {
    let mut utf16 = Vec::with_capacity(units.len());
    let mut buf = [0u16; 2];

    for unit in units {
        match *unit {
            Unit::Char(c) => utf16.extend_from_slice(c.encode_utf16(&mut buf)),
            Unit::CodeUnit(code) => utf16.push(code),
        }
    }

    String::from_utf16(&utf16).map_err(|_| PropertiesError::InvalidUtf16 { line })
}

/// Serialise key/value pairs as a `.properties` document
///
/// Pairs are written in the order given. When `comment` is provided it is
/// written as a leading `#` line (each of its lines prefixed with `#`).
pub fn write_properties<'a, I>(pairs: I, comment: Option<&str>) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();

    if let Some(comment) = comment {
        for line in comment.lines() {
            out.push('#');
            out.push_str(line);
            out.push('\n');
        }
    }

    for (key, value) in pairs {
        out.push_str(&escape_text(key, true));
        out.push('=');
        out.push_str(&escape_text(value, false));
        out.push('\n');
    }

    out
}

/// Escape a key or value for writing
///
/// Spaces are escaped everywhere in keys but only in leading position in
/// values; the reader would otherwise swallow them as separators.
fn escape_text(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());

    for (idx, c) in text.chars().enumerate() {
        match c {
            ' ' if is_key || idx == 0 => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || (c as u32) > 0x7e => {
                let mut buf = [0u16; 2];
                for code in c.encode_utf16(&mut buf) {
                    out.push_str(&format!("\\u{:04X}", code));
                }
            }
            c => out.push(c),
        }
    }

    out
}
