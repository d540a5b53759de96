//! Lab-value number recovery.
//!
//! Reports carry values like `"<3.0E+1"`, `"≥428"` or `"1.2e6"`. The
//! normalizer turns them into a finite `f64` or a [`ParseFailure`]; it never
//! panics and never yields a non-finite number.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Value as stored by the record source: either already numeric or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Comparison prefix stripped from a value such as `"<3.0E+1"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl Comparator {
    /// `true` for `<` / `≤`: the true value is at most the stated number.
    #[must_use]
    pub fn is_upper_bound(self) -> bool {
        matches!(self, Self::Less | Self::LessOrEqual)
    }
}

/// Distinguished "not a number" outcome. Never a panic, never `NaN`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("value `{input}` has no numeric reading")]
pub struct ParseFailure {
    pub input: String,
}

impl ParseFailure {
    fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Parsed number plus the comparison prefix it carried, if any.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedValue {
    pub value: f64,
    pub comparator: Option<Comparator>,
}

/// Normalizes any raw value into a finite number.
pub fn normalize(raw: &RawValue) -> Result<f64, ParseFailure> {
    normalize_detailed(raw).map(|normalized| normalized.value)
}

/// Normalizes an already-numeric value; only non-finite input fails.
pub fn normalize_number(value: f64) -> Result<f64, ParseFailure> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseFailure::new(value.to_string()))
    }
}

/// Normalizes a textual value.
pub fn normalize_text(text: &str) -> Result<f64, ParseFailure> {
    normalize_text_detailed(text).map(|normalized| normalized.value)
}

pub fn normalize_detailed(raw: &RawValue) -> Result<NormalizedValue, ParseFailure> {
    match raw {
        RawValue::Number(value) => normalize_number(*value).map(|value| NormalizedValue {
            value,
            comparator: None,
        }),
        RawValue::Text(text) => normalize_text_detailed(text),
    }
}

pub fn normalize_text_detailed(text: &str) -> Result<NormalizedValue, ParseFailure> {
    let trimmed = text.trim();
    let (comparator, rest) = strip_comparator_prefix(trimmed);

    if let Some(value) = parse_finite(rest) {
        return Ok(NormalizedValue { value, comparator });
    }

    find_first_number(rest)
        .and_then(parse_finite)
        .map(|value| NormalizedValue { value, comparator })
        .ok_or_else(|| ParseFailure::new(text))
}

fn is_prefix_char(ch: char) -> bool {
    matches!(ch, '<' | '>' | '≤' | '≥' | '＜' | '＞' | '=') || ch.is_whitespace()
}

fn strip_comparator_prefix(text: &str) -> (Option<Comparator>, &str) {
    let end = text
        .char_indices()
        .find(|(_, ch)| !is_prefix_char(*ch))
        .map_or(text.len(), |(idx, _)| idx);
    let prefix = &text[..end];

    let has_eq = prefix.contains('=');
    let comparator = if prefix.contains('≤') {
        Some(Comparator::LessOrEqual)
    } else if prefix.contains('≥') {
        Some(Comparator::GreaterOrEqual)
    } else if prefix.contains('<') || prefix.contains('＜') {
        Some(if has_eq {
            Comparator::LessOrEqual
        } else {
            Comparator::Less
        })
    } else if prefix.contains('>') || prefix.contains('＞') {
        Some(if has_eq {
            Comparator::GreaterOrEqual
        } else {
            Comparator::Greater
        })
    } else {
        None
    };

    (comparator, &text[end..])
}

fn parse_finite(text: &str) -> Option<f64> {
    if text.is_empty() || !text.bytes().all(is_number_byte) {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

// Rejects `inf`/`NaN` spellings that `f64::from_str` would otherwise accept.
fn is_number_byte(byte: u8) -> bool {
    byte.is_ascii_digit() || matches!(byte, b'.' | b'-' | b'+' | b'e' | b'E')
}

/// Finds the first `[-+]?(\d+\.?\d*|\.\d+)([eE][-+]?\d+)?` substring.
fn find_first_number(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    (0..bytes.len()).find_map(|start| match_number_at(bytes, start).map(|end| &text[start..end]))
}

fn match_number_at(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start;
    if matches!(bytes.get(pos), Some(b'-' | b'+')) {
        pos += 1;
    }

    let int_digits = count_digits(bytes, pos);
    pos += int_digits;
    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(bytes, pos + 1);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        if matches!(bytes.get(exp_pos), Some(b'-' | b'+')) {
            exp_pos += 1;
        }
        let exp_digits = count_digits(bytes, exp_pos);
        if exp_digits > 0 {
            pos = exp_pos + exp_digits;
        }
    }

    Some(pos)
}

fn count_digits(bytes: &[u8], from: usize) -> usize {
    bytes
        .get(from..)
        .map_or(0, |tail| tail.iter().take_while(|b| b.is_ascii_digit()).count())
}
