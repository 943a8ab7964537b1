use crate::utils::error::{CmiError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Check that `value` produces a non-empty first match against `pattern`.
///
/// With `allow_empty`, the empty string is accepted without consulting the
/// pattern. A missing value, no match, or an empty first match all fail
/// with `error_code`. The pattern is searched, not anchored, so anchoring
/// is up to the pattern itself.
pub fn check_valid_format(
    value: Option<&str>,
    pattern: &Regex,
    error_code: u16,
    allow_empty: bool,
) -> Result<()> {
    if allow_empty && value == Some("") {
        return Ok(());
    }

    let Some(value) = value else {
        return Err(CmiError::validation(error_code));
    };

    match pattern.find(value) {
        Some(m) if !m.as_str().is_empty() => Ok(()),
        _ => Err(CmiError::validation(error_code)),
    }
}

/// Check that `value`, read as a number, lies within `range`.
///
/// Non-numeric input coerces to NaN and therefore always fails; callers run
/// [`check_valid_format`] first so that malformed values are reported with
/// the type-mismatch code instead.
pub fn check_valid_range(value: &str, range: &ScoreRange, error_code: u16) -> Result<()> {
    if range.contains(coerce_number(value)) {
        Ok(())
    } else {
        Err(CmiError::validation(error_code))
    }
}

/// Loose string-to-number coercion: surrounding whitespace is ignored, the
/// empty string reads as zero, unsigned `0x`/`0o`/`0b` literals read in
/// their radix, anything unparseable reads as NaN.
pub fn coerce_number(value: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(radix) = radix_prefix(trimmed) {
        return trimmed[2..]
            .chars()
            .try_fold(None, |acc: Option<f64>, c| {
                let digit = c.to_digit(radix)?;
                Some(Some(acc.unwrap_or(0.0) * f64::from(radix) + f64::from(digit)))
            })
            .flatten()
            .unwrap_or(f64::NAN);
    }

    // f64::from_str also takes "inf" and "nan", which are not numbers here
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn radix_prefix(value: &str) -> Option<u32> {
    match value.get(..2)? {
        "0x" | "0X" => Some(16),
        "0o" | "0O" => Some(8),
        "0b" | "0B" => Some(2),
        _ => None,
    }
}

/// A parsed `"<low>#<high>"` range descriptor. `*` as the upper bound means
/// unbounded above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    low: f64,
    high: Option<f64>,
}

impl ScoreRange {
    pub fn new(low: f64, high: Option<f64>) -> Self {
        Self { low, high }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> Option<f64> {
        self.high
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && self.high.map_or(true, |high| value <= high)
    }
}

impl FromStr for ScoreRange {
    type Err = CmiError;

    fn from_str(descriptor: &str) -> Result<Self> {
        let invalid = |reason: &str| CmiError::InvalidConfigValueError {
            field: "score_range".to_string(),
            value: descriptor.to_string(),
            reason: reason.to_string(),
        };

        let (low, high) = descriptor
            .split_once('#')
            .ok_or_else(|| invalid("expected '<low>#<high>'"))?;

        let low = coerce_number(low);
        if low.is_nan() || low.is_infinite() {
            return Err(invalid("lower bound is not a number"));
        }

        let high = match high.trim() {
            "*" => None,
            other => {
                let high = coerce_number(other);
                if high.is_nan() {
                    return Err(invalid("upper bound is not a number or '*'"));
                }
                Some(high)
            }
        };

        Ok(Self { low, high })
    }
}

impl fmt::Display for ScoreRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.high {
            Some(high) => write!(f, "{}#{}", self.low, high),
            None => write!(f, "{}#*", self.low),
        }
    }
}

/// Compile a data-model pattern with ECMAScript class semantics: `\d`, `\w`
/// and `\b` are ASCII-only, and `[` inside a bracket class is a literal.
/// `\s` keeps its Unicode meaning, as it has in ECMAScript.
pub fn compile_pattern(field_name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(&ascii_classes(pattern)).map_err(|source| CmiError::PatternError {
        field: field_name.to_string(),
        source,
    })
}

fn ascii_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(escaped) = chars.next() else {
                    out.push(c);
                    break;
                };
                let replacement = match (escaped, in_class) {
                    ('d', false) => "[0-9]",
                    ('D', false) => "[^0-9]",
                    ('w', false) => "[0-9A-Za-z_]",
                    ('W', false) => "[^0-9A-Za-z_]",
                    ('b', false) => r"(?-u:\b)",
                    ('d', true) => "0-9",
                    ('D', true) => "[:^digit:]",
                    ('w', true) => "0-9A-Za-z_",
                    ('W', true) => "[:^word:]",
                    _ => {
                        out.push(c);
                        out.push(escaped);
                        continue;
                    }
                };
                out.push_str(replacement);
            }
            '[' if in_class => out.push_str(r"\["),
            '[' => {
                in_class = true;
                out.push(c);
                if chars.peek() == Some(&'^') {
                    out.push('^');
                    chars.next();
                }
                // a leading ']' is a literal member
                if chars.peek() == Some(&']') {
                    out.push_str(r"\]");
                    chars.next();
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out
}

pub fn validate_error_code(field_name: &str, code: u16) -> Result<()> {
    if code == 0 {
        return Err(CmiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: code.to_string(),
            reason: "Error code must be non-zero".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CmiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
