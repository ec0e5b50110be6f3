//! Transform errors

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// First run of decimal digits in a parser message
static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

pub type Result<T> = std::result::Result<T, TransformError>;

/// Failure of a single transform request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The drawing is not valid JSON.
    #[error("{message}")]
    MalformedJson {
        message: String,
        /// Byte offset of the failure in the BOM-stripped text
        position: Option<usize>,
    },
}

impl TransformError {
    /// Translate a `serde_json` failure on `source` into a diagnostic-ready error.
    pub fn malformed_json(err: &serde_json::Error, source: &str) -> Self {
        TransformError::MalformedJson {
            message: describe_parse_failure(&err.to_string()),
            position: byte_offset(source, err.line(), err.column()),
        }
    }

    /// The message/position pair handed to the host.
    pub fn diagnostic(&self) -> Diagnostic {
        match self {
            TransformError::MalformedJson { message, position } => Diagnostic {
                message: message.clone(),
                position: *position,
            },
        }
    }
}

/// What the host's error channel receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub position: Option<usize>,
}

/// Compose the user-facing message from an opaque parser message.
///
/// The first digit run is read as a line number. Parser wording is not stable across
/// versions, so a missing or zero run falls back to the generic message.
pub fn describe_parse_failure(parser_message: &str) -> String {
    let line = DIGITS_RE
        .find(parser_message)
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .filter(|line| *line > 0);

    match line {
        Some(line) => format!(
            "Failed to parse JSON file, invalid JSON syntax found at line {}",
            line
        ),
        None => "Failed to parse JSON file.".to_string(),
    }
}

/// Convert a 1-based line and column into a byte offset into `source`.
fn byte_offset(source: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }

    let line_start = if line == 1 {
        0
    } else {
        source
            .match_indices('\n')
            .nth(line - 2)
            .map(|(index, _)| index + 1)?
    };

    Some((line_start + column.saturating_sub(1)).min(source.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_use_first_digit_run_as_line() {
        assert_eq!(
            describe_parse_failure("expected value at line 3 column 7"),
            "Failed to parse JSON file, invalid JSON syntax found at line 3"
        );
    }

    #[test]
    fn should_fall_back_without_digits() {
        assert_eq!(
            describe_parse_failure("unexpected end"),
            "Failed to parse JSON file."
        );
        assert_eq!(
            describe_parse_failure("error at 0"),
            "Failed to parse JSON file."
        );
    }

    #[test]
    fn should_fall_back_when_first_digits_are_not_a_line() {
        let err = serde_json::from_str::<serde_json::Value>("\"a\u{1}b\"").unwrap_err();
        assert!(err.to_string().contains("\\u0000"));
        assert_eq!(
            describe_parse_failure(&err.to_string()),
            "Failed to parse JSON file."
        );
    }

    #[test]
    fn should_locate_byte_offset() {
        let source = "{\n  \"a\": }";
        assert_eq!(byte_offset(source, 2, 8), Some(9));
        assert_eq!(byte_offset(source, 1, 1), Some(0));
        assert_eq!(byte_offset(source, 0, 0), None);
        assert_eq!(byte_offset(source, 5, 1), None);
    }
}
