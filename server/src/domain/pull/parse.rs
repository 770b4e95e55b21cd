//! Pull report message grammar
//!
//! The kubelet pull-report message is a text format owned by an external,
//! versioned component. The whole grammar lives in this module so a format
//! change touches nothing else.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;

/// Fields extracted from one pull-report message. Constructed and consumed
/// within a single pipeline pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPullRecord {
    pub image_ref: String,
    /// Active fetch time reported by the runtime
    pub pull_duration: Duration,
    /// Fetch time including queueing/wait
    pub total_duration: Duration,
    pub image_size_bytes: i64,
}

impl ParsedPullRecord {
    /// Portion of the total not spent in active transfer.
    /// None when the source reports total < pull; the source grammar promises
    /// this never happens but parsing alone does not guarantee it.
    pub fn wait_only(&self) -> Option<Duration> {
        self.total_duration.checked_sub(self.pull_duration)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("message does not match the pull report grammar")]
    Grammar,

    #[error("invalid duration token '{token}': {reason}")]
    Duration { token: String, reason: String },

    #[error("invalid image size '{token}'")]
    Size { token: String },
}

static MESSAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^Successfully pulled image "([^"]+)" in (\S+) \((\S+) including waiting\)\. Image size: (\d+) bytes\.?$"#,
    )
    .expect("pull report regex must compile")
});

/// Parse a kubelet pull-report message:
///
/// ```text
/// Successfully pulled image "<ref>" in <dur> (<dur> including waiting). Image size: <int> bytes.
/// ```
///
/// All four fields must parse or the whole message is rejected; no partial
/// record is ever produced.
pub fn parse_message(message: &str) -> Result<ParsedPullRecord, ParseError> {
    let captures = MESSAGE_RE.captures(message).ok_or(ParseError::Grammar)?;

    let image_ref = captures[1].to_string();
    let pull_duration = parse_duration_token(&captures[2])?;
    let total_duration = parse_duration_token(&captures[3])?;
    let image_size_bytes = captures[4].parse::<i64>().map_err(|_| ParseError::Size {
        token: captures[4].to_string(),
    })?;

    Ok(ParsedPullRecord {
        image_ref,
        pull_duration,
        total_duration,
        image_size_bytes,
    })
}

/// Parse a compound duration literal such as `1m44.643s` or `506ms`: a
/// sequence of `<integer-or-decimal><unit>` pairs with units h/m/s/ms,
/// concatenated without separators, most-significant unit first.
fn parse_duration_token(token: &str) -> Result<Duration, ParseError> {
    let err = |reason: &str| ParseError::Duration {
        token: token.to_string(),
        reason: reason.to_string(),
    };

    let mut rest = token;
    let mut total = Duration::ZERO;

    if rest.is_empty() {
        return Err(err("empty token"));
    }

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(err("expected a number"));
        }
        let value: f64 = rest[..number_len]
            .parse()
            .map_err(|_| err("invalid number"))?;

        let unit_rest = &rest[number_len..];
        // "ms" must be checked before "m"
        let (unit_secs, unit_len) = if unit_rest.starts_with("ms") {
            (0.001, 2)
        } else if unit_rest.starts_with('h') {
            (3600.0, 1)
        } else if unit_rest.starts_with('m') {
            (60.0, 1)
        } else if unit_rest.starts_with('s') {
            (1.0, 1)
        } else {
            return Err(err("missing or unknown unit"));
        };

        total += Duration::try_from_secs_f64(value * unit_secs)
            .map_err(|_| err("duration out of range"))?;
        rest = &unit_rest[unit_len..];
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_full_message() {
        let record = parse_message(
            "Successfully pulled image \"repo/example:99cd3b4\" in 1m44.643s (1m44.643s including waiting). Image size: 1169083618 bytes.",
        )
        .unwrap();

        assert_eq!(record.image_ref, "repo/example:99cd3b4");
        assert_eq!(record.pull_duration.as_millis(), 104_643);
        assert_eq!(record.total_duration.as_millis(), 104_643);
        assert_eq!(record.image_size_bytes, 1_169_083_618);
        assert_eq!(record.wait_only(), Some(Duration::ZERO));
    }

    #[test]
    fn test_parses_message_with_waiting_time() {
        let record = parse_message(
            "Successfully pulled image \"repo/example:99cd3b4\" in 15s (45s including waiting). Image size: 500 bytes.",
        )
        .unwrap();

        assert_eq!(record.pull_duration.as_millis(), 15_000);
        assert_eq!(record.total_duration.as_millis(), 45_000);
        assert_eq!(record.wait_only(), Some(Duration::from_secs(30)));
        assert_eq!(record.image_size_bytes, 500);
    }

    #[test]
    fn test_trailing_period_is_optional() {
        let record = parse_message(
            "Successfully pulled image \"repo/example:v1\" in 2s (2s including waiting). Image size: 42 bytes",
        )
        .unwrap();
        assert_eq!(record.image_size_bytes, 42);
    }

    #[test]
    fn test_rejects_empty_message() {
        assert_eq!(parse_message(""), Err(ParseError::Grammar));
    }

    #[test]
    fn test_rejects_truncated_message() {
        assert_eq!(
            parse_message("Successfully pulled image \"repo/example:v1\" in 15s"),
            Err(ParseError::Grammar)
        );
    }

    #[test]
    fn test_rejects_wrong_quoting() {
        assert_eq!(
            parse_message(
                "Successfully pulled image repo/example:v1 in 15s (45s including waiting). Image size: 500 bytes."
            ),
            Err(ParseError::Grammar)
        );
    }

    #[test]
    fn test_rejects_non_numeric_size() {
        assert_eq!(
            parse_message(
                "Successfully pulled image \"repo/example:v1\" in 15s (45s including waiting). Image size: big bytes."
            ),
            Err(ParseError::Grammar)
        );
    }

    #[test]
    fn test_rejects_negative_size() {
        assert_eq!(
            parse_message(
                "Successfully pulled image \"repo/example:v1\" in 15s (45s including waiting). Image size: -500 bytes."
            ),
            Err(ParseError::Grammar)
        );
    }

    #[test]
    fn test_rejects_size_overflow() {
        let result = parse_message(
            "Successfully pulled image \"repo/example:v1\" in 15s (45s including waiting). Image size: 99999999999999999999 bytes.",
        );
        assert!(matches!(result, Err(ParseError::Size { .. })));
    }

    #[test]
    fn test_rejects_already_present_message() {
        assert_eq!(
            parse_message("Container image \"repo/example:v1\" already present on machine"),
            Err(ParseError::Grammar)
        );
    }

    #[test]
    fn test_duration_token_milliseconds() {
        assert_eq!(
            parse_duration_token("506ms").unwrap(),
            Duration::from_millis(506)
        );
    }

    #[test]
    fn test_duration_token_compound_with_hours() {
        assert_eq!(
            parse_duration_token("2h45m").unwrap(),
            Duration::from_secs(2 * 3600 + 45 * 60)
        );
    }

    #[test]
    fn test_duration_token_decimal_seconds() {
        assert_eq!(
            parse_duration_token("44.643s").unwrap().as_millis(),
            44_643
        );
    }

    #[test]
    fn test_duration_token_rejects_missing_unit() {
        assert!(matches!(
            parse_duration_token("44.643"),
            Err(ParseError::Duration { .. })
        ));
    }

    #[test]
    fn test_duration_token_rejects_unknown_unit() {
        assert!(matches!(
            parse_duration_token("15d"),
            Err(ParseError::Duration { .. })
        ));
    }

    #[test]
    fn test_duration_token_rejects_bare_unit() {
        assert!(matches!(
            parse_duration_token("ms"),
            Err(ParseError::Duration { .. })
        ));
    }

    #[test]
    fn test_duration_token_rejects_out_of_range() {
        assert!(matches!(
            parse_duration_token("99999999999999999999999h"),
            Err(ParseError::Duration { .. })
        ));
    }

    #[test]
    fn test_wait_only_none_when_total_below_pull() {
        let record = ParsedPullRecord {
            image_ref: "repo/example:v1".to_string(),
            pull_duration: Duration::from_secs(45),
            total_duration: Duration::from_secs(15),
            image_size_bytes: 1,
        };
        assert_eq!(record.wait_only(), None);
    }
}
