//! Token-based date format engine.
//!
//! A format string such as `"DD/MM/YYYY HH:mm"` is compiled into an anchored regular
//! expression with one capture group per token, plus the left-to-right order of the
//! tokens. Six tokens exist: `YYYY` (4 digits) and `MM`, `DD`, `HH`, `mm`, `ss`
//! (2 digits each). Every other character is matched literally. Only the first
//! occurrence of each token is a placeholder; repeats are literal text.
//!
//! Compiled formats are cached for the lifetime of the process, keyed by the format
//! string, and never evicted.
//!
//! # Example
//!
//! ```
//! use datatable::domain::date;
//!
//! let parsed = date::parse("29/02/2024", "DD/MM/YYYY").unwrap();
//! assert_eq!(date::format(&parsed, "YYYY-MM-DD"), "2024-02-29");
//! assert!(date::parse("30/02/2024", "DD/MM/YYYY").is_none());
//! ```

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

/// A date component placeholder inside a format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateToken {
    /// `YYYY`, four-digit year.
    Year,
    /// `MM`, two-digit month (01-12).
    Month,
    /// `DD`, two-digit day of month.
    Day,
    /// `HH`, two-digit hour (00-23).
    Hour,
    /// `mm`, two-digit minute.
    Minute,
    /// `ss`, two-digit second.
    Second,
}

impl DateToken {
    /// All tokens, longest first. This is also the substitution order of [`format`].
    pub const ALL: [Self; 6] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
    ];

    /// Literal spelling of the token in a format string.
    #[must_use]
    pub const fn literal(self) -> &'static str {
        match self {
            Self::Year => "YYYY",
            Self::Month => "MM",
            Self::Day => "DD",
            Self::Hour => "HH",
            Self::Minute => "mm",
            Self::Second => "ss",
        }
    }

    const fn capture(self) -> &'static str {
        match self {
            Self::Year => r"(\d{4})",
            _ => r"(\d{2})",
        }
    }
}

/// A compiled format: exact-match pattern plus capture order.
#[derive(Debug)]
pub struct CompiledFormat {
    pattern: Regex,
    tokens: Vec<DateToken>,
}

impl CompiledFormat {
    /// The anchored pattern matching a complete value.
    #[must_use]
    pub const fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Tokens in the order their capture groups appear.
    #[must_use]
    pub fn tokens(&self) -> &[DateToken] {
        &self.tokens
    }
}

static FORMAT_CACHE: Lazy<Mutex<HashMap<String, Arc<CompiledFormat>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Compiles `format`, returning the cached result when it was compiled before.
///
/// Returns `None` only if the regex engine rejects the generated pattern, which
/// can happen for pathologically long formats exceeding its size limit.
#[must_use]
pub fn compile(format: &str) -> Option<Arc<CompiledFormat>> {
    let mut cache = FORMAT_CACHE.lock();
    if let Some(compiled) = cache.get(format) {
        return Some(Arc::clone(compiled));
    }

    let compiled = match build(format) {
        Ok(compiled) => Arc::new(compiled),
        Err(e) => {
            tracing::warn!(format, error = %e, "failed to compile date format");
            return None;
        }
    };
    tracing::trace!(format, tokens = ?compiled.tokens, "compiled date format");
    cache.insert(format.to_string(), Arc::clone(&compiled));
    Some(compiled)
}

fn build(format: &str) -> Result<CompiledFormat, regex::Error> {
    let mut pattern = String::with_capacity(format.len() * 2 + 2);
    let mut tokens = Vec::new();
    let mut rest = format;

    pattern.push('^');
    while let Some(ch) = rest.chars().next() {
        let token = DateToken::ALL
            .into_iter()
            .find(|t| !tokens.contains(t) && rest.starts_with(t.literal()));

        if let Some(token) = token {
            pattern.push_str(token.capture());
            tokens.push(token);
            rest = &rest[token.literal().len()..];
        } else {
            let mut buf = [0u8; 4];
            pattern.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
            rest = &rest[ch.len_utf8()..];
        }
    }
    pattern.push('$');

    Ok(CompiledFormat {
        pattern: Regex::new(&pattern)?,
        tokens,
    })
}

/// Parses `value` against `format`.
///
/// Returns `None` when the value does not match the whole pattern, when a captured
/// group is not a number, or when the resulting calendar date does not round-trip
/// (day 30 of February, month 13). Components absent from the format default to
/// 1970-01-01 00:00:00. Time components roll over into the next unit the way a
/// calendar constructor does, and the date is rejected if that changes the day.
#[must_use]
pub fn parse(value: &str, format: &str) -> Option<NaiveDateTime> {
    if value.is_empty() || format.is_empty() {
        return None;
    }

    let compiled = compile(format)?;
    let captures = compiled.pattern.captures(value)?;

    let (mut year, mut month, mut day) = (1970_i32, 1_u32, 1_u32);
    let (mut hour, mut minute, mut second) = (0_i64, 0_i64, 0_i64);

    for (i, token) in compiled.tokens.iter().enumerate() {
        let text = captures.get(i + 1)?.as_str();
        match token {
            DateToken::Year => year = text.parse().ok()?,
            DateToken::Month => month = text.parse().ok()?,
            DateToken::Day => day = text.parse().ok()?,
            DateToken::Hour => hour = text.parse().ok()?,
            DateToken::Minute => minute = text.parse().ok()?,
            DateToken::Second => second = text.parse().ok()?,
        }
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let offset = Duration::hours(hour) + Duration::minutes(minute) + Duration::seconds(second);
    let parsed = date.and_hms_opt(0, 0, 0)?.checked_add_signed(offset)?;

    if parsed.year() != year || parsed.month() != month || parsed.day() != day {
        return None;
    }
    Some(parsed)
}

/// Formats `date` by substituting the first occurrence of each token in `format`.
///
/// Tokens are replaced in the order `YYYY`, `MM`, `DD`, `HH`, `mm`, `ss`. The year is
/// written without padding, every other component as two digits.
#[must_use]
pub fn format(date: &NaiveDateTime, format: &str) -> String {
    let mut out = format.to_string();
    for token in DateToken::ALL {
        let value = match token {
            DateToken::Year => date.year().to_string(),
            DateToken::Month => format!("{:02}", date.month()),
            DateToken::Day => format!("{:02}", date.day()),
            DateToken::Hour => format!("{:02}", date.hour()),
            DateToken::Minute => format!("{:02}", date.minute()),
            DateToken::Second => format!("{:02}", date.second()),
        };
        out = out.replacen(token.literal(), &value, 1);
    }
    out
}

/// Milliseconds since the epoch of the parsed value, or `0` when it does not parse.
///
/// Invalid dates therefore sort together with 1970-01-01.
#[must_use]
pub fn timestamp_or_epoch(value: &str, format: &str) -> i64 {
    parse(value, format).map_or(0, |d| d.and_utc().timestamp_millis())
}
