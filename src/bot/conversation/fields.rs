//! Per-field input patterns and the builders that turn a match into the
//! stored canonical value.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

use super::draft::FieldKind;
use crate::utils::datetime::{build_date, build_time};

#[allow(clippy::expect_used)]
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^([^'"\n]*)$"#).expect("name pattern compiles"));

#[allow(clippy::expect_used)]
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2})\D?(([0-9]{1,2})\D?([0-9]{2,4})?)?$").expect("date pattern compiles")
});

#[allow(clippy::expect_used)]
static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-1]?[0-9]|2[0-4])\D?([0-5][0-9])?$").expect("time pattern compiles")
});

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// The text does not match the field's pattern.
    #[error("Invalid format, try again!")]
    Format,
    /// The text matched but does not describe a usable value.
    #[error("Invalid value. Try again")]
    Value,
}

impl FieldKind {
    pub fn pattern(self) -> &'static Regex {
        match self {
            FieldKind::Name => &NAME_RE,
            FieldKind::StartDate | FieldKind::EndDate => &DATE_RE,
            FieldKind::StartTime | FieldKind::EndTime => &TIME_RE,
        }
    }

    /// Parses raw message text into this field's canonical value.
    pub fn parse(self, text: &str, today: NaiveDate) -> Result<String, FieldError> {
        let caps = self.pattern().captures(text).ok_or(FieldError::Format)?;
        self.build(&caps, today).ok_or(FieldError::Value)
    }

    fn build(self, caps: &Captures<'_>, today: NaiveDate) -> Option<String> {
        let group = |i: usize| caps.get(i).map(|m| m.as_str());
        match self {
            FieldKind::Name => group(1)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            // group 2 only wraps month and year
            FieldKind::StartDate | FieldKind::EndDate => build_date(group(1), group(3), group(4), today),
            FieldKind::StartTime | FieldKind::EndTime => build_time(group(1), group(2)),
        }
    }
}
