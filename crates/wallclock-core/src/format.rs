//! Pure formatting of clock snapshots and of the rendered text block.
//!
//! A rendered block always has exactly two lines:
//!
//! ```text
//! Date: 2024/03/05
//! Time: 09:07:02
//! ```
//!
//! [`render_text`] produces it and [`labeled_value`] reads it back, so both
//! directions share the same labels and separator.

use chrono::{Datelike, Timelike};

pub const DATE_LABEL: &str = "Date";
pub const TIME_LABEL: &str = "Time";
pub const LABEL_SEPARATOR: &str = ": ";

/// One of the two labeled lines of a rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Time,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Date => DATE_LABEL,
            Field::Time => TIME_LABEL,
        }
    }

    /// Zero-based line index of the field inside a rendered block.
    pub fn line(self) -> usize {
        match self {
            Field::Date => 0,
            Field::Time => 1,
        }
    }
}

/// Pad a clock or calendar field to two characters.
///
/// Values of 100 and above are returned as is.
pub fn zero_pad(value: u32) -> String {
    format!("{value:02}")
}

/// `HH:MM:SS` on a 24-hour clock.
pub fn format_time<T: Timelike>(timestamp: &T) -> String {
    format!(
        "{}:{}:{}",
        zero_pad(timestamp.hour()),
        zero_pad(timestamp.minute()),
        zero_pad(timestamp.second())
    )
}

/// `YYYY/MM/DD` with a 1-based month.
pub fn format_date<T: Datelike>(timestamp: &T) -> String {
    format!(
        "{:04}/{}/{}",
        timestamp.year(),
        zero_pad(timestamp.month()),
        zero_pad(timestamp.day())
    )
}

pub fn render_text(date: &str, time: &str) -> String {
    format!("{DATE_LABEL}{LABEL_SEPARATOR}{date}\n{TIME_LABEL}{LABEL_SEPARATOR}{time}")
}

/// Extract the value of `field` from a rendered block.
///
/// Returns `None` when the line is missing, has no separator, or carries a
/// different label.
pub fn labeled_value(text: &str, field: Field) -> Option<&str> {
    let line = text.lines().nth(field.line())?;
    let (label, value) = line.split_once(LABEL_SEPARATOR)?;

    (label.trim() == field.label()).then_some(value.trim())
}
