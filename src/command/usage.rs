//! Usage text and the non-fatal roll errors shown alongside it

use crate::core::config::MAX_RANGE_SPAN;
use thiserror::Error;

pub const USAGE_TITLE: &str = "Random Roll Usage";

pub const USAGE_LINES: [&str; 4] = [
    "* roll: Roll using the default roll type",
    "* roll N: Random number 1 to N",
    "* roll A B: Random number A to B",
    "* roll a b c: Random pick from the given labels",
];

/// Why a query produced usage text instead of a roll
///
/// None of these are faults; each renders as a message for the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RollError {
    #[error("Invalid number {0}. Expected an integer of at least 1.")]
    NonPositiveBound(i64),

    #[error("Range too large. Maximum range size is 10,000,000.")]
    RangeTooLarge { start: i64, end: i64 },

    #[error("Invalid range values.")]
    InvalidRange,

    #[error("Too many arguments. Use 'roll', 'roll N', or 'roll A B'.")]
    TooManyArguments,

    #[error("Custom labels not configured. Add labels in the plugin settings.")]
    CustomLabelsNotConfigured,
}

/// Full usage text, led by the error message when there is one
pub fn usage_text(error: Option<&RollError>) -> String {
    let lines = USAGE_LINES.join("\n");
    match error {
        Some(err) => format!("{}\n\n{}", err, lines),
        None => lines,
    }
}

/// Check an ordered inclusive range against [`MAX_RANGE_SPAN`]
pub(crate) fn check_span(start: i64, end: i64) -> Result<(), RollError> {
    let span = i128::from(end) - i128::from(start);
    if span > i128::from(MAX_RANGE_SPAN) {
        return Err(RollError::RangeTooLarge { start, end });
    }
    Ok(())
}
