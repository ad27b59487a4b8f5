//! Errors raised while setting up the lorry.

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    /// There is no collection day to visit.
    EmptyRoute,
    /// A collection day index is not a day of the week.
    DayOutOfRange(i64),
    /// The calendar has no line the lorry could drive on.
    NoLines,
    /// A stop does not belong to any line of the calendar.
    StopOutsideLines { stop: usize, line: usize },
    /// The lorry is not placed on any line of the calendar.
    LorryOutsideLines(usize),
    /// A required element is missing from the page.
    MissingElement(&'static str),
}

impl InitError {
    /// Whether the lorry should just stay hidden without any complaint.
    ///
    /// Calendars without collections and bad day indices are expected on real pages.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::EmptyRoute | Self::DayOutOfRange(_))
    }
}

impl Display for InitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRoute => write!(f, "no collection days to visit"),
            Self::DayOutOfRange(day) => write!(f, "collection day {day} is not within 0..=6"),
            Self::NoLines => write!(f, "the calendar has no lines"),
            Self::StopOutsideLines { stop, line } => {
                write!(f, "stop {stop} is on line {line} which does not exist")
            }
            Self::LorryOutsideLines(line) => {
                write!(f, "the lorry is on line {line} which does not exist")
            }
            Self::MissingElement(name) => write!(f, "missing element: {name}"),
        }
    }
}

impl std::error::Error for InitError {}

#[cfg(test)]
mod tests {
    use crate::error::InitError;

    #[test]
    fn test_is_silent() {
        assert!(InitError::EmptyRoute.is_silent());
        assert!(InitError::DayOutOfRange(7).is_silent());
        assert!(!InitError::NoLines.is_silent());
        assert!(!InitError::StopOutsideLines { stop: 0, line: 3 }.is_silent());
        assert!(!InitError::LorryOutsideLines(1).is_silent());
        assert!(!InitError::MissingElement("#bin-lorry").is_silent());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            InitError::DayOutOfRange(-1).to_string(),
            "collection day -1 is not within 0..=6"
        );
        assert_eq!(
            InitError::MissingElement("#bin-lorry").to_string(),
            "missing element: #bin-lorry"
        );
    }
}
