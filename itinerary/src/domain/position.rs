//! Placement requests for insert and move.

use std::fmt;

/// Where to place a waypoint in the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Position {
    /// Before every other waypoint.
    Start,

    /// After every other waypoint.
    #[default]
    End,

    /// Immediately after the named waypoint. Falls back to `End` when the
    /// name isn't in the sequence.
    After(String),
}

impl Position {
    /// Shorthand for `Position::After`.
    pub fn after(name: impl Into<String>) -> Self {
        Position::After(name.into())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Start => f.write_str("start"),
            Position::End => f.write_str("end"),
            Position::After(name) => write!(f, "after '{name}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_end() {
        assert_eq!(Position::default(), Position::End);
    }

    #[test]
    fn display() {
        assert_eq!(Position::Start.to_string(), "start");
        assert_eq!(Position::End.to_string(), "end");
        assert_eq!(Position::after("Hue").to_string(), "after 'Hue'");
    }
}
