//! Percent-change windows and ranking direction.

use serde::{Deserialize, Serialize};

/// Time span over which percent price change is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeWindow {
    H1,
    H2,
    H24,
}

impl ChangeWindow {
    /// All supported windows, in report order.
    pub const ALL: [ChangeWindow; 3] = [ChangeWindow::H1, ChangeWindow::H2, ChangeWindow::H24];

    /// Map an hour count to a window.
    /// Unsupported values fall back to the 1-hour window.
    pub fn from_hours(hours: u32) -> Self {
        match hours {
            2 => ChangeWindow::H2,
            24 => ChangeWindow::H24,
            _ => ChangeWindow::H1,
        }
    }

    /// Hour count for this window.
    pub fn hours(&self) -> u32 {
        match self {
            ChangeWindow::H1 => 1,
            ChangeWindow::H2 => 2,
            ChangeWindow::H24 => 24,
        }
    }

    /// Short label for message headers (e.g., "1h").
    pub fn label(&self) -> &'static str {
        match self {
            ChangeWindow::H1 => "1h",
            ChangeWindow::H2 => "2h",
            ChangeWindow::H24 => "24h",
        }
    }
}

/// Whether movers are ranked by largest gain or largest loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Gainers,
    Losers,
}

impl Direction {
    /// Label used in section headers.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Gainers => "gainers",
            Direction::Losers => "losers",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_hours() {
        assert_eq!(ChangeWindow::from_hours(1), ChangeWindow::H1);
        assert_eq!(ChangeWindow::from_hours(2), ChangeWindow::H2);
        assert_eq!(ChangeWindow::from_hours(24), ChangeWindow::H24);
    }

    #[test]
    fn test_from_hours_falls_back_to_1h() {
        assert_eq!(ChangeWindow::from_hours(0), ChangeWindow::H1);
        assert_eq!(ChangeWindow::from_hours(3), ChangeWindow::H1);
        assert_eq!(ChangeWindow::from_hours(48), ChangeWindow::H1);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ChangeWindow::H1.label(), "1h");
        assert_eq!(ChangeWindow::H24.label(), "24h");
        assert_eq!(ChangeWindow::H2.hours(), 2);
        assert_eq!(Direction::Gainers.label(), "gainers");
        assert_eq!(Direction::Losers.label(), "losers");
    }
}
