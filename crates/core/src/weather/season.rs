//! Calendar season lookup

use serde::{Deserialize, Serialize};
use std::fmt;

/// Meteorological season, fixed three-month blocks
///
/// - **Winter**: December, January, February
/// - **Spring**: March to May
/// - **Summer**: June to August
/// - **Autumn**: September to November
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Dec-Feb
    Winter,
    /// Mar-May
    Spring,
    /// Jun-Aug
    Summer,
    /// Sep-Nov
    Autumn,
}

impl Season {
    /// Season for a zero-based month index (January = 0)
    ///
    /// Indices of 12 and above wrap around the year.
    #[must_use]
    pub fn from_month(month: u32) -> Self {
        match month % 12 {
            11 | 0 | 1 => Season::Winter,
            2..=4 => Season::Spring,
            5..=7 => Season::Summer,
            _ => Season::Autumn,
        }
    }

    /// Season for a one-based day of the year (1-366)
    ///
    /// Uses 30-day months capped at December, so days 331-366 are all
    /// December. Day 0 is treated as day 1.
    #[must_use]
    pub fn from_day_of_year(day_of_year: u16) -> Self {
        let month = (u32::from(day_of_year.max(1)) - 1) / 30;
        Season::from_month(month.min(11))
    }

    /// Lowercase key used by asset tables and the HUD
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_month_maps_to_expected_season() {
        let expected = [
            Season::Winter, // Jan
            Season::Winter, // Feb
            Season::Spring, // Mar
            Season::Spring, // Apr
            Season::Spring, // May
            Season::Summer, // Jun
            Season::Summer, // Jul
            Season::Summer, // Aug
            Season::Autumn, // Sep
            Season::Autumn, // Oct
            Season::Autumn, // Nov
            Season::Winter, // Dec
        ];
        for (month, season) in expected.iter().enumerate() {
            assert_eq!(Season::from_month(month as u32), *season, "month {month}");
        }
    }

    #[test]
    fn test_month_wraps() {
        assert_eq!(Season::from_month(12), Season::Winter);
        assert_eq!(Season::from_month(17), Season::Summer);
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(Season::from_day_of_year(0), Season::Winter);
        assert_eq!(Season::from_day_of_year(15), Season::Winter);
        assert_eq!(Season::from_day_of_year(75), Season::Spring);
        assert_eq!(Season::from_day_of_year(180), Season::Summer);
        assert_eq!(Season::from_day_of_year(280), Season::Autumn);
        assert_eq!(Season::from_day_of_year(365), Season::Winter);
    }

    #[test]
    fn test_keys() {
        assert_eq!(Season::Autumn.key(), "autumn");
        assert_eq!(Season::Summer.to_string(), "summer");
    }
}
