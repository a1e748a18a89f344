//! Common types used across the registry

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Spanish,
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Spanish => "es",
            Language::English => "en",
        }
    }
}

impl FromStr for Language {
    type Err = &'static str;

    /// Accepts ISO codes ("es", "en") or lowercase names ("spanish", "english")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es" | "spanish" | "español" => Ok(Language::Spanish),
            "en" | "english" => Ok(Language::English),
            _ => Err("Unsupported language"),
        }
    }
}

/// Date range for queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: chrono::NaiveDate,
    pub end: chrono::NaiveDate,
}

impl DateRange {
    /// Inclusive on both ends
    pub fn contains(&self, date: chrono::NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whole days between start and end, ignoring order
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days().abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::Spanish.code(), "es");
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::default(), Language::Spanish);
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("EN".parse::<Language>(), Ok(Language::English));
        assert_eq!("spanish".parse::<Language>(), Ok(Language::Spanish));
        assert!("th".parse::<Language>().is_err());
    }

    #[test]
    fn test_date_range_contains_is_inclusive() {
        let range = DateRange {
            start: date(2025, 1, 1),
            end: date(2025, 1, 31),
        };
        assert!(range.contains(date(2025, 1, 1)));
        assert!(range.contains(date(2025, 1, 31)));
        assert!(!range.contains(date(2024, 12, 31)));
        assert!(!range.contains(date(2025, 2, 1)));
        assert_eq!(range.span_days(), 30);
    }
}
