//! View settings shared by every host

use serde::{Deserialize, Serialize};

use crate::types::Language;
use crate::view::EXPIRING_SOON_DAYS;

/// How derived facts are presented and refreshed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ViewConfig {
    /// Days remaining at or below which a subscription is "expiring soon"
    pub expiring_soon_days: i64,

    /// Seconds between recomputations of time-dependent status
    pub refresh_interval_secs: u64,

    /// Language for messages and labels
    pub language: Language,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            expiring_soon_days: EXPIRING_SOON_DAYS,
            refresh_interval_secs: 60,
            language: Language::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewConfig::default();
        assert_eq!(config.expiring_soon_days, 30);
        assert_eq!(config.refresh_interval_secs, 60);
        assert_eq!(config.language, Language::Spanish);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ViewConfig = serde_json::from_str(r#"{"language":"english"}"#).unwrap();
        assert_eq!(config.language, Language::English);
        assert_eq!(config.refresh_interval_secs, 60);
    }
}
