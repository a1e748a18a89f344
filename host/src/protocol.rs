//! Line protocol between the view layer and the session host
//!
//! One JSON object per line in each direction.

use chrono::{DateTime, Utc};
use registry_shared::{
    days_remaining, duration, is_active, Business, Language, RegistrationInput,
    RegistryStatistics, SubscriptionStatus, ValidationErrors, ViewConfig,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{HostError, HostResult};

/// Commands accepted on stdin
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Submit { input: RegistrationInput },
    List,
    Get { id: String },
    Count { name: String },
    Statistics,
}

impl Command {
    pub fn parse(line: &str) -> HostResult<Self> {
        serde_json::from_str(line).map_err(|e| HostError::MalformedCommand(e.to_string()))
    }
}

/// A business together with its derived presentation facts
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BusinessView {
    #[serde(flatten)]
    pub business: Business,
    pub active: bool,
    pub days_remaining: i64,
    pub status: SubscriptionStatus,
    pub status_label: String,
    pub duration: String,
}

impl BusinessView {
    pub fn new(business: &Business, now: DateTime<Utc>, config: &ViewConfig) -> Self {
        let days = days_remaining(business, now);
        let status = SubscriptionStatus::classify(days, config.expiring_soon_days);

        Self {
            business: business.clone(),
            active: is_active(business, now),
            days_remaining: days,
            status,
            status_label: status.label_in(config.language).to_string(),
            duration: duration(business).label(config.language),
        }
    }
}

/// Lines written to stdout
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Registered {
        business: BusinessView,
    },
    Invalid {
        errors: ValidationErrors,
        /// Field/message pairs in the configured language
        messages: Vec<FieldMessage>,
    },
    Businesses {
        businesses: Vec<BusinessView>,
    },
    Business {
        business: BusinessView,
    },
    Count {
        name: String,
        count: usize,
    },
    Statistics {
        statistics: RegistryStatistics,
    },
    StatusChanged {
        business_id: Uuid,
        name: String,
        previous: SubscriptionStatus,
        current: SubscriptionStatus,
    },
    Error {
        code: String,
        message: String,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldMessage {
    pub field: &'static str,
    pub message: String,
}

impl Response {
    pub fn invalid(errors: ValidationErrors, language: Language) -> Self {
        let messages = errors
            .messages(language)
            .into_iter()
            .map(|(field, message)| FieldMessage {
                field: field.as_str(),
                message,
            })
            .collect();
        Response::Invalid { errors, messages }
    }

    /// Serialize as a single newline-terminated line
    pub fn to_line(&self) -> HostResult<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}
