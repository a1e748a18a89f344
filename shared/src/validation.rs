//! Validation utilities for the registration form
//!
//! Every rule is checked independently so the view layer can show all
//! problems at once. Messages are available in Spanish and English.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::models::{Category, SubscriptionType};
use crate::types::Language;

/// Date format produced by HTML date inputs
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Form fields that can carry an error
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    StartDate,
    EndDate,
    /// Synthetic field for the start/end ordering rule
    DateRange,
    AmountPaid,
    SubscriptionType,
    Phone,
    TimesSubscribed,
    Category,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::StartDate => "start_date",
            FormField::EndDate => "end_date",
            FormField::DateRange => "date_range",
            FormField::AmountPaid => "amount_paid",
            FormField::SubscriptionType => "subscription_type",
            FormField::Phone => "phone",
            FormField::TimesSubscribed => "times_subscribed",
            FormField::Category => "category",
        }
    }
}

/// A single failed validation rule
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Business name is required")]
    NameRequired,

    #[error("Start date is required")]
    StartDateRequired,

    #[error("Start date is not a valid date")]
    StartDateInvalid,

    #[error("End date is required")]
    EndDateRequired,

    #[error("End date is not a valid date")]
    EndDateInvalid,

    #[error("Start date must be before end date")]
    DateRange,

    #[error("Amount must be a positive number")]
    AmountNotPositive,

    #[error("Amount is outside the supported range (at most 28 decimal places and below 7.9e28)")]
    AmountOutOfRange,

    #[error("Phone number is required")]
    PhoneRequired,

    #[error("Times subscribed must be a positive number")]
    TimesSubscribedNotPositive,

    #[error("Times subscribed must be at most 4294967295")]
    TimesSubscribedOutOfRange,

    #[error("A category must be selected")]
    CategoryRequired,

    #[error("A subscription type must be selected")]
    SubscriptionTypeRequired,
}

impl ValidationError {
    pub fn field(&self) -> FormField {
        match self {
            ValidationError::NameRequired => FormField::Name,
            ValidationError::StartDateRequired | ValidationError::StartDateInvalid => {
                FormField::StartDate
            }
            ValidationError::EndDateRequired | ValidationError::EndDateInvalid => {
                FormField::EndDate
            }
            ValidationError::DateRange => FormField::DateRange,
            ValidationError::AmountNotPositive | ValidationError::AmountOutOfRange => {
                FormField::AmountPaid
            }
            ValidationError::PhoneRequired => FormField::Phone,
            ValidationError::TimesSubscribedNotPositive
            | ValidationError::TimesSubscribedOutOfRange => FormField::TimesSubscribed,
            ValidationError::CategoryRequired => FormField::Category,
            ValidationError::SubscriptionTypeRequired => FormField::SubscriptionType,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::NameRequired => "NAME_REQUIRED",
            ValidationError::StartDateRequired => "START_DATE_REQUIRED",
            ValidationError::StartDateInvalid => "START_DATE_INVALID",
            ValidationError::EndDateRequired => "END_DATE_REQUIRED",
            ValidationError::EndDateInvalid => "END_DATE_INVALID",
            ValidationError::DateRange => "DATE_RANGE",
            ValidationError::AmountNotPositive => "AMOUNT_NOT_POSITIVE",
            ValidationError::AmountOutOfRange => "AMOUNT_OUT_OF_RANGE",
            ValidationError::PhoneRequired => "PHONE_REQUIRED",
            ValidationError::TimesSubscribedNotPositive => "TIMES_SUBSCRIBED_NOT_POSITIVE",
            ValidationError::TimesSubscribedOutOfRange => "TIMES_SUBSCRIBED_OUT_OF_RANGE",
            ValidationError::CategoryRequired => "CATEGORY_REQUIRED",
            ValidationError::SubscriptionTypeRequired => "SUBSCRIPTION_TYPE_REQUIRED",
        }
    }

    pub fn message_es(&self) -> &'static str {
        match self {
            ValidationError::NameRequired => "El nombre del negocio es obligatorio",
            ValidationError::StartDateRequired => "La fecha de inicio es obligatoria",
            ValidationError::StartDateInvalid => "La fecha de inicio no es válida",
            ValidationError::EndDateRequired => "La fecha de término es obligatoria",
            ValidationError::EndDateInvalid => "La fecha de término no es válida",
            ValidationError::DateRange => {
                "La fecha de inicio debe ser anterior a la fecha de término"
            }
            ValidationError::AmountNotPositive => "El monto debe ser un número positivo",
            ValidationError::AmountOutOfRange => {
                "El monto está fuera del rango admitido (máximo 28 decimales y menor a 7.9e28)"
            }
            ValidationError::PhoneRequired => "El número de teléfono es obligatorio",
            ValidationError::TimesSubscribedNotPositive => {
                "Las veces suscrito debe ser un número positivo"
            }
            ValidationError::TimesSubscribedOutOfRange => {
                "Las veces suscrito no puede superar 4294967295"
            }
            ValidationError::CategoryRequired => "Debe seleccionar una categoría",
            ValidationError::SubscriptionTypeRequired => {
                "Debe seleccionar un tipo de suscripción"
            }
        }
    }

    pub fn message(&self, language: Language) -> String {
        match language {
            Language::Spanish => self.message_es().to_string(),
            Language::English => self.to_string(),
        }
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ValidationError", 4)?;
        state.serialize_field("field", &self.field())?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message_en", &self.to_string())?;
        state.serialize_field("message_es", self.message_es())?;
        state.end()
    }
}

/// All failed rules for one submission, in form order
#[derive(Error, Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// First error recorded for a field
    pub fn get(&self, field: FormField) -> Option<ValidationError> {
        self.errors.iter().copied().find(|e| e.field() == field)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.get(field).is_some()
    }

    /// Drop every error attached to a field. Returns true if any was removed.
    pub fn clear_field(&mut self, field: FormField) -> bool {
        let before = self.errors.len();
        self.errors.retain(|e| e.field() != field);
        before != self.errors.len()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Field/message pairs ready for inline display
    pub fn messages(&self, language: Language) -> Vec<(FormField, String)> {
        self.errors
            .iter()
            .map(|e| (e.field(), e.message(language)))
            .collect()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

// ============================================================================
// Field Validations
// ============================================================================

/// Validate business name and return it trimmed
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    Ok(trimmed.to_string())
}

/// Validate phone number is present
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().is_empty() {
        return Err(ValidationError::PhoneRequired);
    }
    Ok(())
}

/// Parse a calendar date in `YYYY-MM-DD` form
pub fn parse_date(raw: &str) -> Result<Option<NaiveDate>, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| "Invalid date format")
}

pub fn validate_start_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    match parse_date(raw) {
        Ok(Some(date)) => Ok(date),
        Ok(None) => Err(ValidationError::StartDateRequired),
        Err(_) => Err(ValidationError::StartDateInvalid),
    }
}

pub fn validate_end_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    match parse_date(raw) {
        Ok(Some(date)) => Ok(date),
        Ok(None) => Err(ValidationError::EndDateRequired),
        Err(_) => Err(ValidationError::EndDateInvalid),
    }
}

/// End date must be strictly after start date
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if start >= end {
        return Err(ValidationError::DateRange);
    }
    Ok(())
}

/// Parse amount paid; must be strictly positive.
///
/// Amounts are held as `Decimal`: up to 28 decimal places and at most
/// `Decimal::MAX` (about 7.9e28). A positive number beyond either limit is
/// reported as out of range rather than silently rounded to zero.
pub fn validate_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    let positive_number = raw
        .parse::<f64>()
        .map(|v| v.is_finite() && v > 0.0)
        .unwrap_or(false);

    let amount = match Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
        Ok(amount) => amount,
        Err(_) if positive_number => return Err(ValidationError::AmountOutOfRange),
        Err(_) => return Err(ValidationError::AmountNotPositive),
    };

    if amount <= Decimal::ZERO {
        return Err(if positive_number {
            ValidationError::AmountOutOfRange
        } else {
            ValidationError::AmountNotPositive
        });
    }
    Ok(amount.normalize())
}

/// Parse the declared number of times subscribed; must be a positive integer
/// no larger than `u32::MAX`
pub fn validate_times_subscribed(raw: &str) -> Result<u32, ValidationError> {
    let raw = raw.trim();
    match raw.parse::<u32>() {
        Ok(times) if times > 0 => Ok(times),
        Err(_) if raw.bytes().all(|b| b.is_ascii_digit()) && raw.bytes().any(|b| b != b'0') => {
            Err(ValidationError::TimesSubscribedOutOfRange)
        }
        _ => Err(ValidationError::TimesSubscribedNotPositive),
    }
}

pub fn validate_category(raw: &str) -> Result<Category, ValidationError> {
    raw.parse().map_err(|_| ValidationError::CategoryRequired)
}

pub fn validate_subscription_type(raw: &str) -> Result<SubscriptionType, ValidationError> {
    raw.parse()
        .map_err(|_| ValidationError::SubscriptionTypeRequired)
}
