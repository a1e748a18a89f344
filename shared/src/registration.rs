//! Registration flow: validates raw form input and commits it to the store

use serde::{Deserialize, Serialize};

use crate::models::{Business, NewBusiness};
use crate::store::BusinessStore;
use crate::validation::{
    validate_amount, validate_category, validate_date_range, validate_end_date, validate_name,
    validate_phone, validate_start_date, validate_subscription_type, validate_times_subscribed,
    FormField, ValidationErrors,
};

/// Raw form input, exactly as typed by the user
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegistrationInput {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub amount_paid: String,
    pub subscription_type: String,
    pub phone: String,
    pub times_subscribed: String,
    pub category: String,
}

impl RegistrationInput {
    fn field_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::StartDate => Some(&mut self.start_date),
            FormField::EndDate => Some(&mut self.end_date),
            FormField::AmountPaid => Some(&mut self.amount_paid),
            FormField::SubscriptionType => Some(&mut self.subscription_type),
            FormField::Phone => Some(&mut self.phone),
            FormField::TimesSubscribed => Some(&mut self.times_subscribed),
            FormField::Category => Some(&mut self.category),
            FormField::DateRange => None,
        }
    }
}

/// Input that passed every rule, normalized for the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRegistration {
    pub business: NewBusiness,
    /// Count typed by the user. The store derives its own count from the
    /// name, so this value is kept for display only.
    pub declared_times_subscribed: u32,
}

/// Validate raw input, reporting every failing rule
pub fn validate(input: &RegistrationInput) -> Result<ValidatedRegistration, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = validate_name(&input.name).map_err(|e| errors.push(e)).ok();
    let start_date = validate_start_date(&input.start_date)
        .map_err(|e| errors.push(e))
        .ok();
    let end_date = validate_end_date(&input.end_date)
        .map_err(|e| errors.push(e))
        .ok();

    if let (Some(start), Some(end)) = (start_date, end_date) {
        if let Err(e) = validate_date_range(start, end) {
            errors.push(e);
        }
    }

    let amount_paid = validate_amount(&input.amount_paid)
        .map_err(|e| errors.push(e))
        .ok();
    let subscription_type = validate_subscription_type(&input.subscription_type)
        .map_err(|e| errors.push(e))
        .ok();
    if let Err(e) = validate_phone(&input.phone) {
        errors.push(e);
    }
    let times_subscribed = validate_times_subscribed(&input.times_subscribed)
        .map_err(|e| errors.push(e))
        .ok();
    let category = validate_category(&input.category)
        .map_err(|e| errors.push(e))
        .ok();

    match (
        name,
        start_date,
        end_date,
        amount_paid,
        subscription_type,
        times_subscribed,
        category,
    ) {
        (
            Some(name),
            Some(start_date),
            Some(end_date),
            Some(amount_paid),
            Some(subscription_type),
            Some(declared_times_subscribed),
            Some(category),
        ) if errors.is_empty() => Ok(ValidatedRegistration {
            business: NewBusiness {
                name,
                start_date,
                end_date,
                amount_paid,
                subscription_type,
                phone: input.phone.clone(),
                category,
            },
            declared_times_subscribed,
        }),
        _ => Err(errors),
    }
}

/// Form state for registering businesses.
///
/// Holds the draft input and the errors of the last failed submission. A
/// successful submission commits to the store and clears both; the caller is
/// then expected to confirm and navigate to the business list.
#[derive(Debug, Default)]
pub struct RegistrationFlow {
    draft: RegistrationInput,
    errors: ValidationErrors,
}

impl RegistrationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &RegistrationInput {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Update one draft field, clearing errors that the edit may resolve
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let Some(slot) = self.draft.field_mut(field) else {
            return;
        };
        *slot = value.into();

        self.errors.clear_field(field);
        if matches!(field, FormField::StartDate | FormField::EndDate) {
            self.errors.clear_field(FormField::DateRange);
        }
    }

    /// Clear the draft and any displayed errors
    pub fn reset(&mut self) {
        self.draft = RegistrationInput::default();
        self.errors.clear();
    }

    /// Replace the draft with `input` and submit it
    pub fn submit(
        &mut self,
        store: &mut BusinessStore,
        input: RegistrationInput,
    ) -> Result<Business, ValidationErrors> {
        self.draft = input;
        self.submit_draft(store)
    }

    /// Validate the current draft and, if it passes, add it to the store
    pub fn submit_draft(
        &mut self,
        store: &mut BusinessStore,
    ) -> Result<Business, ValidationErrors> {
        let validated = match validate(&self.draft) {
            Ok(validated) => validated,
            Err(errors) => {
                tracing::debug!(error_count = errors.len(), "Registration rejected");
                self.errors = errors.clone();
                return Err(errors);
            }
        };

        let declared = validated.declared_times_subscribed;
        let business = store.add(validated.business);

        if declared != business.subscription_count {
            tracing::warn!(
                business_id = %business.id,
                declared_times_subscribed = declared,
                subscription_count = business.subscription_count,
                "Declared times subscribed differs from registration count"
            );
        }

        self.reset();
        Ok(business)
    }
}
