//! Presentation-derived facts about businesses
//!
//! Pure functions of a record and the caller's clock. Nothing here is
//! cached; hosts recompute on their own refresh schedule.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Business, Category, SubscriptionType};
use crate::types::Language;

/// Days remaining at or below which a subscription is expiring soon
pub const EXPIRING_SOON_DAYS: i64 = 30;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whether `now` falls on a day within the subscription period (inclusive)
pub fn is_active(business: &Business, now: DateTime<Utc>) -> bool {
    business.period().contains(now.date_naive())
}

/// Days until the end date, rounded up. Negative once expired.
///
/// The end date is taken at midnight UTC.
pub fn days_remaining(business: &Business, now: DateTime<Utc>) -> i64 {
    let end = business.end_date.and_time(NaiveTime::MIN).and_utc();
    let millis = (end - now).num_milliseconds();

    // Integer division truncates toward zero, which is already the ceiling
    // for negative values
    let days = millis / MILLIS_PER_DAY;
    if millis % MILLIS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

/// Status shown on list and detail views
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    /// Within the expiring-soon threshold
    ExpiringSoon,
    Expired,
}

impl SubscriptionStatus {
    pub fn classify(days_remaining: i64, expiring_soon_days: i64) -> Self {
        if days_remaining > expiring_soon_days {
            SubscriptionStatus::Active
        } else if days_remaining > 0 {
            SubscriptionStatus::ExpiringSoon
        } else {
            SubscriptionStatus::Expired
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "Active",
            SubscriptionStatus::ExpiringSoon => "Expiring soon",
            SubscriptionStatus::Expired => "Expired",
        }
    }

    pub fn label_es(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "Activa",
            SubscriptionStatus::ExpiringSoon => "Por vencer",
            SubscriptionStatus::Expired => "Expirada",
        }
    }

    pub fn label_in(&self, language: Language) -> &'static str {
        match language {
            Language::Spanish => self.label_es(),
            Language::English => self.label(),
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Three-way status using the default threshold
pub fn status(business: &Business, now: DateTime<Utc>) -> SubscriptionStatus {
    SubscriptionStatus::classify(days_remaining(business, now), EXPIRING_SOON_DAYS)
}

/// Status label ("Active", "Expiring soon", "Expired")
pub fn status_label(business: &Business, now: DateTime<Utc>) -> &'static str {
    status(business, now).label()
}

/// Length of a subscription period, in the coarsest sensible unit
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum SubscriptionDuration {
    Days { days: i64 },
    Months { months: i64 },
    Years { years: i64, months: i64 },
}

impl SubscriptionDuration {
    /// Months are counted as 30 days and years as 365
    pub fn from_days(days: i64) -> Self {
        let days = days.abs();
        if days < 30 {
            SubscriptionDuration::Days { days }
        } else if days < 365 {
            SubscriptionDuration::Months { months: days / 30 }
        } else {
            SubscriptionDuration::Years {
                years: days / 365,
                months: (days % 365) / 30,
            }
        }
    }

    pub fn label(&self, language: Language) -> String {
        let (day, days, month, months, year, years, and) = match language {
            Language::Spanish => ("día", "días", "mes", "meses", "año", "años", "y"),
            Language::English => ("day", "days", "month", "months", "year", "years", "and"),
        };
        let unit = |n: i64, one: &str, many: &str| {
            format!("{} {}", n, if n == 1 { one } else { many })
        };

        match *self {
            SubscriptionDuration::Days { days: n } => unit(n, day, days),
            SubscriptionDuration::Months { months: n } => unit(n, month, months),
            SubscriptionDuration::Years {
                years: y,
                months: 0,
            } => unit(y, year, years),
            SubscriptionDuration::Years { years: y, months: m } => {
                format!("{} {} {}", unit(y, year, years), and, unit(m, month, months))
            }
        }
    }
}

impl std::fmt::Display for SubscriptionDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label(Language::English))
    }
}

/// Elapsed span between start and end date
pub fn duration(business: &Business) -> SubscriptionDuration {
    SubscriptionDuration::from_days(business.period().span_days())
}

/// Aggregate figures over the whole collection
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RegistryStatistics {
    pub total: usize,
    pub active: usize,
    pub expiring_soon: usize,
    pub expired: usize,
    /// Saturates at `Decimal::MAX`
    pub total_amount: Decimal,
    /// Zero when the collection is empty
    pub average_amount: Decimal,
    pub by_category: BTreeMap<Category, usize>,
    pub by_subscription_type: BTreeMap<SubscriptionType, usize>,
}

impl RegistryStatistics {
    pub fn compute(businesses: &[Business], now: DateTime<Utc>) -> Self {
        Self::compute_with_threshold(businesses, now, EXPIRING_SOON_DAYS)
    }

    pub fn compute_with_threshold(
        businesses: &[Business],
        now: DateTime<Utc>,
        expiring_soon_days: i64,
    ) -> Self {
        let mut stats = RegistryStatistics {
            total: businesses.len(),
            active: 0,
            expiring_soon: 0,
            expired: 0,
            total_amount: Decimal::ZERO,
            average_amount: Decimal::ZERO,
            by_category: BTreeMap::new(),
            by_subscription_type: BTreeMap::new(),
        };

        for business in businesses {
            if is_active(business, now) {
                stats.active += 1;
            }
            match SubscriptionStatus::classify(days_remaining(business, now), expiring_soon_days) {
                SubscriptionStatus::ExpiringSoon => stats.expiring_soon += 1,
                SubscriptionStatus::Expired => stats.expired += 1,
                SubscriptionStatus::Active => {}
            }
            stats.total_amount = match stats.total_amount.checked_add(business.amount_paid) {
                Some(sum) => sum,
                None => {
                    tracing::warn!(business_id = %business.id, "Total amount saturated");
                    Decimal::MAX
                }
            };
            *stats.by_category.entry(business.category).or_insert(0) += 1;
            *stats
                .by_subscription_type
                .entry(business.subscription_type)
                .or_insert(0) += 1;
        }

        if stats.total > 0 {
            stats.average_amount = stats
                .total_amount
                .checked_div(Decimal::from(stats.total))
                .unwrap_or(Decimal::ZERO);
        }

        stats
    }
}
