//! Periodic status refresh
//!
//! Keeps the last computed status of every business so that a timer tick can
//! report only the ones whose status moved (for example Active to
//! ExpiringSoon). Statuses depend on the wall clock only; the store never
//! changes an existing record.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use registry_shared::{days_remaining, Business, SubscriptionStatus};
use uuid::Uuid;

/// A status transition observed during a refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub business_id: Uuid,
    pub name: String,
    pub previous: SubscriptionStatus,
    pub current: SubscriptionStatus,
}

/// Last known status per business
#[derive(Debug, Default)]
pub struct StatusBoard {
    statuses: HashMap<Uuid, SubscriptionStatus>,
    expiring_soon_days: i64,
}

impl StatusBoard {
    pub fn new(expiring_soon_days: i64) -> Self {
        Self {
            statuses: HashMap::new(),
            expiring_soon_days,
        }
    }

    fn classify(&self, business: &Business, now: DateTime<Utc>) -> SubscriptionStatus {
        SubscriptionStatus::classify(days_remaining(business, now), self.expiring_soon_days)
    }

    /// Start tracking a newly registered business
    pub fn track(&mut self, business: &Business, now: DateTime<Utc>) -> SubscriptionStatus {
        let status = self.classify(business, now);
        self.statuses.insert(business.id, status);
        tracing::debug!(business_id = %business.id, %status, "Tracking status");
        status
    }

    /// Recompute every status and return those that changed since the last run.
    ///
    /// Businesses seen for the first time are tracked without being reported.
    pub fn refresh(&mut self, businesses: &[Business], now: DateTime<Utc>) -> Vec<StatusChange> {
        let mut changes = Vec::new();

        for business in businesses {
            let current = self.classify(business, now);
            match self.statuses.insert(business.id, current) {
                Some(previous) if previous != current => {
                    tracing::info!(
                        business_id = %business.id,
                        name = %business.name,
                        %previous,
                        %current,
                        "Subscription status changed"
                    );
                    changes.push(StatusChange {
                        business_id: business.id,
                        name: business.name.clone(),
                        previous,
                        current,
                    });
                }
                _ => {}
            }
        }

        tracing::debug!(
            tracked = self.statuses.len(),
            changed = changes.len(),
            "Status refresh complete"
        );
        changes
    }

    pub fn get(&self, id: &Uuid) -> Option<SubscriptionStatus> {
        self.statuses.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use registry_shared::{Category, SubscriptionType};

    fn ending_in_march(day: u32) -> Business {
        let end = NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        Business {
            id: Uuid::new_v4(),
            name: "Acme".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: end,
            amount_paid: Default::default(),
            subscription_type: SubscriptionType::Monthly,
            phone: "600123123".to_string(),
            subscription_count: 1,
            category: Category::Trade,
        }
    }

    #[test]
    fn test_refresh_reports_only_transitions() {
        let businesses = vec![ending_in_march(31)];
        let mut board = StatusBoard::new(30);

        let jan = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(board.track(&businesses[0], jan), SubscriptionStatus::Active);
        assert!(board.refresh(&businesses, jan).is_empty());

        let march = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        let changes = board.refresh(&businesses, march);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].previous, SubscriptionStatus::Active);
        assert_eq!(changes[0].current, SubscriptionStatus::ExpiringSoon);

        // Same status again: nothing new
        assert!(board.refresh(&businesses, march).is_empty());

        let april = Utc.with_ymd_and_hms(2025, 4, 2, 0, 0, 0).unwrap();
        let changes = board.refresh(&businesses, april);
        assert_eq!(changes[0].current, SubscriptionStatus::Expired);
        assert_eq!(board.get(&businesses[0].id), Some(SubscriptionStatus::Expired));
    }

    #[test]
    fn test_untracked_business_is_adopted_silently() {
        let businesses = vec![ending_in_march(20)];
        let mut board = StatusBoard::new(30);
        assert!(board.is_empty());

        let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        assert!(board.refresh(&businesses, now).is_empty());
        assert_eq!(board.len(), 1);
        assert_eq!(board.get(&businesses[0].id), Some(SubscriptionStatus::ExpiringSoon));
    }
}
