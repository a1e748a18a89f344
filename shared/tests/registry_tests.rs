//! Registry behaviour tests
//!
//! Tests for the session store and registration flow including:
//! - Subscription counting by name
//! - Insertion order and lookups
//! - Status classification over arbitrary clocks

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use registry_shared::{
    days_remaining, is_active, status, BusinessStore, Category, FormField, NewBusiness,
    RegistrationFlow, RegistrationInput, RegistryStatistics, SubscriptionStatus,
    SubscriptionType,
};
use rust_decimal::Decimal;

fn input(name: &str, start: &str, end: &str, amount: &str) -> RegistrationInput {
    RegistrationInput {
        name: name.to_string(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        amount_paid: amount.to_string(),
        subscription_type: "Mensual".to_string(),
        phone: "912 345 678".to_string(),
        times_subscribed: "1".to_string(),
        category: "Alojamiento".to_string(),
    }
}

fn payload(name: &str) -> NewBusiness {
    NewBusiness {
        name: name.to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        amount_paid: Decimal::new(9999, 2),
        subscription_type: SubscriptionType::Annual,
        phone: "600000000".to_string(),
        category: Category::Tourism,
    }
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[cfg(test)]
mod scenario_tests {
    use super::*;

    /// Two registrations under the same name are counted in order
    #[test]
    fn test_two_acme_registrations() {
        let mut store = BusinessStore::new();
        let mut flow = RegistrationFlow::new();

        let first = flow
            .submit(&mut store, input("Acme", "2025-01-01", "2025-02-01", "10"))
            .unwrap();
        let second = flow
            .submit(&mut store, input("Acme", "2025-03-01", "2026-03-01", "120.5"))
            .unwrap();

        assert_eq!(first.subscription_count, 1);
        assert_eq!(second.subscription_count, 2);

        let ids: Vec<_> = store.list().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    /// Trimmed names share a count with untrimmed submissions
    #[test]
    fn test_name_is_trimmed_before_counting() {
        let mut store = BusinessStore::new();
        let mut flow = RegistrationFlow::new();

        flow.submit(&mut store, input("Acme", "2025-01-01", "2025-02-01", "10"))
            .unwrap();
        let padded = flow
            .submit(&mut store, input("  Acme ", "2025-01-01", "2025-02-01", "10"))
            .unwrap();

        assert_eq!(padded.name, "Acme");
        assert_eq!(padded.subscription_count, 2);
        assert_eq!(store.count_by_name("Acme"), 2);
    }

    /// Invalid submissions never reach the store or its listeners
    #[test]
    fn test_rejected_submission_does_not_notify() {
        let mut store = BusinessStore::new();
        let notified = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = std::rc::Rc::clone(&notified);
        store.subscribe(move |_| counter.set(counter.get() + 1));

        let mut flow = RegistrationFlow::new();
        let errors = flow
            .submit(&mut store, input("", "2025-06-01", "2025-05-01", "-5"))
            .unwrap_err();

        assert!(errors.contains(FormField::Name));
        assert!(errors.contains(FormField::DateRange));
        assert!(errors.contains(FormField::AmountPaid));
        assert_eq!(errors.len(), 3);
        assert_eq!(notified.get(), 0);
        assert!(store.is_empty());
    }

    /// Statistics follow the store as it grows
    #[test]
    fn test_statistics_over_store() {
        let mut store = BusinessStore::new();
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();

        assert_eq!(
            RegistryStatistics::compute(store.list(), now).average_amount,
            Decimal::ZERO
        );

        store.add(payload("Acme"));
        store.add(payload("Globex"));

        let stats = RegistryStatistics::compute(store.list(), now);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.total_amount, Decimal::new(19998, 2));
        assert_eq!(stats.average_amount, Decimal::new(9999, 2));
    }

    /// The largest accepted amounts can be registered twice and still summarised
    #[test]
    fn test_statistics_with_maximum_amounts() {
        let mut store = BusinessStore::new();
        let mut flow = RegistrationFlow::new();
        let max = "79228162514264337593543950335";

        flow.submit(&mut store, input("Acme", "2025-01-01", "2025-12-31", max))
            .unwrap();
        flow.submit(&mut store, input("Globex", "2025-01-01", "2025-12-31", max))
            .unwrap();

        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let stats = RegistryStatistics::compute(store.list(), now);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.total_amount, Decimal::MAX);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

fn name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Acme", "Globex", "Initech", "acme"]).prop_map(String::from)
}

fn clock_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    // 2020-01-01 .. 2030-01-01
    (1_577_836_800i64..1_893_456_000i64)
        .prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

fn period_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (0i64..3650, 1i64..800).prop_map(|(offset, length)| {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset);
        (start, start + Duration::days(length))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Each record's count equals the number of same-name records up to and including it
    #[test]
    fn prop_subscription_count_matches_prior_occurrences(
        names in prop::collection::vec(name_strategy(), 1..30)
    ) {
        let mut store = BusinessStore::new();
        for (i, name) in names.iter().enumerate() {
            let added = store.add(payload(name));
            let expected = names[..=i].iter().filter(|n| *n == name).count();
            prop_assert_eq!(added.subscription_count as usize, expected);
        }

        for name in &names {
            let expected = names.iter().filter(|n| *n == name).count();
            prop_assert_eq!(store.count_by_name(name), expected);
        }
        prop_assert_eq!(store.len(), names.len());
    }

    /// Every added record can be found again unchanged
    #[test]
    fn prop_add_then_get_by_id(names in prop::collection::vec(name_strategy(), 1..20)) {
        let mut store = BusinessStore::new();
        let added: Vec<_> = names.iter().map(|n| store.add(payload(n))).collect();
        for business in &added {
            prop_assert_eq!(store.get_by_id(&business.id), Some(business));
        }
    }

    /// Active exactly when today's date lies inside the period
    #[test]
    fn prop_is_active_matches_period((start, end) in period_strategy(), now in clock_strategy()) {
        let mut store = BusinessStore::new();
        let mut new_business = payload("Acme");
        new_business.start_date = start;
        new_business.end_date = end;
        let business = store.add(new_business);

        let today = now.date_naive();
        prop_assert_eq!(is_active(&business, now), start <= today && today <= end);
    }

    /// Status follows the days-remaining thresholds
    #[test]
    fn prop_status_consistent_with_days_remaining(
        (start, end) in period_strategy(),
        now in clock_strategy()
    ) {
        let mut store = BusinessStore::new();
        let mut new_business = payload("Acme");
        new_business.start_date = start;
        new_business.end_date = end;
        let business = store.add(new_business);

        let days = days_remaining(&business, now);
        let expected = if days > 30 {
            SubscriptionStatus::Active
        } else if days > 0 {
            SubscriptionStatus::ExpiringSoon
        } else {
            SubscriptionStatus::Expired
        };
        prop_assert_eq!(status(&business, now), expected);
    }
}
