//! Session-scoped business store
//!
//! Owns the authoritative, insertion-ordered collection of registered
//! businesses. Records are only ever appended. Listeners are notified
//! synchronously from inside [`BusinessStore::add`], so every observer sees
//! the new record before `add` returns.

use uuid::Uuid;

use crate::models::{Business, NewBusiness};

/// Change notification delivered to store listeners
#[derive(Debug, Clone, Copy)]
pub enum StoreEvent<'a> {
    BusinessAdded {
        business: &'a Business,
        /// Collection size after the insert
        total: usize,
    },
}

/// Handle returned by [`BusinessStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent<'_>)>;

/// In-memory store of registered businesses
#[derive(Default)]
pub struct BusinessStore {
    businesses: Vec<Business>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl BusinessStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a business.
    ///
    /// The subscription count is one more than the number of records already
    /// stored under the same name, and never changes afterwards.
    pub fn add(&mut self, new_business: NewBusiness) -> Business {
        let prior = self.count_by_name(&new_business.name);
        let subscription_count = u32::try_from(prior + 1).unwrap_or(u32::MAX);
        let business = new_business.into_business(Uuid::new_v4(), subscription_count);

        self.businesses.push(business.clone());

        tracing::info!(
            business_id = %business.id,
            name = %business.name,
            subscription_count,
            "Business registered"
        );

        let event = StoreEvent::BusinessAdded {
            business: &business,
            total: self.businesses.len(),
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }

        business
    }

    /// Find a business by id
    pub fn get_by_id(&self, id: &Uuid) -> Option<&Business> {
        let found = self.businesses.iter().find(|b| b.id == *id);
        if found.is_none() {
            tracing::debug!(business_id = %id, "Business not found");
        }
        found
    }

    /// Number of stored businesses with exactly this name (case-sensitive)
    pub fn count_by_name(&self, name: &str) -> usize {
        self.businesses.iter().filter(|b| b.name == name).count()
    }

    /// All businesses in insertion order
    pub fn list(&self) -> &[Business] {
        &self.businesses
    }

    pub fn len(&self) -> usize {
        self.businesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.businesses.is_empty()
    }

    /// Register a listener invoked synchronously on every change
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        tracing::debug!(subscription = id.0, "Store listener subscribed");
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        before != self.listeners.len()
    }
}

impl std::fmt::Debug for BusinessStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusinessStore")
            .field("businesses", &self.businesses)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SubscriptionId {
    /// Raw numeric value, for hosts that pass handles across an FFI boundary
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn from_u64(raw: u64) -> Self {
        Self(raw)
    }
}
