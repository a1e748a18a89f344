//! WebAssembly module for the Business Subscription Registry
//!
//! Exposes a browser session to the view layer:
//! - Business registration with full field validation
//! - List and detail lookups
//! - Status, duration and aggregate statistics
//!
//! Records and errors cross the boundary as JSON strings.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use registry_shared::*;

/// One browser session: the store, the registration form and view settings
#[wasm_bindgen]
pub struct RegistrySession {
    store: BusinessStore,
    flow: RegistrationFlow,
    config: ViewConfig,
}

impl Default for RegistrySession {
    fn default() -> Self {
        Self::with_view_config(ViewConfig::default())
    }
}

impl RegistrySession {
    pub fn with_view_config(config: ViewConfig) -> Self {
        Self {
            store: BusinessStore::new(),
            flow: RegistrationFlow::new(),
            config,
        }
    }

    pub fn store(&self) -> &BusinessStore {
        &self.store
    }

    fn find(&self, id: &str) -> Result<Option<&Business>, String> {
        let id = Uuid::parse_str(id).map_err(|e| format!("Invalid business id: {}", e))?;
        Ok(self.store.get_by_id(&id))
    }

    /// Submit form JSON. Ok carries the stored business, Err the error list.
    fn submit_json(&mut self, input_json: &str) -> Result<String, String> {
        let input: RegistrationInput =
            serde_json::from_str(input_json).map_err(|e| format!("Invalid form JSON: {}", e))?;

        match self.flow.submit(&mut self.store, input) {
            Ok(business) => serde_json::to_string(&business).map_err(|e| e.to_string()),
            Err(errors) => Err(serde_json::to_string(&errors).map_err(|e| e.to_string())?),
        }
    }

    fn business_json(&self, id: &str) -> Result<Option<String>, String> {
        self.find(id)?
            .map(|b| serde_json::to_string(b).map_err(|e| e.to_string()))
            .transpose()
    }

    fn list_json(&self) -> Result<String, String> {
        serde_json::to_string(self.store.list()).map_err(|e| e.to_string())
    }

    fn statistics_json(&self, now: DateTime<Utc>) -> Result<String, String> {
        let stats = RegistryStatistics::compute_with_threshold(
            self.store.list(),
            now,
            self.config.expiring_soon_days,
        );
        serde_json::to_string(&stats).map_err(|e| e.to_string())
    }

    fn status_of(
        &self,
        id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<SubscriptionStatus>, String> {
        Ok(self.find(id)?.map(|b| {
            SubscriptionStatus::classify(days_remaining(b, now), self.config.expiring_soon_days)
        }))
    }

    fn duration_of(&self, id: &str) -> Result<Option<String>, String> {
        Ok(self
            .find(id)?
            .map(|b| duration(b).label(self.config.language)))
    }
}

#[wasm_bindgen]
impl RegistrySession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> RegistrySession {
        RegistrySession::default()
    }

    /// Create a session from a JSON view configuration
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> Result<RegistrySession, JsValue> {
        let config: ViewConfig = serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config JSON: {}", e)))?;
        Ok(RegistrySession::with_view_config(config))
    }

    /// Register a business from form JSON
    pub fn submit(&mut self, input_json: &str) -> Result<String, JsValue> {
        self.submit_json(input_json).map_err(|e| {
            web_sys::console::debug_1(&JsValue::from_str("Registration rejected"));
            JsValue::from_str(&e)
        })
    }

    #[wasm_bindgen(js_name = getById)]
    pub fn get_by_id(&self, id: &str) -> Result<Option<String>, JsValue> {
        self.business_json(id).map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = countByName)]
    pub fn count_by_name(&self, name: &str) -> usize {
        self.store.count_by_name(name)
    }

    pub fn list(&self) -> Result<String, JsValue> {
        self.list_json().map_err(|e| JsValue::from_str(&e))
    }

    /// Aggregate statistics at the given JS timestamp (milliseconds)
    pub fn statistics(&self, now_ms: f64) -> Result<String, JsValue> {
        let now = timestamp(now_ms)?;
        self.statistics_json(now).map_err(|e| JsValue::from_str(&e))
    }

    /// Status label of one business in the configured language
    pub fn status(&self, id: &str, now_ms: f64) -> Result<Option<String>, JsValue> {
        let now = timestamp(now_ms)?;
        let language = self.config.language;
        self.status_of(id, now)
            .map(|s| s.map(|s| s.label_in(language).to_string()))
            .map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = durationLabel)]
    pub fn duration_label(&self, id: &str) -> Result<Option<String>, JsValue> {
        self.duration_of(id).map_err(|e| JsValue::from_str(&e))
    }

    /// Call `callback(businessJson, total)` whenever a business is added
    pub fn subscribe(&mut self, callback: js_sys::Function) -> u32 {
        let id = self.store.subscribe(move |event| match event {
            StoreEvent::BusinessAdded { business, total } => {
                let Ok(json) = serde_json::to_string(business) else {
                    return;
                };
                let total = JsValue::from(u32::try_from(*total).unwrap_or(u32::MAX));
                if let Err(err) = callback.call2(&JsValue::NULL, &JsValue::from_str(&json), &total)
                {
                    web_sys::console::error_1(&err);
                }
            }
        });
        u32::try_from(id.as_u64()).unwrap_or(u32::MAX)
    }

    pub fn unsubscribe(&mut self, id: u32) -> bool {
        self.store.unsubscribe(SubscriptionId::from_u64(u64::from(id)))
    }
}

fn timestamp(now_ms: f64) -> Result<DateTime<Utc>, JsValue> {
    timestamp_from_millis(now_ms).map_err(|e| JsValue::from_str(&e))
}

fn timestamp_from_millis(now_ms: f64) -> Result<DateTime<Utc>, String> {
    if !now_ms.is_finite() {
        return Err("Timestamp out of range".to_string());
    }
    DateTime::<Utc>::from_timestamp_millis(now_ms as i64)
        .ok_or_else(|| "Timestamp out of range".to_string())
}

/// Classify a subscription by its days remaining
#[wasm_bindgen(js_name = classifyStatus)]
pub fn classify_status(days_remaining: i32) -> String {
    SubscriptionStatus::classify(i64::from(days_remaining), EXPIRING_SOON_DAYS)
        .label()
        .to_string()
}

/// Validate form JSON without registering; returns the error list as JSON
#[wasm_bindgen(js_name = validateRegistration)]
pub fn validate_registration(input_json: &str) -> Result<String, JsValue> {
    registration_errors(input_json).map_err(|e| JsValue::from_str(&e))
}

fn registration_errors(input_json: &str) -> Result<String, String> {
    let input: RegistrationInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid form JSON: {}", e))?;
    let errors = match validate(&input) {
        Ok(_) => ValidationErrors::new(),
        Err(errors) => errors,
    };
    serde_json::to_string(&errors).map_err(|e| e.to_string())
}
