//! Subscription Registry
//!
//! Concurrent in-memory storage for analytics event subscriptions. The store
//! is a two-level map keyed by owning application function and subscription
//! id, guarded by one coarse reader/writer lock: reads share the lock, every
//! mutation takes it exclusively, and stored values are only ever replaced as
//! a whole, so readers never observe a partially-applied update.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use ae_common::AnalyticsExposureSubsc;

use crate::error::{ExposureError, Result};

/// In-memory subscription registry shared across API handlers
pub struct SubscriptionRegistry {
    /// af_id -> subscription_id -> subscription
    subscriptions: RwLock<HashMap<String, HashMap<String, AnalyticsExposureSubsc>>>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
        }
    }

    /// Store a new subscription under a freshly generated id.
    ///
    /// Validation runs to completion before any id is generated or any state
    /// is touched, so a rejected request consumes nothing. Returns the stored
    /// value with `subscription_id` populated.
    pub fn create_subscription(
        &self,
        af_id: &str,
        mut subsc: AnalyticsExposureSubsc,
    ) -> Result<AnalyticsExposureSubsc> {
        validate(&subsc)?;

        let subscription_id = Uuid::new_v4().to_string();

        let mut subscriptions = self.subscriptions.write();

        // A colliding v4 id means id generation is broken, not that two
        // callers raced. Reject rather than silently overwrite.
        if subscriptions
            .values()
            .any(|subs| subs.contains_key(&subscription_id))
        {
            return Err(ExposureError::already_exists(subscription_id));
        }

        subsc.subscription_id = Some(subscription_id.clone());
        subscriptions
            .entry(af_id.to_string())
            .or_default()
            .insert(subscription_id.clone(), subsc.clone());

        debug!(
            af_id = %af_id,
            subscription_id = %subscription_id,
            "Created subscription"
        );

        Ok(subsc)
    }

    /// Fetch one subscription. An unknown owner and an unknown id under a
    /// known owner are indistinguishable: both are `NotFound`.
    pub fn get_subscription(
        &self,
        af_id: &str,
        subscription_id: &str,
    ) -> Result<AnalyticsExposureSubsc> {
        self.subscriptions
            .read()
            .get(af_id)
            .and_then(|subs| subs.get(subscription_id))
            .cloned()
            .ok_or_else(|| ExposureError::not_found(af_id, subscription_id))
    }

    /// All subscriptions owned by one application function. Unknown owners
    /// yield an empty list. Iteration order is unspecified.
    pub fn list_subscriptions(&self, af_id: &str) -> Vec<AnalyticsExposureSubsc> {
        self.subscriptions
            .read()
            .get(af_id)
            .map(|subs| subs.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Replace a stored subscription wholesale. There is no field-level
    /// merging, and the path id wins over any id carried in the value:
    /// subscription ids are registry-assigned, never caller-assigned.
    pub fn update_subscription(
        &self,
        af_id: &str,
        subscription_id: &str,
        mut subsc: AnalyticsExposureSubsc,
    ) -> Result<AnalyticsExposureSubsc> {
        validate(&subsc)?;

        let mut subscriptions = self.subscriptions.write();
        let stored = subscriptions
            .get_mut(af_id)
            .and_then(|subs| subs.get_mut(subscription_id))
            .ok_or_else(|| ExposureError::not_found(af_id, subscription_id))?;

        subsc.subscription_id = Some(subscription_id.to_string());
        *stored = subsc.clone();

        debug!(
            af_id = %af_id,
            subscription_id = %subscription_id,
            "Replaced subscription"
        );

        Ok(subsc)
    }

    /// Remove a subscription. The id becomes unknown afterwards; deleting it
    /// again reports `NotFound`.
    pub fn delete_subscription(&self, af_id: &str, subscription_id: &str) -> Result<()> {
        let mut subscriptions = self.subscriptions.write();

        let removed = match subscriptions.get_mut(af_id) {
            Some(subs) => {
                let removed = subs.remove(subscription_id).is_some();
                if removed && subs.is_empty() {
                    subscriptions.remove(af_id);
                }
                removed
            }
            None => false,
        };

        if !removed {
            return Err(ExposureError::not_found(af_id, subscription_id));
        }

        debug!(
            af_id = %af_id,
            subscription_id = %subscription_id,
            "Deleted subscription"
        );

        Ok(())
    }

    /// Total number of stored subscriptions across all owners.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().values().map(HashMap::len).sum()
    }
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural validation shared by create and replace. Runs to completion
/// before any mutation begins.
fn validate(subsc: &AnalyticsExposureSubsc) -> Result<()> {
    if subsc.analy_events_subs.is_empty() {
        return Err(ExposureError::validation("analyEventsSubs is required"));
    }
    if subsc.notif_uri.is_empty() {
        return Err(ExposureError::validation("notifUri is required"));
    }
    if subsc.notif_id.is_empty() {
        return Err(ExposureError::validation("notifId is required"));
    }
    Ok(())
}
