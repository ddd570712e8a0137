//! Analytics Exposure Core
//!
//! Core components of the analytics exposure service:
//! - `SubscriptionRegistry`: concurrent in-memory storage of analytics event
//!   subscriptions, keyed by owning application function and subscription id
//! - `AnalyticsQueryEngine`: stateless derivation of one-shot analytics
//!   snapshots
//! - `api`: the axum HTTP layer exposing both over the standardized
//!   northbound interface

pub mod analytics;
pub mod api;
pub mod error;
pub mod registry;

pub use analytics::AnalyticsQueryEngine;
pub use error::{ErrorResponse, ExposureError, Result};
pub use registry::SubscriptionRegistry;
