use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod logging;

// ============================================================================
// Analytics Event Taxonomy
// ============================================================================

/// Analytics event types exposed over the northbound API.
///
/// Closed enumeration; values use the standardized SCREAMING_SNAKE_CASE
/// spellings on the wire (e.g. `UE_MOBILITY`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalyticsEvent {
    UeMobility,
    UeComm,
    AbnormalBehavior,
    Congestion,
    NetworkPerformance,
    QosSustainability,
}

impl std::fmt::Display for AnalyticsEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyticsEvent::UeMobility => write!(f, "UE_MOBILITY"),
            AnalyticsEvent::UeComm => write!(f, "UE_COMM"),
            AnalyticsEvent::AbnormalBehavior => write!(f, "ABNORMAL_BEHAVIOR"),
            AnalyticsEvent::Congestion => write!(f, "CONGESTION"),
            AnalyticsEvent::NetworkPerformance => write!(f, "NETWORK_PERFORMANCE"),
            AnalyticsEvent::QosSustainability => write!(f, "QOS_SUSTAINABILITY"),
        }
    }
}

// ============================================================================
// Subscription Types
// ============================================================================

/// A subscription to analytics event reporting, owned by one application
/// function.
///
/// Field names follow the standardized wire contract (camelCase). Optional
/// fields are omitted from the JSON representation entirely when absent,
/// never emitted as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsExposureSubsc {
    /// Registry-assigned identifier, unique within the owning application
    /// function's namespace. Never supplied by callers; populated on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
    /// Subscribed analytics events. Must contain at least one entry.
    #[serde(default)]
    pub analy_events_subs: Vec<AnalyticsEventSubsc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analy_rep_info: Option<ReportingInfo>,
    /// Callback destination for event notifications. Required; a missing key
    /// deserializes as empty and is rejected by validation.
    #[serde(default)]
    pub notif_uri: String,
    /// Correlation identifier echoed in notifications. Required.
    #[serde(default)]
    pub notif_id: String,
    /// Past notifications. Carried for wire compatibility; never populated
    /// by this service.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event_notifis: Vec<AnalyticsEventNotif>,
    /// Opaque feature-negotiation string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supp_feat: Option<String>,
}

/// One subscribed analytics event with its optional filter and target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEventSubsc {
    pub analy_event: AnalyticsEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analy_event_filter: Option<AnalyticsEventFilterSubsc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tgt_ue: Option<TargetUeId>,
}

/// Filter criteria attached to a subscribed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEventFilterSubsc {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nw_perf_reqs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc_area: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub app_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snssai: Option<String>,
}

/// Target UE identification for a subscription or fetch request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TargetUeId {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_ue_ind: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpsi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exter_group_id: Option<String>,
}

/// Declared reporting intent. Stored verbatim; the registry never acts on it
/// (no automatic expiry or report counting).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportingInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rep_nbr: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
}

// ============================================================================
// Notification Types
// ============================================================================

/// Complete callback body a delivery component would POST to `notifUri`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEventNotification {
    pub notif_id: String,
    pub analy_event_notifs: Vec<AnalyticsEventNotif>,
}

/// A single analytics event notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEventNotif {
    pub analy_event: AnalyticsEvent,
    pub time_stamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ue_mobility_infos: Vec<UeMobilityInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ue_comm_infos: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub abnormal_infos: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub congest_infos: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nw_perf_infos: Vec<NetworkPerfInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qos_sustain_infos: Vec<String>,
}

// ============================================================================
// Analytics Query Types
// ============================================================================

/// A one-shot analytics fetch request. Ephemeral; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRequest {
    pub analy_event: AnalyticsEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analy_event_filter: Option<AnalyticsEventFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analy_rep: Option<ReportingInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tgt_ue: Option<TargetUeId>,
    /// Required; a missing key deserializes as empty and is rejected.
    #[serde(default)]
    pub supp_feat: String,
}

/// Filter criteria for a fetch request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEventFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnn: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nw_perf_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub app_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excep_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snssai: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qos_req: Option<String>,
}

/// An analytics snapshot derived for one fetch request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ue_mobility_infos: Vec<UeMobilityInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ue_comm_infos: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nw_perf_infos: Vec<NetworkPerfInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub abnormal_infos: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub congest_infos: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qos_sustain_infos: Vec<String>,
    /// Echo of the requested feature-negotiation string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supp_feat: Option<String>,
}

impl AnalyticsData {
    /// True when every info list is empty. The echoed `supp_feat` does not
    /// count as content.
    pub fn is_empty(&self) -> bool {
        self.ue_mobility_infos.is_empty()
            && self.ue_comm_infos.is_empty()
            && self.nw_perf_infos.is_empty()
            && self.abnormal_infos.is_empty()
            && self.congest_infos.is_empty()
            && self.qos_sustain_infos.is_empty()
    }
}

// ============================================================================
// Analytics Info Records
// ============================================================================

/// UE mobility exposure record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UeMobilityInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<DateTime<Utc>>,
    /// Observation window in seconds.
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_variance: Option<f32>,
    pub loc_info: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u32>,
}

/// Network performance record for one location area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPerfInfo {
    pub loc_area: String,
    pub nw_perf_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_ratio: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_num: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u32>,
}
