//! Analytics Query Engine
//!
//! Stateless derivation of one-shot analytics snapshots: every snapshot is a
//! pure function of the fetch request. Only the UE mobility and network
//! performance taxonomies have synthetic sources wired up; the remaining
//! event types yield an empty snapshot, meaning "valid query, no data
//! available".

use tracing::debug;

use ae_common::{AnalyticsData, AnalyticsEvent, AnalyticsRequest, NetworkPerfInfo, UeMobilityInfo};

use crate::error::{ExposureError, Result};

/// Observation window reported in mobility records, in seconds
const MOBILITY_OBSERVATION_SECS: u32 = 3600;
/// Location areas reported when a request carries no location filter
const DEFAULT_LOCATION_AREAS: [&str; 2] = ["area1", "area2"];
/// Performance type reported when a request names none
const DEFAULT_NW_PERF_TYPE: &str = "THROUGHPUT";
/// Relative load ratio reported in network performance records
const NW_PERF_RELATIVE_RATIO: f32 = 0.95;

/// Stateless engine answering one-shot analytics fetch requests
pub struct AnalyticsQueryEngine;

impl AnalyticsQueryEngine {
    pub fn new() -> Self {
        Self
    }

    /// Derive an analytics snapshot for one fetch request.
    ///
    /// The `af_id` identifies the calling application function; it is carried
    /// for logging but does not influence the derived data. The negotiated
    /// feature string is echoed back in every snapshot, including empty ones.
    pub fn query(&self, af_id: &str, request: &AnalyticsRequest) -> Result<AnalyticsData> {
        if request.supp_feat.is_empty() {
            return Err(ExposureError::validation("suppFeat is required"));
        }

        debug!(
            af_id = %af_id,
            analy_event = %request.analy_event,
            "Deriving analytics snapshot"
        );

        let filter_area = request
            .analy_event_filter
            .as_ref()
            .and_then(|filter| filter.loc_area.clone());

        let mut data = AnalyticsData {
            supp_feat: Some(request.supp_feat.clone()),
            ..AnalyticsData::default()
        };

        match request.analy_event {
            AnalyticsEvent::UeMobility => {
                // A location-filtered request gets its area echoed back;
                // otherwise report the default coverage areas.
                let loc_info = match filter_area {
                    Some(area) => vec![area],
                    None => DEFAULT_LOCATION_AREAS
                        .iter()
                        .map(|area| area.to_string())
                        .collect(),
                };

                data.ue_mobility_infos = vec![UeMobilityInfo {
                    ts: None,
                    duration: MOBILITY_OBSERVATION_SECS,
                    duration_variance: None,
                    loc_info,
                    ratio: None,
                    confidence: None,
                }];
            }
            AnalyticsEvent::NetworkPerformance => {
                let nw_perf_type = request
                    .analy_event_filter
                    .as_ref()
                    .and_then(|filter| filter.nw_perf_types.first().cloned())
                    .unwrap_or_else(|| DEFAULT_NW_PERF_TYPE.to_string());

                data.nw_perf_infos = vec![NetworkPerfInfo {
                    loc_area: filter_area
                        .unwrap_or_else(|| DEFAULT_LOCATION_AREAS[0].to_string()),
                    nw_perf_type,
                    relative_ratio: Some(NW_PERF_RELATIVE_RATIO),
                    absolute_num: None,
                    confidence: None,
                }];
            }
            // No synthetic sources for the remaining taxonomies yet.
            _ => {}
        }

        Ok(data)
    }
}

impl Default for AnalyticsQueryEngine {
    fn default() -> Self {
        Self::new()
    }
}
