//! Attribution slots.
//!
//! The collector never fetches these values. The host fills them after its
//! attribution provider reports, and event payloads carry whatever is
//! present.

use serde::{Deserialize, Serialize};

/// Values reported by the host's attribution provider.
///
/// `adid` is the provider's device id and is known before (and without)
/// an attribution. The `attribution_*` values come from the attribution
/// record, whose own `attribution_adid` may differ.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributionSlots {
    pub adid: Option<String>,

    pub attribution_adid: Option<String>,
    pub tracker_name: Option<String>,
    pub tracker_token: Option<String>,
    pub adgroup: Option<String>,
    pub network: Option<String>,
    pub campaign: Option<String>,
    pub click_label: Option<String>,
    pub cost_currency: Option<String>,
    pub cost_type: Option<String>,
    pub creative: Option<String>,
}

impl AttributionSlots {
    /// Payload keys of the attribution slots, present values only.
    pub fn payload_entries(&self) -> Vec<(&'static str, &str)> {
        let entries: [(&'static str, &Option<String>); 11] = [
            ("attribution_adid", &self.attribution_adid),
            ("attribution_tracker_name", &self.tracker_name),
            ("attribution_tracker_token", &self.tracker_token),
            ("attribution_adgroup", &self.adgroup),
            ("attribution_network", &self.network),
            ("attribution_campaign", &self.campaign),
            ("attribution_clicklabel", &self.click_label),
            ("attribution_cost_currency", &self.cost_currency),
            ("attribution_cost_type", &self.cost_type),
            ("attribution_creative", &self.creative),
            ("adid", &self.adid),
        ];

        entries
            .into_iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
            .collect()
    }
}
