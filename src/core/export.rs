//! Exporter: flat key/value mapping of a device snapshot.
//!
//! Absent fields are omitted rather than stringified, so consumers can tell
//! "not available" apart from an empty string.

use crate::core::snapshot::DeviceSnapshot;
use std::collections::{BTreeMap, HashMap};

/// Every key the exporter may emit.
pub const DEVICE_INFO_KEYS: [&str; 22] = [
    "package_name",
    "app_version",
    "device_type",
    "device_name",
    "device_manufacturer",
    "os_name",
    "os_version",
    "api_level",
    "language",
    "country",
    "screen_size",
    "screen_format",
    "screen_density",
    "display_width",
    "display_height",
    "fb_attribution_id",
    "hardware_name",
    "abi",
    "build_name",
    "app_install_time",
    "app_update_time",
    "ui_mode",
];

impl DeviceSnapshot {
    /// Every key paired with its value, `None` where the field is absent.
    ///
    /// Order matches [`DEVICE_INFO_KEYS`].
    pub fn entries(&self) -> [(&'static str, Option<String>); 22] {
        let manufacturer = self.device_manufacturer.clone();
        [
            ("package_name", Some(self.package_name.clone())),
            ("app_version", self.app_version.clone()),
            ("device_type", self.device_type.map(|t| t.to_string())),
            ("device_name", self.device_name.clone()),
            ("device_manufacturer", Some(manufacturer)),
            ("os_name", Some(self.os_name.to_string())),
            ("os_version", self.os_version.clone()),
            ("api_level", Some(self.api_level.to_string())),
            ("language", Some(self.language.clone())),
            ("country", Some(self.country.clone())),
            ("screen_size", self.screen_size.map(|s| s.to_string())),
            ("screen_format", self.screen_format.map(|s| s.to_string())),
            ("screen_density", self.screen_density.map(|s| s.to_string())),
            ("display_width", Some(self.display_width.to_string())),
            ("display_height", Some(self.display_height.to_string())),
            ("fb_attribution_id", self.fb_attribution_id.clone()),
            ("hardware_name", Some(self.hardware_name.clone())),
            ("abi", Some(self.abi.clone())),
            ("build_name", Some(self.build_name.clone())),
            ("app_install_time", self.app_install_time.clone()),
            ("app_update_time", self.app_update_time.clone()),
            ("ui_mode", Some(self.ui_mode.to_string())),
        ]
    }

    /// Number of fields carrying a value.
    pub fn populated_count(&self) -> usize {
        self.entries().iter().filter(|(_, v)| v.is_some()).count()
    }

    /// Export as a key/value mapping, omitting absent fields.
    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries()
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
            .collect()
    }

    /// Export as a JSON object with keys in sorted order.
    pub fn to_json(&self) -> String {
        let sorted: BTreeMap<String, String> = self.to_map().into_iter().collect();
        serde_json::to_string(&sorted).unwrap_or_else(|_| "{}".to_string())
    }
}
