//! Classifiers mapping raw platform values onto the stable attribution
//! vocabulary.
//!
//! The bucket names and cut-offs are part of the attribution wire contract:
//! downstream attribution depends on them staying bit-identical across
//! platform upgrades.

use crate::platform::{Configuration, DisplayMetrics, Platform};
use serde::{Deserialize, Serialize};

/// System feature declared by Google Play Games for PC.
pub const PC_FEATURE: &str = "com.google.android.play.feature.HPE_EXPERIENCE";

/// Screen size bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenSize {
    Small,
    Normal,
    Large,
    XLarge,
}

impl ScreenSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenSize::Small => "small",
            ScreenSize::Normal => "normal",
            ScreenSize::Large => "large",
            ScreenSize::XLarge => "xlarge",
        }
    }
}

impl std::fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screen aspect bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenFormat {
    Long,
    Normal,
}

impl ScreenFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenFormat::Long => "long",
            ScreenFormat::Normal => "normal",
        }
    }
}

impl std::fmt::Display for ScreenFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel density bucket around the medium anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenDensity {
    Low,
    Medium,
    High,
}

impl ScreenDensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenDensity::Low => "low",
            ScreenDensity::Medium => "medium",
            ScreenDensity::High => "high",
        }
    }
}

impl std::fmt::Display for ScreenDensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device form factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Pc,
    Tv,
    Phone,
    Tablet,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Pc => "pc",
            DeviceType::Tv => "tv",
            DeviceType::Phone => "phone",
            DeviceType::Tablet => "tablet",
        }
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reported operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsName {
    Android,
    Windows,
}

impl OsName {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsName::Android => "android",
            OsName::Windows => "windows",
        }
    }

    pub fn for_device(is_pc: bool) -> Self {
        if is_pc {
            OsName::Windows
        } else {
            OsName::Android
        }
    }
}

impl std::fmt::Display for OsName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket the size bits of a screen layout.
pub fn screen_size(screen_layout: i32) -> Option<ScreenSize> {
    match screen_layout & Configuration::SCREENLAYOUT_SIZE_MASK {
        Configuration::SCREENLAYOUT_SIZE_SMALL => Some(ScreenSize::Small),
        Configuration::SCREENLAYOUT_SIZE_NORMAL => Some(ScreenSize::Normal),
        Configuration::SCREENLAYOUT_SIZE_LARGE => Some(ScreenSize::Large),
        Configuration::SCREENLAYOUT_SIZE_XLARGE => Some(ScreenSize::XLarge),
        _ => None,
    }
}

/// Bucket the long bits of a screen layout.
pub fn screen_format(screen_layout: i32) -> Option<ScreenFormat> {
    match screen_layout & Configuration::SCREENLAYOUT_LONG_MASK {
        Configuration::SCREENLAYOUT_LONG_YES => Some(ScreenFormat::Long),
        Configuration::SCREENLAYOUT_LONG_NO => Some(ScreenFormat::Normal),
        _ => None,
    }
}

/// Bucket a density in dpi. Both cut-offs belong to the medium bucket.
pub fn screen_density(density_dpi: i32) -> Option<ScreenDensity> {
    let low = (DisplayMetrics::DENSITY_MEDIUM + DisplayMetrics::DENSITY_LOW) / 2;
    let high = (DisplayMetrics::DENSITY_MEDIUM + DisplayMetrics::DENSITY_HIGH) / 2;

    if density_dpi == 0 {
        None
    } else if density_dpi < low {
        Some(ScreenDensity::Low)
    } else if density_dpi > high {
        Some(ScreenDensity::High)
    } else {
        Some(ScreenDensity::Medium)
    }
}

/// Masked UI mode type.
pub fn ui_mode(configuration: &Configuration) -> i32 {
    configuration.ui_mode & Configuration::UI_MODE_TYPE_MASK
}

/// Classify the form factor: PC beats TV, TV beats screen size.
pub fn device_type(is_pc: bool, configuration: &Configuration) -> Option<DeviceType> {
    if is_pc {
        return Some(DeviceType::Pc);
    }

    if ui_mode(configuration) == Configuration::UI_MODE_TYPE_TELEVISION {
        return Some(DeviceType::Tv);
    }

    match configuration.screen_layout & Configuration::SCREENLAYOUT_SIZE_MASK {
        Configuration::SCREENLAYOUT_SIZE_SMALL | Configuration::SCREENLAYOUT_SIZE_NORMAL => {
            Some(DeviceType::Phone)
        }
        Configuration::SCREENLAYOUT_SIZE_LARGE | Configuration::SCREENLAYOUT_SIZE_XLARGE => {
            Some(DeviceType::Tablet)
        }
        _ => None,
    }
}

/// Whether the app runs under Google Play Games for PC.
///
/// A failed feature probe counts as "not a PC".
pub fn is_google_play_games_for_pc<P: Platform + ?Sized>(platform: &P, feature: &str) -> bool {
    match platform.has_system_feature(feature) {
        Ok(present) => present,
        Err(e) => {
            tracing::debug!(feature, error = %e, "system feature probe failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockPlatform;
    use crate::platform::PlatformError;

    fn layout_config(ui_mode: i32, screen_layout: i32) -> Configuration {
        Configuration {
            ui_mode,
            screen_layout,
            ..Default::default()
        }
    }

    #[test]
    fn test_screen_size_buckets() {
        assert_eq!(screen_size(0x01), Some(ScreenSize::Small));
        assert_eq!(screen_size(0x02), Some(ScreenSize::Normal));
        assert_eq!(screen_size(0x03), Some(ScreenSize::Large));
        assert_eq!(screen_size(4), Some(ScreenSize::XLarge));
        assert_eq!(screen_size(0x00), None);
        assert_eq!(screen_size(0x05), None);
        // Long bits must not disturb the size bucket
        assert_eq!(screen_size(0x22), Some(ScreenSize::Normal));
    }

    #[test]
    fn test_screen_format_buckets() {
        assert_eq!(screen_format(0x22), Some(ScreenFormat::Long));
        assert_eq!(screen_format(0x12), Some(ScreenFormat::Normal));
        assert_eq!(screen_format(0x02), None);
        assert_eq!(screen_format(0x32), None);
    }

    #[test]
    fn test_screen_density_cutoffs() {
        // low cut = 140, high cut = 200
        assert_eq!(screen_density(0), None);
        assert_eq!(screen_density(120), Some(ScreenDensity::Low));
        assert_eq!(screen_density(139), Some(ScreenDensity::Low));
        assert_eq!(screen_density(140), Some(ScreenDensity::Medium));
        assert_eq!(screen_density(160), Some(ScreenDensity::Medium));
        assert_eq!(screen_density(200), Some(ScreenDensity::Medium));
        assert_eq!(screen_density(201), Some(ScreenDensity::High));
        assert_eq!(screen_density(480), Some(ScreenDensity::High));
    }

    #[test]
    fn test_device_type_precedence() {
        let tv_normal = layout_config(Configuration::UI_MODE_TYPE_TELEVISION, 0x02);
        assert_eq!(device_type(true, &tv_normal), Some(DeviceType::Pc));
        assert_eq!(device_type(false, &tv_normal), Some(DeviceType::Tv));
    }

    #[test]
    fn test_device_type_by_size() {
        let phone = layout_config(Configuration::UI_MODE_TYPE_NORMAL, 0x01);
        assert_eq!(device_type(false, &phone), Some(DeviceType::Phone));

        let tablet = layout_config(Configuration::UI_MODE_TYPE_NORMAL, 0x03);
        assert_eq!(device_type(false, &tablet), Some(DeviceType::Tablet));

        let xlarge = layout_config(Configuration::UI_MODE_TYPE_NORMAL, 4);
        assert_eq!(device_type(false, &xlarge), Some(DeviceType::Tablet));

        let undefined = layout_config(Configuration::UI_MODE_TYPE_NORMAL, 0x00);
        assert_eq!(device_type(false, &undefined), None);
    }

    #[test]
    fn test_ui_mode_is_masked() {
        let config = layout_config(0x24, 0x02); // night bits + television
        assert_eq!(ui_mode(&config), Configuration::UI_MODE_TYPE_TELEVISION);
    }

    #[test]
    fn test_vocabulary_strings() {
        assert_eq!(DeviceType::Pc.as_str(), "pc");
        assert_eq!(DeviceType::Tablet.as_str(), "tablet");
        assert_eq!(ScreenSize::XLarge.as_str(), "xlarge");
        assert_eq!(ScreenFormat::Long.as_str(), "long");
        assert_eq!(ScreenDensity::High.as_str(), "high");
        assert_eq!(OsName::for_device(true).as_str(), "windows");
        assert_eq!(OsName::for_device(false).as_str(), "android");
    }

    #[test]
    fn test_display_matches_wire_string() {
        assert_eq!(DeviceType::Phone.to_string(), "phone");
        assert_eq!(ScreenDensity::Medium.to_string(), "medium");
        assert_eq!(OsName::Windows.to_string(), "windows");
        assert_eq!(format!("{}", ScreenSize::XLarge), "xlarge");
    }

    #[test]
    fn test_pc_probe_failure_is_not_pc() {
        let mut platform = MockPlatform::new().with_feature(PC_FEATURE);
        assert!(is_google_play_games_for_pc(&platform, PC_FEATURE));

        platform.feature_error = Some(PlatformError::PermissionDenied);
        assert!(!is_google_play_games_for_pc(&platform, PC_FEATURE));
    }
}
