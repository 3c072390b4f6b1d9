//! One-shot device snapshot assembly.
//!
//! The assembler reads every platform signal once, runs the classifiers
//! and the attribution probe, and returns an immutable [`DeviceSnapshot`].
//! Individual read failures leave the affected fields absent; assembly
//! itself never fails.

use crate::attribution::probe::{self, ProbeOutcome};
use crate::config::CollectorConfig;
use crate::core::classify::{self, DeviceType, OsName, ScreenDensity, ScreenFormat, ScreenSize};
use crate::core::timestamp::format_epoch_millis;
use crate::platform::{BuildConstants, PackageInfo, PackageQuery, Platform};
use crate::transparency::SharedCollectionLog;

/// Immutable device information record.
///
/// Fields are only readable; a snapshot never changes after assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSnapshot {
    pub(crate) package_name: String,
    pub(crate) app_version: Option<String>,
    pub(crate) device_type: Option<DeviceType>,
    pub(crate) device_name: Option<String>,
    pub(crate) device_manufacturer: String,
    pub(crate) os_name: OsName,
    pub(crate) os_version: Option<String>,
    pub(crate) api_level: u32,
    pub(crate) language: String,
    pub(crate) country: String,
    pub(crate) screen_size: Option<ScreenSize>,
    pub(crate) screen_format: Option<ScreenFormat>,
    pub(crate) screen_density: Option<ScreenDensity>,
    pub(crate) display_width: i32,
    pub(crate) display_height: i32,
    pub(crate) fb_attribution_id: Option<String>,
    pub(crate) hardware_name: String,
    pub(crate) abi: String,
    pub(crate) build_name: String,
    pub(crate) app_install_time: Option<String>,
    pub(crate) app_update_time: Option<String>,
    pub(crate) ui_mode: i32,
}

impl DeviceSnapshot {
    /// Assemble a snapshot with the default configuration.
    pub fn collect<P: Platform + ?Sized>(platform: &P) -> Self {
        SnapshotAssembler::default().assemble(platform)
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn app_version(&self) -> Option<&str> {
        self.app_version.as_deref()
    }

    pub fn device_type(&self) -> Option<DeviceType> {
        self.device_type
    }

    pub fn device_name(&self) -> Option<&str> {
        self.device_name.as_deref()
    }

    pub fn device_manufacturer(&self) -> &str {
        &self.device_manufacturer
    }

    pub fn os_name(&self) -> OsName {
        self.os_name
    }

    pub fn os_version(&self) -> Option<&str> {
        self.os_version.as_deref()
    }

    pub fn api_level(&self) -> u32 {
        self.api_level
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn screen_size(&self) -> Option<ScreenSize> {
        self.screen_size
    }

    pub fn screen_format(&self) -> Option<ScreenFormat> {
        self.screen_format
    }

    pub fn screen_density(&self) -> Option<ScreenDensity> {
        self.screen_density
    }

    pub fn display_width(&self) -> i32 {
        self.display_width
    }

    pub fn display_height(&self) -> i32 {
        self.display_height
    }

    pub fn fb_attribution_id(&self) -> Option<&str> {
        self.fb_attribution_id.as_deref()
    }

    pub fn hardware_name(&self) -> &str {
        &self.hardware_name
    }

    pub fn abi(&self) -> &str {
        &self.abi
    }

    pub fn build_name(&self) -> &str {
        &self.build_name
    }

    pub fn app_install_time(&self) -> Option<&str> {
        self.app_install_time.as_deref()
    }

    pub fn app_update_time(&self) -> Option<&str> {
        self.app_update_time.as_deref()
    }

    pub fn ui_mode(&self) -> i32 {
        self.ui_mode
    }
}

/// First supported ABI, or the legacy single ABI when the list is empty.
pub fn select_abi(build: &BuildConstants) -> String {
    build
        .supported_abis
        .first()
        .cloned()
        .unwrap_or_else(|| build.cpu_abi.clone())
}

/// Builder for device snapshots.
#[derive(Debug, Clone, Default)]
pub struct SnapshotAssembler {
    config: CollectorConfig,
    log: Option<SharedCollectionLog>,
}

impl SnapshotAssembler {
    /// Create an assembler with the given configuration.
    pub fn new(config: CollectorConfig) -> Self {
        Self { config, log: None }
    }

    /// Count assemblies and probe outcomes in a shared log.
    pub fn with_log(mut self, log: SharedCollectionLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Collect a snapshot from `platform` on the calling thread.
    pub fn assemble<P: Platform + ?Sized>(&self, platform: &P) -> DeviceSnapshot {
        let resources = platform.resources();
        let display_metrics = resources.display_metrics;
        let configuration = resources.configuration;
        let locale = configuration.current_locale().clone();
        let package_name = platform.package_name();
        let package_info = self.own_package_info(platform, &package_name);
        let build = platform.build_constants();
        let is_pc = classify::is_google_play_games_for_pc(platform, &self.config.pc_feature);
        let time_zone = platform.default_time_zone();
        let screen_layout = configuration.screen_layout;

        let format_time = |millis: i64| {
            let formatted = format_epoch_millis(millis, time_zone, self.config.timestamp_style);
            if formatted.is_none() {
                tracing::debug!(millis, "timestamp out of range");
            }
            formatted
        };

        let snapshot = DeviceSnapshot {
            app_version: package_info.as_ref().and_then(|p| p.version_name.clone()),
            device_type: classify::device_type(is_pc, &configuration),
            device_name: (!is_pc).then(|| build.model.clone()),
            device_manufacturer: build.manufacturer.clone(),
            os_name: OsName::for_device(is_pc),
            os_version: (!is_pc).then(|| build.release.clone()),
            api_level: build.sdk_int,
            language: locale.language.to_ascii_lowercase(),
            country: locale.country.to_ascii_uppercase(),
            screen_size: classify::screen_size(screen_layout),
            screen_format: classify::screen_format(screen_layout),
            screen_density: classify::screen_density(display_metrics.density_dpi),
            display_width: display_metrics.width_pixels,
            display_height: display_metrics.height_pixels,
            fb_attribution_id: self.attribution_id(platform),
            hardware_name: build.display.clone(),
            abi: select_abi(&build),
            build_name: build.id.clone(),
            app_install_time: package_info
                .as_ref()
                .and_then(|p| format_time(p.first_install_time)),
            app_update_time: package_info
                .as_ref()
                .and_then(|p| format_time(p.last_update_time)),
            ui_mode: classify::ui_mode(&configuration),
            package_name,
        };

        let populated = snapshot.populated_count();
        let absent = crate::core::export::DEVICE_INFO_KEYS.len() - populated;
        if let Some(log) = &self.log {
            log.record_snapshot(populated as u64, absent as u64);
        }
        tracing::info!(populated, absent, "device snapshot assembled");

        snapshot
    }

    fn own_package_info<P: Platform + ?Sized>(
        &self,
        platform: &P,
        package_name: &str,
    ) -> Option<PackageInfo> {
        match platform.package_info(package_name, PackageQuery::Basic) {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::warn!(package = package_name, error = %e, "own package lookup failed");
                None
            }
        }
    }

    fn attribution_id<P: Platform + ?Sized>(&self, platform: &P) -> Option<String> {
        if !self.config.facebook_attribution {
            return None;
        }

        let outcome = probe::probe(platform);
        if let Some(log) = &self.log {
            log.record_probe(
                outcome == ProbeOutcome::SignatureRejected,
                outcome.token().is_some(),
            );
        }
        outcome.into_token()
    }
}
