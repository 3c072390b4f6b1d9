//! In-memory platform adapter.
//!
//! This exists so the collector can be exercised without a host runtime:
//! every platform signal is a plain field, and content-provider traffic is
//! recorded so callers can assert on queries and cursor releases.

use super::types::{
    BuildConstants, Configuration, DisplayMetrics, Locale, PackageInfo, PackageQuery, Resources,
    Signature,
};
use super::{Cursor, Platform, PlatformError};
use chrono_tz::Tz;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Scripted response of a mock content provider.
#[derive(Debug, Clone)]
pub enum MockProvider {
    /// The query returns no cursor at all.
    NoCursor,
    /// The query returns a cursor over these rows.
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<Option<String>>>,
    },
    /// The query fails.
    Error(PlatformError),
}

impl MockProvider {
    /// Single-column result set with one row per value.
    pub fn single_column(column: &str, values: Vec<Option<String>>) -> Self {
        MockProvider::Rows {
            columns: vec![column.to_string()],
            rows: values.into_iter().map(|v| vec![v]).collect(),
        }
    }
}

/// Counters for content-provider traffic.
#[derive(Debug, Default)]
pub struct ContentTraffic {
    queries: AtomicUsize,
    cursors_opened: AtomicUsize,
    cursors_closed: AtomicUsize,
}

impl ContentTraffic {
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn cursors_opened(&self) -> usize {
        self.cursors_opened.load(Ordering::SeqCst)
    }

    pub fn cursors_closed(&self) -> usize {
        self.cursors_closed.load(Ordering::SeqCst)
    }
}

/// Cursor over scripted rows.
pub struct MockCursor {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
    position: Option<usize>,
    closed: bool,
    traffic: Arc<ContentTraffic>,
}

impl Cursor for MockCursor {
    fn move_to_first(&mut self) -> Result<bool, PlatformError> {
        if self.closed {
            return Err(PlatformError::Refused("cursor closed".to_string()));
        }
        if self.rows.is_empty() {
            self.position = None;
            return Ok(false);
        }
        self.position = Some(0);
        Ok(true)
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn get_string(&self, column: usize) -> Result<Option<String>, PlatformError> {
        let row = self
            .position
            .and_then(|p| self.rows.get(p))
            .ok_or_else(|| PlatformError::Malformed("cursor not positioned".into()))?;
        row.get(column)
            .cloned()
            .ok_or_else(|| PlatformError::Malformed(format!("no column {column}")))
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.traffic.cursors_closed.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// A scripted [`Platform`].
#[derive(Debug, Clone)]
pub struct MockPlatform {
    pub package_name: String,
    /// Installed packages by id
    pub packages: HashMap<String, PackageInfo>,
    /// Lookup failures by package id (take precedence over `packages`)
    pub package_errors: HashMap<String, PlatformError>,
    pub resources: Resources,
    pub build: BuildConstants,
    pub features: HashSet<String>,
    /// Failure for every system-feature probe
    pub feature_error: Option<PlatformError>,
    /// Content providers by URI; unknown URIs return no cursor
    pub providers: HashMap<String, MockProvider>,
    pub time_zone: Tz,
    traffic: Arc<ContentTraffic>,
}

impl Default for MockPlatform {
    fn default() -> Self {
        let package_name = "com.example.game".to_string();
        let mut packages = HashMap::new();
        packages.insert(
            package_name.clone(),
            PackageInfo {
                package_name: package_name.clone(),
                version_name: Some("1.0.0".to_string()),
                first_install_time: 0,
                last_update_time: 0,
                signatures: Vec::new(),
            },
        );

        Self {
            package_name,
            packages,
            package_errors: HashMap::new(),
            resources: Resources {
                display_metrics: DisplayMetrics {
                    width_pixels: 1080,
                    height_pixels: 2400,
                    density_dpi: DisplayMetrics::DENSITY_MEDIUM,
                },
                configuration: Configuration {
                    ui_mode: Configuration::UI_MODE_TYPE_NORMAL,
                    screen_layout: Configuration::SCREENLAYOUT_SIZE_NORMAL
                        | Configuration::SCREENLAYOUT_LONG_YES,
                    locale: Locale::new("en", "US"),
                    locales: vec![Locale::new("en", "US")],
                },
            },
            build: BuildConstants {
                manufacturer: "Google".to_string(),
                model: "Pixel 8".to_string(),
                release: "14".to_string(),
                sdk_int: 34,
                id: "UQ1A.240105.004".to_string(),
                display: "UQ1A.240105.004".to_string(),
                supported_abis: vec!["arm64-v8a".to_string()],
                cpu_abi: "arm64-v8a".to_string(),
            },
            features: HashSet::new(),
            feature_error: None,
            providers: HashMap::new(),
            time_zone: Tz::UTC,
            traffic: Arc::new(ContentTraffic::default()),
        }
    }
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install (or replace) a package.
    pub fn with_package(mut self, info: PackageInfo) -> Self {
        self.packages.insert(info.package_name.clone(), info);
        self
    }

    /// Install a package signed by the given certificates.
    pub fn with_signed_package(self, package: &str, signatures: Vec<Signature>) -> Self {
        self.with_package(PackageInfo {
            package_name: package.to_string(),
            signatures,
            ..Default::default()
        })
    }

    /// Make lookups of `package` fail.
    pub fn with_package_error(mut self, package: &str, error: PlatformError) -> Self {
        self.package_errors.insert(package.to_string(), error);
        self
    }

    pub fn with_feature(mut self, name: &str) -> Self {
        self.features.insert(name.to_string());
        self
    }

    pub fn with_provider(mut self, uri: &str, provider: MockProvider) -> Self {
        self.providers.insert(uri.to_string(), provider);
        self
    }

    pub fn with_time_zone(mut self, tz: Tz) -> Self {
        self.time_zone = tz;
        self
    }

    /// Content-provider traffic seen so far (shared across clones).
    pub fn traffic(&self) -> Arc<ContentTraffic> {
        self.traffic.clone()
    }
}

impl Platform for MockPlatform {
    fn package_name(&self) -> String {
        self.package_name.clone()
    }

    fn package_info(
        &self,
        package: &str,
        query: PackageQuery,
    ) -> Result<PackageInfo, PlatformError> {
        if let Some(error) = self.package_errors.get(package) {
            return Err(error.clone());
        }
        let mut info = self
            .packages
            .get(package)
            .cloned()
            .ok_or(PlatformError::NotFound)?;
        if query == PackageQuery::Basic {
            info.signatures.clear();
        }
        Ok(info)
    }

    fn resources(&self) -> Resources {
        self.resources.clone()
    }

    fn build_constants(&self) -> BuildConstants {
        self.build.clone()
    }

    fn query_content(
        &self,
        uri: &str,
        _projection: &[&str],
    ) -> Result<Option<Box<dyn Cursor + '_>>, PlatformError> {
        self.traffic.queries.fetch_add(1, Ordering::SeqCst);

        match self.providers.get(uri) {
            None | Some(MockProvider::NoCursor) => Ok(None),
            Some(MockProvider::Error(e)) => Err(e.clone()),
            Some(MockProvider::Rows { columns, rows }) => {
                self.traffic.cursors_opened.fetch_add(1, Ordering::SeqCst);
                Ok(Some(Box::new(MockCursor {
                    columns: columns.clone(),
                    rows: rows.clone(),
                    position: None,
                    closed: false,
                    traffic: self.traffic.clone(),
                })))
            }
        }
    }

    fn has_system_feature(&self, name: &str) -> Result<bool, PlatformError> {
        match &self.feature_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.features.contains(name)),
        }
    }

    fn default_time_zone(&self) -> Tz {
        self.time_zone
    }
}
