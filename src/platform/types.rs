//! Platform records consumed by the collector.
//!
//! Integer constants mirror the host platform's published values; they are
//! part of the attribution wire contract and must not be renumbered.

use serde::{Deserialize, Serialize};

/// Display metrics of the default display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayMetrics {
    /// Absolute width in pixels
    pub width_pixels: i32,
    /// Absolute height in pixels
    pub height_pixels: i32,
    /// Screen density in dots per inch (0 when unknown)
    pub density_dpi: i32,
}

impl DisplayMetrics {
    pub const DENSITY_LOW: i32 = 120;
    pub const DENSITY_MEDIUM: i32 = 160;
    pub const DENSITY_HIGH: i32 = 240;
}

/// A language/region pair as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Locale {
    pub language: String,
    pub country: String,
}

impl Locale {
    pub fn new(language: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            country: country.into(),
        }
    }
}

/// Device configuration relevant to the collector.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Configuration {
    /// Raw UI mode bitfield
    pub ui_mode: i32,
    /// Raw screen layout bitfield
    pub screen_layout: i32,
    /// Single configured locale
    pub locale: Locale,
    /// Ordered locale list (empty where the platform has none)
    pub locales: Vec<Locale>,
}

impl Configuration {
    pub const UI_MODE_TYPE_MASK: i32 = 0x0f;
    pub const UI_MODE_TYPE_NORMAL: i32 = 0x01;
    pub const UI_MODE_TYPE_TELEVISION: i32 = 0x04;

    pub const SCREENLAYOUT_SIZE_MASK: i32 = 0x0f;
    pub const SCREENLAYOUT_SIZE_SMALL: i32 = 0x01;
    pub const SCREENLAYOUT_SIZE_NORMAL: i32 = 0x02;
    pub const SCREENLAYOUT_SIZE_LARGE: i32 = 0x03;
    /// Literal value older platforms used for extra-large screens.
    pub const SCREENLAYOUT_SIZE_XLARGE: i32 = 4;

    pub const SCREENLAYOUT_LONG_MASK: i32 = 0x30;
    pub const SCREENLAYOUT_LONG_NO: i32 = 0x10;
    pub const SCREENLAYOUT_LONG_YES: i32 = 0x20;

    /// The locale the collector reports: first entry of the locale list,
    /// or the single configured locale when the list is empty.
    pub fn current_locale(&self) -> &Locale {
        self.locales.first().unwrap_or(&self.locale)
    }
}

/// Resource handle: display metrics plus configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resources {
    pub display_metrics: DisplayMetrics,
    pub configuration: Configuration,
}

/// Build descriptors of the running OS image.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildConstants {
    pub manufacturer: String,
    pub model: String,
    /// User-visible OS release string
    pub release: String,
    /// Platform API level
    pub sdk_int: u32,
    /// Build identifier
    pub id: String,
    /// Display build string
    pub display: String,
    /// Supported ABIs in preference order (may be empty)
    pub supported_abis: Vec<String>,
    /// Legacy single ABI
    pub cpu_abi: String,
}

/// A signing certificate, held as its DER encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    der: Vec<u8>,
}

impl Signature {
    pub fn from_der(der: impl Into<Vec<u8>>) -> Self {
        Self { der: der.into() }
    }

    /// Parse a hex-serialized certificate (either case).
    pub fn from_hex(hex_str: &str) -> Result<Self, hex::FromHexError> {
        Ok(Self::from_der(hex::decode(hex_str)?))
    }

    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    /// Lower-case hex encoding of the DER bytes.
    pub fn to_chars_string(&self) -> String {
        hex::encode(&self.der)
    }
}

/// Which parts of a package record a lookup should fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageQuery {
    /// Version and install metadata only
    Basic,
    /// Also resolve signing certificates
    WithSignatures,
}

/// Package metadata for an installed application.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageInfo {
    pub package_name: String,
    pub version_name: Option<String>,
    /// Epoch milliseconds
    pub first_install_time: i64,
    /// Epoch milliseconds
    pub last_update_time: i64,
    pub signatures: Vec<Signature>,
}
