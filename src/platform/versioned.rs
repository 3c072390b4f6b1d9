//! API-level aware platform adapter.
//!
//! Host bindings expose the raw calls of every platform generation. The
//! [`VersionedPlatform`] wrapper reads the API level once, picks a strategy
//! for each version-dependent signal, and serves [`Platform`] calls without
//! further version checks.

use super::types::{
    BuildConstants, Configuration, DisplayMetrics, Locale, PackageInfo, PackageQuery, Resources,
    Signature,
};
use super::{Cursor, Platform, PlatformError};
use chrono_tz::Tz;

/// First API level exposing multi-signer signing info.
pub const SIGNING_INFO_MIN_API: u32 = 28;

/// First API level exposing the configuration locale list.
pub const LOCALE_LIST_MIN_API: u32 = 24;

/// First API level exposing the supported ABI list.
pub const SUPPORTED_ABIS_MIN_API: u32 = 21;

/// Raw host calls, one per platform API generation.
///
/// Methods for APIs newer than the running platform may be left to their
/// defaults; [`VersionedPlatform`] never calls them on older devices.
pub trait HostBindings {
    fn package_name(&self) -> String;

    /// Package record without signatures.
    fn package_info(&self, package: &str) -> Result<PackageInfo, PlatformError>;

    /// Current APK signers from the signing-info API. `Ok(None)` when the
    /// package carries no signing info.
    fn apk_contents_signers(
        &self,
        _package: &str,
    ) -> Result<Option<Vec<Signature>>, PlatformError> {
        Err(PlatformError::Refused(
            "signing info unavailable".to_string(),
        ))
    }

    /// Signatures from the legacy single-array API.
    fn legacy_signatures(&self, package: &str) -> Result<Option<Vec<Signature>>, PlatformError>;

    fn display_metrics(&self) -> DisplayMetrics;

    /// Configuration with the single configured locale; `locales` is ignored.
    fn configuration(&self) -> Configuration;

    /// Configuration locale list.
    fn locale_list(&self) -> Vec<Locale> {
        Vec::new()
    }

    /// Build descriptors; `supported_abis` is ignored.
    fn build_constants(&self) -> BuildConstants;

    /// Supported ABI list.
    fn supported_abis(&self) -> Vec<String> {
        Vec::new()
    }

    fn query_content(
        &self,
        uri: &str,
        projection: &[&str],
    ) -> Result<Option<Box<dyn Cursor + '_>>, PlatformError>;

    fn has_system_feature(&self, name: &str) -> Result<bool, PlatformError>;

    fn default_time_zone(&self) -> Tz;
}

/// Source of signing certificates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerSource {
    SigningInfo,
    LegacySignatures,
}

/// Source of the reported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSource {
    LocaleList,
    ConfiguredLocale,
}

/// Source of the ABI tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiSource {
    SupportedAbis,
    CpuAbi,
}

/// [`Platform`] over [`HostBindings`] with strategies fixed at construction.
pub struct VersionedPlatform<H> {
    host: H,
    sdk_int: u32,
    signers: SignerSource,
    locales: LocaleSource,
    abis: AbiSource,
}

impl<H: HostBindings> VersionedPlatform<H> {
    /// Wrap host bindings, selecting strategies from the running API level.
    pub fn new(host: H) -> Self {
        let sdk_int = host.build_constants().sdk_int;
        let signers = if sdk_int >= SIGNING_INFO_MIN_API {
            SignerSource::SigningInfo
        } else {
            SignerSource::LegacySignatures
        };
        let locales = if sdk_int >= LOCALE_LIST_MIN_API {
            LocaleSource::LocaleList
        } else {
            LocaleSource::ConfiguredLocale
        };
        let abis = if sdk_int >= SUPPORTED_ABIS_MIN_API {
            AbiSource::SupportedAbis
        } else {
            AbiSource::CpuAbi
        };

        tracing::debug!(sdk_int, ?signers, ?locales, ?abis, "platform strategies selected");

        Self {
            host,
            sdk_int,
            signers,
            locales,
            abis,
        }
    }

    pub fn sdk_int(&self) -> u32 {
        self.sdk_int
    }

    pub fn signer_source(&self) -> SignerSource {
        self.signers
    }

    pub fn locale_source(&self) -> LocaleSource {
        self.locales
    }

    pub fn abi_source(&self) -> AbiSource {
        self.abis
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    fn signatures(&self, package: &str) -> Result<Vec<Signature>, PlatformError> {
        let signers = match self.signers {
            SignerSource::SigningInfo => self.host.apk_contents_signers(package)?,
            SignerSource::LegacySignatures => self.host.legacy_signatures(package)?,
        };
        Ok(signers.unwrap_or_default())
    }
}

impl<H: HostBindings> Platform for VersionedPlatform<H> {
    fn package_name(&self) -> String {
        self.host.package_name()
    }

    fn package_info(
        &self,
        package: &str,
        query: PackageQuery,
    ) -> Result<PackageInfo, PlatformError> {
        let mut info = self.host.package_info(package)?;
        info.signatures = match query {
            PackageQuery::Basic => Vec::new(),
            PackageQuery::WithSignatures => self.signatures(package)?,
        };
        Ok(info)
    }

    fn resources(&self) -> Resources {
        let mut configuration = self.host.configuration();
        configuration.locales = match self.locales {
            LocaleSource::LocaleList => self.host.locale_list(),
            LocaleSource::ConfiguredLocale => Vec::new(),
        };
        Resources {
            display_metrics: self.host.display_metrics(),
            configuration,
        }
    }

    fn build_constants(&self) -> BuildConstants {
        let mut build = self.host.build_constants();
        build.supported_abis = match self.abis {
            AbiSource::SupportedAbis => self.host.supported_abis(),
            AbiSource::CpuAbi => Vec::new(),
        };
        build
    }

    fn query_content(
        &self,
        uri: &str,
        projection: &[&str],
    ) -> Result<Option<Box<dyn Cursor + '_>>, PlatformError> {
        self.host.query_content(uri, projection)
    }

    fn has_system_feature(&self, name: &str) -> Result<bool, PlatformError> {
        self.host.has_system_feature(name)
    }

    fn default_time_zone(&self) -> Tz {
        self.host.default_time_zone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeHost {
        sdk_int: u32,
    }

    impl HostBindings for FakeHost {
        fn package_name(&self) -> String {
            "com.example.game".to_string()
        }

        fn package_info(&self, package: &str) -> Result<PackageInfo, PlatformError> {
            Ok(PackageInfo {
                package_name: package.to_string(),
                version_name: Some("1.0".to_string()),
                ..Default::default()
            })
        }

        fn apk_contents_signers(
            &self,
            _package: &str,
        ) -> Result<Option<Vec<Signature>>, PlatformError> {
            Ok(Some(vec![Signature::from_der(vec![0x28])]))
        }

        fn legacy_signatures(
            &self,
            _package: &str,
        ) -> Result<Option<Vec<Signature>>, PlatformError> {
            Ok(Some(vec![Signature::from_der(vec![0x01])]))
        }

        fn display_metrics(&self) -> DisplayMetrics {
            DisplayMetrics::default()
        }

        fn configuration(&self) -> Configuration {
            Configuration {
                locale: Locale::new("en", "US"),
                ..Default::default()
            }
        }

        fn locale_list(&self) -> Vec<Locale> {
            vec![Locale::new("ja", "JP")]
        }

        fn build_constants(&self) -> BuildConstants {
            BuildConstants {
                sdk_int: self.sdk_int,
                cpu_abi: "armeabi-v7a".to_string(),
                ..Default::default()
            }
        }

        fn supported_abis(&self) -> Vec<String> {
            vec!["arm64-v8a".to_string()]
        }

        fn query_content(
            &self,
            _uri: &str,
            _projection: &[&str],
        ) -> Result<Option<Box<dyn Cursor + '_>>, PlatformError> {
            Ok(None)
        }

        fn has_system_feature(&self, _name: &str) -> Result<bool, PlatformError> {
            Ok(false)
        }

        fn default_time_zone(&self) -> Tz {
            Tz::UTC
        }
    }

    #[test]
    fn test_modern_api_uses_signing_info() {
        let platform = VersionedPlatform::new(FakeHost { sdk_int: 33 });
        assert_eq!(platform.signer_source(), SignerSource::SigningInfo);

        let info = platform
            .package_info("com.facebook.katana", PackageQuery::WithSignatures)
            .unwrap();
        assert_eq!(info.signatures, vec![Signature::from_der(vec![0x28])]);
    }

    #[test]
    fn test_legacy_api_uses_signature_array() {
        let platform = VersionedPlatform::new(FakeHost { sdk_int: 27 });
        assert_eq!(platform.signer_source(), SignerSource::LegacySignatures);

        let info = platform
            .package_info("com.facebook.katana", PackageQuery::WithSignatures)
            .unwrap();
        assert_eq!(info.signatures, vec![Signature::from_der(vec![0x01])]);
    }

    #[test]
    fn test_basic_query_skips_signatures() {
        let platform = VersionedPlatform::new(FakeHost { sdk_int: 33 });
        let info = platform
            .package_info("com.example.game", PackageQuery::Basic)
            .unwrap();
        assert!(info.signatures.is_empty());
    }

    #[test]
    fn test_locale_list_gated_by_api_level() {
        let modern = VersionedPlatform::new(FakeHost { sdk_int: 24 });
        assert_eq!(
            modern.resources().configuration.current_locale(),
            &Locale::new("ja", "JP")
        );

        let legacy = VersionedPlatform::new(FakeHost { sdk_int: 23 });
        assert_eq!(
            legacy.resources().configuration.current_locale(),
            &Locale::new("en", "US")
        );
    }

    #[test]
    fn test_supported_abis_gated_by_api_level() {
        let modern = VersionedPlatform::new(FakeHost { sdk_int: 21 });
        assert_eq!(modern.build_constants().supported_abis, vec!["arm64-v8a"]);

        let legacy = VersionedPlatform::new(FakeHost { sdk_int: 19 });
        assert_eq!(legacy.abi_source(), AbiSource::CpuAbi);
        assert!(legacy.build_constants().supported_abis.is_empty());
    }
}
