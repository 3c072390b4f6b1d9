//! Signing-certificate pinning for foreign applications.
//!
//! A foreign application is trusted only if it has exactly one signer and
//! the lower-case hex of that signer's DER certificate equals the pin. The
//! certificate is never parsed; byte equality is the only predicate.

use crate::platform::{PackageQuery, Platform, Signature};

/// Package id of the Facebook application.
pub const FACEBOOK_PACKAGE: &str = "com.facebook.katana";

/// Hex-encoded DER certificate of the production Facebook signing key.
pub const OFFICIAL_FACEBOOK_SIGNATURE: &str = concat!(
    "30820268308201d102044a9c4610300d06092a864886f70d0101040500307a310b30090603550406",
    "13025553310b3009060355040813024341311230100603550407130950616c6f20416c746f311830",
    "16060355040a130f46616365626f6f6b204d6f62696c653111300f060355040b130846616365626f",
    "6f6b311d301b0603550403131446616365626f6f6b20436f72706f726174696f6e3020170d303930",
    "3833313231353231365a180f32303530303932353231353231365a307a310b300906035504061302",
    "5553310b3009060355040813024341311230100603550407130950616c6f20416c746f3118301606",
    "0355040a130f46616365626f6f6b204d6f62696c653111300f060355040b130846616365626f6f6b",
    "311d301b0603550403131446616365626f6f6b20436f72706f726174696f6e30819f300d06092a86",
    "4886f70d010101050003818d0030818902818100c207d51df8eb8c97d93ba0c8c1002c928fab00dc",
    "1b42fca5e66e99cc3023ed2d214d822bc59e8e35ddcf5f44c7ae8ade50d7e0c434f500e6c131f4a2",
    "834f987fc46406115de2018ebbb0d5a3c261bd97581ccfef76afc7135a6d59e8855ecd7eacc8f873",
    "7e794c60a761c536b72b11fac8e603f5da1a2d54aa103b8a13c0dbc10203010001300d06092a8648",
    "86f70d0101040500038181005ee9be8bcbb250648d3b741290a82a1c9dc2e76a0af2f2228f1d9f9c",
    "4007529c446a70175c5a900d5141812866db46be6559e2141616483998211f4a673149fb2232a10d",
    "247663b26a9031e15f84bc1c74d141ff98a02d76f85b2c8ab2571b6469b232d8e768a7f7ca04f7ab",
    "e4a775615916c07940656b58717457b42bd928a2",
);

/// Whether a signer set is exactly one certificate matching `pinned`.
///
/// Comparison is case-sensitive against the lower-case hex encoding.
pub fn matches_pin(signatures: &[Signature], pinned: &str) -> bool {
    match signatures {
        [only] => only.to_chars_string() == pinned,
        _ => false,
    }
}

/// Verify that `package` is installed and signed only by `pinned`.
///
/// Lookup failures, missing signatures and mismatches all yield `false`.
pub fn verify<P: Platform + ?Sized>(platform: &P, package: &str, pinned: &str) -> bool {
    let info = match platform.package_info(package, PackageQuery::WithSignatures) {
        Ok(info) => info,
        Err(e) => {
            tracing::debug!(package, error = %e, "signature lookup failed");
            return false;
        }
    };

    let trusted = matches_pin(&info.signatures, pinned);
    if !trusted {
        tracing::debug!(
            package,
            signers = info.signatures.len(),
            "package signature does not match pin"
        );
    }
    trusted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockPlatform;
    use crate::platform::PlatformError;

    fn official() -> Signature {
        Signature::from_hex(OFFICIAL_FACEBOOK_SIGNATURE).unwrap()
    }

    fn trusts_facebook(platform: &MockPlatform) -> bool {
        verify(platform, FACEBOOK_PACKAGE, OFFICIAL_FACEBOOK_SIGNATURE)
    }

    #[test]
    fn test_pinned_certificate_is_well_formed() {
        assert_eq!(OFFICIAL_FACEBOOK_SIGNATURE.len(), 1240);
        assert!(OFFICIAL_FACEBOOK_SIGNATURE
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(official().to_chars_string(), OFFICIAL_FACEBOOK_SIGNATURE);
    }

    #[test]
    fn test_single_matching_signer() {
        assert!(matches_pin(&[official()], OFFICIAL_FACEBOOK_SIGNATURE));
    }

    #[test]
    fn test_multi_signer_rejected() {
        let signers = [official(), official()];
        assert!(!matches_pin(&signers, OFFICIAL_FACEBOOK_SIGNATURE));
        assert!(!matches_pin(&[], OFFICIAL_FACEBOOK_SIGNATURE));
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let upper = OFFICIAL_FACEBOOK_SIGNATURE.to_uppercase();
        assert!(!matches_pin(&[official()], &upper));
    }

    #[test]
    fn test_verify_against_platform() {
        let genuine = MockPlatform::new().with_signed_package(FACEBOOK_PACKAGE, vec![official()]);
        assert!(trusts_facebook(&genuine));

        let forged = vec![Signature::from_der(vec![0x30, 0x00])];
        let impostor = MockPlatform::new().with_signed_package(FACEBOOK_PACKAGE, forged);
        assert!(!trusts_facebook(&impostor));

        assert!(!trusts_facebook(&MockPlatform::new()));

        let refused = MockPlatform::new()
            .with_signed_package(FACEBOOK_PACKAGE, vec![official()])
            .with_package_error(FACEBOOK_PACKAGE, PlatformError::PermissionDenied);
        assert!(!trusts_facebook(&refused));
    }
}
