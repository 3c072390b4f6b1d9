//! Platform adapter for the device information collector.
//!
//! This module defines the capability boundary between the collector and
//! the host platform runtime: package metadata, resources, build constants,
//! content-provider queries and system-feature probes. All API-level
//! branching lives behind [`Platform`] implementations (see [`versioned`]).

pub mod mock;
pub mod types;
pub mod versioned;

use chrono_tz::Tz;
use std::ops::{Deref, DerefMut};

// Re-export commonly used types
pub use types::{
    BuildConstants, Configuration, DisplayMetrics, Locale, PackageInfo, PackageQuery, Resources,
    Signature,
};
pub use versioned::{HostBindings, VersionedPlatform};

/// Errors reported by a platform adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// No such package, feature or row.
    NotFound,
    /// Access blocked by the platform's permission model.
    PermissionDenied,
    /// The platform refused or failed the call.
    Refused(String),
    /// The platform answered with an unexpected shape.
    Malformed(String),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformError::NotFound => write!(f, "Not found"),
            PlatformError::PermissionDenied => write!(f, "Permission denied"),
            PlatformError::Refused(e) => write!(f, "Platform refused: {e}"),
            PlatformError::Malformed(e) => write!(f, "Malformed response: {e}"),
        }
    }
}

impl std::error::Error for PlatformError {}

/// A forward-only result set returned by a content-provider query.
pub trait Cursor {
    /// Position the cursor on the first row. Returns false for an empty result.
    fn move_to_first(&mut self) -> Result<bool, PlatformError>;

    /// Index of the named column, if the projection contains it.
    fn column_index(&self, name: &str) -> Option<usize>;

    /// String value of a column in the current row.
    fn get_string(&self, column: usize) -> Result<Option<String>, PlatformError>;

    /// Release the underlying handle.
    fn close(&mut self);
}

/// Scoped owner of a [`Cursor`] that closes it when dropped.
///
/// Every exit path out of the scope holding the guard (early return,
/// `?` propagation, unwinding) releases the cursor exactly once.
pub struct CursorGuard<'a> {
    cursor: Box<dyn Cursor + 'a>,
}

impl<'a> CursorGuard<'a> {
    pub fn new(cursor: Box<dyn Cursor + 'a>) -> Self {
        Self { cursor }
    }
}

impl<'a> Deref for CursorGuard<'a> {
    type Target = dyn Cursor + 'a;

    fn deref(&self) -> &Self::Target {
        self.cursor.as_ref()
    }
}

impl<'a> DerefMut for CursorGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cursor.as_mut()
    }
}

impl Drop for CursorGuard<'_> {
    fn drop(&mut self) {
        self.cursor.close();
    }
}

/// Read-only view of the host platform as seen by the owning application.
///
/// Implementations must be synchronous and bounded. Version-conditional
/// behavior (signing-certificate API, locale list, supported ABIs) is
/// resolved by the implementation, not by callers.
pub trait Platform {
    /// Identifier of the owning application.
    fn package_name(&self) -> String;

    /// Package metadata for `package`. Signatures are only filled for
    /// [`PackageQuery::WithSignatures`].
    fn package_info(
        &self,
        package: &str,
        query: PackageQuery,
    ) -> Result<PackageInfo, PlatformError>;

    /// Display metrics and configuration.
    fn resources(&self) -> Resources;

    /// Build descriptors of the running OS image.
    fn build_constants(&self) -> BuildConstants;

    /// Query a content provider. `Ok(None)` means the provider returned no cursor.
    fn query_content(
        &self,
        uri: &str,
        projection: &[&str],
    ) -> Result<Option<Box<dyn Cursor + '_>>, PlatformError>;

    /// Whether the device declares the named system feature.
    fn has_system_feature(&self, name: &str) -> Result<bool, PlatformError>;

    /// The process's current default time zone.
    fn default_time_zone(&self) -> Tz;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingCursor {
        closes: Arc<AtomicUsize>,
    }

    impl Cursor for CountingCursor {
        fn move_to_first(&mut self) -> Result<bool, PlatformError> {
            Err(PlatformError::Refused("stale cursor".to_string()))
        }

        fn column_index(&self, _name: &str) -> Option<usize> {
            None
        }

        fn get_string(&self, _column: usize) -> Result<Option<String>, PlatformError> {
            Ok(None)
        }

        fn close(&mut self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn read_first(closes: Arc<AtomicUsize>) -> Result<bool, PlatformError> {
        let mut guard = CursorGuard::new(Box::new(CountingCursor { closes }));
        let moved = guard.move_to_first()?;
        Ok(moved)
    }

    #[test]
    fn test_cursor_guard_closes_on_error_path() {
        let closes = Arc::new(AtomicUsize::new(0));
        assert!(read_first(closes.clone()).is_err());
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_platform_error_display() {
        assert_eq!(PlatformError::NotFound.to_string(), "Not found");
        assert_eq!(
            PlatformError::Malformed("two signers".to_string()).to_string(),
            "Malformed response: two signers"
        );
    }
}
