//! Keys for the two raster cache tiers.

use std::fmt;

use super::{Bounds, FilterKind, SourceId};

/// Key of a cached raster.
///
/// A key without a filter addresses the decoded, unfiltered tier; a key
/// with a filter addresses the final tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    source: SourceId,
    bounds: Bounds,
    filter: Option<FilterKind>,
}

impl CacheKey {
    /// Key of the decoded tier for `(source, bounds)`.
    #[must_use]
    pub const fn decoded(source: SourceId, bounds: Bounds) -> Self {
        Self {
            source,
            bounds,
            filter: None,
        }
    }

    /// Key of the final tier for `(source, bounds, filter)`.
    #[must_use]
    pub const fn filtered(source: SourceId, bounds: Bounds, filter: FilterKind) -> Self {
        Self {
            source,
            bounds,
            filter: Some(filter),
        }
    }

    /// Derives the final-tier key sharing this key's source and bounds.
    #[must_use]
    pub fn with_filter(&self, filter: FilterKind) -> Self {
        Self::filtered(self.source.clone(), self.bounds, filter)
    }

    /// Returns the source identity.
    #[must_use]
    pub const fn source(&self) -> &SourceId {
        &self.source
    }

    /// Returns the target bounds.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the filter, or None for the decoded tier.
    #[must_use]
    pub const fn filter(&self) -> Option<FilterKind> {
        self.filter
    }

    /// Returns true if the key addresses the decoded tier.
    #[must_use]
    pub const fn is_decoded_tier(&self) -> bool {
        self.filter.is_none()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_w{}_h{}",
            self.source,
            self.bounds.width(),
            self.bounds.height()
        )?;
        if let Some(filter) = self.filter {
            write!(f, "_{filter}")?;
        }
        Ok(())
    }
}
