use thiserror::Error;

/// Errors reported by the map and cursor operations of both engines.
///
/// Both kinds are contract violations by the caller, never transient faults.
/// A call that fails leaves the map exactly as it was.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
#[non_exhaustive]
pub enum MapError {
    /// The key is not present in the map.
    #[error("key not found in map")]
    NotFound,

    /// The cursor was read at the end position, advanced past the end, moved back
    /// before the first entry, or used to remove the end position.
    #[error("invalid iterator: cursor is outside the map's entries")]
    InvalidIterator,
}

/// Result alias for map and cursor operations.
pub type Result<T> = core::result::Result<T, MapError>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(MapError::NotFound.to_string(), "key not found in map");
        assert_eq!(
            MapError::InvalidIterator.to_string(),
            "invalid iterator: cursor is outside the map's entries"
        );
    }
}
