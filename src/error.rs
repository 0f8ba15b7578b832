//! Error types for catalog loading, instance construction and configuration.
//!
//! The optimization loop itself never fails: a rejected move is ordinary
//! control flow and degenerate numerics fall back to defined values. Errors
//! only surface while loading data or validating input.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for crate operations.
pub type TspResult<T> = Result<T, TspError>;

/// Unified error type.
#[derive(Debug, Error)]
pub enum TspError {
    // ===== Configuration Errors =====
    /// Invalid solver or driver parameter.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the invalid parameter.
        message: String,
    },

    /// No city list was supplied.
    #[error("no city list given (use --cities or --cities-file)")]
    MissingCityList,

    /// A token in a city list could not be parsed as an id.
    #[error("invalid city id '{token}'")]
    InvalidCityId {
        /// The offending token.
        token: String,
    },

    /// A city id lies outside `1..=max`.
    #[error("city id {id} out of range (valid: 1..={max})")]
    CityOutOfRange {
        /// The offending id.
        id: usize,
        /// Largest valid id in the catalog.
        max: usize,
    },

    /// A city id appears twice in one instance.
    #[error("city id {id} appears more than once")]
    DuplicateCity {
        /// The repeated id.
        id: usize,
    },

    /// An instance needs at least one city.
    #[error("instance has no cities")]
    EmptyInstance,

    // ===== Catalog Errors =====
    /// The catalog store is missing or unreadable.
    #[error("catalog unavailable at {}: {source}", path.display())]
    CatalogUnavailable {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The catalog contents violate an invariant.
    #[error("invalid catalog: {message}")]
    InvalidCatalog {
        /// What was wrong.
        message: String,
    },

    /// CSV decoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parameter file could not be parsed.
    #[error("parameter file error: {0}")]
    Params(#[from] toml::de::Error),
}

impl TspError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid-catalog error.
    pub fn invalid_catalog(message: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = TspError::CityOutOfRange { id: 1093, max: 1092 };
        assert_eq!(
            err.to_string(),
            "city id 1093 out of range (valid: 1..=1092)"
        );
    }

    #[test]
    fn test_catalog_unavailable_mentions_path() {
        let err = TspError::CatalogUnavailable {
            path: PathBuf::from("data/cities.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("data/cities.csv"), "{msg}");
        assert!(msg.contains("missing"), "{msg}");
    }

    #[test]
    fn test_config_helper() {
        let err = TspError::config("phi must be in (0, 1)");
        assert!(matches!(err, TspError::Config { .. }));
        assert_eq!(err.to_string(), "configuration error: phi must be in (0, 1)");
    }
}
