//! Error types for volume construction, table loading and container I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up a thinning run.
///
/// Once a [`crate::Volume`] and [`crate::ThinningTables`] are constructed,
/// the thinning loop itself cannot fail.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A volume axis length is zero.
    #[error("invalid volume dimensions: {nx}x{ny}x{nz} (every axis must be >= 1)")]
    InvalidDimensions {
        /// Requested x extent.
        nx: usize,
        /// Requested y extent.
        ny: usize,
        /// Requested z extent.
        nz: usize,
    },

    /// The supplied voxel buffer does not match the declared dimensions.
    #[error("volume data length {actual} does not match dimensions ({expected} voxels)")]
    InvalidData {
        /// Number of voxels implied by the dimensions.
        expected: usize,
        /// Length of the buffer that was supplied.
        actual: usize,
    },

    /// A classification lookup table could not be read.
    #[error("failed to load lookup table {path}: {source}")]
    LutLoad {
        /// Path of the table resource.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// A classification lookup table has the wrong size.
    #[error("lookup table {path} has {actual} bytes, expected {expected}")]
    LutSize {
        /// Path of the table resource.
        path: PathBuf,
        /// Required table size in bytes.
        expected: usize,
        /// Size that was found.
        actual: usize,
    },

    /// Container read/write failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The container describes data this implementation cannot process.
    #[error("unsupported volume format: {reason}")]
    UnsupportedFormat {
        /// Description of the offending property.
        reason: String,
    },
}

impl Error {
    /// Create an `UnsupportedFormat` error with the given reason.
    pub(crate) fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            reason: reason.into(),
        }
    }
}
