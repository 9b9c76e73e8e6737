//! voxskel-core — sequential isthmus-based 3D curve thinning.
//!
//! Reduces a binary voxel object to a thin, topology-equivalent skeleton
//! using precomputed 26-neighborhood classification tables. The stages are:
//!
//! 1. **Volume** – padded dense grid, voxel states, neighborhood packing.
//! 2. **Collect** – mark every object voxel touching background as surface
//!    and seed the frontier.
//! 3. **Detect** – per deletion direction (U, D, N, S, E, W), classify
//!    border points as deletion candidates or protected isthmus points.
//! 4. **Delete** – sequentially re-check and remove candidates, promoting
//!    newly exposed object voxels into the frontier.
//! 5. **Analyze I/O** – optional Analyze 7.5 `.hdr`/`.img` container support.
//!
//! # Public API
//! - [`Skeletonizer`] as the primary entry point
//! - [`Volume`] / [`VoxelState`] for callers that manage voxel data directly
//! - [`ThinningTables`] / [`Lut`] for loading the classification resources
//! - [`analyze`] for the file container

pub mod analyze;
mod detect;
mod direction;
mod error;
mod frontier;
mod lut;
#[cfg(test)]
mod test_tables;
mod thin;
mod volume;

use std::path::Path;

pub use direction::Direction;
pub use error::{Error, Result};
pub use lut::{Lut, ThinningTables, ISTHMUS_LUT_NAME, LUT_LEN, SIMPLE_LUT_NAME};
pub use thin::{skeletonize, ThinningReport};
pub use volume::{Volume, VoxelState};

/// Reusable thinning engine: classification tables loaded once, applied to
/// any number of volumes.
#[derive(Debug)]
pub struct Skeletonizer {
    tables: ThinningTables,
}

impl Skeletonizer {
    /// Wrap already-loaded classification tables.
    pub fn new(tables: ThinningTables) -> Self {
        Self { tables }
    }

    /// Load `lut_simple.dat` and `lut_isthmus.dat` from a directory.
    pub fn from_lut_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            tables: ThinningTables::from_dir(dir.as_ref())?,
        })
    }

    /// The loaded classification tables.
    pub fn tables(&self) -> &ThinningTables {
        &self.tables
    }

    /// Thin a volume in place. See [`skeletonize`].
    pub fn skeletonize_volume(&self, volume: &mut Volume) -> ThinningReport {
        skeletonize(volume, &self.tables)
    }

    /// Thin a raw binary mask (x fastest, then y, then z; nonzero is
    /// foreground) and return the skeleton as a 0/1 mask of the same shape.
    pub fn skeletonize_mask(
        &self,
        dims: [usize; 3],
        mask: &[u8],
    ) -> Result<(Vec<u8>, ThinningReport)> {
        let mut volume = Volume::from_mask(dims, mask)?;
        let report = skeletonize(&mut volume, &self.tables);
        Ok((volume.to_mask(), report))
    }
}
