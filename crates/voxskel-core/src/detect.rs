//! Per-direction border-point detection and the sequential deletion pass.
//!
//! One thinning iteration runs these two passes once per deletion direction.
//! Detection walks the frontier and classifies every border point of the
//! current direction: simple points become deletion candidates, isthmus
//! points are protected on the spot. Deletion then revisits the candidates
//! *sequentially*, re-deriving each neighborhood configuration against the
//! already-updated volume, so that deleting one candidate can veto a later
//! one. This re-check is what makes the result topology-safe despite the
//! batched detection.

use crate::frontier::{Handle, SurfaceFrontier};
use crate::lut::ThinningTables;
use crate::volume::{Volume, VoxelState};
use crate::Direction;

/// A simple border point scheduled for the deletion pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    /// Flat padded index of the voxel.
    pub idx: usize,
    /// Its frontier entry, for O(1) removal after deletion.
    pub handle: Handle,
}

/// Classify border points of `dir` among the current surface voxels.
///
/// Simple points are appended to `candidates`; isthmus points are switched
/// to [`VoxelState::Isthmus`] and dropped from the frontier immediately.
/// Returns the number of voxels protected in this pass.
pub(crate) fn detect_border_points(
    volume: &mut Volume,
    frontier: &mut SurfaceFrontier,
    tables: &ThinningTables,
    dir: Direction,
    candidates: &mut Vec<Candidate>,
) -> usize {
    let ahead = volume.direction_offset(dir);
    let mut protected = 0;

    let mut cursor = frontier.head();
    while let Some(handle) = cursor {
        cursor = frontier.next(handle);
        let idx = match frontier.voxel(handle) {
            Some(idx) => idx,
            None => continue,
        };
        if volume.state_at(idx) != VoxelState::Surface {
            continue;
        }
        // Border point in `dir`: the face neighbor ahead is background.
        let ahead_idx = (idx as isize + ahead) as usize;
        if volume.state_at(ahead_idx) != VoxelState::Background {
            continue;
        }

        let config = volume.neighbor_config(idx);
        if tables.is_simple(config) {
            candidates.push(Candidate { idx, handle });
        } else if tables.is_isthmus(config) {
            volume.set_at(idx, VoxelState::Isthmus);
            frontier.remove(handle);
            protected += 1;
        }
    }
    protected
}

/// Sequentially delete the candidates that are still simple.
///
/// Each candidate's configuration is recomputed against the volume as
/// mutated by earlier deletions in the same pass; candidates that are no
/// longer simple survive untouched. Deleting a voxel exposes its remaining
/// `Object` face neighbors, which are promoted to `Surface` and appended to
/// the frontier in exposure order (x-1, x+1, y-1, y+1, z-1, z+1).
/// Returns the number of deleted voxels.
pub(crate) fn delete_candidates(
    volume: &mut Volume,
    frontier: &mut SurfaceFrontier,
    tables: &ThinningTables,
    candidates: &[Candidate],
) -> usize {
    let faces = volume.exposure_offsets();
    let mut deleted = 0;

    for candidate in candidates {
        if frontier.voxel(candidate.handle) != Some(candidate.idx) {
            continue;
        }
        if volume.state_at(candidate.idx) != VoxelState::Surface {
            continue;
        }
        if !tables.is_simple(volume.neighbor_config(candidate.idx)) {
            continue;
        }

        volume.set_at(candidate.idx, VoxelState::Background);
        frontier.remove(candidate.handle);
        deleted += 1;

        for off in faces {
            let n = (candidate.idx as isize + off) as usize;
            if volume.state_at(n) == VoxelState::Object {
                volume.set_at(n, VoxelState::Surface);
                frontier.insert(n);
            }
        }
    }
    deleted
}
