//! Sequential isthmus-based thinning driver.
//!
//! One run performs:
//! 1. a full scan that marks every object voxel with a background face
//!    neighbor as `Surface` and seeds the frontier with it,
//! 2. repeated six-direction sweeps (U, D, N, S, E, W) of border-point
//!    detection and sequential deletion, until a sweep deletes nothing.
//!
//! Isthmus points identified along the way are frozen permanently; they are
//! what keeps curve skeletons from collapsing to nothing.

use serde::{Deserialize, Serialize};

use crate::detect::{delete_candidates, detect_border_points, Candidate};
use crate::frontier::SurfaceFrontier;
use crate::lut::ThinningTables;
use crate::volume::{Volume, VoxelState};
use crate::Direction;

/// Summary of one thinning run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinningReport {
    /// Number of six-direction sweeps that deleted at least one voxel.
    pub iterations: usize,
    /// Total voxels deleted.
    pub deleted: usize,
    /// Total voxels frozen as isthmus points.
    pub protected: usize,
    /// Foreground voxels left when the run converged.
    pub remaining: usize,
}

/// Mark every object voxel adjacent to background as `Surface` and register
/// it in the frontier, scanning z, then y, then x.
pub(crate) fn collect_surface(volume: &mut Volume, frontier: &mut SurfaceFrontier) -> usize {
    let [nx, ny, nz] = volume.dims();
    let faces = volume.face_offsets();
    let mut count = 0;
    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                let idx = volume.index(x, y, z);
                if volume.state_at(idx) != VoxelState::Object {
                    continue;
                }
                let exposed = faces
                    .iter()
                    .any(|&off| volume.state_at((idx as isize + off) as usize)
                        == VoxelState::Background);
                if exposed {
                    volume.set_at(idx, VoxelState::Surface);
                    frontier.insert(idx);
                    count += 1;
                }
            }
        }
    }
    count
}

/// Thin `volume` in place until no voxel can be deleted.
///
/// The input is consumed as a binary object (any foreground state counts);
/// on return the foreground is the skeleton, with isthmus points still
/// marked [`VoxelState::Isthmus`]. Use [`Volume::to_mask`] for a plain
/// binary result.
pub fn skeletonize(volume: &mut Volume, tables: &ThinningTables) -> ThinningReport {
    let mut frontier = SurfaceFrontier::new();
    let surface = collect_surface(volume, &mut frontier);
    tracing::debug!(surface, "collected initial surface");

    let mut report = ThinningReport::default();
    let mut candidates: Vec<Candidate> = Vec::new();

    while !frontier.is_empty() {
        let mut changed = 0;
        for dir in Direction::ALL {
            candidates.clear();
            report.protected +=
                detect_border_points(volume, &mut frontier, tables, dir, &mut candidates);
            changed += delete_candidates(volume, &mut frontier, tables, &candidates);
        }
        if changed == 0 {
            break;
        }
        report.iterations += 1;
        report.deleted += changed;
        tracing::debug!(
            iteration = report.iterations,
            deleted = changed,
            frontier = frontier.len(),
            "thinning sweep"
        );
    }

    report.remaining = volume.foreground_count();
    tracing::info!(
        iterations = report.iterations,
        deleted = report.deleted,
        protected = report.protected,
        remaining = report.remaining,
        "thinning converged"
    );
    report
}
