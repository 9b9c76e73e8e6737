//! Padded 3D voxel grid and 26-neighborhood configuration extraction.
//!
//! The volume keeps a 1-voxel zero border on every face so that every
//! neighbor read for an interior (logical) coordinate stays in bounds
//! without per-access checks. All public coordinates are *logical*: the
//! padding is an internal representation detail.

use crate::error::{Error, Result};

/// State of a single voxel during thinning.
///
/// A voxel only ever moves forward along `Object` → `Surface` →
/// (`Background` | `Isthmus`); `Background` and `Isthmus` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum VoxelState {
    /// Not part of the object.
    Background = 0,
    /// Object voxel not yet known to touch background.
    Object = 1,
    /// Object voxel adjacent to background in some face direction.
    Surface = 2,
    /// Isthmus point: permanently retained, never re-evaluated.
    Isthmus = 3,
}

impl VoxelState {
    #[inline]
    pub(crate) fn from_raw(v: u8) -> Self {
        match v {
            0 => VoxelState::Background,
            1 => VoxelState::Object,
            2 => VoxelState::Surface,
            _ => VoxelState::Isthmus,
        }
    }

    /// True for every state except `Background`.
    #[inline]
    pub fn is_foreground(self) -> bool {
        self != VoxelState::Background
    }
}

/// Dense voxel volume with a mandatory 1-voxel zero border.
#[derive(Debug, Clone)]
pub struct Volume {
    nx: usize,
    ny: usize,
    nz: usize,
    /// Padded x stride (`nx + 2`).
    sx: usize,
    /// Padded slab stride (`(nx + 2) * (ny + 2)`).
    sxy: usize,
    /// Padded buffer, length `sxy * (nz + 2)`.
    data: Vec<u8>,
    /// Flat offsets of the 26 neighbors in canonical bit order.
    neigh: [isize; 26],
}

impl Volume {
    /// Build a volume from a caller-owned foreground mask.
    ///
    /// `mask` holds one byte per voxel, x fastest, then y, then z; any
    /// nonzero byte is foreground. The buffer is copied into the padded
    /// internal representation and is never aliased or mutated.
    pub fn from_mask(dims: [usize; 3], mask: &[u8]) -> Result<Self> {
        let [nx, ny, nz] = dims;
        if nx < 1 || ny < 1 || nz < 1 {
            return Err(Error::InvalidDimensions { nx, ny, nz });
        }
        let expected = nx
            .checked_mul(ny)
            .and_then(|v| v.checked_mul(nz))
            .ok_or(Error::InvalidDimensions { nx, ny, nz })?;
        if mask.len() != expected {
            return Err(Error::InvalidData {
                expected,
                actual: mask.len(),
            });
        }

        let sx = nx + 2;
        let sxy = sx * (ny + 2);
        let mut data = vec![0u8; sxy * (nz + 2)];
        let mut src = 0;
        for z in 0..nz {
            for y in 0..ny {
                let row = (z + 1) * sxy + (y + 1) * sx + 1;
                for x in 0..nx {
                    if mask[src] != 0 {
                        data[row + x] = VoxelState::Object as u8;
                    }
                    src += 1;
                }
            }
        }

        Ok(Self {
            nx,
            ny,
            nz,
            sx,
            sxy,
            data,
            neigh: neighbor_offsets(sx, sxy),
        })
    }

    /// Logical dimensions `[nx, ny, nz]`.
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// Flat index of a logical coordinate inside the padded buffer.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < self.nx && y < self.ny && z < self.nz);
        (z + 1) * self.sxy + (y + 1) * self.sx + (x + 1)
    }

    /// State at a logical coordinate.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> VoxelState {
        VoxelState::from_raw(self.data[self.index(x, y, z)])
    }

    /// Overwrite the state at a logical coordinate.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, state: VoxelState) {
        let idx = self.index(x, y, z);
        self.data[idx] = state as u8;
    }

    /// State at a flat padded index (as produced by [`Volume::index`]).
    #[inline]
    pub(crate) fn state_at(&self, idx: usize) -> VoxelState {
        VoxelState::from_raw(self.data[idx])
    }

    #[inline]
    pub(crate) fn set_at(&mut self, idx: usize, state: VoxelState) {
        self.data[idx] = state as u8;
    }

    /// Flat offset of the face neighbor in `dir`.
    #[inline]
    pub(crate) fn direction_offset(&self, dir: crate::Direction) -> isize {
        let [dx, dy, dz] = dir.delta();
        dz as isize * self.sxy as isize + dy as isize * self.sx as isize + dx as isize
    }

    /// Flat offsets of the six face neighbors in [`crate::Direction::ALL`] order.
    #[inline]
    pub(crate) fn face_offsets(&self) -> [isize; 6] {
        let mut out = [0isize; 6];
        for (slot, dir) in crate::Direction::ALL.into_iter().enumerate() {
            out[slot] = self.direction_offset(dir);
        }
        out
    }

    /// Flat offsets of the six face neighbors in exposure order: x-1, x+1,
    /// y-1, y+1, z-1, z+1.
    ///
    /// Newly exposed voxels enter the frontier in this order, and later
    /// scans visit frontier entries in insertion order, so this sequence is
    /// part of the algorithm's defined behavior. It is distinct from the
    /// deletion direction order and must not be reordered either.
    #[inline]
    pub(crate) fn exposure_offsets(&self) -> [isize; 6] {
        let sx = self.sx as isize;
        let sxy = self.sxy as isize;
        [-1, 1, -sx, sx, -sxy, sxy]
    }

    /// Pack the 26-neighborhood of the voxel at `idx` into the canonical
    /// 26-bit configuration.
    ///
    /// Bit order: slabs z-1, z, z+1; rows y-1, y, y+1 within a slab;
    /// columns x-1, x, x+1 within a row; the center voxel is skipped. A bit
    /// is set when the neighbor holds any foreground state.
    #[inline]
    pub fn neighbor_config(&self, idx: usize) -> u32 {
        let mut mask = 0u32;
        for (bit, off) in self.neigh.iter().enumerate() {
            let n = (idx as isize + off) as usize;
            if self.data[n] != 0 {
                mask |= 1 << bit;
            }
        }
        mask
    }

    /// Number of foreground voxels (any nonzero state).
    pub fn foreground_count(&self) -> usize {
        let mut count = 0;
        for z in 0..self.nz {
            for y in 0..self.ny {
                let row = (z + 1) * self.sxy + (y + 1) * self.sx + 1;
                count += self.data[row..row + self.nx]
                    .iter()
                    .filter(|&&v| v != 0)
                    .count();
            }
        }
        count
    }

    /// Number of voxels in a given state.
    pub fn count_state(&self, state: VoxelState) -> usize {
        let wanted = state as u8;
        let mut count = 0;
        for z in 0..self.nz {
            for y in 0..self.ny {
                let row = (z + 1) * self.sxy + (y + 1) * self.sx + 1;
                count += self.data[row..row + self.nx]
                    .iter()
                    .filter(|&&v| v == wanted)
                    .count();
            }
        }
        count
    }

    /// Export the unpadded volume as a binary mask (foreground ⇒ 1).
    pub fn to_mask(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.nx * self.ny * self.nz);
        for z in 0..self.nz {
            for y in 0..self.ny {
                let row = (z + 1) * self.sxy + (y + 1) * self.sx + 1;
                out.extend(
                    self.data[row..row + self.nx]
                        .iter()
                        .map(|&v| u8::from(v != 0)),
                );
            }
        }
        out
    }
}

/// Flat offsets of the 26 neighbors in canonical bit order for the given
/// padded strides.
fn neighbor_offsets(sx: usize, sxy: usize) -> [isize; 26] {
    let mut out = [0isize; 26];
    let mut bit = 0;
    for dz in -1isize..=1 {
        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                if dx == 0 && dy == 0 && dz == 0 {
                    continue;
                }
                out[bit] = dz * sxy as isize + dy * sx as isize + dx;
                bit += 1;
            }
        }
    }
    out
}
