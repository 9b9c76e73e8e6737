//! Synthetic classification tables for topology tests.
//!
//! The production tables are opaque precomputed resources and are not
//! shipped with the crate, so the tests derive an equivalent pair from first
//! principles: a point is deletable when it is 26/6-simple (exactly one
//! 26-component of foreground in N26 and exactly one 6-reachable background
//! component in N18) *and* has at least two foreground neighbors, and it is
//! an isthmus when its foreground splits into two or more 26-components or
//! when it is a curve endpoint (a single foreground neighbor). Withholding
//! endpoints from the deletable set is what makes thin curves fixed points.
//!
//! Building both tables visits all 2^26 configurations; the work is split
//! across threads and cached for the whole test binary.

use std::sync::OnceLock;

use crate::lut::{Lut, ThinningTables, LUT_LEN};

/// Neighbor offsets (dx, dy, dz) in canonical bit order: slabs z-1, z, z+1;
/// rows y-1, y, y+1; columns x-1, x, x+1; center skipped.
fn offsets() -> [[i8; 3]; 26] {
    let mut out = [[0i8; 3]; 26];
    let mut bit = 0;
    for dz in -1i8..=1 {
        for dy in -1i8..=1 {
            for dx in -1i8..=1 {
                if (dx, dy, dz) != (0, 0, 0) {
                    out[bit] = [dx, dy, dz];
                    bit += 1;
                }
            }
        }
    }
    out
}

/// Precomputed adjacency between neighbor bits.
struct Topology {
    /// For each bit, the set of bits 26-adjacent to it.
    adj26: [u32; 26],
    /// For each bit, the set of bits 6-adjacent to it.
    adj6: [u32; 26],
    /// Bits whose offset is a face neighbor of the center.
    face: u32,
    /// Bits whose offset lies in N18 (face or edge neighbors).
    n18: u32,
}

impl Topology {
    fn build() -> Self {
        let offs = offsets();
        let mut adj26 = [0u32; 26];
        let mut adj6 = [0u32; 26];
        let mut face = 0u32;
        let mut n18 = 0u32;

        for i in 0..26 {
            let [ax, ay, az] = offs[i];
            let manhattan = ax.abs() + ay.abs() + az.abs();
            if manhattan == 1 {
                face |= 1 << i;
            }
            if manhattan <= 2 {
                n18 |= 1 << i;
            }
            for j in 0..26 {
                if i == j {
                    continue;
                }
                let [bx, by, bz] = offs[j];
                let (dx, dy, dz) = (ax - bx, ay - by, az - bz);
                let cheb = dx.abs().max(dy.abs()).max(dz.abs());
                if cheb <= 1 {
                    adj26[i] |= 1 << j;
                }
                if dx.abs() + dy.abs() + dz.abs() == 1 {
                    adj6[i] |= 1 << j;
                }
            }
        }

        Self {
            adj26,
            adj6,
            face,
            n18,
        }
    }
}

/// Flood one connected component of `set` seeded at its lowest bit.
fn grow(seed: u32, set: u32, adj: &[u32; 26]) -> u32 {
    let mut comp = seed;
    loop {
        let mut grown = comp;
        let mut bits = comp;
        while bits != 0 {
            let b = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            grown |= adj[b] & set;
        }
        if grown == comp {
            return comp;
        }
        comp = grown;
    }
}

/// Number of 26-connected components of the foreground bits.
fn t26(mask: u32, topo: &Topology) -> u32 {
    let mut remaining = mask;
    let mut components = 0;
    while remaining != 0 {
        let seed = remaining & remaining.wrapping_neg();
        remaining &= !grow(seed, mask, &topo.adj26);
        components += 1;
    }
    components
}

/// Number of 6-connected background components in N18 that touch a face
/// neighbor of the center.
fn t6_plus(mask: u32, topo: &Topology) -> u32 {
    let background = !mask & topo.n18;
    let mut remaining = background;
    let mut components = 0;
    while remaining != 0 {
        let seed = remaining & remaining.wrapping_neg();
        let comp = grow(seed, background, &topo.adj6);
        if comp & topo.face != 0 {
            components += 1;
        }
        remaining &= !comp;
    }
    components
}

fn is_deletable(mask: u32, topo: &Topology) -> bool {
    mask.count_ones() >= 2 && t26(mask, topo) == 1 && t6_plus(mask, topo) == 1
}

fn is_isthmus(mask: u32, topo: &Topology) -> bool {
    mask.count_ones() == 1 || t26(mask, topo) >= 2
}

fn build_tables() -> ThinningTables {
    let topo = Topology::build();
    let mut simple = vec![0u8; LUT_LEN];
    let mut isthmus = vec![0u8; LUT_LEN];

    let threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
        .min(16);
    let chunk = LUT_LEN.div_ceil(threads);

    std::thread::scope(|scope| {
        let zipped = simple.chunks_mut(chunk).zip(isthmus.chunks_mut(chunk));
        for (i, (simple_chunk, isthmus_chunk)) in zipped.enumerate() {
            let topo = &topo;
            scope.spawn(move || {
                let base = (i * chunk) as u32 * 8;
                for byte in 0..simple_chunk.len() {
                    let mut s = 0u8;
                    let mut p = 0u8;
                    for bit in 0..8 {
                        let mask = base + (byte as u32) * 8 + bit;
                        if is_deletable(mask, topo) {
                            s |= 1 << bit;
                        }
                        if is_isthmus(mask, topo) {
                            p |= 1 << bit;
                        }
                    }
                    simple_chunk[byte] = s;
                    isthmus_chunk[byte] = p;
                }
            });
        }
    });

    ThinningTables::new(
        Lut::from_bytes("simple", simple).unwrap(),
        Lut::from_bytes("isthmus", isthmus).unwrap(),
    )
}

/// Shared tables, built once per test binary.
pub(crate) fn tables() -> &'static ThinningTables {
    static TABLES: OnceLock<ThinningTables> = OnceLock::new();
    TABLES.get_or_init(build_tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pack a set of (dx, dy, dz) foreground neighbors into a configuration.
    fn config(neighbors: &[[i8; 3]]) -> u32 {
        let offs = offsets();
        let mut mask = 0u32;
        for n in neighbors {
            let bit = offs
                .iter()
                .position(|o| o == n)
                .unwrap_or_else(|| panic!("{n:?} is not a neighbor offset"));
            mask |= 1 << bit;
        }
        mask
    }

    #[test]
    fn curve_endpoint_is_protected_not_deletable() {
        let topo = Topology::build();
        let endpoint = config(&[[1, 0, 0]]);
        assert!(!is_deletable(endpoint, &topo));
        assert!(is_isthmus(endpoint, &topo));
    }

    #[test]
    fn curve_interior_is_an_isthmus() {
        let topo = Topology::build();
        let interior = config(&[[-1, 0, 0], [1, 0, 0]]);
        assert_eq!(t26(interior, &topo), 2);
        assert!(!is_deletable(interior, &topo));
        assert!(is_isthmus(interior, &topo));
    }

    #[test]
    fn corner_of_an_l_is_deletable() {
        // An L-corner sees two mutually 26-adjacent neighbors: removing it
        // leaves the diagonal connection intact.
        let topo = Topology::build();
        let corner = config(&[[1, 0, 0], [0, 1, 0]]);
        assert_eq!(t26(corner, &topo), 1);
        assert!(is_deletable(corner, &topo));
        assert!(!is_isthmus(corner, &topo));
    }

    #[test]
    fn interior_point_is_not_deletable() {
        // Fully surrounded: no background reaches the center.
        let topo = Topology::build();
        let full = (1u32 << 26) - 1;
        assert_eq!(t6_plus(full, &topo), 0);
        assert!(!is_deletable(full, &topo));
        assert!(!is_isthmus(full, &topo));
    }

    #[test]
    fn plate_interior_splits_the_background() {
        // Center of a one-voxel-thick plate in the xy plane: background
        // above and below are separate components, so deletion would pierce
        // the surface.
        let topo = Topology::build();
        let ring: Vec<[i8; 3]> = [
            [-1, -1, 0],
            [0, -1, 0],
            [1, -1, 0],
            [-1, 0, 0],
            [1, 0, 0],
            [-1, 1, 0],
            [0, 1, 0],
            [1, 1, 0],
        ]
        .into_iter()
        .collect();
        let plate = config(&ring);
        assert_eq!(t26(plate, &topo), 1);
        assert_eq!(t6_plus(plate, &topo), 2);
        assert!(!is_deletable(plate, &topo));
        assert!(!is_isthmus(plate, &topo));
    }

    #[test]
    fn isolated_point_is_inert() {
        let topo = Topology::build();
        assert!(!is_deletable(0, &topo));
        assert!(!is_isthmus(0, &topo));
    }

    #[test]
    fn face_surface_point_is_deletable() {
        // A voxel sitting on a solid half-space: one foreground component,
        // one background component touching a face.
        let topo = Topology::build();
        let offs = offsets();
        let mut below = Vec::new();
        for o in offs {
            if o[2] <= 0 && o != [0, 0, 0] {
                below.push(o);
            }
        }
        let mask = config(&below);
        assert_eq!(t26(mask, &topo), 1);
        assert_eq!(t6_plus(mask, &topo), 1);
        assert!(is_deletable(mask, &topo));
    }
}
