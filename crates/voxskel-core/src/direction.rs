//! The six cardinal deletion directions.
//!
//! A thinning iteration examines border points of one direction at a time.
//! The processing order U, D, N, S, E, W is part of the algorithm's defined
//! behavior: a different order yields a different (though still topologically
//! valid) skeleton, so [`Direction::ALL`] must never be reordered.

/// One of the six face directions of a voxel.
///
/// A `Surface` voxel is a *border point* in direction `d` when its single
/// 6-neighbor in that direction is background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards y-1.
    Up,
    /// Towards y+1.
    Down,
    /// Towards z-1.
    North,
    /// Towards z+1.
    South,
    /// Towards x+1.
    East,
    /// Towards x-1.
    West,
}

impl Direction {
    /// All six directions in the fixed deletion order.
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::Down,
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit step (dx, dy, dz) towards the direction's neighbor.
    #[inline]
    pub const fn delta(self) -> [i32; 3] {
        match self {
            Direction::Up => [0, -1, 0],
            Direction::Down => [0, 1, 0],
            Direction::North => [0, 0, -1],
            Direction::South => [0, 0, 1],
            Direction::East => [1, 0, 0],
            Direction::West => [-1, 0, 0],
        }
    }
}
