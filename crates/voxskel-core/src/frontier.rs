//! Insertion-ordered set of the current surface voxels.
//!
//! The thinning loop removes and appends members from arbitrary positions on
//! every iteration, so the frontier is a doubly linked list backed by an
//! index arena with an internal free list: O(1) append, O(1) removal given a
//! [`Handle`], no raw pointers. Handles are generation-stamped; a handle to
//! a removed entry goes stale instead of dangling.
//!
//! Traversal uses an explicit cursor ([`SurfaceFrontier::head`] /
//! [`SurfaceFrontier::next`]). Callers that mutate the list while walking it
//! must fetch the successor *before* acting on the current entry; removal of
//! any entry then neither skips nor revisits an unrelated live member.

const NIL: u32 = u32::MAX;

/// Stable reference to a frontier entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle {
    slot: u32,
    generation: u32,
}

#[derive(Debug)]
struct Node {
    voxel: usize,
    prev: u32,
    next: u32,
    generation: u32,
    live: bool,
}

/// Dynamic set of voxels currently in state `Surface`.
#[derive(Debug, Default)]
pub struct SurfaceFrontier {
    nodes: Vec<Node>,
    head: u32,
    tail: u32,
    free: u32,
    len: usize,
}

impl SurfaceFrontier {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: NIL,
            tail: NIL,
            free: NIL,
            len: 0,
        }
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a voxel (flat padded index) and return its handle.
    pub fn insert(&mut self, voxel: usize) -> Handle {
        let slot = if self.free != NIL {
            let slot = self.free;
            let node = &mut self.nodes[slot as usize];
            self.free = node.next;
            node.voxel = voxel;
            node.prev = self.tail;
            node.next = NIL;
            node.live = true;
            slot
        } else {
            let slot = self.nodes.len() as u32;
            self.nodes.push(Node {
                voxel,
                prev: self.tail,
                next: NIL,
                generation: 0,
                live: true,
            });
            slot
        };

        if self.tail != NIL {
            self.nodes[self.tail as usize].next = slot;
        } else {
            self.head = slot;
        }
        self.tail = slot;
        self.len += 1;

        Handle {
            slot,
            generation: self.nodes[slot as usize].generation,
        }
    }

    /// Unlink an entry. Returns `false` when the handle is stale.
    pub fn remove(&mut self, handle: Handle) -> bool {
        let slot = handle.slot as usize;
        match self.nodes.get(slot) {
            Some(node) if node.live && node.generation == handle.generation => {}
            _ => return false,
        }

        let (prev, next) = {
            let node = &self.nodes[slot];
            (node.prev, node.next)
        };
        if prev != NIL {
            self.nodes[prev as usize].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.nodes[next as usize].prev = prev;
        } else {
            self.tail = prev;
        }

        let node = &mut self.nodes[slot];
        node.live = false;
        node.generation = node.generation.wrapping_add(1);
        node.next = self.free;
        self.free = handle.slot;
        self.len -= 1;
        true
    }

    /// Handle of the oldest live entry.
    #[inline]
    pub fn head(&self) -> Option<Handle> {
        (self.head != NIL).then(|| Handle {
            slot: self.head,
            generation: self.nodes[self.head as usize].generation,
        })
    }

    /// Successor of a live entry in insertion order.
    ///
    /// Returns `None` for the last entry or a stale handle.
    pub fn next(&self, handle: Handle) -> Option<Handle> {
        let node = self.nodes.get(handle.slot as usize)?;
        if !node.live || node.generation != handle.generation {
            return None;
        }
        (node.next != NIL).then(|| Handle {
            slot: node.next,
            generation: self.nodes[node.next as usize].generation,
        })
    }

    /// Voxel stored at a handle, or `None` when the handle is stale.
    pub fn voxel(&self, handle: Handle) -> Option<usize> {
        let node = self.nodes.get(handle.slot as usize)?;
        (node.live && node.generation == handle.generation).then_some(node.voxel)
    }

    /// Iterate live entries in insertion order (read-only).
    pub fn iter(&self) -> impl Iterator<Item = (Handle, usize)> + '_ {
        let mut cursor = self.head();
        std::iter::from_fn(move || {
            let handle = cursor?;
            cursor = self.next(handle);
            Some((handle, self.nodes[handle.slot as usize].voxel))
        })
    }
}
