//! Precomputed 26-neighborhood classification tables.
//!
//! Each table maps every 26-bit neighborhood configuration to one boolean,
//! packed 8 entries per byte (2^23 bytes total). The tables encode a
//! 26/6-connectivity point classification derived from digital-topology
//! theory; they are consumed as opaque precomputed resources and are never
//! generated here.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Size of one packed table in bytes (2^26 entries / 8).
pub const LUT_LEN: usize = 1 << 23;

/// File name of the simple-point table inside the resource directory.
pub const SIMPLE_LUT_NAME: &str = "lut_simple.dat";

/// File name of the isthmus table inside the resource directory.
pub const ISTHMUS_LUT_NAME: &str = "lut_isthmus.dat";

/// One packed boolean-per-configuration lookup table.
///
/// Immutable after construction; lookups are plain byte reads, safe to share
/// across threads by reference.
pub struct Lut {
    bits: Box<[u8]>,
}

impl Lut {
    /// Wrap a raw packed table.
    ///
    /// Fails with [`Error::LutSize`] when `bytes` is not exactly
    /// [`LUT_LEN`] long; `name` is only used for the error message.
    pub fn from_bytes(name: &str, bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() != LUT_LEN {
            return Err(Error::LutSize {
                path: name.into(),
                expected: LUT_LEN,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            bits: bytes.into_boxed_slice(),
        })
    }

    /// Read a packed table from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| Error::LutLoad {
            path: path.to_path_buf(),
            source,
        })?;
        if bytes.len() != LUT_LEN {
            return Err(Error::LutSize {
                path: path.to_path_buf(),
                expected: LUT_LEN,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            bits: bytes.into_boxed_slice(),
        })
    }

    /// Entry for a 26-bit neighborhood configuration.
    #[inline]
    pub fn contains(&self, mask: u32) -> bool {
        debug_assert!(mask < (1 << 26));
        self.bits[(mask >> 3) as usize] & (1 << (mask & 7)) != 0
    }
}

impl std::fmt::Debug for Lut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lut").field("len", &self.bits.len()).finish()
    }
}

/// The two classification tables driving a thinning run.
#[derive(Debug)]
pub struct ThinningTables {
    simple: Lut,
    isthmus: Lut,
}

impl ThinningTables {
    /// Bundle explicitly constructed tables.
    pub fn new(simple: Lut, isthmus: Lut) -> Self {
        Self { simple, isthmus }
    }

    /// Load `lut_simple.dat` and `lut_isthmus.dat` from a resource directory.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let simple = Lut::from_file(&dir.join(SIMPLE_LUT_NAME))?;
        let isthmus = Lut::from_file(&dir.join(ISTHMUS_LUT_NAME))?;
        Ok(Self { simple, isthmus })
    }

    /// Is the point with this neighborhood configuration removable without
    /// changing the object's topology under 26/6-connectivity?
    #[inline]
    pub fn is_simple(&self, mask: u32) -> bool {
        self.simple.contains(mask)
    }

    /// Is the point with this neighborhood configuration an essential
    /// centerline/junction point?
    #[inline]
    pub fn is_isthmus(&self, mask: u32) -> bool {
        self.isthmus.contains(mask)
    }
}
