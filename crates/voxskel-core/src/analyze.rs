//! Reading and writing volumes in the Analyze 7.5 two-file layout.
//!
//! A dataset `name` is stored as `name.hdr` (a fixed 348-byte header) plus
//! `name.img` (one byte per voxel, x fastest). Only the handful of header
//! fields the thinning pipeline needs are interpreted: the header size magic,
//! the three grid extents and the bits-per-voxel field. Everything else is
//! carried through verbatim so that writing a result next to its input
//! preserves whatever metadata the producing scanner put there.
//!
//! Byte order is detected from the size magic: a header whose `sizeof_hdr`
//! does not read as 348 in little-endian is retried as big-endian.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::volume::Volume;

/// Length of an Analyze 7.5 header in bytes.
pub const HEADER_LEN: usize = 348;

const OFF_SIZEOF_HDR: usize = 0;
const OFF_DIM_X: usize = 42;
const OFF_DIM_Y: usize = 44;
const OFF_DIM_Z: usize = 46;
const OFF_BITPIX: usize = 72;

/// Value written to `.img` for foreground voxels.
const FOREGROUND_SENTINEL: u8 = 0xFF;

/// Parsed Analyze header, with the raw bytes retained for pass-through.
#[derive(Debug, Clone)]
pub struct VolumeHeader {
    raw: [u8; HEADER_LEN],
    swapped: bool,
    dims: [usize; 3],
}

impl VolumeHeader {
    /// Build a minimal little-endian header for a freshly created volume.
    ///
    /// Fails with [`Error::UnsupportedFormat`] when the grid is not a
    /// proper 3D stack (at least two slices) or an extent does not fit the
    /// header's 16-bit fields, matching what parsing such a header reports.
    pub fn for_dims(dims: [usize; 3]) -> Result<Self> {
        let [nx, ny, nz] = dims;
        if nx < 1 || ny < 1 || nz < 1 {
            return Err(Error::InvalidDimensions { nx, ny, nz });
        }
        if nz < 2 {
            return Err(Error::unsupported(format!(
                "{nz} slices, a volume needs at least 2"
            )));
        }
        if dims.iter().any(|&d| d > i16::MAX as usize) {
            return Err(Error::unsupported(format!(
                "grid extents {nx}x{ny}x{nz} exceed the header's 16-bit fields"
            )));
        }

        let mut raw = [0u8; HEADER_LEN];
        raw[OFF_SIZEOF_HDR..OFF_SIZEOF_HDR + 4]
            .copy_from_slice(&(HEADER_LEN as i32).to_le_bytes());
        // dim[0]: number of dimensions, at offset 40.
        raw[40..42].copy_from_slice(&3i16.to_le_bytes());
        raw[OFF_DIM_X..OFF_DIM_X + 2].copy_from_slice(&(nx as i16).to_le_bytes());
        raw[OFF_DIM_Y..OFF_DIM_Y + 2].copy_from_slice(&(ny as i16).to_le_bytes());
        raw[OFF_DIM_Z..OFF_DIM_Z + 2].copy_from_slice(&(nz as i16).to_le_bytes());
        raw[OFF_BITPIX..OFF_BITPIX + 2].copy_from_slice(&8i16.to_le_bytes());
        Ok(Self {
            raw,
            swapped: false,
            dims,
        })
    }

    fn parse(raw: [u8; HEADER_LEN]) -> Result<Self> {
        let le_magic = i32::from_le_bytes(field(&raw, OFF_SIZEOF_HDR));
        let swapped = if le_magic == HEADER_LEN as i32 {
            false
        } else if i32::from_be_bytes(field(&raw, OFF_SIZEOF_HDR)) == HEADER_LEN as i32 {
            true
        } else {
            return Err(Error::unsupported(format!(
                "header size magic is {le_magic}, expected {HEADER_LEN} in either byte order"
            )));
        };

        let bits = read_i16(&raw, OFF_BITPIX, swapped);
        if bits != 8 {
            return Err(Error::unsupported(format!(
                "{bits} bits per voxel, only 8-bit volumes are supported"
            )));
        }

        let nx = read_i16(&raw, OFF_DIM_X, swapped);
        let ny = read_i16(&raw, OFF_DIM_Y, swapped);
        let nz = read_i16(&raw, OFF_DIM_Z, swapped);
        if nx < 1 || ny < 1 {
            return Err(Error::unsupported(format!(
                "non-positive grid extents {nx}x{ny}x{nz}"
            )));
        }
        if nz < 2 {
            return Err(Error::unsupported(format!(
                "{nz} slices, a volume needs at least 2"
            )));
        }

        Ok(Self {
            raw,
            swapped,
            dims: [nx as usize, ny as usize, nz as usize],
        })
    }

    /// Grid extents `[nx, ny, nz]`.
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Whether the source header was stored in the opposite byte order.
    #[inline]
    pub fn byte_swapped(&self) -> bool {
        self.swapped
    }
}

fn field<const N: usize>(raw: &[u8], off: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&raw[off..off + N]);
    out
}

fn read_i16(raw: &[u8], off: usize, swapped: bool) -> i16 {
    let bytes = field(raw, off);
    if swapped {
        i16::from_be_bytes(bytes)
    } else {
        i16::from_le_bytes(bytes)
    }
}

/// `stem` with an extension appended (never replaced).
fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut os = OsString::from(stem.as_os_str());
    os.push(suffix);
    PathBuf::from(os)
}

/// Read `stem.hdr` + `stem.img` into a binarized [`Volume`].
///
/// Any nonzero image byte becomes foreground. The returned header can be
/// handed back to [`write_volume`] to keep untouched metadata intact.
pub fn read_volume(stem: &Path) -> Result<(Volume, VolumeHeader)> {
    let hdr_path = with_suffix(stem, ".hdr");
    let bytes = fs::read(&hdr_path)?;
    if bytes.len() < HEADER_LEN {
        return Err(Error::unsupported(format!(
            "header {} is {} bytes, expected at least {HEADER_LEN}",
            hdr_path.display(),
            bytes.len()
        )));
    }
    let header = VolumeHeader::parse(field(&bytes, 0))?;

    let img_path = with_suffix(stem, ".img");
    let img = fs::read(&img_path)?;
    let [nx, ny, nz] = header.dims;
    let expected = nx * ny * nz;
    if img.len() != expected {
        return Err(Error::InvalidData {
            expected,
            actual: img.len(),
        });
    }

    let volume = Volume::from_mask(header.dims, &img)?;
    tracing::debug!(
        path = %stem.display(),
        nx, ny, nz,
        swapped = header.swapped,
        foreground = volume.foreground_count(),
        "read analyze volume"
    );
    Ok((volume, header))
}

/// Write `stem.hdr` + `stem.img` from a volume.
///
/// The header bytes are written back verbatim; foreground voxels become
/// `0xFF` in the image so results display at full intensity in viewers.
pub fn write_volume(stem: &Path, volume: &Volume, header: &VolumeHeader) -> Result<()> {
    if volume.dims() != header.dims {
        let [hx, hy, hz] = header.dims;
        let [nx, ny, nz] = volume.dims();
        return Err(Error::InvalidData {
            expected: hx * hy * hz,
            actual: nx * ny * nz,
        });
    }
    fs::write(with_suffix(stem, ".hdr"), header.raw)?;

    let img: Vec<u8> = volume
        .to_mask()
        .into_iter()
        .map(|v| if v != 0 { FOREGROUND_SENTINEL } else { 0 })
        .collect();
    fs::write(with_suffix(stem, ".img"), &img)?;
    tracing::debug!(path = %stem.display(), "wrote analyze volume");
    Ok(())
}
