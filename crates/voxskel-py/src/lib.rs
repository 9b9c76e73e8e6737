//! voxskel Python bindings.
//!
//! Exposes the thinning engine to numpy: volumes cross the boundary as
//! 3D `uint8` arrays in (z, y, x) C order, run reports as JSON strings.

use numpy::ndarray::ArrayD;
use numpy::{IntoPyArray, PyArrayDyn, PyReadonlyArrayDyn, PyUntypedArrayMethods};
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;

use voxskel_core::{Skeletonizer, ThinningReport};

fn py_value_error<E: std::fmt::Display>(err: E) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Flatten a (z, y, x) array into the x-fastest mask layout the core uses,
/// tolerating non-contiguous inputs.
fn mask_from_array(volume: &PyReadonlyArrayDyn<'_, u8>) -> PyResult<([usize; 3], Vec<u8>)> {
    let shape = volume.shape();
    let [nz, ny, nx] = match shape {
        [nz, ny, nx] => [*nz, *ny, *nx],
        _ => {
            return Err(PyTypeError::new_err(
                "expected volume array with shape (Z, Y, X)",
            ))
        }
    };

    let view = volume.as_array();
    let mut mask = Vec::with_capacity(nx.saturating_mul(ny).saturating_mul(nz));
    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                mask.push(view[[z, y, x]]);
            }
        }
    }
    Ok(([nx, ny, nz], mask))
}

#[pyclass(module = "voxskel._voxskel")]
struct SkeletonizerCore {
    engine: Skeletonizer,
}

#[pymethods]
impl SkeletonizerCore {
    /// Load classification tables from a directory holding
    /// `lut_simple.dat` and `lut_isthmus.dat`.
    #[new]
    fn new(lut_dir: &str) -> PyResult<Self> {
        let engine = Skeletonizer::from_lut_dir(lut_dir).map_err(py_value_error)?;
        Ok(Self { engine })
    }

    /// Thin a (Z, Y, X) uint8 volume; nonzero voxels are foreground.
    ///
    /// Returns `(skeleton, report_json)`: a 0/1 uint8 array of the input
    /// shape and the run report serialized as JSON.
    fn skeletonize_array<'py>(
        &self,
        py: Python<'py>,
        volume: PyReadonlyArrayDyn<'py, u8>,
    ) -> PyResult<(Bound<'py, PyArrayDyn<u8>>, String)> {
        let ([nx, ny, nz], mask) = mask_from_array(&volume)?;
        let (skeleton, report) = self
            .engine
            .skeletonize_mask([nx, ny, nz], &mask)
            .map_err(py_value_error)?;

        let array = ArrayD::from_shape_vec(vec![nz, ny, nx], skeleton)
            .map_err(py_value_error)?
            .into_pyarray_bound(py);
        let report_json = report_to_json(&report)?;
        Ok((array, report_json))
    }
}

fn report_to_json(report: &ThinningReport) -> PyResult<String> {
    serde_json::to_string(report).map_err(py_value_error)
}

#[pyfunction]
fn package_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[pymodule]
fn _voxskel(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<SkeletonizerCore>()?;
    m.add_function(wrap_pyfunction!(package_version, m)?)?;
    Ok(())
}
