use tracing::warn;

use crate::alps::AlpsError;
use crate::volume::SpatialExtent;

/// Check whether two volumes share the same voxel grid.
///
/// Only the spatial shape is compared. Voxel spacing, origin and orientation
/// are not part of the check.
pub fn is_same_space(a: &impl SpatialExtent, b: &impl SpatialExtent) -> bool {
    a.spatial_dim() == b.spatial_dim()
}

/// Like [`is_same_space`] but returns a [`AlpsError::ShapeMismatch`] naming
/// both shapes. Matching shapes with different spacing pass with a warning.
pub fn ensure_same_space(
    reference: &impl SpatialExtent,
    other: &impl SpatialExtent,
) -> Result<(), AlpsError> {
    if !is_same_space(reference, other) {
        return Err(AlpsError::ShapeMismatch {
            expected: reference.spatial_dim(),
            found: other.spatial_dim(),
        });
    }

    if !same_spacing(reference.spacing(), other.spacing()) {
        warn!(
            "voxel spacing differs ({:?} vs {:?}) although shapes match",
            reference.spacing(),
            other.spacing()
        );
    }
    Ok(())
}

fn same_spacing(a: (f64, f64, f64), b: (f64, f64, f64)) -> bool {
    const TOLERANCE: f64 = 1e-4;
    (a.0 - b.0).abs() <= TOLERANCE && (a.1 - b.1).abs() <= TOLERANCE && (a.2 - b.2).abs() <= TOLERANCE
}
