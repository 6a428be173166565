use ndarray::Array3;
use ndarray::Zip;
use ndarray::parallel::prelude::*;

use crate::tensor::DiffusionTensor;

/// Anything laid out on a 3D voxel grid.
pub trait SpatialExtent {
    /// Spatial dimensions of the grid
    fn spatial_dim(&self) -> (usize, usize, usize);

    /// Voxel size in millimetres
    fn spacing(&self) -> (f64, f64, f64);
}

/// A diffusion tensor volume, one [`DiffusionTensor`] per voxel.
#[derive(Debug, Clone)]
pub struct TensorVolume {
    pub data: Array3<DiffusionTensor>,
    pub spacing: (f64, f64, f64),
}

impl TensorVolume {
    pub fn new(data: Array3<DiffusionTensor>, spacing: (f64, f64, f64)) -> Self {
        Self { data, spacing }
    }

    /// Tensor volume filled with `tensor` at every voxel, with unit spacing
    pub fn filled(dim: (usize, usize, usize), tensor: DiffusionTensor) -> Self {
        Self::new(Array3::from_elem(dim, tensor), (1.0, 1.0, 1.0))
    }

    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    pub fn data(&self) -> &Array3<DiffusionTensor> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Array3<DiffusionTensor> {
        &mut self.data
    }
}

/// An integer ROI label volume. Only zero / nonzero is meaningful.
#[derive(Debug, Clone)]
pub struct LabelVolume {
    pub data: Array3<i32>,
    pub spacing: (f64, f64, f64),
}

impl LabelVolume {
    pub fn new(data: Array3<i32>, spacing: (f64, f64, f64)) -> Self {
        Self { data, spacing }
    }

    /// Empty label volume with unit spacing
    pub fn zeros(dim: (usize, usize, usize)) -> Self {
        Self::new(Array3::zeros(dim), (1.0, 1.0, 1.0))
    }

    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    pub fn data(&self) -> &Array3<i32> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Array3<i32> {
        &mut self.data
    }

    /// Number of voxels inside the ROI
    pub fn voxel_count(&self) -> usize {
        self.data.par_iter().filter(|&&label| label != 0).count()
    }

    /// Set every voxel in `coords` to `label`. Out-of-bounds coordinates are
    /// ignored.
    pub fn mark(&mut self, coords: &[(usize, usize, usize)], label: i32) {
        for &(x, y, z) in coords {
            if let Some(voxel) = self.data.get_mut((x, y, z)) {
                *voxel = label;
            }
        }
    }

    /// True if any voxel belongs to both `self` and `other`.
    ///
    /// Volumes of different shape never overlap.
    pub fn overlaps(&self, other: &LabelVolume) -> bool {
        if self.dim() != other.dim() {
            return false;
        }
        !Zip::from(&self.data)
            .and(&other.data)
            .all(|&a, &b| a == 0 || b == 0)
    }
}

impl SpatialExtent for TensorVolume {
    fn spatial_dim(&self) -> (usize, usize, usize) {
        self.dim()
    }

    fn spacing(&self) -> (f64, f64, f64) {
        self.spacing
    }
}

impl SpatialExtent for LabelVolume {
    fn spatial_dim(&self) -> (usize, usize, usize) {
        self.dim()
    }

    fn spacing(&self) -> (f64, f64, f64) {
        self.spacing
    }
}
