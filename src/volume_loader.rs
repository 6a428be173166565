use crate::{
    enums::TensorLayout,
    tensor::DiffusionTensor,
    volume::{LabelVolume, TensorVolume},
};

use ndarray::Array3;
use nifti::{IntoNdArray, NiftiHeader, NiftiObject, ReaderOptions};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// `NIFTI_INTENT_SYMMATRIX`: lower triangle of a symmetric matrix, row-wise
const NIFTI_INTENT_SYMMATRIX: i16 = 1005;

#[derive(Debug, Error)]
pub enum VolumeLoaderError {
    #[error("Unsupported tensor volume shape {0:?}")]
    UnsupportedTensorShape(Vec<usize>),

    #[error("Unsupported label volume shape {0:?}, expected a 3D volume")]
    UnsupportedLabelShape(Vec<usize>),

    #[error("MNI template label not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("NIfTI error: {0}")]
    Nifti(#[from] nifti::NiftiError),
}

pub struct VolumeLoader;

impl VolumeLoader {
    /// Load a diffusion tensor volume from a NIfTI file (`.nii` or `.nii.gz`)
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or its trailing dimensions
    /// do not describe a tensor (see [`TensorLayout`])
    pub fn load_tensor_volume(path: impl AsRef<Path>) -> Result<TensorVolume, VolumeLoaderError> {
        let path = path.as_ref();
        let object = ReaderOptions::new().read_file(path)?;
        let header = object.header();
        let spacing = Self::get_spacing(header);
        let symmetric_intent = header.intent_code == NIFTI_INTENT_SYMMATRIX;

        let array = object.into_volume().into_ndarray::<f64>()?;
        let shape = array.shape().to_vec();
        let layout = Self::detect_layout(&shape, symmetric_intent)
            .ok_or_else(|| VolumeLoaderError::UnsupportedTensorShape(shape.clone()))?;
        debug!(
            "loaded tensor volume {} with shape {:?} ({:?})",
            path.display(),
            shape,
            layout
        );

        // Logical order keeps the components of one voxel contiguous
        let values: Vec<f64> = array.iter().copied().collect();
        Self::build_tensor_volume(&values, (shape[0], shape[1], shape[2]), layout, spacing)
    }

    /// Load an ROI label volume from a NIfTI file. Values are rounded to the
    /// nearest integer.
    pub fn load_label_volume(path: impl AsRef<Path>) -> Result<LabelVolume, VolumeLoaderError> {
        let path = path.as_ref();
        let object = ReaderOptions::new().read_file(path)?;
        let spacing = Self::get_spacing(object.header());

        let array = object.into_volume().into_ndarray::<f64>()?;
        let shape = array.shape().to_vec();
        let dim = match shape.as_slice() {
            [x, y, z] | [x, y, z, 1] => (*x, *y, *z),
            _ => return Err(VolumeLoaderError::UnsupportedLabelShape(shape)),
        };
        debug!("loaded label volume {} with shape {:?}", path.display(), dim);

        let labels: Vec<i32> = array.iter().map(|&value| value.round() as i32).collect();
        Ok(LabelVolume::new(Array3::from_shape_vec(dim, labels)?, spacing))
    }

    fn detect_layout(shape: &[usize], symmetric_intent: bool) -> Option<TensorLayout> {
        match shape {
            [_, _, _, 3, 3] | [_, _, _, 9] => Some(TensorLayout::Full),
            [_, _, _, 1, 6] => Some(TensorLayout::LowerTriangle),
            [_, _, _, 6] if symmetric_intent => Some(TensorLayout::LowerTriangle),
            [_, _, _, 6] => Some(TensorLayout::UpperTriangle),
            _ => None,
        }
    }

    fn build_tensor_volume(
        values: &[f64],
        dim: (usize, usize, usize),
        layout: TensorLayout,
        spacing: (f64, f64, f64),
    ) -> Result<TensorVolume, VolumeLoaderError> {
        let tensors: Vec<DiffusionTensor> = values
            .par_chunks_exact(layout.components())
            .filter_map(|components| DiffusionTensor::from_components(components, layout))
            .collect();

        Ok(TensorVolume::new(Array3::from_shape_vec(dim, tensors)?, spacing))
    }

    fn get_spacing(header: &NiftiHeader) -> (f64, f64, f64) {
        let pixdim = header.pixdim;
        (pixdim[1] as f64, pixdim[2] as f64, pixdim[3] as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_layout() {
        assert_eq!(VolumeLoader::detect_layout(&[4, 4, 4, 3, 3], false), Some(TensorLayout::Full));
        assert_eq!(VolumeLoader::detect_layout(&[4, 4, 4, 9], false), Some(TensorLayout::Full));
        assert_eq!(
            VolumeLoader::detect_layout(&[4, 4, 4, 6], false),
            Some(TensorLayout::UpperTriangle)
        );
        assert_eq!(
            VolumeLoader::detect_layout(&[4, 4, 4, 6], true),
            Some(TensorLayout::LowerTriangle)
        );
        assert_eq!(
            VolumeLoader::detect_layout(&[4, 4, 4, 1, 6], false),
            Some(TensorLayout::LowerTriangle)
        );
        assert_eq!(VolumeLoader::detect_layout(&[4, 4, 4], false), None);
        assert_eq!(VolumeLoader::detect_layout(&[4, 4, 4, 3], false), None);
        assert_eq!(VolumeLoader::detect_layout(&[4, 4, 4, 2, 3], false), None);
    }

    #[test]
    fn test_build_tensor_volume_keeps_voxel_order() {
        // 2 voxels along z, upper triangle layout
        let values = [1.0, 0.0, 0.0, 2.0, 0.0, 3.0, 4.0, 0.0, 0.0, 5.0, 0.0, 6.0];
        let volume = VolumeLoader::build_tensor_volume(
            &values,
            (1, 1, 2),
            TensorLayout::UpperTriangle,
            (2.0, 2.0, 2.0),
        )
        .unwrap();

        assert_eq!(volume.dim(), (1, 1, 2));
        assert_eq!(volume.spacing, (2.0, 2.0, 2.0));
        assert_eq!(volume.data()[[0, 0, 0]], DiffusionTensor::from_diagonal(1.0, 2.0, 3.0));
        assert_eq!(volume.data()[[0, 0, 1]], DiffusionTensor::from_diagonal(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_build_tensor_volume_rejects_wrong_length() {
        let values = [1.0; 9 * 3];
        let result =
            VolumeLoader::build_tensor_volume(&values, (2, 2, 1), TensorLayout::Full, (1.0, 1.0, 1.0));
        assert!(matches!(result, Err(VolumeLoaderError::Shape(_))));
    }
}
