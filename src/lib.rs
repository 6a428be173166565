//! # DTI-ALPS library
//!
//! This crate computes the DTI-ALPS (Analysis along the Perivascular Space)
//! index from a diffusion tensor volume and two ROI label volumes.

//!
//! The index is the ratio between the mean diffusivity along the x axis and
//! the mean diffusivity perpendicular to the projection and association
//! fibers:
//!
//! ```text
//! ALPS = mean(Dxx_proj, Dxx_assoc) / mean(Dyy_proj, Dzz_assoc)
//! ```
//!
//! Volumes can either be built in memory or loaded from NIfTI files. Labels
//! can come from the subject's native space or from the standard MNI 2 mm
//! template, in which case the tensor volume must already be resampled to
//! the template grid. Inputs are assumed to have the following attributes:
//!   - Tensor and label volumes share the same voxel grid
//!   - Only zero / nonzero label values matter
//!   - The x axis is left-right, y anterior-posterior, z inferior-superior
//!
//! # Examples
//!
//! ## Computing the index from files
//!
//! ```no_run
//! # use dti_alps::{AlpsCalculator, VolumeLoader};
//! let tensor = VolumeLoader::load_tensor_volume("dti_tensor.nii.gz")
//!     .expect("should have loaded the tensor volume");
//! let projection = VolumeLoader::load_label_volume("projection.nii.gz")
//!     .expect("should have loaded the projection label");
//! let association = VolumeLoader::load_label_volume("association.nii.gz")
//!     .expect("should have loaded the association label");
//! let index = AlpsCalculator::calculate(&tensor, &projection, &association)
//!     .expect("should have computed the index");
//! println!("DTI-ALPS index = {index}");
//! ```

pub mod alps;
pub mod enums;
pub mod mni;
pub mod space;
pub mod tensor;
pub mod volume;
pub mod volume_loader;

pub use alps::{AlpsCalculator, AlpsError, AlpsReport, LabelSource, RegionMeans};
pub use enums::{Region, Space, TensorLayout};
pub use mni::MniTemplate;
pub use space::{ensure_same_space, is_same_space};
pub use tensor::DiffusionTensor;
pub use volume::{LabelVolume, SpatialExtent, TensorVolume};
pub use volume_loader::{VolumeLoader, VolumeLoaderError};
