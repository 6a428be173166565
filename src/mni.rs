use std::path::Path;

use tracing::{debug, warn};

use crate::volume::LabelVolume;
use crate::volume_loader::{VolumeLoader, VolumeLoaderError};

pub const PROJECTION_LABEL_FILE: &str = "Projection-label-2mm-MNI.nii.gz";
pub const ASSOCIATION_LABEL_FILE: &str = "Association-label-2mm-MNI.nii.gz";

/// Grid of the MNI152 template at 2 mm isotropic resolution
pub const MNI_2MM_DIM: (usize, usize, usize) = (91, 109, 91);

/// Standard Projection / Association ROI labels in MNI space.
#[derive(Debug, Clone)]
pub struct MniTemplate {
    pub projection: LabelVolume,
    pub association: LabelVolume,
}

impl MniTemplate {
    pub fn new(projection: LabelVolume, association: LabelVolume) -> Self {
        Self {
            projection,
            association,
        }
    }

    /// Load both template labels from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeLoaderError::TemplateNotFound`] if either file is
    /// missing, or the underlying read error.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, VolumeLoaderError> {
        let dir = dir.as_ref();
        let projection_path = dir.join(PROJECTION_LABEL_FILE);
        let association_path = dir.join(ASSOCIATION_LABEL_FILE);

        for path in [&projection_path, &association_path] {
            if !path.is_file() {
                return Err(VolumeLoaderError::TemplateNotFound(path.clone()));
            }
        }

        debug!("loading MNI template labels from {}", dir.display());
        let template = Self::new(
            VolumeLoader::load_label_volume(&projection_path)?,
            VolumeLoader::load_label_volume(&association_path)?,
        );

        if !template.is_standard_grid() {
            warn!(
                "MNI template labels have shape {:?}, expected {:?}",
                template.projection.dim(),
                MNI_2MM_DIM
            );
        }
        Ok(template)
    }

    /// Whether both labels sit on the 2 mm MNI grid
    pub fn is_standard_grid(&self) -> bool {
        self.projection.dim() == MNI_2MM_DIM && self.association.dim() == MNI_2MM_DIM
    }
}
