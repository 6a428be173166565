use ndarray::Zip;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use web_time::Instant;

use crate::enums::{Region, Space};
use crate::mni::MniTemplate;
use crate::space::ensure_same_space;
use crate::tensor::DiffusionTensor;
use crate::volume::{LabelVolume, TensorVolume};

#[derive(Debug, Error)]
pub enum AlpsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Volume shape {found:?} does not match reference shape {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize, usize),
        found: (usize, usize, usize),
    },

    #[error("{0} label does not select any voxel")]
    EmptyRegion(Region),
}

/// Running sum of one tensor component over a region.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComponentAccumulator {
    pub sum: f64,
    pub count: usize,
}

impl ComponentAccumulator {
    #[inline]
    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// `None` when nothing was accumulated
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Mean diffusivities sampled from one ROI.
///
/// `orthogonal` is Dyy for the Projection region and Dzz for the Association
/// region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionMeans {
    pub dxx: f64,
    pub orthogonal: f64,
    pub voxels: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlpsReport {
    pub space: Space,
    pub index: f64,
    pub numerator: f64,
    pub denominator: f64,
    pub projection: RegionMeans,
    pub association: RegionMeans,
}

/// Where the ROI labels come from.
#[derive(Debug, Clone, Copy)]
pub enum LabelSource<'a> {
    Native {
        projection: Option<&'a LabelVolume>,
        association: Option<&'a LabelVolume>,
    },
    Mni(&'a MniTemplate),
}

impl LabelSource<'_> {
    pub fn space(&self) -> Space {
        match self {
            LabelSource::Native { .. } => Space::Native,
            LabelSource::Mni(_) => Space::Mni,
        }
    }
}

pub struct AlpsCalculator;

impl AlpsCalculator {
    /// Compute the DTI-ALPS index
    ///
    /// ```text
    /// ALPS = mean(Dxx_proj, Dxx_assoc) / mean(Dyy_proj, Dzz_assoc)
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`AlpsError::ShapeMismatch`] if a label grid differs from the
    /// tensor grid and [`AlpsError::EmptyRegion`] if a label selects no voxel.
    pub fn calculate(
        tensor: &TensorVolume,
        projection: &LabelVolume,
        association: &LabelVolume,
    ) -> Result<f64, AlpsError> {
        Self::calculate_report(tensor, projection, association).map(|report| report.index)
    }

    /// Same as [`AlpsCalculator::calculate`] but keeps the per-region means
    /// and voxel counts.
    pub fn calculate_report(
        tensor: &TensorVolume,
        projection: &LabelVolume,
        association: &LabelVolume,
    ) -> Result<AlpsReport, AlpsError> {
        ensure_same_space(tensor, projection)?;
        ensure_same_space(tensor, association)?;

        let projection = Self::region_means(tensor, projection, Region::Projection)?;
        let association = Self::region_means(tensor, association, Region::Association)?;

        let numerator = (projection.dxx + association.dxx) / 2.0;
        let denominator = (projection.orthogonal + association.orthogonal) / 2.0;

        Ok(AlpsReport {
            space: Space::Native,
            index: numerator / denominator,
            numerator,
            denominator,
            projection,
            association,
        })
    }

    /// Validate the inputs for the selected label source and compute the
    /// index.
    ///
    /// In native space all three volumes are required. In MNI space the
    /// tensor volume must share the template grid.
    pub fn process(
        tensor: Option<&TensorVolume>,
        labels: LabelSource<'_>,
    ) -> Result<AlpsReport, AlpsError> {
        let start = Instant::now();

        let (tensor, projection, association) = match labels {
            LabelSource::Native {
                projection: Some(projection),
                association: Some(association),
            } => match tensor {
                Some(tensor) => (tensor, projection, association),
                None => return Err(Self::invalid_native_input()),
            },
            LabelSource::Native { .. } => return Err(Self::invalid_native_input()),
            LabelSource::Mni(template) => {
                let tensor = tensor.ok_or_else(|| {
                    AlpsError::InvalidInput("Input DTI is required in MNI space".to_string())
                })?;
                (tensor, &template.projection, &template.association)
            }
        };

        info!("Processing started");
        if labels.space() == Space::Mni {
            debug!("checking that the input DTI shares the MNI template grid");
            if let Err(err) = ensure_same_space(projection, tensor) {
                error!(
                    "Input DTI image is not in MNI space. Resample it to the MNI template before using this option."
                );
                return Err(err);
            }
            info!("Calculating DTI-ALPS in MNI space");
        } else {
            info!("Calculating DTI-ALPS in native space");
        }

        if projection.overlaps(association) {
            warn!("Projection and Association labels share voxels");
        }

        let mut report = Self::calculate_report(tensor, projection, association)?;
        report.space = labels.space();

        debug!(
            "projection: {} voxels, mean Dxx {:.6}, mean Dyy {:.6}",
            report.projection.voxels, report.projection.dxx, report.projection.orthogonal
        );
        debug!(
            "association: {} voxels, mean Dxx {:.6}, mean Dzz {:.6}",
            report.association.voxels, report.association.dxx, report.association.orthogonal
        );
        info!("DTI-ALPS index: {:.6}", report.index);
        info!(
            "Processing completed in {:.2} seconds",
            start.elapsed().as_secs_f64()
        );

        Ok(report)
    }

    fn invalid_native_input() -> AlpsError {
        AlpsError::InvalidInput(
            "Input DTI, Projection and/or Association labels are not valid".to_string(),
        )
    }

    fn region_means(
        tensor: &TensorVolume,
        labels: &LabelVolume,
        region: Region,
    ) -> Result<RegionMeans, AlpsError> {
        let mut dxx = ComponentAccumulator::default();
        let mut orthogonal = ComponentAccumulator::default();

        Zip::from(tensor.data())
            .and(labels.data())
            .for_each(|voxel, &label| {
                if label != 0 {
                    dxx.add(voxel.dxx());
                    orthogonal.add(Self::orthogonal_component(voxel, region));
                }
            });

        match (dxx.mean(), orthogonal.mean()) {
            (Some(mean_dxx), Some(mean_orthogonal)) => Ok(RegionMeans {
                dxx: mean_dxx,
                orthogonal: mean_orthogonal,
                voxels: dxx.count,
            }),
            _ => Err(AlpsError::EmptyRegion(region)),
        }
    }

    #[inline]
    fn orthogonal_component(voxel: &DiffusionTensor, region: Region) -> f64 {
        match region {
            Region::Projection => voxel.dyy(),
            Region::Association => voxel.dzz(),
        }
    }
}
