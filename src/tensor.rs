use std::ops::Index;

use crate::enums::TensorLayout;

/// A 3x3 diffusion tensor stored row-major.
///
/// ```text
/// D = [ Dxx Dxy Dxz
///       Dyx Dyy Dyz
///       Dzx Dzy Dzz ]
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DiffusionTensor(pub [[f64; 3]; 3]);

impl DiffusionTensor {
    pub const IDENTITY: Self = Self([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    pub fn from_diagonal(dxx: f64, dyy: f64, dzz: f64) -> Self {
        Self([[dxx, 0.0, 0.0], [0.0, dyy, 0.0], [0.0, 0.0, dzz]])
    }

    /// Build a tensor from the trailing components of one voxel.
    ///
    /// Returns `None` if `components` does not hold exactly
    /// [`TensorLayout::components`] values.
    pub fn from_components(components: &[f64], layout: TensorLayout) -> Option<Self> {
        if components.len() != layout.components() {
            return None;
        }
        let c = components;
        let tensor = match layout {
            TensorLayout::Full => Self([[c[0], c[1], c[2]], [c[3], c[4], c[5]], [c[6], c[7], c[8]]]),
            TensorLayout::UpperTriangle => {
                Self([[c[0], c[1], c[2]], [c[1], c[3], c[4]], [c[2], c[4], c[5]]])
            }
            TensorLayout::LowerTriangle => {
                Self([[c[0], c[1], c[3]], [c[1], c[2], c[4]], [c[3], c[4], c[5]]])
            }
        };
        Some(tensor)
    }

    #[inline]
    pub fn dxx(&self) -> f64 {
        self.0[0][0]
    }

    #[inline]
    pub fn dyy(&self) -> f64 {
        self.0[1][1]
    }

    #[inline]
    pub fn dzz(&self) -> f64 {
        self.0[2][2]
    }
}

impl Index<(usize, usize)> for DiffusionTensor {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.0[row][col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_accessors() {
        let tensor = DiffusionTensor::from_diagonal(1.5, 0.5, 0.25);
        assert_eq!(tensor.dxx(), 1.5);
        assert_eq!(tensor.dyy(), 0.5);
        assert_eq!(tensor.dzz(), 0.25);
        assert_eq!(tensor[(1, 1)], 0.5);
        assert_eq!(tensor[(0, 1)], 0.0);
    }

    #[test]
    fn test_full_layout_is_row_major() {
        let values: Vec<f64> = (1..=9).map(f64::from).collect();
        let tensor = DiffusionTensor::from_components(&values, TensorLayout::Full).unwrap();
        assert_eq!(tensor[(0, 2)], 3.0);
        assert_eq!(tensor[(2, 0)], 7.0);
        assert_eq!(tensor.dyy(), 5.0);
        assert_eq!(tensor.dzz(), 9.0);
    }

    #[test]
    fn test_upper_triangle_layout() {
        // xx, xy, xz, yy, yz, zz
        let values = [1.0, 0.1, 0.2, 2.0, 0.3, 3.0];
        let tensor = DiffusionTensor::from_components(&values, TensorLayout::UpperTriangle).unwrap();
        assert_eq!((tensor.dxx(), tensor.dyy(), tensor.dzz()), (1.0, 2.0, 3.0));
        assert_eq!(tensor[(1, 0)], 0.1);
        assert_eq!(tensor[(2, 0)], 0.2);
        assert_eq!(tensor[(2, 1)], 0.3);
    }

    #[test]
    fn test_lower_triangle_layout() {
        // xx, yx, yy, zx, zy, zz
        let values = [1.0, 0.1, 2.0, 0.2, 0.3, 3.0];
        let tensor = DiffusionTensor::from_components(&values, TensorLayout::LowerTriangle).unwrap();
        assert_eq!((tensor.dxx(), tensor.dyy(), tensor.dzz()), (1.0, 2.0, 3.0));
        assert_eq!(tensor[(0, 1)], 0.1);
        assert_eq!(tensor[(0, 2)], 0.2);
        assert_eq!(tensor[(1, 2)], 0.3);
    }

    #[test]
    fn test_wrong_component_count() {
        assert!(DiffusionTensor::from_components(&[1.0; 6], TensorLayout::Full).is_none());
        assert!(DiffusionTensor::from_components(&[1.0; 9], TensorLayout::UpperTriangle).is_none());
    }
}
