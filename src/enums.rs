use std::fmt;

/// Region of interest the index is sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Projection,
    Association,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Projection => write!(f, "Projection"),
            Region::Association => write!(f, "Association"),
        }
    }
}

/// Reference space the ROI labels live in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    #[default]
    Native,
    Mni,
}

/// Storage order of the tensor components along the trailing axes of a
/// tensor file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TensorLayout {
    /// `(X, Y, Z, 3, 3)` or `(X, Y, Z, 9)`, row-major
    Full,
    /// `xx, xy, xz, yy, yz, zz` (FSL dtifit)
    UpperTriangle,
    /// `xx, yx, yy, zx, zy, zz` (NIfTI symmetric matrix intent)
    LowerTriangle,
}

impl TensorLayout {
    pub fn components(&self) -> usize {
        match self {
            TensorLayout::Full => 9,
            TensorLayout::UpperTriangle | TensorLayout::LowerTriangle => 6,
        }
    }
}
