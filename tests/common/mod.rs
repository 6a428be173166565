//! Common test utilities for dti-alps integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use ndarray::{Array, Array3};
use nifti::writer::WriterOptions;

pub const DIM: (usize, usize, usize) = (6, 6, 4);

/// Write a `(X, Y, Z, 3, 3)` tensor volume with the same diagonal tensor at
/// every voxel
pub fn write_full_tensor(path: &Path, dim: (usize, usize, usize), diagonal: [f64; 3]) {
    let data = Array::from_shape_fn((dim.0, dim.1, dim.2, 3, 3), |(_, _, _, row, col)| {
        if row == col { diagonal[row] } else { 0.0 }
    });
    WriterOptions::new(path)
        .write_nifti(&data)
        .expect("should have written tensor volume");
}

/// Write a `(X, Y, Z, 6)` tensor volume in `xx, xy, xz, yy, yz, zz` order
pub fn write_upper_triangle_tensor(path: &Path, dim: (usize, usize, usize), components: [f64; 6]) {
    let data = Array::from_shape_fn((dim.0, dim.1, dim.2, 6), |(_, _, _, c)| components[c]);
    WriterOptions::new(path)
        .write_nifti(&data)
        .expect("should have written tensor volume");
}

/// Write a label volume marking the x = `slab` plane
pub fn write_slab_label(path: &Path, dim: (usize, usize, usize), slab: usize, value: i32) {
    let data = Array3::from_shape_fn(dim, |(x, _, _)| if x == slab { value } else { 0 });
    WriterOptions::new(path)
        .write_nifti(&data)
        .expect("should have written label volume");
}

/// Write an empty label volume
pub fn write_empty_label(path: &Path, dim: (usize, usize, usize)) {
    let data = Array3::<i32>::zeros(dim);
    WriterOptions::new(path)
        .write_nifti(&data)
        .expect("should have written label volume");
}

/// Write the two MNI template labels into `dir`
pub fn write_mni_template(dir: &Path, dim: (usize, usize, usize)) -> PathBuf {
    write_slab_label(&dir.join(dti_alps::mni::PROJECTION_LABEL_FILE), dim, 1, 1);
    write_slab_label(&dir.join(dti_alps::mni::ASSOCIATION_LABEL_FILE), dim, dim.0 - 2, 1);
    dir.to_path_buf()
}
