//! This crate computes chamfer distance maps of label images:
//! for every labeled pixel, an approximation of the euclidean distance
//! to the nearest pixel carrying a different label, background included.
//! Distances are propagated by a forward and a backward raster scan
//! over the 3x3 neighbourhood, weighted by a set of chamfer weights.

pub mod chamfer;
pub mod config;
pub mod distance_map;
pub mod error;
pub mod label_image;
pub mod mask;
pub mod measure;
pub mod progress;
pub mod weights;

pub mod prelude {
    pub use crate::{
        transform,
        compute_distance_map,
        compute_f32_distance_map,
        compute_f16_distance_map,
        compute_u16_distance_map,
    };

    pub use crate::label_image::{
        LabelImage, LabelGrid
    };

    pub use crate::distance_map::{
        DistanceMap, LabelDistances, DistanceStorage,
        F32DistanceStorage, F16DistanceStorage, U16DistanceStorage
    };

    pub use crate::chamfer::{ ChamferTransform, LabelDistanceTransform };
    pub use crate::weights::{ ChamferWeights, WeightPreset };
    pub use crate::progress::{ ProgressReporter, TransformStep, NoProgress, LogProgress };
    pub use crate::config::TransformConfig;
    pub use crate::error::ChamferError;

    #[cfg(feature = "image")]
    pub use crate::label_image::piston_image as label_piston_image;
}


use prelude::*;

/// Compute the `f32` distance map of the specified label image, along with
/// its largest finite distance. With `normalize`, distances are divided by the orthogonal weight.
pub fn transform(image: &impl LabelImage, weights: &ChamferWeights, normalize: bool) -> LabelDistances<F32DistanceStorage> {
    ChamferTransform::<F32DistanceStorage>::new(weights.clone(), normalize).transform(image, &mut NoProgress)
}

/// Compute the distance map with the specified distance storage of the specified label image.
pub fn compute_distance_map<D: DistanceStorage>(image: &impl LabelImage, weights: &ChamferWeights, normalize: bool) -> DistanceMap<D> {
    ChamferTransform::<D>::new(weights.clone(), normalize).distance_map(image, &mut NoProgress)
}

/// Compute the distance map with an `f32` distance storage of the specified label image.
pub fn compute_f32_distance_map(image: &impl LabelImage, weights: &ChamferWeights, normalize: bool) -> DistanceMap<F32DistanceStorage> {
    compute_distance_map(image, weights, normalize)
}

/// Compute the distance map with an `f16` distance storage of the specified label image.
pub fn compute_f16_distance_map(image: &impl LabelImage, weights: &ChamferWeights, normalize: bool) -> DistanceMap<F16DistanceStorage> {
    compute_distance_map(image, weights, normalize)
}

/// Compute the distance map with a saturating `u16` distance storage of the specified label image.
pub fn compute_u16_distance_map(image: &impl LabelImage, weights: &ChamferWeights, normalize: bool) -> DistanceMap<U16DistanceStorage> {
    compute_distance_map(image, weights, normalize)
}
