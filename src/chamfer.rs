//! Chamfer distance transform of label images.
//! Distances are propagated by a forward and a backward raster scan,
//! each relaxing a pixel from the half of its neighbourhood
//! that has already been visited in the current scan.

use crate::distance_map::{DistanceMap, DistanceStorage, LabelDistances};
use crate::error::{ChamferError, Result};
use crate::label_image::LabelImage;
use crate::mask::{NeighborMask, Offset};
use crate::progress::{ProgressReporter, TransformStep};
use crate::weights::ChamferWeights;
use std::marker::PhantomData;


/// Computes distance maps of label images.
/// Implementations differ in neighbourhood and distance storage.
pub trait LabelDistanceTransform {
    type Storage: DistanceStorage;

    /// Computes the distance of every labeled pixel
    /// to the nearest pixel with a different label, background included.
    fn distance_map(
        &self, image: &impl LabelImage, progress: &mut impl ProgressReporter
    ) -> DistanceMap<Self::Storage>;

    /// Computes the distance map along with its largest finite value.
    fn transform(
        &self, image: &impl LabelImage, progress: &mut impl ProgressReporter
    ) -> LabelDistances<Self::Storage> {
        LabelDistances::from_map(self.distance_map(image, progress))
    }
}

/// Chamfer distance transform with a neighbourhood mask, a set of weights
/// and an optional normalization by the orthogonal weight.
#[derive(Clone, Debug)]
pub struct ChamferTransform<D> {
    weights: ChamferWeights,
    mask: NeighborMask,

    /// Divide the final map by the orthogonal weight,
    /// which brings distances closer to euclidean pixel distances.
    normalize: bool,

    storage: PhantomData<fn() -> D>,
}


impl<D> ChamferTransform<D> where D: DistanceStorage {

    /// A transform over the 3x3 neighbourhood.
    pub fn new(weights: ChamferWeights, normalize: bool) -> Self {
        ChamferTransform {
            weights, normalize,
            mask: NeighborMask::CHAMFER_3X3,
            storage: PhantomData,
        }
    }

    /// A transform over a custom neighbourhood.
    /// Fails if the mask references weight classes the weights do not define.
    pub fn with_mask(weights: ChamferWeights, mask: NeighborMask, normalize: bool) -> Result<Self> {
        if mask.max_weight_class() >= weights.len() {
            return Err(ChamferError::invalid_configuration(format!(
                "neighbourhood uses weight class {}, but only {} weights are defined",
                mask.max_weight_class(), weights.len()
            )));
        }

        Ok(ChamferTransform { weights, mask, normalize, storage: PhantomData })
    }

    pub fn weights(&self) -> &ChamferWeights {
        &self.weights
    }

    pub fn mask(&self) -> &NeighborMask {
        &self.mask
    }

    pub fn normalizes(&self) -> bool {
        self.normalize
    }

    /// Performs one forward and one backward scan over an existing map,
    /// returning the number of pixels whose distance decreased.
    /// On an initialized map, this computes the final distances,
    /// and any further call returns zero for convex regions.
    pub fn propagate(
        &self, image: &impl LabelImage, distance_map: &mut DistanceMap<D>,
        progress: &mut impl ProgressReporter
    ) -> usize {
        progress.step(TransformStep::ForwardScan);
        let forward = self.scan(image, distance_map, self.mask.forward, false, progress);

        // reads the values written by the forward scan
        progress.step(TransformStep::BackwardScan);
        let backward = self.scan(image, distance_map, self.mask.backward, true, progress);

        log::debug!("forward scan updated {} pixels, backward scan updated {} pixels", forward, backward);
        forward + backward
    }

    fn scan(
        &self, image: &impl LabelImage, distance_map: &mut DistanceMap<D>,
        offsets: &[Offset], backward: bool, progress: &mut impl ProgressReporter
    ) -> usize {
        let width = distance_map.width;
        let height = distance_map.height;
        let mut updated = 0;

        for row in 0..height {
            progress.progress(row, height);
            let y = if backward { height - 1 - row } else { row };

            for column in 0..width {
                let x = if backward { width - 1 - column } else { column };

                if self.relax(image, distance_map, x, y, offsets) {
                    updated += 1;
                }
            }
        }

        progress.progress(height, height);
        updated
    }

    /// Lower the distance of a labeled pixel according to its already visited neighbours.
    /// Returns whether the stored distance decreased.
    #[inline(always)]
    fn relax(
        &self, image: &impl LabelImage, distance_map: &mut DistanceMap<D>,
        x: usize, y: usize, offsets: &[Offset]
    ) -> bool {
        let label = image.label(x, y);

        // background pixels never change
        if label == 0 {
            return false;
        }

        let index = distance_map.flatten_index(x, y);
        let current_distance = distance_map.distances.get(index);
        let mut distance = current_distance;

        for offset in offsets {
            let (neighbour_x, neighbour_y) = match offset.neighbour(x, y, distance_map.width, distance_map.height) {
                Some(neighbour) => neighbour,
                None => continue,
            };

            let step = self.weights.get(offset.weight_class);

            if image.label(neighbour_x, neighbour_y) != label {
                // a different label is a boundary at exactly one step,
                // replacing whatever earlier neighbours of this pixel suggested
                distance = step;
            }
            else {
                distance = distance.min(distance_map.get_distance(neighbour_x, neighbour_y) + step);
            }
        }

        if distance < current_distance {
            distance_map.distances.set(index, distance);

            // storages may round the distance back to the current value
            distance_map.distances.get(index) < current_distance
        }
        else {
            false
        }
    }
}

impl<D> LabelDistanceTransform for ChamferTransform<D> where D: DistanceStorage {
    type Storage = D;

    fn distance_map(
        &self, image: &impl LabelImage, progress: &mut impl ProgressReporter
    ) -> DistanceMap<D> {
        log::debug!(
            "chamfer distance transform of {}x{} labels with weights {:?}",
            image.width(), image.height(), self.weights.as_slice()
        );

        progress.step(TransformStep::Initialization);
        let mut distance_map = DistanceMap::initialize(image);

        // two scans are enough to compute the distance map to boundaries
        self.propagate(image, &mut distance_map, progress);

        if self.normalize {
            progress.step(TransformStep::Normalization);
            distance_map.normalize(image, self.weights.orthogonal());
        }

        progress.step(TransformStep::Done);
        distance_map
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance_map::{F32DistanceStorage, U16DistanceStorage};
    use crate::label_image::LabelGrid;
    use crate::progress::NoProgress;
    use crate::weights::WeightPreset;

    #[derive(Default)]
    struct RecordingProgress {
        steps: Vec<TransformStep>,
        rows: Vec<(usize, usize)>,
    }

    impl ProgressReporter for RecordingProgress {
        fn step(&mut self, step: TransformStep) {
            self.steps.push(step);
        }

        fn progress(&mut self, current: usize, total: usize) {
            self.rows.push((current, total));
        }
    }

    fn borgefors(normalize: bool) -> ChamferTransform<F32DistanceStorage> {
        ChamferTransform::new(WeightPreset::Borgefors.into(), normalize)
    }

    #[test]
    fn reports_steps_and_rows(){
        let labels = [1, 1, 0, 1, 1, 0];
        let image = LabelGrid::from_slice(3, 2, &labels);

        let mut progress = RecordingProgress::default();
        let reported = borgefors(true).distance_map(&image, &mut progress);
        let silent = borgefors(true).distance_map(&image, &mut NoProgress);

        assert_eq!(reported, silent);
        assert_eq!(progress.steps, vec![
            TransformStep::Initialization, TransformStep::ForwardScan,
            TransformStep::BackwardScan, TransformStep::Normalization, TransformStep::Done,
        ]);

        // two rows and a completion event per scan
        assert_eq!(progress.rows, vec![(0, 2), (1, 2), (2, 2), (0, 2), (1, 2), (2, 2)]);
    }

    #[test]
    fn skips_normalization_step_when_disabled(){
        let labels = [1, 0];
        let mut progress = RecordingProgress::default();
        borgefors(false).distance_map(&LabelGrid::from_slice(2, 1, &labels), &mut progress);

        assert!(!progress.steps.contains(&TransformStep::Normalization));
    }

    #[test]
    fn adjacent_labels_are_boundaries(){
        let labels = [1, 1, 2, 2];
        let image = LabelGrid::from_slice(4, 1, &labels);

        let map = borgefors(false).distance_map(&image, &mut NoProgress);
        assert_eq!(map.distances, vec![6.0, 3.0, 3.0, 6.0]);
    }

    #[test]
    fn propagate_counts_updated_pixels(){
        let labels = [0, 1, 1, 1];
        let image = LabelGrid::from_slice(4, 1, &labels);
        let transform = borgefors(false);

        let mut map = DistanceMap::initialize(&image);
        assert_eq!(transform.propagate(&image, &mut map, &mut NoProgress), 3);
        assert_eq!(map.distances, vec![0.0, 3.0, 6.0, 9.0]);

        assert_eq!(transform.propagate(&image, &mut map, &mut NoProgress), 0);
    }

    #[test]
    fn integer_storage_matches_float_storage_for_integer_weights(){
        let labels = [
            0, 0, 0, 0, 0, 0,
            0, 1, 1, 1, 1, 0,
            0, 1, 1, 1, 1, 0,
            0, 1, 1, 2, 2, 0,
            0, 0, 0, 0, 0, 0,
        ];
        let image = LabelGrid::from_slice(6, 5, &labels);

        let float = borgefors(false).distance_map(&image, &mut NoProgress);
        let integer = ChamferTransform::<U16DistanceStorage>::new(WeightPreset::Borgefors.into(), false)
            .distance_map(&image, &mut NoProgress);

        assert_eq!(float.to_f32_vec(), integer.to_f32_vec());
    }

    #[test]
    fn rejects_masks_beyond_the_weights(){
        const KNIGHT: &[Offset] = &[Offset::new(-1, -2, 2)];
        let mask = NeighborMask { forward: KNIGHT, backward: KNIGHT };

        let short = ChamferTransform::<F32DistanceStorage>::with_mask(
            WeightPreset::Borgefors.into(), mask, false
        );
        assert!(short.is_err());

        let long = ChamferTransform::<F32DistanceStorage>::with_mask(
            WeightPreset::Chessknight.into(), mask, false
        );
        assert!(long.is_ok());
    }
}
