use crate::label_image::LabelImage;


/// Distances of every pixel of a label image to the nearest pixel with a different label.
/// Background pixels hold zero. Foreground pixels of regions
/// that never meet a different label stay infinite.
#[derive(Clone, PartialEq, Debug)]
pub struct DistanceMap<D: DistanceStorage> {
    pub width: usize,
    pub height: usize,
    pub distances: D,
}

/// A distance map together with its largest finite value,
/// as used for display calibration.
#[derive(Clone, PartialEq, Debug)]
pub struct LabelDistances<D: DistanceStorage> {
    pub map: DistanceMap<D>,
    pub max_value: f32,
}

/// Exact storage, and the reference for all other storages.
pub type F32DistanceStorage = Vec<f32>;

/// Needs half the storage of `f32`, but rounds every stored distance
/// and takes longer because of conversions between f16 and f32.
pub type F16DistanceStorage = Vec<half::f16>;

/// Integer storage for integer weights. Distances are rounded to the nearest integer
/// and saturate at `u16::MAX`, which also marks pixels without known distance.
pub type U16DistanceStorage = Vec<u16>;

/// Backing store of a distance map.
/// Freshly created storages hold the unset distance (infinity) everywhere.
pub trait DistanceStorage {
    fn new(length: usize) -> Self;

    fn get(&self, index: usize) -> f32;

    fn set(&mut self, index: usize, distance: f32);
}



impl<D> DistanceMap<D> where D: DistanceStorage {

    /// Allocate a map for the specified image, with
    /// zero for background pixels and infinity for all labeled pixels.
    pub fn initialize(image: &impl LabelImage) -> Self {
        let width = image.width();
        let height = image.height();

        let mut distance_map = DistanceMap {
            width, height,
            distances: D::new(width * height),
        };

        for y in 0..height {
            for x in 0..width {
                if image.is_background(x, y) {
                    distance_map.set_distance(x, y, 0.0);
                }
            }
        }

        distance_map
    }

    /// Divide the distance of every labeled pixel by the specified weight,
    /// converting chamfer units to approximate pixel units.
    pub fn normalize(&mut self, image: &impl LabelImage, orthogonal_weight: f32) {
        for y in 0..self.height {
            for x in 0..self.width {
                if !image.is_background(x, y) {
                    let distance = self.get_distance(x, y);
                    self.set_distance(x, y, distance / orthogonal_weight);
                }
            }
        }
    }

    /// The largest finite distance, or zero if there is none.
    /// Background pixels are zero and never raise the maximum,
    /// so this is the maximum over labeled pixels.
    pub fn max_value(&self) -> f32 {
        (0 .. self.width * self.height)
            .map(|index| self.distances.get(index))
            .filter(|distance| distance.is_finite())
            .fold(0.0, f32::max)
    }

    #[inline(always)]
    pub fn get_distance(&self, x: usize, y: usize) -> f32 {
        self.distances.get(self.flatten_index(x, y))
    }

    #[inline(always)]
    pub(crate) fn set_distance(&mut self, x: usize, y: usize, distance: f32) {
        let index = self.flatten_index(x, y);
        self.distances.set(index, distance);
    }

    #[inline]
    pub fn flatten_index(&self, x: usize, y: usize) -> usize {
        self.width * y + x
    }

    /// All distances in row-major order, converted to `f32`.
    pub fn to_f32_vec(&self) -> Vec<f32> {
        (0 .. self.width * self.height).map(|index| self.distances.get(index)).collect()
    }

    /// Render the distances as grey levels, mapping `0..=max_value` to `0..=255`.
    /// Infinite distances become white.
    #[cfg(feature = "image")]
    pub fn to_gray_u8_image(&self, max_value: f32) -> image::GrayImage {
        image::GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let distance = self.get_distance(x as usize, y as usize);
            let scaled = if max_value > 0.0 { distance / max_value } else { 0.0 };
            image::Luma([(scaled.min(1.0) * 255.0).round() as u8])
        })
    }
}

impl<D> LabelDistances<D> where D: DistanceStorage {
    pub fn from_map(map: DistanceMap<D>) -> Self {
        let max_value = map.max_value();
        LabelDistances { map, max_value }
    }
}


impl DistanceStorage for F32DistanceStorage {
    fn new(length: usize) -> Self {
        vec![f32::INFINITY; length]
    }

    #[inline]
    fn get(&self, index: usize) -> f32 {
        self[index]
    }

    #[inline]
    fn set(&mut self, index: usize, distance: f32) {
        self[index] = distance
    }
}

impl DistanceStorage for F16DistanceStorage {
    fn new(length: usize) -> Self {
        vec![half::f16::INFINITY; length]
    }

    #[inline]
    fn get(&self, index: usize) -> f32 {
        self[index].to_f32()
    }

    #[inline]
    fn set(&mut self, index: usize, distance: f32) {
        self[index] = half::f16::from_f32(distance)
    }
}

impl DistanceStorage for U16DistanceStorage {
    fn new(length: usize) -> Self {
        vec![u16::MAX; length]
    }

    #[inline]
    fn get(&self, index: usize) -> f32 {
        match self[index] {
            u16::MAX => f32::INFINITY,
            distance => distance as f32,
        }
    }

    #[inline]
    fn set(&mut self, index: usize, distance: f32) {
        // float to int casts saturate, infinity included
        self[index] = distance.round() as u16
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::label_image::LabelGrid;

    #[test]
    fn initializes_background_to_zero_and_labels_to_infinity(){
        let labels = [0, 1, 2, 0];
        let map = DistanceMap::<F32DistanceStorage>::initialize(&LabelGrid::from_slice(2, 2, &labels));

        assert_eq!(map.distances, vec![0.0, f32::INFINITY, f32::INFINITY, 0.0]);
        assert_eq!(map.max_value(), 0.0);
    }

    #[test]
    fn normalizes_labeled_pixels_only(){
        let labels = [0, 1, 1];
        let image = LabelGrid::from_slice(3, 1, &labels);

        let mut map = DistanceMap::<F32DistanceStorage> {
            width: 3, height: 1, distances: vec![0.0, 3.0, f32::INFINITY],
        };

        map.normalize(&image, 3.0);
        assert_eq!(map.distances, vec![0.0, 1.0, f32::INFINITY]);
    }

    #[test]
    fn max_value_ignores_infinite_distances(){
        let map = DistanceMap::<F32DistanceStorage> {
            width: 2, height: 2, distances: vec![0.0, 4.0, f32::INFINITY, 2.5],
        };

        assert_eq!(map.max_value(), 4.0);
        assert_eq!(LabelDistances::from_map(map).max_value, 4.0);
    }

    #[test]
    fn u16_storage_rounds_and_saturates(){
        let mut storage = <U16DistanceStorage as DistanceStorage>::new(3);
        assert_eq!(storage.get(0), f32::INFINITY);

        storage.set(0, 4.0 / 3.0);
        storage.set(1, 1.0e9);
        storage.set(2, f32::INFINITY);

        assert_eq!(storage.get(0), 1.0);
        assert_eq!(storage.get(1), f32::INFINITY);
        assert_eq!(storage.get(2), f32::INFINITY);
    }

    #[test]
    fn f16_storage_keeps_infinity_and_small_integers(){
        let mut storage = <F16DistanceStorage as DistanceStorage>::new(2);
        assert_eq!(storage.get(0), f32::INFINITY);

        storage.set(1, 6.0);
        assert_eq!(storage.get(1), 6.0);
    }
}
