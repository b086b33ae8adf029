//! Per-region measurements of label images: area, Crofton perimeter
//! and inertia ellipse. These consume the label image directly and
//! are unrelated to the distance transform.

use crate::error::{ChamferError, Result};
use crate::label_image::LabelImage;
use std::collections::{BTreeSet, HashMap};
use std::f64::consts::PI;


/// Physical size of a pixel along x and y.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Resolution {
    x: f64,
    y: f64,
}

/// Number of directions the Crofton formula integrates over.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CroftonDirections {
    /// Horizontal and vertical lines.
    Two,

    /// Horizontal, vertical and both diagonal lines.
    Four,
}

/// Measures a scalar for each of the requested labels.
pub trait LabelMeasurement {
    /// Returns one value per entry of `labels`, in the same order.
    /// Labels absent from the image measure zero.
    fn measure(&self, image: &impl LabelImage, labels: &[u32], resolution: Resolution) -> Vec<f64>;
}

/// Region area, from the pixel count.
#[derive(Copy, Clone, Default, Debug)]
pub struct Area;

/// Perimeter estimated from the number of boundary intersections
/// of lines in two or four directions. Regions touching the image frame
/// are closed by the frame.
#[derive(Copy, Clone, Debug)]
pub struct CroftonPerimeter {
    pub directions: CroftonDirections,

    /// Log the intersection count of each direction for every label.
    pub log_direction_counts: bool,
}

/// Perimeter estimated by summing look-up-table contributions
/// of every 2x2 pixel configuration. Does not count the image frame.
#[derive(Copy, Clone, Debug)]
pub struct CroftonLutPerimeter {
    pub directions: CroftonDirections,
}

/// Area and perimeter derived shape factors of one region.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RegionShape {
    pub label: u32,
    pub area: f64,
    pub perimeter: f64,

    /// `4 pi area / perimeter^2`, at most 1.
    pub circularity: f64,
    pub elongation: f64,
}

/// The ellipse with the same second moments as a region, in pixel units.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct InertiaEllipse {
    pub label: u32,

    /// Centroid, with pixel centres at half-integer coordinates.
    pub center_x: f64,
    pub center_y: f64,

    /// Semi-axis lengths, `major_radius >= minor_radius`.
    pub major_radius: f64,
    pub minor_radius: f64,

    /// Angle of the major axis in degrees, with y pointing down.
    pub orientation: f64,
}


impl Resolution {
    pub const UNIT: Resolution = Resolution { x: 1.0, y: 1.0 };

    pub fn new(x: f64, y: f64) -> Result<Self> {
        if !(x.is_finite() && x > 0.0 && y.is_finite() && y > 0.0) {
            return Err(ChamferError::invalid_configuration(format!(
                "pixel resolution must be positive and finite, got ({}, {})", x, y
            )));
        }

        Ok(Resolution { x, y })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn pixel_area(&self) -> f64 {
        self.x * self.y
    }

    pub fn diagonal(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Share of the orientations covered by each direction
    /// (horizontal, vertical, and the two diagonals). Sums to one.
    fn direction_weights(&self) -> [f64; 4] {
        let theta = self.y.atan2(self.x);
        [theta / PI, (PI / 2.0 - theta) / PI, 0.25, 0.25]
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::UNIT
    }
}


/// All distinct non-zero labels, in ascending order.
pub fn find_all_labels(image: &impl LabelImage) -> Vec<u32> {
    let mut labels = BTreeSet::new();

    for y in 0..image.height() {
        for x in 0..image.width() {
            labels.insert(image.label(x, y));
        }
    }

    labels.remove(&0);
    labels.into_iter().collect()
}

/// Number of pixels of each of the specified labels.
pub fn pixel_count(image: &impl LabelImage, labels: &[u32]) -> Vec<usize> {
    let indices = label_indices(labels);
    let mut counts = vec![0; labels.len()];

    for y in 0..image.height() {
        for x in 0..image.width() {
            if let Some(&index) = indices.get(&image.label(x, y)) {
                counts[index] += 1;
            }
        }
    }

    counts
}

/// Area, perimeter and shape factors of every region in the image,
/// with the perimeter computed by `CroftonLutPerimeter`.
pub fn region_shapes(
    image: &impl LabelImage, resolution: Resolution, directions: CroftonDirections
) -> Vec<RegionShape> {
    let labels = find_all_labels(image);
    let areas = Area.measure(image, &labels, resolution);
    let perimeters = CroftonLutPerimeter { directions }.measure(image, &labels, resolution);

    labels.iter().zip(areas).zip(perimeters)
        .map(|((&label, area), perimeter)| {
            let circularity = (4.0 * PI * area / (perimeter * perimeter)).min(1.0);
            RegionShape { label, area, perimeter, circularity, elongation: 1.0 / circularity }
        })
        .collect()
}

/// Inertia ellipse of every region in the image.
pub fn inertia_ellipses(image: &impl LabelImage) -> Vec<InertiaEllipse> {
    let labels = find_all_labels(image);
    let indices = label_indices(&labels);

    let mut counts = vec![0_usize; labels.len()];
    let mut sum_x = vec![0.0; labels.len()];
    let mut sum_y = vec![0.0; labels.len()];

    for y in 0..image.height() {
        for x in 0..image.width() {
            if let Some(&index) = indices.get(&image.label(x, y)) {
                counts[index] += 1;
                sum_x[index] += x as f64;
                sum_y[index] += y as f64;
            }
        }
    }

    let centers: Vec<(f64, f64)> = (0..labels.len())
        .map(|index| (sum_x[index] / counts[index] as f64, sum_y[index] / counts[index] as f64))
        .collect();

    let mut moments = vec![(0.0, 0.0, 0.0); labels.len()];
    for y in 0..image.height() {
        for x in 0..image.width() {
            if let Some(&index) = indices.get(&image.label(x, y)) {
                let dx = x as f64 - centers[index].0;
                let dy = y as f64 - centers[index].1;

                let (xx, xy, yy) = &mut moments[index];
                *xx += dx * dx;
                *xy += dx * dy;
                *yy += dy * dy;
            }
        }
    }

    labels.iter().enumerate().map(|(index, &label)| {
        let count = counts[index] as f64;
        let (xx, xy, yy) = moments[index];

        // a pixel is a unit square, whose own variance is 1/12 per axis
        let xx = xx / count + 1.0 / 12.0;
        let xy = xy / count;
        let yy = yy / count + 1.0 / 12.0;

        let common = ((xx - yy) * (xx - yy) + 4.0 * xy * xy).sqrt();

        InertiaEllipse {
            label,
            center_x: centers[index].0 + 0.5,
            center_y: centers[index].1 + 0.5,
            major_radius: std::f64::consts::SQRT_2 * (xx + yy + common).sqrt(),
            minor_radius: std::f64::consts::SQRT_2 * (xx + yy - common).max(0.0).sqrt(),
            orientation: ((2.0 * xy).atan2(xx - yy) / 2.0).to_degrees(),
        }
    })
    .collect()
}


impl LabelMeasurement for Area {
    fn measure(&self, image: &impl LabelImage, labels: &[u32], resolution: Resolution) -> Vec<f64> {
        pixel_count(image, labels).into_iter()
            .map(|count| count as f64 * resolution.pixel_area())
            .collect()
    }
}

impl LabelMeasurement for CroftonPerimeter {
    fn measure(&self, image: &impl LabelImage, labels: &[u32], resolution: Resolution) -> Vec<f64> {
        let d1 = resolution.x;
        let d2 = resolution.y;
        let d12 = resolution.diagonal();
        let pixel_area = resolution.pixel_area();
        let weights = resolution.direction_weights();

        labels.iter().map(|&label| {
            let horizontal = count_horizontal_transitions(image, label);
            let vertical = count_vertical_transitions(image, label);

            match self.directions {
                CroftonDirections::Two => {
                    if self.log_direction_counts {
                        log::debug!("label {}: horizontal n={}, vertical n={}", label, horizontal, vertical);
                    }

                    (horizontal as f64 * d2 + vertical as f64 * d1) * PI / 4.0
                },

                CroftonDirections::Four => {
                    let diagonal = count_diagonal_transitions(image, label);
                    let anti_diagonal = count_anti_diagonal_transitions(image, label);

                    let weighted = [
                        horizontal as f64 * (pixel_area / d1) * weights[0],
                        vertical as f64 * (pixel_area / d2) * weights[1],
                        diagonal as f64 * (pixel_area / d12) * weights[2],
                        anti_diagonal as f64 * (pixel_area / d12) * weights[3],
                    ];

                    if self.log_direction_counts {
                        let counts = [horizontal, vertical, diagonal, anti_diagonal];
                        for (direction, (count, weighted)) in counts.iter().zip(&weighted).enumerate() {
                            log::debug!("label {}: dir {}, n={}, wd={:5.2}", label, direction + 1, count, weighted);
                        }
                    }

                    weighted.iter().sum::<f64>() * PI / 2.0
                },
            }
        })
        .collect()
    }
}

impl LabelMeasurement for CroftonLutPerimeter {
    fn measure(&self, image: &impl LabelImage, labels: &[u32], resolution: Resolution) -> Vec<f64> {
        let indices = label_indices(labels);
        let lut = perimeter_lut(resolution, self.directions);
        let mut perimeters = vec![0.0; labels.len()];

        let width = image.width();
        let height = image.height();

        for y in 0 .. height.saturating_sub(1) {
            for x in 0 .. width.saturating_sub(1) {
                let tile = [
                    image.label(x, y), image.label(x + 1, y),
                    image.label(x, y + 1), image.label(x + 1, y + 1),
                ];

                for (position, &label) in tile.iter().enumerate() {
                    // each label of the tile contributes once, at its first occurrence
                    if label == 0 || tile[..position].contains(&label) {
                        continue;
                    }

                    if let Some(&index) = indices.get(&label) {
                        let configuration = tile.iter().enumerate()
                            .filter(|&(_, &other)| other == label)
                            .fold(0, |configuration, (bit, _)| configuration | (1 << bit));

                        perimeters[index] += lut[configuration];
                    }
                }
            }
        }

        perimeters
    }
}

/// Perimeter contribution of each of the 16 binary 2x2 configurations.
/// Bit 0 is the top left pixel, bit 1 top right, bit 2 bottom left, bit 3 bottom right.
fn perimeter_lut(resolution: Resolution, directions: CroftonDirections) -> [f64; 16] {
    let d1 = resolution.x;
    let d2 = resolution.y;
    let d12 = resolution.diagonal();
    let area = resolution.pixel_area();
    let weights = resolution.direction_weights();

    let mut lut = [0.0; 16];
    for (configuration, contribution) in lut.iter_mut().enumerate() {
        let inside = |x: usize, y: usize| configuration & (1 << (y * 2 + x)) != 0;

        for y in 0..2 {
            for x in 0..2 {
                if !inside(x, y) {
                    continue;
                }

                // halved to convert intersection counts to diameters
                let horizontal = if inside(1 - x, y) { 0.0 } else { (area / d1) / 2.0 };
                let vertical = if inside(x, 1 - y) { 0.0 } else { (area / d2) / 2.0 };

                *contribution += match directions {
                    // halved for the average and again for the multiplicity
                    CroftonDirections::Two => (horizontal + vertical) / 4.0,

                    CroftonDirections::Four => {
                        let diagonal = if inside(1 - x, 1 - y) { 0.0 } else { (area / d12) / 2.0 };
                        (horizontal / 2.0) * weights[0] + (vertical / 2.0) * weights[1] + diagonal * weights[2]
                    },
                };
            }
        }

        *contribution *= PI;
    }

    lut
}

fn label_indices(labels: &[u32]) -> HashMap<u32, usize> {
    labels.iter().enumerate().map(|(index, &label)| (label, index)).collect()
}

/// Number of times a line enters or leaves the label,
/// counting the image frame as outside.
fn count_line_transitions(mut line: impl Iterator<Item = u32>, label: u32) -> usize {
    let mut previous = match line.next() {
        Some(first) => first == label,
        None => return 0,
    };

    let mut count = previous as usize;
    for current in line {
        let current = current == label;
        if current != previous {
            count += 1;
        }

        previous = current;
    }

    count + previous as usize
}

fn count_horizontal_transitions(image: &impl LabelImage, label: u32) -> usize {
    (0..image.height())
        .map(|y| count_line_transitions((0..image.width()).map(|x| image.label(x, y)), label))
        .sum()
}

fn count_vertical_transitions(image: &impl LabelImage, label: u32) -> usize {
    (0..image.width())
        .map(|x| count_line_transitions((0..image.height()).map(|y| image.label(x, y)), label))
        .sum()
}

/// Lines running down and to the right, starting on the top row or the left column.
fn count_diagonal_transitions(image: &impl LabelImage, label: u32) -> usize {
    let width = image.width();
    let height = image.height();

    let starts = (0..width).map(|x| (x, 0)).chain((1..height).map(|y| (0, y)));
    starts.map(|(x0, y0)| {
        let length = (width - x0).min(height - y0);
        count_line_transitions((0..length).map(|j| image.label(x0 + j, y0 + j)), label)
    })
    .sum()
}

/// Lines running up and to the right, starting on the left column or the bottom row.
fn count_anti_diagonal_transitions(image: &impl LabelImage, label: u32) -> usize {
    let width = image.width();
    let height = image.height();

    if width == 0 || height == 0 {
        return 0;
    }

    let starts = (0..height).map(|y| (0, y))
        .chain((1..width).map(|x| (x, height - 1)));

    starts.map(|(x0, y0)| {
        let length = (width - x0).min(y0 + 1);
        count_line_transitions((0..length).map(|j| image.label(x0 + j, y0 - j)), label)
    })
    .sum()
}
