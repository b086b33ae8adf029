//! Causal neighbourhoods of the raster scans.

use crate::weights::{DIAGONAL, ORTHOGONAL};

/// A neighbour position relative to the current pixel,
/// along with the weight class of the step towards it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Offset {
    pub dx: isize,
    pub dy: isize,
    pub weight_class: usize,
}

impl Offset {
    pub const fn new(dx: isize, dy: isize, weight_class: usize) -> Self {
        Offset { dx, dy, weight_class }
    }

    /// Coordinates of the neighbour of `(x, y)`, if inside a `width * height` image.
    #[inline]
    pub fn neighbour(&self, x: usize, y: usize, width: usize, height: usize) -> Option<(usize, usize)> {
        let neighbour_x = x.checked_add_signed(self.dx)?;
        let neighbour_y = y.checked_add_signed(self.dy)?;

        if neighbour_x < width && neighbour_y < height {
            Some((neighbour_x, neighbour_y))
        }
        else {
            None
        }
    }
}

/// The halves of a neighbourhood that precede the current pixel
/// in forward (row-major) and backward (reverse row-major) scan order.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct NeighborMask {
    pub forward: &'static [Offset],
    pub backward: &'static [Offset],
}

impl NeighborMask {
    /// The 3x3 neighbourhood.
    /// Forward visits north-west, north, north-east, west,
    /// backward visits south-east, south, south-west, east.
    pub const CHAMFER_3X3: NeighborMask = NeighborMask {
        forward: &[
            Offset::new(-1, -1, DIAGONAL),
            Offset::new( 0, -1, ORTHOGONAL),
            Offset::new( 1, -1, DIAGONAL),
            Offset::new(-1,  0, ORTHOGONAL),
        ],

        backward: &[
            Offset::new( 1,  1, DIAGONAL),
            Offset::new( 0,  1, ORTHOGONAL),
            Offset::new(-1,  1, DIAGONAL),
            Offset::new( 1,  0, ORTHOGONAL),
        ],
    };

    /// Largest weight class index referenced by either half.
    pub fn max_weight_class(&self) -> usize {
        self.forward.iter().chain(self.backward)
            .map(|offset| offset.weight_class)
            .max().unwrap_or(0)
    }
}
