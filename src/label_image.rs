
/// Represents an image with each pixel holding a region label.
/// Label 0 is the background, every other value identifies a region.
/// Label images can be created from slices of labels
/// or piston images if the feature `image` is activated.
pub trait LabelImage {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    fn label(&self, x: usize, y: usize) -> u32;

    #[inline]
    fn is_background(&self, x: usize, y: usize) -> bool {
        self.label(x, y) == 0
    }
}

/// A label image which is described by a row-major slice with one label per pixel.
#[derive(Copy, Clone, Debug)]
pub struct LabelGrid<'b> {
    width: usize,
    height: usize,

    /// A row-major label vector with one entry per pixel.
    buffer: &'b [u32],
}


impl<'b> LabelGrid<'b> {
    /// Create a label grid viewing the buffer.
    /// The buffer must hold exactly `width * height` labels.
    pub fn from_slice(width: usize, height: usize, buffer: &'b [u32]) -> Self {
        debug_assert_eq!(buffer.len(), width * height, "Buffer dimension mismatch");
        LabelGrid { width, height, buffer }
    }

    pub fn as_slice(&self) -> &'b [u32] {
        self.buffer
    }
}

impl LabelImage for LabelGrid<'_> {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn label(&self, x: usize, y: usize) -> u32 {
        self.buffer[self.width * y + x]
    }
}

impl<I: LabelImage + ?Sized> LabelImage for &I {
    #[inline]
    fn width(&self) -> usize {
        (**self).width()
    }

    #[inline]
    fn height(&self) -> usize {
        (**self).height()
    }

    #[inline]
    fn label(&self, x: usize, y: usize) -> u32 {
        (**self).label(x, y)
    }
}

/// Create label images from piston images.
#[cfg(feature = "image")]
pub mod piston_image {
    use image::*;
    use super::LabelImage;

    /// View a grey-scale piston image as a label image,
    /// using the intensity of each pixel as its label.
    pub fn of_luma_image<P, C>(image: &ImageBuffer<Luma<P>, C>) -> LumaLabels<'_, P, C>
        where P: 'static + Primitive + Into<u32>, C: std::ops::Deref<Target = [P]>
    {
        LumaLabels { image }
    }

    /// A label image backed by a grey-scale piston image, such as
    /// `GrayImage` or `ImageBuffer<Luma<u16>, Vec<u16>>`.
    pub struct LumaLabels<'i, P: 'static + Primitive, Container> {
        image: &'i ImageBuffer<Luma<P>, Container>,
    }

    impl<'i, P, C> LabelImage for LumaLabels<'i, P, C>
        where P: 'static + Primitive + Into<u32>, C: std::ops::Deref<Target = [P]>
    {
        fn width(&self) -> usize {
            self.image.width() as usize
        }

        fn height(&self) -> usize {
            self.image.height() as usize
        }

        fn label(&self, x: usize, y: usize) -> u32 {
            self.image.get_pixel(x as u32, y as u32).0[0].into()
        }
    }

}
