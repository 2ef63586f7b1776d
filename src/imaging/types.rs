use std::borrow::Cow;
use std::path::Path;

use image::{DynamicImage, ImageBuffer, Rgba, Rgba32FImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::{error::Result, filters::FilterKind};

/// A pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Extent {
    /// Create an extent anchored at the origin
    pub fn new(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    /// Number of pixels covered
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Whether the extent covers no pixels at all
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether `other` lies entirely inside this extent
    pub fn contains(&self, other: &Extent) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && u64::from(other.x) + u64::from(other.width) <= u64::from(self.x) + u64::from(self.width)
            && u64::from(other.y) + u64::from(other.height) <= u64::from(self.y) + u64::from(self.height)
    }
}

/// The original photo, before any filter is applied
///
/// Owned by the caller; the renderer only ever reads it. Any pixel layout the `image`
/// crate decodes is accepted and converted to straight RGBA `f32` when rendered.
#[derive(Clone, Debug)]
pub struct SourceImage {
    image: DynamicImage,
}

impl SourceImage {
    /// Wrap a decoded image
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Decode a photo from disk (PNG or JPEG)
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let image = image::open(path.as_ref())?;
        Ok(Self { image })
    }

    /// Create a source from an 8-bit RGBA buffer
    pub fn from_rgba8(buffer: RgbaImage) -> Self {
        Self::new(DynamicImage::ImageRgba8(buffer))
    }

    /// Create a source already in the pipeline's working representation
    pub fn from_rgba32f(buffer: Rgba32FImage) -> Self {
        Self::new(DynamicImage::ImageRgba32F(buffer))
    }

    /// Create a source with the given dimensions filled with a single color
    pub fn new_filled(width: u32, height: u32, color: [f32; 4]) -> Self {
        let buffer = ImageBuffer::from_fn(width, height, |_, _| Rgba(color));
        Self::from_rgba32f(buffer)
    }

    /// Get the width of the source
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Get the height of the source
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The source's pixel extent, anchored at the origin
    pub fn extent(&self) -> Extent {
        Extent::new(self.width(), self.height())
    }

    /// Get the underlying decoded image
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// The source in straight RGBA `f32`
    ///
    /// Borrowed when the source is already stored that way, converted otherwise.
    pub fn to_working(&self) -> Cow<'_, Rgba32FImage> {
        match &self.image {
            DynamicImage::ImageRgba32F(buffer) => Cow::Borrowed(buffer),
            other => Cow::Owned(other.to_rgba32f()),
        }
    }
}

impl From<DynamicImage> for SourceImage {
    fn from(image: DynamicImage) -> Self {
        Self::new(image)
    }
}

/// The output of one filter, cropped to the source's extent
#[derive(Clone, Debug)]
pub struct RenderedImage {
    filter: FilterKind,
    buffer: Rgba32FImage,
}

impl RenderedImage {
    pub fn new(filter: FilterKind, buffer: Rgba32FImage) -> Self {
        Self { filter, buffer }
    }

    /// Which operation produced this image
    pub fn filter(&self) -> FilterKind {
        self.filter
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn extent(&self) -> Extent {
        Extent::new(self.width(), self.height())
    }

    /// Get a pixel at the given coordinates as straight RGBA
    pub fn get_pixel(&self, x: u32, y: u32) -> [f32; 4] {
        self.buffer.get_pixel(x, y).0
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &Rgba32FImage {
        &self.buffer
    }

    /// Take ownership of the underlying image buffer
    pub fn into_image(self) -> Rgba32FImage {
        self.buffer
    }

    /// Quantize to 8-bit RGBA for display or encoding
    pub fn to_rgba8(&self) -> RgbaImage {
        DynamicImage::ImageRgba32F(self.buffer.clone()).to_rgba8()
    }

    /// Save the image as a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), image::ImageError> {
        self.to_rgba8()
            .save_with_format(path, image::ImageFormat::Png)
    }
}
