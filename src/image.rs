/// A decoded raster image, as produced by the rasterizer or read from a PNG.
#[derive(Clone)]
pub struct Image {
    pub(crate) format: PixelFormat,
    width: u32,
    height: u32,
    pub(crate) data: Box<[u8]>,
}

impl Image {
    /// Creates a new image with all pixel data set to zero.
    ///
    /// # Panics
    ///
    /// Panics if the pixel data would exceed `MAX_DATA_BYTES`; use
    /// [`try_new`](#method.try_new) for dimensions read from a file.
    pub fn new(format: PixelFormat, width: u32, height: u32) -> Image {
        match Image::try_new(format, width, height) {
            Some(image) => image,
            None => panic!("{}x{} image exceeds the pixel data limit",
                           width,
                           height),
        }
    }

    /// Creates a new image with all pixel data set to zero, or returns
    /// `None` if the pixel data would exceed `MAX_DATA_BYTES`.
    pub fn try_new(format: PixelFormat,
                   width: u32,
                   height: u32)
                   -> Option<Image> {
        let data_bytes = data_length(format, width, height)?;
        Some(Image {
            format,
            width,
            height,
            data: vec![0u8; data_bytes].into_boxed_slice(),
        })
    }

    /// Creates an RGBA image from premultiplied RGBA pixel data, such as the
    /// contents of a rendered pixmap.  Returns `None` if the data length does
    /// not match the dimensions, or if the image would exceed
    /// `MAX_DATA_BYTES`.
    pub fn from_premultiplied_rgba(width: u32,
                                   height: u32,
                                   premultiplied: &[u8])
                                   -> Option<Image> {
        let mut image = Image::try_new(PixelFormat::RGBA, width, height)?;
        if premultiplied.len() != image.data.len() {
            return None;
        }
        for (dst, src) in image
            .data
            .chunks_exact_mut(4)
            .zip(premultiplied.chunks_exact(4))
        {
            let alpha = src[3];
            if alpha == 0 {
                continue;
            }
            for channel in 0..3 {
                dst[channel] = demultiply(src[channel], alpha);
            }
            dst[3] = alpha;
        }
        Some(image)
    }

    /// Creates a copy of this image using the RGBA pixel format (that is,
    /// `foo.to_rgba().pixel_format()` will always return `PixelFormat::RGBA`).
    /// If the source image is already in RGBA format, this is equivalant to
    /// simply calling `clone()`.
    pub fn to_rgba(&self) -> Image {
        let rgba_data = match self.format {
            PixelFormat::RGBA => self.data.clone(),
            PixelFormat::RGB => rgb_to_rgba(&self.data),
            PixelFormat::GrayAlpha => gray_alpha_to_rgba(&self.data),
            PixelFormat::Gray => gray_to_rgba(&self.data),
        };
        Image {
            format: PixelFormat::RGBA,
            width: self.width,
            height: self.height,
            data: rgba_data,
        }
    }

    /// Returns the format in which this image's pixel data is stored.
    pub fn pixel_format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns a reference to the image's pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a mutable reference to the image's pixel data.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// A format for storing pixel data in an image.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PixelFormat {
    /// 32-bit color with alpha channel.
    RGBA,
    /// 24-bit color with no alpha.
    RGB,
    /// 16-bit grayscale with alpha channel.
    GrayAlpha,
    /// 8-bit grayscale with no alpha.
    Gray,
}

impl PixelFormat {
    /// Returns the number of bits needed to store a single pixel in this
    /// format.
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            PixelFormat::RGBA => 32,
            PixelFormat::RGB => 24,
            PixelFormat::GrayAlpha => 16,
            PixelFormat::Gray => 8,
        }
    }
}

/// The largest pixel buffer an image may hold (64 MiB, enough for a
/// 4096x4096 RGBA image).
pub const MAX_DATA_BYTES: usize = 64 * 1024 * 1024;

/// Returns the number of bytes of pixel data for the given dimensions, or
/// `None` if it overflows or exceeds `MAX_DATA_BYTES`.
fn data_length(format: PixelFormat, width: u32, height: u32) -> Option<usize> {
    let data_bits = (format.bits_per_pixel() as usize)
        .checked_mul(width as usize)?
        .checked_mul(height as usize)?;
    let data_bytes = data_bits.checked_add(7)? / 8;
    if data_bytes > MAX_DATA_BYTES { None } else { Some(data_bytes) }
}

fn demultiply(value: u8, alpha: u8) -> u8 {
    let straight = (u32::from(value) * 255 + u32::from(alpha) / 2) /
                   u32::from(alpha);
    straight.min(255) as u8
}

/// Converts RGB image data into RGBA.
fn rgb_to_rgba(rgb: &[u8]) -> Box<[u8]> {
    assert_eq!(rgb.len() % 3, 0);
    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
    for pixel in rgb.chunks_exact(3) {
        rgba.extend_from_slice(pixel);
        rgba.push(u8::MAX);
    }
    rgba.into_boxed_slice()
}

/// Converts grayscale-with-alpha image data into RGBA.
fn gray_alpha_to_rgba(gray_alpha: &[u8]) -> Box<[u8]> {
    assert_eq!(gray_alpha.len() % 2, 0);
    let mut rgba = Vec::with_capacity(gray_alpha.len() * 2);
    for pixel in gray_alpha.chunks_exact(2) {
        rgba.extend_from_slice(&[pixel[0], pixel[0], pixel[0], pixel[1]]);
    }
    rgba.into_boxed_slice()
}

/// Converts grayscale image data into RGBA.
fn gray_to_rgba(gray: &[u8]) -> Box<[u8]> {
    let mut rgba = Vec::with_capacity(gray.len() * 4);
    for &value in gray {
        rgba.extend_from_slice(&[value, value, value, u8::MAX]);
    }
    rgba.into_boxed_slice()
}
