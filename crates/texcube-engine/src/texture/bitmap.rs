use std::path::Path;

use crate::error::{Error, Result};

const BYTES_PER_PIXEL: u32 = 4;

/// Byte order of a 32-bit pixel as produced by a decoder.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PixelLayout {
    /// `R, G, B, A` in memory. This is what the GPU texture expects.
    Rgba8,
    /// `B, G, R, A` in memory, as emitted by many native platform decoders.
    Bgra8,
}

/// Decoded 32-bit image held in CPU memory.
///
/// Rows are `stride` bytes apart; `stride` may exceed `width * 4` when the
/// source pads rows for alignment. Padding bytes are carried along untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    stride: u32,
    layout: PixelLayout,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Decodes an image file into an RGBA bitmap.
    ///
    /// A missing or unreadable file is [`Error::ImageNotFound`]; a file whose
    /// contents cannot be decoded is [`Error::Decode`].
    pub fn decode(path: &Path) -> Result<Self> {
        let not_found = |source| Error::ImageNotFound {
            path: path.to_path_buf(),
            source,
        };

        let reader = image::ImageReader::open(path)
            .map_err(not_found)?
            .with_guessed_format()
            .map_err(not_found)?;

        let rgba = reader
            .decode()
            .map_err(|source| Error::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgba8();

        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            stride: width * BYTES_PER_PIXEL,
            layout: PixelLayout::Rgba8,
            pixels: rgba.into_raw(),
        })
    }

    /// Wraps an externally decoded pixel buffer.
    ///
    /// `width` and `height` must be non-zero, `pixels` must hold at least
    /// `stride * height` bytes (extra bytes are dropped) and `stride` must fit
    /// a full row of `width` pixels.
    pub fn from_raw(
        width: u32,
        height: u32,
        stride: u32,
        layout: PixelLayout,
        mut pixels: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 {
            return Err(Error::invalid_argument("width", "bitmap has no columns"));
        }
        if height == 0 {
            return Err(Error::invalid_argument("height", "bitmap has no rows"));
        }
        let row_bytes = width
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or_else(|| Error::invalid_argument("width", format!("{width} overflows a row")))?;
        if stride < row_bytes {
            return Err(Error::invalid_argument(
                "stride",
                format!("{stride} bytes cannot hold {width} pixels"),
            ));
        }

        let len = stride as usize * height as usize;
        if pixels.len() < len {
            return Err(Error::invalid_argument(
                "pixels",
                format!("{} bytes given, {stride}x{height} needs {len}", pixels.len()),
            ));
        }
        pixels.truncate(len);

        Ok(Self {
            width,
            height,
            stride,
            layout,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes between the starts of consecutive rows.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Converts the bitmap to [`PixelLayout::Rgba8`].
    ///
    /// BGRA input gets bytes 0 and 2 of every pixel swapped; RGBA input is
    /// returned as is. The stride and any row padding are preserved.
    pub fn into_rgba(mut self) -> Self {
        if self.layout == PixelLayout::Bgra8 {
            swap_red_blue(&mut self.pixels, self.width, self.stride);
            self.layout = PixelLayout::Rgba8;
        }
        self
    }
}

fn swap_red_blue(pixels: &mut [u8], width: u32, stride: u32) {
    let row_bytes = (width * BYTES_PER_PIXEL) as usize;
    if row_bytes == 0 {
        return;
    }
    for row in pixels.chunks_exact_mut(stride as usize) {
        for px in row[..row_bytes].chunks_exact_mut(BYTES_PER_PIXEL as usize) {
            px.swap(0, 2);
        }
    }
}
