use crate::foundation::color::{Rgba16, narrow16, widen8};
use crate::foundation::error::{GlitchError, GlitchResult};

/// Axis-aligned pixel rectangle (`x`/`y` inclusive, `width`/`height` in pixels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square block of side `size` with its top-left corner at `(x, y)`.
    pub fn square(x: u32, y: u32, size: u32) -> Self {
        Self::new(x, y, size, size)
    }

    pub fn right(self) -> u64 {
        u64::from(self.x) + u64::from(self.width)
    }

    pub fn bottom(self) -> u64 {
        u64::from(self.y) + u64::from(self.height)
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(self, x: u32, y: u32) -> bool {
        x >= self.x && y >= self.y && u64::from(x) < self.right() && u64::from(y) < self.bottom()
    }
}

/// Pixel layout produced when a buffer leaves the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// 8-bit RGBA, alpha preserved.
    #[default]
    Rgba8,
    /// 8-bit RGB, alpha dropped.
    Rgb8,
    /// Native 16-bit RGBA.
    Rgba16,
}

/// Owned raster of straight-alpha [`Rgba16`] samples in row-major order.
///
/// `stride` is counted in `u16` lanes and may exceed `4 * width`; the padding lanes are never read
/// as pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u16>,
}

impl PixelBuffer {
    /// Fully transparent buffer with a tight stride.
    pub fn new(width: u32, height: u32) -> Self {
        let stride = (width as usize) * 4;
        Self {
            width,
            height,
            stride,
            data: vec![0; stride * height as usize],
        }
    }

    /// Fully transparent buffer whose rows are `stride` lanes apart.
    pub fn with_stride(width: u32, height: u32, stride: usize) -> GlitchResult<Self> {
        if stride < (width as usize) * 4 {
            return Err(GlitchError::Other(anyhow::anyhow!(
                "stride {stride} is narrower than {width} rgba16 pixels"
            )));
        }
        let len = stride
            .checked_mul(height as usize)
            .ok_or_else(|| GlitchError::Other(anyhow::anyhow!("pixel buffer size overflow")))?;
        Ok(Self {
            width,
            height,
            stride,
            data: vec![0; len],
        })
    }

    /// Wrap tightly packed RGBA16 lanes.
    pub fn from_rgba16(width: u32, height: u32, data: Vec<u16>) -> GlitchResult<Self> {
        let expected = expected_len(width, height)?;
        if data.len() != expected {
            return Err(GlitchError::Other(anyhow::anyhow!(
                "rgba16 buffer has {} lanes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            stride: (width as usize) * 4,
            data,
        })
    }

    /// Widen tightly packed RGBA8 bytes (`v << 8 | v` per channel).
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> GlitchResult<Self> {
        let expected = expected_len(width, height)?;
        if bytes.len() != expected {
            return Err(GlitchError::Other(anyhow::anyhow!(
                "rgba8 buffer has {} bytes, expected {expected} for {width}x{height}",
                bytes.len()
            )));
        }
        let data = bytes.iter().copied().map(widen8).collect();
        Self::from_rgba16(width, height, data)
    }

    /// Convert any decoded image. 8-bit sources are widened by byte replication, 16-bit sources
    /// keep their precision and missing alpha becomes opaque.
    pub fn from_image(img: &image::DynamicImage) -> Self {
        let rgba = img.to_rgba16();
        let (width, height) = rgba.dimensions();
        Self {
            width,
            height,
            stride: (width as usize) * 4,
            data: rgba.into_raw(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row pitch in `u16` lanes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> Rgba16 {
        let i = self.index(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub fn set(&mut self, x: u32, y: u32, px: Rgba16) {
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    /// The `width * 4` pixel lanes of row `y`.
    pub fn row(&self, y: u32) -> &[u16] {
        let start = (y as usize) * self.stride;
        &self.data[start..start + (self.width as usize) * 4]
    }

    /// `len` pixels of row `y` starting at column `x`.
    pub(crate) fn span(&self, x: u32, y: u32, len: u32) -> &[u16] {
        let start = self.index(x, y);
        &self.data[start..start + (len as usize) * 4]
    }

    pub(crate) fn span_mut(&mut self, x: u32, y: u32, len: u32) -> &mut [u16] {
        let start = self.index(x, y);
        &mut self.data[start..start + (len as usize) * 4]
    }

    /// Copy the samples of `rect` out in row-major order.
    pub fn read_rect(&self, rect: PixelRect) -> GlitchResult<Vec<Rgba16>> {
        self.check_rect(rect)?;
        let mut out = Vec::with_capacity((rect.width as usize) * (rect.height as usize));
        for y in rect.y..rect.y + rect.height {
            out.extend(
                self.span(rect.x, y, rect.width)
                    .chunks_exact(4)
                    .map(|p| [p[0], p[1], p[2], p[3]]),
            );
        }
        Ok(out)
    }

    /// Overwrite `rect` with row-major `pixels`.
    pub fn write_rect(&mut self, rect: PixelRect, pixels: &[Rgba16]) -> GlitchResult<()> {
        self.check_rect(rect)?;
        if pixels.len() != (rect.width as usize) * (rect.height as usize) {
            return Err(GlitchError::Other(anyhow::anyhow!(
                "write_rect expects {} pixels, got {}",
                (rect.width as usize) * (rect.height as usize),
                pixels.len()
            )));
        }
        for (row, y) in pixels
            .chunks_exact(rect.width as usize)
            .zip(rect.y..rect.y + rect.height)
        {
            let start = self.index(rect.x, y);
            let lanes = &mut self.data[start..start + (rect.width as usize) * 4];
            for (dst, px) in lanes.chunks_exact_mut(4).zip(row) {
                dst.copy_from_slice(px);
            }
        }
        Ok(())
    }

    /// Fill rows `y0..y1` (clamped to the buffer) with `px`.
    pub fn fill_rows(&mut self, y0: u32, y1: u32, px: Rgba16) {
        let y1 = y1.min(self.height);
        if y0 >= y1 || self.width == 0 {
            return;
        }
        let width_lanes = (self.width as usize) * 4;
        let start = (y0 as usize) * self.stride;
        let end = (y1 as usize) * self.stride;
        for row in self.data[start..end].chunks_mut(self.stride) {
            for lane in row[..width_lanes].chunks_exact_mut(4) {
                lane.copy_from_slice(&px);
            }
        }
    }

    /// Copy every pixel of `other`, which must have the same dimensions.
    pub fn copy_from(&mut self, other: &PixelBuffer) -> GlitchResult<()> {
        if self.width != other.width || self.height != other.height {
            return Err(GlitchError::Other(anyhow::anyhow!(
                "copy_from size mismatch: {}x{} <- {}x{}",
                self.width,
                self.height,
                other.width,
                other.height
            )));
        }
        if self.stride == other.stride {
            self.data.copy_from_slice(&other.data);
            return Ok(());
        }
        for y in 0..self.height {
            let start = (y as usize) * self.stride;
            let len = (self.width as usize) * 4;
            self.data[start..start + len].copy_from_slice(other.row(y));
        }
        Ok(())
    }

    /// Mutable rows, each exactly `width * 4` lanes.
    pub(crate) fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u16]> {
        let width_lanes = (self.width as usize) * 4;
        let stride = self.stride.max(1);
        self.data
            .chunks_mut(stride)
            .take(self.height as usize)
            .map(move |row| &mut row[..width_lanes])
    }

    /// Tightly packed RGBA8 bytes (high byte of each channel).
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity((self.width as usize) * (self.height as usize) * 4);
        for y in 0..self.height {
            out.extend(self.row(y).iter().map(|&v| narrow16(v)));
        }
        out
    }

    /// Convert to an `image` buffer in the requested format.
    pub fn to_image(&self, format: OutputFormat) -> image::DynamicImage {
        match format {
            OutputFormat::Rgba8 => {
                image::DynamicImage::ImageRgba8(image::RgbaImage::from_fn(
                    self.width,
                    self.height,
                    |x, y| image::Rgba(self.get(x, y).map(narrow16)),
                ))
            }
            OutputFormat::Rgb8 => {
                image::DynamicImage::ImageRgb8(image::RgbImage::from_fn(
                    self.width,
                    self.height,
                    |x, y| {
                        let [r, g, b, _] = self.get(x, y);
                        image::Rgb([narrow16(r), narrow16(g), narrow16(b)])
                    },
                ))
            }
            OutputFormat::Rgba16 => image::DynamicImage::ImageRgba16(image::ImageBuffer::from_fn(
                self.width,
                self.height,
                |x, y| image::Rgba(self.get(x, y)),
            )),
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize) * self.stride + (x as usize) * 4
    }

    fn check_rect(&self, rect: PixelRect) -> GlitchResult<()> {
        if rect.right() > u64::from(self.width) || rect.bottom() > u64::from(self.height) {
            return Err(GlitchError::Other(anyhow::anyhow!(
                "rect {rect:?} exceeds {}x{} buffer",
                self.width,
                self.height
            )));
        }
        Ok(())
    }
}

fn expected_len(width: u32, height: u32) -> GlitchResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| GlitchError::Other(anyhow::anyhow!("pixel buffer size overflow")))
}

#[cfg(test)]
#[path = "../../tests/unit/pixels/buffer.rs"]
mod tests;
