// lumen_core/src/raster.rs

use crate::error::RasterError;

/// One RGBA8 pixel.
pub type Rgba = [u8; 4];

/// The static background image the agent drives over.
///
/// Pixels are stored row-major as RGBA8, starting at the top-left corner.
/// The buffer is built once after the image is decoded and is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Wraps decoded RGBA8 bytes. The length must be exactly `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self, RasterError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(RasterError::DimensionMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A raster where every pixel has the same colour.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let data = color
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Builds a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgba) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Reads one pixel. Coordinates outside the raster yield `None`.
    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgba> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copies the `width` x `height` rectangle whose top-left corner is `(x, y)`.
    ///
    /// The rectangle may hang over the raster edge or miss it entirely. Elements
    /// that fall outside the raster are `None`; they are never filled with a
    /// colour, so callers can leave them out of any average instead of biasing
    /// it toward black. Elements whose coordinates would overflow `i64` are
    /// outside by definition.
    pub fn sample_region(&self, x: i64, y: i64, width: u32, height: u32) -> PixelRegion {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height as i64 {
            for col in 0..width as i64 {
                let px = match (x.checked_add(col), y.checked_add(row)) {
                    (Some(px), Some(py)) => self.pixel(px, py),
                    _ => None,
                };
                pixels.push(px);
            }
        }
        PixelRegion {
            origin: (x, y),
            width,
            height,
            pixels,
        }
    }
}

/// A rectangular copy of raster pixels, with out-of-bounds elements marked `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelRegion {
    /// Top-left corner of the region in raster coordinates.
    pub origin: (i64, i64),
    pub width: u32,
    pub height: u32,
    pixels: Vec<Option<Rgba>>,
}

impl PixelRegion {
    /// The element at column `col` and row `row` of the region.
    pub fn get(&self, col: u32, row: u32) -> Option<Rgba> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.pixels[row as usize * self.width as usize + col as usize]
    }

    /// Iterates `(col, row, pixel)` over every element, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, Option<Rgba>)> + '_ {
        let width = self.width.max(1) as usize;
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, px)| ((i % width) as u32, (i / width) as u32, *px))
    }

    /// Number of elements that landed inside the raster.
    pub fn in_bounds_count(&self) -> usize {
        self.pixels.iter().filter(|px| px.is_some()).count()
    }
}
