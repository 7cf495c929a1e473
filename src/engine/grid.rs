use std::fmt;

use rand::Rng;

use crate::foundation::error::{GlitchError, GlitchResult};

/// Fixed-size block tiling of an image. Trailing partial rows and columns are outside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockGrid {
    pub blocks_x: u32,
    pub blocks_y: u32,
    pub block_size: u32,
}

impl BlockGrid {
    pub fn new(width: u32, height: u32, block_size: u32) -> GlitchResult<Self> {
        if block_size == 0 {
            return Err(GlitchError::configuration("block size must be > 0"));
        }
        let grid = Self {
            blocks_x: width / block_size,
            blocks_y: height / block_size,
            block_size,
        };
        if grid.total() == 0 {
            return Err(GlitchError::image_too_small(format!(
                "{width}x{height} holds no {block_size}px block"
            )));
        }
        Ok(grid)
    }

    pub fn total(self) -> u64 {
        u64::from(self.blocks_x) * u64::from(self.blocks_y)
    }

    /// Top-left pixel of block `b` (row-major block index).
    pub fn block_origin(self, b: u64) -> (u32, u32) {
        let bx = u64::from(self.blocks_x);
        let bs = u64::from(self.block_size);
        (((b % bx) * bs) as u32, ((b / bx) * bs) as u32)
    }

    /// Pixel rows `y0..y1` covered by the blocks of `seg`.
    pub fn row_stripe(self, seg: Segment) -> (u32, u32) {
        let bx = u64::from(self.blocks_x);
        let bs = u64::from(self.block_size);
        let first = seg.start / bx;
        let last = (seg.end() - 1) / bx;
        ((first * bs) as u32, ((last + 1) * bs) as u32)
    }

    /// Reject grids on which even the smallest segment would be empty.
    pub fn check_min_segment(self, min_fraction: f64) -> GlitchResult<()> {
        if (self.total() as f64) * min_fraction < 1.0 {
            return Err(GlitchError::image_too_small(format!(
                "{} blocks x min segment {min_fraction} is below one block",
                self.total()
            )));
        }
        Ok(())
    }
}

/// Contiguous block range `[start, start + count)` plus the source shift of the first stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub start: u64,
    pub count: u64,
    pub shift: u64,
}

impl Segment {
    pub fn end(self) -> u64 {
        self.start + self.count
    }

    /// Source block feeding destination block `b` at stage `stage`.
    pub fn source_block(self, grid: BlockGrid, b: u64, stage: usize) -> u64 {
        if stage == 0 {
            (b + self.shift) % grid.total()
        } else {
            b
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

/// Draw this iteration's segment. `Ok(None)` means the drawn fraction rounded down to zero blocks.
pub fn select_segment<R: Rng + ?Sized>(
    rng: &mut R,
    grid: BlockGrid,
    min_fraction: f64,
    max_fraction: f64,
) -> GlitchResult<Option<Segment>> {
    grid.check_min_segment(min_fraction)?;

    let total = grid.total();
    let p = (min_fraction + rng.random::<f64>() * (max_fraction - min_fraction)).min(max_fraction);
    let count = ((total as f64 * p) as u64).min(total);
    if count == 0 {
        return Ok(None);
    }

    let start = rng.random_range(0..=total - count);
    let shift = if rng.random_bool(0.5) {
        rng.random_range(0..total)
    } else {
        0
    };
    Ok(Some(Segment {
        start,
        count,
        shift,
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/engine/grid.rs"]
mod tests;
