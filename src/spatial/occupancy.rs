//! Canvas occupancy with constant-time box queries
//!
//! Occupied pixels are tracked in a bitset; a summed-area table over that
//! bitset answers "is this box entirely free" with four lookups. The table is
//! refreshed from the first touched row after every placement.

use crate::spatial::mask::Mask;
use bitvec::prelude::*;
use ndarray::Array2;

/// Occupied/free state for every canvas pixel
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    occupied: BitVec,
    /// Summed-area table, shape `(height + 1, width + 1)`
    integral: Array2<u32>,
}

impl OccupancyGrid {
    /// Grid with every pixel free
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            occupied: bitvec![0; width as usize * height as usize],
            integral: Array2::zeros((height as usize + 1, width as usize + 1)),
        }
    }

    /// Grid with every excluded mask pixel occupied
    pub fn from_mask(mask: &Mask) -> Self {
        let mut grid = Self::new(mask.width(), mask.height());
        for ((row, col), &value) in mask.pixels().indexed_iter() {
            if value != Mask::PAINTABLE {
                grid.set(col as u32, row as u32);
            }
        }
        grid.refresh_from(0);
        grid
    }

    /// Grid width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether pixel `(x, y)` is occupied; out-of-range pixels count as occupied
    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        self.index(x, y)
            .is_none_or(|idx| self.occupied.get(idx).as_deref() == Some(&true))
    }

    /// Number of occupied pixels
    pub fn occupied_count(&self) -> usize {
        self.occupied.count_ones()
    }

    /// Whether the `w` x `h` box with top-left corner `(x, y)` is inside the
    /// canvas and contains no occupied pixel
    pub fn region_is_free(&self, x: i64, y: i64, w: u32, h: u32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x0, y0) = (x as usize, y as usize);
        let (x1, y1) = (x0 + w as usize, y0 + h as usize);
        if x1 > self.width as usize || y1 > self.height as usize {
            return false;
        }

        let at = |row: usize, col: usize| u64::from(self.integral.get([row, col]).copied().unwrap_or(0));
        at(y1, x1) + at(y0, x0) == at(y0, x1) + at(y1, x0)
    }

    /// Mark every `true` cell of `footprint` occupied, placing its top-left
    /// corner at `(x, y)`
    ///
    /// Cells falling outside the canvas are ignored.
    pub fn occupy(&mut self, footprint: &Array2<bool>, x: i64, y: i64) {
        let mut first_row = None;
        for ((row, col), &filled) in footprint.indexed_iter() {
            if !filled {
                continue;
            }
            let (px, py) = (x + col as i64, y + row as i64);
            if px < 0 || py < 0 {
                continue;
            }
            if self.set(px as u32, py as u32) {
                first_row = Some(first_row.map_or(py as usize, |r: usize| r.min(py as usize)));
            }
        }
        if let Some(row) = first_row {
            self.refresh_from(row);
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    fn set(&mut self, x: u32, y: u32) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.occupied.set(idx, true);
                true
            }
            None => false,
        }
    }

    /// Recompute the summed-area table for rows at and below `start_row`
    fn refresh_from(&mut self, start_row: usize) {
        let width = self.width as usize;
        for row in start_row..self.height as usize {
            let mut row_sum = 0u32;
            for col in 0..width {
                if self
                    .occupied
                    .get(row * width + col)
                    .as_deref()
                    .copied()
                    .unwrap_or(false)
                {
                    row_sum += 1;
                }
                let above = self.integral.get([row, col + 1]).copied().unwrap_or(0);
                if let Some(cell) = self.integral.get_mut([row + 1, col + 1]) {
                    *cell = above + row_sum;
                }
            }
        }
    }
}
