//! Binary occupancy raster.
//!
//! Stores one `u8` per cell (`1` = obstacle, `0` = free) in row-major order. Row `r` holds the
//! samples taken at the `r`-th y coordinate, column `c` those at the `c`-th x coordinate.

/// A square `resolution × resolution` occupancy raster.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OccupancyGrid {
    resolution: usize,
    data: Vec<u8>,
}

impl OccupancyGrid {
    /// Wraps row-major cell values. Returns `None` unless `data.len() == resolution²` and every
    /// cell is `0` or `1`.
    pub fn from_row_major(resolution: usize, data: Vec<u8>) -> Option<Self> {
        let len = resolution.checked_mul(resolution)?;
        if data.len() != len || data.iter().any(|&v| v > 1) {
            return None;
        }
        Some(Self { resolution, data })
    }

    pub(crate) fn from_cells(resolution: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), resolution * resolution);
        debug_assert!(data.iter().all(|&v| v <= 1));
        Self { resolution, data }
    }

    /// Samples per axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Size as `(rows, cols)`.
    pub fn size(&self) -> (usize, usize) {
        (self.resolution, self.resolution)
    }

    /// Cell value, or `None` outside the raster.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.resolution || col >= self.resolution {
            return None;
        }
        Some(self.data[row * self.resolution + col])
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(1)
    }

    /// One raster row. Panics if `row >= resolution`.
    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.resolution;
        &self.data[start..start + self.resolution]
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(self.resolution.max(1))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn occupied_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == 1).count()
    }

    pub fn free_count(&self) -> usize {
        self.data.len() - self.occupied_count()
    }

    /// Fraction of occupied cells in [0, 1].
    pub fn occupancy_ratio(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.occupied_count() as f64 / self.data.len() as f64
    }
}
