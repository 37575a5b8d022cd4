//! Grid model: cell coordinates and the local mirror of device LED state
//!
//! The device reports its LEDs as one flat row-major sequence. Every conversion
//! between a flat index and a `(row, col)` pair goes through
//! [`Coordinate::to_index`] and [`Coordinate::from_index`].

use std::fmt;

use crate::color::Color;
use crate::error::{Error, Result};

/// Side length of the physical LED matrix
pub const DEFAULT_GRID_SIZE: usize = 8;

/// Largest side length a grid may have
pub const MAX_GRID_SIZE: usize = 64;

/// A cell address. `row` is vertical, `col` horizontal, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major linear index in a grid with `size` columns
    pub const fn to_index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Inverse of [`Coordinate::to_index`]
    pub const fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: index / size,
            col: index % size,
        }
    }

    pub const fn is_within(self, size: usize) -> bool {
        self.row < size && self.col < size
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// N×N grid of colors. Every cell always holds a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    size: usize,
    cells: Vec<Color>,
}

impl GridState {
    /// Create a `size`×`size` grid with every cell set to [`Color::OFF`].
    pub fn new(size: usize) -> Self {
        Self::filled(size, Color::OFF)
    }

    /// Create a `size`×`size` grid with every cell set to `color`.
    ///
    /// `size` is capped at [`MAX_GRID_SIZE`].
    pub fn filled(size: usize, color: Color) -> Self {
        let size = if size > MAX_GRID_SIZE {
            tracing::warn!("Grid size {} exceeds {}, capping", size, MAX_GRID_SIZE);
            MAX_GRID_SIZE
        } else {
            size
        };
        Self {
            size,
            cells: vec![color; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (`size * size`)
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.is_within(self.size)
    }

    /// Color at `coord`.
    ///
    /// # Panics
    /// If `coord` is outside the grid, like slice indexing. Use
    /// [`GridState::try_get`] for untrusted coordinates.
    pub fn get(&self, coord: Coordinate) -> Color {
        assert!(
            self.contains(coord),
            "coordinate {coord} outside {0}x{0} grid",
            self.size
        );
        self.cells[coord.to_index(self.size)]
    }

    pub fn try_get(&self, coord: Coordinate) -> Result<Color> {
        self.check(coord)?;
        Ok(self.cells[coord.to_index(self.size)])
    }

    /// Set a single cell.
    pub fn set(&mut self, coord: Coordinate, color: Color) -> Result<()> {
        self.check(coord)?;
        let index = coord.to_index(self.size);
        self.cells[index] = color;
        Ok(())
    }

    /// Replace every cell from a row-major sequence.
    ///
    /// The grid is left untouched if the length is not `size * size`.
    pub fn replace_all(&mut self, colors: &[Color]) -> Result<()> {
        self.merge_from(colors, |_| false).map(|_| ())
    }

    /// Copy cells from a row-major sequence, leaving alone every cell for which
    /// `skip` returns true. Returns how many cells changed color.
    pub fn merge_from<F>(&mut self, colors: &[Color], skip: F) -> Result<usize>
    where
        F: Fn(Coordinate) -> bool,
    {
        if colors.len() != self.cells.len() {
            return Err(Error::dimension_mismatch(self.cells.len(), colors.len()));
        }

        let mut changed = 0;
        for (index, &color) in colors.iter().enumerate() {
            let coord = Coordinate::from_index(index, self.size);
            if skip(coord) {
                continue;
            }
            let cell = &mut self.cells[index];
            if *cell != color {
                *cell = color;
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Row-major view of all cells
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Iterate `(coordinate, color)` pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Color)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (Coordinate::from_index(i, size), c))
    }

    fn check(&self, coord: Coordinate) -> Result<()> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(Error::out_of_bounds(coord.row, coord.col, self.size))
        }
    }
}

impl Default for GridState {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}
