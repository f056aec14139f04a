use crate::core::prelude::*;
use crate::util::assert::check;
use crate::util::error::Result;
use serde::Serialize;
use std::ops::Index;

/// A scalar field sampled on a regular grid.
///
/// Cell `(row, col)` is sampled at the grid-local node `(col * h, row * h)`. Values are stored
/// row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceGrid {
    rows: usize,
    cols: usize,
    cell_size: f32,
    values: Vec<f32>,
}

impl DistanceGrid {
    /// A grid covering a `width` x `height` canvas with cells of size `cell_size`, every cell
    /// initialised to [`DISTANCE_SENTINEL`].
    ///
    /// # Errors
    /// [`GeometryError::InvalidGrid`] unless `cell_size` is finite and positive and both extents
    /// are finite and non-negative.
    pub fn new(width: f32, height: f32, cell_size: f32) -> Result<Self> {
        let valid = cell_size.is_finite()
            && cell_size > 0.
            && width.is_finite()
            && width >= 0.
            && height.is_finite()
            && height >= 0.;
        if !valid {
            return Err(GeometryError::InvalidGrid {
                width,
                height,
                cell_size,
            });
        }
        #[allow(clippy::cast_sign_loss)]
        let rows = (height / cell_size).ceil() as usize;
        #[allow(clippy::cast_sign_loss)]
        let cols = (width / cell_size).ceil() as usize;
        Ok(Self {
            rows,
            cols,
            cell_size,
            values: vec![DISTANCE_SENTINEL; rows * cols],
        })
    }

    /// Wraps caller-provided samples, e.g. to extract contours from a field computed elsewhere.
    ///
    /// # Errors
    /// [`GeometryError::InvalidGrid`] if `values` does not hold `rows * cols` samples or the cell
    /// size is not finite and positive.
    pub fn from_values(rows: usize, cols: usize, cell_size: f32, values: Vec<f32>) -> Result<Self> {
        if values.len() != rows * cols || !cell_size.is_finite() || cell_size <= 0. {
            return Err(GeometryError::InvalidGrid {
                width: cols as f32 * cell_size,
                height: rows as f32 * cell_size,
                cell_size,
            });
        }
        Ok(Self {
            rows,
            cols,
            cell_size,
            values,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }
    pub fn values(&self) -> &[f32] {
        &self.values
    }
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.rows && col < self.cols {
            Some(self.values[row * self.cols + col])
        } else {
            None
        }
    }

    /// # Panics
    /// If `row` is out of range.
    pub fn row(&self, row: usize) -> &[f32] {
        check!(
            row < self.rows,
            format!("row {row} outside {}x{} grid", self.rows, self.cols)
        );
        &self.values[row * self.cols..(row + 1) * self.cols]
    }

    /// The cell whose node is nearest to `point`, clamped into the grid. `None` for an empty grid.
    pub fn cell_of(&self, point: Vec2) -> Option<(usize, usize)> {
        if self.rows == 0 || self.cols == 0 {
            return None;
        }
        let clamp = |coord: f32, len: usize| -> usize {
            let index = (coord / self.cell_size).round();
            if index.is_nan() || index <= 0. {
                0
            } else {
                (index as usize).min(len - 1)
            }
        };
        let row = clamp(point.y, self.rows);
        let col = clamp(point.x, self.cols);
        let in_range = |coord: f32, len: usize| {
            let index = (coord / self.cell_size).round();
            index >= 0. && index < len as f32
        };
        if !in_range(point.y, self.rows) || !in_range(point.x, self.cols) {
            debug!("distance field: clamped seed {point} to cell ({row}, {col})");
        }
        Some((row, col))
    }

    fn at_mut(&mut self, row: usize, col: usize) -> &mut f32 {
        &mut self.values[row * self.cols + col]
    }

    fn relax(&mut self, row: usize, col: usize, from_row: usize, from_col: usize) {
        let candidate = self[(from_row, from_col)] + self.cell_size;
        let cell = self.at_mut(row, col);
        *cell = cell.min(candidate);
    }

    /// Recomputes the field from scratch as the distance to the nearest of `seeds`.
    ///
    /// Seeds are snapped to their nearest node, and clamped into the grid if they fall outside
    /// it. Distances are relaxed along rows and columns in four sweeps, so the result is the
    /// Manhattan step distance between nodes rather than the Euclidean one. With no seeds, every
    /// cell stays at [`DISTANCE_SENTINEL`].
    ///
    /// # Examples
    ///
    /// ```
    /// use gjk2d::core::prelude::*;
    ///
    /// let mut grid = DistanceGrid::new(5.0, 5.0, 1.0).unwrap();
    /// grid.compute_distances(&[Vec2 { x: 2.0, y: 2.0 }]);
    /// assert_eq!(grid[(2, 2)], 0.0);
    /// assert_eq!(grid[(2, 3)], 1.0);
    /// assert_eq!(grid[(0, 0)], 4.0);
    /// ```
    pub fn compute_distances(&mut self, seeds: &[Vec2]) {
        self.values.fill(DISTANCE_SENTINEL);
        for &seed in seeds {
            if let Some((row, col)) = self.cell_of(seed) {
                *self.at_mut(row, col) = 0.;
            }
        }

        let (rows, cols) = (self.rows, self.cols);
        // (columns ascending, rows ascending) for each of the four sweeps.
        let sweeps = [(true, true), (false, true), (false, false), (true, false)];
        for (cols_up, rows_up) in sweeps {
            for col in ordered(cols, cols_up) {
                for row in ordered(rows, rows_up) {
                    if rows_up && row > 0 {
                        self.relax(row, col, row - 1, col);
                    }
                    if !rows_up && row + 1 < rows {
                        self.relax(row, col, row + 1, col);
                    }
                    if cols_up && col > 0 {
                        self.relax(row, col, row, col - 1);
                    }
                    if !cols_up && col + 1 < cols {
                        self.relax(row, col, row, col + 1);
                    }
                }
            }
        }
        trace!(
            "distance field: {} seed(s) over {}x{} cells",
            seeds.len(),
            rows,
            cols
        );
    }
}

fn ordered(len: usize, ascending: bool) -> Box<dyn Iterator<Item = usize>> {
    if ascending {
        Box::new(0..len)
    } else {
        Box::new((0..len).rev())
    }
}

impl Index<(usize, usize)> for DistanceGrid {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        check!(
            row < self.rows && col < self.cols,
            format!("cell ({row}, {col}) outside {}x{} grid", self.rows, self.cols)
        );
        &self.values[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_locally_consistent(grid: &DistanceGrid) {
        let h = grid.cell_size();
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let v = grid[(row, col)];
                assert!(v >= 0.);
                if row + 1 < grid.rows() {
                    let below = grid[(row + 1, col)];
                    assert!(v <= below + h && below <= v + h, "({row}, {col})");
                }
                if col + 1 < grid.cols() {
                    let right = grid[(row, col + 1)];
                    assert!(v <= right + h && right <= v + h, "({row}, {col})");
                }
            }
        }
    }

    #[test]
    fn dimensions_round_up() {
        let grid = DistanceGrid::new(500.0, 200.0, 30.0).unwrap();
        assert_eq!(grid.cols(), 17);
        assert_eq!(grid.rows(), 7);
        assert_eq!(grid.values().len(), 17 * 7);
        assert!(grid.values().iter().all(|&v| v == DISTANCE_SENTINEL));
    }

    #[test]
    fn invalid_cell_sizes() {
        for cell_size in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                DistanceGrid::new(10.0, 10.0, cell_size),
                Err(GeometryError::InvalidGrid { .. })
            ));
        }
        assert!(DistanceGrid::new(-1.0, 10.0, 1.0).is_err());
        assert!(DistanceGrid::from_values(2, 2, 1.0, vec![0.0; 3]).is_err());
    }

    #[test]
    fn single_seed_in_five_by_five() {
        let mut grid = DistanceGrid::new(5.0, 5.0, 1.0).unwrap();
        grid.compute_distances(&[Vec2 { x: 2.0, y: 2.0 }]);
        assert_eq!(grid[(2, 2)], 0.0);
        for (row, col) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
            assert_eq!(grid[(row, col)], 1.0);
        }
        for (row, col) in [(0, 0), (0, 4), (4, 0), (4, 4)] {
            assert_eq!(grid[(row, col)], 4.0);
        }
        assert_eq!(grid[(1, 1)], 2.0);
        assert_eq!(grid[(0, 2)], 2.0);
        assert_eq!(grid.row(0), &[4.0, 3.0, 2.0, 3.0, 4.0]);
        assert_locally_consistent(&grid);
    }

    #[test]
    fn distances_scale_with_cell_size() {
        let mut grid = DistanceGrid::new(50.0, 30.0, 10.0).unwrap();
        grid.compute_distances(&[Vec2 { x: 0.0, y: 0.0 }]);
        assert_eq!(grid[(2, 4)], 60.0);
        assert_eq!(grid.get(2, 4), Some(60.0));
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn seeds_snap_to_nearest_node_and_clamp() {
        let mut grid = DistanceGrid::new(5.0, 5.0, 1.0).unwrap();
        assert_eq!(grid.cell_of(Vec2 { x: 1.4, y: 2.6 }), Some((3, 1)));
        assert_eq!(grid.cell_of(Vec2 { x: -3.0, y: 100.0 }), Some((4, 0)));

        grid.compute_distances(&[Vec2 { x: 100.0, y: -100.0 }]);
        assert_eq!(grid[(0, 4)], 0.0);
        assert_eq!(grid[(4, 0)], 8.0);
    }

    #[test]
    fn duplicate_seeds_are_idempotent() {
        let mut once = DistanceGrid::new(8.0, 6.0, 1.0).unwrap();
        once.compute_distances(&[Vec2 { x: 3.0, y: 3.0 }]);
        let mut twice = DistanceGrid::new(8.0, 6.0, 1.0).unwrap();
        twice.compute_distances(&[Vec2 { x: 3.0, y: 3.0 }, Vec2 { x: 3.1, y: 2.9 }]);
        assert_eq!(once, twice);
    }

    #[test]
    fn recompute_starts_from_scratch() {
        let mut grid = DistanceGrid::new(5.0, 5.0, 1.0).unwrap();
        grid.compute_distances(&[Vec2::zero()]);
        grid.compute_distances(&[Vec2 { x: 4.0, y: 4.0 }]);
        assert_eq!(grid[(0, 0)], 8.0);
        assert_eq!(grid[(4, 4)], 0.0);

        grid.compute_distances(&[]);
        assert!(grid.values().iter().all(|&v| v == DISTANCE_SENTINEL));
    }

    #[test]
    fn random_seeds_are_locally_consistent() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mut grid = DistanceGrid::new(40.0, 25.0, 2.5).unwrap();
            let seeds = (0..rng.gen_range(1..6))
                .map(|_| Vec2 {
                    x: rng.gen_range(0.0..40.0),
                    y: rng.gen_range(0.0..25.0),
                })
                .collect_vec();
            grid.compute_distances(&seeds);
            for &seed in &seeds {
                let (row, col) = grid.cell_of(seed).unwrap();
                assert_eq!(grid[(row, col)], 0.0);
            }
            assert_locally_consistent(&grid);
        }
    }

    #[test]
    fn indexing_agrees_with_get() {
        let mut grid = DistanceGrid::new(2.0, 3.0, 1.0).unwrap();
        grid.compute_distances(&[Vec2 { x: 1.0, y: 0.0 }]);
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                assert_eq!(grid.get(row, col), Some(grid[(row, col)]));
            }
        }
        assert_eq!(grid.get(0, 3), None);
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    #[should_panic(expected = "cell (0, 3) outside 3x2 grid")]
    fn index_past_last_column_panics() {
        let mut grid = DistanceGrid::new(2.0, 3.0, 1.0).unwrap();
        grid.compute_distances(&[Vec2 { x: 1.0, y: 0.0 }]);
        // Would alias cell (1, 1) in row-major storage.
        let _ = grid[(0, 3)];
    }

    #[test]
    #[should_panic(expected = "row 3 outside 3x2 grid")]
    fn row_out_of_range_panics() {
        let grid = DistanceGrid::new(2.0, 3.0, 1.0).unwrap();
        let _ = grid.row(3);
    }

    #[test]
    fn empty_grid() {
        let mut grid = DistanceGrid::new(0.0, 0.0, 1.0).unwrap();
        assert_eq!(grid.cell_of(Vec2::zero()), None);
        grid.compute_distances(&[Vec2::zero()]);
        assert!(grid.values().is_empty());
    }
}
