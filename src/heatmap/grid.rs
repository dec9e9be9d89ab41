//! Cell grid laid over the frame

use crate::core::types::Vec2;

/// Row-major grid of square cells covering a frame, origin at the top-left
#[derive(Debug, Clone)]
pub struct Grid<T: Clone + Default> {
    pub cols: usize,
    pub rows: usize,
    pub cell_size: f32,
    cells: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    /// Grid just large enough to cover a `frame_width x frame_height` frame
    pub fn covering(frame_width: f32, frame_height: f32, cell_size: f32) -> Self {
        let cols = (frame_width / cell_size).ceil().max(1.0) as usize;
        let rows = (frame_height / cell_size).ceil().max(1.0) as usize;
        Self {
            cols,
            rows,
            cell_size,
            cells: vec![T::default(); cols * rows],
        }
    }

    /// Cell holding a frame position; positions outside the frame map to the nearest edge cell
    pub fn cell_of(&self, pos: Vec2) -> (usize, usize) {
        let col = (pos.x / self.cell_size).floor() as i64;
        let row = (pos.y / self.cell_size).floor() as i64;
        (
            col.clamp(0, self.cols as i64 - 1) as usize,
            row.clamp(0, self.rows as i64 - 1) as usize,
        )
    }

    /// Frame position of a cell's centre
    pub fn center_of(&self, col: usize, row: usize) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) * self.cell_size,
            (row as f32 + 0.5) * self.cell_size,
        )
    }

    /// Value of the cell holding a frame position
    pub fn at(&self, pos: Vec2) -> &T {
        let (col, row) = self.cell_of(pos);
        &self.cells[row * self.cols + col]
    }

    pub fn cell_mut(&mut self, col: usize, row: usize) -> Option<&mut T> {
        if col < self.cols && row < self.rows {
            Some(&mut self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }
}
