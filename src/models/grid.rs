use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Matrix;

/// A flower placed in a slot. `planted_at` is `None` only for legacy
/// documents that stored a flower without a planting time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planting {
    pub flower_id: String,
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub planted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub planting: Option<Planting>,
}

impl Cell {
    pub fn empty(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            planting: None,
        }
    }

    pub fn flower_id(&self) -> Option<&str> {
        self.planting.as_ref().map(|p| p.flower_id.as_str())
    }

    pub fn is_occupied(&self) -> bool {
        self.planting.is_some()
    }
}

/// Row-major, in-memory view of a field used while editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseGrid {
    pub rows: usize,
    pub cols: usize,
    pub cells: Matrix<Cell>,
}

impl DenseGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        let cells = (0..rows)
            .map(|row| (0..cols).map(|col| Cell::empty(row, col)).collect())
            .collect();
        Self { rows, cols, cells }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut(row).and_then(|r| r.get_mut(col))
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flat_map(|r| r.iter())
    }

    pub fn occupied_count(&self) -> usize {
        self.iter().filter(|c| c.is_occupied()).count()
    }
}
