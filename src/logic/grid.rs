use chrono::{DateTime, Utc};

use crate::models::{
    field::{Field, FieldCell},
    grid::{Cell, DenseGrid, Planting},
    Matrix,
};

/// Rebuilds the dense editing grid of a field from its persisted cell list.
///
/// Positions missing from the list become empty cells. Entries outside the
/// field's extents are dropped; when a position appears more than once the
/// first entry wins.
pub fn reconcile(field: &Field) -> DenseGrid {
    let mut slots: Matrix<Option<Cell>> = vec![vec![None; field.cols]; field.rows];

    for stored in &field.grid {
        let (Ok(row), Ok(col)) = (usize::try_from(stored.row), usize::try_from(stored.col)) else {
            continue;
        };
        let Some(slot) = slots.get_mut(row).and_then(|r| r.get_mut(col)) else {
            continue;
        };
        if slot.is_none() {
            *slot = Some(Cell {
                row,
                col,
                planting: stored.flower_id.as_ref().map(|id| Planting {
                    flower_id: id.clone(),
                    planted_at: stored.planted_at,
                }),
            });
        }
    }

    let cells = slots
        .into_iter()
        .enumerate()
        .map(|(r, row)| {
            row.into_iter()
                .enumerate()
                .map(|(c, slot)| slot.unwrap_or_else(|| Cell::empty(r, c)))
                .collect()
        })
        .collect();

    DenseGrid {
        rows: field.rows,
        cols: field.cols,
        cells,
    }
}

/// Places or removes the selected flower at (row, col).
///
/// Tapping a cell that already holds the selected flower empties it; any other
/// cell receives the flower planted at `now`, replacing a previous occupant.
/// Without a selection, or outside the grid, the result equals the input.
pub fn toggle(
    grid: &DenseGrid,
    row: usize,
    col: usize,
    selected: Option<&str>,
    now: DateTime<Utc>,
) -> DenseGrid {
    let mut next = grid.clone();
    let Some(selected) = selected else {
        return next;
    };
    if let Some(cell) = next.get_mut(row, col) {
        let holds_selected = cell.flower_id() == Some(selected);
        cell.planting = if holds_selected {
            None
        } else {
            Some(Planting {
                flower_id: selected.to_string(),
                planted_at: Some(now),
            })
        };
    }
    next
}

/// Empties every cell.
pub fn clear(grid: &DenseGrid) -> DenseGrid {
    let mut next = grid.clone();
    for cell in next.cells.iter_mut().flat_map(|r| r.iter_mut()) {
        cell.planting = None;
    }
    next
}

/// Row-major list of every cell, occupied or not, ready to persist.
pub fn flatten(grid: &DenseGrid) -> Vec<FieldCell> {
    grid.iter()
        .map(|cell| FieldCell {
            row: cell.row as i64,
            col: cell.col as i64,
            flower_id: cell.planting.as_ref().map(|p| p.flower_id.clone()),
            planted_at: cell.planting.as_ref().and_then(|p| p.planted_at),
        })
        .collect()
}

/// Persisted form of a freshly created field.
pub fn empty_cells(rows: usize, cols: usize) -> Vec<FieldCell> {
    flatten(&DenseGrid::new(rows, cols))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::collections::HashSet;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn field(rows: usize, cols: usize, grid: Vec<FieldCell>) -> Field {
        Field {
            id: "f1".into(),
            name: "North Bed".into(),
            rows,
            cols,
            grid,
        }
    }

    fn planted(row: i64, col: i64, id: &str, ms: i64) -> FieldCell {
        FieldCell {
            row,
            col,
            flower_id: Some(id.into()),
            planted_at: Some(at(ms)),
        }
    }

    #[test]
    fn test_reconcile_empty_list_gives_full_grid() {
        let grid = reconcile(&field(3, 4, vec![]));
        assert_eq!(grid.cells.len(), 3);
        assert!(grid.cells.iter().all(|r| r.len() == 4));
        assert_eq!(grid.iter().count(), 12);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_reconcile_cells_carry_their_coordinates() {
        let grid = reconcile(&field(2, 3, vec![]));
        for (r, row) in grid.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                assert_eq!((cell.row, cell.col), (r, c));
            }
        }
    }

    #[test]
    fn test_reconcile_copies_persisted_planting() {
        let grid = reconcile(&field(2, 2, vec![planted(1, 0, "tulip", 1_000)]));
        let cell = grid.get(1, 0).unwrap();
        assert_eq!(cell.flower_id(), Some("tulip"));
        assert_eq!(cell.planting.as_ref().unwrap().planted_at, Some(at(1_000)));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_reconcile_drops_out_of_range_entries() {
        let grid = reconcile(&field(
            2,
            2,
            vec![
                planted(5, 0, "tulip", 1),
                planted(0, 2, "tulip", 1),
                planted(-1, 0, "tulip", 1),
                planted(1, 1, "rose", 1),
            ],
        ));
        assert_eq!(grid.iter().count(), 4);
        assert_eq!(grid.occupied_count(), 1);
        assert_eq!(grid.get(1, 1).unwrap().flower_id(), Some("rose"));
    }

    #[test]
    fn test_reconcile_first_duplicate_wins() {
        let grid = reconcile(&field(
            1,
            1,
            vec![planted(0, 0, "tulip", 1), planted(0, 0, "rose", 2)],
        ));
        assert_eq!(grid.get(0, 0).unwrap().flower_id(), Some("tulip"));
    }

    #[test]
    fn test_reconcile_ignores_time_without_flower() {
        let stray = FieldCell {
            row: 0,
            col: 0,
            flower_id: None,
            planted_at: Some(at(5)),
        };
        let grid = reconcile(&field(1, 1, vec![stray]));
        assert!(!grid.get(0, 0).unwrap().is_occupied());
    }

    #[test]
    fn test_flatten_of_reconcile_covers_every_position_once() {
        let sparse = vec![planted(1, 2, "tulip", 1), planted(9, 9, "rose", 1)];
        let cells = flatten(&reconcile(&field(3, 3, sparse)));
        assert_eq!(cells.len(), 9);
        let positions: HashSet<(i64, i64)> = cells.iter().map(|c| (c.row, c.col)).collect();
        let expected: HashSet<(i64, i64)> =
            (0..3).flat_map(|r| (0..3).map(move |c| (r, c))).collect();
        assert_eq!(positions, expected);
    }

    #[test]
    fn test_flatten_is_row_major() {
        let cells = flatten(&DenseGrid::new(2, 2));
        let order: Vec<(i64, i64)> = cells.iter().map(|c| (c.row, c.col)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_toggle_without_selection_is_noop() {
        let grid = DenseGrid::new(2, 2);
        assert_eq!(toggle(&grid, 0, 0, None, at(0)), grid);
    }

    #[test]
    fn test_toggle_places_selected_flower_with_time() {
        let grid = DenseGrid::new(2, 3);
        let now = at(42_000);
        let next = toggle(&grid, 0, 1, Some("tulip"), now);
        let cell = next.get(0, 1).unwrap();
        assert_eq!(cell.flower_id(), Some("tulip"));
        assert_eq!(cell.planting.as_ref().unwrap().planted_at, Some(now));
        // Input grid left untouched
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_toggle_same_flower_twice_removes() {
        let grid = DenseGrid::new(2, 2);
        let once = toggle(&grid, 1, 1, Some("tulip"), at(1));
        let twice = toggle(&once, 1, 1, Some("tulip"), at(2));
        assert_eq!(twice, grid);
    }

    #[test]
    fn test_toggle_other_flower_overwrites() {
        let grid = toggle(&DenseGrid::new(1, 1), 0, 0, Some("tulip"), at(1));
        let later = at(1) + Duration::seconds(30);
        let next = toggle(&grid, 0, 0, Some("rose"), later);
        let planting = next.get(0, 0).unwrap().planting.clone().unwrap();
        assert_eq!(planting.flower_id, "rose");
        assert_eq!(planting.planted_at, Some(later));
    }

    #[test]
    fn test_toggle_out_of_range_is_noop() {
        let grid = DenseGrid::new(2, 2);
        assert_eq!(toggle(&grid, 2, 0, Some("tulip"), at(0)), grid);
        assert_eq!(toggle(&grid, 0, 7, Some("tulip"), at(0)), grid);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut grid = DenseGrid::new(2, 2);
        for (r, c) in [(0, 0), (1, 1), (0, 1)] {
            grid = toggle(&grid, r, c, Some("tulip"), at(0));
        }
        assert_eq!(grid.occupied_count(), 3);
        let cleared = clear(&grid);
        assert_eq!(cleared, DenseGrid::new(2, 2));
        assert_eq!(grid.occupied_count(), 3);
    }

    #[test]
    fn test_empty_cells_matches_extents() {
        let cells = empty_cells(2, 3);
        assert_eq!(cells.len(), 6);
        assert!(cells.iter().all(|c| c.flower_id.is_none() && c.planted_at.is_none()));
    }

    #[test]
    fn test_planted_at_survives_flatten_and_reconcile() {
        let now = at(1_700_000_000_000);
        let grid = toggle(&DenseGrid::new(2, 3), 0, 1, Some("tulip"), now);
        let reloaded = reconcile(&field(2, 3, flatten(&grid)));
        assert_eq!(reloaded, grid);
    }
}
