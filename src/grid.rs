//! Grid pattern engine: row/column/diagonal geometry for square boards.
//!
//! Indices are 0-based and row-major (`index = row * dimension + col`).

use serde::Serialize;

use crate::board::Cell;
use crate::error::{HistoryError, Result};

/// Side lengths a board may have.
pub const SUPPORTED_DIMENSIONS: [usize; 3] = [3, 4, 5];

/// Index sets for every pattern on a grid of one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Combinations {
    pub rows: Vec<Vec<usize>>,
    pub cols: Vec<Vec<usize>>,
    pub diagonals: Vec<Vec<usize>>,
}

impl Combinations {
    /// All patterns, rows first, then columns, then the two diagonals.
    pub fn all(&self) -> impl Iterator<Item = &[usize]> {
        self.rows
            .iter()
            .chain(&self.cols)
            .chain(&self.diagonals)
            .map(Vec::as_slice)
    }
}

/// Map a cell count to its grid dimension.
pub fn dimension_for(cell_count: usize) -> Result<usize> {
    match cell_count {
        9 => Ok(3),
        16 => Ok(4),
        25 => Ok(5),
        _ => {
            tracing::warn!("Unsupported grid size: {} cells", cell_count);
            Err(HistoryError::UnsupportedGridSize { cell_count })
        }
    }
}

/// Row, column and diagonal index sets for `dimension`.
///
/// Columns come out in rotated order: `cols[j]` holds every index `i` with
/// `(i + j) % dimension == 0`, so column 0 is first and the remaining
/// columns follow from the rightmost leftwards. Callers zip this order
/// positionally, so it must not be "fixed".
pub fn combinations_for(dimension: usize) -> Result<Combinations> {
    if !SUPPORTED_DIMENSIONS.contains(&dimension) {
        return Err(HistoryError::UnsupportedGridSize {
            cell_count: dimension * dimension,
        });
    }

    let size = dimension * dimension;

    let rows = (0..dimension)
        .map(|i| (i * dimension..i * dimension + dimension).collect())
        .collect();

    let cols = (0..dimension)
        .map(|j| (0..size).filter(|i| (i + j) % dimension == 0).collect())
        .collect();

    let main_diagonal = (0..dimension).map(|k| k * (dimension + 1)).collect();
    let anti_diagonal = (1..=dimension).map(|k| k * (dimension - 1)).collect();

    Ok(Combinations {
        rows,
        cols,
        diagonals: vec![main_diagonal, anti_diagonal],
    })
}

/// Mark every checked cell that belongs to a fully checked pattern.
///
/// Marks accumulate: a cell already flagged `in_pattern` stays flagged even
/// if its pattern is no longer complete. Evaluate a fresh clone when a
/// past state is needed.
pub fn evaluate_pattern_membership(cells: &mut [Cell], dimension: usize) -> Result<()> {
    let combinations = combinations_for(dimension)?;
    ensure_len(cells, dimension)?;

    for pattern in combinations.all() {
        if pattern.iter().all(|&i| cells[i].is_checked()) {
            for &i in pattern {
                cells[i].in_pattern = true;
            }
        }
    }

    Ok(())
}

/// Number of patterns whose cells are all checked.
pub fn completed_pattern_count(cells: &[Cell], dimension: usize) -> Result<usize> {
    let combinations = combinations_for(dimension)?;
    ensure_len(cells, dimension)?;

    Ok(combinations
        .all()
        .filter(|pattern| pattern.iter().all(|&i| cells[i].is_checked()))
        .count())
}

/// Transpose a row-major slice: index `k` of the result holds original
/// index `(k % dimension) * dimension + k / dimension`.
///
/// `items` must hold exactly `dimension * dimension` elements.
pub fn to_column_major_order<T: Clone>(items: &[T], dimension: usize) -> Result<Vec<T>> {
    ensure_len(items, dimension)?;

    Ok((0..items.len())
        .map(|k| items[(k % dimension) * dimension + k / dimension].clone())
        .collect())
}

/// Main diagonal elements in order, followed by the anti-diagonal elements.
pub fn to_diagonal_order<T: Clone>(items: &[T], dimension: usize) -> Result<Vec<T>> {
    ensure_len(items, dimension)?;

    let main = (0..dimension).map(|k| k * (dimension + 1));
    let anti = (1..=dimension).map(|k| k * (dimension - 1));

    Ok(main.chain(anti).map(|i| items[i].clone()).collect())
}

fn ensure_len<T>(items: &[T], dimension: usize) -> Result<()> {
    let expected = dimension * dimension;
    if items.len() != expected {
        return Err(HistoryError::CellCountMismatch {
            expected,
            actual: items.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn cells(dimension: usize, checked: &[usize]) -> Vec<Cell> {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        (0..dimension * dimension)
            .map(|i| {
                let mut cell = Cell::new(i.to_string(), i.to_string(), i / dimension, i % dimension);
                if checked.contains(&i) {
                    cell.checked_at = Some(at);
                }
                cell
            })
            .collect()
    }

    fn in_pattern(cells: &[Cell]) -> Vec<usize> {
        cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.in_pattern)
            .map(|(i, _)| i)
            .collect()
    }

    fn covers_once(lines: &[Vec<usize>], size: usize) -> bool {
        let mut seen = vec![0usize; size];
        for line in lines {
            for &i in line {
                seen[i] += 1;
            }
        }
        seen.iter().all(|&n| n == 1)
    }

    #[test]
    fn test_dimension_for() {
        assert_eq!(dimension_for(9), Ok(3));
        assert_eq!(dimension_for(16), Ok(4));
        assert_eq!(dimension_for(25), Ok(5));
        assert_eq!(
            dimension_for(10),
            Err(HistoryError::UnsupportedGridSize { cell_count: 10 })
        );
        assert!(dimension_for(0).is_err());
    }

    #[test]
    fn test_combinations_partition_every_dimension() {
        for d in SUPPORTED_DIMENSIONS {
            let combos = combinations_for(d).unwrap();
            assert_eq!(combos.rows.len(), d);
            assert_eq!(combos.cols.len(), d);
            assert_eq!(combos.diagonals.len(), 2);
            assert!(combos.rows.iter().all(|r| r.len() == d));
            assert!(combos.cols.iter().all(|c| c.len() == d));
            assert!(combos.diagonals.iter().all(|g| g.len() == d));
            assert!(covers_once(&combos.rows, d * d));
            assert!(covers_once(&combos.cols, d * d));
        }
    }

    #[test]
    fn test_combinations_exact_3x3() {
        let combos = combinations_for(3).unwrap();
        assert_eq!(combos.rows, vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8]]);
        // Rotated column order: column 0, then 2, then 1.
        assert_eq!(combos.cols, vec![vec![0, 3, 6], vec![2, 5, 8], vec![1, 4, 7]]);
        assert_eq!(combos.diagonals, vec![vec![0, 4, 8], vec![2, 4, 6]]);
    }

    #[test]
    fn test_combinations_exact_5x5_diagonals() {
        let combos = combinations_for(5).unwrap();
        assert_eq!(combos.diagonals[0], vec![0, 6, 12, 18, 24]);
        assert_eq!(combos.diagonals[1], vec![4, 8, 12, 16, 20]);
        assert_eq!(combos.cols[1], vec![4, 9, 14, 19, 24]);
    }

    #[test]
    fn test_combinations_reject_unsupported() {
        assert!(combinations_for(2).is_err());
        assert!(combinations_for(6).is_err());
    }

    #[test]
    fn test_full_line_marks_exactly_dimension_cells() {
        for d in SUPPORTED_DIMENSIONS {
            let combos = combinations_for(d).unwrap();
            for line in combos.all() {
                let mut grid = cells(d, line);
                evaluate_pattern_membership(&mut grid, d).unwrap();
                let mut expected = line.to_vec();
                expected.sort();
                assert_eq!(in_pattern(&grid), expected);
            }
        }
    }

    #[test]
    fn test_partial_line_marks_nothing() {
        for d in SUPPORTED_DIMENSIONS {
            let combos = combinations_for(d).unwrap();
            for line in combos.all() {
                let mut grid = cells(d, &line[..d - 1]);
                evaluate_pattern_membership(&mut grid, d).unwrap();
                assert!(in_pattern(&grid).is_empty());
            }
        }
    }

    #[test]
    fn test_membership_is_sticky() {
        let mut grid = cells(3, &[0, 1, 2]);
        evaluate_pattern_membership(&mut grid, 3).unwrap();
        assert_eq!(in_pattern(&grid), vec![0, 1, 2]);

        // Unrelated check plus a cleared cell: prior marks survive.
        grid[7].checked_at = grid[0].checked_at;
        grid[1].checked_at = None;
        evaluate_pattern_membership(&mut grid, 3).unwrap();
        assert_eq!(in_pattern(&grid), vec![0, 1, 2]);
    }

    #[test]
    fn test_evaluate_rejects_wrong_length() {
        let mut grid = cells(3, &[]);
        grid.pop();
        assert_eq!(
            evaluate_pattern_membership(&mut grid, 3),
            Err(HistoryError::CellCountMismatch {
                expected: 9,
                actual: 8
            })
        );
    }

    #[test]
    fn test_completed_pattern_count() {
        // Row 0 and column 0 share cell 0.
        let grid = cells(3, &[0, 1, 2, 3, 6]);
        assert_eq!(completed_pattern_count(&grid, 3).unwrap(), 2);

        let full = cells(4, &(0..16).collect::<Vec<_>>());
        assert_eq!(completed_pattern_count(&full, 4).unwrap(), 10);
    }

    #[test]
    fn test_to_column_major_order() {
        let items: Vec<usize> = (0..9).collect();
        assert_eq!(
            to_column_major_order(&items, 3).unwrap(),
            vec![0, 3, 6, 1, 4, 7, 2, 5, 8]
        );
    }

    #[test]
    fn test_reorder_rejects_mismatched_length() {
        let items: Vec<usize> = (0..8).collect();
        assert_eq!(
            to_column_major_order(&items, 3),
            Err(HistoryError::CellCountMismatch {
                expected: 9,
                actual: 8
            })
        );
        assert!(to_diagonal_order(&items, 3).is_err());
        // A zero dimension only accepts an empty slice and never divides by zero.
        assert!(to_column_major_order(&items, 0).is_err());
        assert_eq!(to_column_major_order::<usize>(&[], 0), Ok(Vec::new()));
        assert_eq!(to_diagonal_order::<usize>(&[], 0), Ok(Vec::new()));
    }

    #[test]
    fn test_to_diagonal_order() {
        let items: Vec<char> = "abcdefghijklmnop".chars().collect();
        assert_eq!(
            to_diagonal_order(&items, 4).unwrap(),
            vec!['a', 'f', 'k', 'p', 'd', 'g', 'j', 'm']
        );
    }
}
