// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Proportional row/column tracks and point → cell lookup.
//!
//! Tracks are described by relative sizes (for example `[1.0, 2.0, 1.0]`), not pixels.
//! A lookup converts the point into a fraction of the grid bounds on each axis and picks
//! the first track whose cumulative proportion reaches that fraction. The answer only
//! depends on the proportions, so it stays correct however the grid is scaled on screen.

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use trellis_layout::Cell;

/// Cumulative row and column proportions of a grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridTracks {
    rows: Vec<f64>,
    cols: Vec<f64>,
}

impl GridTracks {
    /// Build tracks from relative row and column sizes.
    ///
    /// Negative and non-finite sizes count as zero. An axis whose sizes sum to zero is
    /// treated as having no tracks.
    pub fn new(row_sizes: &[f64], col_sizes: &[f64]) -> Self {
        Self {
            rows: cumulative(row_sizes),
            cols: cumulative(col_sizes),
        }
    }

    /// `rows × cols` equally sized tracks.
    pub fn uniform(rows: usize, cols: usize) -> Self {
        Self::new(&alloc::vec![1.0; rows], &alloc::vec![1.0; cols])
    }

    /// Number of row tracks.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of column tracks.
    pub fn col_count(&self) -> usize {
        self.cols.len()
    }

    /// The cell under `pt` for a grid laid out in `bounds`.
    ///
    /// Points outside the bounds clamp to the nearest edge cell. An axis without tracks
    /// resolves to index `0`. Returns `None` for zero-area bounds or a non-finite point.
    pub fn cell_at(&self, bounds: Rect, pt: Point) -> Option<Cell> {
        if !(bounds.width() > 0.0 && bounds.height() > 0.0) {
            return None;
        }
        if !(pt.x.is_finite() && pt.y.is_finite()) {
            return None;
        }
        let fx = (pt.x - bounds.x0) / bounds.width();
        let fy = (pt.y - bounds.y0) / bounds.height();
        Some(Cell::new(track_index(&self.rows, fy), track_index(&self.cols, fx)))
    }

    /// The rectangle covered by `cell` when the grid is laid out in `bounds`.
    ///
    /// Returns `None` if the cell is outside the tracks.
    pub fn cell_rect(&self, bounds: Rect, cell: Cell) -> Option<Rect> {
        let (y0, y1) = span(&self.rows, cell.row as usize)?;
        let (x0, x1) = span(&self.cols, cell.col as usize)?;
        Some(Rect::new(
            bounds.x0 + x0 * bounds.width(),
            bounds.y0 + y0 * bounds.height(),
            bounds.x0 + x1 * bounds.width(),
            bounds.y0 + y1 * bounds.height(),
        ))
    }
}

fn cumulative(sizes: &[f64]) -> Vec<f64> {
    let clean = |s: f64| if s.is_finite() && s > 0.0 { s } else { 0.0 };
    let total: f64 = sizes.iter().copied().map(clean).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut acc = 0.0;
    sizes
        .iter()
        .map(|&s| {
            acc += clean(s);
            acc / total
        })
        .collect()
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Track counts come from layout descriptions and stay far below u32::MAX."
)]
fn track_index(cumulative: &[f64], fraction: f64) -> u32 {
    let Some(last) = cumulative.len().checked_sub(1) else {
        return 0;
    };
    cumulative
        .iter()
        .position(|&c| c >= fraction)
        .unwrap_or(last)
        .min(last) as u32
}

fn span(cumulative: &[f64], i: usize) -> Option<(f64, f64)> {
    let end = *cumulative.get(i)?;
    let start = if i == 0 { 0.0 } else { cumulative[i - 1] };
    Some((start, end))
}
