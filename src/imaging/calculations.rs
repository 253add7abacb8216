//! Pure calculation functions for output geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// Canvas size of a bordered photo.
///
/// ```
/// # use photo_tools::imaging::calculations::bordered_dimensions;
/// assert_eq!(bordered_dimensions((531, 649), 20), (571, 689));
/// ```
pub fn bordered_dimensions(target: (u32, u32), border: u32) -> (u32, u32) {
    let pad = border.saturating_mul(2);
    (target.0.saturating_add(pad), target.1.saturating_add(pad))
}

/// Size of one cell when `count` cells separated by `gap` share `canvas` pixels.
///
/// Integer division; any remainder is left unused at the far edge. Returns
/// `None` when `count` is zero, the gaps leave no room for a cell, or the
/// cell pitch (`cell + gap`) does not fit in a `u32`.
///
/// ```
/// # use photo_tools::imaging::calculations::cell_size;
/// assert_eq!(cell_size(1200, 2, 10), Some(595));
/// assert_eq!(cell_size(1800, 3, 10), Some(593));
/// assert_eq!(cell_size(10, 3, 10), None);
/// assert_eq!(cell_size(100, 1, u32::MAX), None);
/// ```
pub fn cell_size(canvas: u32, count: u32, gap: u32) -> Option<u32> {
    if count == 0 {
        return None;
    }
    let gaps = (count - 1).checked_mul(gap)?;
    let cell = canvas.checked_sub(gaps)? / count;
    cell.checked_add(gap)?;
    (cell > 0).then_some(cell)
}

/// Resolved grid geometry for a print sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub cell_width: u32,
    pub cell_height: u32,
    pub columns: u32,
    pub rows: u32,
    pub gap: u32,
}

impl GridGeometry {
    /// Top-left corner of every cell, row by row.
    pub fn positions(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |col| {
                (
                    col * (self.cell_width + self.gap),
                    row * (self.cell_height + self.gap),
                )
            })
        })
    }

    pub fn cell_count(&self) -> u32 {
        self.columns * self.rows
    }
}

/// Compute cell size for a `grid` of (columns, rows) on a `canvas` of (width, height).
pub fn calculate_grid_geometry(
    canvas: (u32, u32),
    grid: (u32, u32),
    gap: u32,
) -> Option<GridGeometry> {
    let (columns, rows) = grid;
    Some(GridGeometry {
        cell_width: cell_size(canvas.0, columns, gap)?,
        cell_height: cell_size(canvas.1, rows, gap)?,
        columns,
        rows,
        gap,
    })
}

/// Dimensions for an on-screen preview no wider than `max_width`.
///
/// Returns `None` when the source already fits. Otherwise scales
/// proportionally, rounding the height down (never below 1px).
pub fn preview_dimensions(source: (u32, u32), max_width: u32) -> Option<(u32, u32)> {
    let (width, height) = source;
    if width <= max_width {
        return None;
    }
    let scaled = (height as u64 * max_width as u64 / width as u64) as u32;
    Some((max_width, scaled.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bordered_dimensions_adds_border_twice() {
        assert_eq!(bordered_dimensions((531, 649), 20), (571, 689));
        assert_eq!(bordered_dimensions((0, 0), 5), (10, 10));
        assert_eq!(bordered_dimensions((100, 50), 0), (100, 50));
    }

    #[test]
    fn cell_size_default_sheet_is_exact() {
        assert_eq!(cell_size(1200, 2, 10), Some(595));
        assert_eq!(cell_size(1800, 3, 10), Some(593));
    }

    #[test]
    fn cell_size_truncates_remainder() {
        // (100 - 2*3) / 3 = 31.33 → 31
        assert_eq!(cell_size(100, 3, 3), Some(31));
    }

    #[test]
    fn cell_size_single_cell_ignores_gap() {
        assert_eq!(cell_size(500, 1, 40), Some(500));
    }

    #[test]
    fn cell_size_rejects_pitch_overflow() {
        assert_eq!(cell_size(100, 1, u32::MAX), None);
        assert_eq!(cell_size(100, 1, u32::MAX - 100), Some(100));
        assert!(calculate_grid_geometry((100, 100), (1, 1), u32::MAX).is_none());
    }

    #[test]
    fn cell_size_rejects_degenerate_grids() {
        assert_eq!(cell_size(100, 0, 0), None);
        assert_eq!(cell_size(20, 3, 10), None);
        assert_eq!(cell_size(2, 3, 0), None);
    }

    #[test]
    fn default_grid_positions() {
        let g = calculate_grid_geometry((1200, 1800), (2, 3), 10).unwrap();
        assert_eq!((g.cell_width, g.cell_height), (595, 593));
        let positions: Vec<_> = g.positions().collect();
        assert_eq!(
            positions,
            vec![
                (0, 0),
                (605, 0),
                (0, 603),
                (605, 603),
                (0, 1206),
                (605, 1206),
            ]
        );
        assert_eq!(g.cell_count(), 6);
    }

    #[test]
    fn grid_cells_stay_inside_canvas() {
        let g = calculate_grid_geometry((1000, 700), (3, 4), 7).unwrap();
        for (x, y) in g.positions() {
            assert!(x + g.cell_width <= 1000);
            assert!(y + g.cell_height <= 700);
        }
    }

    #[test]
    fn preview_leaves_small_images_alone() {
        assert_eq!(preview_dimensions((500, 900), 500), None);
        assert_eq!(preview_dimensions((200, 100), 500), None);
    }

    #[test]
    fn preview_scales_proportionally_rounding_down() {
        assert_eq!(preview_dimensions((1000, 750), 500), Some((500, 375)));
        // 333 * 500 / 1001 = 166.33 → 166
        assert_eq!(preview_dimensions((1001, 333), 500), Some((500, 166)));
    }

    #[test]
    fn preview_height_never_zero() {
        assert_eq!(preview_dimensions((5000, 1), 500), Some((500, 1)));
    }
}
