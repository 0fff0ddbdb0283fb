use heatmap_core::layout::{CANVAS_HEIGHT, CANVAS_WIDTH};
use ratatui::layout::Rect;
use std::ops::Range;

/// Maps the fixed chart canvas onto a terminal area. A terminal cell
/// belongs to whatever covers the canvas point under its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    area: Rect,
    x_step: f64,
    y_step: f64,
}

impl Viewport {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            x_step: CANVAS_WIDTH / f64::from(area.width.max(1)),
            y_step: CANVAS_HEIGHT / f64::from(area.height.max(1)),
        }
    }

    pub const fn area(&self) -> Rect {
        self.area
    }

    /// Columns whose centers fall inside `[start, end)`.
    pub fn columns(&self, start: f64, end: f64) -> Range<u16> {
        offset(covered(start, end, self.x_step, self.area.width), self.area.x)
    }

    /// Rows whose centers fall inside `[start, end)`.
    pub fn rows(&self, start: f64, end: f64) -> Range<u16> {
        offset(covered(start, end, self.y_step, self.area.height), self.area.y)
    }

    /// First column whose center is at or right of `x`, clamped to the area.
    pub fn column_at(&self, x: f64) -> u16 {
        self.area.x + first_at(x, self.x_step, self.area.width)
    }

    /// First row whose center is at or below `y`, clamped to the area.
    pub fn row_at(&self, y: f64) -> u16 {
        self.area.y + first_at(y, self.y_step, self.area.height)
    }

    /// Canvas point under the center of a terminal cell.
    pub fn to_surface(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        if column < self.area.x
            || row < self.area.y
            || column >= self.area.right()
            || row >= self.area.bottom()
        {
            return None;
        }
        let x = (f64::from(column - self.area.x) + 0.5) * self.x_step;
        let y = (f64::from(row - self.area.y) + 0.5) * self.y_step;
        Some((x, y))
    }
}

fn covered(start: f64, end: f64, step: f64, len: u16) -> Range<u16> {
    if !start.is_finite() || !end.is_finite() {
        return 0..0;
    }
    let first = (start / step - 0.5).ceil().max(0.0);
    let last = (end / step - 0.5).ceil().min(f64::from(len));
    if last <= first {
        return 0..0;
    }
    first as u16..last as u16
}

fn first_at(position: f64, step: f64, len: u16) -> u16 {
    let index = (position / step - 0.5).ceil();
    let max = f64::from(len.saturating_sub(1));
    if index.is_nan() {
        return 0;
    }
    index.clamp(0.0, max) as u16
}

const fn offset(range: Range<u16>, by: u16) -> Range<u16> {
    range.start + by..range.end + by
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        // 10 x 20 canvas units per terminal cell
        Viewport::new(Rect::new(2, 1, 100, 40))
    }

    #[test]
    fn narrow_cells_claim_only_centers_they_cover() {
        let viewport = viewport();
        assert!(viewport.columns(100.0, 103.2).is_empty());
        assert_eq!(viewport.columns(103.2, 106.4), 12..13);
        assert_eq!(viewport.columns(100.0, 120.0), 12..14);
    }

    #[test]
    fn adjacent_cells_tile_without_gaps() {
        let viewport = viewport();
        let width = 840.0 / 262.0;
        let mut claimed = Vec::new();
        for year in 0..262 {
            let start = 100.0 + f64::from(year) * width;
            claimed.extend(viewport.columns(start, start + width));
        }
        let expected: Vec<u16> = (12..96).collect();
        assert_eq!(claimed, expected);
    }

    #[test]
    fn rows_clip_to_area() {
        let viewport = viewport();
        assert_eq!(viewport.rows(-100.0, 30.0), 1..2);
        assert_eq!(viewport.rows(790.0, 2000.0), 40..41);
    }

    #[test]
    fn positions_clamp_into_area() {
        let viewport = viewport();
        assert_eq!(viewport.column_at(-64.0), 2);
        assert_eq!(viewport.row_at(-64.0), 1);
        assert_eq!(viewport.column_at(5000.0), 101);
        assert_eq!(viewport.row_at(600.0), 31);
    }

    #[test]
    fn terminal_cells_map_back_to_canvas_centers() {
        let viewport = viewport();
        assert_eq!(viewport.to_surface(2, 1), Some((5.0, 10.0)));
        assert_eq!(viewport.to_surface(12, 3), Some((105.0, 50.0)));
        assert_eq!(viewport.to_surface(1, 1), None);
        assert_eq!(viewport.to_surface(102, 1), None);
        assert_eq!(viewport.to_surface(2, 41), None);
    }
}
