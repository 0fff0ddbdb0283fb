use heatmap_core::surface::{AxisElement, CellElement, Element, Orientation, TextElement};
use heatmap_core::{Rgb, Surface};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

use crate::ui::viewport::Viewport;

pub const fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Paints the retained surface into the terminal buffer, scaled to fit.
/// The legend is left to the caller.
pub struct HeatmapView<'a> {
    surface: &'a Surface,
    axis_style: Style,
}

impl<'a> HeatmapView<'a> {
    pub fn new(surface: &'a Surface) -> Self {
        Self {
            surface,
            axis_style: Style::default().fg(Color::Gray),
        }
    }
}

impl Widget for HeatmapView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let viewport = Viewport::new(area);

        // Cells first so axis text is never painted over.
        for cell in self.surface.cells() {
            paint_cell(&viewport, cell, buf);
        }
        for element in self.surface.elements() {
            match element {
                Element::Axis(axis) => draw_axis(&viewport, axis, self.axis_style, buf),
                Element::Text(text) => draw_title(&viewport, text, self.axis_style, buf),
                Element::Cell(_) | Element::Legend(_) => {}
            }
        }
    }
}

fn paint_cell(viewport: &Viewport, cell: &CellElement, buf: &mut Buffer) {
    let color = to_color(cell.fill);
    let top = cell.top();
    for y in viewport.rows(top, top + cell.height) {
        for x in viewport.columns(cell.x, cell.x + cell.width) {
            if let Some(target) = buf.cell_mut((x, y)) {
                target.set_symbol(" ").set_bg(color);
            }
        }
    }
}

fn draw_axis(viewport: &Viewport, axis: &AxisElement, style: Style, buf: &mut Buffer) {
    let area = viewport.area();
    let (tx, ty) = axis.translate;
    let (r0, r1) = axis.extent;

    match axis.orientation {
        Orientation::Bottom => {
            let row = viewport.row_at(ty);
            for x in viewport.column_at(r0)..=viewport.column_at(r1) {
                buf.set_string(x, row, "─", style);
            }

            let label_row = row + 1;
            if label_row >= area.bottom() {
                return;
            }
            let mut next_free = area.x;
            for tick in &axis.ticks {
                let center = viewport.column_at(tick.offset);
                let len = tick.label.chars().count() as u16;
                let start = center.saturating_sub(len / 2).max(area.x);
                if start < next_free || start + len > area.right() {
                    continue;
                }
                buf.set_string(center, row, "┬", style);
                buf.set_string(start, label_row, &tick.label, style);
                next_free = start + len + 1;
            }
        }
        Orientation::Left => {
            let column = viewport.column_at(tx).saturating_sub(1).max(area.x);
            let first_row = viewport.row_at(r0);
            let last_row = viewport.row_at(r1);
            for y in first_row..last_row {
                buf.set_string(column, y, "│", style);
            }

            // Leftmost column is kept for the rotated axis title.
            let space = usize::from(column - area.x).saturating_sub(2);
            for tick in &axis.ticks {
                let row = viewport.row_at(tick.offset);
                let label = fit_label(&tick.label, space);
                let len = label.chars().count() as u16;
                let start = column.saturating_sub(len + 1).max(area.x);
                buf.set_string(column, row, "┤", style);
                buf.set_stringn(start, row, label, space, style);
            }
        }
    }
}

// Month names fall back to their three-letter abbreviation when the left
// margin is too narrow.
fn fit_label(label: &str, space: usize) -> &str {
    if label.chars().count() <= space {
        return label;
    }
    label
        .char_indices()
        .nth(3)
        .map_or(label, |(end, _)| &label[..end])
}

fn draw_title(viewport: &Viewport, text: &TextElement, style: Style, buf: &mut Buffer) {
    let area = viewport.area();
    if text.rotation == 0.0 {
        let row = viewport.row_at(text.y);
        let column = viewport.column_at(text.x);
        buf.set_stringn(
            column,
            row,
            &text.text,
            usize::from(area.right() - column),
            style,
        );
        return;
    }

    // Rotated titles run down the leftmost column, centered on the row
    // their anchor lands on after the quarter turn.
    let column = area.x;
    let center = viewport.row_at(-text.x);
    let len = text.text.chars().count() as u16;
    let start = center.saturating_sub(len / 2).max(area.y);
    for (offset, ch) in text.text.chars().enumerate() {
        let row = start + offset as u16;
        if row >= area.bottom() {
            break;
        }
        let mut encoded = [0_u8; 4];
        buf.set_string(column, row, ch.encode_utf8(&mut encoded), style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatmap_core::{Dataset, HeatmapRenderer, TemperatureRecord};

    fn rendered_surface() -> Surface {
        let mut records = Vec::new();
        for year in 1753..=2015 {
            for month in 1..=12 {
                records.push(TemperatureRecord::new(year, month, -1.8));
            }
        }
        let mut surface = Surface::new();
        HeatmapRenderer::new().render(&mut surface, Some(&Dataset::new(8.66, records)));
        surface
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn cells_are_painted_with_bucket_colors() {
        let area = Rect::new(0, 0, 100, 40);
        let mut buf = Buffer::empty(area);
        HeatmapView::new(&rendered_surface()).render(area, &mut buf);

        // Canvas point (505, 310) sits in the middle of the plot.
        let cell = &buf[(50, 15)];
        assert_eq!(cell.bg, Color::Rgb(0xc6, 0xdb, 0xef));
    }

    #[test]
    fn margins_stay_unpainted() {
        let area = Rect::new(0, 0, 100, 40);
        let mut buf = Buffer::empty(area);
        HeatmapView::new(&rendered_surface()).render(area, &mut buf);
        assert_eq!(buf[(50, 0)].bg, Color::Reset);
        assert_eq!(buf[(2, 15)].bg, Color::Reset);
    }

    #[test]
    fn axes_show_years_and_months() {
        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        HeatmapView::new(&rendered_surface()).render(area, &mut buf);

        let text: String = (0..40).map(|y| row_text(&buf, y)).collect::<Vec<_>>().join("\n");
        assert!(text.contains("1760"));
        assert!(text.contains("2000"));
        assert!(text.contains("January"));
        assert!(text.contains("December"));
        assert!(text.contains("Year"));
    }

    #[test]
    fn narrow_margin_abbreviates_months() {
        assert_eq!(fit_label("September", 6), "Sep");
        assert_eq!(fit_label("May", 6), "May");
    }

    #[test]
    fn empty_surface_draws_nothing() {
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        HeatmapView::new(&Surface::new()).render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}
