use heatmap_core::Surface;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::ui::viewport::Viewport;
use crate::ui::widgets::heatmap::to_color;
use crate::ui::widgets::popup::{anchored_rect, ClearWidget};

/// Draws the surface's tooltip over the chart when it is visible.
pub fn render_tooltip(surface: &Surface, f: &mut Frame<'_>, area: Rect) {
    let Some(tooltip) = surface.tooltip().filter(|tooltip| tooltip.visible) else {
        return;
    };

    let swatch = surface
        .cell(tooltip.cell)
        .map_or(Color::White, |cell| to_color(cell.fill));

    let lines = vec![
        TextLine::from(Span::styled(
            tooltip.heading.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(vec![
            Span::styled("■ ", Style::default().fg(swatch)),
            Span::styled(tooltip.temperature.as_str(), Style::default().fg(Color::White)),
        ]),
        TextLine::from(Span::styled(
            tooltip.variance.as_str(),
            Style::default().fg(Color::Gray),
        )),
    ];

    let content_width = tooltip
        .lines()
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0) as u16;
    let size = (content_width + 4, lines.len() as u16 + 2);

    let viewport = Viewport::new(area);
    let anchor = (
        viewport.column_at(tooltip.left),
        viewport.row_at(tooltip.top),
    );
    let rect = anchored_rect(anchor, size, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(ClearWidget, rect);
    f.render_widget(Paragraph::new(Text::from(lines)).block(block), rect);
}
