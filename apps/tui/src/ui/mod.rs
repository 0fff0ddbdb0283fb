// UI module for the heat map TUI
// Handles all rendering functions

pub mod viewport;
pub mod widgets;

use crate::app::App;
use heatmap_core::CHART_TITLE;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use viewport::Viewport;
use widgets::heatmap::{to_color, HeatmapView};
use widgets::popup::{centered_rect, ClearWidget};
use widgets::tooltip::render_tooltip;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub title: Rect,
    pub chart: Rect,
    pub legend: Rect,
    pub status: Rect,
}

pub fn screen_areas(area: Rect) -> ScreenAreas {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title area
            Constraint::Min(8),    // Chart area
            Constraint::Length(1), // Legend
            Constraint::Length(1), // Status and shortcuts
        ])
        .split(area.inner(Margin::new(1, 0)));

    ScreenAreas {
        title: layout[0],
        chart: layout[1],
        legend: layout[2],
        status: layout[3],
    }
}

/// Canvas point under a terminal cell, if the cell is on the chart.
pub fn surface_point(frame: Rect, column: u16, row: u16) -> Option<(f64, f64)> {
    Viewport::new(screen_areas(frame).chart).to_surface(column, row)
}

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let areas = screen_areas(f.area());

    render_title(app, f, areas.title);
    render_chart(app, f, areas.chart);
    render_legend(app, f, areas.legend);
    render_status(app, f, areas.status);

    if app.show_help {
        render_help_popup(f, f.area());
    }
}

fn render_title(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!("== {CHART_TITLE} =="))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let description = app
        .dataset
        .as_ref()
        .and_then(heatmap_core::Dataset::description)
        .unwrap_or_else(|| {
            if app.loading {
                "Loading dataset...".to_string()
            } else {
                "No dataset loaded".to_string()
            }
        });

    let lines = vec![
        TextLine::from(Span::styled(
            description,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(Span::styled(
            app.dataset_url.as_str(),
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

fn render_chart(app: &App, f: &mut Frame<'_>, area: Rect) {
    if app.surface.is_empty() {
        let message = if app.loading {
            "Loading global-temperature.json..."
        } else {
            "No data available"
        };
        let paragraph = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    f.render_widget(HeatmapView::new(&app.surface), area);
    render_tooltip(&app.surface, f, area);
}

fn render_legend(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(legend) = app.surface.legend() else {
        return;
    };

    let mut spans = vec![Span::styled("Legend ", Style::default().fg(Color::Gray))];
    for swatch in &legend.swatches {
        spans.push(Span::styled("■ ", Style::default().fg(to_color(swatch.fill))));
        spans.push(Span::styled(
            format!("{}  ", swatch.label),
            Style::default().fg(Color::White).add_modifier(Modifier::DIM),
        ));
    }

    f.render_widget(Paragraph::new(TextLine::from(spans)), area);
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status = match (&app.dataset, app.fetched_at) {
        (Some(dataset), Some(at)) => format!(
            "{} records, fetched {}",
            dataset.len(),
            at.format("%H:%M:%S")
        ),
        _ if app.loading => "Fetching...".to_string(),
        _ => String::new(),
    };

    let line = TextLine::from(vec![
        Span::styled(status, Style::default().fg(Color::Gray)),
        Span::raw("  "),
        Span::styled("q", Style::default().fg(Color::Cyan)),
        Span::raw(" quit  "),
        Span::styled("r", Style::default().fg(Color::Cyan)),
        Span::raw(" refresh  "),
        Span::styled("?", Style::default().fg(Color::Cyan)),
        Span::raw(" help"),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup = centered_rect(50, 40, area);

    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };
    let lines = vec![
        TextLine::from(vec![key("q / Esc"), Span::raw("  quit")]),
        TextLine::from(vec![key("r"), Span::raw("        fetch the dataset again")]),
        TextLine::from(vec![key("?"), Span::raw("        toggle this help")]),
        TextLine::from(""),
        TextLine::from("Move the mouse over a cell to see its temperature."),
    ];

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(ClearWidget, popup);
    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: true }),
        popup,
    );
}
