use chrono::{DateTime, Local};
use heatmap_core::{Dataset, HeatmapRenderer, RenderOutcome, Surface};

use crate::fetch::FetchResult;

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub dataset_url: String,
    pub dataset: Option<Dataset>,
    pub surface: Surface,
    pub fetched_at: Option<DateTime<Local>>,
    /// A fetch is in flight.
    pub loading: bool,
    renderer: HeatmapRenderer,
    hovered: Option<usize>,
    refresh_requested: bool,
}

impl App {
    /// A new app asks for its first fetch straight away.
    pub fn new(dataset_url: impl Into<String>) -> Self {
        Self {
            running: true,
            show_help: false,
            dataset_url: dataset_url.into(),
            dataset: None,
            surface: Surface::new(),
            fetched_at: None,
            loading: false,
            renderer: HeatmapRenderer::new(),
            hovered: None,
            refresh_requested: true,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn request_refresh(&mut self) {
        if !self.loading {
            self.refresh_requested = true;
        }
    }

    /// Consumes a pending refresh request, marking the fetch as in flight.
    pub fn take_refresh_request(&mut self) -> bool {
        if !self.refresh_requested {
            return false;
        }
        self.refresh_requested = false;
        self.loading = true;
        true
    }

    /// A failed fetch, or one with no records, keeps whatever dataset was
    /// there before.
    pub fn apply_fetch(&mut self, result: FetchResult) {
        self.loading = false;
        match result {
            Ok(dataset) if dataset.is_empty() => {
                tracing::warn!(url = %self.dataset_url, "fetched dataset has no records");
            }
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => tracing::warn!(url = %self.dataset_url, "dataset fetch failed: {e}"),
        }
    }

    /// Replaces the dataset wholesale and redraws the surface from scratch.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = Some(dataset);
        self.fetched_at = Some(Local::now());
        self.hovered = None;
        self.redraw();
    }

    pub fn redraw(&mut self) -> RenderOutcome {
        self.renderer.render(&mut self.surface, self.dataset.as_ref())
    }

    pub const fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Pointer moved to a surface point, or off the chart with `None`.
    /// Enter fires only when the cell under the pointer changes.
    pub fn hover(&mut self, point: Option<(f64, f64)>) {
        let target = point.and_then(|(x, y)| self.surface.cell_at(x, y));
        if target == self.hovered {
            return;
        }

        match target {
            Some(index) => {
                self.surface.pointer_enter(index);
            }
            None => self.surface.pointer_leave(),
        }
        self.hovered = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatmap_core::TemperatureRecord;

    fn dataset() -> Dataset {
        Dataset::new(
            8.66,
            vec![
                TemperatureRecord::new(1753, 1, -1.8),
                TemperatureRecord::new(1754, 1, 0.4),
                TemperatureRecord::new(1755, 6, 2.1),
            ],
        )
    }

    fn center_of(app: &App, index: usize) -> (f64, f64) {
        let cell = app.surface.cell(index).unwrap();
        (cell.x + cell.width / 2.0, cell.top() + cell.height / 2.0)
    }

    #[test]
    fn first_fetch_is_requested_once() {
        let mut app = App::new("http://example.invalid/data.json");
        assert!(app.take_refresh_request());
        assert!(app.loading);
        assert!(!app.take_refresh_request());
        app.request_refresh();
        assert!(!app.take_refresh_request());
    }

    #[test]
    fn successful_fetch_renders_every_record() {
        let mut app = App::new("url");
        app.take_refresh_request();
        app.apply_fetch(Ok(dataset()));
        assert!(!app.loading);
        assert!(app.fetched_at.is_some());
        assert_eq!(app.surface.cell_count(), 3);
    }

    #[test]
    fn failed_fetch_keeps_previous_dataset() {
        let mut app = App::new("url");
        app.apply_fetch(Ok(dataset()));
        app.apply_fetch(Err(heatmap_core::Error::EmptyDataset.into()));
        assert_eq!(app.dataset.as_ref().map(Dataset::len), Some(3));
        assert_eq!(app.surface.cell_count(), 3);
    }

    #[test]
    fn empty_refresh_keeps_drawn_dataset() {
        let mut app = App::new("url");
        app.apply_fetch(Ok(dataset()));
        let fetched_at = app.fetched_at;
        app.apply_fetch(Ok(Dataset::new(8.66, Vec::new())));
        assert_eq!(app.dataset.as_ref().map(Dataset::len), Some(3));
        assert_eq!(app.surface.cell_count(), 3);
        assert_eq!(app.fetched_at, fetched_at);
    }

    #[test]
    fn failed_first_fetch_draws_nothing() {
        let mut app = App::new("url");
        app.apply_fetch(Err(heatmap_core::Error::EmptyDataset.into()));
        assert!(app.dataset.is_none());
        assert!(app.surface.is_empty());
    }

    #[test]
    fn hovering_two_cells_leaves_one_tooltip() {
        let mut app = App::new("url");
        app.set_dataset(dataset());

        let a = center_of(&app, 0);
        let b = center_of(&app, 2);
        app.hover(Some(a));
        app.hover(Some(b));

        let tooltip = app.surface.tooltip().unwrap();
        assert_eq!(tooltip.cell, 2);
        assert_eq!(tooltip.heading, "1755 - June");
        assert_eq!(app.hovered(), Some(2));
    }

    #[test]
    fn leaving_the_chart_hides_tooltip() {
        let mut app = App::new("url");
        app.set_dataset(dataset());
        app.hover(Some(center_of(&app, 1)));
        app.hover(Some((1.0, 1.0)));
        assert!(!app.surface.tooltip().unwrap().visible);
        app.hover(None);
        assert_eq!(app.hovered(), None);
    }

    #[test]
    fn new_dataset_resets_hover() {
        let mut app = App::new("url");
        app.set_dataset(dataset());
        app.hover(Some(center_of(&app, 0)));
        app.set_dataset(dataset());
        assert_eq!(app.hovered(), None);
        assert!(app.surface.tooltip().is_none());
    }
}
