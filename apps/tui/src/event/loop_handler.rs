use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::Stdout;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::app::{handle_input, App};
use crate::cli::CliArgs;
use crate::fetch::{fetch_dataset, spawn_fetch};
use crate::ui;
use heatmap_core::{svg, Dataset, DatasetSummary};

/// What a headless run prints or writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessOptions {
    pub json: bool,
    pub svg: Option<PathBuf>,
}

impl From<&CliArgs> for HeadlessOptions {
    fn from(args: &CliArgs) -> Self {
        Self {
            json: args.json,
            svg: args.svg.clone(),
        }
    }
}

/// Run the application in headless mode (no UI)
pub async fn run_headless(
    app: &mut App,
    client: &reqwest::Client,
    options: &HeadlessOptions,
) -> Result<()> {
    app.take_refresh_request();
    let result = fetch_dataset(client, &app.dataset_url).await;
    app.apply_fetch(result);

    let Some(dataset) = app.dataset.as_ref() else {
        return Err(eyre!("no dataset could be loaded from {}", app.dataset_url));
    };

    if let Some(path) = &options.svg {
        let markup = svg::render_svg(&app.surface)?;
        std::fs::write(path, markup)?;
        tracing::info!(path = %path.display(), "svg written");
    }

    if options.json {
        render_headless_json(app, dataset)?;
    } else {
        render_headless_stats(dataset);
    }

    Ok(())
}

fn render_headless_stats(dataset: &Dataset) {
    let stats = dataset.summary();

    println!("\nGlobal Land-Surface Temperature");
    println!("===============================");
    if let Some(description) = dataset.description() {
        println!("{description}");
    }
    println!("Records: {}", stats.records);

    if let (Some(coolest), Some(warmest)) = (stats.coolest, stats.warmest) {
        println!("Coolest month: {coolest:.1}°C");
        println!("Warmest month: {warmest:.1}°C");
    }

    println!("\nMonths by Color Bucket:");
    for bucket in stats.buckets {
        println!("- {} {}: {}", bucket.color, bucket.label, bucket.count);
    }
}

fn render_headless_json(app: &App, dataset: &Dataset) -> Result<()> {
    let report = HeadlessReport {
        url: &app.dataset_url,
        fetched_at: app.fetched_at.map(|at| at.to_rfc3339()),
        description: dataset.description(),
        summary: dataset.summary(),
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");
    Ok(())
}

#[derive(serde::Serialize)]
struct HeadlessReport<'a> {
    url: &'a str,
    fetched_at: Option<String>,
    description: Option<String>,
    summary: DatasetSummary,
}

/// Run the main application event loop
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    client: &reqwest::Client,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let (tx, mut rx) = mpsc::unbounded_channel();

    loop {
        if app.take_refresh_request() {
            spawn_fetch(client.clone(), app.dataset_url.clone(), tx.clone());
        }
        while let Ok(result) = rx.try_recv() {
            app.apply_fetch(result);
        }

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        // Keep the runtime free for the fetch task between polls.
        let ready = tokio::task::block_in_place(|| {
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT))
        });
        if !matches!(ready, Ok(true)) {
            continue;
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                handle_input(app, key.code);
                if !app.running {
                    break;
                }
            }
            Ok(Event::Mouse(mouse)) => {
                if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
                    let size = terminal.size()?;
                    let frame = Rect::new(0, 0, size.width, size.height);
                    app.hover(ui::surface_point(frame, mouse.column, mouse.row));
                }
            }
            Ok(Event::Resize(_, _)) => {
                // Pointer position is stale after a resize
                app.hover(None);
            }
            Ok(_) | Err(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn options_follow_cli_flags() {
        let args = CliArgs::parse_from(["heatmap", "--headless", "--json", "--svg", "out.svg"]);
        let options = HeadlessOptions::from(&args);
        assert!(options.json);
        assert_eq!(options.svg, Some(PathBuf::from("out.svg")));
    }

    #[tokio::test]
    async fn headless_run_without_data_is_an_error() {
        let client = crate::fetch::build_client().unwrap();
        let mut app = App::new("http://127.0.0.1:9/global-temperature.json");
        let result = run_headless(&mut app, &client, &HeadlessOptions::default()).await;
        assert!(result.is_err());
        assert!(!app.loading);
    }
}
