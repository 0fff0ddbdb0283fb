use clap::Parser;
use color_eyre::Result;

use heatmap_tui::cli::CliArgs;
use heatmap_tui::config::init_app_config;
use heatmap_tui::event::{self, HeadlessOptions};
use heatmap_tui::{fetch, logging, terminal, App};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = init_app_config();
    let interactive = !args.wants_headless(is_terminal());
    logging::init(&config, interactive)?;

    let client = fetch::build_client()?;
    let mut app = App::new(config.dataset_url);

    if !interactive {
        return event::run_headless(&mut app, &client, &HeadlessOptions::from(&args)).await;
    }

    // Setup terminal
    let mut terminal = terminal::setup_terminal()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app, &client).await;

    // Restore terminal
    terminal::cleanup_terminal_state(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
