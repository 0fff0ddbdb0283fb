use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "heatmap",
    version,
    about = "Monthly global land-surface temperature heat map"
)]
pub struct CliArgs {
    /// Fetch the dataset, print a summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the rendered chart as SVG to PATH and exit
    #[arg(long, value_name = "PATH")]
    pub svg: Option<PathBuf>,

    /// Override the dataset URL
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Write logs to PATH
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.url {
            std::env::set_var("HEATMAP_URL", url);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("HEATMAP_LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    /// Any output flag, or stdout not being a terminal, skips the TUI.
    pub const fn wants_headless(&self, is_terminal: bool) -> bool {
        self.headless || self.json || self.svg.is_some() || !is_terminal
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}
