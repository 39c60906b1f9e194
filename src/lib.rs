pub mod candidates;
pub mod config;
pub mod error;
pub mod filter;
pub mod keys;
pub mod logging;
pub mod prompt;
pub mod render;
pub mod selection;
pub mod state;
pub mod terminal;
pub mod theme;

pub use error::{ConfigError, PromptError};
pub use prompt::{CancelToken, SearchPrompt, SearchPromptBuilder};
pub use terminal::{CrosstermTerminal, RecordingTerminal, Terminal};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::io::{BufRead, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::Settings;
use theme::ThemePreset;

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "search-prompt",
    version,
    about = "Pick one line from a list by typing to filter it"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the prompt and print the chosen candidate to stdout
    Pick {
        /// Candidates; read from --file or stdin when omitted
        items: Vec<String>,

        /// Read candidates from this file, one per line
        #[arg(long)]
        file: Option<PathBuf>,

        /// Maximum number of visible rows
        #[arg(long, allow_negative_numbers = true)]
        page_size: Option<i64>,

        /// Text shown before the query
        #[arg(long)]
        label: Option<String>,

        #[arg(long, value_enum)]
        theme: Option<ThemePreset>,

        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Generate shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pick {
            items,
            file,
            page_size,
            label,
            theme,
            timeout,
        } => {
            let _log_guard = config::default_data_dir().and_then(|dir| logging::init(&dir));
            let mut settings = Settings::load()?;
            if let Some(page_size) = page_size {
                settings.page_size = page_size;
            }
            if let Some(label) = label {
                settings.label = label;
            }
            if let Some(theme) = theme {
                settings.theme = theme;
            }
            let items = collect_items(items, file.as_deref())?;
            run_pick(items, &settings, timeout.map(Duration::from_secs))
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "search-prompt", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn collect_items(items: Vec<String>, file: Option<&Path>) -> Result<Vec<String>> {
    if !items.is_empty() {
        return Ok(items);
    }
    if let Some(path) = file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading candidates from {}", path.display()))?;
        return Ok(non_empty_lines(content.lines()));
    }
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(Vec::new());
    }
    let lines = stdin
        .lock()
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .context("reading candidates from stdin")?;
    Ok(non_empty_lines(lines.iter().map(String::as_str)))
}

fn non_empty_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
    lines
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn run_pick(items: Vec<String>, settings: &Settings, timeout: Option<Duration>) -> Result<()> {
    // Fails on a bad page size before the terminal is touched.
    let prompt = SearchPrompt::builder()
        .choices(items)
        .use_display()
        .page_size(settings.page_size)
        .label(settings.label.clone())
        .theme(settings.theme.to_palette())
        .build()?;

    let cancel = CancelToken::new();
    if let Some(limit) = timeout {
        let token = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(limit);
            token.cancel();
        });
    }

    let mut term = CrosstermTerminal::stderr();
    let choice = prompt.show_with_cancel(&mut term, &cancel)?;
    println!("{choice}");
    Ok(())
}
