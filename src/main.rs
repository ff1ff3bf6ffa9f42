#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use civic_directory::app::DirectoryApp;
use civic_directory::category::{DocumentType, Uncategorized};
use civic_directory::data::Directory;
use civic_directory::filter_state::FilterStateManager;
use civic_directory::history::{History, Location};
use civic_directory::render::{build_page, render_json, render_page};
use civic_directory::route::resolve;

const MAX_LIMIT: usize = 1000;

#[derive(Parser, Debug)]
#[command(name = "civicdir")]
#[command(about = "Browse a municipal government directory")]
struct Args {
    /// Page to open, with an optional query such as `?search=bam&type=ordinance`.
    #[arg(default_value = "/government/barangays")]
    url: String,
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    #[arg(long, default_value_t = 200)]
    limit: usize,
    /// Print the page to stdout instead of opening a window.
    #[arg(long, default_value_t = false)]
    cli: bool,
    /// With --cli, print the page as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Search text written into the URL before rendering.
    #[arg(long)]
    search: Option<String>,
    /// Document type written into the URL before rendering.
    #[arg(long = "type")]
    doc_type: Option<String>,
}

impl Args {
    fn limit(&self) -> usize {
        self.limit.clamp(1, MAX_LIMIT)
    }

    /// Session history starting at `url`, with --search/--type applied on top.
    fn history(&self) -> History {
        let mut history = History::new(Location::parse(&self.url));
        let typed = resolve(&history.current().path).typed();
        if let Some(text) = &self.search {
            if typed {
                FilterStateManager::<DocumentType>::new().set_search_text(&mut history, text);
            } else {
                FilterStateManager::<Uncategorized>::new().set_search_text(&mut history, text);
            }
        }
        if let Some(raw) = &self.doc_type {
            if typed {
                FilterStateManager::<DocumentType>::new().set_category(&mut history, raw);
            } else {
                tracing::warn!(token = %raw, "page has no document type filter, ignoring --type");
            }
        }
        history
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_cli(args: &Args) -> Result<()> {
    let directory = Directory::load(&args.data_dir)?;
    let history = args.history();
    let location = history.current();

    if args.json {
        let (page, data) = build_page(&directory, location);
        let state = FilterStateManager::<DocumentType>::new().get_state(location);
        println!(
            "{}",
            serde_json::to_string_pretty(&render_json(&page, &data, &state))?
        );
        return Ok(());
    }

    let rendered = render_page(&directory, location, args.limit());
    println!("{}", rendered.title);
    println!("{location}");
    println!("{}", rendered.summary);
    for line in &rendered.lines {
        println!("{line}");
    }
    Ok(())
}

fn run_gui(args: &Args) -> Result<()> {
    let directory = Directory::load(&args.data_dir)?;
    let start = args.history().current().clone();
    let limit = args.limit();
    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport =
        eframe::egui::ViewportBuilder::default().with_inner_size(eframe::egui::vec2(1200.0, 800.0));

    eframe::run_native(
        "Civic Directory",
        native_options,
        Box::new(move |_cc| Ok(Box::new(DirectoryApp::new(directory, start, limit)))),
    )
    .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    tracing::debug!(url = %args.url, data_dir = %args.data_dir.display(), "starting");
    if args.cli {
        run_cli(&args)
    } else {
        run_gui(&args)
    }
}
