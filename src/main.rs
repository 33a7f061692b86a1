mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueHint};
use collection_dash::config::{DashboardConfig, ThemeKind};
use collection_dash::data::{CollectionDataPipeline, FilterSelection};
use collection_dash::report;
use eframe::egui;

use app::DashboardApp;
use state::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about = "Waste-collection dashboard", long_about = None)]
struct Cli {
    /// Spreadsheet / CSV / JSON / Parquet file to open
    #[arg(value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// Worksheet to read (defaults to the first sheet)
    #[arg(long)]
    sheet: Option<String>,

    /// JSON config file (column names, total marker, theme)
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Colour theme
    #[arg(long, value_enum)]
    theme: Option<ThemeKind>,

    /// Print the summary and table to stdout instead of opening a window
    #[arg(long)]
    report: bool,

    /// Months to include in the report (repeatable; default: all)
    #[arg(long = "month")]
    months: Vec<String>,
}

impl Cli {
    fn dashboard_config(&self) -> Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => DashboardConfig::from_json_file(path)?,
            None => DashboardConfig::default(),
        };
        if let Some(sheet) = &self.sheet {
            config.source.sheet = Some(sheet.clone());
        }
        if let Some(kind) = self.theme {
            config.theme.kind = kind;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let result = if cli.report { run_report(&cli) } else { run_gui(&cli) };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run_report(cli: &Cli) -> Result<()> {
    let Some(input) = &cli.input else {
        bail!("--report needs an input file");
    };
    let config = cli.dashboard_config()?;
    let dataset = CollectionDataPipeline::new(config.source)
        .run(input)
        .with_context(|| format!("loading {}", input.display()))?;

    let selection = if cli.months.is_empty() {
        dataset.default_selection()
    } else {
        FilterSelection::all(cli.months.iter().cloned())
    };
    let text = report::render(&dataset.view(&selection)).context("formatting report")?;
    print!("{text}");
    Ok(())
}

fn run_gui(cli: &Cli) -> Result<()> {
    let config = cli.dashboard_config()?;
    let title = config.theme.title.clone();
    let visuals = color::visuals(&config.theme);

    let mut state = AppState::new(config);
    if let Some(input) = &cli.input {
        state.open_path(input);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(visuals);
            Ok(Box::new(DashboardApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
