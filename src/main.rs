// Site Gantt
// Headless entry point for rendering and converting schedules from the shell

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use site_gantt::models::project::Progress;
use site_gantt::models::settings::{GridMode, Zoom};
use site_gantt::services::io::{self, FileFormat};
use site_gantt::services::settings::ConfigService;
use site_gantt::SessionState;

#[derive(Parser)]
#[command(name = "site-gantt")]
#[command(about = "Lay out construction project schedules as Gantt timelines")]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the render payload for a project table as JSON
    Render(RenderArgs),
    /// Convert a project table between CSV and JSON
    Export {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        /// Output file; the extension picks the format
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
        /// Read column TARGET from the input's column SOURCE
        #[arg(long = "map", value_name = "TARGET=SOURCE")]
        mappings: Vec<String>,
    },
    /// Show the effective configuration
    Config,
}

#[derive(clap::Args)]
struct RenderArgs {
    /// CSV or JSON file with the projects table
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Read column TARGET from the input's column SOURCE
    #[arg(long = "map", value_name = "TARGET=SOURCE")]
    mappings: Vec<String>,

    #[arg(long, value_name = "YYYY-MM-DD")]
    start: Option<NaiveDate>,

    #[arg(long, value_name = "YYYY-MM-DD")]
    end: Option<NaiveDate>,

    /// Date of the today marker (defaults to the local date)
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// Leave the today marker out of the payload
    #[arg(long)]
    no_today: bool,

    #[arg(long, value_enum)]
    zoom: Option<ZoomArg>,

    #[arg(long, value_enum)]
    grid: Option<GridArg>,

    /// Keyword matched against name, client, site and owner
    #[arg(long)]
    search: Option<String>,

    #[arg(long = "work-type")]
    work_types: Vec<String>,

    #[arg(long = "owner")]
    owners: Vec<String>,

    #[arg(long = "progress")]
    progresses: Vec<Progress>,

    /// Project ids to highlight
    #[arg(long = "select")]
    selected: Vec<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ZoomArg {
    Week,
    Month,
    Quarter,
}

impl From<ZoomArg> for Zoom {
    fn from(arg: ZoomArg) -> Self {
        match arg {
            ZoomArg::Week => Zoom::Week,
            ZoomArg::Month => Zoom::Month,
            ZoomArg::Quarter => Zoom::Quarter,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GridArg {
    Week,
    Day,
}

impl From<GridArg> for GridMode {
    fn from(arg: GridArg) -> Self {
        match arg {
            GridArg::Week => GridMode::Week,
            GridArg::Day => GridMode::Day,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config_service = match cli.config {
        Some(path) => ConfigService::new(path),
        None => ConfigService::from_default_location()?,
    };

    match cli.command {
        Command::Render(args) => render(&config_service, args),
        Command::Export {
            input,
            output,
            mappings,
        } => export(&input, &output, &mappings),
        Command::Config => show_config(&config_service),
    }
}

fn render(config_service: &ConfigService, args: RenderArgs) -> Result<()> {
    let config = config_service.load()?;
    let mapping = io::parse_column_mapping(&args.mappings)?;
    let imported = io::import_file(&args.input, Some(&mapping))?;
    log::info!(
        "Loaded {} project(s) from {}",
        imported.projects.len(),
        args.input.display()
    );

    let mut session = SessionState::new(imported.projects, imported.segments).with_config(&config);
    if let Some(zoom) = args.zoom {
        session.settings.zoom = zoom.into();
    }
    if let Some(grid) = args.grid {
        session.settings.grid_mode = grid.into();
    }
    if args.no_today {
        session.settings.show_today = false;
    }
    session.filter.search = args.search.unwrap_or_default();
    session.filter.work_types = args.work_types;
    session.filter.owners = args.owners;
    session.filter.progresses = args.progresses;
    session.selected_ids = args.selected;

    let view_start = args.start.unwrap_or(config.view.start);
    let view_end = args.end.unwrap_or(config.view.end);
    let today = args
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let payload = session.render(view_start, view_end, today)?;
    let json = if args.pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json).context("Failed to write payload")?;
    Ok(())
}

fn export(input: &Path, output: &Path, mappings: &[String]) -> Result<()> {
    let mapping = io::parse_column_mapping(mappings)?;
    let imported = io::import_file(input, Some(&mapping))?;
    let count = io::export_projects_to_file(&imported.projects, output)?;
    let format = FileFormat::from_path(output)?;
    println!("Wrote {} project(s) as {} to {}", count, format, output.display());
    Ok(())
}

fn show_config(config_service: &ConfigService) -> Result<()> {
    let config = config_service.load()?;
    println!("# {}", config_service.path().display());
    print!(
        "{}",
        toml::to_string_pretty(&config).context("Failed to format config")?
    );
    Ok(())
}
