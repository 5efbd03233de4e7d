use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use olympic_scatter::{Insets, PanZoom, PlotSettings, PlotState, Viewport};
use olympic_scatter::{dataset, stats, storage, viz};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "olympic-scatter",
    version,
    about = "Inspect, summarize & render Olympic country statistics as scatterplots"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the dataset's columns with their inferred types.
    Fields(FieldsArgs),
    /// Render a scatterplot snapshot (.svg, anything else is PNG).
    Render(RenderArgs),
    /// Print summary statistics of one field, optionally per category.
    Stats(StatsArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct FieldsArgs {
    /// CSV dataset with a header row
    #[arg(short, long)]
    data: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// CSV dataset with a header row
    #[arg(short, long)]
    data: PathBuf,
    /// Output image path
    #[arg(short, long)]
    out: PathBuf,
    /// JSON settings file; flags below override it
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Field on the x axis
    #[arg(long)]
    x: Option<String>,
    /// Field on the y axis
    #[arg(long)]
    y: Option<String>,
    /// Field driving point size
    #[arg(long)]
    size: Option<String>,
    /// Image width (default from settings, 720)
    #[arg(long)]
    width: Option<u32>,
    /// Image height (default from settings, 500)
    #[arg(long)]
    height: Option<u32>,
    /// Locale for tick labels (en, de, fr, es, it, pt, nl)
    #[arg(long)]
    locale: Option<String>,
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// CSV dataset with a header row
    #[arg(short, long)]
    data: PathBuf,
    /// Field to summarize
    #[arg(short, long)]
    field: String,
    /// Category field to group by
    #[arg(long)]
    by: Option<String>,
    /// Save results to file (format inferred by --format or extension)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Fields(args) => cmd_fields(args),
        Command::Render(args) => cmd_render(args),
        Command::Stats(args) => cmd_stats(args),
    }
}

fn cmd_fields(args: FieldsArgs) -> Result<()> {
    let table = dataset::load_csv(&args.data)
        .with_context(|| format!("failed to load {}", args.data.display()))?;
    for column in table.columns() {
        println!("{}\t{}", column.kind, column.name);
    }
    eprintln!("{} rows", table.len());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let mut settings = match &args.settings {
        Some(path) => PlotSettings::from_json_file(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?,
        None => PlotSettings::default(),
    };
    if let Some(x) = args.x {
        settings.x_field = x;
    }
    if let Some(y) = args.y {
        settings.y_field = y;
    }
    if let Some(size) = args.size {
        settings.size_field = size;
    }
    if let Some(locale) = args.locale {
        settings.locale = locale;
    }
    let width = args.width.unwrap_or(settings.window_width);
    let height = args.height.unwrap_or(settings.window_height);
    if !(50..=10_000).contains(&width) || !(50..=10_000).contains(&height) {
        anyhow::bail!("image size must be between 50 and 10000 pixels per side");
    }

    let table = dataset::load_for_plot(&args.data, &settings)
        .with_context(|| format!("failed to load {}", args.data.display()))?;
    let viewport = Viewport::new(width as i32, height as i32, Insets::default());
    let plot = PlotState::new(table, &settings, viewport)?;
    viz::render_snapshot(&plot, &PanZoom::default(), &args.out)?;
    eprintln!(
        "Wrote plot of {} points to {}",
        plot.visible_items().count(),
        args.out.display()
    );
    Ok(())
}

fn cmd_stats(args: StatsArgs) -> Result<()> {
    let table = dataset::load_csv(&args.data)
        .with_context(|| format!("failed to load {}", args.data.display()))?;
    let summaries = stats::field_summary(&table, &args.field, args.by.as_deref())?;

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&summaries, path)?,
            "json" => storage::save_json(&summaries, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", summaries.len(), path.display());
    }

    for s in summaries {
        println!(
            "{} • {}  count={} missing={}  min={} max={} mean={} median={}",
            s.group,
            s.field,
            s.count,
            s.missing,
            fmt_opt(s.min),
            fmt_opt(s.max),
            fmt_opt(s.mean),
            fmt_opt(s.median)
        );
    }
    Ok(())
}
