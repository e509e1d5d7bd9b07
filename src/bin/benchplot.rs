use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use benchplot::output::{PanelDocument, PlotConfig, PlottersRenderer};
use benchplot::records::JsonDirectory;
use benchplot::report::{run_report, OutputFormat, ReportConfig};

#[derive(Parser)]
#[command(author, version, about = "Render benchmark result files into throughput charts")]
struct Args {
    /// Report file (TOML); the builtin camera-ready report when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the result files
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// Combined document; pages are written next to it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Image format of pages and document (svg or png)
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Also write the numbers behind each page as CSV
    #[arg(long)]
    csv: bool,

    /// Print the charts of the report and exit
    #[arg(long)]
    list: bool,

    /// Page width in pixels
    #[arg(long, default_value = "1024")]
    width: u32,

    /// Page height in pixels
    #[arg(long, default_value = "768")]
    height: u32,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = match &args.config {
        Some(path) => ReportConfig::from_file(path)
            .with_context(|| format!("loading report {}", path.display()))?,
        None => ReportConfig::camera_ready(),
    };
    if let Some(dir) = args.results_dir {
        config.results_dir = dir;
    }
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    config.export_csv |= args.csv;

    if args.list {
        for chart in &config.charts {
            println!(
                "{:<32} {:<40} -> {}",
                chart.name,
                chart.source,
                config.page_path(chart).display()
            );
        }
        return Ok(());
    }

    log::info!(
        "building {} chart(s) from {}",
        config.charts.len(),
        config.results_dir.display()
    );

    let plot_config = PlotConfig::default().size(args.width, args.height);
    let source = JsonDirectory::new(&config.results_dir);
    let renderer = PlottersRenderer::new(plot_config.clone());
    let document = PanelDocument::new(plot_config);

    let summary = run_report(&config, &source, &renderer, &document).context("report failed")?;

    for page in &summary.pages {
        println!("{}", page.path.display());
    }
    for csv in &summary.exports {
        println!("{}", csv.display());
    }
    println!("{}", summary.document.display());
    Ok(())
}
