use crate::cli::args::{Cli, Commands, FilterArgs, OutputFormat, ViewSelection};
use crate::cli::render;
use crate::config::DashboardConfig;
use crate::dashboard::{Dashboard, DashboardQuery, DashboardView};
use crate::error::Result;
use crate::models::ObservationTable;
use crate::processors::filter::CountryFilter;
use crate::processors::SessionCache;
use crate::readers::ObservationReader;
use crate::utils::constants::ALL_COUNTRIES;
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvExporter;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(cli, &mut out)
}

/// Execute a parsed command, writing user-facing output to `out`
pub fn run_with_output<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    init_tracing(cli.verbose, cli.log_file.as_deref())?;

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(input) = cli.input {
        config.data_path = input;
    }

    let mut cache = SessionCache::new(ObservationReader::with_hemisphere_mode(
        config.hemisphere_mode,
    ));

    match cli.command {
        Commands::Report {
            filter,
            view,
            format,
            sample,
        } => {
            if let Some(rows) = sample {
                config.sample_rows = rows;
            }

            let silent = cli.quiet || format == OutputFormat::Json;
            let table = load_table(&mut cache, &config.data_path, silent)?;

            let dashboard = Dashboard::new(&config);
            let result = dashboard.run(&table, &to_query(&filter))?;

            match format {
                OutputFormat::Json => write_json(out, &result, view)?,
                OutputFormat::Text => write_text(out, &result, view)?,
            }
        }

        Commands::Countries => {
            let table = load_table(&mut cache, &config.data_path, cli.quiet)?;

            writeln!(out, "{}", ALL_COUNTRIES)?;
            for country in table.countries() {
                writeln!(out, "{}", country)?;
            }
        }

        Commands::Export { filter, output } => {
            let table = load_table(&mut cache, &config.data_path, cli.quiet)?;

            let dashboard = Dashboard::new(&config);
            let filtered = dashboard.filter(&table, &to_query(&filter))?;

            let output_path = output.unwrap_or_else(|| config.export_path.clone());
            let info = CsvExporter::new().write_to_path(&filtered, &output_path)?;

            writeln!(out, "Exported {} of {} records", filtered.len(), table.len())?;
            writeln!(out, "{}", info.summary())?;
        }
    }

    Ok(())
}

fn to_query(filter: &FilterArgs) -> DashboardQuery {
    let country: CountryFilter = filter.country.parse().unwrap_or_default();
    DashboardQuery::new(filter.from, filter.to, country)
}

fn load_table(
    cache: &mut SessionCache,
    path: &Path,
    silent: bool,
) -> Result<Arc<ObservationTable>> {
    let progress = ProgressReporter::new_spinner("Loading data...", silent);

    match cache.get_or_load(path) {
        Ok(table) => {
            progress.finish_and_clear();
            debug!(rows = table.len(), "Observation table available");
            Ok(table)
        }
        Err(e) => {
            progress.finish_with_message("Loading failed");
            Err(e)
        }
    }
}

fn write_text<W: Write>(
    out: &mut W,
    view: &DashboardView,
    selection: ViewSelection,
) -> Result<()> {
    let header = match view.years {
        Some(years) => format!("Climate data {} ({})", years, view.country),
        None => format!("Climate data ({})", view.country),
    };
    writeln!(out, "{}\n", header)?;

    let sections = [
        (ViewSelection::Summary, format!("{}\n", view.summary.summary())),
        (ViewSelection::Yearly, render::render_yearly(&view.yearly_trend)),
        (
            ViewSelection::Distribution,
            render::render_distribution(&view.distribution),
        ),
        (ViewSelection::Cities, render::render_cities(&view.hottest_cities)),
        (ViewSelection::Monthly, render::render_monthly(&view.monthly_trend)),
        (ViewSelection::Sample, render::render_sample(&view.sample)),
    ];

    for (kind, text) in sections {
        if selection.includes(kind) {
            writeln!(out, "{}", text)?;
        }
    }

    Ok(())
}

fn write_json<W: Write>(
    out: &mut W,
    view: &DashboardView,
    selection: ViewSelection,
) -> Result<()> {
    let json = match selection {
        ViewSelection::All => serde_json::to_string_pretty(view)?,
        ViewSelection::Summary => serde_json::to_string_pretty(&view.summary)?,
        ViewSelection::Yearly => serde_json::to_string_pretty(&view.yearly_trend)?,
        ViewSelection::Distribution => serde_json::to_string_pretty(&view.distribution)?,
        ViewSelection::Cities => serde_json::to_string_pretty(&view.hottest_cities)?,
        ViewSelection::Monthly => serde_json::to_string_pretty(&view.monthly_trend)?,
        ViewSelection::Sample => serde_json::to_string_pretty(&view.sample)?,
    };
    writeln!(out, "{}", json)?;
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over `--verbose`; a second
/// call (e.g. from tests) leaves the first subscriber in place.
fn init_tracing(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let _ = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    Ok(())
}
