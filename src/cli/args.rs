use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "climate-dashboard")]
#[command(about = "Analyze city-level temperature records by year range and country")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Configuration file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Input CSV file [default: climate_change_earth.csv]"
    )]
    pub input: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Hide the loading spinner")]
    pub quiet: bool,
}

/// Year range and country selection shared by the data commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long, help = "First year to include [default: earliest year in data]")]
    pub from: Option<i32>,

    #[arg(long, help = "Last year to include [default: latest year in data]")]
    pub to: Option<i32>,

    #[arg(short, long, help = "Country to include, or 'All'", default_value = "All")]
    pub country: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show summary metrics, trend views and a data sample
    Report {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, value_enum, default_value_t = ViewSelection::All)]
        view: ViewSelection,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[arg(long, help = "Rows in the data sample [default: from config]")]
        sample: Option<usize>,
    },

    /// List the countries available for filtering
    Countries,

    /// Write the filtered rows to a CSV file
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(
            short,
            long,
            help = "Output CSV file path [default: filtered_climate_data.csv]"
        )]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewSelection {
    All,
    Summary,
    Yearly,
    Distribution,
    Cities,
    Monthly,
    Sample,
}

impl ViewSelection {
    pub fn includes(&self, view: ViewSelection) -> bool {
        *self == ViewSelection::All || *self == view
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
