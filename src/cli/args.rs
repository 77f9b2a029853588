use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_SNAPSHOT: &str = "chennai_housing.html";
pub const DEFAULT_CLEAN_CSV: &str = "chennai_housing_clean.csv";
pub const DEFAULT_FINAL_CSV: &str = "chennai_housing_final.csv";
pub const DEFAULT_DASHBOARD: &str = "chennai_dashboard.html";

#[derive(Parser)]
#[command(name = "housing-insights")]
#[command(about = "Scrape, clean, geocode and analyse real-estate listings")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the search page in headless Chrome and save its markup
    Fetch {
        #[arg(short, long, default_value = DEFAULT_SNAPSHOT)]
        output: PathBuf,

        #[arg(long, help = "Search page URL [default: HOUSING_SEARCH_URL or MagicBricks Chennai]")]
        url: Option<String>,

        #[arg(long, help = "Maximum number of scrolls to trigger lazy loading")]
        scrolls: Option<usize>,
    },

    /// Extract listings from a saved page into the cleaned CSV
    Extract {
        #[arg(short, long, default_value = DEFAULT_SNAPSHOT)]
        input: PathBuf,

        #[arg(short, long, default_value = DEFAULT_CLEAN_CSV)]
        output: PathBuf,
    },

    /// Attach coordinates to each location and keep only mappable listings
    Geocode {
        #[arg(short, long, default_value = DEFAULT_CLEAN_CSV)]
        input: PathBuf,

        #[arg(short, long, default_value = DEFAULT_FINAL_CSV)]
        output: PathBuf,
    },

    /// Filter the final dataset and render the HTML dashboard
    Dashboard {
        #[arg(short, long, default_value = DEFAULT_FINAL_CSV)]
        input: PathBuf,

        #[arg(short, long, default_value = DEFAULT_DASHBOARD)]
        output: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Run fetch, extract, geocode and dashboard in order
    Pipeline {
        #[arg(long, default_value = DEFAULT_SNAPSHOT)]
        snapshot: PathBuf,

        #[arg(long, default_value = DEFAULT_CLEAN_CSV)]
        clean: PathBuf,

        #[arg(long = "final", default_value = DEFAULT_FINAL_CSV)]
        final_csv: PathBuf,

        #[arg(long, default_value = DEFAULT_DASHBOARD)]
        dashboard: PathBuf,

        #[arg(long, help = "Reuse the existing snapshot instead of opening a browser")]
        skip_fetch: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(
        short = 'l',
        long = "location",
        help = "Location to include (repeatable) [default: first three alphabetically]"
    )]
    pub locations: Vec<String>,

    #[arg(long, help = "Lowest price in rupees [default: dataset minimum]")]
    pub min_price: Option<i64>,

    #[arg(long, help = "Highest price in rupees [default: dataset maximum]")]
    pub max_price: Option<i64>,
}
