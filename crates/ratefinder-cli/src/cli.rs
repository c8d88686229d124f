//! CLI definition using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use ratefinder_domain::model::{EquipmentGroup, ServiceType};
use ratefinder_types::{GeocoderKind, OutputFormat};

#[derive(Parser)]
#[command(name = "ratefinder")]
#[command(version)]
#[command(about = "Search freight lane rate tables by location, equipment and service")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Lane table (CSV). Uses config value, then the built-in sample, if not specified.
    #[arg(long, short = 'd', global = true)]
    pub data: Option<PathBuf>,

    /// TOML file with extra column aliases. Uses config value if not specified.
    #[arg(long, global = true)]
    pub aliases: Option<PathBuf>,

    /// Geocoder backend. Uses config value if not specified.
    #[arg(long, global = true)]
    pub geocoder: Option<GeocoderKind>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose logging (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find lanes touching an origin and/or destination area
    Search {
        /// Origin place name
        #[arg(long, short = 'o')]
        origin: Option<String>,

        /// Origin postal code
        #[arg(long)]
        origin_postal: Option<String>,

        /// Origin country (used with --origin-postal)
        #[arg(long)]
        origin_country: Option<String>,

        /// Origin coordinates "lat,lon"
        #[arg(long, allow_hyphen_values = true)]
        origin_coords: Option<String>,

        /// Destination place name
        #[arg(long, short = 't')]
        destination: Option<String>,

        /// Destination postal code
        #[arg(long)]
        destination_postal: Option<String>,

        /// Destination country (used with --destination-postal)
        #[arg(long)]
        destination_country: Option<String>,

        /// Destination coordinates "lat,lon"
        #[arg(long, allow_hyphen_values = true)]
        destination_coords: Option<String>,

        /// Search radius in miles. Uses config value if not specified.
        #[arg(long, short = 'r', allow_hyphen_values = true)]
        radius: Option<f64>,

        /// Service types to keep (FTL, LTL). All if not specified.
        #[arg(long = "service", value_delimiter = ',')]
        services: Vec<ServiceType>,

        /// Equipment groups to keep (dry van, reefer, flatbed, ...). All if not specified.
        #[arg(long = "equipment", short = 'e', value_delimiter = ',')]
        equipment: Vec<EquipmentGroup>,

        /// Mode type to keep (exact, case-insensitive)
        #[arg(long)]
        mode: Option<String>,

        /// List lane summaries grouped by equipment
        #[arg(long)]
        by_equipment: bool,

        /// Write matching rows to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write matching rows and lane summaries to an Excel file
        #[arg(long)]
        excel: Option<PathBuf>,

        /// Write route segments and viewport to a JSON file
        #[arg(long)]
        map: Option<PathBuf>,
    },

    /// Best carrier quotes for one city or state pairing
    Carriers {
        /// Origin city (or state with --by-state)
        #[arg(long, short = 'o')]
        origin: String,

        /// Destination city (or state with --by-state)
        #[arg(long, short = 't')]
        destination: String,

        /// Pair on origin/destination state instead of city
        #[arg(long)]
        by_state: bool,

        /// Equipment group. All equipment if not specified.
        #[arg(long, short = 'e')]
        equipment: Option<EquipmentGroup>,

        /// Mode type to keep
        #[arg(long)]
        mode: Option<String>,

        /// Newest ship date first, cheapest rate breaking ties
        #[arg(long)]
        sort_by_date: bool,

        /// Number of quotes. Uses config value if not specified.
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// List pairing options: origins, destinations from an origin, modes, equipment
    Lanes {
        /// List states instead of cities
        #[arg(long)]
        by_state: bool,

        /// Also list destinations quoted from this origin
        #[arg(long, short = 'o')]
        origin: Option<String>,
    },

    /// Check a lane table: column mapping, row count, unparseable cells
    Validate {
        /// Path to CSV file
        file: PathBuf,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default search radius (miles)
        #[arg(long)]
        set_radius: Option<f64>,

        /// Set default number of carrier quotes
        #[arg(long)]
        set_max_results: Option<usize>,

        /// Set geocoder backend (nominatim, offline)
        #[arg(long)]
        set_geocoder: Option<GeocoderKind>,

        /// Set Nominatim base URL
        #[arg(long)]
        set_nominatim_url: Option<String>,

        /// Set geocode timeout in seconds
        #[arg(long)]
        set_timeout: Option<u64>,

        /// Set default output format (json, table)
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default lane table
        #[arg(long)]
        set_data_file: Option<PathBuf>,

        /// Set column alias file
        #[arg(long)]
        set_aliases_file: Option<PathBuf>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
