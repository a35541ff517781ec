//! CLI definition using clap

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vitrine_domain::model::Category;
use vitrine_types::OutputFormat;

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse().map_err(|e: vitrine_types::Error| e.to_string())
}

/// Which part of the catalog to list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFilter {
    #[default]
    All,
    Sale,
    Rent,
    Residences,
}

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(version)]
#[command(about = "Vehicle and residence catalog with reservations, kept in a local JSON document")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file path (defaults to the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List catalog items
    List {
        #[arg(long, value_enum, default_value_t = ListFilter::All)]
        filter: ListFilter,
    },

    /// Show one item
    Show { id: u64 },

    /// Add a vehicle
    AddVehicle {
        #[arg(long)]
        title: String,

        /// Price; invalid values count as 0
        #[arg(long, default_value = "0")]
        price: String,

        /// sale or rent (vente / location accepted)
        #[arg(long, value_parser = parse_category, default_value = "sale")]
        category: Category,

        /// Vehicle class (e.g. "SUV")
        #[arg(long = "type", default_value = "")]
        vehicle_type: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        image: String,

        /// Comma-separated features
        #[arg(long, default_value = "")]
        features: String,
    },

    /// Add a residence (always for rent)
    AddResidence {
        #[arg(long)]
        title: String,

        /// Monthly rent; invalid values count as 0
        #[arg(long, default_value = "0")]
        price: String,

        #[arg(long, default_value = "")]
        location: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        image: String,

        /// Comma-separated features
        #[arg(long, default_value = "")]
        features: String,
    },

    /// Update fields of an item
    Update {
        id: u64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,

        #[arg(long = "type")]
        vehicle_type: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        image: Option<String>,

        /// Comma-separated features (replaces the list)
        #[arg(long)]
        features: Option<String>,

        #[arg(long)]
        available: Option<bool>,
    },

    /// Delete an item
    Delete { id: u64 },

    /// Flip an item's availability
    Toggle { id: u64 },

    /// Book an item
    Reserve {
        /// Item id
        #[arg(long)]
        item: u64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        /// Requested date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        #[arg(long)]
        message: Option<String>,
    },

    /// List reservations
    Reservations,

    /// Set a reservation's status (pending, confirmed, cancelled, or any text)
    Status { id: u64, status: String },

    /// Show the admin dashboard
    Stats,

    /// Show or update site settings
    Settings {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Comma-separated extra phone numbers
        #[arg(long)]
        other_phones: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        weekday_hours: Option<String>,

        #[arg(long)]
        saturday_hours: Option<String>,
    },

    /// Export the whole document to a JSON file
    Export {
        /// Output file (defaults to vitrine-backup-<date>.json in the current directory)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Replace the whole document with a JSON file
    Import {
        file: PathBuf,

        /// Confirm replacing all current data
        #[arg(long)]
        yes: bool,
    },

    /// Save a backup copy next to the document
    Backup,

    /// Replace the document with the backup copy
    RestoreBackup {
        /// Confirm replacing all current data
        #[arg(long)]
        yes: bool,
    },

    /// Reset the document to the sample catalog
    Reset {
        /// Confirm replacing all current data
        #[arg(long)]
        yes: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set log level (error, warn, info, debug, trace)
        #[arg(long)]
        set_log_level: Option<String>,

        /// Set storage quota in bytes (0 removes it)
        #[arg(long)]
        set_quota: Option<usize>,

        /// Set messaging number for booking notifications
        #[arg(long)]
        set_whatsapp: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
