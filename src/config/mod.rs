pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::Manufacturer;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "appliance-date")]
#[command(about = "Find an appliance's manufacturer and manufacture date from its model and serial numbers")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    /// Path to an optional TOML settings file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines on stderr")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Detect the manufacturer and decode the manufacture date
    Lookup {
        #[arg(short, long)]
        model: String,
        #[arg(short, long)]
        serial: String,
    },
    /// Detect the manufacturer from a model number only
    Detect {
        #[arg(short, long)]
        model: String,
    },
    /// Decode a serial number for a known manufacturer
    Decode {
        #[arg(long)]
        manufacturer: Manufacturer,
        #[arg(short, long)]
        serial: String,
    },
    /// Look up the model/serial found in a saved label-scan response ("-" for stdin)
    Scan {
        #[arg(short, long)]
        response: String,
    },
    /// Decode every model/serial pair in a CSV or scan-response JSON file
    Batch {
        #[arg(short, long)]
        input: String,
        #[arg(long)]
        output_path: Option<String>,
        #[arg(long, value_delimiter = ',')]
        formats: Option<Vec<String>>,
    },
    /// Print parts and manuals links for a model number
    Links {
        #[arg(short, long)]
        model: String,
    },
}
