//! Appliance manufacturer detection and manufacture-date decoding from
//! model and serial numbers.
//!
//! ```
//! use appliance_date::{detect_manufacturer, get_date_of_manufacture, Manufacturer};
//!
//! assert_eq!(detect_manufacturer("JB645RKSS"), Manufacturer::Ge);
//! assert_eq!(get_date_of_manufacture("JB645RKSS", "AZ123456"), "January 2024");
//! ```

pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use app::pipelines::CsvBatchPipeline;
pub use core::batch::{BatchEngine, BatchSummary};
pub use core::decoder::{decode_manufacture_date, DecoderTable};
pub use core::detector::detect_manufacturer;
pub use core::lookup::{get_date_of_manufacture, LookupEngine};
pub use domain::model::{Lookup, ManufactureDate, Manufacturer, Reading};
pub use utils::error::{LookupError, Result};
