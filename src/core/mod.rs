pub mod batch;
pub mod decoder;
pub mod decoders;
pub mod detector;
pub mod lookup;

pub use crate::domain::model::{BatchResult, Lookup, ManufactureDate, Manufacturer, Reading};
pub use crate::domain::ports::{ConfigProvider, OutputFormat, Pipeline, ReadingSource, Storage};
pub use crate::utils::error::Result;
