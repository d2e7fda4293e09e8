use crate::adapters::links::LinkTemplate;
use crate::domain::model::{BatchResult, Reading};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

pub trait ConfigProvider {
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> Vec<OutputFormat>;
    fn output_filename(&self, format: OutputFormat) -> String;
    fn link_catalog(&self) -> Vec<LinkTemplate>;
}

/// Anything that yields (model, serial) pairs: manual entry, a saved scan
/// response, a CSV sheet.
pub trait ReadingSource {
    fn readings(&self) -> Result<Vec<Reading>>;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<Reading>>;
    fn transform(&self, readings: Vec<Reading>) -> Result<BatchResult>;
    fn load(&self, result: &BatchResult) -> Result<String>;
}
