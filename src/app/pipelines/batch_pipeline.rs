use crate::core::lookup::LookupEngine;
use crate::core::{
    BatchResult, ConfigProvider, Lookup, OutputFormat, Pipeline, Reading, ReadingSource, Storage,
};
use crate::utils::error::{LookupError, Result};
use std::path::Path;

const CSV_HEADER: [&str; 5] = [
    "model",
    "serial",
    "manufacturer",
    "date_of_manufacture",
    "determined",
];

pub struct CsvBatchPipeline<R: ReadingSource, S: Storage, C: ConfigProvider> {
    pub(crate) source: R,
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) engine: LookupEngine,
}

impl<R: ReadingSource, S: Storage, C: ConfigProvider> CsvBatchPipeline<R, S, C> {
    pub fn new(source: R, storage: S, config: C) -> Self {
        Self::with_engine(source, storage, config, LookupEngine::default())
    }

    pub fn with_engine(source: R, storage: S, config: C, engine: LookupEngine) -> Self {
        Self {
            source,
            storage,
            config,
            engine,
        }
    }
}

pub fn render_csv(lookups: &[Lookup]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for lookup in lookups {
        writer.serialize(lookup)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| LookupError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| LookupError::InvalidReadingError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

impl<R: ReadingSource, S: Storage, C: ConfigProvider> Pipeline for CsvBatchPipeline<R, S, C> {
    fn extract(&self) -> Result<Vec<Reading>> {
        self.source.readings()
    }

    fn transform(&self, readings: Vec<Reading>) -> Result<BatchResult> {
        let lookups: Vec<Lookup> = readings.iter().map(|r| self.engine.lookup(r)).collect();

        for lookup in lookups.iter().filter(|l| !l.determined) {
            tracing::debug!(
                "No date for model '{}' serial '{}': {}",
                lookup.model,
                lookup.serial,
                lookup.date
            );
        }

        let csv_output = render_csv(&lookups)?;
        let json_output = serde_json::to_string_pretty(&lookups)?;

        Ok(BatchResult {
            lookups,
            csv_output,
            json_output,
        })
    }

    fn load(&self, result: &BatchResult) -> Result<String> {
        let mut written = Vec::new();

        for format in self.config.output_formats() {
            let filename = self.config.output_filename(format);
            let body = match format {
                OutputFormat::Csv => &result.csv_output,
                OutputFormat::Json => &result.json_output,
            };
            self.storage.write_file(&filename, body.as_bytes())?;
            tracing::debug!("Wrote {}", filename);
            written.push(filename);
        }

        let output_path = match written.first() {
            Some(first) => Path::new(self.config.output_path())
                .join(first)
                .to_string_lossy()
                .into_owned(),
            None => {
                tracing::warn!("No output formats configured, nothing written");
                self.config.output_path().to_string()
            }
        };
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::links::LinkTemplate;
    use crate::adapters::scan::ManualEntry;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Rc<RefCell<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn get_file(&self, path: &str) -> Option<String> {
            self.files
                .borrow()
                .get(path)
                .map(|b| String::from_utf8_lossy(b).into_owned())
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                LookupError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        formats: Vec<OutputFormat>,
    }

    impl ConfigProvider for MockConfig {
        fn output_path(&self) -> &str {
            "test_output"
        }

        fn output_formats(&self) -> Vec<OutputFormat> {
            self.formats.clone()
        }

        fn output_filename(&self, format: OutputFormat) -> String {
            match format {
                OutputFormat::Csv => "lookups.csv".to_string(),
                OutputFormat::Json => "lookups.json".to_string(),
            }
        }

        fn link_catalog(&self) -> Vec<LinkTemplate> {
            Vec::new()
        }
    }

    fn pipeline(
        formats: Vec<OutputFormat>,
    ) -> (CsvBatchPipeline<ManualEntry, MockStorage, MockConfig>, MockStorage) {
        let storage = MockStorage::default();
        let pipeline = CsvBatchPipeline::new(
            ManualEntry::new("JB645RKSS", "AZ1"),
            storage.clone(),
            MockConfig { formats },
        );
        (pipeline, storage)
    }

    #[test]
    fn test_transform_renders_csv_and_json() {
        let (pipeline, _) = pipeline(vec![OutputFormat::Csv]);
        let result = pipeline
            .transform(vec![
                Reading::new("JB645RKSS", "AZ1"),
                Reading::new("KM7575", "1845"),
            ])
            .unwrap();

        let lines: Vec<&str> = result.csv_output.lines().collect();
        assert_eq!(lines[0], "model,serial,manufacturer,date_of_manufacture,determined");
        assert_eq!(lines[1], "JB645RKSS,AZ1,GE,January 2024,true");
        assert!(lines[2].starts_with("KM7575,1845,Miele,"));
        assert!(lines[2].ends_with(",false"));

        let json: serde_json::Value = serde_json::from_str(&result.json_output).unwrap();
        assert_eq!(json[0]["manufacturer"], "GE");
        assert_eq!(json[0]["date_of_manufacture"], "January 2024");
        assert_eq!(json[1]["determined"], false);
    }

    #[test]
    fn test_transform_empty_input() {
        let (pipeline, _) = pipeline(vec![OutputFormat::Csv]);
        let result = pipeline.transform(vec![]).unwrap();
        assert_eq!(
            result.csv_output,
            "model,serial,manufacturer,date_of_manufacture,determined\n"
        );
        assert_eq!(result.json_output, "[]");
    }

    #[test]
    fn test_load_writes_each_configured_format() {
        let (pipeline, storage) = pipeline(vec![OutputFormat::Json, OutputFormat::Csv]);
        let readings = pipeline.extract().unwrap();
        let result = pipeline.transform(readings).unwrap();
        let output_path = pipeline.load(&result).unwrap();

        assert_eq!(
            Path::new(&output_path),
            Path::new("test_output").join("lookups.json")
        );
        assert!(storage.get_file("lookups.csv").unwrap().contains("January 2024"));
        assert!(storage.get_file("lookups.json").unwrap().contains("\"GE\""));
    }

    #[test]
    fn test_load_without_formats_writes_nothing() {
        let (pipeline, storage) = pipeline(vec![]);
        let result = pipeline.transform(vec![]).unwrap();
        assert_eq!(pipeline.load(&result).unwrap(), "test_output");
        assert!(storage.files.borrow().is_empty());
    }
}
