use crate::adapters::scan::parse_scan_batch;
use crate::domain::model::Reading;
use crate::domain::ports::{ReadingSource, Storage};
use crate::utils::error::{LookupError, Result};

const REQUIRED_COLUMNS: [&str; 2] = ["model", "serial"];

/// Reads a CSV sheet with `model` and `serial` header columns. Other columns
/// are ignored and empty cells are absent values.
pub fn parse_csv_readings(data: &[u8]) -> Result<Vec<Reading>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h.trim() == **col))
    {
        return Err(LookupError::InvalidReadingError {
            message: format!("CSV header has no '{}' column", missing),
        });
    }

    let mut readings = Vec::new();
    for row in reader.deserialize() {
        let reading: Reading = row?;
        readings.push(reading);
    }
    Ok(readings)
}

/// Readings from a file: `.json` files hold scan responses, anything else is
/// a CSV sheet.
pub struct FileReadingSource<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> FileReadingSource<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    fn is_json(&self) -> bool {
        std::path::Path::new(&self.path)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

impl<S: Storage> ReadingSource for FileReadingSource<S> {
    fn readings(&self) -> Result<Vec<Reading>> {
        let data = self.storage.read_file(&self.path)?;
        tracing::debug!("Read {} bytes from {}", data.len(), self.path);

        if self.is_json() {
            let body = String::from_utf8(data).map_err(|e| LookupError::InvalidReadingError {
                message: format!("{} is not UTF-8: {}", self.path, e),
            })?;
            parse_scan_batch(&body)
        } else {
            parse_csv_readings(&data)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_with_extra_columns_and_empty_cells() {
        let data = b"site,model,serial\nkitchen,JB645RKSS,AZ1\ngarage,KM7575,\n";
        let readings = parse_csv_readings(data).unwrap();

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0], Reading::new("JB645RKSS", "AZ1"));
        assert_eq!(readings[1].model(), "KM7575");
        assert_eq!(readings[1].serial(), "");
    }

    #[test]
    fn test_csv_without_required_header() {
        let err = parse_csv_readings(b"JB645RKSS,AZ1\n").unwrap_err();
        assert!(err.to_string().contains("model"));
    }

    #[test]
    fn test_header_only_csv() {
        assert!(parse_csv_readings(b"model,serial\n").unwrap().is_empty());
    }
}
