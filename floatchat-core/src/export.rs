//! Writes generated profiles to disk.

use crate::error::FloatChatError;
use csv::{Reader, Writer};
use floatchat_schemas::profile::{DepthLevel, ProfileRecord};
use std::fs;
use std::path::Path;

/// CSV sink with one `pres,temp,salinity` row per depth level.
pub struct ProfileCsvWriter {
    writer: Writer<fs::File>,
    path: String,
}

impl ProfileCsvWriter {
    pub fn new(path: &str) -> Result<Self, FloatChatError> {
        let writer =
            Writer::from_path(path).map_err(|e| FloatChatError::CsvError(path.to_string(), e))?;
        Ok(Self {
            writer,
            path: path.to_string(),
        })
    }

    pub fn write_levels(&mut self, levels: &[DepthLevel]) -> Result<(), FloatChatError> {
        for level in levels {
            self.writer
                .serialize(level)
                .map_err(|e| FloatChatError::CsvError(self.path.clone(), e))?;
        }
        self.writer
            .flush()
            .map_err(|e| FloatChatError::FileIO(self.path.clone(), e))?;
        Ok(())
    }
}

pub fn read_levels(path: &str) -> Result<Vec<DepthLevel>, FloatChatError> {
    let mut reader =
        Reader::from_path(path).map_err(|e| FloatChatError::CsvError(path.to_string(), e))?;
    reader
        .deserialize::<DepthLevel>()
        .map(|row| row.map_err(|e| FloatChatError::CsvError(path.to_string(), e)))
        .collect()
}

/// Saves the wire form next to the CSV so a run can be replayed.
pub fn write_record_json(path: &Path, record: &ProfileRecord) -> Result<(), FloatChatError> {
    let json = serde_json::to_string_pretty(record)?;
    fs::write(path, json).map_err(|e| FloatChatError::FileIO(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn csv_has_wire_headers_and_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.csv");
        let path = path.to_str().unwrap();
        let levels = vec![
            DepthLevel { pressure: 5.0, temperature: 27.31, salinity: 35.02 },
            DepthLevel { pressure: 15.0, temperature: 27.05, salinity: 35.1 },
        ];

        let mut writer = ProfileCsvWriter::new(path).unwrap();
        writer.write_levels(&levels).unwrap();

        let text = fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().next(), Some("pres,temp,salinity"));
        assert_eq!(read_levels(path).unwrap(), levels);
    }

    #[test]
    fn missing_csv_reports_path() {
        let err = read_levels("/definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }
}
