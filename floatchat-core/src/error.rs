use thiserror::Error;

#[derive(Debug, Error)]
pub enum FloatChatError {
    #[error("Cannot analyse a profile with no depth levels")]
    EmptyProfile,

    #[error("Coordinate ({lat}, {lon}) is outside the legal geographic range")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
