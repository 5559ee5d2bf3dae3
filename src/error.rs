use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("Malformed feed: {0}")]
    Feed(String),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Record(#[from] FatalRecord),

    #[error("Geocoding failed: {0}")]
    Geocode(#[from] GeocodeError),
}

/// A record that was accepted for extraction but could not be extracted.
/// Aborts the whole load.
#[derive(Debug, Error)]
#[error("Failed to extract record #{index} ({skipped} skipped so far): {message}\nJson: {json}")]
pub struct FatalRecord {
    pub message: String,
    /// 1-based position among all records seen so far, skipped ones included.
    pub index: usize,
    pub skipped: usize,
    pub json: String,
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Bulk postcode lookup failed: {0}")]
    Request(#[from] Box<ureq::Error>),

    #[error("Failed to decode bulk postcode response: {0}")]
    Decode(#[from] std::io::Error),

    #[error("Expected {expected} postcode results, got {got}")]
    Misaligned { expected: usize, got: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Directory queried before it was loaded")]
    NotLoaded,

    #[error("No records indexed for city {0:?}")]
    UnknownCity(String),
}
