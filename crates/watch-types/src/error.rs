use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WatchError {
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Page element not found: {0}")]
    PageElement(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),

    #[error("Gave up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for WatchError {
    fn from(e: serde_json::Error) -> Self {
        WatchError::Serialization(e.to_string())
    }
}
