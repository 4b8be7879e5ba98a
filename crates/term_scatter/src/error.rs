//! Error types and result alias for the crate.
//!
//! [`enum@Error`] is the crate-wide error; [`FetchError`] describes why a
//! document source could not produce its text. Empty documents and terms with
//! no matches are not errors and only show up in the logs.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("config parse error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

/// Failure retrieving a source document.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("reading '{source_name}': {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    #[error("requesting '{url}': {message}")]
    Http { url: String, message: String },

    #[error("fetch worker for '{source_name}' exited without a result")]
    Disconnected { source_name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "boom"));
    }

    #[test]
    fn fetch_error_converts_and_keeps_context() {
        let err: Error = FetchError::Http {
            url: "https://example.invalid/a.txt".into(),
            message: "status 404".into(),
        }
        .into();
        assert!(matches!(err, Error::Fetch(FetchError::Http { .. })));
        let rendered = err.to_string();
        assert!(rendered.contains("example.invalid"));
        assert!(rendered.contains("404"));
    }
}
