//! Document sources and one-shot background fetches.
//!
//! A [`DocumentSource`] returns either the full document text or a
//! [`FetchError`]. [`spawn_fetch`] runs a source on a worker thread so the frame
//! loop can keep going; the caller polls the returned [`PendingDocument`] once
//! per frame. There is no retry and no cancellation.
use std::path::PathBuf;
use std::thread;

use crossbeam_channel::{Receiver, TryRecvError};
use tracing::{info, warn};

#[cfg(feature = "http")]
use crate::config::ScatterConfig;
use crate::error::FetchError;
use crate::text::SourceDocument;

/// Something that can produce a source document.
pub trait DocumentSource: Send {
    /// Human-readable name used in logs and errors.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<SourceDocument, FetchError>;
}

/// In-memory text.
#[derive(Debug, Clone)]
pub struct TextSource {
    text: String,
}

impl TextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl DocumentSource for TextSource {
    fn describe(&self) -> String {
        format!("inline text ({} bytes)", self.text.len())
    }

    fn fetch(&self) -> Result<SourceDocument, FetchError> {
        Ok(SourceDocument::new(self.text.clone()))
    }
}

/// A UTF-8 text file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<SourceDocument, FetchError> {
        std::fs::read_to_string(&self.path)
            .map(SourceDocument::new)
            .map_err(|error| FetchError::Io {
                source_name: self.describe(),
                error,
            })
    }
}

/// A document retrieved with an HTTP GET.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Source for `config.source_url`, if one is configured.
    pub fn from_config(config: &ScatterConfig) -> Option<Self> {
        config.source_url.as_deref().map(Self::new)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(feature = "http")]
impl DocumentSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<SourceDocument, FetchError> {
        let http_error = |message: String| FetchError::Http {
            url: self.url.clone(),
            message,
        };
        let response = ureq::get(&self.url)
            .call()
            .map_err(|e| http_error(e.to_string()))?;
        let text = response
            .into_string()
            .map_err(|e| http_error(e.to_string()))?;
        Ok(SourceDocument::new(text))
    }
}

/// A fetch running on a worker thread.
pub struct PendingDocument {
    source_name: String,
    rx: Receiver<Result<SourceDocument, FetchError>>,
    delivered: bool,
}

impl PendingDocument {
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Returns the outcome exactly once when the worker is done.
    ///
    /// `None` while the worker is still running and on every call after the
    /// outcome was handed out, so it is safe to poll once per frame.
    pub fn poll(&mut self) -> Option<Result<SourceDocument, FetchError>> {
        if self.delivered {
            return None;
        }
        let outcome = match self.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(self.disconnected()),
        };
        self.delivered = true;
        Some(outcome)
    }

    /// Whether [`Self::poll`] has already handed out the outcome.
    pub fn is_delivered(&self) -> bool {
        self.delivered
    }

    /// Blocks until the worker is done. Reports `Disconnected` if the outcome
    /// was already taken by [`Self::poll`].
    pub fn wait(self) -> Result<SourceDocument, FetchError> {
        match self.rx.recv() {
            Ok(result) => result,
            Err(_) => Err(self.disconnected()),
        }
    }

    fn disconnected(&self) -> FetchError {
        FetchError::Disconnected {
            source_name: self.source_name.clone(),
        }
    }
}

/// Fetches `source` on a new thread.
pub fn spawn_fetch<S: DocumentSource + 'static>(source: S) -> PendingDocument {
    let source_name = source.describe();
    let (tx, rx) = crossbeam_channel::bounded(1);
    let name = source_name.clone();

    thread::spawn(move || {
        let result = source.fetch();
        match &result {
            Ok(doc) => info!("Fetched '{}' ({} bytes).", name, doc.len()),
            Err(err) => warn!("Fetching '{}' failed: {}.", name, err),
        }
        let _ = tx.send(result);
    });

    PendingDocument {
        source_name,
        rx,
        delivered: false,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    struct PanickingSource;

    impl DocumentSource for PanickingSource {
        fn describe(&self) -> String {
            "panics".into()
        }

        fn fetch(&self) -> Result<SourceDocument, FetchError> {
            panic!("worker failure");
        }
    }

    #[test]
    fn text_source_returns_its_text() {
        let doc = TextSource::new("a rose").fetch().expect("in-memory fetch");
        assert_eq!(doc.text(), "a rose");
    }

    #[test]
    fn file_source_reads_and_reports_missing_files() {
        let dir = std::env::temp_dir().join(format!("term_scatter_src_{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("doc.txt");
        let mut file = std::fs::File::create(&path).expect("create file");
        file.write_all(b"The fox.").expect("write file");

        let doc = FileSource::new(&path).fetch().expect("file exists");
        assert_eq!(doc.text(), "The fox.");

        let err = FileSource::new(dir.join("missing.txt"))
            .fetch()
            .expect_err("file is missing");
        assert!(matches!(err, FetchError::Io { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn spawned_fetch_delivers_document() {
        let pending = spawn_fetch(TextSource::new("prince"));
        assert!(pending.source_name().starts_with("inline text"));
        let doc = pending.wait().expect("fetch succeeds");
        assert_eq!(doc.text(), "prince");
    }

    #[test]
    fn poll_eventually_yields_result() {
        let mut pending = spawn_fetch(TextSource::new("fox"));
        let outcome = loop {
            if let Some(outcome) = pending.poll() {
                break outcome;
            }
            thread::yield_now();
        };
        assert_eq!(outcome.expect("fetch succeeds").text(), "fox");
    }

    #[test]
    fn poll_after_delivery_stays_quiet() {
        let mut pending = spawn_fetch(TextSource::new("rose"));
        while pending.poll().is_none() {
            thread::yield_now();
        }
        assert!(pending.is_delivered());
        for _ in 0..3 {
            assert!(pending.poll().is_none());
        }
    }

    #[cfg(feature = "http")]
    #[test]
    fn http_source_follows_configured_url() {
        let config = ScatterConfig::default().with_source_url("https://example.invalid/doc.txt");
        let source = HttpSource::from_config(&config).expect("url configured");
        assert_eq!(source.url(), "https://example.invalid/doc.txt");

        let mut without = ScatterConfig::default();
        without.source_url = None;
        assert!(HttpSource::from_config(&without).is_none());
    }

    #[test]
    fn dead_worker_is_reported_as_disconnected() {
        let pending = spawn_fetch(PanickingSource);
        let err = pending.wait().expect_err("worker panicked");
        assert!(matches!(err, FetchError::Disconnected { ref source_name } if source_name == "panics"));
    }
}
