//! Load-and-scatter driver.
//!
//! [`TermScatterPipeline`] owns the current document, its tokens and the RNG
//! that draws request seeds. Each load replaces the document wholesale and
//! returns a fresh batch of requests; earlier batches are never retracted.
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::config::ScatterConfig;
use crate::error::Result;
use crate::scatter::events::{EventSink, ScatterEvent, ScatterEventKind};
use crate::scatter::runner::{run_all_with_events, ScatterResult};
use crate::source::DocumentSource;
use crate::terms::WatchTerm;
use crate::text::{tokenize, SourceDocument, TokenSequence};

pub struct TermScatterPipeline {
    config: ScatterConfig,
    document: Option<SourceDocument>,
    tokens: TokenSequence,
    rng: StdRng,
}

impl TermScatterPipeline {
    /// Creates a pipeline after validating `config`.
    pub fn try_new(config: ScatterConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            config,
            document: None,
            tokens: TokenSequence::default(),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &ScatterConfig {
        &self.config
    }

    pub fn terms(&self) -> &[WatchTerm] {
        &self.config.terms
    }

    /// The last loaded document, if any.
    pub fn document(&self) -> Option<&SourceDocument> {
        self.document.as_ref()
    }

    /// Tokens of the last loaded document; empty before the first load.
    pub fn tokens(&self) -> &TokenSequence {
        &self.tokens
    }

    /// Stores `raw_text`, tokenizes it and scatters every watch term.
    pub fn load(&mut self, raw_text: impl Into<String>) -> ScatterResult {
        self.load_with_events(raw_text, &mut ())
    }

    /// Like [`Self::load`], reporting progress to `sink`.
    pub fn load_with_events(
        &mut self,
        raw_text: impl Into<String>,
        sink: &mut dyn EventSink,
    ) -> ScatterResult {
        self.load_document(SourceDocument::new(raw_text), sink)
    }

    /// Fetches from `source` and loads the result.
    ///
    /// On failure the previous document and tokens are kept and the error is returned.
    pub fn load_from(&mut self, source: &dyn DocumentSource) -> Result<ScatterResult> {
        self.load_from_with_events(source, &mut ())
    }

    pub fn load_from_with_events(
        &mut self,
        source: &dyn DocumentSource,
        sink: &mut dyn EventSink,
    ) -> Result<ScatterResult> {
        match source.fetch() {
            Ok(doc) => Ok(self.load_document(doc, sink)),
            Err(err) => {
                warn!("Fetching '{}' failed: {}.", source.describe(), err);
                if sink.wants(ScatterEventKind::Warning) {
                    sink.send(ScatterEvent::Warning {
                        context: format!("source:{}", source.describe()),
                        message: err.to_string(),
                    });
                }
                Err(err.into())
            }
        }
    }

    /// Loads an already fetched document.
    pub fn load_document(
        &mut self,
        doc: SourceDocument,
        sink: &mut dyn EventSink,
    ) -> ScatterResult {
        let tokens = tokenize(&doc);
        let bytes = doc.len();

        if doc.is_empty() || tokens.iter().all(str::is_empty) {
            warn!(
                "Document has no words ({} bytes, {} tokens).",
                bytes,
                tokens.len()
            );
            if sink.wants(ScatterEventKind::Warning) {
                sink.send(ScatterEvent::Warning {
                    context: "document".into(),
                    message: "Document has no words".into(),
                });
            }
        }

        if sink.wants(ScatterEventKind::DocumentLoaded) {
            sink.send(ScatterEvent::DocumentLoaded {
                bytes,
                tokens: tokens.len(),
            });
        }

        self.document = Some(doc);
        self.tokens = tokens;

        let result = run_all_with_events(
            &self.tokens,
            &self.config.terms,
            &self.config,
            &mut self.rng,
            sink,
        );
        info!(
            "Loaded document | bytes: {} | tokens: {} | occurrences: {} | requests: {}.",
            bytes,
            result.tokens_scanned,
            result.total_occurrences(),
            result.requests.len()
        );

        result
    }
}
