//! Runs every watch term over a token sequence and aggregates the requests.
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ScatterConfig;
use crate::scatter::events::{EventSink, ScatterEvent, ScatterEventKind};
use crate::scatter::{scatter_for_term_internal, PlacementRequest};
use crate::terms::{ColorTag, WatchTerm};
use crate::text::TokenSequence;

/// Occurrence count of one watch term.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermCount {
    pub term: String,
    pub color_tag: ColorTag,
    pub occurrences: usize,
}

/// Result of scanning a token sequence for all watch terms.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterResult {
    /// Requests grouped by term in configuration order, ascending token index within a term.
    pub requests: Vec<PlacementRequest>,
    /// One entry per watch term, in configuration order.
    pub counts: Vec<TermCount>,
    /// Number of tokens scanned, including empty ones.
    pub tokens_scanned: usize,
}

impl ScatterResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests carrying `tag`.
    pub fn requests_for(&self, tag: ColorTag) -> impl Iterator<Item = &PlacementRequest> + '_ {
        self.requests.iter().filter(move |r| r.color_tag == tag)
    }

    /// Total occurrences over all terms.
    pub fn total_occurrences(&self) -> usize {
        self.counts.iter().map(|c| c.occurrences).sum()
    }
}

/// Scans `tokens` for each of `terms` in order and concatenates the requests.
///
/// Requests are not deduplicated across terms: if two terms match the same
/// token, both emit their own batch.
pub fn run_all<R: RngCore>(
    tokens: &TokenSequence,
    terms: &[WatchTerm],
    config: &ScatterConfig,
    rng: &mut R,
) -> ScatterResult {
    run_all_internal(tokens, terms, config, rng, &mut ())
}

/// Like [`run_all`], reporting progress to `sink`.
pub fn run_all_with_events<R: RngCore>(
    tokens: &TokenSequence,
    terms: &[WatchTerm],
    config: &ScatterConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> ScatterResult {
    run_all_internal(tokens, terms, config, rng, sink)
}

fn run_all_internal<R: RngCore>(
    tokens: &TokenSequence,
    terms: &[WatchTerm],
    config: &ScatterConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> ScatterResult {
    let mut result = ScatterResult {
        requests: Vec::new(),
        counts: Vec::with_capacity(terms.len()),
        tokens_scanned: tokens.len(),
    };

    for (index, term) in terms.iter().enumerate() {
        let requests = scatter_for_term_internal(term, index, tokens, config, rng, sink);
        let occurrences = if tokens.is_empty() {
            0
        } else {
            tokens.count(&term.term)
        };
        debug!(
            "Term {}: '{}' ({:?}) | occurrences: {} | requests: {}.",
            index,
            term.term,
            term.color_tag,
            occurrences,
            requests.len()
        );

        if sink.wants(ScatterEventKind::TermScanned) {
            sink.send(ScatterEvent::TermScanned {
                index,
                term: term.clone(),
                occurrences,
            });
        }

        result.counts.push(TermCount {
            term: term.term.clone(),
            color_tag: term.color_tag,
            occurrences,
        });
        result.requests.extend(requests);
    }

    if result.requests.is_empty() {
        warn!(
            "No watch term matched any of {} tokens; the scene stays empty.",
            tokens.len()
        );
        if sink.wants(ScatterEventKind::Warning) {
            sink.send(ScatterEvent::Warning {
                context: "run".into(),
                message: "No placement requests were produced".into(),
            });
        }
    }

    if sink.wants(ScatterEventKind::RunFinished) {
        sink.send(ScatterEvent::RunFinished {
            result: result.clone(),
        });
    }

    result
}
