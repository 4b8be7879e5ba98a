#![forbid(unsafe_code)]
//! term_scatter: term-driven scene population.
//!
//! A source document is tokenized, scanned for a small set of watch terms, and
//! every occurrence fans out into a batch of placement requests for a scene.
//!
//! Modules:
//! - text: source documents and the tokenizer
//! - terms: watch terms and color tags
//! - scatter: placement requests, per-term scatter, full runs, events
//! - pipeline: load-and-scatter driver owning the document, tokens and RNG
//! - source: document fetching (memory, filesystem, HTTP) and background fetches
//! - scene: contract with the scene collaborator and the owned object population
//! - animate: control-panel view state, clock and per-frame idle motion
//! - config: pipeline configuration and presets
pub mod animate;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod scatter;
pub mod scene;
pub mod source;
pub mod terms;
pub mod text;

/// Convenient re-exports for common types. Import with `use term_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::animate::{camera_orbit, Animator, Clock, IdleMotion, ViewState};
    pub use crate::config::ScatterConfig;
    pub use crate::error::{Error, FetchError, Result};
    pub use crate::pipeline::TermScatterPipeline;
    pub use crate::scatter::events::{
        ChannelSink, EventSink, FnSink, MultiSink, ScatterEvent, ScatterEventKind, VecSink,
    };
    pub use crate::scatter::runner::{run_all, run_all_with_events, ScatterResult, TermCount};
    pub use crate::scatter::{normalized_index, scatter_for_term, PlacementRequest};
    pub use crate::scene::{ObjectTransform, PlacedObject, SceneSink, ScenePopulation, SpawnSpec};
    #[cfg(feature = "http")]
    pub use crate::source::HttpSource;
    pub use crate::source::{spawn_fetch, DocumentSource, FileSource, PendingDocument, TextSource};
    pub use crate::terms::{ColorTag, WatchTerm};
    pub use crate::text::{tokenize, SourceDocument, TokenSequence};
}
