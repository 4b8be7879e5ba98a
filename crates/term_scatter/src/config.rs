//! Pipeline configuration: watch terms, fan-out and placement layout.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::terms::{ColorTag, WatchTerm};

/// Placement requests emitted per matching token unless configured otherwise.
pub const DEFAULT_FAN_OUT: usize = 5;

/// Document the classroom scenes read their watch terms from.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/monicedy/monicedy.github.io/main/_posts/Prince.txt";

/// Configuration for a [`crate::pipeline::TermScatterPipeline`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterConfig {
    /// Watch terms, scanned in this order.
    pub terms: Vec<WatchTerm>,
    /// Requests emitted per matching token.
    pub fan_out: usize,
    /// Side length of the square the horizontal offsets are drawn from.
    pub spread: f32,
    /// Vertical offset added to the normalized index when spawning.
    pub height_offset: f32,
    /// RNG seed. A random seed is drawn when unset.
    pub seed: Option<u64>,
    /// Where the document is fetched from, if the caller wants a default.
    pub source_url: Option<String>,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            terms: vec![
                WatchTerm::new("rose", ColorTag::A),
                WatchTerm::new("prince", ColorTag::B),
                WatchTerm::new("fox", ColorTag::C),
            ],
            fan_out: DEFAULT_FAN_OUT,
            spread: 10.0,
            height_offset: 10.0,
            seed: None,
            source_url: Some(DEFAULT_SOURCE_URL.to_owned()),
        }
    }
}

impl ScatterConfig {
    /// Creates a configuration with the given watch terms and default layout.
    pub fn new(terms: Vec<WatchTerm>) -> Self {
        Self {
            terms,
            ..Default::default()
        }
    }

    /// Octahedrons floating above the origin that drop towards their index height.
    pub fn star_drop() -> Self {
        Self::default()
    }

    /// Spheres below the origin that pulse and drift.
    pub fn bubbles() -> Self {
        Self {
            terms: vec![
                WatchTerm::new("bird", ColorTag::A),
                WatchTerm::new("hat", ColorTag::B),
                WatchTerm::new("fox", ColorTag::C),
            ],
            height_offset: -10.0,
            ..Default::default()
        }
    }

    pub fn with_terms(mut self, terms: Vec<WatchTerm>) -> Self {
        self.terms = terms;
        self
    }

    pub fn with_term(mut self, term: WatchTerm) -> Self {
        self.terms.push(term);
        self
    }

    pub fn with_fan_out(mut self, fan_out: usize) -> Self {
        self.fan_out = fan_out;
        self
    }

    pub fn with_spread(mut self, spread: f32) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_height_offset(mut self, height_offset: f32) -> Self {
        self.height_offset = height_offset;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.terms.is_empty() {
            return Err(Error::InvalidConfig("at least one watch term is required".into()));
        }
        if let Some(i) = self.terms.iter().position(|t| t.term.is_empty()) {
            return Err(Error::InvalidConfig(format!("watch term {i} is empty")));
        }
        if self.fan_out == 0 {
            return Err(Error::InvalidConfig("fan_out must be > 0".into()));
        }
        if !self.spread.is_finite() || self.spread <= 0.0 {
            return Err(Error::InvalidConfig("spread must be finite and > 0".into()));
        }
        if !self.height_offset.is_finite() {
            return Err(Error::InvalidConfig("height_offset must be finite".into()));
        }

        Ok(())
    }

    /// Parses a configuration from RON text and validates it.
    #[cfg(feature = "ron")]
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
