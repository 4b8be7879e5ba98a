//! Turning watch-term occurrences into placement requests.
//!
//! [`scatter_for_term`] handles a single term; [`runner::run_all`] walks every
//! configured term in order and aggregates the results.
use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ScatterConfig;
use crate::scatter::events::{EventSink, ScatterEvent, ScatterEventKind};
use crate::terms::{ColorTag, WatchTerm};
use crate::text::TokenSequence;

pub mod events;
pub mod runner;

/// Scale applied to a token's relative position before [`NORMALIZED_INDEX_FACTOR`].
pub const NORMALIZED_INDEX_SCALE: f64 = 100.0;
/// Factor mapping the scaled position into the display range.
pub const NORMALIZED_INDEX_FACTOR: f64 = 0.2;
/// Nominal upper bound of [`normalized_index`]; never reached.
pub const NORMALIZED_INDEX_MAX: f32 = 20.0;

/// An instruction to create one decorative object.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRequest {
    /// Index of the matching token in the sequence.
    pub token_index: usize,
    /// Token position remapped into `[0, 20)`.
    pub normalized_index: f32,
    pub color_tag: ColorTag,
    /// Idle-animation seed in `[0, 1)`.
    pub seed: f32,
    /// Secondary idle-animation seed in `[-spread/2, spread/2)`.
    pub drift: f32,
    /// Horizontal offset on the x/z plane in `[-spread/2, spread/2)`.
    pub offset: Vec2,
    /// Euler angles (x, y, z) in radians, each in `[0, 2π]`.
    pub rotation: Vec3,
}

impl PlacementRequest {
    /// Spawn position: the offset on x/z, the normalized index raised by `height_offset` on y.
    pub fn position(&self, height_offset: f32) -> Vec3 {
        Vec3::new(
            self.offset.x,
            self.normalized_index + height_offset,
            self.offset.y,
        )
    }
}

/// Maps token `index` of a sequence with `len` tokens into the display range.
///
/// Computed in `f64`; the narrowed value stays strictly below
/// [`NORMALIZED_INDEX_MAX`] for every index inside the sequence.
///
/// Returns `None` for an empty sequence.
pub fn normalized_index(index: usize, len: usize) -> Option<f32> {
    if len == 0 {
        return None;
    }
    let wide = (NORMALIZED_INDEX_SCALE / len as f64) * index as f64 * NORMALIZED_INDEX_FACTOR;
    let below_max = f32::from_bits(NORMALIZED_INDEX_MAX.to_bits() - 1);
    Some((wide as f32).min(below_max))
}

/// Emits `config.fan_out` requests for every token equal to `term.term`, in
/// ascending token order.
pub fn scatter_for_term<R: RngCore>(
    term: &WatchTerm,
    tokens: &TokenSequence,
    config: &ScatterConfig,
    rng: &mut R,
) -> Vec<PlacementRequest> {
    scatter_for_term_internal(term, 0, tokens, config, rng, &mut ())
}

/// Like [`scatter_for_term`], reporting each request to `sink`.
pub fn scatter_for_term_with_events<R: RngCore>(
    term: &WatchTerm,
    tokens: &TokenSequence,
    config: &ScatterConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Vec<PlacementRequest> {
    scatter_for_term_internal(term, 0, tokens, config, rng, sink)
}

pub(crate) fn scatter_for_term_internal<R: RngCore>(
    term: &WatchTerm,
    term_index: usize,
    tokens: &TokenSequence,
    config: &ScatterConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Vec<PlacementRequest> {
    if tokens.is_empty() {
        warn!("Token sequence is empty; no placements for '{}'.", term.term);
        if sink.wants(ScatterEventKind::Warning) {
            sink.send(ScatterEvent::Warning {
                context: format!("term:{}", term.term),
                message: "Token sequence is empty".into(),
            });
        }
        return Vec::new();
    }

    let len = tokens.len();
    let mut out = Vec::new();
    for i in tokens.positions(&term.term) {
        let Some(n) = normalized_index(i, len) else {
            continue;
        };
        for _ in 0..config.fan_out {
            let request = draw_request(i, n, term.color_tag, config.spread, rng);
            if sink.wants(ScatterEventKind::RequestEmitted) {
                sink.send(ScatterEvent::RequestEmitted {
                    term_index,
                    request: request.clone(),
                });
            }
            out.push(request);
        }
    }

    out
}

fn draw_request<R: RngCore>(
    token_index: usize,
    normalized_index: f32,
    color_tag: ColorTag,
    spread: f32,
    rng: &mut R,
) -> PlacementRequest {
    let offset = Vec2::new(
        (rand01(rng) - 0.5) * spread,
        (rand01(rng) - 0.5) * spread,
    );
    let rotation = Vec3::new(rand01(rng) * TAU, rand01(rng) * TAU, rand01(rng) * TAU);
    let seed = rand01(rng);
    let drift = (rand01(rng) - 0.5) * spread;

    PlacementRequest {
        token_index,
        normalized_index,
        color_tag,
        seed,
        drift,
        offset,
        rotation,
    }
}

/// Uniform float in `[0, 1)` built from the top 24 bits of a `u32`.
#[inline]
pub(crate) fn rand01<R: RngCore + ?Sized>(rng: &mut R) -> f32 {
    (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::RngCore;
    use rand::SeedableRng;

    use super::*;
    use crate::text::tokenize_str;

    fn fox() -> WatchTerm {
        WatchTerm::new("fox", ColorTag::A)
    }

    #[test]
    fn fox_sentence_scenario() {
        let tokens = tokenize_str("the Fox sat. The fox ran. A bird flew.");
        assert_eq!(tokens.len(), 9);
        let mut rng = StdRng::seed_from_u64(1);
        let requests = scatter_for_term(&fox(), &tokens, &ScatterConfig::default(), &mut rng);

        assert_eq!(requests.len(), 10);
        assert!(requests.iter().all(|r| r.color_tag == ColorTag::A));
        assert!(requests[..5].iter().all(|r| r.token_index == 1));
        assert!(requests[5..].iter().all(|r| r.token_index == 4));
        assert!((requests[0].normalized_index - 2.222).abs() < 1e-3);
        assert!((requests[5].normalized_index - 8.889).abs() < 1e-3);
    }

    #[test]
    fn empty_document_yields_nothing() {
        let tokens = tokenize_str("");
        assert_eq!(tokens.len(), 1);
        let mut rng = StdRng::seed_from_u64(2);
        assert!(scatter_for_term(&fox(), &tokens, &ScatterConfig::default(), &mut rng).is_empty());
    }

    #[test]
    fn empty_sequence_is_guarded() {
        let mut rng = StdRng::seed_from_u64(3);
        let requests = scatter_for_term(
            &fox(),
            &TokenSequence::default(),
            &ScatterConfig::default(),
            &mut rng,
        );
        assert!(requests.is_empty());
        assert_eq!(normalized_index(0, 0), None);
    }

    #[test]
    fn substrings_never_match() {
        let tokens = tokenize_str("foxes outfox Fox-hole");
        let mut rng = StdRng::seed_from_u64(4);
        let requests = scatter_for_term(&fox(), &tokens, &ScatterConfig::default(), &mut rng);
        // "Fox-hole" splits on '-', so only that token matches.
        assert_eq!(requests.len(), 5);
        assert!(requests.iter().all(|r| r.token_index == 2));
    }

    #[test]
    fn normalized_index_bounds() {
        assert_eq!(normalized_index(0, 50), Some(0.0));
        let last = normalized_index(49, 50).expect("non-empty");
        assert!(last < NORMALIZED_INDEX_MAX);
        assert!((last - 19.6).abs() < 1e-4);
    }

    #[test]
    fn last_index_of_huge_sequence_stays_below_max() {
        for len in [10_000_000usize, 20_000_000, 50_000_000] {
            let last = normalized_index(len - 1, len).expect("non-empty");
            assert!(last < NORMALIZED_INDEX_MAX, "len={len} last={last}");
            assert!(last > 19.99);
        }
        assert_eq!(normalized_index(0, 20_000_000), Some(0.0));
    }

    #[test]
    fn random_fields_stay_in_range() {
        let tokens = tokenize_str(&"fox ".repeat(40));
        let config = ScatterConfig::default().with_spread(4.0);
        let mut rng = StdRng::seed_from_u64(5);
        for r in scatter_for_term(&fox(), &tokens, &config, &mut rng) {
            assert!((0.0..1.0).contains(&r.seed));
            assert!((-2.0..2.0).contains(&r.drift));
            assert!((-2.0..2.0).contains(&r.offset.x));
            assert!((-2.0..2.0).contains(&r.offset.y));
            assert!(r.rotation.cmpge(Vec3::ZERO).all());
            assert!(r.rotation.cmple(Vec3::splat(TAU)).all());
        }
    }

    #[test]
    fn position_lifts_normalized_index() {
        let request = PlacementRequest {
            token_index: 3,
            normalized_index: 4.0,
            color_tag: ColorTag::B,
            seed: 0.5,
            drift: 0.0,
            offset: Vec2::new(1.0, -2.0),
            rotation: Vec3::ZERO,
        };
        assert_eq!(request.position(10.0), Vec3::new(1.0, 14.0, -2.0));
        assert_eq!(request.position(-10.0), Vec3::new(1.0, -6.0, -2.0));
    }

    #[test]
    fn rand01_never_reaches_one() {
        struct MaxRng;
        impl RngCore for MaxRng {
            fn next_u32(&mut self) -> u32 {
                u32::MAX
            }
            fn next_u64(&mut self) -> u64 {
                u64::MAX
            }
            fn fill_bytes(&mut self, dst: &mut [u8]) {
                dst.fill(0xff);
            }
        }
        assert!(rand01(&mut MaxRng) < 1.0);
    }

    proptest! {
        #[test]
        fn fan_out_times_occurrences(
            words in prop::collection::vec(prop::sample::select(vec!["fox", "hen", "Fox", "foxy"]), 0..60),
            fan_out in 1usize..8,
        ) {
            let text = words.join(" ");
            let tokens = tokenize_str(&text);
            let k = tokens.count("fox");
            let config = ScatterConfig::default().with_fan_out(fan_out);
            let mut rng = StdRng::seed_from_u64(9);
            let requests = scatter_for_term(&fox(), &tokens, &config, &mut rng);
            prop_assert_eq!(requests.len(), fan_out * k);
            prop_assert!(requests.windows(2).all(|w| w[0].token_index <= w[1].token_index));
        }
    }
}
