use std::time::Duration;

use criterion::{Criterion, Throughput};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

const WORDS: [&str; 12] = [
    "the", "Fox", "sat.", "rose", "prince,", "and", "a", "bird", "flew", "hat", "little", "it's",
];

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn bytes_throughput(bytes: usize) -> Throughput {
    Throughput::Bytes(bytes.max(1) as u64)
}

/// Deterministic prose-like text of roughly `word_count` words.
pub fn synthetic_text(word_count: usize) -> String {
    let mut out = String::with_capacity(word_count * 6);
    for i in 0..word_count {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(WORDS[(i * 7 + i / 3) % WORDS.len()]);
    }
    out
}
