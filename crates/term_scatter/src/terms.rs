//! Watch terms and the color tags they carry into the scene.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Visual tag attached to every placement produced by a watch term.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorTag {
    A,
    B,
    C,
}

impl ColorTag {
    pub const ALL: [ColorTag; 3] = [ColorTag::A, ColorTag::B, ColorTag::C];

    /// Default display color as 8-bit RGB (red, green, blue for A, B, C).
    pub fn rgb(self) -> [u8; 3] {
        match self {
            ColorTag::A => [255, 0, 0],
            ColorTag::B => [0, 128, 0],
            ColorTag::C => [0, 0, 255],
        }
    }

    /// Position of the tag in [`ColorTag::ALL`].
    pub fn index(self) -> usize {
        match self {
            ColorTag::A => 0,
            ColorTag::B => 1,
            ColorTag::C => 2,
        }
    }
}

/// A word whose occurrences trigger placements, with the tag they receive.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct WatchTerm {
    /// Lowercase term matched against tokens by exact equality.
    pub term: String,
    pub color_tag: ColorTag,
}

impl WatchTerm {
    pub fn new(term: impl Into<String>, color_tag: ColorTag) -> Self {
        Self {
            term: term.into(),
            color_tag,
        }
    }
}
