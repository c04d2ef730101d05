//! European roulette wheel layout.
//!
//! Pockets are numbered 0 through 36. In the ranges 1-10 and 19-28 odd
//! numbers are red and even numbers black; in 11-18 and 29-36 the parity
//! flips. Pocket 0 is the single green pocket.

use std::sync::OnceLock;

use crate::types::{Color, Pocket, SimError};

/// Highest pocket number on a European wheel.
pub const MAX_POCKET: Pocket = 36;

/// Number of pockets, including zero.
pub const POCKET_COUNT: usize = MAX_POCKET as usize + 1;

/// Immutable pocket → color table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelMapping {
    colors: [Color; POCKET_COUNT],
}

impl WheelMapping {
    /// Build the table from the layout rule.
    pub fn build() -> Self {
        let mut colors = [Color::Green; POCKET_COUNT];
        for pocket in 1..=MAX_POCKET {
            colors[usize::from(pocket)] = layout_color(pocket);
        }
        Self { colors }
    }

    /// The process-wide wheel, built on first use.
    pub fn european() -> &'static WheelMapping {
        static WHEEL: OnceLock<WheelMapping> = OnceLock::new();
        WHEEL.get_or_init(Self::build)
    }

    /// Color of `pocket`, or `OutOfRange` past 36.
    pub fn color_of(&self, pocket: Pocket) -> Result<Color, SimError> {
        self.colors
            .get(usize::from(pocket))
            .copied()
            .ok_or(SimError::OutOfRange(pocket))
    }

    /// All pockets with their colors, in pocket order.
    pub fn iter(&self) -> impl Iterator<Item = (Pocket, Color)> + '_ {
        (0..=MAX_POCKET).zip(self.colors.iter().copied())
    }

    /// Number of pockets carrying `color`.
    pub fn count(&self, color: Color) -> usize {
        self.colors.iter().filter(|c| **c == color).count()
    }
}

impl Default for WheelMapping {
    fn default() -> Self {
        Self::build()
    }
}

fn layout_color(pocket: Pocket) -> Color {
    if pocket == 0 {
        return Color::Green;
    }
    let even = pocket % 2 == 0;
    let low_block = matches!(pocket, 1..=10 | 19..=28);
    // Same parity rule in both blocks, inverted.
    if even == low_block {
        Color::Black
    } else {
        Color::Red
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
